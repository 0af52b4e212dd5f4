mod types;
pub use types::{ListApi, RuleApi};

pub mod cloudflare;
pub use cloudflare::{CF_API_BASE, CfClient, Cloudflare};
