mod serializer;

mod restful_cli;
pub use restful_cli::{CF_API_BASE, CfClient, CfResponse};

mod cloudflare;
pub use cloudflare::Cloudflare;

mod lists;
mod rules;
