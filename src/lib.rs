pub mod error;
pub use error::*;

pub mod fetcher;
pub mod provider;
pub mod sync;
pub mod types;

mod wrapper;
