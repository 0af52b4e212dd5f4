mod types;
pub use types::Fetcher;

mod http_fetcher;
pub use http_fetcher::{HttpFetcher, UPTIME_ROBOT_IPS_URL, parse_ip_list};
