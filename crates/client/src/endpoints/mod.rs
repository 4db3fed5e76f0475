//! REST API endpoint implementations.

mod animals;
mod home;
pub mod request;

pub use animals::{fetch_detail, fetch_list_page};
pub use home::submit_batch;
pub use request::{RetryPolicy, decode_json, send_request_with_retry};
