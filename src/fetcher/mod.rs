pub mod client;
pub mod errors;
pub mod pipeline;
pub mod retry;
pub mod types;

pub use client::fetch;
pub use errors::FetchError;
pub use retry::{fetch_with_retry, polite_pause};
pub use types::{Charset, RawDocument};
