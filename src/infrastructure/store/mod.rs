//! Remote table store client

mod client;
mod filter;

pub use client::TableClient;
pub use filter::Query;
