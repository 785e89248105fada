//! Infrastructure layer: adapters for the store, hashing, tokens, and logging

pub mod account;
pub mod auth;
pub mod board;
pub mod logging;
pub mod store;
