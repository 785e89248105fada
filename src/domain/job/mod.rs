//! Job domain

mod entity;
mod repository;

pub use entity::Job;
pub use repository::{JobFilter, JobRepository};

#[cfg(test)]
pub use repository::MockJobRepository;
