//! Domain layer - Core business logic and entities

pub mod account;
pub mod application;
pub mod candidate;
pub mod company;
pub mod error;
pub mod job;

pub use account::{
    Account, AccountFilter, AccountId, AccountRepository, AuthFailure, AuthFailureReason,
    AuthOutcome, EmailAddress, Principal,
};
pub use application::{Application, ApplicationFilter, ApplicationRepository};
pub use candidate::{Candidate, CandidateFilter, CandidateRepository};
pub use company::{Company, CompanyFilter, CompanyRepository};
pub use error::DomainError;
pub use job::{Job, JobFilter, JobRepository};
