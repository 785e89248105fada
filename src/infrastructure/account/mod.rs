//! Account infrastructure: hashing, persistence, and the account service

pub mod password;
pub mod repository;
pub mod service;
pub mod store_repository;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::InMemoryAccountRepository;
pub use service::{
    AccountService, AccountServiceTrait, ProvisionRequest, Provisioned, RegisterRequest,
};
pub use store_repository::StoreAccountRepository;
