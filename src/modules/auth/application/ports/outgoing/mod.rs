pub mod password_hasher;
pub mod reset_token_repository;
pub mod token_blacklist;
pub mod token_hasher;
pub mod token_provider;
pub mod user_query;
pub mod user_repository;

pub use user_query::UserQuery;
pub use user_repository::{UserRepository, UserRepositoryError};
