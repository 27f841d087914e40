/// Security primitives: password hashing and token issuing.
pub mod jwt;
pub mod password;

pub use jwt::{issue_token_pair, refresh_access_token, validate_access_token, TokenPair};
pub use password::{hash_password, verify_password};
