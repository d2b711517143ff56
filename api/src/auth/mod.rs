//! Authentication: password hashing and the session gateway.

mod gateway;
mod password;

pub use gateway::{AuthenticationGateway, Credentials, SessionGateway, SessionToken};
pub use password::{hash_password, verify_password, PasswordError};
