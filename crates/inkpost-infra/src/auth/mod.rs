//! Session token and password hashing implementations.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::BcryptPasswordService;
