pub mod code_generator;
pub mod jwt;
pub mod password;
pub mod wheel;

pub use code_generator::{generate_token_code, normalize_token_code};
pub use jwt::*;
pub use password::*;
