pub mod admin_service;
pub mod auth_service;
pub mod prize_service;
pub mod spin_service;
pub mod token_service;

pub use admin_service::*;
pub use auth_service::*;
pub use prize_service::*;
pub use spin_service::*;
pub use token_service::*;
