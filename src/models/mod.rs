pub mod admin;
pub mod common;
pub mod pagination;
pub mod prize;
pub mod spin;
pub mod token;

pub use admin::*;
pub use common::*;
pub use pagination::*;
pub use prize::*;
pub use spin::*;
pub use token::*;
