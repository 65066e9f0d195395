pub mod admins;
pub mod prizes;
pub mod spin_results;
pub mod tokens;

pub use admins::{AdminRole, Capability};

pub use admins as admin_entity;
pub use prizes as prize_entity;
pub use spin_results as spin_result_entity;
pub use tokens as token_entity;
