pub mod error;
pub mod fine;
pub mod membership;
pub mod roles;
pub mod status;
pub mod types;
