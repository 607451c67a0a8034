pub mod book;
pub mod membership;
pub mod transaction;
pub mod user;
