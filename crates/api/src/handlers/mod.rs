pub mod auth;
pub mod books;
pub mod memberships;
pub mod reports;
pub mod transactions;
pub mod users;
