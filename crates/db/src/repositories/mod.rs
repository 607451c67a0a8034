mod book_repo;
mod membership_repo;
mod transaction_repo;
mod user_repo;

pub use book_repo::BookRepo;
pub use membership_repo::MembershipRepo;
pub use transaction_repo::TransactionRepo;
pub use user_repo::UserRepo;
