pub mod user_repo;
pub mod memory;

pub use user_repo::{MongoUserRepository, UserStore};
pub use memory::InMemoryUserStore;
