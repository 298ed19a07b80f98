pub mod session_repo;
pub mod memory;

pub use session_repo::{RedisSessionRepository, SessionStore};
pub use memory::InMemorySessionStore;
