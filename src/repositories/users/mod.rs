pub mod memory;
pub mod user_repo;

pub use memory::MemoryUserRepository;
pub use user_repo::{MongoUserRepository, UserRepository};
