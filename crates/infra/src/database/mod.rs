//! SQLite-backed store implementation

pub mod author_repository;
pub mod manager;

pub use author_repository::SqliteAuthorRepository;
pub use manager::DbManager;
