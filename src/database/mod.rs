pub mod actors;
pub mod aggregate;
pub mod films;
pub mod manager;
pub mod models;
pub mod query_builder;
pub mod repository;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{ActorRepository, FilmRepository, Storage, StorageHealth, UserRepository};
