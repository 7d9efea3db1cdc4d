use async_trait::async_trait;
use std::sync::Arc;

use crate::database::actors::PgActorRepository;
use crate::database::films::PgFilmRepository;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Actor, ActorFilm, Film, Role, User};
use crate::database::query_builder::{FilmOrder, SortDirection};
use crate::database::users::PgUserRepository;

#[async_trait]
pub trait ActorRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Actor>, DatabaseError>;

    /// Every actor that has at least one film, with its films attached.
    async fn list_with_films(&self) -> Result<Vec<ActorFilm>, DatabaseError>;

    async fn get(&self, id: i64) -> Result<Actor, DatabaseError>;

    /// Inserts the actor and returns the assigned id. `actor.id` is ignored.
    async fn create(&self, actor: &Actor) -> Result<i64, DatabaseError>;

    /// Replaces the mutable fields of the row keyed by `actor.id`.
    /// Returns the number of rows touched.
    async fn update(&self, actor: &Actor) -> Result<u64, DatabaseError>;

    /// Removes the actor's association rows, then the actor, atomically.
    /// Returns the number of actor rows removed.
    async fn delete(&self, id: i64) -> Result<u64, DatabaseError>;
}

#[async_trait]
pub trait FilmRepository: Send + Sync {
    /// Case-insensitive substring match on title.
    async fn search_by_title(&self, title: &str) -> Result<Vec<Film>, DatabaseError>;

    async fn list_sorted(
        &self,
        order: FilmOrder,
        direction: SortDirection,
    ) -> Result<Vec<Film>, DatabaseError>;

    async fn search_sorted(
        &self,
        title: &str,
        order: FilmOrder,
        direction: SortDirection,
    ) -> Result<Vec<Film>, DatabaseError>;

    async fn get(&self, id: i64) -> Result<Film, DatabaseError>;

    async fn create(&self, film: &Film) -> Result<i64, DatabaseError>;

    async fn update(&self, film: &Film) -> Result<u64, DatabaseError>;

    async fn delete(&self, id: i64) -> Result<u64, DatabaseError>;

    /// Actors whose name, surname or patronymic contains `needle`
    /// (case-insensitive), each with all of its films.
    async fn search_with_actor(&self, needle: &str) -> Result<Vec<ActorFilm>, DatabaseError>;

    /// Links every actor in `actor_ids` to the film, in one transaction.
    async fn add_actors(&self, film_id: i64, actor_ids: &[i64]) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user (password already hashed) and links it to the named
    /// role. Fails with `NotFound` when the role does not exist.
    async fn create_user(&self, user: &User, role: &str) -> Result<i64, DatabaseError>;

    async fn find_by_credentials(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<Option<User>, DatabaseError>;

    async fn roles_for_user(&self, user_id: i64) -> Result<Vec<Role>, DatabaseError>;
}

#[async_trait]
pub trait StorageHealth: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[async_trait]
impl StorageHealth for DatabaseManager {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.health_check().await
    }
}

/// Every repository the services need, behind trait objects.
#[derive(Clone)]
pub struct Storage {
    pub actors: Arc<dyn ActorRepository>,
    pub films: Arc<dyn FilmRepository>,
    pub users: Arc<dyn UserRepository>,
    pub health: Arc<dyn StorageHealth>,
}

impl Storage {
    pub fn postgres(manager: DatabaseManager) -> Self {
        let pool = manager.pool().clone();
        Self {
            actors: Arc::new(PgActorRepository::new(pool.clone())),
            films: Arc::new(PgFilmRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
            health: Arc::new(manager),
        }
    }
}
