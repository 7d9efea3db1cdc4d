use thiserror::Error;

use crate::auth::{AuthError, PasswordHasher, TokenIssuer};
use crate::config::AppConfig;
use crate::database::{DatabaseError, Storage};

pub mod actor_service;
pub mod film_service;
pub mod user_service;

pub use actor_service::ActorService;
pub use film_service::FilmService;
pub use user_service::UserService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid login or password")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(what) => ServiceError::NotFound(what),
            other => ServiceError::Database(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// The business layer, one service per entity.
#[derive(Clone)]
pub struct Services {
    pub actors: ActorService,
    pub films: FilmService,
    pub users: UserService,
}

impl Services {
    pub fn new(storage: &Storage, config: &AppConfig) -> Self {
        Self {
            actors: ActorService::new(storage.actors.clone()),
            films: FilmService::new(storage.films.clone()),
            users: UserService::new(
                storage.users.clone(),
                TokenIssuer::from_config(&config.security),
                PasswordHasher::new(config.security.password_salt.clone()),
            ),
        }
    }
}
