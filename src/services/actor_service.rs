use std::sync::Arc;

use crate::database::models::{Actor, ActorFilm};
use crate::database::ActorRepository;

use super::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct ActorService {
    repo: Arc<dyn ActorRepository>,
}

impl ActorService {
    pub fn new(repo: Arc<dyn ActorRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Actor>> {
        Ok(self.repo.list().await?)
    }

    pub async fn list_with_films(&self) -> ServiceResult<Vec<ActorFilm>> {
        Ok(self.repo.list_with_films().await?)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Actor> {
        Ok(self.repo.get(id).await?)
    }

    pub async fn create(&self, actor: Actor) -> ServiceResult<i64> {
        if !actor.is_valid() {
            return Err(ServiceError::Validation("actor is not valid".to_string()));
        }
        let id = self.repo.create(&actor).await?;
        tracing::info!("Created actor {} ({} {})", id, actor.name, actor.surname);
        Ok(id)
    }

    /// Full replace of the mutable fields of actor `id`.
    pub async fn update(&self, id: i64, mut actor: Actor) -> ServiceResult<()> {
        actor.id = id;
        if !actor.is_valid() {
            return Err(ServiceError::Validation("actor is not valid".to_string()));
        }
        let touched = self.repo.update(&actor).await?;
        if touched == 0 {
            tracing::warn!("Update of actor {} matched no rows", id);
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let removed = self.repo.delete(id).await?;
        if removed == 0 {
            tracing::warn!("Delete of actor {} matched no rows", id);
        } else {
            tracing::info!("Deleted actor {}", id);
        }
        Ok(())
    }
}
