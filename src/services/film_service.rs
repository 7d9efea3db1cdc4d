use std::sync::Arc;

use crate::database::models::{ActorFilm, Film};
use crate::database::query_builder::{FilmOrder, SortDirection};
use crate::database::FilmRepository;

use super::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct FilmService {
    repo: Arc<dyn FilmRepository>,
}

impl FilmService {
    pub fn new(repo: Arc<dyn FilmRepository>) -> Self {
        Self { repo }
    }

    pub async fn films_like(&self, title: &str) -> ServiceResult<Vec<Film>> {
        Ok(self.repo.search_by_title(title).await?)
    }

    /// Sorted listing. Keys other than `title` and `year` sort by rating.
    pub async fn films_sorted(&self, order_by: &str, desc: bool) -> ServiceResult<Vec<Film>> {
        let order = FilmOrder::normalize(order_by);
        Ok(self
            .repo
            .list_sorted(order, SortDirection::from_desc(desc))
            .await?)
    }

    pub async fn films_sorted_like(
        &self,
        order_by: &str,
        title: &str,
        desc: bool,
    ) -> ServiceResult<Vec<Film>> {
        let order = FilmOrder::normalize(order_by);
        Ok(self
            .repo
            .search_sorted(title, order, SortDirection::from_desc(desc))
            .await?)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Film> {
        Ok(self.repo.get(id).await?)
    }

    pub async fn create(&self, film: Film) -> ServiceResult<i64> {
        if !film.is_valid() {
            return Err(ServiceError::Validation("film is not valid".to_string()));
        }
        let id = self.repo.create(&film).await?;
        tracing::info!("Created film {} ({})", id, film.title);
        Ok(id)
    }

    pub async fn update(&self, id: i64, mut film: Film) -> ServiceResult<()> {
        film.id = id;
        if !film.is_valid() {
            return Err(ServiceError::Validation("film is not valid".to_string()));
        }
        let touched = self.repo.update(&film).await?;
        if touched == 0 {
            tracing::warn!("Update of film {} matched no rows", id);
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let removed = self.repo.delete(id).await?;
        if removed == 0 {
            tracing::warn!("Delete of film {} matched no rows", id);
        } else {
            tracing::info!("Deleted film {}", id);
        }
        Ok(())
    }

    pub async fn search_with_actor(&self, needle: &str) -> ServiceResult<Vec<ActorFilm>> {
        Ok(self.repo.search_with_actor(needle).await?)
    }

    pub async fn add_actors(&self, film_id: i64, actor_ids: &[i64]) -> ServiceResult<()> {
        if film_id < 0 || actor_ids.iter().any(|id| *id < 0) {
            return Err(ServiceError::Validation("ids must be non-negative".to_string()));
        }
        self.repo.add_actors(film_id, actor_ids).await?;
        tracing::info!("Linked {} actor(s) to film {}", actor_ids.len(), film_id);
        Ok(())
    }
}
