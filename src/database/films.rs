use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::PgPool;

use crate::database::aggregate::{ActorFilmAggregator, ActorFilmRow};
use crate::database::manager::DatabaseError;
use crate::database::models::{ActorFilm, Film};
use crate::database::query_builder::{
    actor_films_sql, escape_like, FilmOrder, FilmQuery, SortDirection,
};
use crate::database::repository::FilmRepository;

const SELECT_FILM: &str = "SELECT id, title, year, information, rating FROM films WHERE id = $1";

const INSERT_FILM: &str = r#"
INSERT INTO films (title, year, information, rating)
VALUES ($1, $2, $3, $4)
RETURNING id"#;

const UPDATE_FILM: &str =
    "UPDATE films SET title = $1, year = $2, information = $3, rating = $4 WHERE id = $5";

const DELETE_FILM_ACTORS: &str = "DELETE FROM films_actors WHERE film_id = $1";

const DELETE_FILM: &str = "DELETE FROM films WHERE id = $1";

const INSERT_FILM_ACTOR: &str = "INSERT INTO films_actors (film_id, actor_id) VALUES ($1, $2)";

pub struct PgFilmRepository {
    pool: PgPool,
}

impl PgFilmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn select(&self, query: FilmQuery) -> Result<Vec<Film>, DatabaseError> {
        let sql = query.to_sql();
        let mut q = sqlx::query_as::<_, Film>(&sql.query);
        for p in sql.params.iter() {
            q = q.bind(p);
        }
        let films = q.fetch_all(&self.pool).await?;
        Ok(films)
    }
}

#[async_trait]
impl FilmRepository for PgFilmRepository {
    async fn search_by_title(&self, title: &str) -> Result<Vec<Film>, DatabaseError> {
        self.select(FilmQuery::new().title_like(title)).await
    }

    async fn list_sorted(
        &self,
        order: FilmOrder,
        direction: SortDirection,
    ) -> Result<Vec<Film>, DatabaseError> {
        self.select(FilmQuery::new().order_by(order, direction)).await
    }

    async fn search_sorted(
        &self,
        title: &str,
        order: FilmOrder,
        direction: SortDirection,
    ) -> Result<Vec<Film>, DatabaseError> {
        self.select(FilmQuery::new().title_like(title).order_by(order, direction))
            .await
    }

    async fn get(&self, id: i64) -> Result<Film, DatabaseError> {
        sqlx::query_as::<_, Film>(SELECT_FILM)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("film {}", id)))
    }

    async fn create(&self, film: &Film) -> Result<i64, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(INSERT_FILM)
            .bind(&film.title)
            .bind(film.year)
            .bind(&film.information)
            .bind(film.rating)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, film: &Film) -> Result<u64, DatabaseError> {
        let result = sqlx::query(UPDATE_FILM)
            .bind(&film.title)
            .bind(film.year)
            .bind(&film.information)
            .bind(film.rating)
            .bind(film.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(DELETE_FILM_ACTORS).bind(id).execute(&mut *tx).await?;
        let result = sqlx::query(DELETE_FILM).bind(id).execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    async fn search_with_actor(&self, needle: &str) -> Result<Vec<ActorFilm>, DatabaseError> {
        let sql = actor_films_sql(true);
        let needle = escape_like(&needle.to_lowercase());
        let mut rows = sqlx::query_as::<_, ActorFilmRow>(&sql)
            .bind(&needle)
            .fetch(&self.pool);

        let mut agg = ActorFilmAggregator::default();
        while let Some(row) = rows.try_next().await? {
            agg.push(row);
        }
        Ok(agg.finish())
    }

    async fn add_actors(&self, film_id: i64, actor_ids: &[i64]) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        for actor_id in actor_ids {
            sqlx::query(INSERT_FILM_ACTOR)
                .bind(film_id)
                .bind(*actor_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
