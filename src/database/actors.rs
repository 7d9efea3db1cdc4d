use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::PgPool;

use crate::database::aggregate::{ActorFilmAggregator, ActorFilmRow};
use crate::database::manager::DatabaseError;
use crate::database::models::{Actor, ActorFilm};
use crate::database::query_builder::actor_films_sql;
use crate::database::repository::ActorRepository;

const SELECT_ACTORS: &str =
    "SELECT id, name, surname, patronymic, birthday, sex, information FROM actors";

const SELECT_ACTOR: &str =
    "SELECT id, name, surname, patronymic, birthday, sex, information FROM actors WHERE id = $1";

const INSERT_ACTOR: &str = r#"
INSERT INTO actors (name, surname, patronymic, birthday, sex, information)
VALUES ($1, $2, $3, $4, $5, $6)
RETURNING id"#;

const UPDATE_ACTOR: &str = r#"
UPDATE actors SET name = $1, surname = $2, patronymic = $3, birthday = $4, sex = $5, information = $6
WHERE id = $7"#;

const DELETE_ACTOR_FILMS: &str = "DELETE FROM films_actors WHERE actor_id = $1";

const DELETE_ACTOR: &str = "DELETE FROM actors WHERE id = $1";

pub struct PgActorRepository {
    pool: PgPool,
}

impl PgActorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActorRepository for PgActorRepository {
    async fn list(&self) -> Result<Vec<Actor>, DatabaseError> {
        let actors = sqlx::query_as::<_, Actor>(SELECT_ACTORS)
            .fetch_all(&self.pool)
            .await?;
        Ok(actors)
    }

    async fn list_with_films(&self) -> Result<Vec<ActorFilm>, DatabaseError> {
        let sql = actor_films_sql(false);
        let mut rows = sqlx::query_as::<_, ActorFilmRow>(&sql).fetch(&self.pool);

        let mut agg = ActorFilmAggregator::default();
        while let Some(row) = rows.try_next().await? {
            agg.push(row);
        }
        Ok(agg.finish())
    }

    async fn get(&self, id: i64) -> Result<Actor, DatabaseError> {
        sqlx::query_as::<_, Actor>(SELECT_ACTOR)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("actor {}", id)))
    }

    async fn create(&self, actor: &Actor) -> Result<i64, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(INSERT_ACTOR)
            .bind(&actor.name)
            .bind(&actor.surname)
            .bind(&actor.patronymic)
            .bind(actor.birthday)
            .bind(&actor.sex)
            .bind(&actor.information)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, actor: &Actor) -> Result<u64, DatabaseError> {
        let result = sqlx::query(UPDATE_ACTOR)
            .bind(&actor.name)
            .bind(&actor.surname)
            .bind(&actor.patronymic)
            .bind(actor.birthday)
            .bind(&actor.sex)
            .bind(&actor.information)
            .bind(actor.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(DELETE_ACTOR_FILMS).bind(id).execute(&mut *tx).await?;
        let result = sqlx::query(DELETE_ACTOR).bind(id).execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
