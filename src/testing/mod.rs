//! In-memory repositories for unit and router tests.
//!
//! Semantics follow the PostgreSQL queries closely enough for the services:
//! case-insensitive substring matching, NULL ratings sorting last ascending
//! and first descending, association rows removed before parents.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::AppConfig;
use crate::database::aggregate::{ActorFilmAggregator, ActorFilmRow};
use crate::database::models::{Actor, ActorFilm, Film, Role, User};
use crate::database::query_builder::{FilmOrder, SortDirection};
use crate::database::{
    ActorRepository, DatabaseError, FilmRepository, Storage, StorageHealth, UserRepository,
};
use crate::services::Services;
use crate::AppState;

#[derive(Default)]
struct Tables {
    actors: Vec<Actor>,
    films: Vec<Film>,
    /// (film_id, actor_id)
    films_actors: Vec<(i64, i64)>,
    users: Vec<User>,
    roles: Vec<Role>,
    /// (user_id, role_id)
    users_roles: Vec<(i64, i64)>,
    last_actor_id: i64,
    last_film_id: i64,
    last_user_id: i64,
    last_role_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Store seeded with the "admin" and "user" roles.
    pub fn with_default_roles() -> Self {
        let store = Self::default();
        store.insert_role("admin");
        store.insert_role("user");
        store
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert_role(&self, name: &str) -> i64 {
        let mut t = self.lock();
        t.last_role_id += 1;
        let id = t.last_role_id;
        t.roles.push(Role { id, name: name.to_string() });
        id
    }

    pub fn insert_actor(&self, name: &str, surname: &str) -> i64 {
        let mut t = self.lock();
        t.last_actor_id += 1;
        let id = t.last_actor_id;
        t.actors.push(Actor {
            id,
            name: name.to_string(),
            surname: surname.to_string(),
            patronymic: None,
            birthday: NaiveDate::from_ymd_opt(1971, 12, 27),
            sex: "m".to_string(),
            information: None,
        });
        id
    }

    pub fn insert_film(&self, title: &str, year: i32, rating: Option<f64>) -> i64 {
        let mut t = self.lock();
        t.last_film_id += 1;
        let id = t.last_film_id;
        t.films.push(Film {
            id,
            title: title.to_string(),
            year,
            information: None,
            rating,
        });
        id
    }

    pub fn link(&self, film_id: i64, actor_id: i64) {
        self.lock().films_actors.push((film_id, actor_id));
    }

    pub fn actors(&self) -> Vec<Actor> {
        self.lock().actors.clone()
    }

    pub fn films(&self) -> Vec<Film> {
        self.lock().films.clone()
    }

    pub fn links(&self) -> Vec<(i64, i64)> {
        self.lock().films_actors.clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    fn joined(t: &Tables, keep: impl Fn(&Actor) -> bool) -> Vec<ActorFilm> {
        let rows = t.films_actors.iter().filter_map(|(film_id, actor_id)| {
            let actor = t.actors.iter().find(|a| a.id == *actor_id)?;
            let film = t.films.iter().find(|f| f.id == *film_id)?;
            if !keep(actor) {
                return None;
            }
            Some(ActorFilmRow {
                actor_id: actor.id,
                name: actor.name.clone(),
                surname: actor.surname.clone(),
                patronymic: actor.patronymic.clone(),
                birthday: actor.birthday,
                sex: actor.sex.clone(),
                actor_information: actor.information.clone(),
                film_id: film.id,
                title: film.title.clone(),
                year: film.year,
                film_information: film.information.clone(),
                rating: film.rating,
            })
        });
        rows.collect::<ActorFilmAggregator>().finish()
    }

    fn matching(t: &Tables, title: Option<&str>) -> Vec<Film> {
        let needle = title.map(str::to_lowercase);
        t.films
            .iter()
            .filter(|f| match &needle {
                Some(n) => f.title.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .cloned()
            .collect()
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// NULL ratings compare greater than any value, as in PostgreSQL.
fn compare_films(a: &Film, b: &Film, order: FilmOrder) -> Ordering {
    match order {
        FilmOrder::Title => a.title.cmp(&b.title),
        FilmOrder::Year => a.year.cmp(&b.year),
        FilmOrder::Rating => match (a.rating, b.rating) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
        },
    }
}

fn sort_films(mut films: Vec<Film>, order: FilmOrder, direction: SortDirection) -> Vec<Film> {
    films.sort_by(|a, b| {
        let ord = compare_films(a, b, order);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    films
}

#[async_trait]
impl ActorRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Actor>, DatabaseError> {
        Ok(self.actors())
    }

    async fn list_with_films(&self) -> Result<Vec<ActorFilm>, DatabaseError> {
        Ok(Self::joined(&self.lock(), |_| true))
    }

    async fn get(&self, id: i64) -> Result<Actor, DatabaseError> {
        self.lock()
            .actors
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("actor {}", id)))
    }

    async fn create(&self, actor: &Actor) -> Result<i64, DatabaseError> {
        let mut t = self.lock();
        t.last_actor_id += 1;
        let id = t.last_actor_id;
        t.actors.push(Actor { id, ..actor.clone() });
        Ok(id)
    }

    async fn update(&self, actor: &Actor) -> Result<u64, DatabaseError> {
        let mut t = self.lock();
        match t.actors.iter_mut().find(|a| a.id == actor.id) {
            Some(slot) => {
                *slot = actor.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let mut t = self.lock();
        t.films_actors.retain(|(_, actor_id)| *actor_id != id);
        let before = t.actors.len();
        t.actors.retain(|a| a.id != id);
        Ok((before - t.actors.len()) as u64)
    }
}

#[async_trait]
impl FilmRepository for MemoryStore {
    async fn search_by_title(&self, title: &str) -> Result<Vec<Film>, DatabaseError> {
        Ok(Self::matching(&self.lock(), Some(title)))
    }

    async fn list_sorted(
        &self,
        order: FilmOrder,
        direction: SortDirection,
    ) -> Result<Vec<Film>, DatabaseError> {
        Ok(sort_films(Self::matching(&self.lock(), None), order, direction))
    }

    async fn search_sorted(
        &self,
        title: &str,
        order: FilmOrder,
        direction: SortDirection,
    ) -> Result<Vec<Film>, DatabaseError> {
        Ok(sort_films(Self::matching(&self.lock(), Some(title)), order, direction))
    }

    async fn get(&self, id: i64) -> Result<Film, DatabaseError> {
        self.lock()
            .films
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("film {}", id)))
    }

    async fn create(&self, film: &Film) -> Result<i64, DatabaseError> {
        let mut t = self.lock();
        t.last_film_id += 1;
        let id = t.last_film_id;
        t.films.push(Film { id, ..film.clone() });
        Ok(id)
    }

    async fn update(&self, film: &Film) -> Result<u64, DatabaseError> {
        let mut t = self.lock();
        match t.films.iter_mut().find(|f| f.id == film.id) {
            Some(slot) => {
                *slot = film.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let mut t = self.lock();
        t.films_actors.retain(|(film_id, _)| *film_id != id);
        let before = t.films.len();
        t.films.retain(|f| f.id != id);
        Ok((before - t.films.len()) as u64)
    }

    async fn search_with_actor(&self, needle: &str) -> Result<Vec<ActorFilm>, DatabaseError> {
        let needle = needle.to_lowercase();
        Ok(Self::joined(&self.lock(), |a| {
            contains_folded(&a.name, &needle)
                || contains_folded(&a.surname, &needle)
                || a.patronymic.as_deref().is_some_and(|p| contains_folded(p, &needle))
        }))
    }

    async fn add_actors(&self, film_id: i64, actor_ids: &[i64]) -> Result<(), DatabaseError> {
        let mut t = self.lock();
        if !t.films.iter().any(|f| f.id == film_id) {
            return Err(DatabaseError::NotFound(format!("film {}", film_id)));
        }
        if let Some(missing) = actor_ids.iter().find(|id| !t.actors.iter().any(|a| a.id == **id)) {
            return Err(DatabaseError::NotFound(format!("actor {}", missing)));
        }
        for actor_id in actor_ids {
            t.films_actors.push((film_id, *actor_id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &User, role: &str) -> Result<i64, DatabaseError> {
        let mut t = self.lock();
        let role_id = t
            .roles
            .iter()
            .find(|r| r.name == role)
            .map(|r| r.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("role '{}'", role)))?;
        if t.users.iter().any(|u| u.login == user.login) {
            return Err(DatabaseError::Sqlx(sqlx::Error::Protocol(format!(
                "duplicate login '{}'",
                user.login
            ))));
        }

        t.last_user_id += 1;
        let id = t.last_user_id;
        t.users.push(User { id, ..user.clone() });
        t.users_roles.push((id, role_id));
        Ok(id)
    }

    async fn find_by_credentials(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<Option<User>, DatabaseError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.login == login && u.password == password_hash)
            .cloned())
    }

    async fn roles_for_user(&self, user_id: i64) -> Result<Vec<Role>, DatabaseError> {
        let t = self.lock();
        Ok(t.users_roles
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, rid)| t.roles.iter().find(|r| r.id == *rid).cloned())
            .collect())
    }
}

#[async_trait]
impl StorageHealth for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

impl MemoryStore {
    /// Storage bundle where every repository is this store.
    pub fn storage(self: &Arc<Self>) -> Storage {
        Storage {
            actors: self.clone(),
            films: self.clone(),
            users: self.clone(),
            health: self.clone(),
        }
    }
}

/// Application state over a fresh in-memory store with default roles.
pub fn test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_default_roles());
    let config = AppConfig::for_tests();
    let services = Services::new(&store.storage(), &config);
    (AppState::new(services, store.storage().health, config), store)
}
