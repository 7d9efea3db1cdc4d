use chrono::NaiveDate;
use sqlx::FromRow;
use std::collections::HashMap;

use super::models::{Actor, ActorFilm, Film};

/// One (actor, film) pair as returned by the actor/film join.
#[derive(Debug, Clone, FromRow)]
pub struct ActorFilmRow {
    pub actor_id: i64,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub sex: String,
    pub actor_information: Option<String>,
    pub film_id: i64,
    pub title: String,
    pub year: i32,
    pub film_information: Option<String>,
    pub rating: Option<f64>,
}

impl ActorFilmRow {
    fn split(self) -> (Actor, Film) {
        let actor = Actor {
            id: self.actor_id,
            name: self.name,
            surname: self.surname,
            patronymic: self.patronymic,
            birthday: self.birthday,
            sex: self.sex,
            information: self.actor_information,
        };
        let film = Film {
            id: self.film_id,
            title: self.title,
            year: self.year,
            information: self.film_information,
            rating: self.rating,
        };
        (actor, film)
    }
}

/// Folds join rows into one entry per actor.
///
/// Actors come out in first-seen order and each film list keeps row arrival
/// order.
#[derive(Debug, Default)]
pub struct ActorFilmAggregator {
    index: HashMap<i64, usize>,
    entries: Vec<ActorFilm>,
}

impl ActorFilmAggregator {
    pub fn push(&mut self, row: ActorFilmRow) {
        let (actor, film) = row.split();
        match self.index.get(&actor.id) {
            Some(&pos) => self.entries[pos].films.push(film),
            None => {
                self.index.insert(actor.id, self.entries.len());
                self.entries.push(ActorFilm { actor, films: vec![film] });
            }
        }
    }

    pub fn finish(self) -> Vec<ActorFilm> {
        self.entries
    }
}

impl FromIterator<ActorFilmRow> for ActorFilmAggregator {
    fn from_iter<I: IntoIterator<Item = ActorFilmRow>>(iter: I) -> Self {
        let mut agg = Self::default();
        for row in iter {
            agg.push(row);
        }
        agg
    }
}
