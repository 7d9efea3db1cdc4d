use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Films released before this year are rejected.
pub const MIN_FILM_YEAR: i32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Film {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub information: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Film {
    pub fn is_valid(&self) -> bool {
        self.id >= 0 && self.year > MIN_FILM_YEAR && !self.title.is_empty()
    }
}
