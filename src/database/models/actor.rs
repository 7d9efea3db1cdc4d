use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::film::Film;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Actor {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[serde(default, with = "birthday_format")]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub information: Option<String>,
}

impl Actor {
    pub fn is_valid(&self) -> bool {
        self.id >= 0
            && !self.name.is_empty()
            && !self.surname.is_empty()
            && !self.sex.is_empty()
            && self.birthday.is_some()
    }
}

/// One actor with every film it is associated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorFilm {
    #[serde(rename = "Actor")]
    pub actor: Actor,
    #[serde(rename = "Films")]
    pub films: Vec<Film>,
}

/// Birthdays go out as `YYYY-MM-DD`. Input also accepts a full RFC 3339
/// timestamp, from which only the date is kept.
mod birthday_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }

        if let Ok(date) = NaiveDate::parse_from_str(&raw, FORMAT) {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| Some(ts.date_naive()))
            .map_err(|_| de::Error::custom(format!("invalid birthday '{}'", raw)))
    }
}
