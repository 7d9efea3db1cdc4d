//! SQL assembly for the dynamic film listings and the actor/film join.
//!
//! Only the ORDER BY column and direction are interpolated into the query
//! text, and both come from closed enums. User-supplied text is always bound
//! as a parameter.

const FILM_COLUMNS: &str = "id, title, year, information, rating";

const TITLE_MATCH: &str = "LOWER(title) LIKE '%' || LOWER($1) || '%' ESCAPE '\\'";

const ACTOR_FILMS_SELECT: &str = r#"
SELECT
    a.id AS actor_id,
    a.name,
    a.surname,
    a.patronymic,
    a.birthday,
    a.sex,
    a.information AS actor_information,
    f.id AS film_id,
    f.title,
    f.year,
    f.information AS film_information,
    f.rating
FROM actors a
    JOIN films_actors fa ON a.id = fa.actor_id
    JOIN films f ON fa.film_id = f.id"#;

const ACTOR_NAME_MATCH: &str = r#"
WHERE LOWER(a.name) LIKE '%' || $1 || '%' ESCAPE '\'
   OR LOWER(a.surname) LIKE '%' || $1 || '%' ESCAPE '\'
   OR LOWER(a.patronymic) LIKE '%' || $1 || '%' ESCAPE '\'"#;

/// Makes `%`, `_` and `\` in user text match literally inside a LIKE pattern.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Sortable film columns. Anything outside the allow-list sorts by rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmOrder {
    Title,
    Year,
    Rating,
}

impl FilmOrder {
    pub fn normalize(key: &str) -> Self {
        match key {
            "title" => FilmOrder::Title,
            "year" => FilmOrder::Year,
            _ => FilmOrder::Rating,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            FilmOrder::Title => "title",
            FilmOrder::Year => "year",
            FilmOrder::Rating => "rating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_desc(desc: bool) -> Self {
        if desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A film listing: optional case-insensitive title match, optional ordering.
#[derive(Debug, Clone, Default)]
pub struct FilmQuery {
    title: Option<String>,
    order: Option<(FilmOrder, SortDirection)>,
}

/// Query text plus the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<String>,
}

impl FilmQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_like(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn order_by(mut self, order: FilmOrder, direction: SortDirection) -> Self {
        self.order = Some((order, direction));
        self
    }

    pub fn to_sql(&self) -> SqlResult {
        let mut query = format!("SELECT {} FROM films", FILM_COLUMNS);
        let mut params = Vec::new();

        if let Some(title) = &self.title {
            query.push_str(" WHERE ");
            query.push_str(TITLE_MATCH);
            params.push(escape_like(title));
        }

        if let Some((order, direction)) = self.order {
            query.push_str(&format!(" ORDER BY {} {}", order.column(), direction.keyword()));
        }

        SqlResult { query, params }
    }
}

/// Join of every actor with every film it appears in, optionally restricted to
/// actors whose name, surname or patronymic contains `$1` (already lowercased
/// and passed through [`escape_like`]).
pub fn actor_films_sql(with_name_match: bool) -> String {
    if with_name_match {
        format!("{}{}", ACTOR_FILMS_SELECT, ACTOR_NAME_MATCH)
    } else {
        ACTOR_FILMS_SELECT.to_string()
    }
}
