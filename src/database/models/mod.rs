pub mod actor;
pub mod film;
pub mod user;

pub use actor::{Actor, ActorFilm};
pub use film::Film;
pub use user::{Role, User, ADMIN_ROLE, DEFAULT_ROLE};
