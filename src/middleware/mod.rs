pub mod auth;
pub mod deadline;
pub mod logging;

pub use auth::{identity, AdminUser, AuthUser};
pub use deadline::request_deadline;
pub use logging::log_requests;
