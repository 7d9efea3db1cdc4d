// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Reads are open to any authenticated user. Mutations take an `AdminUser`
// extractor, which rejects callers without the admin role.

pub mod actor;
pub mod film;
