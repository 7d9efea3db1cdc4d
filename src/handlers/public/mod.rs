// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition: /sign-up registers a user, /sign-in exchanges
// credentials for a bearer token.

pub mod auth;

pub use auth::{sign_in, sign_up};
