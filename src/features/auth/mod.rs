//! Login sessions and access guards.
//!
//! Sessions are opaque random tokens handed out at login. The client keeps
//! the token (cookie or bearer header), the server keeps only its SHA-256
//! digest with an expiry.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/accounts/login` | Public | Login form (redirects when logged in) |
//! | POST | `/accounts/login` | Public | Submit credentials (form-encoded) |
//! | GET/POST | `/accounts/logout` | Public | End the session |

pub mod dtos;
pub mod flash;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgSessionStore, SessionStore};
pub use routes::routes;
pub use services::AuthService;
