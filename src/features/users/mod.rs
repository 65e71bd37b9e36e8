//! User identities.
//!
//! Users are the accounts that can log in. Every other record in the accounts
//! app hangs off a user: the role-holding profile, grade rows and sessions are
//! all deleted together with their user.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/users` | Staff | List users with their role |
//! | POST | `/api/admin/users` | Staff | Create a user (optionally with profile) |
//! | GET | `/api/admin/users/{id}` | Staff | Get a user |
//! | DELETE | `/api/admin/users/{id}` | Staff | Delete a user and everything it owns |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgUserRepository, UserRepository};
pub use services::UserService;
