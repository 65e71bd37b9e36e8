//! Role-holding profiles.
//!
//! Each user has at most one profile carrying its role (MAHASISWA or DOSEN).
//! A user without a profile is treated as MAHASISWA everywhere a role is
//! needed.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/profiles` | Staff | List (`role` filter, `search` on username/email) |
//! | POST | `/api/admin/profiles` | Staff | Attach a profile to a user |
//! | GET | `/api/admin/profiles/{user_id}` | Staff | Get a profile |
//! | PUT | `/api/admin/profiles/{user_id}` | Staff | Change role |
//! | DELETE | `/api/admin/profiles/{user_id}` | Staff | Remove the profile |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgProfileRepository, ProfileRepository};
pub use services::ProfileService;
