//! Grade records.
//!
//! A nilai row belongs to a user (the student) and is deleted with it. Only
//! users with a MAHASISWA profile are offered as candidates, but a grade for
//! any existing user is stored as given.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/nilai` | Staff | List (`search`, `mata_kuliah` filter) |
//! | POST | `/api/admin/nilai` | Staff | Record a grade |
//! | GET | `/api/admin/nilai/candidates` | Staff | Users with a MAHASISWA profile |
//! | GET | `/api/admin/nilai/{id}` | Staff | Get a grade |
//! | PUT | `/api/admin/nilai/{id}` | Staff | Replace a grade |
//! | DELETE | `/api/admin/nilai/{id}` | Staff | Delete a grade |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{NilaiRepository, PgNilaiRepository};
pub use services::NilaiService;
