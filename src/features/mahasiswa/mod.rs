//! Student registry.
//!
//! Standalone student records, managed only through the admin API. `nim` is
//! unique when present; records without one never collide.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/mahasiswa` | Staff | List (`search` on nim/names/jurusan) |
//! | POST | `/api/admin/mahasiswa` | Staff | Create a record |
//! | GET | `/api/admin/mahasiswa/{id}` | Staff | Get a record |
//! | PUT | `/api/admin/mahasiswa/{id}` | Staff | Replace a record |
//! | DELETE | `/api/admin/mahasiswa/{id}` | Staff | Delete a record |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{MahasiswaRepository, PgMahasiswaRepository};
pub use services::MahasiswaService;
