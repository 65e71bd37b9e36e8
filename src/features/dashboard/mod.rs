//! Role-dependent grade views.
//!
//! | Method | Endpoint | Guard | Description |
//! |--------|----------|-------|-------------|
//! | GET | `/accounts/dashboard` | Login | All grades for DOSEN, own grades otherwise |
//! | GET | `/accounts/dosen` | Dosen | All grades |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::DashboardService;
