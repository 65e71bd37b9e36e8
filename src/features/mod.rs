pub mod auth;
pub mod dashboard;
pub mod mahasiswa;
pub mod nilai;
pub mod profiles;
pub mod users;
