mod mahasiswa_repository;

pub use mahasiswa_repository::{MahasiswaRepository, PgMahasiswaRepository};
