mod mahasiswa_service;

pub use mahasiswa_service::MahasiswaService;
