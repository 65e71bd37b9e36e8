mod mahasiswa_dto;

pub use mahasiswa_dto::{MahasiswaDto, MahasiswaQueryParams, MahasiswaResponseDto};
