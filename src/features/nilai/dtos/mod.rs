mod nilai_dto;

pub use nilai_dto::{CandidateDto, NilaiDto, NilaiQueryParams, NilaiResponseDto};
