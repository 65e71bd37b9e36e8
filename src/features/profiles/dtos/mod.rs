mod profile_dto;

pub use profile_dto::*;
