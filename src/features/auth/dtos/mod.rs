mod auth_dto;

pub use auth_dto::{LoginPageDto, LoginQuery, LoginRequestDto};
