mod mahasiswa_handler;

pub use mahasiswa_handler::*;
