mod mahasiswa;

pub use mahasiswa::{Mahasiswa, NewMahasiswa};
