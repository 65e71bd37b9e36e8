mod nilai_repository;

pub use nilai_repository::{NilaiFilter, NilaiRepository, PgNilaiRepository};
