mod nilai;

pub use nilai::{format_score, NewNilai, Nilai, NilaiRecord};
