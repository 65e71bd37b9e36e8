mod nilai_service;

pub use nilai_service::NilaiService;
