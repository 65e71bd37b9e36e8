mod nilai_handler;

pub use nilai_handler::*;
