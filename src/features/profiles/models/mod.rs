mod profile;

pub use profile::{Profile, ProfileDetail, Role};
