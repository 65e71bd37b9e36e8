pub mod constants;
pub mod cookies;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
