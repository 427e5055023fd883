pub mod check_api;
pub mod portal;
