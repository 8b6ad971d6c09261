pub mod config;
pub mod numeric;
