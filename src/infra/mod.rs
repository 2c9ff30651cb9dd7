pub mod cache;
pub mod nasa;
