pub mod chemistry;
pub mod data;
