pub mod budget;
pub mod data;
pub mod sheets;
