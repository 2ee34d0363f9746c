pub mod explorer;
pub mod persistence;
