pub mod convert;
pub mod models;
