pub mod query;
pub mod seed;
