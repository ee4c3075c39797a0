pub mod audit;
pub mod entity;
pub mod errors;
pub mod query;
pub mod school;
pub mod tenant;
