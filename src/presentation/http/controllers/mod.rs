// src/presentation/http/controllers/mod.rs
pub mod audit;
pub mod payments;
pub mod records;
