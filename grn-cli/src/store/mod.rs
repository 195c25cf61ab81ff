//! Durable store for the vendor GRN warehouse table

pub mod repository;
