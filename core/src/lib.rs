//! Deterministic synthetic retail data: master entities, daily
//! transaction batches with controlled noise, summaries and messy
//! online-channel feeds, all derived from one master seed.

pub mod catalog;
pub mod columnar;
pub mod config;
pub mod customers;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod online;
pub mod products;
pub mod rng;
pub mod stores;
pub mod summary;
pub mod transactions;
pub mod types;
