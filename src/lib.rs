//! content-pulse: content-marketing analytics over a synthetic dataset, with a scripted assistant.
//! Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
