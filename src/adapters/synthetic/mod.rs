//! Synthetic data adapter. Builds the seeded, deterministic [`Dataset`](crate::domain::Dataset).

pub mod generator;

pub use generator::SyntheticGenerator;
