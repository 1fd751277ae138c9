// src/core/mod.rs
pub mod codec;
pub mod generator;
pub mod graph;
pub mod sequence;
pub mod types;
