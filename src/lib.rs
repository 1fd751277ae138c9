// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod persistence;
pub use crate::core::generator::{Passphrase, PassphraseGenerator};
pub use crate::core::graph::WordGraph;
pub use crate::error::{PhraseError, Result};
