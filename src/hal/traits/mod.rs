//! Traits do HAL
//!
//! Define a interface abstrata com a plataforma.

pub mod provider;

pub use provider::*;
