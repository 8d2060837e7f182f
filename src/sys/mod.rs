//! System Definitions.
//!
//! Contém os códigos de erro e os tipos primitivos compartilhados entre o
//! controlador e o kernel hospedeiro.

pub mod error;
pub mod types;

pub use error::{DvfsError, Errno, LookupTarget};
pub use types::{FrequencyHz, FrequencyKHz, MicroVolts, PAGE_SIZE};
