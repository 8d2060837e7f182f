//! Opptimizer - controlador de override DVFS.
//!
//! Ponto central de exportação dos módulos. Eleva o teto de frequência do
//! domínio MPU e ajusta a voltagem correspondente, mantendo os padrões de
//! fábrica para restaurar na saída.

#![cfg_attr(not(test), no_std)]

// Habilitar alocação dinâmica (Arc/Vec/String)
extern crate alloc;

// --- Infraestrutura ---
pub mod core; // Logging
pub mod drivers; // Sink do klog
pub mod klib; // Framework de self-test
pub mod sys; // Errno e tipos primitivos

// --- Plataforma ---
pub mod hal; // Contrato do provedor, layouts, registros vivos

// --- Controlador ---
pub mod dvfs; // Snapshot, validação, sequenciamento
pub mod fs; // /proc/opptimizer
pub mod module; // init/exit e contrato do loader

pub use dvfs::{DvfsConfig, DvfsController};
pub use module::{ModuleState, OppModule};
pub use sys::{DvfsError, Errno};
