//! Sistemas de arquivos
//!
//! Submódulos:
//! - `procfs`: pseudo-entrada de controle (/proc/opptimizer).

pub mod procfs;
