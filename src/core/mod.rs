//! Core Module
//!
//! Infraestrutura comum do módulo (logging com filtro em tempo de
//! compilação).

pub mod logging;
