//! # DVFS Override Controller
//!
//! Núcleo do módulo: snapshot de fábrica, validação, sequenciamento das
//! fases de voltagem/frequência e recalibração.
//!
//! | Arquivo        | Papel                                         |
//! |----------------|-----------------------------------------------|
//! | `config`       | Limites de segurança e identificadores        |
//! | `types`        | Valores copiados, requisição, relatório       |
//! | `validator`    | Janela de frequência e clamp de voltagem      |
//! | `snapshot`     | Padrões capturados na ativação                |
//! | `sequencer`    | `DvfsController` e o lock global              |
//! | `recalib`      | Reset + recalibração do SmartReflex           |

pub mod config;
pub mod recalib;
pub mod sequencer;
pub mod snapshot;
pub mod types;
pub mod validator;

#[cfg(feature = "self_test")]
pub mod test;

#[cfg(test)]
mod tests;

pub use config::{DomainIds, DvfsConfig, SafetyLimits};
pub use sequencer::DvfsController;
pub use snapshot::DefaultSnapshot;
pub use types::{
    Direction, OperatingPoint, PhaseFlags, PolicyLimits, TransitionOutcome, TransitionReport,
    TransitionRequest, VoltageProfile,
};
