//! Hardware Abstraction Layer (HAL)
//!
//! Tudo que toca registros da plataforma mora aqui: layouts brutos, o
//! contrato do provedor de rotinas, a tabela de rotinas resolvidas e os
//! wrappers voláteis sobre os registros vivos.

pub mod layout;
pub mod live;
pub mod platform;
pub mod traits;

pub use live::{LiveOpp, LivePolicy, LiveVoltData};
pub use platform::PlatformOps;
pub use traits::*;
