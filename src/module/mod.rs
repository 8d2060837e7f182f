//! # Module Lifecycle
//!
//! Ponto de entrada chamado pelo shim de módulo da plataforma.
//!
//! ## Ciclo de vida
//!
//! | Fase      | O que acontece                                          |
//! |-----------|---------------------------------------------------------|
//! | `init`    | self-test → bind → snapshot → publica `/proc/opptimizer` |
//! | `exit`    | remove a entrada → restaura padrões → `Unloaded`        |
//!
//! Qualquer falha em `init` deixa nada publicado e nada alterado no
//! hardware. `exit` nunca falha: restauração incompleta só é logada.
//!
//! ## Componentes
//!
//! | Módulo   | Responsabilidade                                   |
//! |----------|----------------------------------------------------|
//! | `loader` | Contrato do helper que carrega o módulo            |

pub mod loader;

pub use loader::{ensure_activated, Activation, ActivationHost, LoaderError, ModuleDigests};

use alloc::sync::Arc;

use crate::dvfs::config::{DvfsConfig, PROC_ENTRY_MODE, PROC_ENTRY_NAME, VERSION};
use crate::dvfs::DvfsController;
use crate::fs::procfs::{ControlSurface, ProcHost};
use crate::hal::{CapabilityProvider, PlatformOps};
use crate::sys::DvfsError;

/// Estado do módulo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// Resolvendo rotinas e capturando o snapshot (só durante `init`)
    Loading,
    /// Entrada publicada, aceitando escritas
    Active,
    /// Entrada removida, restaurando padrões
    Unloading,
    /// Nada publicado, hardware devolvido
    Unloaded,
}

/// Instância ativa do controlador.
pub struct OppModule {
    host: Arc<dyn ProcHost + Send + Sync>,
    surface: Option<Arc<ControlSurface>>,
    state: ModuleState,
}

impl OppModule {
    /// Ativa o controlador e publica a superfície de controle.
    pub fn init<P>(provider: &P, host: Arc<dyn ProcHost + Send + Sync>, config: DvfsConfig) -> Result<Self, DvfsError>
    where
        P: CapabilityProvider + ?Sized,
    {
        crate::kinfo!("(Module) opptimizer v"; VERSION);

        #[cfg(feature = "self_test")]
        {
            if !crate::dvfs::test::run_dvfs_tests() {
                return Err(DvfsError::SelfTest);
            }
        }

        let ops = PlatformOps::bind(provider)?;
        let controller = Arc::new(DvfsController::activate(ops, config)?);
        let surface = Arc::new(ControlSurface::new(controller));

        host.publish(PROC_ENTRY_NAME, PROC_ENTRY_MODE, surface.clone())
            .map_err(|errno| {
                crate::kerror!("(Module) Falha ao criar /proc/"; PROC_ENTRY_NAME);
                DvfsError::Publish(errno)
            })?;

        crate::kok!("(Module) Controlador ativo");

        Ok(Self {
            host,
            surface: Some(surface),
            state: ModuleState::Active,
        })
    }

    pub fn state(&self) -> ModuleState {
        self.state
    }

    /// Superfície publicada (ausente depois de `exit`).
    pub fn surface(&self) -> Option<&Arc<ControlSurface>> {
        self.surface.as_ref()
    }

    pub fn controller(&self) -> Option<&Arc<DvfsController>> {
        self.surface.as_ref().map(|surface| surface.controller())
    }

    /// Remove a entrada e devolve o hardware aos padrões. Idempotente.
    pub fn exit(&mut self) {
        let Some(surface) = self.surface.take() else {
            return;
        };
        self.state = ModuleState::Unloading;

        self.host.unpublish(PROC_ENTRY_NAME);

        match surface.controller().restore_defaults() {
            Ok(report) => {
                crate::kinfo!("(Module) Padrões restaurados, fases: ", report.phases.bits());
            }
            Err(err) => {
                crate::kwarn!("(Module) Restauração incompleta, hardware fica no último valor: "; err.errno().name());
            }
        }

        self.state = ModuleState::Unloaded;
        crate::kinfo!("(Module) Até logo");
    }
}

impl Drop for OppModule {
    fn drop(&mut self) {
        self.exit();
    }
}
