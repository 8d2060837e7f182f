//! Testes de host do controlador DVFS
//!
//! Rodam contra uma placa falsa (`board`): provedor de rotinas, registros
//! vivos em memória e um `/proc` em memória.
//!
//! # Como Executar os Testes
//!
//! ```bash
//! # Todos os testes do controlador
//! cargo test --lib dvfs::tests
//!
//! # Um grupo específico
//! cargo test --lib dvfs::tests::scenarios
//! ```
//!
//! # Estrutura dos Testes
//!
//! - `board.rs` - Placa falsa e helpers
//! - `scenarios.rs` - Escritas, clamp, ordem das fases, restauração
//! - `lifecycle.rs` - init/exit, falhas de bind e lookup
//! - `concurrency.rs` - Leitura sem lock e serialização das escritas
//! - `logging.rs` - Mensagens emitidas pelo klog

#![cfg(test)]

mod lifecycle;

use std::sync::Arc;

use crate::dvfs::config::{DvfsConfig, PROC_ENTRY_NAME};
use crate::dvfs::DvfsController;
use crate::module::OppModule;
use crate::sys::Errno;

use board::{Board, FakeProcFs, FakeProvider};

/// Placa + /proc + módulo ativo.
struct Rig {
    board: Arc<Board>,
    procfs: Arc<FakeProcFs>,
    module: OppModule,
}

impl Rig {
    fn new() -> Self {
        let board = Board::new();
        let procfs = FakeProcFs::new();
        let module = OppModule::init(&FakeProvider::new(&board), procfs.clone(), DvfsConfig::default())
            .expect("activation");
        board.clear_events();
        board.reset_in_flight();
        Self { board, procfs, module }
    }

    fn echo(&self, input: &str) -> Result<usize, Errno> {
        self.procfs.echo(PROC_ENTRY_NAME, input)
    }

    fn cat(&self) -> String {
        self.procfs.cat(PROC_ENTRY_NAME).expect("read")
    }

    fn controller(&self) -> Arc<DvfsController> {
        self.module.controller().expect("active").clone()
    }
}
