//! ProcFS - pseudo-entrada de controle
//!
//! O kernel hospedeiro é dono do `/proc`; o módulo só registra uma entrada
//! e fornece as operações de leitura/escrita.

pub mod control;
pub mod uaccess;

use alloc::sync::Arc;

use crate::sys::Errno;

pub use control::ControlSurface;
pub use uaccess::UserSlice;

/// Operações de arquivo de uma entrada.
pub trait ProcFileOps: Send + Sync {
    /// Copia o conteúdo a partir de `offset`. Retorna bytes copiados
    /// (0 no fim do arquivo).
    fn read(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Errno>;

    /// Consome uma escrita. Retorna bytes aceitos.
    fn write(&self, src: &dyn UserSlice) -> Result<usize, Errno>;
}

/// Registro de entradas do kernel hospedeiro.
pub trait ProcHost {
    /// Cria `/proc/<name>` com as permissões `mode`.
    fn publish(&self, name: &'static str, mode: u16, ops: Arc<dyn ProcFileOps>) -> Result<(), Errno>;

    /// Remove a entrada. Quando retorna, nenhuma operação nova chega a `ops`.
    fn unpublish(&self, name: &'static str);

    /// A entrada já existe (sentinela de ativação).
    fn exists(&self, name: &str) -> bool;
}
