//! # Activation Loader
//!
//! Sequência que um helper privilegiado executa antes de `OppModule::init`
//! rodar. O helper em si vive fora deste crate; aqui ficam o contrato com o
//! sistema (`ActivationHost`) e a ordem dos passos.
//!
//! ## Passos
//! 1. Se `/proc/opptimizer` já existe, nada a fazer.
//! 2. Anexa o digest SHA-1 de cada módulo à whitelist do kernel.
//! 3. Descarta todas as credenciais exceto `CAP::sys_module`.
//! 4. Executa o modprobe (ambiente limpo, saída para `/dev/null`) e
//!    espera o status de saída, repetindo a espera só em `EINTR`.

use crate::dvfs::config::PROC_ENTRY_NAME;
use crate::sys::Errno;

/// Tamanho de um digest SHA-1.
pub const DIGEST_LEN: usize = 20;

pub type Digest = [u8; DIGEST_LEN];

/// Sentinela: existe enquanto o controlador estiver ativo.
pub const SENTINEL_PATH: &str = "/proc/opptimizer";

/// Whitelist de módulos aceitos pelo validador do kernel.
pub const WHITELIST_PATH: &str = "/sys/kernel/security/validator/modlist";

/// Helper de carga de módulos.
pub const MODULE_LOADER_PATH: &str = "/sbin/modprobe";

/// Única credencial mantida antes de executar o helper.
pub const LOAD_CAPABILITY: &str = "CAP::sys_module";

/// Digests na ordem em que entram na whitelist: a dependência primeiro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleDigests {
    /// Módulo de busca de símbolos (provedor das rotinas).
    pub symbol_search: Digest,
    /// O próprio controlador.
    pub controller: Digest,
}

/// Arquivo da whitelist aberto para escrita.
pub trait WhitelistSink {
    /// Uma única chamada `write`. Pode escrever menos que `bytes.len()`.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, Errno>;
}

/// Chamadas de sistema usadas pela ativação.
pub trait ActivationHost {
    type Sink: WhitelistSink;

    /// `Ok(true)` se o caminho existe, `Ok(false)` em `ENOENT`.
    fn path_exists(&self, path: &str) -> Result<bool, Errno>;

    fn open_whitelist(&self, path: &str) -> Result<Self::Sink, Errno>;

    /// Reduz as credenciais do processo a `capability`.
    fn confine(&self, capability: &str) -> Result<(), Errno>;

    /// Inicia `program` com stdout/stderr em `/dev/null`. Retorna o pid.
    fn spawn(&self, program: &str, args: &[&str]) -> Result<u32, Errno>;

    /// Espera o processo terminar e devolve o status de saída.
    fn wait(&self, pid: u32) -> Result<i32, Errno>;
}

/// Falha da ativação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderError {
    /// Chamada de sistema falhou.
    Sys(Errno),
    /// O modprobe terminou com status diferente de zero.
    LoaderExit(i32),
}

impl From<Errno> for LoaderError {
    fn from(errno: Errno) -> Self {
        LoaderError::Sys(errno)
    }
}

/// O que `ensure_activated` precisou fazer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    AlreadyActive,
    Loaded,
}

/// Garante que o controlador esteja carregado.
pub fn ensure_activated<H: ActivationHost>(host: &H, digests: &ModuleDigests) -> Result<Activation, LoaderError> {
    if host.path_exists(SENTINEL_PATH)? {
        crate::kdebug!("(Loader) Controlador já ativo");
        return Ok(Activation::AlreadyActive);
    }

    whitelist(host, &digests.symbol_search)?;
    whitelist(host, &digests.controller)?;

    host.confine(LOAD_CAPABILITY).inspect_err(|errno| {
        crate::kerror!("(Loader) Falha ao reduzir credenciais: "; errno.name());
    })?;

    let pid = host.spawn(MODULE_LOADER_PATH, &[MODULE_LOADER_PATH, PROC_ENTRY_NAME])?;
    let status = loop {
        match host.wait(pid) {
            Err(Errno::EINTR) => continue,
            other => break other?,
        }
    };

    if status != 0 {
        crate::kerror!("(Loader) modprobe retornou erro ", status.unsigned_abs());
        return Err(LoaderError::LoaderExit(status));
    }

    crate::kinfo!("(Loader) Controlador carregado");
    Ok(Activation::Loaded)
}

/// Anexa um digest. Escrita curta conta como interrompida.
fn whitelist<H: ActivationHost>(host: &H, digest: &Digest) -> Result<(), Errno> {
    let mut sink = loop {
        match host.open_whitelist(WHITELIST_PATH) {
            Err(Errno::EINTR) => continue,
            other => break other?,
        }
    };

    match sink.write(digest)? {
        DIGEST_LEN => Ok(()),
        written => {
            crate::kerror!("(Loader) Escrita curta na whitelist: ", written, " bytes");
            Err(Errno::EINTR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeSystem {
        active: bool,
        stat_error: Option<Errno>,
        open_interrupts: RefCell<u32>,
        short_write: bool,
        confine_error: Option<Errno>,
        wait_interrupts: RefCell<u32>,
        exit_status: i32,
        calls: RefCell<Vec<String>>,
        whitelist: RefCell<Vec<Digest>>,
    }

    struct FakeSink<'a> {
        system: &'a FakeSystem,
    }

    impl WhitelistSink for FakeSink<'_> {
        fn write(&mut self, bytes: &[u8]) -> Result<usize, Errno> {
            if self.system.short_write {
                return Ok(bytes.len() - 1);
            }
            let mut digest = [0u8; DIGEST_LEN];
            digest.copy_from_slice(bytes);
            self.system.whitelist.borrow_mut().push(digest);
            Ok(bytes.len())
        }
    }

    impl<'a> ActivationHost for &'a FakeSystem {
        type Sink = FakeSink<'a>;

        fn path_exists(&self, path: &str) -> Result<bool, Errno> {
            self.calls.borrow_mut().push(["stat ", path].concat());
            match self.stat_error {
                Some(errno) => Err(errno),
                None => Ok(self.active),
            }
        }

        fn open_whitelist(&self, path: &str) -> Result<Self::Sink, Errno> {
            self.calls.borrow_mut().push(["open ", path].concat());
            let mut left = self.open_interrupts.borrow_mut();
            if *left > 0 {
                *left -= 1;
                return Err(Errno::EINTR);
            }
            Ok(FakeSink { system: *self })
        }

        fn confine(&self, capability: &str) -> Result<(), Errno> {
            self.calls.borrow_mut().push(["confine ", capability].concat());
            self.confine_error.map_or(Ok(()), Err)
        }

        fn spawn(&self, program: &str, args: &[&str]) -> Result<u32, Errno> {
            self.calls.borrow_mut().push(format!("spawn {} {}", program, args[1..].join(" ")));
            Ok(42)
        }

        fn wait(&self, pid: u32) -> Result<i32, Errno> {
            self.calls.borrow_mut().push(format!("wait {}", pid));
            let mut left = self.wait_interrupts.borrow_mut();
            if *left > 0 {
                *left -= 1;
                return Err(Errno::EINTR);
            }
            Ok(self.exit_status)
        }
    }

    const DIGESTS: ModuleDigests = ModuleDigests {
        symbol_search: [0x11; DIGEST_LEN],
        controller: [0x22; DIGEST_LEN],
    };

    #[test]
    fn already_active_skips_everything() {
        let system = FakeSystem {
            active: true,
            ..Default::default()
        };
        assert_eq!(ensure_activated(&&system, &DIGESTS), Ok(Activation::AlreadyActive));
        assert_eq!(*system.calls.borrow(), ["stat /proc/opptimizer"]);
        assert!(system.whitelist.borrow().is_empty());
    }

    #[test]
    fn stat_failure_other_than_missing_aborts() {
        let system = FakeSystem {
            stat_error: Some(Errno::EIO),
            ..Default::default()
        };
        assert_eq!(ensure_activated(&&system, &DIGESTS), Err(LoaderError::Sys(Errno::EIO)));
        assert_eq!(system.calls.borrow().len(), 1);
    }

    #[test]
    fn full_sequence_in_order() {
        let system = FakeSystem::default();
        assert_eq!(ensure_activated(&&system, &DIGESTS), Ok(Activation::Loaded));

        assert_eq!(
            *system.calls.borrow(),
            [
                "stat /proc/opptimizer",
                "open /sys/kernel/security/validator/modlist",
                "open /sys/kernel/security/validator/modlist",
                "confine CAP::sys_module",
                "spawn /sbin/modprobe opptimizer",
                "wait 42",
            ]
        );
        assert_eq!(*system.whitelist.borrow(), [DIGESTS.symbol_search, DIGESTS.controller]);
    }

    #[test]
    fn short_write_is_interrupted_failure() {
        let system = FakeSystem {
            short_write: true,
            ..Default::default()
        };
        assert_eq!(ensure_activated(&&system, &DIGESTS), Err(LoaderError::Sys(Errno::EINTR)));
        assert!(!system.calls.borrow().iter().any(|c| c.starts_with("spawn")));
    }

    #[test]
    fn interrupted_open_and_wait_are_retried() {
        let system = FakeSystem {
            open_interrupts: RefCell::new(2),
            wait_interrupts: RefCell::new(3),
            ..Default::default()
        };
        assert_eq!(ensure_activated(&&system, &DIGESTS), Ok(Activation::Loaded));
        let waits = system.calls.borrow().iter().filter(|c| c.starts_with("wait")).count();
        assert_eq!(waits, 4);
    }

    #[test]
    fn confine_failure_stops_before_spawn() {
        let system = FakeSystem {
            confine_error: Some(Errno::EPERM),
            ..Default::default()
        };
        assert_eq!(ensure_activated(&&system, &DIGESTS), Err(LoaderError::Sys(Errno::EPERM)));
        assert!(!system.calls.borrow().iter().any(|c| c.starts_with("spawn")));
    }

    #[test]
    fn nonzero_exit_is_reported() {
        let system = FakeSystem {
            exit_status: 1,
            ..Default::default()
        };
        assert_eq!(ensure_activated(&&system, &DIGESTS), Err(LoaderError::LoaderExit(1)));
    }
}
