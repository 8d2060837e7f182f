//! # Error Codes
//!
//! Códigos de erro devolvidos ao kernel hospedeiro e a taxonomia interna
//! do controlador DVFS.
//!
//! ## Propagação
//! - Só falhas de ativação e de entrada de requisição viram erro explícito
//!   (`Resolution`, `Lookup`, `TooLarge`, `CopyFault`).
//! - Frequência fora da janela, voltagem fora da faixa e texto malformado
//!   NÃO são erros: a escrita é aceita e o tamanho completo é devolvido.
//! - Retornos das rotinas de plataforma depois da validação não são
//!   propagados (limitação conhecida, ver `dvfs::sequencer`).

use core::fmt;

/// Errno no padrão POSIX/Linux.
///
/// Valores negativos são usados no retorno para o VFS (isize).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    EPERM = 1,   // Operation not permitted
    ENOENT = 2,  // No such file or directory
    EINTR = 4,   // Interrupted system call
    EIO = 5,     // I/O error
    ENOMEM = 12, // Out of memory
    EFAULT = 14, // Bad address
    EBUSY = 16,  // Device or resource busy
    ENODEV = 19, // No such device
    EINVAL = 22, // Invalid argument
    ENOSPC = 28, // No space left on device
}

impl Errno {
    pub fn as_usize(self) -> usize {
        self as usize
    }

    pub fn as_isize(self) -> isize {
        -(self as i32) as isize
    }

    /// Nome simbólico (para logs sem core::fmt).
    pub const fn name(self) -> &'static str {
        match self {
            Errno::EPERM => "EPERM",
            Errno::ENOENT => "ENOENT",
            Errno::EINTR => "EINTR",
            Errno::EIO => "EIO",
            Errno::ENOMEM => "ENOMEM",
            Errno::EFAULT => "EFAULT",
            Errno::EBUSY => "EBUSY",
            Errno::ENODEV => "ENODEV",
            Errno::EINVAL => "EINVAL",
            Errno::ENOSPC => "ENOSPC",
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Qual registro vivo da plataforma não pôde ser encontrado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget {
    /// Busca floor pelo OPP mais alto do domínio retornou nulo.
    OperatingPoint,
    /// Nenhum `omap_volt_data` para a voltagem do OPP atual.
    VoltageProfile,
    /// Tabela de frequências ou policy do cpufreq ausente.
    PolicyLimits,
}

impl LookupTarget {
    pub const fn name(self) -> &'static str {
        match self {
            LookupTarget::OperatingPoint => "operating point",
            LookupTarget::VoltageProfile => "voltage profile",
            LookupTarget::PolicyLimits => "policy limits",
        }
    }
}

/// Erros do controlador DVFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DvfsError {
    /// Rotina obrigatória não resolvida pelo provedor (só na ativação).
    Resolution(&'static str),
    /// Registro vivo ausente; aborta a requisição sem mutação parcial.
    Lookup(LookupTarget),
    /// Entrada vazia ou maior que uma página menos o terminador.
    TooLarge,
    /// Não foi possível copiar a entrada do chamador.
    CopyFault,
    /// O host recusou publicar a pseudo-entrada.
    Publish(Errno),
    /// Self-test de ativação falhou.
    SelfTest,
}

impl DvfsError {
    /// Código devolvido ao chamador.
    pub fn errno(self) -> Errno {
        match self {
            DvfsError::Resolution(_) | DvfsError::Lookup(_) => Errno::ENODEV,
            DvfsError::TooLarge => Errno::ENOSPC,
            DvfsError::CopyFault => Errno::EFAULT,
            DvfsError::Publish(errno) => errno,
            DvfsError::SelfTest => Errno::EINVAL,
        }
    }
}

impl From<DvfsError> for Errno {
    fn from(err: DvfsError) -> Self {
        err.errno()
    }
}

impl fmt::Display for DvfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DvfsError::Resolution(name) => write!(f, "could not resolve platform routine {}", name),
            DvfsError::Lookup(target) => write!(f, "no live {} for the managed domain", target.name()),
            DvfsError::TooLarge => f.write_str("request is empty or exceeds one page"),
            DvfsError::CopyFault => f.write_str("request could not be copied from the caller"),
            DvfsError::Publish(errno) => write!(f, "control surface could not be published ({})", errno),
            DvfsError::SelfTest => f.write_str("activation self-test failed"),
        }
    }
}
