//! # DVFS Configuration
//!
//! Constantes da revisão de hardware suportada. Os limites de segurança
//! são específicos do OMAP3630 e não valem para outras revisões: cada
//! placa nova recebe o seu próprio `SafetyLimits`.

use crate::hal::layout::OppClass;
use crate::sys::{FrequencyHz, MicroVolts};

/// Nome da pseudo-entrada publicada em `/proc`.
pub const PROC_ENTRY_NAME: &str = "opptimizer";

/// Permissões da pseudo-entrada (rw-r--r--).
pub const PROC_ENTRY_MODE: u16 = 0o644;

/// Versão exibida no final do dump.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Janela de frequência e faixa de voltagem aceitas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyLimits {
    /// Menor frequência aceita (inclusive).
    pub min_freq_hz: FrequencyHz,
    /// Maior frequência aceita (inclusive).
    pub max_freq_hz: FrequencyHz,
    /// Piso da voltagem (valores abaixo são elevados a ele).
    pub min_voltage_uv: MicroVolts,
    /// Teto da voltagem (valores acima são reduzidos a ele).
    pub max_voltage_uv: MicroVolts,
}

impl SafetyLimits {
    /// OMAP3630 (Milestone 2 / Droid X).
    pub const OMAP3630: Self = Self {
        min_freq_hz: 800_000_000,
        max_freq_hz: 1_700_000_000,
        min_voltage_uv: 1_000_000,
        max_voltage_uv: 1_425_000,
    };
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self::OMAP3630
    }
}

/// Identificadores do domínio gerenciado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainIds {
    /// Classe de OPP consultada na busca floor.
    pub opp_class: OppClass,
    /// Trilho de voltagem (VDD1).
    pub vdd: u32,
    /// Voltage processor que mede o trilho.
    pub vp: u32,
    /// CPU cuja policy do cpufreq espelha o teto.
    pub cpu: u32,
}

impl Default for DomainIds {
    fn default() -> Self {
        Self {
            opp_class: OppClass::Mpu,
            vdd: 0,
            vp: 0,
            cpu: 0,
        }
    }
}

/// Configuração completa do controlador.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DvfsConfig {
    pub domain: DomainIds,
    pub limits: SafetyLimits,
    /// `sr_errminlimit` gravado em toda escrita com voltagem explícita.
    pub override_errminlimit: u8,
}

impl Default for DvfsConfig {
    fn default() -> Self {
        Self {
            domain: DomainIds::default(),
            limits: SafetyLimits::OMAP3630,
            override_errminlimit: 0x16,
        }
    }
}
