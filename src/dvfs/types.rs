//! # DVFS Types
//!
//! Valores copiados dos registros vivos e os tipos que descrevem uma
//! requisição de transição e o seu resultado.

use bitflags::bitflags;

use crate::hal::layout::RawVoltData;
use crate::hal::live::LiveOpp;
use crate::sys::{FrequencyHz, FrequencyKHz, MicroVolts};

// =============================================================================
// VALORES DO DOMÍNIO
// =============================================================================

/// Cópia por valor de um OPP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingPoint {
    pub frequency_hz: FrequencyHz,
    pub is_enabled: bool,
}

impl OperatingPoint {
    pub fn read(opp: &LiveOpp) -> Self {
        Self {
            frequency_hz: opp.rate(),
            is_enabled: opp.is_enabled(),
        }
    }
}

/// Cópia por valor do perfil de voltagem (`omap_volt_data`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoltageProfile {
    pub nominal_uv: MicroVolts,
    pub dyn_nominal_uv: MicroVolts,
    pub dyn_margin_uv: MicroVolts,
    pub calibrated_uv: MicroVolts,
    pub sr_nvalue: u32,
    pub sr_errminlimit: u8,
    pub vp_errorgain: u8,
    pub abb: bool,
    pub sr_val: u32,
    pub sr_error: u32,
}

impl VoltageProfile {
    pub fn from_raw(raw: &RawVoltData) -> Self {
        Self {
            nominal_uv: raw.u_volt_nominal as MicroVolts,
            dyn_nominal_uv: raw.u_volt_dyn_nominal as MicroVolts,
            dyn_margin_uv: raw.u_volt_dyn_margin as MicroVolts,
            calibrated_uv: raw.u_volt_calib as MicroVolts,
            sr_nvalue: raw.sr_nvalue,
            sr_errminlimit: raw.sr_errminlimit,
            vp_errorgain: raw.vp_errorgain,
            abb: raw.abb,
            sr_val: raw.sr_val,
            sr_error: raw.sr_error,
        }
    }
}

/// Os quatro espelhos do teto de frequência, em KHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyLimits {
    /// `freq_table[0].frequency`
    pub table_khz: FrequencyKHz,
    /// `policy->max`
    pub max_khz: FrequencyKHz,
    /// `policy->cpuinfo.max_freq`
    pub cpuinfo_max_khz: FrequencyKHz,
    /// `policy->user_policy.max`
    pub user_max_khz: FrequencyKHz,
}

impl PolicyLimits {
    /// Todos os espelhos concordam.
    pub fn is_consistent(&self) -> bool {
        self.table_khz == self.max_khz
            && self.max_khz == self.cpuinfo_max_khz
            && self.cpuinfo_max_khz == self.user_max_khz
    }

    /// Teto comum, se os espelhos concordarem.
    pub fn ceiling(&self) -> Option<FrequencyKHz> {
        self.is_consistent().then_some(self.max_khz)
    }
}

// =============================================================================
// REQUISIÇÃO
// =============================================================================

/// Requisição do operador: `<freq_hz>` ou `<freq_hz> <volt_uv>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    pub frequency_hz: FrequencyHz,
    /// `None` significa "voltar à voltagem padrão".
    pub voltage_uv: Option<MicroVolts>,
}

impl TransitionRequest {
    /// Interpreta o texto da escrita.
    ///
    /// Lê até dois inteiros decimais sem sinal separados por espaço em
    /// branco. O primeiro é obrigatório; o que vier depois de cada número
    /// é ignorado. Voltagem ausente ou zero vira `None`. Números grandes
    /// demais saturam em `u64::MAX` (e caem fora da janela depois).
    pub fn parse(input: &[u8]) -> Option<Self> {
        let mut cursor = Cursor { bytes: input, pos: 0 };

        let frequency_hz = cursor.next_unsigned()?;
        let voltage_uv = cursor.next_unsigned().filter(|&uv| uv != 0);

        Some(Self {
            frequency_hz,
            voltage_uv,
        })
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn next_unsigned(&mut self) -> Option<u64> {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.bytes.get(self.pos) == Some(&b'+') {
            self.pos += 1;
        }

        let start = self.pos;
        let mut value: u64 = 0;
        while let Some(digit) = self.bytes.get(self.pos).filter(|b| b.is_ascii_digit()) {
            value = value
                .saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'));
            self.pos += 1;
        }

        (self.pos > start).then_some(value)
    }
}

// =============================================================================
// TRANSIÇÃO
// =============================================================================

/// Sentido da mudança de frequência.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Voltagem antes da frequência.
    Increase,
    /// Frequência antes da voltagem.
    Decrease,
    /// Só a fase de voltagem.
    Hold,
}

impl Direction {
    pub fn between(current: FrequencyHz, target: FrequencyHz) -> Self {
        match target.cmp(&current) {
            core::cmp::Ordering::Greater => Direction::Increase,
            core::cmp::Ordering::Less => Direction::Decrease,
            core::cmp::Ordering::Equal => Direction::Hold,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Increase => "increase",
            Direction::Decrease => "decrease",
            Direction::Hold => "hold",
        }
    }
}

bitflags! {
    /// Fases executadas por uma transição.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PhaseFlags: u8 {
        /// Perfil de voltagem reescrito + vc_setup.
        const VOLTAGE        = 1 << 0;
        /// OPP e espelhos da policy reescritos.
        const FREQUENCY      = 1 << 1;
        /// omap_voltage_scale foi chamado.
        const SCALED         = 1 << 2;
        /// Reset + recalibração do SmartReflex.
        const RECALIBRATED   = 1 << 3;
        /// cpufreq_update_policy foi chamado.
        const PROPAGATED     = 1 << 4;
        /// Alguma rotina devolveu código diferente de zero.
        const PLATFORM_FAULT = 1 << 5;
    }
}

/// Voltagem alvo de uma fase de voltagem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoltageTarget {
    /// Valor do operador, já limitado à faixa segura.
    Override(MicroVolts),
    /// Calibração do snapshot.
    Default,
}

/// O que uma transição concluída fez.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionReport {
    pub direction: Direction,
    pub phases: PhaseFlags,
    /// Frequência gravada no OPP.
    pub frequency_hz: FrequencyHz,
    /// Calibração gravada no perfil vivo.
    pub voltage_uv: MicroVolts,
}

/// Resultado de uma requisição aceita.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied(TransitionReport),
    /// Frequência fora da janela: nada foi alterado.
    Rejected { requested: FrequencyHz },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_frequency_only() {
        assert_eq!(
            TransitionRequest::parse(b"1000000000\n"),
            Some(TransitionRequest {
                frequency_hz: 1_000_000_000,
                voltage_uv: None
            })
        );
    }

    #[test]
    fn parse_frequency_and_voltage() {
        let req = TransitionRequest::parse(b"  1600000000\t1300000").unwrap();
        assert_eq!(req.frequency_hz, 1_600_000_000);
        assert_eq!(req.voltage_uv, Some(1_300_000));
    }

    #[test]
    fn zero_voltage_means_default() {
        let req = TransitionRequest::parse(b"1200000000 0").unwrap();
        assert_eq!(req.voltage_uv, None);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        let req = TransitionRequest::parse(b"1200000000MHz").unwrap();
        assert_eq!(req.frequency_hz, 1_200_000_000);
        assert_eq!(req.voltage_uv, None);

        let req = TransitionRequest::parse(b"1200000000 1300000 7").unwrap();
        assert_eq!(req.voltage_uv, Some(1_300_000));
    }

    #[test]
    fn malformed_input_has_no_request() {
        assert_eq!(TransitionRequest::parse(b""), None);
        assert_eq!(TransitionRequest::parse(b"   \n"), None);
        assert_eq!(TransitionRequest::parse(b"fast"), None);
        assert_eq!(TransitionRequest::parse(b"-800000000"), None);
        assert_eq!(TransitionRequest::parse(&[0xff, 0xfe]), None);
    }

    #[test]
    fn huge_numbers_saturate() {
        let req = TransitionRequest::parse(b"99999999999999999999999 5").unwrap();
        assert_eq!(req.frequency_hz, u64::MAX);
        assert_eq!(req.voltage_uv, Some(5));
    }

    #[test]
    fn direction_follows_target() {
        assert_eq!(Direction::between(1_000, 1_600), Direction::Increase);
        assert_eq!(Direction::between(1_600, 900), Direction::Decrease);
        assert_eq!(Direction::between(1_000, 1_000), Direction::Hold);
    }

    #[test]
    fn policy_ceiling_requires_agreement() {
        let mut limits = PolicyLimits {
            table_khz: 1_000_000,
            max_khz: 1_000_000,
            cpuinfo_max_khz: 1_000_000,
            user_max_khz: 1_000_000,
        };
        assert_eq!(limits.ceiling(), Some(1_000_000));

        limits.user_max_khz = 600_000;
        assert!(!limits.is_consistent());
        assert_eq!(limits.ceiling(), None);
    }
}
