//! # Safety Validator
//!
//! Funções puras sobre `SafetyLimits`. Frequência fora da janela é
//! rejeitada em silêncio (o chamador decide logar); voltagem fora da faixa
//! é limitada ao extremo mais próximo e segue adiante.

use crate::dvfs::config::SafetyLimits;
use crate::sys::{FrequencyHz, MicroVolts};

/// Janela fechada `[min_freq_hz, max_freq_hz]`.
#[inline]
pub fn frequency_in_window(limits: &SafetyLimits, hz: FrequencyHz) -> bool {
    (limits.min_freq_hz..=limits.max_freq_hz).contains(&hz)
}

/// `max(min_voltage_uv, min(max_voltage_uv, uv))`
#[inline]
pub fn clamp_voltage(limits: &SafetyLimits, uv: MicroVolts) -> MicroVolts {
    uv.clamp(limits.min_voltage_uv, limits.max_voltage_uv)
}
