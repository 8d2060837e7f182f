//! Tipos fundamentais do controlador

/// Frequência em Hz (unidade dos OPPs da plataforma).
pub type FrequencyHz = u64;

/// Frequência em KHz (unidade do cpufreq).
pub type FrequencyKHz = u32;

/// Voltagem em microvolts.
pub type MicroVolts = u64;

/// Tamanho de página do kernel hospedeiro. Limita o dump de leitura e o
/// tamanho máximo aceito na escrita (uma página menos o terminador).
pub const PAGE_SIZE: usize = 4096;

/// Converte Hz para a unidade do cpufreq.
#[inline]
pub const fn hz_to_khz(hz: FrequencyHz) -> FrequencyKHz {
    (hz / 1000) as FrequencyKHz
}

/// Converte Hz para MHz (apenas para logs).
#[inline]
pub const fn hz_to_mhz(hz: FrequencyHz) -> u64 {
    hz / 1_000_000
}
