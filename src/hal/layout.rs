//! Layouts brutos dos registros da plataforma
//!
//! Espelham, campo a campo, as estruturas que o kernel da placa mantém para
//! o domínio MPU. O controlador nunca aloca nem libera estes registros:
//! recebe ponteiros das rotinas resolvidas e altera campos no lugar.
//!
//! `RawCpufreqPolicy` espelha apenas o prefixo da `cpufreq_policy` que é
//! lido/escrito aqui; o restante da estrutura continua sendo da plataforma.

use core::ffi::c_ulong;

/// Classe de OPP (`enum opp_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum OppClass {
    Mpu = 0,
    Dsp = 1,
    L3 = 2,
}

/// `struct omap_opp`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOpp {
    /// OPP habilitado para seleção.
    pub enabled: bool,
    /// Frequência em Hz.
    pub rate: c_ulong,
    /// Voltagem nominal em µV (chave para `omap_get_volt_data`).
    pub u_volt: c_ulong,
    /// Identificador legado.
    pub opp_id: u8,
}

/// `struct omap_volt_data`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawVoltData {
    pub u_volt_nominal: c_ulong,
    /// Nominal otimizado em tempo de execução para este silício.
    pub u_volt_dyn_nominal: c_ulong,
    /// Margem somada à voltagem calibrada.
    pub u_volt_dyn_margin: c_ulong,
    /// Voltagem calibrada para este OPP.
    pub u_volt_calib: c_ulong,
    /// Valor N alvo do SmartReflex.
    pub sr_nvalue: u32,
    /// Limite mínimo de erro do SmartReflex.
    pub sr_errminlimit: u8,
    /// Ganho de erro do voltage processor.
    pub vp_errorgain: u8,
    /// Adaptive body bias habilitado.
    pub abb: bool,
    pub sr_val: u32,
    pub sr_error: u32,
}

/// `struct cpufreq_frequency_table` (entrada).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFreqTableEntry {
    pub index: u32,
    /// Frequência em KHz.
    pub frequency: u32,
}

/// `struct cpufreq_cpuinfo`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCpuInfo {
    pub max_freq: u32,
    pub min_freq: u32,
    pub transition_latency: u32,
}

/// `struct cpufreq_real_policy`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawUserPolicy {
    pub min: u32,
    pub max: u32,
    pub policy: u32,
}

/// Prefixo de `struct cpufreq_policy` usado pelo controlador.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCpufreqPolicy {
    pub cpu: u32,
    pub cpuinfo: RawCpuInfo,
    pub min: u32,
    pub max: u32,
    pub cur: u32,
    pub user_policy: RawUserPolicy,
}
