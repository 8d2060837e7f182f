//! # Live Aliases
//!
//! Referências para registros que pertencem à plataforma (OPP, voltage
//! data, tabela e policy do cpufreq). Todo acesso a campo passa por
//! `VolatilePtr`: o hardware e outros subsistemas da placa leem estes
//! campos a qualquer momento, então nenhuma escrita pode ser elidida nem
//! reordenada pelo compilador.
//!
//! ## Regras
//! - Escritas só acontecem com o lock global do controlador adquirido.
//! - Leituras (dump de diagnóstico) não pegam lock e podem ver um estado
//!   intermediário de uma transição.

use core::ptr::NonNull;

use volatile::{map_field, VolatilePtr};

use crate::dvfs::types::PolicyLimits;
use crate::hal::layout::{RawCpufreqPolicy, RawFreqTableEntry, RawOpp, RawVoltData};
use crate::hal::platform::to_c_ulong;
use crate::sys::{FrequencyHz, FrequencyKHz, MicroVolts};

/// Maior errno codificado em ponteiro (`IS_ERR`).
const MAX_ERRNO: usize = 4095;

/// Converte o retorno de uma rotina em ponteiro utilizável.
///
/// Nulo e ponteiros de erro (`ERR_PTR(-errno)`) contam como "não encontrado".
fn live_ptr<T>(raw: *mut T) -> Option<NonNull<T>> {
    if (raw as usize) > usize::MAX - MAX_ERRNO {
        return None;
    }
    NonNull::new(raw)
}

// =============================================================================
// OPP
// =============================================================================

/// OPP vivo do domínio.
pub struct LiveOpp(NonNull<RawOpp>);

// SAFETY: o registro é da plataforma e vive enquanto o módulo estiver ativo
// (contrato de `CapabilityProvider`); escritas são serializadas pelo lock
// global do controlador.
unsafe impl Send for LiveOpp {}
unsafe impl Sync for LiveOpp {}

impl LiveOpp {
    pub(crate) fn from_raw(raw: *mut RawOpp) -> Option<Self> {
        live_ptr(raw).map(Self)
    }

    pub fn as_ptr(&self) -> *mut RawOpp {
        self.0.as_ptr()
    }

    fn volatile(&self) -> VolatilePtr<'_, RawOpp> {
        // SAFETY: ponteiro não nulo, alinhado e vivo (contrato do provedor)
        unsafe { VolatilePtr::new(self.0) }
    }

    /// Frequência atual do OPP em Hz.
    pub fn rate(&self) -> FrequencyHz {
        let opp = self.volatile();
        map_field!(opp.rate).read() as FrequencyHz
    }

    pub fn set_rate(&self, rate: FrequencyHz) {
        let opp = self.volatile();
        map_field!(opp.rate).write(to_c_ulong(rate));
    }

    pub fn is_enabled(&self) -> bool {
        let opp = self.volatile();
        map_field!(opp.enabled).read()
    }
}

// =============================================================================
// VOLTAGE DATA
// =============================================================================

/// `omap_volt_data` vivo associado ao OPP atual.
pub struct LiveVoltData(NonNull<RawVoltData>);

// SAFETY: mesmo contrato de `LiveOpp`.
unsafe impl Send for LiveVoltData {}
unsafe impl Sync for LiveVoltData {}

impl LiveVoltData {
    pub(crate) fn from_raw(raw: *mut RawVoltData) -> Option<Self> {
        live_ptr(raw).map(Self)
    }

    pub fn as_ptr(&self) -> *mut RawVoltData {
        self.0.as_ptr()
    }

    fn volatile(&self) -> VolatilePtr<'_, RawVoltData> {
        // SAFETY: ponteiro não nulo, alinhado e vivo (contrato do provedor)
        unsafe { VolatilePtr::new(self.0) }
    }

    /// Cópia por valor de todos os campos.
    pub fn read_raw(&self) -> RawVoltData {
        self.volatile().read()
    }

    /// Voltagem calibrada armazenada (pode estar defasada da medida).
    pub fn calibrated(&self) -> MicroVolts {
        let vdata = self.volatile();
        map_field!(vdata.u_volt_calib).read() as MicroVolts
    }

    /// Grava calibração, nominal dinâmico e margem dinâmica.
    pub fn write_calibration(&self, calib: MicroVolts, dyn_nominal: MicroVolts, dyn_margin: MicroVolts) {
        let vdata = self.volatile();
        map_field!(vdata.u_volt_calib).write(calib as _);
        map_field!(vdata.u_volt_dyn_nominal).write(dyn_nominal as _);
        map_field!(vdata.u_volt_dyn_margin).write(dyn_margin as _);
    }

    /// Limite mínimo de erro do SmartReflex.
    pub fn set_errminlimit(&self, limit: u8) {
        let vdata = self.volatile();
        map_field!(vdata.sr_errminlimit).write(limit);
    }
}

// =============================================================================
// CPUFREQ POLICY
// =============================================================================

/// Os quatro espelhos do teto de frequência: `freq_table[0]`, `policy->max`,
/// `policy->cpuinfo.max_freq` e `policy->user_policy.max`.
pub struct LivePolicy {
    table: NonNull<RawFreqTableEntry>,
    policy: NonNull<RawCpufreqPolicy>,
}

// SAFETY: mesmo contrato de `LiveOpp`.
unsafe impl Send for LivePolicy {}
unsafe impl Sync for LivePolicy {}

impl LivePolicy {
    pub(crate) fn new(table: NonNull<RawFreqTableEntry>, policy: NonNull<RawCpufreqPolicy>) -> Option<Self> {
        Some(Self {
            table: live_ptr(table.as_ptr())?,
            policy: live_ptr(policy.as_ptr())?,
        })
    }

    fn table(&self) -> VolatilePtr<'_, RawFreqTableEntry> {
        // SAFETY: ponteiro não nulo, alinhado e vivo (contrato do provedor)
        unsafe { VolatilePtr::new(self.table) }
    }

    fn policy(&self) -> VolatilePtr<'_, RawCpufreqPolicy> {
        // SAFETY: ponteiro não nulo, alinhado e vivo (contrato do provedor)
        unsafe { VolatilePtr::new(self.policy) }
    }

    /// Lê os quatro espelhos.
    pub fn limits(&self) -> PolicyLimits {
        let table = self.table();
        let policy = self.policy();
        let cpuinfo = map_field!(policy.cpuinfo);
        let user_policy = map_field!(policy.user_policy);

        PolicyLimits {
            table_khz: map_field!(table.frequency).read(),
            max_khz: map_field!(policy.max).read(),
            cpuinfo_max_khz: map_field!(cpuinfo.max_freq).read(),
            user_max_khz: map_field!(user_policy.max).read(),
        }
    }

    /// Atualiza o teto em todos os espelhos de uma vez. Nenhum caminho do
    /// controlador escreve um espelho isolado.
    pub fn set_ceiling(&self, khz: FrequencyKHz) {
        let table = self.table();
        let policy = self.policy();
        let cpuinfo = map_field!(policy.cpuinfo);
        let user_policy = map_field!(policy.user_policy);

        map_field!(table.frequency).write(khz);
        map_field!(policy.max).write(khz);
        map_field!(cpuinfo.max_freq).write(khz);
        map_field!(user_policy.max).write(khz);
    }
}
