//! # Platform Ops
//!
//! Tabela de rotinas da plataforma já resolvidas. Construída uma única vez
//! na ativação a partir do `CapabilityProvider`; depois disso o controlador
//! só fala com o hardware através dela.
//!
//! ## Regras
//! - Qualquer rotina ausente é fatal (`DvfsError::Resolution`), sem retry.
//! - Os wrappers não interpretam códigos de retorno: quem decide o que
//!   fazer com eles é o sequenciador.

use alloc::sync::Arc;
use core::ffi::c_ulong;

use crate::hal::layout::{OppClass, RawCpufreqPolicy, RawFreqTableEntry, RawVoltData};
use crate::hal::live::{LiveOpp, LiveVoltData};
use crate::hal::traits::{
    CapabilityProvider, FindFreqFloorFn, FreqTableFn, OppCountFn, OppVoltageFn, PolicyGetFn,
    ResetCalibFn, Routine, UpdatePolicyFn, VcSetupFn, VoltDataFn, VoltageScaleFn, VpVoltageFn,
};
use crate::sys::{DvfsError, FrequencyHz, MicroVolts};
use core::ptr::NonNull;

/// Nomes das rotinas exigidas, na ordem em que são resolvidas.
pub const REQUIRED_ROUTINES: [&str; 11] = [
    "opp_get_opp_count",
    "opp_find_freq_floor",
    "opp_get_voltage",
    "omap_get_volt_data",
    "omap_voltageprocessor_get_voltage",
    "omap_voltage_scale",
    "vc_setup_on_voltage",
    "sr_class1p5_reset_calib",
    "cpufreq_update_policy",
    "cpufreq_frequency_get_table",
    "cpufreq_cpu_get",
];

/// Resolve `$name` e exige a variante `$variant`.
macro_rules! bind_routine {
    ($provider:expr, $name:literal, $variant:ident) => {
        match $provider.resolve($name) {
            Some(Routine::$variant(handle)) => {
                crate::ktrace!("(Bind) OK: "; $name);
                handle
            }
            Some(other) => {
                crate::kerror!("(Bind) Assinatura inesperada para "; $name);
                crate::kdebug!("(Bind) Handle recebido: "; other.kind());
                return Err(DvfsError::Resolution($name));
            }
            None => {
                crate::kerror!("(Bind) Rotina não encontrada: "; $name);
                return Err(DvfsError::Resolution($name));
            }
        }
    };
}

/// Rotinas da plataforma prontas para uso.
pub struct PlatformOps {
    opp_count: Arc<OppCountFn>,
    find_freq_floor: Arc<FindFreqFloorFn>,
    opp_voltage: Arc<OppVoltageFn>,
    volt_data: Arc<VoltDataFn>,
    vp_voltage: Arc<VpVoltageFn>,
    voltage_scale: Arc<VoltageScaleFn>,
    vc_setup: Arc<VcSetupFn>,
    reset_calib: Arc<ResetCalibFn>,
    update_policy: Arc<UpdatePolicyFn>,
    freq_table: Arc<FreqTableFn>,
    policy_get: Arc<PolicyGetFn>,
}

impl PlatformOps {
    /// Resolve todas as rotinas exigidas (fail-fast na primeira ausente).
    pub fn bind<P: CapabilityProvider + ?Sized>(provider: &P) -> Result<Self, DvfsError> {
        crate::kdebug!("(Bind) Resolvendo rotinas da plataforma: ", REQUIRED_ROUTINES.len());

        let ops = Self {
            opp_count: bind_routine!(provider, "opp_get_opp_count", OppCount),
            find_freq_floor: bind_routine!(provider, "opp_find_freq_floor", FindFreqFloor),
            opp_voltage: bind_routine!(provider, "opp_get_voltage", OppVoltage),
            volt_data: bind_routine!(provider, "omap_get_volt_data", VoltData),
            vp_voltage: bind_routine!(provider, "omap_voltageprocessor_get_voltage", VpVoltage),
            voltage_scale: bind_routine!(provider, "omap_voltage_scale", VoltageScale),
            vc_setup: bind_routine!(provider, "vc_setup_on_voltage", VcSetup),
            reset_calib: bind_routine!(provider, "sr_class1p5_reset_calib", ResetCalib),
            update_policy: bind_routine!(provider, "cpufreq_update_policy", UpdatePolicy),
            freq_table: bind_routine!(provider, "cpufreq_frequency_get_table", FreqTable),
            policy_get: bind_routine!(provider, "cpufreq_cpu_get", PolicyGet),
        };

        crate::kok!("(Bind) Todas as rotinas resolvidas");
        Ok(ops)
    }

    /// Número de OPPs registrados na classe.
    pub fn opp_count(&self, class: OppClass) -> i32 {
        (self.opp_count)(class)
    }

    /// Busca floor a partir da maior chave representável: devolve sempre o
    /// OPP de maior frequência da classe.
    pub fn highest_opp(&self, class: OppClass) -> Option<LiveOpp> {
        let mut key: c_ulong = c_ulong::MAX;
        let raw = (self.find_freq_floor)(class, &mut key);
        crate::ktrace!("(Hal) opp_find_freq_floor -> key=", key);
        LiveOpp::from_raw(raw)
    }

    /// Voltagem nominal associada ao OPP.
    pub fn opp_voltage(&self, opp: &LiveOpp) -> MicroVolts {
        (self.opp_voltage)(opp.as_ptr()) as MicroVolts
    }

    /// Perfil de voltagem para o nível `volt` do domínio `vdd`.
    pub fn volt_data(&self, vdd: u32, volt: MicroVolts) -> Option<LiveVoltData> {
        LiveVoltData::from_raw((self.volt_data)(vdd, volt as c_ulong))
    }

    /// Voltagem realmente medida pelo voltage processor.
    pub fn measured_voltage(&self, vp: u32) -> MicroVolts {
        (self.vp_voltage)(vp) as MicroVolts
    }

    /// Escala o trilho de `current` para `target`. Retorno cru da plataforma.
    pub fn voltage_scale(&self, vdd: u32, target: &LiveVoltData, current: &mut RawVoltData) -> i32 {
        crate::ktrace!("(Hal) omap_voltage_scale -> ", target.calibrated());
        (self.voltage_scale)(vdd, target.as_ptr(), current as *mut RawVoltData)
    }

    /// Reconfigura o voltage controller para a voltagem final.
    pub fn vc_setup(&self, vdd: u32, volt: MicroVolts) {
        crate::ktrace!("(Hal) vc_setup_on_voltage -> ", volt);
        (self.vc_setup)(vdd, volt as c_ulong)
    }

    /// Reset + recalibração do SmartReflex do domínio.
    pub fn reset_calibration(&self, vdd: u32) {
        crate::ktrace!("(Hal) sr_class1p5_reset_calib vdd=", vdd);
        (self.reset_calib)(vdd, true, true)
    }

    /// Propaga os campos espelhados da policy. Retorno cru da plataforma.
    pub fn update_policy(&self, cpu: u32) -> i32 {
        crate::ktrace!("(Hal) cpufreq_update_policy cpu=", cpu);
        (self.update_policy)(cpu)
    }

    /// Primeira entrada da tabela de frequências da CPU.
    pub fn freq_table(&self, cpu: u32) -> Option<NonNull<RawFreqTableEntry>> {
        NonNull::new((self.freq_table)(cpu))
    }

    /// Policy do cpufreq da CPU.
    pub fn policy(&self, cpu: u32) -> Option<NonNull<RawCpufreqPolicy>> {
        NonNull::new((self.policy_get)(cpu))
    }
}

/// Conversão usada pelos wrappers vivos: Hz cabe em `unsigned long` em
/// todas as placas suportadas.
#[inline]
pub(crate) fn to_c_ulong(hz: FrequencyHz) -> c_ulong {
    hz as c_ulong
}
