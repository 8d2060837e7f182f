//! Provedor de Capacidades
//!
//! As rotinas que manipulam OPPs, voltagens e SmartReflex não são exportadas
//! pela plataforma. Quem carrega o módulo sabe encontrá-las (varredura da
//! tabela de símbolos, tabela fixa, fake de testes...) e entrega ao
//! controlador um `CapabilityProvider`. O controlador só pede rotinas pelo
//! nome e nunca procura nada sozinho.
//!
//! Cada handle é tipado pela assinatura da rotina. Um handle com o tipo
//! errado para o nome pedido é tratado como "não encontrado".

use alloc::sync::Arc;
use core::ffi::c_ulong;

use crate::hal::layout::{OppClass, RawCpufreqPolicy, RawFreqTableEntry, RawOpp, RawVoltData};

/// `int opp_get_opp_count(enum opp_t)`
pub type OppCountFn = dyn Fn(OppClass) -> i32 + Send + Sync;
/// `struct omap_opp *opp_find_freq_floor(enum opp_t, unsigned long *freq)`
pub type FindFreqFloorFn = dyn Fn(OppClass, &mut c_ulong) -> *mut RawOpp + Send + Sync;
/// `unsigned long opp_get_voltage(const struct omap_opp *)`
pub type OppVoltageFn = dyn Fn(*const RawOpp) -> c_ulong + Send + Sync;
/// `struct omap_volt_data *omap_get_volt_data(int vdd, unsigned long volt)`
pub type VoltDataFn = dyn Fn(u32, c_ulong) -> *mut RawVoltData + Send + Sync;
/// `unsigned long omap_voltageprocessor_get_voltage(int vp_id)`
pub type VpVoltageFn = dyn Fn(u32) -> c_ulong + Send + Sync;
/// `int omap_voltage_scale(int vdd, struct omap_volt_data *target, struct omap_volt_data *current)`
pub type VoltageScaleFn = dyn Fn(u32, *mut RawVoltData, *mut RawVoltData) -> i32 + Send + Sync;
/// `void vc_setup_on_voltage(u32 vdd, unsigned long target_volt)`
pub type VcSetupFn = dyn Fn(u32, c_ulong) + Send + Sync;
/// `void sr_class1p5_reset_calib(int vdd, bool reset, bool recal)`
pub type ResetCalibFn = dyn Fn(u32, bool, bool) + Send + Sync;
/// `int cpufreq_update_policy(unsigned int cpu)`
pub type UpdatePolicyFn = dyn Fn(u32) -> i32 + Send + Sync;
/// `struct cpufreq_frequency_table *cpufreq_frequency_get_table(unsigned int cpu)`
pub type FreqTableFn = dyn Fn(u32) -> *mut RawFreqTableEntry + Send + Sync;
/// `struct cpufreq_policy *cpufreq_cpu_get(unsigned int cpu)`
pub type PolicyGetFn = dyn Fn(u32) -> *mut RawCpufreqPolicy + Send + Sync;

/// Handle tipado para uma rotina da plataforma.
#[derive(Clone)]
pub enum Routine {
    OppCount(Arc<OppCountFn>),
    FindFreqFloor(Arc<FindFreqFloorFn>),
    OppVoltage(Arc<OppVoltageFn>),
    VoltData(Arc<VoltDataFn>),
    VpVoltage(Arc<VpVoltageFn>),
    VoltageScale(Arc<VoltageScaleFn>),
    VcSetup(Arc<VcSetupFn>),
    ResetCalib(Arc<ResetCalibFn>),
    UpdatePolicy(Arc<UpdatePolicyFn>),
    FreqTable(Arc<FreqTableFn>),
    PolicyGet(Arc<PolicyGetFn>),
}

impl Routine {
    /// Nome da variante (para logs de assinatura inesperada).
    pub const fn kind(&self) -> &'static str {
        match self {
            Routine::OppCount(_) => "OppCount",
            Routine::FindFreqFloor(_) => "FindFreqFloor",
            Routine::OppVoltage(_) => "OppVoltage",
            Routine::VoltData(_) => "VoltData",
            Routine::VpVoltage(_) => "VpVoltage",
            Routine::VoltageScale(_) => "VoltageScale",
            Routine::VcSetup(_) => "VcSetup",
            Routine::ResetCalib(_) => "ResetCalib",
            Routine::UpdatePolicy(_) => "UpdatePolicy",
            Routine::FreqTable(_) => "FreqTable",
            Routine::PolicyGet(_) => "PolicyGet",
        }
    }
}

/// Resolve rotinas internas da plataforma pelo nome.
///
/// Chamado uma vez por rotina durante a ativação. Sem retry: `None` aborta
/// a ativação.
///
/// # Safety
///
/// O controlador desreferencia os ponteiros devolvidos pelas rotinas
/// (`RawOpp`, `RawVoltData`, tabela e policy do cpufreq). O implementador
/// garante que:
/// - ponteiros não nulos apontam para registros válidos e alinhados que
///   permanecem vivos enquanto o módulo estiver ativo;
/// - enquanto ativo, o controlador é o único escritor desses campos.
pub unsafe trait CapabilityProvider {
    fn resolve(&self, name: &str) -> Option<Routine>;
}
