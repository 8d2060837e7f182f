//! # Transition Sequencer
//!
//! Máquina de estados de uma escrita:
//! `Idle → Validated → fases (ordem pela direção) → Recalibrating → Idle`.
//!
//! ## Ordem das fases
//! - **Increase**: voltagem completa antes da frequência (sem brownout).
//! - **Decrease**: frequência completa antes da voltagem (sem sobrecarga
//!   na frequência antiga com a voltagem já reduzida).
//! - **Hold**: só a fase de voltagem.
//!
//! ## Serialização
//! Um único `Mutex` por controlador, segurado do primeiro lookup até a
//! propagação da policy. Leituras (dump) não passam por ele.
//!
//! ## Limitação conhecida
//! Códigos de retorno de `omap_voltage_scale` e `cpufreq_update_policy`
//! são apenas logados e marcados em `PhaseFlags::PLATFORM_FAULT`. A
//! escrita continua reportando sucesso.

use spin::Mutex;

use crate::dvfs::config::DvfsConfig;
use crate::dvfs::recalib;
use crate::dvfs::snapshot::DefaultSnapshot;
use crate::dvfs::types::{
    Direction, PhaseFlags, PolicyLimits, TransitionOutcome, TransitionReport, TransitionRequest,
    VoltageTarget,
};
use crate::dvfs::validator;
use crate::hal::{LiveOpp, LivePolicy, LiveVoltData, PlatformOps};
use crate::sys::types::{hz_to_khz, hz_to_mhz};
use crate::sys::{DvfsError, FrequencyHz, LookupTarget, MicroVolts};

/// Estado protegido pelo lock global.
#[derive(Debug, Default)]
struct SequencerState {
    transitions: u64,
    last_report: Option<TransitionReport>,
}

impl SequencerState {
    fn record(&mut self, report: TransitionReport) {
        self.transitions = self.transitions.wrapping_add(1);
        self.last_report = Some(report);
    }
}

/// Quem disparou a transição.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    /// Escrita do operador: recalibra sempre.
    Write,
    /// Desativação: recalibra só se a voltagem foi escalada.
    Restore,
}

/// Controlador DVFS de um domínio.
pub struct DvfsController {
    ops: PlatformOps,
    config: DvfsConfig,
    policy: LivePolicy,
    snapshot: DefaultSnapshot,
    state: Mutex<SequencerState>,
}

impl DvfsController {
    /// Localiza a policy da CPU e captura o snapshot de fábrica.
    pub fn activate(ops: PlatformOps, config: DvfsConfig) -> Result<Self, DvfsError> {
        let domain = config.domain;

        let count = ops.opp_count(domain.opp_class);
        crate::kinfo!("(Dvfs) OPPs registrados no domínio: ", count);

        let policy = ops
            .freq_table(domain.cpu)
            .zip(ops.policy(domain.cpu))
            .and_then(|(table, policy)| LivePolicy::new(table, policy))
            .ok_or_else(|| {
                crate::kerror!("(Dvfs) Tabela ou policy ausente para cpu ", domain.cpu);
                DvfsError::Lookup(LookupTarget::PolicyLimits)
            })?;

        let snapshot = DefaultSnapshot::capture(&ops, &domain)?;
        crate::kinfo!("(Dvfs) Frequência máxima padrão: ", hz_to_mhz(snapshot.frequency_hz()), " MHz");

        Ok(Self {
            ops,
            config,
            policy,
            snapshot,
            state: Mutex::new(SequencerState::default()),
        })
    }

    pub fn config(&self) -> &DvfsConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &DefaultSnapshot {
        &self.snapshot
    }

    pub(crate) fn ops(&self) -> &PlatformOps {
        &self.ops
    }

    /// Espelhos do teto, lidos sem lock.
    pub fn policy_limits(&self) -> PolicyLimits {
        self.policy.limits()
    }

    /// Relatório da última transição concluída.
    pub fn last_report(&self) -> Option<TransitionReport> {
        self.state.lock().last_report
    }

    /// Transições concluídas desde a ativação.
    pub fn transitions(&self) -> u64 {
        self.state.lock().transitions
    }

    // =========================================================================
    // ESCRITA
    // =========================================================================

    /// Executa uma requisição de ponta a ponta sob o lock global.
    ///
    /// `Err` só para lookup ausente, antes de qualquer mutação. Frequência
    /// fora da janela devolve `Rejected` sem tocar em nada.
    pub fn apply(&self, request: &TransitionRequest) -> Result<TransitionOutcome, DvfsError> {
        let mut state = self.state.lock();

        let (opp, vdata) = self.lookup_live()?;

        let limits = &self.config.limits;
        if !validator::frequency_in_window(limits, request.frequency_hz) {
            crate::kwarn!("(Dvfs) Frequência fora da janela, ignorada: ", request.frequency_hz, " Hz");
            return Ok(TransitionOutcome::Rejected {
                requested: request.frequency_hz,
            });
        }

        let target = match request.voltage_uv {
            Some(uv) => {
                let clamped = validator::clamp_voltage(limits, uv);
                if clamped != uv {
                    crate::kwarn!("(Dvfs) Voltagem limitada a ", clamped, " uV");
                }
                VoltageTarget::Override(clamped)
            }
            None => VoltageTarget::Default,
        };

        let direction = Direction::between(opp.rate(), request.frequency_hz);
        crate::kdebug!("(Dvfs) Direção: "; direction.name());

        let report = self.transition(&opp, &vdata, direction, request.frequency_hz, target, Trigger::Write);
        state.record(report);
        Ok(TransitionOutcome::Applied(report))
    }

    /// Devolve o domínio aos valores do snapshot.
    ///
    /// Capturar e restaurar em seguida não altera o estado vivo.
    pub fn restore_defaults(&self) -> Result<TransitionReport, DvfsError> {
        let mut state = self.state.lock();

        let (opp, vdata) = self.lookup_live()?;

        let default_hz = self.snapshot.frequency_hz();
        let direction = self.snapshot.restore_direction(opp.rate());
        crate::kinfo!("(Dvfs) Restaurando padrão: ", hz_to_mhz(default_hz), " MHz");

        let report = self.transition(&opp, &vdata, direction, default_hz, VoltageTarget::Default, Trigger::Restore);
        state.record(report);
        Ok(report)
    }

    // =========================================================================
    // FASES
    // =========================================================================

    /// OPP atual e o perfil de voltagem associado.
    fn lookup_live(&self) -> Result<(LiveOpp, LiveVoltData), DvfsError> {
        let domain = &self.config.domain;

        let opp = self.ops.highest_opp(domain.opp_class).ok_or_else(|| {
            crate::kerror!("(Dvfs) Não foi possível encontrar o OPP atual");
            DvfsError::Lookup(LookupTarget::OperatingPoint)
        })?;

        let volt = self.ops.opp_voltage(&opp);
        let vdata = self.ops.volt_data(domain.vdd, volt).ok_or_else(|| {
            crate::kerror!("(Dvfs) Não foi possível encontrar volt_data para ", volt, " uV");
            DvfsError::Lookup(LookupTarget::VoltageProfile)
        })?;

        Ok((opp, vdata))
    }

    fn transition(
        &self,
        opp: &LiveOpp,
        vdata: &LiveVoltData,
        direction: Direction,
        hz: FrequencyHz,
        target: VoltageTarget,
        trigger: Trigger,
    ) -> TransitionReport {
        let mut phases = PhaseFlags::empty();

        let voltage_uv = match direction {
            Direction::Increase => {
                let uv = self.voltage_phase(vdata, target, &mut phases);
                self.frequency_phase(opp, hz, &mut phases);
                uv
            }
            Direction::Decrease => {
                self.frequency_phase(opp, hz, &mut phases);
                self.voltage_phase(vdata, target, &mut phases)
            }
            Direction::Hold => self.voltage_phase(vdata, target, &mut phases),
        };

        let recalibrate = match trigger {
            Trigger::Write => true,
            Trigger::Restore => phases.contains(PhaseFlags::SCALED),
        };
        if recalibrate {
            recalib::reset_calibration(&self.ops, self.config.domain.vdd, &mut phases);
        }

        self.propagate(&mut phases);

        TransitionReport {
            direction,
            phases,
            frequency_hz: hz,
            voltage_uv,
        }
    }

    /// Reescreve o perfil vivo e escala o trilho se necessário.
    fn voltage_phase(&self, vdata: &LiveVoltData, target: VoltageTarget, phases: &mut PhaseFlags) -> MicroVolts {
        let domain = &self.config.domain;

        // Ponto de partida: a voltagem medida, não a calibração armazenada.
        let measured = self.ops.measured_voltage(domain.vp);
        let mut transitional = vdata.read_raw();
        transitional.u_volt_calib = measured as _;

        let target_uv = match target {
            VoltageTarget::Override(uv) => {
                vdata.write_calibration(uv, uv, 0);
                vdata.set_errminlimit(self.config.override_errminlimit);
                uv
            }
            VoltageTarget::Default => {
                let defaults = self.snapshot.profile();
                vdata.write_calibration(defaults.calibrated_uv, defaults.dyn_nominal_uv, defaults.dyn_margin_uv);
                vdata.set_errminlimit(defaults.sr_errminlimit);
                defaults.calibrated_uv
            }
        };

        if target_uv != measured {
            if target == VoltageTarget::Default {
                crate::kinfo!("(Dvfs) Voltando à voltagem padrão");
            }
            let ret = self.ops.voltage_scale(domain.vdd, vdata, &mut transitional);
            phases.insert(PhaseFlags::SCALED);
            if ret != 0 {
                crate::kwarn!("(Dvfs) omap_voltage_scale falhou, código ", ret.unsigned_abs());
                phases.insert(PhaseFlags::PLATFORM_FAULT);
            }
        } else {
            crate::kdebug!("(Dvfs) Voltagem já no alvo, escala pulada: ", target_uv, " uV");
        }

        self.ops.vc_setup(domain.vdd, target_uv);
        phases.insert(PhaseFlags::VOLTAGE);
        target_uv
    }

    /// OPP e os quatro espelhos da policy recebem o mesmo valor.
    fn frequency_phase(&self, opp: &LiveOpp, hz: FrequencyHz, phases: &mut PhaseFlags) {
        opp.set_rate(hz);
        self.policy.set_ceiling(hz_to_khz(hz));
        phases.insert(PhaseFlags::FREQUENCY);
        crate::kinfo!("(Dvfs) Nova frequência máxima: ", hz_to_mhz(hz), " MHz");
    }

    fn propagate(&self, phases: &mut PhaseFlags) {
        let ret = self.ops.update_policy(self.config.domain.cpu);
        phases.insert(PhaseFlags::PROPAGATED);
        if ret != 0 {
            crate::kwarn!("(Dvfs) cpufreq_update_policy falhou, código ", ret.unsigned_abs());
            phases.insert(PhaseFlags::PLATFORM_FAULT);
        }
    }
}
