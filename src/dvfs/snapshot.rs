//! # Default Snapshot
//!
//! Cópia dos valores de fábrica, tirada uma única vez na ativação antes de
//! qualquer escrita. É a única fonte usada para restaurar o domínio.

use crate::dvfs::config::DomainIds;
use crate::dvfs::types::{Direction, OperatingPoint, VoltageProfile};
use crate::hal::PlatformOps;
use crate::sys::{DvfsError, FrequencyHz, LookupTarget, MicroVolts};

/// OPP e perfil de voltagem padrão. Imutável depois de criado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultSnapshot {
    opp: OperatingPoint,
    profile: VoltageProfile,
}

impl DefaultSnapshot {
    /// Lê o OPP mais alto do domínio e o perfil associado à sua voltagem.
    ///
    /// Nenhum snapshot parcial é retido: qualquer lookup ausente aborta.
    pub fn capture(ops: &PlatformOps, domain: &DomainIds) -> Result<Self, DvfsError> {
        let opp = ops.highest_opp(domain.opp_class).ok_or_else(|| {
            crate::kerror!("(Snapshot) Nenhum OPP para o domínio");
            DvfsError::Lookup(LookupTarget::OperatingPoint)
        })?;

        let volt = ops.opp_voltage(&opp);
        let vdata = ops.volt_data(domain.vdd, volt).ok_or_else(|| {
            crate::kerror!("(Snapshot) Nenhum volt_data para ", volt, " uV");
            DvfsError::Lookup(LookupTarget::VoltageProfile)
        })?;

        let snapshot = Self {
            opp: OperatingPoint::read(&opp),
            profile: VoltageProfile::from_raw(&vdata.read_raw()),
        };

        crate::kdebug!("(Snapshot) Frequência padrão: ", snapshot.opp.frequency_hz, " Hz");
        crate::kdebug!("(Snapshot) Calibração padrão: ", snapshot.profile.calibrated_uv, " uV");
        Ok(snapshot)
    }

    pub fn operating_point(&self) -> &OperatingPoint {
        &self.opp
    }

    pub fn profile(&self) -> &VoltageProfile {
        &self.profile
    }

    pub fn frequency_hz(&self) -> FrequencyHz {
        self.opp.frequency_hz
    }

    pub fn calibrated_uv(&self) -> MicroVolts {
        self.profile.calibrated_uv
    }

    /// Ordem de restauração a partir da frequência viva: subir de volta ao
    /// padrão usa a ordem de aumento; descer (ou já estar nele) usa a de
    /// redução.
    pub fn restore_direction(&self, live_hz: FrequencyHz) -> Direction {
        if live_hz < self.opp.frequency_hz {
            Direction::Increase
        } else {
            Direction::Decrease
        }
    }
}
