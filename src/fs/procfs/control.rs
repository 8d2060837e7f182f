//! # Control Surface
//!
//! `/proc/opptimizer`:
//! - **read**: dump em texto do OPP atual, do perfil de voltagem, dos
//!   espelhos da policy e dos padrões capturados. Sem lock.
//! - **write**: `<freq_hz>` ou `<freq_hz> <volt_uv>`. Sempre devolve o
//!   tamanho recebido, exceto em `ENOSPC`, `EFAULT` e `ENODEV`.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use core::fmt::Write;

use super::{ProcFileOps, UserSlice};
use crate::dvfs::config::VERSION;
use crate::dvfs::types::{TransitionOutcome, TransitionRequest, VoltageProfile};
use crate::dvfs::DvfsController;
use crate::sys::{DvfsError, Errno, PAGE_SIZE};

/// Superfície de controle de um `DvfsController`.
pub struct ControlSurface {
    controller: Arc<DvfsController>,
}

impl ControlSurface {
    pub fn new(controller: Arc<DvfsController>) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &Arc<DvfsController> {
        &self.controller
    }

    /// Monta o dump completo, limitado a uma página.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Write em String não falha.
        let _ = self.render_into(&mut out);
        truncate_to_page(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) -> core::fmt::Result {
        let controller = &self.controller;
        let ops = controller.ops();
        let domain = &controller.config().domain;

        let Some(opp) = ops.highest_opp(domain.opp_class) else {
            return writeln!(out, "Error: Could not find OPP");
        };
        let Some(vdata) = ops.volt_data(domain.vdd, ops.opp_voltage(&opp)) else {
            return writeln!(out, "Error: Could not get voltage data");
        };

        // Leituras individuais sem lock: uma escrita concorrente pode
        // aparecer pela metade.
        let limits = controller.policy_limits();
        writeln!(out, "opp rate: {}", opp.rate())?;
        writeln!(out, "freq table [0]: {}", limits.table_khz)?;
        writeln!(out, "policy->max: {}", limits.max_khz)?;
        writeln!(out, "cpuinfo.max_freq: {}", limits.cpuinfo_max_khz)?;
        writeln!(out, "user_policy.max: {}", limits.user_max_khz)?;
        writeln!(
            out,
            "omap_voltageprocessor_get_voltage: {}",
            ops.measured_voltage(domain.vp)
        )?;

        let live = VoltageProfile::from_raw(&vdata.read_raw());
        render_profile(out, "vdata->", &live)?;

        let snapshot = controller.snapshot();
        render_profile(out, "Default_vdata->", snapshot.profile())?;
        writeln!(out, "Default max rate: {}", snapshot.frequency_hz())?;

        writeln!(out, "v{}", VERSION)
    }
}

fn render_profile(out: &mut String, prefix: &str, p: &VoltageProfile) -> core::fmt::Result {
    writeln!(out, "{}u_volt_nominal: {:>10}", prefix, p.nominal_uv)?;
    writeln!(out, "{}u_volt_dyn_nominal: {:>10}", prefix, p.dyn_nominal_uv)?;
    writeln!(out, "{}u_volt_dyn_margin: {:>10}", prefix, p.dyn_margin_uv)?;
    writeln!(out, "{}u_volt_calib: {:>10}", prefix, p.calibrated_uv)?;
    writeln!(out, "{}sr_nvalue: 0x{:08x}", prefix, p.sr_nvalue)?;
    writeln!(out, "{}sr_errminlimit: {}", prefix, p.sr_errminlimit)?;
    writeln!(out, "{}vp_errorgain: 0x{:08x}", prefix, p.vp_errorgain)?;
    writeln!(out, "{}sr_error: 0x{:08x}", prefix, p.sr_error)?;
    writeln!(out, "{}sr_val: 0x{:08x}", prefix, p.sr_val)?;
    writeln!(out, "{}abb: {:>2}", prefix, if p.abb { "yes" } else { "no" })
}

/// Corta na última fronteira de caractere dentro de uma página.
fn truncate_to_page(out: &mut String) {
    if out.len() <= PAGE_SIZE {
        return;
    }
    let mut end = PAGE_SIZE;
    while !out.is_char_boundary(end) {
        end -= 1;
    }
    out.truncate(end);
}

impl ProcFileOps for ControlSurface {
    fn read(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Errno> {
        let text = self.render();
        let bytes = text.as_bytes();

        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        let Some(rest) = bytes.get(start..) else {
            return Ok(0);
        };
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        Ok(n)
    }

    fn write(&self, src: &dyn UserSlice) -> Result<usize, Errno> {
        self.consume(src).map_err(DvfsError::errno)
    }
}

impl ControlSurface {
    fn consume(&self, src: &dyn UserSlice) -> Result<usize, DvfsError> {
        let len = src.len();
        if len == 0 || len >= PAGE_SIZE {
            crate::kwarn!("(Proc) Escrita vazia ou maior que uma página: ", len, " bytes");
            return Err(DvfsError::TooLarge);
        }

        let mut input = vec![0u8; len];
        if src.copy_to(&mut input).is_err() {
            crate::kerror!("(Proc) Falha ao copiar buffer do chamador");
            return Err(DvfsError::CopyFault);
        }

        let Some(request) = TransitionRequest::parse(&input) else {
            crate::kwarn!("(Proc) Entrada inválida ignorada, bytes: ", len);
            return Ok(len);
        };

        if let TransitionOutcome::Applied(report) = self.controller.apply(&request)? {
            crate::kdebug!("(Proc) Fases executadas: ", report.phases.bits());
        }
        Ok(len)
    }
}
