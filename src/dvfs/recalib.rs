//! Gatilho de recalibração do SmartReflex.

use crate::dvfs::types::PhaseFlags;
use crate::hal::PlatformOps;

/// Reset + recalibração do domínio `vdd`. O retorno da plataforma não é
/// observado.
pub fn reset_calibration(ops: &PlatformOps, vdd: u32, phases: &mut PhaseFlags) {
    crate::kdebug!("(Recalib) Reset + recalibração do vdd ", vdd);
    ops.reset_calibration(vdd);
    phases.insert(PhaseFlags::RECALIBRATED);
}
