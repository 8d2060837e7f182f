//! Self-tests do controlador DVFS
//!
//! Rodam na ativação, antes do bind. Só cobrem funções puras: nada aqui
//! toca registro da plataforma.

use crate::dvfs::config::SafetyLimits;
use crate::dvfs::types::{Direction, TransitionRequest};
use crate::dvfs::validator::{clamp_voltage, frequency_in_window};
use crate::klib::test_framework::{run_test_suite, SuiteSummary, TestCase, TestResult};

const VALIDATOR_TESTS: &[TestCase] = &[
    TestCase::new("frequency_window", test_frequency_window),
    TestCase::new("voltage_clamp", test_voltage_clamp),
];

const REQUEST_TESTS: &[TestCase] = &[
    TestCase::new("parse_forms", test_parse_forms),
    TestCase::new("parse_malformed", test_parse_malformed),
    TestCase::new("direction", test_direction),
];

/// Executa todas as suites do controlador.
pub fn run_dvfs_tests() -> bool {
    crate::kinfo!("(Test) ┌─ Self-test DVFS ─────────────────────────");

    let suites = [
        run_test_suite("Validator", VALIDATOR_TESTS),
        run_test_suite("Request", REQUEST_TESTS),
    ];
    let clean = suites.iter().all(SuiteSummary::is_clean);

    if clean {
        crate::kinfo!("(Test) │  ✓ DVFS OK");
    } else {
        crate::kfail!("(Test) Self-test DVFS falhou");
    }
    crate::kinfo!("(Test) └───────────────────────────────────────────");
    clean
}

// =============================================================================
// VALIDATOR
// =============================================================================

fn test_frequency_window() -> TestResult {
    let limits = SafetyLimits::OMAP3630;

    if !frequency_in_window(&limits, limits.min_freq_hz) {
        return TestResult::Fail;
    }
    if !frequency_in_window(&limits, limits.max_freq_hz) {
        return TestResult::Fail;
    }
    if frequency_in_window(&limits, limits.min_freq_hz - 1) {
        return TestResult::Fail;
    }
    if frequency_in_window(&limits, limits.max_freq_hz + 1) {
        return TestResult::Fail;
    }

    TestResult::Pass
}

fn test_voltage_clamp() -> TestResult {
    let limits = SafetyLimits::OMAP3630;

    if clamp_voltage(&limits, 1_425_001) != 1_425_000 {
        return TestResult::Fail;
    }
    if clamp_voltage(&limits, 999_999) != 1_000_000 {
        return TestResult::Fail;
    }
    if clamp_voltage(&limits, 1_200_000) != 1_200_000 {
        return TestResult::Fail;
    }

    TestResult::Pass
}

// =============================================================================
// REQUEST
// =============================================================================

fn test_parse_forms() -> TestResult {
    match TransitionRequest::parse(b"1600000000 1300000") {
        Some(req) if req.frequency_hz == 1_600_000_000 && req.voltage_uv == Some(1_300_000) => {}
        _ => return TestResult::Fail,
    }
    match TransitionRequest::parse(b"800000000\n") {
        Some(req) if req.frequency_hz == 800_000_000 && req.voltage_uv.is_none() => {}
        _ => return TestResult::Fail,
    }

    TestResult::Pass
}

fn test_parse_malformed() -> TestResult {
    if TransitionRequest::parse(b"turbo").is_some() {
        return TestResult::Fail;
    }
    if TransitionRequest::parse(b"").is_some() {
        return TestResult::Fail;
    }

    TestResult::Pass
}

fn test_direction() -> TestResult {
    if Direction::between(1_000_000_000, 1_600_000_000) != Direction::Increase {
        return TestResult::Fail;
    }
    if Direction::between(1_600_000_000, 900_000_000) != Direction::Decrease {
        return TestResult::Fail;
    }

    TestResult::Pass
}
