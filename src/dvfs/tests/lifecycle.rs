//! Ativação e desativação do módulo

use std::sync::Arc;

use super::board::{Board, FakeProcFs, FakeProvider, DEFAULT_RATE};
use super::Rig;
use crate::dvfs::config::{DvfsConfig, PROC_ENTRY_MODE, PROC_ENTRY_NAME};
use crate::hal::platform::REQUIRED_ROUTINES;
use crate::module::{ModuleState, OppModule};
use crate::sys::{DvfsError, Errno, LookupTarget};

fn init(provider: &FakeProvider, procfs: &Arc<FakeProcFs>) -> Result<OppModule, DvfsError> {
    OppModule::init(provider, procfs.clone(), DvfsConfig::default())
}

#[test]
fn test_activation_publishes_entry() {
    let rig = Rig::new();

    assert_eq!(rig.module.state(), ModuleState::Active);
    assert_eq!(rig.procfs.names(), [PROC_ENTRY_NAME]);
    assert_eq!(rig.procfs.mode(PROC_ENTRY_NAME), Some(0o644));
    assert_eq!(PROC_ENTRY_MODE, 0o644);
}

#[test]
fn test_activation_does_not_touch_hardware() {
    let board = Board::new();
    let before = board.state();
    let procfs = FakeProcFs::new();

    let module = init(&FakeProvider::new(&board), &procfs).unwrap();

    assert_eq!(board.state(), before);
    drop(module);
}

#[test]
fn test_each_missing_routine_aborts_activation() {
    for name in REQUIRED_ROUTINES {
        let board = Board::new();
        let before = board.state();
        let procfs = FakeProcFs::new();
        let mut provider = FakeProvider::new(&board);
        provider.missing.push(name);

        let result = init(&provider, &procfs);

        assert_eq!(result.err(), Some(DvfsError::Resolution(name)));
        assert!(procfs.names().is_empty());
        assert_eq!(board.state(), before);
        assert!(board.events().is_empty());
    }
}

#[test]
fn test_mistyped_routine_counts_as_missing() {
    let board = Board::new();
    let procfs = FakeProcFs::new();
    let mut provider = FakeProvider::new(&board);
    provider.mistyped.push("omap_voltage_scale");

    let result = init(&provider, &procfs);

    assert_eq!(result.err(), Some(DvfsError::Resolution("omap_voltage_scale")));
    assert!(procfs.names().is_empty());
}

#[test]
fn test_missing_policy_aborts_activation() {
    let board = Board::new();
    let procfs = FakeProcFs::new();
    board.with_knobs(|k| k.null_policy = true);

    let result = init(&FakeProvider::new(&board), &procfs);

    assert_eq!(result.err(), Some(DvfsError::Lookup(LookupTarget::PolicyLimits)));
    assert!(procfs.names().is_empty());
}

#[test]
fn test_missing_freq_table_aborts_activation() {
    let board = Board::new();
    let procfs = FakeProcFs::new();
    board.with_knobs(|k| k.null_table = true);

    let result = init(&FakeProvider::new(&board), &procfs);

    assert_eq!(result.err(), Some(DvfsError::Lookup(LookupTarget::PolicyLimits)));
}

#[test]
fn test_missing_opp_or_profile_aborts_activation() {
    let board = Board::new();
    let procfs = FakeProcFs::new();

    board.with_knobs(|k| k.null_opp = true);
    let result = init(&FakeProvider::new(&board), &procfs);
    assert_eq!(result.err(), Some(DvfsError::Lookup(LookupTarget::OperatingPoint)));

    board.with_knobs(|k| {
        k.null_opp = false;
        k.null_vdata = true;
    });
    let result = init(&FakeProvider::new(&board), &procfs);
    assert_eq!(result.err(), Some(DvfsError::Lookup(LookupTarget::VoltageProfile)));
    assert!(procfs.names().is_empty());
}

#[test]
fn test_publish_failure_aborts_activation() {
    let board = Board::new();
    let procfs = FakeProcFs::failing(Errno::ENOMEM);

    let result = init(&FakeProvider::new(&board), &procfs);

    assert_eq!(result.err(), Some(DvfsError::Publish(Errno::ENOMEM)));
    assert_eq!(DvfsError::Publish(Errno::ENOMEM).errno(), Errno::ENOMEM);
}

#[test]
fn test_exit_unpublishes_and_restores() {
    let mut rig = Rig::new();
    let before = rig.board.state();
    rig.echo("1700000000 1400000").unwrap();

    rig.module.exit();

    assert_eq!(rig.module.state(), ModuleState::Unloaded);
    assert!(rig.procfs.names().is_empty());
    assert!(rig.module.surface().is_none());
    assert_eq!(rig.board.state(), before);
}

#[test]
fn test_exit_is_idempotent() {
    let mut rig = Rig::new();
    rig.echo("1600000000").unwrap();

    rig.module.exit();
    let events = rig.board.events().len();
    rig.module.exit();

    assert_eq!(rig.board.events().len(), events);
    assert_eq!(rig.module.state(), ModuleState::Unloaded);
}

#[test]
fn test_drop_restores_defaults() {
    let board = Board::new();
    let procfs = FakeProcFs::new();
    let module = init(&FakeProvider::new(&board), &procfs).unwrap();

    procfs.echo(PROC_ENTRY_NAME, "1500000000 1350000").unwrap();
    assert_eq!(board.top_rate(), 1_500_000_000);

    drop(module);

    assert_eq!(board.top_rate(), DEFAULT_RATE);
    assert!(procfs.names().is_empty());
}

#[test]
fn test_exit_with_lookup_failure_still_unloads() {
    let mut rig = Rig::new();
    rig.echo("1600000000 1300000").unwrap();
    rig.board.with_knobs(|k| k.null_vdata = true);

    rig.module.exit();

    assert_eq!(rig.module.state(), ModuleState::Unloaded);
    assert!(rig.procfs.names().is_empty());
    // Hardware fica no último valor aplicado
    assert_eq!(rig.board.top_rate(), 1_600_000_000);
    assert_eq!(rig.board.measured(), 1_300_000);
}

#[test]
fn test_writes_after_exit_reach_nothing() {
    let mut rig = Rig::new();
    rig.module.exit();

    assert_eq!(rig.echo("1600000000"), Err(Errno::ENOENT));
}

#[test]
fn test_transitions_are_counted() {
    let rig = Rig::new();
    let controller = rig.controller();

    rig.echo("1600000000").unwrap();
    rig.echo("100").unwrap();
    rig.echo("nope").unwrap();
    rig.echo("1200000000 1200000").unwrap();

    assert_eq!(controller.transitions(), 2);
}
