//! State Machine Tests
//!
//! These tests verify:
//! - External state names and parsing
//! - Legal transitions and the guards on illegal ones
//! - Dispatch eligibility in each state

use birdctl::session::{ConnectionState, StateMachine};
use birdctl::BirdError;

fn machine_in(state: &str) -> StateMachine {
    let mut machine = StateMachine::new();
    machine.force(state).unwrap();
    machine
}

// =============================================================================
// Naming Tests
// =============================================================================

#[test]
fn test_names_round_trip() {
    for state in ConnectionState::ALL {
        assert_eq!(state.name().parse::<ConnectionState>().unwrap(), state);
        assert_eq!(state.to_string(), state.name());
    }
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!("READY".parse::<ConnectionState>().unwrap(), ConnectionState::Ready);
    assert_eq!("Restrict".parse::<ConnectionState>().unwrap(), ConnectionState::Restrict);
}

#[test]
fn test_invalid_name_is_rejected() {
    let err = "bogus".parse::<ConnectionState>().unwrap_err();
    assert!(matches!(err, BirdError::InvalidState(ref name) if name == "bogus"));
    assert_eq!(err.to_string(), "\"bogus\" is an invalid state");
}

#[test]
fn test_force_invalid_keeps_state() {
    let mut machine = machine_in("ready");
    assert!(machine.force("3").is_err());
    assert!(machine.force("").is_err());
    assert_eq!(machine.current(), ConnectionState::Ready);
}

// =============================================================================
// Transition Tests
// =============================================================================

#[test]
fn test_starts_closed() {
    assert_eq!(StateMachine::new().current(), ConnectionState::Closed);
    assert_eq!(ConnectionState::default(), ConnectionState::Closed);
}

#[test]
fn test_full_lifecycle() {
    let mut machine = StateMachine::new();

    machine.connected();
    assert_eq!(machine.current(), ConnectionState::Open);

    assert!(machine.welcomed());
    assert_eq!(machine.current(), ConnectionState::Restrict);

    machine.dispatched();
    assert_eq!(machine.current(), ConnectionState::Waiting);

    assert!(machine.completed());
    assert_eq!(machine.current(), ConnectionState::Ready);

    machine.dispatched();
    assert!(machine.completed());

    machine.closed();
    assert_eq!(machine.current(), ConnectionState::Closed);
}

#[test]
fn test_welcome_only_from_open() {
    for name in ["closed", "restrict", "ready", "waiting"] {
        let mut machine = machine_in(name);
        assert!(!machine.welcomed(), "welcome accepted in {}", name);
        assert_eq!(machine.current().name(), name);
    }
}

#[test]
fn test_completion_only_from_waiting() {
    for name in ["closed", "open", "restrict", "ready"] {
        let mut machine = machine_in(name);
        assert!(!machine.completed(), "completion accepted in {}", name);
        assert_eq!(machine.current().name(), name);
    }
}

#[test]
fn test_close_from_any_state() {
    for state in ConnectionState::ALL {
        let mut machine = machine_in(state.name());
        machine.closed();
        assert_eq!(machine.current(), ConnectionState::Closed);
    }
}

// =============================================================================
// Dispatch Eligibility Tests
// =============================================================================

#[test]
fn test_ready_dispatches_anything() {
    let machine = machine_in("ready");
    assert!(machine.can_dispatch("show status"));
    assert!(machine.can_dispatch("restrict"));
}

#[test]
fn test_restrict_dispatches_only_handshake() {
    let machine = machine_in("restrict");
    assert!(machine.can_dispatch("restrict"));
    assert!(!machine.can_dispatch("show status"));
    assert!(!machine.can_dispatch("restrict "));
    assert!(!machine.can_dispatch("RESTRICT"));
}

#[test]
fn test_other_states_dispatch_nothing() {
    for name in ["closed", "open", "waiting"] {
        let machine = machine_in(name);
        assert!(!machine.can_dispatch("restrict"));
        assert!(!machine.can_dispatch("show status"));
    }
}
