//! End-to-end relay behaviour on mock hardware

use rstest::rstest;

use relay_core::test_utils::gestures::GestureSim;
use relay_core::{ButtonConfig, PinLevel, Relay};

use crate::{Bench, RELAY_PIN};

/// Non-qualifying input played before the real short press
#[derive(Debug, Clone, Copy)]
enum Noise {
    Nothing,
    TooShort,
    TooLong,
    Bouncing,
}

#[test]
fn test_reference_board_scenario() {
    let bench = Bench::new();
    let mut relay = Relay::new(&bench.input, &bench.clock, &bench.output).unwrap();
    let sim = GestureSim::new(&bench.input, &bench.clock, &bench.config);

    assert_eq!(bench.output.pin(), RELAY_PIN);
    assert!(!relay.status());
    assert_eq!(bench.output.level(), PinLevel::Low);

    relay.switch_status().unwrap();
    assert!(relay.status());
    assert_eq!(bench.output.level(), PinLevel::High);

    sim.short_press(|| {
        relay.process().unwrap();
    });
    assert!(!relay.status());
    assert_eq!(bench.output.level(), PinLevel::Low);

    relay.set_status(true).unwrap();
    assert!(relay.status());
    assert_eq!(bench.output.level(), PinLevel::High);

    assert_eq!(bench.writes(), vec![PinLevel::High, PinLevel::Low, PinLevel::High]);
}

#[test]
fn test_set_status_true_twice_writes_high_twice() {
    let bench = Bench::new();
    let mut relay = Relay::new(&bench.input, &bench.clock, &bench.output).unwrap();

    relay.set_status(true).unwrap();
    relay.set_status(true).unwrap();

    assert!(relay.status());
    assert_eq!(bench.writes(), vec![PinLevel::High, PinLevel::High]);
}

#[test]
fn test_set_status_false_from_off_still_writes() {
    let bench = Bench::new();
    let mut relay = Relay::new(&bench.input, &bench.clock, &bench.output).unwrap();

    relay.set_status(false).unwrap();

    assert!(!relay.status());
    assert_eq!(bench.writes(), vec![PinLevel::Low]);
}

#[test]
fn test_process_without_button_activity_is_silent() {
    let bench = Bench::new();
    let mut relay = Relay::new(&bench.input, &bench.clock, &bench.output).unwrap();
    relay.set_status(true).unwrap();
    bench.output.clear_writes();

    let sim = GestureSim::new(&bench.input, &bench.clock, &bench.config);
    sim.release_for(5_000, || {
        assert!(!relay.process().unwrap());
    });

    assert!(relay.status());
    assert!(bench.writes().is_empty());
}

#[rstest]
#[case::clean(Noise::Nothing)]
#[case::too_short(Noise::TooShort)]
#[case::too_long(Noise::TooLong)]
#[case::bouncing(Noise::Bouncing)]
fn test_short_release_toggles_exactly_once(#[case] noise: Noise) {
    let bench = Bench::new();
    let mut relay = Relay::new(&bench.input, &bench.clock, &bench.output).unwrap();
    let sim = GestureSim::new(&bench.input, &bench.clock, &bench.config);
    let mut toggles = 0u32;

    match noise {
        Noise::Nothing => {}
        Noise::TooShort => sim.tap(10, || toggles += relay.process().unwrap() as u32),
        Noise::TooLong => sim.tap(1_500, || toggles += relay.process().unwrap() as u32),
        Noise::Bouncing => sim.bounce(8, 5, || toggles += relay.process().unwrap() as u32),
    }
    sim.idle(|| toggles += relay.process().unwrap() as u32);
    assert_eq!(toggles, 0, "{:?} must not toggle", noise);

    sim.short_press(|| toggles += relay.process().unwrap() as u32);

    assert_eq!(toggles, 1);
    assert!(relay.status());
    assert_eq!(bench.writes(), vec![PinLevel::High]);
}

#[test]
fn test_repeated_short_presses_alternate() {
    let bench = Bench::new();
    let mut relay = Relay::new(&bench.input, &bench.clock, &bench.output).unwrap();
    let sim = GestureSim::new(&bench.input, &bench.clock, &bench.config);

    for _ in 0..4 {
        sim.short_press(|| {
            relay.process().unwrap();
        });
    }

    assert!(!relay.status());
    assert_eq!(
        bench.writes(),
        vec![PinLevel::High, PinLevel::Low, PinLevel::High, PinLevel::Low]
    );
}

#[test]
fn test_active_high_button_wiring() {
    let config = ButtonConfig::new(20, 600, false).unwrap();
    let bench = Bench::with_config(config);
    let mut relay =
        Relay::with_config(&bench.input, &bench.clock, &bench.output, bench.config).unwrap();
    let sim = GestureSim::new(&bench.input, &bench.clock, &bench.config);

    assert_eq!(bench.input.level(), PinLevel::Low);
    sim.short_press(|| {
        relay.process().unwrap();
    });

    assert!(relay.status());
}

#[test]
fn test_failed_write_during_process_keeps_state_in_sync() {
    let bench = Bench::new();
    let mut relay = Relay::new(&bench.input, &bench.clock, &bench.output).unwrap();
    let sim = GestureSim::new(&bench.input, &bench.clock, &bench.config);

    bench.output.set_failing(true);
    let mut errors = 0;
    sim.short_press(|| {
        if relay.process().is_err() {
            errors += 1;
        }
    });

    assert_eq!(errors, 1);
    assert!(!relay.status());
    assert_eq!(bench.output.level(), PinLevel::Low);
}
