//! Property tests for relay state and button debounce

use proptest::prelude::*;

use relay_core::test_utils::gestures::GestureSim;
use relay_core::{PinLevel, Relay};

use crate::Bench;

#[derive(Debug, Clone, Copy)]
enum Op {
    Switch,
    Set(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Switch), any::<bool>().prop_map(Op::Set)]
}

proptest! {
    #[test]
    fn switch_alternates_from_low(n in 1usize..100) {
        let bench = Bench::new();
        let mut relay = Relay::new(&bench.input, &bench.clock, &bench.output).unwrap();

        for _ in 0..n {
            relay.switch_status().unwrap();
        }

        let writes = bench.writes();
        prop_assert_eq!(writes.len(), n);
        prop_assert_eq!(writes[0], PinLevel::High);
        for pair in writes.windows(2) {
            prop_assert_eq!(pair[1], pair[0].inverted());
        }
        prop_assert_eq!(relay.status(), n % 2 == 1);
    }

    #[test]
    fn status_always_matches_last_write(ops in prop::collection::vec(op(), 0..100)) {
        let bench = Bench::new();
        let mut relay = Relay::new(&bench.input, &bench.clock, &bench.output).unwrap();

        for op in &ops {
            match *op {
                Op::Switch => relay.switch_status().unwrap(),
                Op::Set(status) => relay.set_status(status).unwrap(),
            }
            prop_assert_eq!(bench.output.last_write(), Some(relay.level()));
            prop_assert_eq!(bench.output.level(), relay.level());
        }
        prop_assert_eq!(bench.writes().len(), ops.len());
    }

    #[test]
    fn chatter_inside_debounce_window_never_toggles(
        pulses in prop::collection::vec((1u64..50, 1u64..50), 1..40)
    ) {
        let bench = Bench::new();
        let mut relay = Relay::new(&bench.input, &bench.clock, &bench.output).unwrap();
        let sim = GestureSim::new(&bench.input, &bench.clock, &bench.config);
        let mut toggles = 0u32;

        for (pressed_ms, released_ms) in pulses {
            sim.press_for(pressed_ms, || toggles += relay.process().unwrap() as u32);
            sim.release_for(released_ms, || toggles += relay.process().unwrap() as u32);
        }
        sim.idle(|| toggles += relay.process().unwrap() as u32);

        prop_assert_eq!(toggles, 0);
        prop_assert!(!relay.status());
        prop_assert!(bench.writes().is_empty());
    }
}
