//! End-to-end rule scenarios: scripted switch levels in, light writes out.
//!
//! Every test builds a controller from a JSON config, starts it at t=0 and
//! then ticks it every 10 ms while the test flips raw pin levels.

use std::time::Duration;

use lablights::app::ports::Level;
use lablights::app::service::{Controller, TickReport};
use lablights::config::Config;

use crate::mock_hw::{MockPins, Recorded, RecordingSink};

const SW1: u8 = 3;
const SW2: u8 = 5;
const LED1: u8 = 8;
const LED2: u8 = 10;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Two switches on pins 3/5, two lights on 8/10, 25 ms debounce.
fn controller(actions: &str) -> Controller<MockPins> {
    let json = format!(
        r#"{{
            "debounce_ms": 25,
            "poll_interval_ms": 10,
            "switches": [
                {{ "name": "SW1", "pin": 3 }},
                {{ "name": "SW2", "pin": 5 }}
            ],
            "lights": [
                {{ "name": "LED1", "pin": 8 }},
                {{ "name": "LED2", "pin": 10 }}
            ],
            "actions": {actions}
        }}"#
    );
    let (config, warnings) = Config::from_json(&json).unwrap();
    assert!(warnings.is_empty(), "{warnings:?}");

    let mut ctl = Controller::new(&config, MockPins::new());
    ctl.start(ms(0), &mut RecordingSink::new()).unwrap();
    ctl.pins_mut().clear_calls();
    ctl
}

/// Tick every 10 ms over `(from, to]`, collecting each report.
fn run(
    ctl: &mut Controller<MockPins>,
    sink: &mut RecordingSink,
    from: u64,
    to: u64,
) -> Vec<(u64, TickReport)> {
    (from / 10 + 1..=to / 10)
        .map(|k| {
            let t = k * 10;
            (t, ctl.tick(ms(t), sink).unwrap())
        })
        .collect()
}

fn press(ctl: &mut Controller<MockPins>, pin: u8) {
    ctl.pins_mut().set_level(pin, Level::Low);
}

fn release(ctl: &mut Controller<MockPins>, pin: u8) {
    ctl.pins_mut().set_level(pin, Level::High);
}

const LONG_PRESS_TOGGLES_LED1: &str = r#"[
    {
        "lights_toggle": ["LED1"],
        "matchers": [ { "switches_pressed": ["SW1"], "min_duration_ms": 1000 } ]
    }
]"#;

#[test]
fn long_press_toggles_once_on_release() {
    let mut ctl = controller(LONG_PRESS_TOGGLES_LED1);
    let mut sink = RecordingSink::new();

    press(&mut ctl, SW1);
    let held = run(&mut ctl, &mut sink, 0, 1190);
    assert!(held.iter().all(|(_, r)| r.fired.is_empty()), "nothing fires while held");
    assert!(ctl.state().switch_on("SW1"));

    release(&mut ctl, SW1);
    let report = ctl.tick(ms(1200), &mut sink).unwrap();
    assert_eq!(report.fired, vec![0]);
    // Press accepted at t=30, release at t=1200.
    assert_eq!(ctl.state().pressed_for("SW1"), ms(1170));
    assert!(ctl.state().light_on("LED1"));
    assert_eq!(ctl.pins().writes_to(LED1), vec![Level::High]);

    let after = run(&mut ctl, &mut sink, 1200, 1500);
    assert!(after.iter().all(|(_, r)| r.fired.is_empty()), "pulse lasts one tick");
    assert_eq!(ctl.state().pressed_for("SW1"), Duration::ZERO);
    assert_eq!(ctl.pins().writes().len(), 1);

    assert!(sink.events.contains(&Recorded::Released("SW1".into(), ms(1170))));
}

#[test]
fn short_press_is_below_the_minimum() {
    let mut ctl = controller(LONG_PRESS_TOGGLES_LED1);
    let mut sink = RecordingSink::new();

    press(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 0, 400);
    release(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 400, 600);

    assert!(sink.fired().is_empty());
    assert!(sink.events.contains(&Recorded::Released("SW1".into(), ms(380))));
    assert!(ctl.pins().writes().is_empty());
}

#[test]
fn two_long_presses_restore_the_light() {
    let mut ctl = controller(LONG_PRESS_TOGGLES_LED1);
    let mut sink = RecordingSink::new();

    for start in [0, 2000] {
        press(&mut ctl, SW1);
        run(&mut ctl, &mut sink, start, start + 1200);
        release(&mut ctl, SW1);
        run(&mut ctl, &mut sink, start + 1200, start + 2000);
    }

    assert_eq!(sink.fired(), vec![0, 0]);
    assert!(!ctl.state().light_on("LED1"));
    assert_eq!(ctl.pins().writes_to(LED1), vec![Level::High, Level::Low]);
}

#[test]
fn later_action_overrides_earlier_one() {
    let mut ctl = controller(
        r#"[
            { "lights_on":  ["LED1"], "matchers": [ { "switches_on": ["SW1"] } ] },
            { "lights_off": ["LED1"], "matchers": [ { "switches_on": ["SW1"] } ] }
        ]"#,
    );
    let mut sink = RecordingSink::new();

    press(&mut ctl, SW1);
    let reports = run(&mut ctl, &mut sink, 0, 30);

    let (t, report) = reports.last().unwrap();
    assert_eq!(*t, 30);
    assert_eq!(report.fired, vec![0, 1]);
    assert!(!ctl.state().light_on("LED1"));
    assert_eq!(ctl.pins().writes_to(LED1), vec![Level::High, Level::Low]);
}

#[test]
fn matchers_are_or_ed_and_fire_the_action_once() {
    let mut ctl = controller(
        r#"[
            {
                "lights_toggle": ["LED2"],
                "matchers": [
                    { "switches_on": ["SW1"] },
                    { "switches_on": ["SW2"] }
                ]
            }
        ]"#,
    );
    let mut sink = RecordingSink::new();

    press(&mut ctl, SW1);
    press(&mut ctl, SW2);
    let report = run(&mut ctl, &mut sink, 0, 30).pop().unwrap().1;

    assert_eq!(report.fired, vec![0]);
    assert_eq!(ctl.pins().writes_to(LED2), vec![Level::High]);
}

#[test]
fn held_switch_keeps_a_level_action_firing() {
    // lights_on skips lights that are already on, so only one write happens.
    let mut ctl = controller(
        r#"[ { "lights_on": ["LED1"], "matchers": [ { "switches_on": ["SW1"] } ] } ]"#,
    );
    let mut sink = RecordingSink::new();

    press(&mut ctl, SW1);
    let reports = run(&mut ctl, &mut sink, 0, 200);

    let firing = reports.iter().filter(|(_, r)| r.fired == vec![0]).count();
    assert_eq!(firing, 18, "fires on every tick from t=30");
    assert_eq!(ctl.pins().writes(), vec![(LED1, Level::High)]);
}

#[test]
fn bounce_shorter_than_debounce_is_ignored() {
    let mut ctl = controller(
        r#"[ { "lights_on": ["LED1"], "matchers": [ { "switches_on": ["SW1"] } ] } ]"#,
    );
    let mut sink = RecordingSink::new();

    // Accepted press at t=30, accepted release at t=60.
    press(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 0, 30);
    release(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 30, 60);
    assert!(!ctl.state().switch_on("SW1"));
    ctl.pins_mut().clear_calls();

    // A single-tick blip, 10 ms after the accepted release.
    press(&mut ctl, SW1);
    let blip = ctl.tick(ms(70), &mut sink).unwrap();
    release(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 70, 200);

    assert!(blip.fired.is_empty());
    assert!(!ctl.state().switch_on("SW1"));
    assert!(ctl.pins().writes().is_empty());
}

#[test]
fn press_window_selects_between_actions() {
    let mut ctl = controller(
        r#"[
            {
                "lights_toggle": ["LED1"],
                "matchers": [ { "switches_pressed": ["SW1"], "max_duration_ms": 1000 } ]
            },
            {
                "lights_toggle": ["LED2"],
                "matchers": [ { "switches_pressed": ["SW1"], "min_duration_ms": 1000 } ]
            }
        ]"#,
    );
    let mut sink = RecordingSink::new();

    press(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 0, 300);
    release(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 300, 500);
    assert_eq!(sink.fired(), vec![0]);

    press(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 500, 2000);
    release(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 2000, 2100);
    assert_eq!(sink.fired(), vec![0, 1]);

    assert!(ctl.state().light_on("LED1"));
    assert!(ctl.state().light_on("LED2"));
}

#[test]
fn light_conditions_use_the_pre_apply_snapshot() {
    // Short press: both off -> both on, otherwise -> both off.
    let mut ctl = controller(
        r#"[
            {
                "lights_on": ["LED1", "LED2"],
                "matchers": [ { "switches_pressed": ["SW1"], "lights_off": ["LED1", "LED2"] } ]
            },
            {
                "lights_off": ["LED1", "LED2"],
                "matchers": [
                    { "switches_pressed": ["SW1"], "lights_on": ["LED1"] },
                    { "switches_pressed": ["SW1"], "lights_on": ["LED2"] }
                ]
            }
        ]"#,
    );
    let mut sink = RecordingSink::new();

    press(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 0, 100);
    release(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 100, 200);
    assert_eq!(sink.fired(), vec![0], "second action must not see the new lights");
    assert!(ctl.state().light_on("LED1") && ctl.state().light_on("LED2"));

    press(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 200, 300);
    release(&mut ctl, SW1);
    run(&mut ctl, &mut sink, 300, 400);
    assert_eq!(sink.fired(), vec![0, 1]);
    assert!(!ctl.state().light_on("LED1") && !ctl.state().light_on("LED2"));
}
