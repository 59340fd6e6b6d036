//! Fuzz target: configuration loading
//!
//! Feeds arbitrary bytes to `Config::from_json` and verifies:
//! - No panics on malformed or adversarial JSON
//! - Any accepted config re-serializes to a document that loads again
//! - Any accepted config starts a controller without a fault
//!
//! cargo fuzz run fuzz_config

#![no_main]

use libfuzzer_sys::fuzz_target;
use lablights::app::ports::{Level, NullSink, PinId, PinPort};
use lablights::app::service::Controller;
use lablights::config::Config;
use lablights::error::PinError;

struct FloatingPins;

impl PinPort for FloatingPins {
    fn read(&mut self, _pin: PinId) -> Result<Level, PinError> {
        Ok(Level::High)
    }

    fn write(&mut self, _pin: PinId, _level: Level) -> Result<(), PinError> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok((config, _)) = Config::from_json(text) else {
        return;
    };

    let text = config.to_json().expect("accepted config must serialise");
    let (again, _) = Config::from_json(&text).expect("re-serialized config must load");
    assert_eq!(again, config);

    let mut ctl = Controller::new(&config, FloatingPins);
    ctl.start(core::time::Duration::ZERO, &mut NullSink)
        .expect("validated config must start");
    for t in 1..=5u64 {
        let now = core::time::Duration::from_millis(t.saturating_mul(config.poll_interval_ms));
        ctl.tick(now, &mut NullSink).expect("validated config must tick");
    }
});
