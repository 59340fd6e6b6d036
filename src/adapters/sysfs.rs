//! Linux sysfs GPIO adapter.
//!
//! Implements [`PinPort`] on top of the kernel's `/sys/class/gpio`
//! interface.  Pins are addressed by physical header number and translated
//! to BCM numbers through [`crate::pins`].
//!
//! ```text
//! <root>/export            ← "<bcm>"         (only if gpio<bcm>/ is absent)
//! <root>/gpio<bcm>/direction ← "in" | "out"
//! <root>/gpio<bcm>/value     ↔ "0" | "1"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::app::ports::{Level, PinId, PinPort};
use crate::error::{PinError, PinErrorKind};
use crate::pins::bcm_for_header;

pub const DEFAULT_GPIO_ROOT: &str = "/sys/class/gpio";

pub struct SysfsPins {
    root: PathBuf,
}

impl Default for SysfsPins {
    fn default() -> Self {
        Self::new(DEFAULT_GPIO_ROOT)
    }
}

impl SysfsPins {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bcm(pin: PinId) -> Result<u32, PinError> {
        bcm_for_header(pin).ok_or_else(|| PinError::new(pin, PinErrorKind::Unmapped))
    }

    fn gpio_dir(&self, pin: PinId) -> Result<PathBuf, PinError> {
        Ok(self.root.join(format!("gpio{}", Self::bcm(pin)?)))
    }

    fn setup(&mut self, pin: PinId, direction: &str) -> Result<(), PinError> {
        let bcm = Self::bcm(pin)?;
        let dir = self.gpio_dir(pin)?;

        if !dir.exists() {
            debug!("exporting GPIO{} (header pin {})", bcm, pin);
            fs::write(self.root.join("export"), bcm.to_string())
                .map_err(|e| PinError::io(pin, &e))?;
        }

        fs::write(dir.join("direction"), direction).map_err(|e| PinError::io(pin, &e))
    }
}

impl PinPort for SysfsPins {
    fn read(&mut self, pin: PinId) -> Result<Level, PinError> {
        let path = self.gpio_dir(pin)?.join("value");
        let raw = fs::read_to_string(&path).map_err(|e| PinError::io(pin, &e))?;
        match raw.trim() {
            "0" => Ok(Level::Low),
            "1" => Ok(Level::High),
            other => Err(PinError::new(
                pin,
                PinErrorKind::InvalidValue(other.to_owned()),
            )),
        }
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<(), PinError> {
        let path = self.gpio_dir(pin)?.join("value");
        let text = if level.is_high() { "1" } else { "0" };
        fs::write(&path, text).map_err(|e| PinError::io(pin, &e))
    }

    fn configure_input(&mut self, pin: PinId) -> Result<(), PinError> {
        self.setup(pin, "in")
    }

    fn configure_output(&mut self, pin: PinId) -> Result<(), PinError> {
        self.setup(pin, "out")
    }
}
