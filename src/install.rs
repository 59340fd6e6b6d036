//! Installation onto a systemd host.
//!
//! Lays out, under an optional staging prefix:
//!
//! | Path                                         | Content                        |
//! |----------------------------------------------|--------------------------------|
//! | `usr/bin/lablights`                          | copy of the running executable |
//! | `usr/lib/systemd/system/lablights.service`   | unit running `lablights run`   |
//! | `etc/lablights.json`                         | default config (kept if present unless reset) |

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;

/// Config location on the installed system.
pub const CONFIG_PATH: &str = "/etc/lablights.json";

const BIN_PATH: &str = "usr/bin/lablights";
const UNIT_PATH: &str = "usr/lib/systemd/system/lablights.service";
const CONFIG_REL_PATH: &str = "etc/lablights.json";

/// systemd unit text for a binary installed at `bin`.
pub fn service_unit(bin: &Path, config: &Path) -> String {
    format!(
        "[Unit]\n\
         Description=LED Lighting Controller\n\
         \n\
         [Service]\n\
         ExecStart={} --config {} run\n\
         Restart=on-failure\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n",
        bin.display(),
        config.display()
    )
}

/// What [`install`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    pub binary: PathBuf,
    pub unit: PathBuf,
    pub config: PathBuf,
    /// `false` when an existing config was left alone.
    pub config_written: bool,
}

/// Install `exe` and its unit/config files under `prefix`.
pub fn install(exe: &Path, prefix: &Path, reset: bool) -> Result<Installed> {
    let binary = prefix.join(BIN_PATH);
    let unit = prefix.join(UNIT_PATH);
    let config = prefix.join(CONFIG_REL_PATH);

    for path in [&binary, &unit, &config] {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
    }

    fs::copy(exe, &binary)
        .with_context(|| format!("copy {} to {}", exe.display(), binary.display()))?;
    set_mode(&binary, 0o755)?;
    info!("installed binary {}", binary.display());

    let installed_bin = Path::new("/").join(BIN_PATH);
    fs::write(&unit, service_unit(&installed_bin, Path::new(CONFIG_PATH)))
        .with_context(|| format!("write {}", unit.display()))?;
    set_mode(&unit, 0o644)?;
    info!("installed service unit {}", unit.display());

    let config_written = reset || !config.exists();
    if config_written {
        let text = Config::default()
            .to_json()
            .context("serialise default config")?;
        fs::write(&config, text).with_context(|| format!("write {}", config.display()))?;
        set_mode(&config, 0o644)?;
        info!("wrote default config {}", config.display());
    } else {
        info!("kept existing config {}", config.display());
    }

    Ok(Installed {
        binary,
        unit,
        config,
        config_written,
    })
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("chmod {}", path.display()))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
