//! Command-line configuration.
//!
//! Flags: `--fallback=torus|none`, `--normalize=on|off`, `--torus=SEGMENTSxSIDES`,
//! `--write-torus=PATH`. Everything else is an OBJ path.

use std::path::PathBuf;

use asset::TorusParams;

/// What to do when a requested mesh cannot be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// Substitute the generated torus.
    Torus,
    /// Fail the run.
    None,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub paths: Vec<PathBuf>,
    pub fallback: Fallback,
    pub normalize: bool,
    pub torus: TorusParams,
    pub write_torus: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            fallback: Fallback::Torus,
            normalize: true,
            torus: TorusParams::default(),
            write_torus: None,
        }
    }
}

impl Config {
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut config = Self::default();
        for arg in args {
            if let Some(val) = arg.strip_prefix("--fallback=") {
                match val.to_ascii_lowercase().as_str() {
                    "torus" | "donut" => config.fallback = Fallback::Torus,
                    "none" | "off" => config.fallback = Fallback::None,
                    other => log::warn!(
                        "Unknown fallback '{}', keeping {:?}.",
                        other,
                        config.fallback
                    ),
                }
            } else if let Some(val) = arg.strip_prefix("--normalize=") {
                match val.to_ascii_lowercase().as_str() {
                    "1" | "true" | "on" | "yes" => config.normalize = true,
                    "0" | "false" | "off" | "no" => config.normalize = false,
                    other => log::warn!(
                        "Unknown normalize value '{}', keeping {}.",
                        other,
                        config.normalize
                    ),
                }
            } else if let Some(val) = arg.strip_prefix("--torus=") {
                match parse_resolution(val) {
                    Some((segments, sides)) => {
                        config.torus = TorusParams::with_resolution(segments, sides)
                    }
                    None => log::warn!("Invalid torus resolution '{}', keeping current.", val),
                }
            } else if let Some(val) = arg.strip_prefix("--write-torus=") {
                config.write_torus = Some(PathBuf::from(val));
            } else if arg.starts_with("--") {
                log::warn!("Ignoring unknown flag '{}'", arg);
            } else {
                config.paths.push(PathBuf::from(arg));
            }
        }
        config
    }
}

/// `"20x15"` -> `(20, 15)`; both parts must be at least 1.
fn parse_resolution(val: &str) -> Option<(u32, u32)> {
    let (a, b) = val.split_once('x').or_else(|| val.split_once('X'))?;
    let segments = a.parse::<u32>().ok().filter(|&n| n > 0)?;
    let sides = b.parse::<u32>().ok().filter(|&n| n > 0)?;
    Some((segments, sides))
}
