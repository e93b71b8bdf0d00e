//! Boot Configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Positional argument: frame count (`tilt 600`)
//! 2. Environment variables: `TILT_FRAMES`, `TILT_FPS`, `TILT_SEED`, `TILT_TILT`
//! 3. Config file: `$TILT_CONFIG`, else `tilt.toml` in the working directory
//! 4. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! frames = 3600       # omit to run until Ctrl-C
//! fps = 60.0
//! fixed_step = false  # true: advance 1/fps per frame without sleeping
//! max_frame_delta = 0.25
//! seed = 7
//! tilt = "sweep"      # sweep, stdin, none
//!
//! [simulation]
//! gravity_scale = 1.0
//! particle_count = 12
//!
//! [layout.middle]
//! width = 1024.0
//! height = 768.0
//!
//! [physics]
//! gravity_strength = 980.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilt_core::{SimulationConfig, DEFAULT_MAX_DELTA};
use tilt_physics::PhysicsConfig;
use tilt_scenes::LayoutConfig;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "tilt.toml";

/// Frame rate bounds; the frame time must fit a `Duration`
pub const MIN_FPS: f32 = 1.0;
pub const MAX_FPS: f32 = 1000.0;

/// Longest pause between status lines, seconds
pub const MAX_STATUS_INTERVAL: f32 = 3600.0;

#[derive(Debug, Error)]
pub enum BootError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Where tilt samples come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiltSource {
    /// Synthetic slow rocking motion
    #[default]
    Sweep,
    /// `beta gamma` pairs in degrees, one per line
    Stdin,
    /// Gravity stays at its initial direction
    None,
}

impl std::fmt::Display for TiltSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sweep => write!(f, "sweep"),
            Self::Stdin => write!(f, "stdin"),
            Self::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for TiltSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sweep" | "demo" => Ok(Self::Sweep),
            "stdin" | "-" => Ok(Self::Stdin),
            "none" | "off" | "" => Ok(Self::None),
            _ => Err(format!("Unknown tilt source: {}", s)),
        }
    }
}

/// Complete boot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Frames to run; `None` runs until interrupted
    pub frames: Option<u64>,
    /// Target frame rate
    pub fps: f32,
    /// Advance exactly `1 / fps` per frame and never sleep
    pub fixed_step: bool,
    /// Longest delta one frame may integrate, seconds
    pub max_frame_delta: f32,
    /// Seed for the initial population and spawn velocities
    pub seed: Option<u64>,
    pub tilt: TiltSource,
    /// Seconds between status lines
    pub status_interval: f32,
    pub layout: LayoutConfig,
    pub physics: PhysicsConfig,
    pub simulation: SimulationConfig,
    /// Config file path (for reloading)
    #[serde(skip)]
    pub config_path: Option<String>,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            frames: None,
            fps: 60.0,
            fixed_step: false,
            max_frame_delta: DEFAULT_MAX_DELTA,
            seed: None,
            tilt: TiltSource::Sweep,
            status_interval: 1.0,
            layout: LayoutConfig::default(),
            physics: PhysicsConfig::default(),
            simulation: SimulationConfig::default(),
            config_path: None,
        }
    }
}

impl BootConfig {
    /// Load boot configuration from all sources
    pub fn load() -> Self {
        let mut config = Self::default();

        let path = std::env::var("TILT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        if Path::new(&path).exists() {
            match Self::load_from_file(&path) {
                Ok(loaded) => {
                    config = loaded;
                    config.config_path = Some(path.clone());
                    log::info!("Loaded boot config from {}", path);
                }
                Err(e) => log::warn!("{}, using defaults", e),
            }
        }

        config.apply_env(|key| std::env::var(key).ok());

        let args: Vec<String> = std::env::args().skip(1).collect();
        config.apply_args(&args);

        config.sanitize();
        config
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self, BootError> {
        let content = std::fs::read_to_string(path).map_err(|source| BootError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| BootError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override from environment variables
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(frames) = var("TILT_FRAMES") {
            match frames.trim().parse() {
                Ok(n) => {
                    self.frames = Some(n);
                    log::info!("Frame limit from env: {}", n);
                }
                Err(_) => log::warn!("Ignoring TILT_FRAMES={}", frames),
            }
        }

        if let Some(fps) = var("TILT_FPS") {
            match fps.trim().parse() {
                Ok(v) => self.fps = v,
                Err(_) => log::warn!("Ignoring TILT_FPS={}", fps),
            }
        }

        if let Some(seed) = var("TILT_SEED") {
            match seed.trim().parse() {
                Ok(v) => self.seed = Some(v),
                Err(_) => log::warn!("Ignoring TILT_SEED={}", seed),
            }
        }

        if let Some(source) = var("TILT_TILT") {
            match source.parse() {
                Ok(s) => self.tilt = s,
                Err(e) => log::warn!("{}", e),
            }
        }
    }

    /// Override from command line arguments
    ///
    /// The first non-flag argument is the frame count; `--fixed` turns on
    /// fixed stepping.
    pub fn apply_args(&mut self, args: &[String]) {
        for arg in args {
            if arg == "--fixed" {
                self.fixed_step = true;
                continue;
            }
            // Skip other flags starting with --
            if arg.starts_with("--") {
                continue;
            }
            match arg.parse() {
                Ok(n) => {
                    self.frames = Some(n);
                    log::info!("Frame limit from args: {}", n);
                }
                Err(_) => log::warn!("Ignoring argument {:?}, expected a frame count", arg),
            }
            break;
        }
    }

    /// Clamp values that would stall or break the frame loop
    pub fn sanitize(&mut self) {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            log::warn!("Invalid fps {}, using 60", self.fps);
            self.fps = 60.0;
        } else if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            let fps = self.fps.clamp(MIN_FPS, MAX_FPS);
            log::warn!("fps {} out of range, using {}", self.fps, fps);
            self.fps = fps;
        }
        if !(self.status_interval.is_finite() && self.status_interval > 0.0) {
            self.status_interval = 1.0;
        }
        self.status_interval = self.status_interval.min(MAX_STATUS_INTERVAL);
        self.simulation = self.simulation.sanitized();
    }

    /// Seconds per frame
    pub fn frame_time(&self) -> f32 {
        1.0 / self.fps
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        log::info!("Boot Configuration:");
        match self.frames {
            Some(n) => log::info!("  Frames: {}", n),
            None => log::info!("  Frames: until Ctrl-C"),
        }
        log::info!("  FPS: {} ({})", self.fps, if self.fixed_step { "fixed step" } else { "real time" });
        log::info!("  Tilt: {}", self.tilt);
        if let Some(seed) = self.seed {
            log::info!("  Seed: {}", seed);
        }
        if let Some(path) = &self.config_path {
            log::info!("  Config: {}", path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tilt_source_parse() {
        assert_eq!("sweep".parse::<TiltSource>().unwrap(), TiltSource::Sweep);
        assert_eq!("STDIN".parse::<TiltSource>().unwrap(), TiltSource::Stdin);
        assert_eq!("off".parse::<TiltSource>().unwrap(), TiltSource::None);
        assert!("gyro".parse::<TiltSource>().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = BootConfig::from_toml(
            r#"
            frames = 120
            fps = 30.0
            tilt = "none"

            [simulation]
            particle_count = 12

            [layout.middle]
            width = 1024.0
            height = 768.0

            [physics]
            gravity_strength = 500.0
            "#,
        )
        .unwrap();

        assert_eq!(config.frames, Some(120));
        assert_eq!(config.fps, 30.0);
        assert_eq!(config.tilt, TiltSource::None);
        assert_eq!(config.simulation.particle_count, 12);
        assert_eq!(config.simulation.radius, 5.0);
        assert_eq!(config.layout.middle.width, 1024.0);
        assert_eq!(config.layout.upper.width, 800.0);
        assert_eq!(config.physics.gravity_strength, 500.0);
        assert_eq!(config.physics.entity_size, 50.0);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(BootConfig::from_toml("frames = \"lots\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [("TILT_FRAMES", "90"), ("TILT_FPS", "bogus"), ("TILT_SEED", "5")]
            .into_iter()
            .collect();
        let mut config = BootConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.frames, Some(90));
        assert_eq!(config.fps, 60.0);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_args_override() {
        let mut config = BootConfig::default();
        config.apply_args(&args(&["--fixed", "240", "999"]));
        assert!(config.fixed_step);
        assert_eq!(config.frames, Some(240));
    }

    #[test]
    fn test_sanitize() {
        let mut config = BootConfig {
            fps: 0.0,
            ..BootConfig::default()
        };
        config.simulation.particle_count = 1;
        config.sanitize();
        assert_eq!(config.fps, 60.0);
        assert_eq!(config.simulation.particle_count, 3);
    }

    #[test]
    fn test_sanitize_bounds_durations() {
        let mut config = BootConfig {
            fps: 1e-30,
            status_interval: 1e30,
            ..BootConfig::default()
        };
        config.sanitize();
        assert_eq!(config.fps, MIN_FPS);
        assert_eq!(config.status_interval, MAX_STATUS_INTERVAL);
        assert!(Duration::from_secs_f32(config.frame_time()) <= Duration::from_secs(1));

        config.fps = 1e9;
        config.sanitize();
        assert_eq!(config.fps, MAX_FPS);
    }
}
