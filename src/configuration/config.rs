//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! neutron scenario. A scenario consists of:
//!
//! - [`PhysicsConfig`]  – cross sections, fission yield and neutron speed
//! - [`DomainConfig`]   – size of the 2D box and the drawn neutron size
//! - [`RunConfig`]      – time step, seed, tick count and wraparound
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! reference problem.
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! physics:
//!   nu: 2.5                 # mean fission yield
//!   sig_s: 0.27             # scatter cross section
//!   sig_c: 0.02             # capture cross section
//!   sig_f: null             # fission; null -> sig_c / (nu - 1)
//!   speed: 2.0e6            # cm/s
//!
//! domain:
//!   width: 1920.0
//!   height: 1080.0
//!   neutron_size: 3.0
//!
//! run:
//!   dt: 1.0e-6              # time per tick
//!   seed: 1                 # deterministic seed
//!   ticks: 1000             # ticks run by the headless driver
//!   wrap: true              # snap neutrons to the opposite edge
//! ```
//!
//! The scenario builder maps this into the immutable runtime structs in
//! `simulation::params`, validating as it goes.

use serde::Deserialize;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;

/// Cross sections and kinematics
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PhysicsConfig {
    pub nu: f64,            // mean number of neutrons per fission
    pub sig_s: f64,         // scatter cross section
    pub sig_c: f64,         // capture cross section
    pub sig_f: Option<f64>, // fission cross section, derived from sig_c and nu when absent
    pub speed: f64,         // neutron speed, position units per time unit
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            nu: 2.5,
            sig_s: 0.27,
            sig_c: 0.02,
            sig_f: None,
            speed: 20000.0 * 100.0,
        }
    }
}

/// Geometry of the visible box
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DomainConfig {
    pub width: f64,        // x extent
    pub height: f64,       // y extent
    pub neutron_size: f64, // drawn size, sets the wraparound margin
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            neutron_size: 3.0,
        }
    }
}

/// Driver settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub dt: f64,     // time step per tick
    pub seed: u64,   // deterministic seed to make runs reproducible
    pub ticks: u64,  // number of ticks the headless driver runs
    pub wrap: bool,  // wrap live neutrons into the domain after each tick
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dt: 1.0e-6,
            seed: 1,
            ticks: 1000,
            wrap: true,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub physics: PhysicsConfig, // cross sections and speed
    pub domain: DomainConfig,   // box the neutrons live in
    pub run: RunConfig,         // time step, seed and run length
}

impl ScenarioConfig {
    /// Read a scenario from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_reference_problem() {
        let cfg: ScenarioConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg.physics.nu, 2.5);
        assert_eq!(cfg.physics.sig_s, 0.27);
        assert_eq!(cfg.physics.sig_c, 0.02);
        assert!(cfg.physics.sig_f.is_none());
        assert_eq!(cfg.domain.width, 1920.0);
        assert_eq!(cfg.run.dt, 1.0e-6);
        assert_eq!(cfg.run.seed, 1);
        assert!(cfg.run.wrap);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = "physics:\n  nu: 3.0\nrun:\n  seed: 7\n";
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.physics.nu, 3.0);
        assert_eq!(cfg.physics.sig_s, 0.27);
        assert_eq!(cfg.run.seed, 7);
        assert_eq!(cfg.run.ticks, 1000);
        assert_eq!(cfg.domain.height, 1080.0);
    }
}
