//! Physical and geometric parameters for the simulation
//!
//! `Physics` holds the cross-section set and neutron speed, `Domain` the box
//! the neutrons wander in. Both are immutable once built; a stepper owns its
//! own `Physics`, so independent simulations can run different problems.

use crate::configuration::config::{DomainConfig, PhysicsConfig};
use crate::error::{Error, Result};
use crate::simulation::states::NVec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Physics {
    nu: f64,    // mean fission yield
    sig_c: f64, // capture
    sig_s: f64, // scatter
    sig_f: f64, // fission
    speed: f64, // neutron speed
}

impl Physics {
    /// Build a cross-section set, rejecting values that break sampling.
    pub fn new(nu: f64, sig_c: f64, sig_s: f64, sig_f: f64, speed: f64) -> Result<Self> {
        for (name, v) in [("sig_c", sig_c), ("sig_s", sig_s), ("sig_f", sig_f)] {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidParam(format!("{name} must be finite and >= 0, got {v}")));
            }
        }
        if !(sig_c + sig_s + sig_f > 0.0) {
            return Err(Error::InvalidParam("total cross section must be > 0".to_string()));
        }
        if !nu.is_finite() || nu < 1.0 {
            return Err(Error::InvalidParam(format!("nu must be finite and >= 1, got {nu}")));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(Error::InvalidParam(format!("speed must be finite and >= 0, got {speed}")));
        }
        Ok(Self { nu, sig_c, sig_s, sig_f, speed })
    }

    /// Fission cross section derived as `sig_c / (nu - 1)`, i.e. a fixed
    /// capture-to-(nu - 1) ratio.
    pub fn from_ratio(nu: f64, sig_s: f64, sig_c: f64, speed: f64) -> Result<Self> {
        if !(nu > 1.0) {
            return Err(Error::InvalidParam(format!(
                "deriving sig_f needs nu > 1, got {nu}"
            )));
        }
        Self::new(nu, sig_c, sig_s, sig_c / (nu - 1.0), speed)
    }

    /// The epithermal-ish problem the demo was written for.
    pub fn reference() -> Self {
        let nu = 2.5;
        let sig_c = 0.02;
        Self {
            nu,
            sig_c,
            sig_s: 0.27,
            sig_f: sig_c / (nu - 1.0),
            speed: 20000.0 * 100.0,
        }
    }

    pub fn from_config(cfg: &PhysicsConfig) -> Result<Self> {
        match cfg.sig_f {
            Some(sig_f) => Self::new(cfg.nu, cfg.sig_c, cfg.sig_s, sig_f, cfg.speed),
            None => Self::from_ratio(cfg.nu, cfg.sig_s, cfg.sig_c, cfg.speed),
        }
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }

    pub fn sig_c(&self) -> f64 {
        self.sig_c
    }

    pub fn sig_s(&self) -> f64 {
        self.sig_s
    }

    pub fn sig_f(&self) -> f64 {
        self.sig_f
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn sig_t(&self) -> f64 {
        self.sig_s + self.sig_c + self.sig_f
    }

    /// Upper edge of the capture band `[0, p_capture)`.
    pub fn p_capture(&self) -> f64 {
        self.sig_c / self.sig_t()
    }

    /// Width of the fission band `[p_capture, p_capture + p_fission)`.
    pub fn p_fission(&self) -> f64 {
        self.sig_f / self.sig_t()
    }
}

impl Default for Physics {
    fn default() -> Self {
        Self::reference()
    }
}

/// Visible box, `[0, width) x [0, height)`
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    pub width: f64,
    pub height: f64,
    pub neutron_size: f64, // margin for wraparound is half of this
}

impl Domain {
    pub fn new(width: f64, height: f64, neutron_size: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) || !(height.is_finite() && height > 0.0) {
            return Err(Error::InvalidParam(format!(
                "domain must have positive size, got {width} x {height}"
            )));
        }
        // wrap snaps to `width - neutron_size` and `neutron_size / 2`, both must land inside
        if !(neutron_size > 0.0 && neutron_size < width.min(height)) {
            return Err(Error::InvalidParam(format!(
                "neutron_size must be in (0, {}), got {neutron_size}",
                width.min(height)
            )));
        }
        Ok(Self { width, height, neutron_size })
    }

    pub fn from_config(cfg: &DomainConfig) -> Result<Self> {
        Self::new(cfg.width, cfg.height, cfg.neutron_size)
    }

    /// Snap a position that has drifted within half a neutron of an edge to
    /// the opposite edge. Each test looks at the coordinate as it was before
    /// any snapping.
    pub fn wrap(&self, r: &mut NVec3) {
        let half = self.neutron_size / 2.0;
        let (x, y) = (r.x, r.y);

        if x < half {
            r.x = self.width - self.neutron_size;
        }
        if y < half {
            r.y = self.height - self.neutron_size;
        }
        if x > self.width - half {
            r.x = half;
        }
        if y > self.height - half {
            r.y = half;
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            neutron_size: 3.0,
        }
    }
}
