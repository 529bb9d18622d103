//! Build fully-initialized neutron scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and a requested neutron count and
//! produces a runtime `Scenario` containing:
//! - the domain the neutrons live in (`Domain`)
//! - the neutron store at t = 0 (`Population`)
//! - the stepper that owns physics and the random stream (`Stepper`)
//!
//! A driver (the headless binary, a renderer, a test) calls `tick` once per
//! frame and reads the population back through `population()`.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::Rng;

use crate::configuration::config::ScenarioConfig;
use crate::error::{Error, Result};
use crate::simulation::params::{Domain, Physics};
use crate::simulation::states::Population;
use crate::simulation::transport::{Stepper, TickReport};

/// Running totals over every tick so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub captures: usize,
    pub fissions: usize,
    pub scatters: usize,
    pub progeny: usize,
}

impl Totals {
    fn add(&mut self, r: &TickReport) {
        self.captures += r.captures;
        self.fissions += r.fissions;
        self.scatters += r.scatters;
        self.progeny += r.progeny();
    }
}

pub struct Scenario<R: Rng = StdRng> {
    pub domain: Domain,
    pub dt: f64,     // step used by `run`
    pub wrap: bool,  // keep live neutrons inside the domain
    pub t: f64,      // simulated time
    pub ticks: u64,  // ticks taken
    pub totals: Totals,
    population: Population,
    stepper: Stepper<R>,
}

impl Scenario<StdRng> {
    pub fn build_scenario(cfg: &ScenarioConfig, target: usize) -> Result<Self> {
        let physics = Physics::from_config(&cfg.physics)?;
        let stepper = Stepper::seeded(physics, cfg.run.seed);
        Self::with_stepper(cfg, target, stepper)
    }
}

impl<R: Rng> Scenario<R> {
    /// Build around an existing stepper; its generator also lays out the grid.
    pub fn with_stepper(cfg: &ScenarioConfig, target: usize, mut stepper: Stepper<R>) -> Result<Self> {
        let domain = Domain::from_config(&cfg.domain)?;
        if !(cfg.run.dt.is_finite() && cfg.run.dt >= 0.0) {
            return Err(Error::InvalidParam(format!("dt must be finite and >= 0, got {}", cfg.run.dt)));
        }

        let population = Population::initialize(target, &domain, stepper.rng_mut());
        info!(
            "initialized {} neutrons ({} slots) in {} x {}",
            population.live_count(),
            population.len(),
            domain.width,
            domain.height
        );
        debug!("physics: {:?}", stepper.physics());

        Ok(Self {
            domain,
            dt: cfg.run.dt,
            wrap: cfg.run.wrap,
            t: 0.0,
            ticks: 0,
            totals: Totals::default(),
            population,
            stepper,
        })
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn physics(&self) -> &Physics {
        self.stepper.physics()
    }

    /// One step of `dt`, then wraparound of live neutrons.
    pub fn tick(&mut self, dt: f64) -> TickReport {
        let report = self.stepper.step(&mut self.population, dt);
        if self.wrap {
            for n in self.population.live_mut() {
                self.domain.wrap(&mut n.position);
            }
        }

        self.t += dt;
        self.ticks += 1;
        self.totals.add(&report);
        trace!("tick {}: {:?}", self.ticks, report);
        report
    }

    /// Take `n` ticks of the configured `dt`, logging the population as it goes.
    pub fn run(&mut self, n: u64) -> Totals {
        let every = (n / 10).max(1);
        for k in 1..=n {
            self.tick(self.dt);
            if k % every == 0 {
                info!(
                    "tick {:6}  t = {:.3e}  live = {:8}  slots = {:8}",
                    self.ticks,
                    self.t,
                    self.population.live_count(),
                    self.population.len()
                );
            }
        }
        self.totals
    }
}
