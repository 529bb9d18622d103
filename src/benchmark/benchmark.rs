use std::time::Instant;

use crate::configuration::config::ScenarioConfig;
use crate::error::Result;
use crate::simulation::params::{Domain, Physics};
use crate::simulation::states::Population;
use crate::simulation::transport::Stepper;

/// Time `Stepper::step` over a range of starting populations.
/// Prints CSV so the output can be pasted straight into a spreadsheet.
pub fn bench_tick(cfg: &ScenarioConfig) -> Result<()> {
    let ns = [1_000, 10_000, 100_000, 1_000_000];
    let steps = 50;

    let physics = Physics::from_config(&cfg.physics)?;
    let domain = Domain::from_config(&cfg.domain)?;
    let dt = cfg.run.dt;

    println!("N,slots_end,live_end,ms_per_tick");

    for n in ns {
        let mut stepper = Stepper::seeded(physics.clone(), cfg.run.seed);
        let mut pop = Population::initialize(n, &domain, stepper.rng_mut());

        // Warm up: first tick never collides, second resolves everyone
        stepper.step(&mut pop, dt);
        stepper.step(&mut pop, dt);

        let t0 = Instant::now();
        for _ in 0..steps {
            stepper.step(&mut pop, dt);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{},{},{:.6}", n, pop.len(), pop.live_count(), ms);
    }

    Ok(())
}
