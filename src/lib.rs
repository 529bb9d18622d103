pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Neutron, Population, Tag, NVec3};
pub use simulation::params::{Physics, Domain};
pub use simulation::transport::{Stepper, Outcome, TickReport};
pub use simulation::scenario::{Scenario, Totals};

pub use configuration::config::{PhysicsConfig, DomainConfig, RunConfig, ScenarioConfig};

pub use error::{Error, Result};

pub use benchmark::benchmark::bench_tick;
