pub mod states;
pub mod params;
pub mod sampling;
pub mod transport;
pub mod scenario;
