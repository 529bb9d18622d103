//! Fixed-step transport of the neutron population
//!
//! One `step` is a single pass over the store by index: collisions that came
//! due during the previous step are resolved first, then every live neutron
//! drifts `speed * dt` along its direction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::params::Physics;
use super::sampling::{distance_to_collision, fission_yield, isotropic_direction};
use super::states::{NVec3, Population};

/// What happened to a neutron whose collision came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Capture,
    Fission,
    Scatter,
}

/// Counts for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub captures: usize,
    pub fissions: usize,
    pub scatters: usize,
    pub recycled: usize, // progeny written into dead slots
    pub appended: usize, // progeny that grew the store
}

impl TickReport {
    pub fn collisions(&self) -> usize {
        self.captures + self.fissions + self.scatters
    }

    pub fn progeny(&self) -> usize {
        self.recycled + self.appended
    }
}

/// Owns the physics and the random stream for one simulation.
pub struct Stepper<R: Rng = StdRng> {
    physics: Physics,
    rng: R,
}

impl Stepper<StdRng> {
    pub fn seeded(physics: Physics, seed: u64) -> Self {
        Self::new(physics, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Stepper<R> {
    pub fn new(physics: Physics, rng: R) -> Self {
        Self { physics, rng }
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Pick the outcome band for a uniform draw in [0, 1).
    pub fn classify(&self, xi: f64) -> Outcome {
        let p_c = self.physics.p_capture();
        if xi < p_c {
            Outcome::Capture
        } else if xi < p_c + self.physics.p_fission() {
            Outcome::Fission
        } else {
            Outcome::Scatter
        }
    }

    /// Advance every live neutron by `dt`.
    ///
    /// The length is re-read on every iteration, so progeny appended (or
    /// recycled into a slot) ahead of the cursor are transported in this same
    /// pass and may collide again before the step ends.
    pub fn step(&mut self, pop: &mut Population, dt: f64) -> TickReport {
        let mut report = TickReport::default();
        let distance = self.physics.speed() * dt;

        let mut i = 0;
        while let Some(n) = pop.get(i) {
            if !n.alive {
                i += 1;
                continue;
            }

            if n.distance_to_collision < 0.0 {
                let xi: f64 = self.rng.gen();
                match self.classify(xi) {
                    Outcome::Capture => {
                        pop.slot_mut(i).alive = false;
                        report.captures += 1;
                        i += 1;
                        continue;
                    }
                    Outcome::Fission => {
                        report.fissions += 1;
                        self.emit_progeny(pop, i, &mut report);
                    }
                    Outcome::Scatter => {
                        report.scatters += 1;
                    }
                }

                let sig_t = self.physics.sig_t();
                let d = distance_to_collision(sig_t, &mut self.rng);
                let u = isotropic_direction(&mut self.rng);
                let n = pop.slot_mut(i);
                n.distance_to_collision = d;
                n.direction = u;
            }

            let n = pop.slot_mut(i);
            n.position += NVec3::new(n.direction.x, n.direction.y, 0.0) * distance;
            n.distance_to_collision -= distance;

            i += 1;
        }

        report
    }

    /// Fission from the neutron at `parent`: the parent is the first of the
    /// `fission_yield` neutrons, the rest are copies of it placed in dead
    /// slots first and appended once none are left.
    fn emit_progeny(&mut self, pop: &mut Population, parent: usize, report: &mut TickReport) {
        let secondaries = fission_yield(self.physics.nu(), &mut self.rng).saturating_sub(1);
        let template = pop.slot_mut(parent).clone();
        let sig_t = self.physics.sig_t();

        for _ in 0..secondaries {
            let mut child = template.clone();
            child.direction = isotropic_direction(&mut self.rng);
            child.distance_to_collision = distance_to_collision(sig_t, &mut self.rng);

            match pop.find_dead_slot() {
                Some(slot) => {
                    *pop.slot_mut(slot) = child;
                    report.recycled += 1;
                }
                None => {
                    pop.append(child);
                    report.appended += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{Neutron, Tag};
    use rand::rngs::mock::StepRng;

    fn physics(sig_c: f64, sig_s: f64, sig_f: f64, nu: f64) -> Physics {
        Physics::new(nu, sig_c, sig_s, sig_f, 1.0).unwrap()
    }

    fn due(x: f64, tag: u32) -> Neutron {
        Neutron {
            position: NVec3::new(x, 0.0, 0.0),
            direction: NVec3::x(),
            distance_to_collision: -1.0,
            alive: true,
            tag: Tag(tag),
        }
    }

    #[test]
    fn bands_are_half_open() {
        let s = Stepper::seeded(physics(0.25, 0.5, 0.25, 2.0), 0);
        assert_eq!(s.classify(0.0), Outcome::Capture);
        assert_eq!(s.classify(0.2499), Outcome::Capture);
        assert_eq!(s.classify(0.25), Outcome::Fission);
        assert_eq!(s.classify(0.4999), Outcome::Fission);
        assert_eq!(s.classify(0.5), Outcome::Scatter);
        assert_eq!(s.classify(0.9999), Outcome::Scatter);
    }

    #[test]
    fn capture_kills_without_replacement() {
        let mut s = Stepper::seeded(physics(1.0, 0.0, 0.0, 2.0), 3);
        let mut pop = Population::from(vec![due(0.0, 1), Neutron::default()]);
        let r = s.step(&mut pop, 1.0);
        assert_eq!(r.captures, 1);
        assert_eq!(pop.live_count(), 0);
        assert_eq!(pop.len(), 2);
        // captured neutrons do not move
        assert_eq!(pop.get(0).unwrap().position, NVec3::zeros());
    }

    #[test]
    fn scatter_resamples_and_moves() {
        // draws at the top of [0, 1) land in the scatter band
        let mut s = Stepper::new(Physics::reference(), StepRng::new(u64::MAX, 0));
        let mut pop = Population::from(vec![due(10.0, 1)]);
        let r = s.step(&mut pop, 0.0);
        assert_eq!(r.scatters, 1);
        let n = pop.get(0).unwrap();
        assert!(n.alive);
        assert!(n.distance_to_collision >= 0.0);
        assert!((n.direction.norm() - 1.0).abs() < 1e-9);
        assert_eq!(n.position, NVec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn exactly_zero_does_not_collide() {
        let mut s = Stepper::seeded(physics(1.0, 0.0, 0.0, 2.0), 3);
        let mut n = due(0.0, 1);
        n.distance_to_collision = 0.0;
        let mut pop = Population::from(vec![n]);
        let r = s.step(&mut pop, 0.5);
        assert_eq!(r.collisions(), 0);
        let n = pop.get(0).unwrap();
        assert!(n.alive);
        assert_eq!(n.position, NVec3::new(0.5, 0.0, 0.0));
        assert_eq!(n.distance_to_collision, -0.5);
    }

    #[test]
    fn fission_recycles_before_appending() {
        // nu = 3 -> exactly two secondaries
        let mut s = Stepper::seeded(physics(0.0, 0.0, 1.0, 3.0), 11);
        let mut parent = due(4.0, 77);
        parent.position.y = 2.0;
        let mut pop = Population::from(vec![parent, Neutron::default()]);
        let r = s.step(&mut pop, 0.0);

        assert_eq!(r.fissions, 1);
        assert_eq!(r.recycled, 1);
        assert_eq!(r.appended, 1);
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.live_count(), 3);
        for n in pop.iter() {
            assert_eq!(n.tag, Tag(77));
            assert_eq!(n.position, NVec3::new(4.0, 2.0, 0.0));
        }
    }

    #[test]
    fn progeny_ahead_of_cursor_are_transported_same_pass() {
        // every collision is fission with nu = 1: the parent only re-randomizes
        // and a due neutron later in the store is still reached
        let mut s = Stepper::seeded(physics(0.0, 0.0, 1.0, 1.0), 2);
        let mut pop = Population::from(vec![due(0.0, 1), due(5.0, 2)]);
        let r = s.step(&mut pop, 1.0);
        assert_eq!(r.fissions, 2);
        assert_eq!(r.progeny(), 0);
        let second = pop.get(1).unwrap();
        assert_ne!(second.direction, NVec3::x());
        let moved = second.position - NVec3::new(5.0, 0.0, 0.0);
        let expected = NVec3::new(second.direction.x, second.direction.y, 0.0);
        assert!((moved - expected).norm() < 1e-12);
        assert!(second.distance_to_collision >= -1.0);

        // nu = 2: the appended child lands after the cursor and moves in this pass
        let mut s = Stepper::seeded(physics(0.0, 0.0, 1.0, 2.0), 2);
        let mut pop = Population::from(vec![due(0.0, 1)]);
        let r = s.step(&mut pop, 1.0);
        assert_eq!(r.appended, 1);
        let child = pop.get(1).unwrap();
        let moved = child.position - NVec3::zeros();
        let expected = NVec3::new(child.direction.x, child.direction.y, 0.0);
        assert!((moved - expected).norm() < 1e-12);
    }

    #[test]
    fn dead_slots_are_skipped() {
        let mut s = Stepper::seeded(Physics::reference(), 1);
        let mut pop = Population::from(vec![Neutron::default(); 4]);
        let r = s.step(&mut pop, 1.0);
        assert_eq!(r, TickReport::default());
        assert!(pop.iter().all(|n| n.position == NVec3::zeros()));
    }
}
