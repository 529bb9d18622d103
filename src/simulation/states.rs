//! Core state types for the neutron population.
//!
//! - `Neutron`    a single point particle
//! - `Population` the ordered store, with first-fit recycling of dead slots
//!
//! Positions are nalgebra `NVec3` with z held at 0.

use nalgebra::Vector3;
use rand::Rng;

use crate::simulation::params::Domain;
use crate::simulation::sampling::{isotropic_direction, random_tag};

pub type NVec3 = Vector3<f64>;

/// Opaque lineage marker handed to whatever draws the neutrons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tag(pub u32);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Neutron {
    pub position: NVec3,              // z stays 0
    pub direction: NVec3,             // unit vector
    pub distance_to_collision: f64,   // < 0 means a collision is due
    pub alive: bool,                  // dead slots are recycled
    pub tag: Tag,                     // inherited by fission progeny
}

impl Neutron {
    pub fn new(position: NVec3, direction: NVec3, tag: Tag) -> Self {
        Self {
            position,
            direction,
            distance_to_collision: 0.0,
            alive: true,
            tag,
        }
    }

    /// In-plane position for display.
    pub fn xy(&self) -> (f64, f64) {
        (self.position.x, self.position.y)
    }
}

/// Indexable neutron store. Never shrinks; dead entries are reused before
/// anything is appended.
#[derive(Debug, Clone, Default)]
pub struct Population {
    neutrons: Vec<Neutron>,
}

impl Population {
    pub fn new() -> Self {
        Self { neutrons: Vec::new() }
    }

    /// Lay out about `target` neutrons on a 2:1 grid across `domain`, then
    /// add as many dead spares.
    ///
    /// `rows = floor(sqrt(target / 2))` with at least one row for any
    /// non-zero target, `cols = 2 * rows`. New neutrons have
    /// `distance_to_collision = 0`.
    pub fn initialize<R: Rng + ?Sized>(target: usize, domain: &Domain, rng: &mut R) -> Self {
        if target == 0 {
            return Self::new();
        }

        let (rows, cols) = grid_shape(target);
        let live = rows * cols;

        let dr = domain.height / (rows + 1) as f64;
        let dc = domain.width / (cols + 1) as f64;

        let mut neutrons = Vec::with_capacity(2 * live);
        for row in 0..rows {
            for col in 0..cols {
                let position = NVec3::new(
                    dc / 2.0 + col as f64 * dc,
                    dr / 2.0 + row as f64 * dr,
                    0.0,
                );
                let direction = isotropic_direction(rng);
                let tag = random_tag(rng);
                neutrons.push(Neutron::new(position, direction, tag));
            }
        }

        // spare capacity for early fission growth
        neutrons.resize(2 * live, Neutron::default());

        Self { neutrons }
    }

    /// Index of the first dead neutron, if any.
    pub fn find_dead_slot(&self) -> Option<usize> {
        self.neutrons.iter().position(|n| !n.alive)
    }

    /// Push a live neutron onto the end.
    pub fn append(&mut self, mut neutron: Neutron) -> usize {
        neutron.alive = true;
        self.neutrons.push(neutron);
        self.neutrons.len() - 1
    }

    pub fn len(&self) -> usize {
        self.neutrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neutrons.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.neutrons.iter().filter(|n| n.alive).count()
    }

    pub fn get(&self, i: usize) -> Option<&Neutron> {
        self.neutrons.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Neutron> {
        self.neutrons.iter()
    }

    /// Live neutrons only, in store order.
    pub fn live(&self) -> impl Iterator<Item = &Neutron> {
        self.neutrons.iter().filter(|n| n.alive)
    }

    pub(crate) fn slot_mut(&mut self, i: usize) -> &mut Neutron {
        &mut self.neutrons[i]
    }

    pub(crate) fn live_mut(&mut self) -> impl Iterator<Item = &mut Neutron> {
        self.neutrons.iter_mut().filter(|n| n.alive)
    }
}

impl From<Vec<Neutron>> for Population {
    fn from(neutrons: Vec<Neutron>) -> Self {
        Self { neutrons }
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Neutron;
    type IntoIter = std::slice::Iter<'a, Neutron>;

    fn into_iter(self) -> Self::IntoIter {
        self.neutrons.iter()
    }
}

/// Grid rows and columns for a requested neutron count (non-zero).
pub fn grid_shape(target: usize) -> (usize, usize) {
    let rows = ((target / 2) as f64).sqrt().floor() as usize;
    let rows = rows.max(1);
    (rows, 2 * rows)
}
