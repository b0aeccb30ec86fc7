/*
 * Flock Module
 *
 * This module owns the boid population and runs one simulation tick per
 * `update()` call: gather neighbors, compute the steering and containment
 * forces, and integrate.
 *
 * Three update orders are supported:
 * - Sequential: each boid is integrated right after its forces are computed,
 *   so later boids see the already-moved earlier ones (the classic demo loop)
 * - TwoPhase: all forces are computed against the frozen population first,
 *   then every boid is integrated
 * - Parallel: TwoPhase with the read phase spread over rayon's thread pool
 */

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::boid::{AgentId, Boid};
use crate::containment::containment_force;
use crate::math::Vec3;
use crate::neighbors::neighbors_within;
use crate::params::BehaviorSettings;
use crate::steering::{alignment, cohesion, separation};
use crate::{SPAWN_MAX_RADIUS, SPAWN_MAX_VELOCITY, SPAWN_MIN_RADIUS};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    #[default]
    Sequential,
    TwoPhase,
    Parallel,
}

// Random point on a spherical shell around the origin
pub fn random_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let radius = rng.gen_range(SPAWN_MIN_RADIUS..=SPAWN_MAX_RADIUS);
    let polar = rng.gen_range(0.0..=PI);
    let azimuth = rng.gen_range(0.0..TAU);

    Vec3::new(
        radius * polar.sin() * azimuth.cos(),
        radius * polar.sin() * azimuth.sin(),
        radius * polar.cos(),
    )
}

pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(-SPAWN_MAX_VELOCITY..=SPAWN_MAX_VELOCITY),
        rng.gen_range(-SPAWN_MAX_VELOCITY..=SPAWN_MAX_VELOCITY),
        rng.gen_range(-SPAWN_MAX_VELOCITY..=SPAWN_MAX_VELOCITY),
    )
}

// Create `count` randomized boids with ids starting at `first_id`
pub fn create_agents<R: Rng + ?Sized>(count: usize, first_id: u64, rng: &mut R) -> Vec<Boid> {
    (0..count as u64)
        .map(|i| Boid::new(AgentId(first_id + i), random_position(rng), random_velocity(rng)))
        .collect()
}

/// Total force acting on `boid` this tick: separation, alignment, cohesion and containment.
///
/// Reads `population` only; `boid` must be an element of it so that it is
/// excluded from its own neighborhood.
pub fn compute_steering(boid: &Boid, population: &[Boid], settings: &BehaviorSettings) -> Vec3 {
    let separation = separation(
        boid,
        neighbors_within(boid, population, settings.separation_dist),
        settings.separation_weight,
        settings.max_speed,
    );
    let alignment = alignment(
        boid,
        neighbors_within(boid, population, settings.alignment_dist),
        settings.alignment_weight,
        settings.max_speed,
    );
    let cohesion = cohesion(
        boid,
        neighbors_within(boid, population, settings.cohesion_dist),
        settings.max_speed,
        settings.max_force,
    ) * settings.cohesion_weight;
    let containment = containment_force(boid, settings.boundary(), settings.body_radius);

    separation + alignment + cohesion + containment
}

pub struct Flock {
    agents: Vec<Boid>,
    settings: BehaviorSettings,
    update_order: UpdateOrder,
    rng: StdRng,
    next_id: u64,
    tick_count: u64,
}

impl Flock {
    pub fn new(settings: BehaviorSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    // Reproducible populations: the same seed always spawns the same boids
    pub fn with_seed(settings: BehaviorSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: BehaviorSettings, rng: StdRng) -> Self {
        Self {
            agents: Vec::new(),
            settings,
            update_order: UpdateOrder::default(),
            rng,
            next_id: 0,
            tick_count: 0,
        }
    }

    // Build a flock from fixed initial states, in the given order
    pub fn from_agents(
        settings: BehaviorSettings,
        states: impl IntoIterator<Item = (Vec3, Vec3)>,
    ) -> Self {
        let mut flock = Self::with_seed(settings, 0);
        for (position, velocity) in states {
            flock.add_agent(position, velocity);
        }
        flock
    }

    fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    // Replace the population with `count` freshly randomized boids
    pub fn reset(&mut self, count: usize) {
        let first_id = self.next_id;
        self.next_id += count as u64;
        self.agents = create_agents(count, first_id, &mut self.rng);
        self.tick_count = 0;
        debug!("flock reset with {} boids", count);
    }

    pub fn add_agent(&mut self, position: Vec3, velocity: Vec3) -> AgentId {
        let id = self.allocate_id();
        self.agents.push(Boid::new(id, position, velocity));
        debug!("added boid {:?}, population {}", id, self.agents.len());
        id
    }

    pub fn add_random_agent(&mut self) -> AgentId {
        let position = random_position(&mut self.rng);
        let velocity = random_velocity(&mut self.rng);
        self.add_agent(position, velocity)
    }

    // Remove a boid, keeping the order of the rest
    pub fn remove_agent(&mut self, id: AgentId) -> Option<Boid> {
        let index = self.agents.iter().position(|boid| boid.id == id)?;
        let removed = self.agents.remove(index);
        debug!("removed boid {:?}, population {}", id, self.agents.len());
        Some(removed)
    }

    pub fn get(&self, id: AgentId) -> Option<&Boid> {
        self.agents.iter().find(|boid| boid.id == id)
    }

    pub fn agents(&self) -> &[Boid] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn settings(&self) -> &BehaviorSettings {
        &self.settings
    }

    // Swap in new settings; takes effect on the next tick
    pub fn set_settings(&mut self, settings: BehaviorSettings) {
        if settings != self.settings {
            debug!("behavior settings replaced: {:?}", settings);
        }
        self.settings = settings;
    }

    pub fn update_order(&self) -> UpdateOrder {
        self.update_order
    }

    pub fn set_update_order(&mut self, update_order: UpdateOrder) {
        self.update_order = update_order;
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // Advance every boid by one tick
    pub fn update(&mut self) {
        match self.update_order {
            UpdateOrder::Sequential => self.update_sequential(),
            UpdateOrder::TwoPhase => {
                let forces: Vec<Vec3> = self
                    .agents
                    .iter()
                    .map(|boid| compute_steering(boid, &self.agents, &self.settings))
                    .collect();
                self.apply_forces(forces);
            }
            UpdateOrder::Parallel => {
                let forces: Vec<Vec3> = self
                    .agents
                    .par_iter()
                    .map(|boid| compute_steering(boid, &self.agents, &self.settings))
                    .collect();
                self.apply_forces(forces);
            }
        }

        self.tick_count += 1;
        trace!("tick {} done, {} boids", self.tick_count, self.agents.len());
    }

    fn update_sequential(&mut self) {
        let max_speed = self.settings.max_speed;
        for i in 0..self.agents.len() {
            let force = compute_steering(&self.agents[i], &self.agents, &self.settings);
            let boid = &mut self.agents[i];
            boid.apply_force(force);
            boid.integrate(max_speed);
        }
    }

    fn apply_forces(&mut self, forces: Vec<Vec3>) {
        let max_speed = self.settings.max_speed;
        for (boid, force) in self.agents.iter_mut().zip(forces) {
            boid.apply_force(force);
            boid.integrate(max_speed);
        }
    }

    // Mean position of all boids, zero for an empty flock
    pub fn get_center(&self) -> Vec3 {
        if self.agents.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self
            .agents
            .iter()
            .fold(Vec3::ZERO, |sum, boid| sum + boid.position);
        sum / self.agents.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_boids_sit_on_the_shell() {
        let mut rng = StdRng::seed_from_u64(7);
        let boids = create_agents(200, 0, &mut rng);

        assert_eq!(boids.len(), 200);
        let ids: Vec<AgentId> = boids.iter().map(|b| b.id).collect();
        assert_eq!(ids.first(), Some(&AgentId(0)));
        assert_eq!(ids.last(), Some(&AgentId(199)));

        let later = create_agents(2, 500, &mut rng);
        assert_eq!(later[0].id, AgentId(500));
        assert_eq!(later[1].id, AgentId(501));

        for boid in &boids {
            let r = boid.position.length();
            assert!(r >= SPAWN_MIN_RADIUS - 1.0e-2 && r <= SPAWN_MAX_RADIUS + 1.0e-2);
            assert!(boid.velocity.abs().max_element() <= SPAWN_MAX_VELOCITY);
        }
    }

    #[test]
    fn ids_are_never_reused() {
        let mut flock = Flock::with_seed(BehaviorSettings::default(), 1);
        flock.reset(3);
        let first: Vec<AgentId> = flock.agents().iter().map(|b| b.id).collect();
        flock.reset(3);
        let extra = flock.add_random_agent();

        for boid in flock.agents() {
            assert!(!first.contains(&boid.id));
        }
        assert_eq!(extra, AgentId(6));
    }

    #[test]
    fn remove_keeps_order() {
        let mut flock = Flock::from_agents(
            BehaviorSettings::default(),
            (0..4).map(|i| (Vec3::new(i as f32, 0.0, 0.0), Vec3::ZERO)),
        );
        let removed = flock.remove_agent(AgentId(1)).map(|b| b.position);
        assert_eq!(removed, Some(Vec3::new(1.0, 0.0, 0.0)));

        let ids: Vec<AgentId> = flock.agents().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(2), AgentId(3)]);
        assert!(flock.remove_agent(AgentId(1)).is_none());
        assert!(flock.get(AgentId(1)).is_none());
    }

    #[test]
    fn center_of_empty_and_single_flock() {
        let mut flock = Flock::with_seed(BehaviorSettings::default(), 3);
        assert_eq!(flock.get_center(), Vec3::ZERO);

        let id = flock.add_agent(Vec3::new(4.0, -2.0, 9.0), Vec3::ZERO);
        assert_eq!(flock.get_center(), flock.get(id).map(|b| b.position).unwrap_or_default());
        assert_eq!(flock.get_center(), Vec3::new(4.0, -2.0, 9.0));
    }

    #[test]
    fn sequential_order_lets_later_boids_see_moved_neighbors() {
        let settings = BehaviorSettings {
            separation_dist: 10.0,
            separation_weight: 100.0,
            alignment_dist: 0.0,
            cohesion_dist: 0.0,
            ..Default::default()
        };
        let states = [
            (Vec3::ZERO, Vec3::ZERO),
            (Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO),
            (Vec3::new(12.0, 0.0, 0.0), Vec3::ZERO),
        ];

        let mut sequential = Flock::from_agents(settings.clone(), states);
        let mut two_phase = Flock::from_agents(settings, states);
        two_phase.set_update_order(UpdateOrder::TwoPhase);
        sequential.update();
        two_phase.update();

        // The first boid sees the same frozen world either way
        assert_eq!(sequential.agents()[0].position, two_phase.agents()[0].position);
        // The middle boid reacts to where the first one already moved
        assert!(sequential.agents()[1].velocity.x < 0.0);
        assert!(two_phase.agents()[1].velocity.x > 0.0);
        assert_ne!(sequential.agents()[2].velocity, two_phase.agents()[2].velocity);
    }

    #[test]
    fn tick_count_advances_and_resets() {
        let mut flock = Flock::with_seed(BehaviorSettings::default(), 5);
        flock.reset(4);
        flock.update();
        flock.update();
        assert_eq!(flock.tick_count(), 2);
        flock.reset(4);
        assert_eq!(flock.tick_count(), 0);
    }
}
