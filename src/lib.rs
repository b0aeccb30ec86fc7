/*
 * 3D Boid Flocking Engine - Module Definitions
 *
 * Headless simulation core: a flock of boids steered by separation,
 * alignment and cohesion and kept inside a box or sphere by a soft
 * containment force. Rendering is left to whoever drives `Flock::update`
 * once per frame and reads the boids back.
 */

// Re-export key components for easier access
pub use boid::{AgentId, Boid};
pub use config::{ConfigError, FollowSettings, SimulationConfig};
pub use flock::{Flock, UpdateOrder};
pub use follow::FollowController;
pub use math::{Quat, Vec3};
pub use params::{BehaviorSettings, Boundary, BoundaryShape};

// Define modules
pub mod boid;
pub mod config;
pub mod containment;
pub mod flock;
pub mod follow;
pub mod math;
pub mod neighbors;
pub mod params;
pub mod steering;

// Spawn distribution: a spherical shell around the origin
pub const SPAWN_MIN_RADIUS: f32 = 500.0;
pub const SPAWN_MAX_RADIUS: f32 = 1000.0;
// Per-component bound of the initial velocity
pub const SPAWN_MAX_VELOCITY: f32 = 10.0;

// Default follow controller tuning for the headless runner
pub const FOLLOW_SPEED_FACTOR: f32 = 2.0;
pub const FOLLOW_MAX_FORCE: f32 = 0.5;
// Trail behind and above the followed boid
pub const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 20.0, -60.0);
