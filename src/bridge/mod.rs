//! Simulation bridge
//!
//! Owns a physics world, a render surface and the set of live entities
//! that pair the two. The host drives it explicitly:
//! - `initialize` once with the static geometry
//! - `tick` once per frame with a constant timestep
//! - `draw` whenever it wants the surface redrawn
//!
//! Nothing here reads the wall clock; two bridges built from the same
//! config and seed produce identical frames.

pub mod entity;
pub mod tick;

pub use entity::{BridgeSnapshot, BridgeStats, DynamicEntity, EntitySnapshot, TickReport};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::BridgeConfig;
use crate::consts::GROUND_LINE_WIDTH;
use crate::error::{BridgeError, ConfigError};
use crate::geometry::StaticGeometry;
use crate::physics::PhysicsWorld;
use crate::renderer::RenderSurface;
use crate::spawn::SpawnTimer;

/// Entity pair type for a given world/surface combination
pub type EntityOf<W, R> = DynamicEntity<<W as PhysicsWorld>::Handle, <R as RenderSurface>::Handle>;

/// Spawn/step/reap/sync loop over a physics world and a render surface
pub struct SimulationBridge<W: PhysicsWorld, R: RenderSurface> {
    config: BridgeConfig,
    world: W,
    surface: R,
    rng: Pcg32,
    timer: SpawnTimer,
    /// Live entities, ascending id
    entities: Vec<EntityOf<W, R>>,
    static_bodies: Vec<W::Handle>,
    static_visuals: Vec<R::Handle>,
    initialized: bool,
    frame: u64,
    stats: BridgeStats,
    next_id: u32,
}

impl<W: PhysicsWorld, R: RenderSurface> SimulationBridge<W, R> {
    /// Build a bridge around an empty world and surface
    pub fn new(config: BridgeConfig, world: W, surface: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: Pcg32::seed_from_u64(config.seed),
            timer: SpawnTimer::new(config.initial_spawn_delay, config.spawn_interval),
            config,
            world,
            surface,
            entities: Vec::new(),
            static_bodies: Vec::new(),
            static_visuals: Vec::new(),
            initialized: false,
            frame: 0,
            stats: BridgeStats::default(),
            next_id: 1,
        })
    }

    /// Insert the static geometry into the world, once
    ///
    /// Circles with an image get a sprite and segments get a line on the
    /// render surface. Neither counts as an entity. If a collaborator
    /// refuses an item, everything added so far is removed again and the
    /// bridge stays uninitialized.
    ///
    /// # Panics
    ///
    /// If called again after a successful call.
    pub fn initialize(&mut self, geometry: &[StaticGeometry]) -> Result<(), BridgeError> {
        assert!(!self.initialized, "SimulationBridge::initialize called twice");

        if let Err(e) = self.add_static_geometry(geometry) {
            log::warn!(
                "Static geometry rejected after {} bodies, rolling back: {}",
                self.static_bodies.len(),
                e
            );
            for visual in self.static_visuals.drain(..) {
                self.surface.remove_visual(visual);
            }
            for body in self.static_bodies.drain(..) {
                self.world.remove_body(body);
            }
            return Err(e);
        }

        self.initialized = true;
        log::info!(
            "Bridge initialized with {} static bodies ({} visuals)",
            self.static_bodies.len(),
            self.static_visuals.len()
        );
        Ok(())
    }

    fn add_static_geometry(&mut self, geometry: &[StaticGeometry]) -> Result<(), BridgeError> {
        for item in geometry {
            let body = self.world.add_static_body(item)?;
            self.static_bodies.push(body);

            let visual = match item {
                StaticGeometry::Segment { a, b, .. } => {
                    Some(self.surface.add_line(*a, *b, GROUND_LINE_WIDTH)?)
                }
                StaticGeometry::Circle {
                    center,
                    radius,
                    image: Some(image),
                    ..
                } => Some(
                    self.surface
                        .add_visual(image, *center, glam::Vec2::splat(radius * 2.0))?,
                ),
                StaticGeometry::Circle { image: None, .. } => None,
            };
            self.static_visuals.extend(visual);
        }
        Ok(())
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Redraw the render surface
    pub fn draw(&mut self) {
        self.surface.draw_all();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn entities(&self) -> &[EntityOf<W, R>] {
        &self.entities
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn timer(&self) -> &SpawnTimer {
        &self.timer
    }

    /// Completed ticks
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    /// Visuals created for static geometry
    pub fn static_visual_count(&self) -> usize {
        self.static_visuals.len()
    }

    pub fn static_body_count(&self) -> usize {
        self.static_bodies.len()
    }

    /// Current positions and orientations of all live entities
    pub fn snapshot(&self) -> BridgeSnapshot {
        BridgeSnapshot {
            frame: self.frame,
            stats: self.stats,
            entities: self
                .entities
                .iter()
                .map(|e| EntitySnapshot {
                    id: e.id,
                    position: self.world.position(e.body),
                    angle_degrees: self.world.angle(e.body).to_degrees(),
                })
                .collect(),
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
