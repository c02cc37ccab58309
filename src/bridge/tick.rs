//! Fixed timestep bridge tick
//!
//! One call per frame: spawn, reap check, step, remove, sync.

use super::{DynamicEntity, SimulationBridge, TickReport};
use crate::error::BridgeError;
use crate::physics::{BodyShape, PhysicsWorld};
use crate::renderer::RenderSurface;

impl<W: PhysicsWorld, R: RenderSurface> SimulationBridge<W, R> {
    /// Advance the bridge by one frame
    ///
    /// A failed spawn does not abort the frame: the rest of the tick runs
    /// and the spawn error is returned afterwards. The spawn timer has
    /// already been reset, so the next spawn comes on schedule.
    ///
    /// # Panics
    ///
    /// If called before `initialize`, if `fixed_dt` is not a positive
    /// finite number, or if it differs from the configured `fixed_dt`.
    pub fn tick(&mut self, fixed_dt: f32) -> Result<TickReport, BridgeError> {
        assert!(self.initialized, "SimulationBridge::tick called before initialize");
        assert!(
            fixed_dt.is_finite() && fixed_dt > 0.0,
            "fixed_dt must be positive and finite, got {fixed_dt}"
        );
        assert!(
            fixed_dt == self.config.fixed_dt,
            "fixed_dt {fixed_dt} does not match the configured timestep {}",
            self.config.fixed_dt
        );

        let mut report = TickReport::default();
        let mut spawn_error = None;

        // Spawn
        if self.timer.advance() {
            match self.spawn() {
                Ok(id) => report.spawned = Some(id),
                Err(e) => {
                    log::warn!("Spawn skipped on frame {}: {}", self.frame, e);
                    self.stats.spawn_failures += 1;
                    spawn_error = Some(e);
                }
            }
        }

        // Collect entities that have left the board (checked before stepping)
        let reap_below = self.config.reap_below;
        report.reaped = self
            .entities
            .iter()
            .filter(|e| self.world.position(e.body).y < reap_below)
            .map(|e| e.id)
            .collect();

        self.world.step(fixed_dt);

        // Remove both halves of every reaped pair
        if !report.reaped.is_empty() {
            let world = &mut self.world;
            let surface = &mut self.surface;
            let reaped = &report.reaped;
            self.entities.retain(|e| {
                if reaped.binary_search(&e.id).is_ok() {
                    world.remove_body(e.body);
                    surface.remove_visual(e.visual);
                    log::debug!("Reaped entity {}", e.id);
                    false
                } else {
                    true
                }
            });
            self.stats.reaped += report.reaped.len() as u64;
        }

        // Sync visuals to bodies (radians -> degrees)
        for entity in &self.entities {
            let position = self.world.position(entity.body);
            let angle_degrees = self.world.angle(entity.body).to_degrees();
            self.surface.set_transform(entity.visual, position, angle_degrees);
        }

        self.frame += 1;
        debug_assert_eq!(self.world.dynamic_body_count(), self.entities.len());

        match spawn_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    /// Create one body and its visual, or neither
    fn spawn(&mut self) -> Result<u32, BridgeError> {
        let policy = &self.config.spawn;
        let position = policy.sample_position(&mut self.rng);
        let shape = BodyShape::Ball {
            radius: policy.radius,
            friction: policy.friction,
        };

        let body = self.world.add_dynamic_body(policy.mass, &shape, position)?;
        let visual = match self
            .surface
            .add_visual(&policy.image, position, policy.sprite_size())
        {
            Ok(visual) => visual,
            Err(e) => {
                // Don't leave a body without a visual behind
                self.world.remove_body(body);
                return Err(e);
            }
        };

        let id = self.next_entity_id();
        self.entities.push(DynamicEntity { id, body, visual });
        self.stats.spawned += 1;
        log::debug!("Spawned entity {} at ({:.1}, {:.1})", id, position.x, position.y);
        Ok(id)
    }
}
