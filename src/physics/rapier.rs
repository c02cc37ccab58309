//! rapier2d-backed physics world

use std::collections::HashSet;

use glam::Vec2;
use rapier2d::prelude::*;

use super::{BodyShape, PhysicsWorld};
use crate::error::BridgeError;
use crate::geometry::StaticGeometry;

/// Physics world backed by a rapier2d pipeline
///
/// Friction coefficients are multiplied on contact, so a ball with
/// friction 0.3 on ground with friction 10 sees 3.0.
pub struct RapierWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    /// Dynamic bodies currently in the world
    dynamic: HashSet<RigidBodyHandle>,
    /// Cap on live dynamic bodies (None = unbounded)
    max_dynamic_bodies: Option<usize>,
}

impl RapierWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vector![gravity.x, gravity.y],
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            dynamic: HashSet::new(),
            max_dynamic_bodies: None,
        }
    }

    /// Limit the number of live dynamic bodies
    pub fn with_capacity_limit(mut self, limit: usize) -> Self {
        self.max_dynamic_bodies = Some(limit);
        self
    }

    /// Total bodies, static included
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Linear velocity of a body
    pub fn velocity(&self, handle: RigidBodyHandle) -> Vec2 {
        let vel = self.bodies[handle].linvel();
        Vec2::new(vel.x, vel.y)
    }
}

impl PhysicsWorld for RapierWorld {
    type Handle = RigidBodyHandle;

    fn add_static_body(&mut self, geometry: &StaticGeometry) -> Result<RigidBodyHandle, BridgeError> {
        let (body, collider) = match geometry {
            StaticGeometry::Segment {
                a,
                b,
                radius,
                friction,
            } => {
                let body = RigidBodyBuilder::fixed().build();
                let builder = if *radius > 0.0 {
                    ColliderBuilder::new(SharedShape::capsule(
                        point![a.x, a.y],
                        point![b.x, b.y],
                        *radius,
                    ))
                } else {
                    ColliderBuilder::segment(point![a.x, a.y], point![b.x, b.y])
                };
                (body, builder.friction(*friction))
            }
            StaticGeometry::Circle {
                center,
                radius,
                friction,
                ..
            } => {
                let body = RigidBodyBuilder::fixed()
                    .translation(vector![center.x, center.y])
                    .build();
                (body, ColliderBuilder::ball(*radius).friction(*friction))
            }
        };

        let collider = collider
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .build();
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        Ok(handle)
    }

    fn add_dynamic_body(
        &mut self,
        mass: f32,
        shape: &BodyShape,
        position: Vec2,
    ) -> Result<RigidBodyHandle, BridgeError> {
        if let Some(limit) = self.max_dynamic_bodies {
            if self.dynamic.len() >= limit {
                return Err(BridgeError::PhysicsExhausted { limit });
            }
        }

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .ccd_enabled(true)
            .build();
        let collider = match shape {
            BodyShape::Ball { radius, friction } => ColliderBuilder::ball(*radius)
                .mass(mass)
                .friction(*friction)
                .friction_combine_rule(CoefficientCombineRule::Multiply)
                .build(),
        };

        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.dynamic.insert(handle);
        Ok(handle)
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.dynamic.remove(&handle);
        let removed = self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        if removed.is_none() {
            log::warn!("Tried to remove unknown body {:?}", handle);
        }
    }

    fn step(&mut self, fixed_dt: f32) {
        self.params.dt = fixed_dt;
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }

    fn position(&self, handle: RigidBodyHandle) -> Vec2 {
        let t = self.bodies[handle].translation();
        Vec2::new(t.x, t.y)
    }

    fn angle(&self, handle: RigidBodyHandle) -> f32 {
        self.bodies[handle].rotation().angle()
    }

    fn dynamic_body_count(&self) -> usize {
        self.dynamic.len()
    }
}
