//! In-memory world for unit and scenario tests
//!
//! No integration happens here. Bodies keep whatever position and velocity
//! they were given, and contacts are scripted by the test and delivered on
//! the next [`Simulation::step`].

use slotmap::SlotMap;

use super::{
    BodyDef, BodyHandle, BodyType, Contact, ContactEndpoint, ContactListener, FixtureDef,
    FixtureHandle, JointHandle, PhysicsWorld, Simulation, WeldJointDef,
};
use crate::foundation::math::{Isometry, Point2, Vec2};

#[derive(Debug, Clone)]
pub(crate) struct TestBody {
    pub body_type: BodyType,
    pub position: Point2,
    pub angle: f32,
    pub velocity: Vec2,
    pub damping: f32,
    pub forces: Vec2,
    pub impulses: Vec2,
}

#[derive(Debug, Clone)]
pub(crate) struct TestFixture {
    pub body: BodyHandle,
    pub def: FixtureDef,
}

#[derive(Debug, Clone, Copy)]
enum Scripted {
    Begin(FixtureHandle, FixtureHandle),
    End(FixtureHandle, FixtureHandle),
}

#[derive(Debug, Default)]
pub(crate) struct TestWorld {
    pub bodies: SlotMap<BodyHandle, TestBody>,
    pub fixtures: SlotMap<FixtureHandle, TestFixture>,
    pub joints: SlotMap<JointHandle, WeldJointDef>,
    pub steps: u32,
    script: Vec<(Scripted, Vec<Point2>)>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a begin-contact on the next step
    pub fn begin(&mut self, a: FixtureHandle, b: FixtureHandle) {
        self.script.push((Scripted::Begin(a, b), Vec::new()));
    }

    /// Deliver a begin-contact with manifold points on the next step
    pub fn begin_at(&mut self, a: FixtureHandle, b: FixtureHandle, points: Vec<Point2>) {
        self.script.push((Scripted::Begin(a, b), points));
    }

    /// Deliver an end-contact on the next step
    pub fn end(&mut self, a: FixtureHandle, b: FixtureHandle) {
        self.script.push((Scripted::End(a, b), Vec::new()));
    }

    pub fn body(&self, body: BodyHandle) -> &TestBody {
        &self.bodies[body]
    }

    pub fn fixtures_of(&self, body: BodyHandle) -> usize {
        self.fixtures.values().filter(|f| f.body == body).count()
    }

    fn endpoint(&self, fixture: FixtureHandle) -> Option<ContactEndpoint> {
        let body = self.fixtures.get(fixture)?.body;
        let transform = self.transform(body)?;
        let linear_velocity = self.linear_velocity(body)?;
        Some(ContactEndpoint {
            fixture,
            body,
            transform,
            linear_velocity,
        })
    }

    /// Build a contact without going through a step
    pub fn contact(&self, a: FixtureHandle, b: FixtureHandle, points: Vec<Point2>) -> Contact {
        Contact {
            a: self.endpoint(a).expect("fixture a exists"),
            b: self.endpoint(b).expect("fixture b exists"),
            points,
        }
    }
}

impl PhysicsWorld for TestWorld {
    fn create_body(&mut self, def: &BodyDef) -> BodyHandle {
        self.bodies.insert(TestBody {
            body_type: def.body_type,
            position: def.position,
            angle: def.angle,
            velocity: def.linear_velocity,
            damping: def.linear_damping,
            forces: Vec2::zeros(),
            impulses: Vec2::zeros(),
        })
    }

    fn destroy_body(&mut self, body: BodyHandle) {
        self.bodies.remove(body);
        self.fixtures.retain(|_, fixture| fixture.body != body);
        self.joints.retain(|_, joint| joint.body_a != body && joint.body_b != body);
    }

    fn contains_body(&self, body: BodyHandle) -> bool {
        self.bodies.contains_key(body)
    }

    fn create_fixture(&mut self, body: BodyHandle, def: &FixtureDef) -> FixtureHandle {
        self.fixtures.insert(TestFixture { body, def: def.clone() })
    }

    fn destroy_fixture(&mut self, fixture: FixtureHandle) {
        self.fixtures.remove(fixture);
    }

    fn create_weld_joint(&mut self, def: &WeldJointDef) -> JointHandle {
        self.joints.insert(def.clone())
    }

    fn destroy_joint(&mut self, joint: JointHandle) {
        self.joints.remove(joint);
    }

    fn body_type(&self, body: BodyHandle) -> Option<BodyType> {
        self.bodies.get(body).map(|b| b.body_type)
    }

    fn set_body_type(&mut self, body: BodyHandle, body_type: BodyType) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.body_type = body_type;
        }
    }

    fn transform(&self, body: BodyHandle) -> Option<Isometry> {
        self.bodies
            .get(body)
            .map(|b| Isometry::new(b.position.coords, b.angle))
    }

    fn set_position(&mut self, body: BodyHandle, position: Point2) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.position = position;
        }
    }

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies.get(body).map(|b| b.velocity)
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.velocity = velocity;
        }
    }

    fn apply_force(&mut self, body: BodyHandle, force: Vec2) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.forces += force;
        }
    }

    fn apply_linear_impulse(&mut self, body: BodyHandle, impulse: Vec2) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.impulses += impulse;
        }
    }
}

impl Simulation for TestWorld {
    fn step(&mut self, _dt: f32, listener: &mut dyn ContactListener) {
        self.steps += 1;
        for (event, points) in std::mem::take(&mut self.script) {
            let (a, b) = match event {
                Scripted::Begin(a, b) | Scripted::End(a, b) => (a, b),
            };
            let (Some(a), Some(b)) = (self.endpoint(a), self.endpoint(b)) else {
                continue;
            };
            let contact = Contact { a, b, points };
            match event {
                Scripted::Begin(..) => listener.begin_contact(&contact),
                Scripted::End(..) => listener.end_contact(&contact),
            }
        }
        for body in self.bodies.values_mut() {
            body.forces = Vec2::zeros();
        }
    }
}
