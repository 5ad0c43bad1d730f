//! Contacts that have begun and not yet ended
//!
//! The simulation only reports contacts that change during a step. Fixtures
//! the gameplay destroys between steps vanish without an end-contact, so the
//! level keeps every open pair here and closes the orphans itself.

use std::collections::HashMap;

use crate::physics::{Contact, FixtureHandle, FixtureRegistry};

#[derive(Debug, Clone)]
struct OpenContact {
    contact: Contact,
    count: u32,
}

/// Open contacts keyed by their unordered fixture pair
#[derive(Debug, Default, Clone)]
pub struct OpenContacts {
    open: HashMap<(FixtureHandle, FixtureHandle), OpenContact>,
}

fn pair_key(contact: &Contact) -> (FixtureHandle, FixtureHandle) {
    let (a, b) = (contact.a.fixture, contact.b.fixture);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl OpenContacts {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a begin-contact
    pub fn begin(&mut self, contact: &Contact) {
        self.open
            .entry(pair_key(contact))
            .and_modify(|open| open.count += 1)
            .or_insert_with(|| OpenContact {
                contact: contact.clone(),
                count: 1,
            });
    }

    /// Record an end-contact; returns `false` if the pair was not open
    pub fn end(&mut self, contact: &Contact) -> bool {
        let key = pair_key(contact);
        match self.open.get_mut(&key) {
            Some(open) if open.count > 1 => {
                open.count -= 1;
                true
            }
            Some(_) => {
                self.open.remove(&key);
                true
            }
            None => false,
        }
    }

    /// Close every pair with a fixture that is no longer live
    ///
    /// Returns the begin-contact snapshot of each closed pair, once per
    /// begin that was still open.
    pub fn retire(&mut self, fixtures: &FixtureRegistry) -> Vec<Contact> {
        let mut retired = Vec::new();
        self.open.retain(|_, open| {
            let live = fixtures.is_live(open.contact.a.fixture)
                && fixtures.is_live(open.contact.b.fixture);
            if !live {
                for _ in 0..open.count {
                    retired.push(open.contact.clone());
                }
            }
            live
        });
        retired
    }

    /// Whether the pair touching in `contact` is open
    pub fn contains(&self, contact: &Contact) -> bool {
        self.open.contains_key(&pair_key(contact))
    }

    /// Number of open fixture pairs
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Whether nothing is touching
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Forget every contact
    pub fn clear(&mut self) {
        self.open.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point2;
    use crate::physics::testing::TestWorld;
    use crate::physics::{BodyDef, FixtureDef, FixtureTag, PhysicsWorld, Shape};

    fn square() -> FixtureDef {
        FixtureDef::solid(Shape::cuboid(0.5, 0.5, Point2::origin()))
    }

    #[test]
    fn test_end_matches_either_order() {
        let mut world = TestWorld::new();
        let mut fixtures = FixtureRegistry::new();
        let body = world.create_body(&BodyDef::fixed(Point2::origin()));
        let a = fixtures.create(&mut world, body, &square(), FixtureTag::Terrain);
        let b = fixtures.create(&mut world, body, &square(), FixtureTag::Goal);
        let mut ledger = OpenContacts::new();

        ledger.begin(&world.contact(a, b, Vec::new()));
        assert!(ledger.contains(&world.contact(b, a, Vec::new())));

        assert!(ledger.end(&world.contact(b, a, Vec::new())));
        assert!(ledger.is_empty());
        assert!(!ledger.end(&world.contact(a, b, Vec::new())));
    }

    #[test]
    fn test_retire_closes_pairs_on_destroyed_fixtures() {
        let mut world = TestWorld::new();
        let mut fixtures = FixtureRegistry::new();
        let body = world.create_body(&BodyDef::fixed(Point2::origin()));
        let floor = fixtures.create(&mut world, body, &square(), FixtureTag::Terrain);
        let goal = fixtures.create(&mut world, body, &square(), FixtureTag::Goal);
        let feet = fixtures.create(&mut world, body, &square(), FixtureTag::PlayerGroundSensor);
        let mut ledger = OpenContacts::new();

        let doomed = world.contact(feet, floor, vec![Point2::new(0.0, 0.5)]);
        ledger.begin(&doomed);
        ledger.begin(&doomed);
        ledger.begin(&world.contact(feet, goal, Vec::new()));

        assert!(ledger.retire(&fixtures).is_empty());

        fixtures.destroy(&mut world, floor);
        let retired = ledger.retire(&fixtures);

        assert_eq!(retired, vec![doomed.clone(), doomed.clone()]);
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.contains(&doomed));
        assert!(ledger.retire(&fixtures).is_empty());
    }
}
