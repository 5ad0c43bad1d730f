//! Reference-counted set of fixtures touching a sensor

use std::collections::HashMap;

use crate::physics::FixtureHandle;

/// Fixtures currently touching one sensor
///
/// The sensor counts as touching while the set is non-empty, so leaving one
/// platform while standing on another keeps the player grounded.
#[derive(Debug, Default, Clone)]
pub struct SensorRegistry {
    touching: HashMap<FixtureHandle, u32>,
}

impl SensorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A fixture started touching
    pub fn add(&mut self, fixture: FixtureHandle) {
        *self.touching.entry(fixture).or_insert(0) += 1;
    }

    /// A fixture stopped touching; returns `false` if it was not registered
    pub fn remove(&mut self, fixture: FixtureHandle) -> bool {
        match self.touching.get_mut(&fixture) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.touching.remove(&fixture);
                true
            }
            None => false,
        }
    }

    /// Whether `fixture` is touching
    pub fn contains(&self, fixture: FixtureHandle) -> bool {
        self.touching.contains_key(&fixture)
    }

    /// Number of distinct fixtures touching
    pub fn len(&self) -> usize {
        self.touching.len()
    }

    /// Whether nothing touches the sensor
    pub fn is_empty(&self) -> bool {
        self.touching.is_empty()
    }

    /// Forget every contact
    pub fn clear(&mut self) {
        self.touching.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn handles(n: usize) -> Vec<FixtureHandle> {
        let mut map: SlotMap<FixtureHandle, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_stays_touching_until_last_removed() {
        let fixtures = handles(4);
        let mut registry = SensorRegistry::new();
        for fixture in &fixtures {
            registry.add(*fixture);
        }

        for fixture in &fixtures[..3] {
            assert!(registry.remove(*fixture));
            assert!(!registry.is_empty());
        }

        assert!(registry.remove(fixtures[3]));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_begin_needs_matching_end() {
        let fixture = handles(1)[0];
        let mut registry = SensorRegistry::new();
        registry.add(fixture);
        registry.add(fixture);

        registry.remove(fixture);
        assert!(registry.contains(fixture));
        registry.remove(fixture);
        assert!(!registry.contains(fixture));
    }

    #[test]
    fn test_remove_unknown_fixture() {
        let mut registry = SensorRegistry::new();
        assert!(!registry.remove(handles(1)[0]));
        assert!(registry.is_empty());
    }
}
