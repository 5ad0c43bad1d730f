//! Whole-level scenarios driven through the in-memory world

mod scenarios;

use super::{Level, LevelDesc};
use crate::config::{ConstantTable, GameplayConfig};
use crate::foundation::logging;
use crate::objects::{LevelObject, Spikes};
use crate::physics::testing::TestWorld;
use crate::physics::{FixtureHandle, FixtureTag};

const DT: f32 = 1.0 / 60.0;

fn constants() -> ConstantTable {
    ConstantTable::new().with(
        "player",
        ConstantTable::new()
            .with("force", 20.0_f32)
            .with("damping", 10.0_f32)
            .with("max_speed", 5.0_f32)
            .with("jump_force", 5.5_f32)
            .with("size", vec![0.8_f32, 0.8]),
    )
}

fn build_with(desc: LevelDesc, config: GameplayConfig) -> (TestWorld, Level) {
    logging::init_for_tests();
    let mut world = TestWorld::new();
    let level = Level::build(desc, constants(), config, &mut world).expect("level builds");
    (world, level)
}

fn build(desc: LevelDesc) -> (TestWorld, Level) {
    build_with(desc, GameplayConfig::default())
}

fn fixture(level: &Level, tag: FixtureTag) -> FixtureHandle {
    level
        .fixtures()
        .tagged(tag)
        .next()
        .unwrap_or_else(|| panic!("no fixture tagged {tag:?}"))
}

fn player_fixture(level: &Level) -> FixtureHandle {
    fixture(level, FixtureTag::PlayerBody)
}

fn first_spikes(level: &Level) -> &Spikes {
    level
        .objects()
        .values()
        .find_map(LevelObject::as_spikes)
        .expect("level has spikes")
}
