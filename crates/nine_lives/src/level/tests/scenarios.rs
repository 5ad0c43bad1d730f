//! Frame loop scenarios

use approx::assert_relative_eq;

use super::*;
use crate::config::GameplayConfig;
use crate::foundation::math::{Point2, Vec2};
use crate::level::{
    ActivatorDesc, ActivatorType, BoxDesc, DoorDesc, FlamethrowerDesc, LevelSignals, PlayerDesc,
    SpikesDesc,
};
use crate::mortality::MortalityState;
use crate::physics::{BodyType, ContactListener, PhysicsWorld, Simulation};
use crate::player::PlayerIntent;

fn spikes_at(x: f32, angle: f32) -> SpikesDesc {
    SpikesDesc {
        position: [x, 1.0],
        angle,
        active: true,
        activator: None,
    }
}

fn spike_level() -> LevelDesc {
    LevelDesc {
        walls: vec![vec![0.0, 0.0, 20.0, 0.0, 20.0, 0.5, 0.0, 0.5]],
        spikes: vec![spikes_at(5.0, 0.0)],
        ..LevelDesc::default()
    }
}

/// Kill the player on the first spikes and let the respawn happen
fn die_once(world: &mut TestWorld, level: &mut Level) {
    let spikes = first_spikes(level).sensor().expect("spikes are armed");
    world.begin(player_fixture(level), spikes);
    level.advance(world, DT, &PlayerIntent::default());
    level.advance(world, DT, &PlayerIntent::default());
}

#[test]
fn test_spike_death_leaves_corpse_and_respawns() {
    let (mut world, mut level) = build(spike_level());
    let player = level.player().body();
    let spikes = first_spikes(&level).sensor().expect("spikes are armed");

    world.set_position(player, Point2::new(5.0, 1.5));
    world.set_linear_velocity(player, Vec2::new(2.0, 0.0));
    world.begin(player_fixture(&level), spikes);

    let walk_left = PlayerIntent {
        horizontal: -1.0,
        ..PlayerIntent::default()
    };
    level.advance(&mut world, DT, &walk_left);

    assert_eq!(level.mortality().lives(), 3);
    assert_eq!(level.mortality().state(), MortalityState::Respawning);
    assert!(level.mortality().pending_corpse().is_some());
    assert!(level.corpses().is_empty());

    level.advance(&mut world, DT, &PlayerIntent::default());

    assert_eq!(level.mortality().state(), MortalityState::Alive);
    assert_eq!(level.corpses().len(), 1);
    let (_, corpse) = level.corpses().iter().next().expect("one corpse");
    assert!(!corpse.is_facing_right());
    assert_relative_eq!(corpse.position().x, 5.0);
    assert_relative_eq!(corpse.position().y, 1.5);
    assert_relative_eq!(corpse.velocity().x, 2.0);

    let body = world.body(player);
    assert_eq!(body.position, level.respawn_point());
    assert_eq!(body.velocity, Vec2::zeros());
    assert!(level.signals().is_empty());
}

#[test]
fn test_second_hazard_in_same_step_is_ignored() {
    let mut desc = spike_level();
    desc.spikes.push(spikes_at(6.0, 0.0));
    let (mut world, mut level) = build(desc);
    let player = player_fixture(&level);

    let sensors: Vec<_> = level
        .objects()
        .values()
        .filter_map(LevelObject::as_spikes)
        .filter_map(Spikes::sensor)
        .collect();
    for sensor in sensors {
        world.begin(player, sensor);
    }
    level.advance(&mut world, DT, &PlayerIntent::default());

    assert_eq!(level.mortality().lives(), 3);
}

#[test]
fn test_activator_drives_every_dependent() {
    let desc = LevelDesc {
        activators: vec![ActivatorDesc {
            kind: ActivatorType::Button,
            id: "A".to_string(),
            position: [3.0, 1.0],
            duration: None,
        }],
        spikes: vec![SpikesDesc {
            activator: Some("A".to_string()),
            active: false,
            ..spikes_at(6.0, 0.0)
        }],
        boxes: vec![BoxDesc {
            position: [8.0, 1.0],
            active: false,
            activator: Some("A".to_string()),
            density: None,
            friction: None,
        }],
        ..LevelDesc::default()
    };
    let (mut world, mut level) = build(desc);
    let key = level.activation().key_of("A").expect("activator A");
    let plate = fixture(&level, FixtureTag::Activator(key));
    let box_body = level
        .objects()
        .values()
        .find(|object| matches!(object, LevelObject::PushableBox(_)))
        .map(LevelObject::body)
        .expect("box");

    assert!(first_spikes(&level).sensor().is_none());
    assert_eq!(world.body_type(box_body), Some(BodyType::Dynamic));

    world.begin(player_fixture(&level), plate);
    level.advance(&mut world, DT, &PlayerIntent::default());

    assert!(first_spikes(&level).sensor().is_some());
    assert_eq!(world.body_type(box_body), Some(BodyType::Kinematic));
    assert!(level.object_views(&world).all(|view| view.activated));

    world.end(player_fixture(&level), plate);
    level.advance(&mut world, DT, &PlayerIntent::default());

    assert!(first_spikes(&level).sensor().is_none());
    assert_eq!(world.body_type(box_body), Some(BodyType::Dynamic));
}

#[test]
fn test_exhausting_lives_fails_level() {
    let (mut world, mut level) = build(spike_level());

    for _ in 0..3 {
        die_once(&mut world, &mut level);
    }
    assert_eq!(level.mortality().lives(), 1);
    assert_eq!(level.corpses().len(), 3);

    let spikes = first_spikes(&level).sensor().expect("spikes are armed");
    world.begin(player_fixture(&level), spikes);
    let signals = level.advance(&mut world, DT, &PlayerIntent::default());

    assert!(signals.contains(LevelSignals::FAILED));
    assert!(level.mortality().is_failed());
    assert_eq!(level.mortality().lives(), level.mortality().max_lives());
    assert!(level.mortality().pending_corpse().is_none());

    let steps = world.steps;
    level.advance(&mut world, DT, &PlayerIntent::default());
    assert_eq!(world.steps, steps);
}

#[test]
fn test_falling_out_fails_without_corpse() {
    let (mut world, mut level) = build(spike_level());
    world.set_position(level.player().body(), Point2::new(3.0, -2.0));

    let signals = level.advance(&mut world, DT, &PlayerIntent::default());

    assert_eq!(signals, LevelSignals::FAILED);
    assert!(level.corpses().is_empty());
    assert_eq!(world.steps, 0);
}

#[test]
fn test_ground_sensor_tracks_terrain() {
    let (mut world, mut level) = build(spike_level());
    let feet = fixture(&level, FixtureTag::PlayerGroundSensor);
    let floor = fixture(&level, FixtureTag::Terrain);

    world.begin(feet, floor);
    level.advance(&mut world, DT, &PlayerIntent::default());
    assert!(level.player().is_grounded());

    world.end(feet, floor);
    level.advance(&mut world, DT, &PlayerIntent::default());
    assert!(!level.player().is_grounded());
}

#[test]
fn test_weld_waits_for_post_step() {
    let mut desc = spike_level();
    desc.spikes = vec![spikes_at(5.0, 90.0)];
    let (mut world, mut level) = build(desc);
    die_once(&mut world, &mut level);

    let (corpse, _) = level.corpses().iter().next().expect("one corpse");
    let corpse_fixture = fixture(&level, FixtureTag::Corpse(corpse));
    let spikes = first_spikes(&level).sensor().expect("spikes are armed");
    world.begin_at(
        corpse_fixture,
        spikes,
        vec![Point2::new(5.2, 1.4), Point2::new(5.2, 1.6)],
    );

    assert!(level.pre_update(&mut world));
    level.update(&mut world, &PlayerIntent::default());
    world.step(DT, &mut level);

    assert_eq!(level.joint_queue().len(), 2);
    assert!(world.joints.is_empty());

    level.post_step(&mut world);

    assert!(level.joint_queue().is_empty());
    assert_eq!(level.joints().len(), 2);
    assert_eq!(world.joints.len(), 2);
    assert_eq!(first_spikes(&level).joints().len(), 2);
}

#[test]
fn test_burning_corpse_releases_its_welds() {
    let mut desc = spike_level();
    desc.spikes = vec![spikes_at(5.0, 90.0)];
    desc.flamethrowers = vec![FlamethrowerDesc {
        position: [5.0, 3.0],
        active: true,
        activator: None,
    }];
    let config = GameplayConfig {
        corpse_burn_ticks: 3,
        ..GameplayConfig::default()
    };
    let (mut world, mut level) = build_with(desc, config);
    die_once(&mut world, &mut level);

    let (corpse, _) = level.corpses().iter().next().expect("one corpse");
    let corpse_fixture = fixture(&level, FixtureTag::Corpse(corpse));
    let flame = level
        .objects()
        .values()
        .find_map(|object| match object {
            LevelObject::Flamethrower(flamethrower) => flamethrower.flame(),
            _ => None,
        })
        .expect("flame is lit");
    let spikes = first_spikes(&level).sensor().expect("spikes are armed");

    world.begin_at(corpse_fixture, spikes, vec![Point2::new(5.2, 1.5)]);
    world.begin(corpse_fixture, flame);
    level.advance(&mut world, DT, &PlayerIntent::default());

    let burning = level.corpses().get(corpse).expect("still there");
    assert!(burning.is_burning());
    assert_eq!(burning.burn_ticks(), 1);
    assert_eq!(world.joints.len(), 1);

    level.advance(&mut world, DT, &PlayerIntent::default());
    level.advance(&mut world, DT, &PlayerIntent::default());

    assert!(!level.corpses().contains(corpse));
    assert!(level.joints().is_empty());
    assert!(world.joints.is_empty());
}

#[test]
fn test_goal_completes_level() {
    let desc = LevelDesc {
        goal: Some(DoorDesc {
            position: [18.0, 1.5],
            size: [1.0, 2.0],
        }),
        ..spike_level()
    };
    let (mut world, mut level) = build(desc);

    world.begin(player_fixture(&level), fixture(&level, FixtureTag::Goal));
    let signals = level.advance(&mut world, DT, &PlayerIntent::default());

    assert!(signals.contains(LevelSignals::COMPLETE));
    assert!(!signals.contains(LevelSignals::FAILED));
}

#[test]
fn test_reset_restores_level() {
    let (mut world, mut level) = build(spike_level());
    let bodies = world.bodies.len();

    die_once(&mut world, &mut level);
    assert_eq!(world.bodies.len(), bodies + 1);

    level.reset(&mut world).expect("reset");

    assert_eq!(world.bodies.len(), bodies);
    assert!(level.corpses().is_empty());
    assert_eq!(level.mortality().lives(), level.mortality().max_lives());
    assert!(level.signals().is_empty());
    assert_eq!(level.frame(), 0);
    assert_eq!(level.fixtures().len(), world.fixtures.len());
}

#[test]
fn test_reset_after_return_goal_uses_return_spawn() {
    let desc = LevelDesc {
        player: PlayerDesc {
            spawn: [1.0, 1.0],
            return_spawn: Some([15.0, 1.0]),
        },
        return_goal: Some(DoorDesc {
            position: [0.5, 1.5],
            size: [1.0, 2.0],
        }),
        ..spike_level()
    };
    let (mut world, mut level) = build(desc);

    world.begin(player_fixture(&level), fixture(&level, FixtureTag::ReturnGoal));
    let signals = level.advance(&mut world, DT, &PlayerIntent::default());
    assert!(signals.contains(LevelSignals::RETURN_REACHED));

    level.reset(&mut world).expect("reset");

    let spawn = Point2::new(15.0, 1.0);
    assert_eq!(level.respawn_point(), spawn);
    assert_eq!(world.body(level.player().body()).position, spawn);
}

fn switch(id: &str, x: f32) -> ActivatorDesc {
    ActivatorDesc {
        kind: ActivatorType::Switch,
        id: id.to_string(),
        position: [x, 1.0],
        duration: None,
    }
}

fn lit_flame(level: &Level) -> Option<FixtureHandle> {
    level.objects().values().find_map(|object| match object {
        LevelObject::Flamethrower(flamethrower) => flamethrower.flame(),
        _ => None,
    })
}

#[test]
fn test_corpse_burning_out_on_button_releases_it() {
    let mut desc = spike_level();
    desc.activators = vec![ActivatorDesc {
        kind: ActivatorType::Button,
        id: "A".to_string(),
        position: [3.0, 1.0],
        duration: None,
    }];
    desc.flamethrowers = vec![FlamethrowerDesc {
        position: [3.0, 3.0],
        active: true,
        activator: None,
    }];
    let config = GameplayConfig {
        corpse_burn_ticks: 3,
        ..GameplayConfig::default()
    };
    let (mut world, mut level) = build_with(desc, config);
    die_once(&mut world, &mut level);

    let (corpse, _) = level.corpses().iter().next().expect("one corpse");
    let corpse_fixture = fixture(&level, FixtureTag::Corpse(corpse));
    let key = level.activation().key_of("A").expect("activator A");
    let plate = fixture(&level, FixtureTag::Activator(key));
    let flame = lit_flame(&level).expect("flame is lit");
    let late_release = world.contact(corpse_fixture, plate, Vec::new());

    world.begin(corpse_fixture, plate);
    world.begin(corpse_fixture, flame);
    level.advance(&mut world, DT, &PlayerIntent::default());
    assert!(level.activation().find("A").expect("A").is_active());

    for _ in 0..10 {
        level.advance(&mut world, DT, &PlayerIntent::default());
    }

    let button = level.activation().find("A").expect("A");
    assert!(!level.corpses().contains(corpse));
    assert_eq!(button.pressing_count(), 0);
    assert!(!button.is_active());
    // only the player's touch of the spikes from `die_once` stays open
    assert_eq!(level.open_contacts().len(), 1);

    level.end_contact(&late_release);
    assert_eq!(level.activation().find("A").expect("A").pressing_count(), 0);
}

#[test]
fn test_lowering_spikes_ungrounds_player_standing_on_them() {
    let desc = LevelDesc {
        activators: vec![switch("S", 2.0)],
        spikes: vec![SpikesDesc {
            activator: Some("S".to_string()),
            ..spikes_at(5.0, 0.0)
        }],
        ..LevelDesc::default()
    };
    let (mut world, mut level) = build(desc);
    let feet = fixture(&level, FixtureTag::PlayerGroundSensor);
    let base = first_spikes(&level).solid().expect("spikes are raised");

    world.begin(feet, base);
    level.advance(&mut world, DT, &PlayerIntent::default());
    assert!(level.player().is_grounded());

    let key = level.activation().key_of("S").expect("switch S");
    world.begin(player_fixture(&level), fixture(&level, FixtureTag::Activator(key)));
    level.advance(&mut world, DT, &PlayerIntent::default());

    assert!(first_spikes(&level).solid().is_none());
    assert!(!level.player().is_grounded());
    assert_eq!(level.resolver().ground_contacts().len(), 0);
}

#[test]
fn test_switching_off_flame_stops_corpse_burning() {
    let mut desc = spike_level();
    desc.activators = vec![switch("S", 2.0)];
    desc.flamethrowers = vec![FlamethrowerDesc {
        position: [8.0, 3.0],
        active: true,
        activator: Some("S".to_string()),
    }];
    let (mut world, mut level) = build(desc);
    die_once(&mut world, &mut level);

    let (corpse, _) = level.corpses().iter().next().expect("one corpse");
    let flame = lit_flame(&level).expect("flame is lit");
    world.begin(fixture(&level, FixtureTag::Corpse(corpse)), flame);
    level.advance(&mut world, DT, &PlayerIntent::default());
    assert!(level.corpses().get(corpse).expect("corpse").is_burning());

    let key = level.activation().key_of("S").expect("switch S");
    world.begin(player_fixture(&level), fixture(&level, FixtureTag::Activator(key)));
    level.advance(&mut world, DT, &PlayerIntent::default());

    assert!(lit_flame(&level).is_none());
    let corpse = level.corpses().get(corpse).expect("corpse survives");
    assert!(!corpse.is_burning());
}
