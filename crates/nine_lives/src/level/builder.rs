//! Level population
//!
//! Reads every constant and validates the description before the first body
//! is created, so a level that fails to build leaves the world untouched.
//!
//! Constant sections (all optional except `player`):
//!
//! | section        | keys                                                        |
//! |----------------|-------------------------------------------------------------|
//! | `player`       | `force` `damping` `max_speed` `jump_force` `size` `density` `friction` `shrink` `sensor_height` |
//! | `terrain`      | `friction` `restitution`                                    |
//! | `spikes`       | `size` `solid_scale` `sensor_scale`                         |
//! | `activator`    | `size` `sensor_height`                                      |
//! | `box`          | `size` `density` `friction`                                 |
//! | `flamethrower` | `base_size` `flame_size`                                    |
//! | `laser`        | `plank_size`                                                |

use log::{info, warn};

use super::desc::{ActivatorType, LevelDesc};
use super::LevelError;
use crate::activation::{Activator, ActivationGraph};
use crate::config::{ConfigError, ConstantTable, GameplayConfig};
use crate::foundation::math::{Point2, Vec2};
use crate::objects::{
    laser, CorpseTemplate, Flamethrower, LaserBeam, LevelObject, LevelObjects, PushableBox,
    SpikeOrientation, Spikes, SpikesFixtures,
};
use crate::physics::{BodyDef, BodyHandle, FixtureDef, FixtureTag, Shape, WorldContext};
use crate::player::{Player, PlayerTuning};

/// Shapes and materials resolved from the constant table
#[derive(Debug, Clone)]
struct LevelConstants {
    tuning: PlayerTuning,
    player_body: FixtureDef,
    player_ground: FixtureDef,
    player_sides: [FixtureDef; 2],
    corpse: CorpseTemplate,
    terrain_friction: f32,
    terrain_restitution: f32,
    spikes: SpikesFixtures,
    activator_base: FixtureDef,
    activator_sensor: FixtureDef,
    box_size: Vec2,
    box_density: f32,
    box_friction: f32,
    flame_base: FixtureDef,
    flame: FixtureDef,
    laser_plank: Vec2,
}

impl LevelConstants {
    fn read(table: &ConstantTable, config: &GameplayConfig) -> Result<Self, ConfigError> {
        let player = table.table("player")?;
        let tuning = PlayerTuning::from_constants(player)?;
        let size = player.vec2_or("size", Vec2::new(0.8, 0.8))?;
        let shrink = player.vec2_or("shrink", Vec2::new(1.0, 1.0))?;
        let density = player.f32_or("density", 1.0)?;
        let friction = player.f32_or("friction", 0.0)?;
        let sensor_height = player.f32_or("sensor_height", 0.05)?;

        let half = size.component_mul(&shrink) / 2.0;
        let player_body = FixtureDef::solid(Shape::cuboid(half.x, half.y, Point2::origin()))
            .with_density(density)
            .with_friction(friction);
        let player_ground = FixtureDef::sensor(Shape::cuboid(
            half.x * 0.8,
            sensor_height / 2.0,
            Point2::new(0.0, -half.y),
        ));
        let side = |x: f32| {
            FixtureDef::sensor(Shape::cuboid(
                sensor_height / 2.0,
                half.y * 0.8,
                Point2::new(x, 0.0),
            ))
        };
        let corpse = CorpseTemplate {
            body: player_body.clone(),
            ground_sensor: Some(player_ground.clone()),
            linear_damping: config.corpse_linear_damping,
        };

        let terrain = table.section("terrain")?;

        let spikes = table.section("spikes")?;
        let spikes_size = spikes.vec2_or("size", Vec2::new(1.0, 0.5))?;
        let solid_scale = spikes.vec2_or("solid_scale", Vec2::new(1.0, 0.5))?;
        let sensor_scale = spikes.vec2_or("sensor_scale", Vec2::new(0.9, 0.5))?;
        let solid_half = spikes_size.component_mul(&solid_scale) / 2.0;
        let sensor_half = spikes_size.component_mul(&sensor_scale) / 2.0;

        let activator = table.section("activator")?;
        let activator_size = activator.vec2_or("size", Vec2::new(1.0, 0.2))?;
        let press_height = activator.f32_or("sensor_height", 0.1)?;

        let crate_box = table.section("box")?;
        let flamethrower = table.section("flamethrower")?;
        let base = flamethrower.vec2_or("base_size", Vec2::new(1.0, 0.5))?;
        let flame = flamethrower.vec2_or("flame_size", Vec2::new(0.6, 2.0))?;

        Ok(Self {
            tuning,
            player_body,
            player_ground,
            player_sides: [side(-half.x), side(half.x)],
            corpse,
            terrain_friction: terrain.f32_or("friction", 0.4)?,
            terrain_restitution: terrain.f32_or("restitution", 0.0)?,
            spikes: SpikesFixtures {
                solid: FixtureDef::solid(Shape::cuboid(
                    solid_half.x,
                    solid_half.y,
                    Point2::new(0.0, solid_half.y - spikes_size.y / 2.0),
                )),
                sensor: FixtureDef::sensor(Shape::cuboid(
                    sensor_half.x,
                    sensor_half.y,
                    Point2::new(0.0, spikes_size.y / 2.0 - sensor_half.y),
                )),
            },
            activator_base: FixtureDef::solid(Shape::cuboid(
                activator_size.x / 2.0,
                activator_size.y / 2.0,
                Point2::origin(),
            )),
            activator_sensor: FixtureDef::sensor(Shape::cuboid(
                activator_size.x / 2.0 * 0.9,
                press_height / 2.0,
                Point2::new(0.0, (activator_size.y + press_height) / 2.0),
            )),
            box_size: crate_box.vec2_or("size", Vec2::new(1.0, 1.0))?,
            box_density: crate_box.f32_or("density", 1.0)?,
            box_friction: crate_box.f32_or("friction", 0.5)?,
            flame_base: FixtureDef::solid(Shape::cuboid(base.x / 2.0, base.y / 2.0, Point2::origin())),
            flame: FixtureDef::sensor(Shape::cuboid(
                flame.x / 2.0,
                flame.y / 2.0,
                Point2::new(0.0, (base.y + flame.y) / 2.0),
            )),
            laser_plank: table.section("laser")?.vec2_or("plank_size", Vec2::new(0.5, 0.1))?,
        })
    }
}

/// Everything `populate` created
#[derive(Debug)]
pub(crate) struct Populated {
    pub player: Player,
    pub respawn_point: Point2,
    pub activation: ActivationGraph,
    pub objects: LevelObjects,
    pub lasers: Vec<LaserBeam>,
    pub corpse_template: CorpseTemplate,
    pub bodies: Vec<BodyHandle>,
}

fn point(coords: [f32; 2]) -> Point2 {
    Point2::new(coords[0], coords[1])
}

fn validate(desc: &LevelDesc, laser_plank: Vec2) -> Result<Vec<SpikeOrientation>, LevelError> {
    for (kind, outlines) in [("wall", &desc.walls), ("platform", &desc.platforms)] {
        for (index, outline) in outlines.iter().enumerate() {
            let vertices = outline.len() / 2;
            if vertices < 3 {
                return Err(LevelError::DegeneratePolygon {
                    kind,
                    index,
                    vertices,
                });
            }
        }
    }

    let plank_height_ok = laser_plank.y.is_finite() && laser_plank.y > 0.0;
    for (index, laser) in desc.lasers.iter().enumerate() {
        if !plank_height_ok || laser::plank_count(laser.length, laser_plank.x).is_none() {
            return Err(LevelError::InvalidLaser {
                index,
                length: laser.length,
                plank_width: laser_plank.x,
                plank_height: laser_plank.y,
                max_planks: laser::MAX_PLANKS,
            });
        }
    }

    let mut graph = ActivationGraph::new();
    for activator in &desc.activators {
        graph.add_activator(Activator::momentary(activator.id.as_str()))?;
    }

    desc.spikes
        .iter()
        .enumerate()
        .map(|(index, spikes)| {
            SpikeOrientation::from_degrees(spikes.angle).ok_or(LevelError::UnalignedSpikes {
                index,
                x: spikes.position[0],
                y: spikes.position[1],
                angle: spikes.angle,
            })
        })
        .collect()
}

/// Create every body of `desc` in the world
pub(crate) fn populate(
    desc: &LevelDesc,
    table: &ConstantTable,
    config: &GameplayConfig,
    ctx: &mut WorldContext<'_>,
    via_return: bool,
) -> Result<Populated, LevelError> {
    let constants = LevelConstants::read(table, config)?;
    let orientations = validate(desc, constants.laser_plank)?;

    let mut bodies = Vec::new();
    let mut activation = ActivationGraph::new();
    let mut objects = LevelObjects::with_key();

    // Doors
    for (door, tag) in [(&desc.goal, FixtureTag::Goal), (&desc.return_goal, FixtureTag::ReturnGoal)] {
        if let Some(door) = door {
            let body = ctx.world.create_body(&BodyDef::fixed(point(door.position)));
            let shape = Shape::cuboid(door.size[0] / 2.0, door.size[1] / 2.0, Point2::origin());
            ctx.fixtures.create(ctx.world, body, &FixtureDef::sensor(shape), tag);
            bodies.push(body);
        }
    }

    // Terrain
    for outline in desc.walls.iter().chain(&desc.platforms) {
        let body = ctx.world.create_body(&BodyDef::fixed(Point2::origin()));
        let def = FixtureDef::solid(Shape::polygon_from_flat(outline))
            .with_friction(constants.terrain_friction)
            .with_restitution(constants.terrain_restitution);
        ctx.fixtures.create(ctx.world, body, &def, FixtureTag::Terrain);
        bodies.push(body);
    }

    // Activators
    for authored in &desc.activators {
        let body = ctx.world.create_body(&BodyDef::fixed(point(authored.position)));
        ctx.fixtures
            .create(ctx.world, body, &constants.activator_base, FixtureTag::Terrain);
        let activator = match authored.kind {
            ActivatorType::Button => Activator::momentary(authored.id.as_str()),
            ActivatorType::Switch => Activator::latching(authored.id.as_str()),
            ActivatorType::Timed => Activator::timed(
                authored.id.as_str(),
                authored.duration.unwrap_or(config.default_timed_duration),
            ),
        };
        let key = activation.add_activator(activator.with_body(body))?;
        ctx.fixtures.create(
            ctx.world,
            body,
            &constants.activator_sensor,
            FixtureTag::Activator(key),
        );
        bodies.push(body);
    }

    // Activatables
    for (spikes, orientation) in desc.spikes.iter().zip(orientations) {
        let key = objects.insert_with_key(|key| {
            LevelObject::Spikes(Spikes::build(
                ctx,
                key,
                point(spikes.position),
                orientation,
                constants.spikes.clone(),
                spikes.active,
            ))
        });
        if let Some(id) = &spikes.activator {
            activation.connect(id.as_str(), key);
        }
    }

    for crate_box in &desc.boxes {
        let fixture = FixtureDef::solid(Shape::cuboid(
            constants.box_size.x / 2.0,
            constants.box_size.y / 2.0,
            Point2::origin(),
        ))
        .with_density(crate_box.density.unwrap_or(constants.box_density))
        .with_friction(crate_box.friction.unwrap_or(constants.box_friction));
        let key = objects.insert(LevelObject::PushableBox(PushableBox::build(
            ctx,
            point(crate_box.position),
            &fixture,
            crate_box.active,
        )));
        if let Some(id) = &crate_box.activator {
            activation.connect(id.as_str(), key);
        }
    }

    for flamethrower in &desc.flamethrowers {
        let key = objects.insert_with_key(|key| {
            LevelObject::Flamethrower(Flamethrower::build(
                ctx,
                key,
                point(flamethrower.position),
                &constants.flame_base,
                constants.flame.clone(),
                flamethrower.active,
            ))
        });
        if let Some(id) = &flamethrower.activator {
            activation.connect(id.as_str(), key);
        }
    }

    bodies.extend(objects.values().map(LevelObject::body));

    let lasers: Vec<LaserBeam> = desc
        .lasers
        .iter()
        .map(|laser| {
            LaserBeam::build(
                ctx,
                point(laser.position),
                laser.angle,
                laser.length,
                constants.laser_plank,
            )
        })
        .collect();
    bodies.extend(lasers.iter().map(LaserBeam::body));

    for id in activation.dangling_ids() {
        warn!("No activator named '{}'; its objects keep their initial state", id);
    }

    // Player
    let respawn_point = match (via_return, desc.player.return_spawn) {
        (true, Some(spawn)) => point(spawn),
        _ => point(desc.player.spawn),
    };
    let body = ctx.world.create_body(&BodyDef::dynamic(respawn_point));
    ctx.fixtures
        .create(ctx.world, body, &constants.player_body, FixtureTag::PlayerBody);
    ctx.fixtures.create(
        ctx.world,
        body,
        &constants.player_ground,
        FixtureTag::PlayerGroundSensor,
    );
    for side in &constants.player_sides {
        ctx.fixtures
            .create(ctx.world, body, side, FixtureTag::PlayerSideSensor);
    }
    bodies.push(body);

    info!(
        "Level populated: {} activator(s), {} object(s), {} laser(s)",
        desc.activators.len(),
        objects.len(),
        lasers.len()
    );

    Ok(Populated {
        player: Player::new(body, constants.tuning),
        respawn_point,
        activation,
        objects,
        lasers,
        corpse_template: constants.corpse,
        bodies,
    })
}
