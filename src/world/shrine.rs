//! Interactive shrine - a platform that turns gold and sets a sphere bobbing
//! when the player steps onto it.

use bevy::prelude::*;
use bevy_kira_audio::prelude::{Audio, AudioControl};
use bevy_rapier3d::prelude::*;

use super::materials::StageMaterials;
use crate::audio::AudioAssets;
use crate::core::{GameConfig, ShrineTuning};
use crate::player::Player;

/// Shrine platform. `bob` is set once the shrine has first been activated.
#[derive(Component)]
pub struct Shrine {
    pub sphere: Entity,
    pub bob: Option<ShrineBob>,
}

/// Sensor volume above a shrine platform.
#[derive(Component)]
pub struct ShrineTrigger {
    pub shrine: Entity,
}

/// Marker for the floating sphere.
#[derive(Component)]
pub struct ShrineSphere;

/// Move `current` toward `target` by at most `max_delta`.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

/// Sphere height animation for an activated shrine.
#[derive(Debug, Clone, PartialEq)]
pub struct ShrineBob {
    platform_y: f32,
    offset_y: f32,
    amplitude: f32,
    speed: f32,
    elapsed: f32,
}

impl ShrineBob {
    pub fn new(platform_y: f32, tuning: &ShrineTuning) -> Self {
        Self {
            platform_y,
            offset_y: tuning.offset_y,
            amplitude: tuning.amplitude,
            speed: tuning.speed,
            elapsed: 0.0,
        }
    }

    /// Where the sphere snaps to on activation, below the platform.
    pub fn start_height(&self) -> f32 {
        self.platform_y - self.offset_y
    }

    pub fn rest_height(&self) -> f32 {
        self.platform_y + self.offset_y
    }

    /// Seconds of bobbing so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The player entered again: follow the platform to `platform_y` and
    /// return the snap height. The bob phase carries on where it was.
    pub fn reenter(&mut self, platform_y: f32) -> f32 {
        self.platform_y = platform_y;
        self.start_height()
    }

    /// Step the animation by `dt` and return the new sphere height.
    ///
    /// The bob is sampled before time advances, then pulled back toward the
    /// rest height by at most `speed * dt`.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let bobbed = self.rest_height() + self.amplitude * (self.elapsed * self.speed).sin();
        self.elapsed += dt;
        move_towards(bobbed, self.rest_height(), self.speed * dt)
    }
}

/// Spawn a shrine platform with its trigger and sphere.
pub fn spawn_shrine(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &StageMaterials,
    tuning: &ShrineTuning,
) -> Entity {
    let position = Vec3::new(tuning.position.0, tuning.position.1, tuning.position.2);

    let sphere = commands
        .spawn((
            Name::new("Shrine Sphere"),
            ShrineSphere,
            Mesh3d(meshes.add(Sphere::new(0.3))),
            MeshMaterial3d(materials.gingerbread.clone()),
            Transform::from_translation(position + Vec3::Y * tuning.offset_y),
        ))
        .id();

    let shrine = commands
        .spawn((
            Name::new("Shrine"),
            Shrine { sphere, bob: None },
            Mesh3d(meshes.add(Cuboid::new(2.0, 0.2, 2.0))),
            MeshMaterial3d(materials.stone.clone()),
            Transform::from_translation(position),
            Collider::cuboid(1.0, 0.1, 1.0),
        ))
        .id();

    commands.entity(shrine).with_children(|parent| {
        parent.spawn((
            ShrineTrigger { shrine },
            Transform::from_xyz(0.0, 0.6, 0.0),
            Collider::cuboid(0.9, 0.5, 0.9),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            // The player is kinematic, which fixed sensors ignore by default
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
        ));
    });

    shrine
}

/// The entity `player` collided with, if `event` is the player entering something.
pub fn entered_by(event: &CollisionEvent, player: Entity) -> Option<Entity> {
    match *event {
        CollisionEvent::Started(a, b, _) if a == player => Some(b),
        CollisionEvent::Started(a, b, _) if b == player => Some(a),
        _ => None,
    }
}

/// Activate a shrine every time the player enters its trigger.
pub fn activate_shrines(
    mut collisions: EventReader<CollisionEvent>,
    config: Res<GameConfig>,
    stage_materials: Res<StageMaterials>,
    audio_assets: Option<Res<AudioAssets>>,
    audio: Option<Res<Audio>>,
    triggers: Query<&ShrineTrigger>,
    players: Query<Entity, With<Player>>,
    mut shrines: Query<(&mut Shrine, &Transform, &mut MeshMaterial3d<StandardMaterial>)>,
    mut spheres: Query<&mut Transform, (With<ShrineSphere>, Without<Shrine>)>,
) {
    let Ok(player) = players.get_single() else {
        collisions.clear();
        return;
    };

    for event in collisions.read() {
        let Some(trigger) = entered_by(event, player).and_then(|entity| triggers.get(entity).ok()) else {
            continue;
        };
        let Ok((mut shrine, transform, mut material)) = shrines.get_mut(trigger.shrine) else {
            continue;
        };

        let platform_y = transform.translation.y;
        let snap_height = match shrine.bob.as_mut() {
            Some(bob) => bob.reenter(platform_y),
            None => shrine.bob.insert(ShrineBob::new(platform_y, &config.shrine)).start_height(),
        };
        if let Ok(mut sphere_transform) = spheres.get_mut(shrine.sphere) {
            sphere_transform.translation.y = snap_height;
        }
        material.0 = stage_materials.gold.clone();

        if let (Some(audio), Some(assets)) = (audio.as_ref(), audio_assets.as_ref()) {
            audio.play(assets.shrine_chime.clone());
        }
        info!("Shrine activated");
    }
}

/// Animate the spheres of activated shrines.
pub fn bob_shrine_spheres(
    time: Res<Time>,
    mut shrines: Query<&mut Shrine>,
    mut spheres: Query<&mut Transform, With<ShrineSphere>>,
) {
    let dt = time.delta_secs();

    for mut shrine in shrines.iter_mut() {
        let sphere = shrine.sphere;
        let Some(bob) = shrine.bob.as_mut() else {
            continue;
        };
        if let Ok(mut transform) = spheres.get_mut(sphere) {
            transform.translation.y = bob.advance(dt);
        }
    }
}
