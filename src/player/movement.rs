//! Third-person player movement and camera follow.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::core::{GameConfig, InputBindings};
use crate::flow::GameFlow;

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_observer(attach_player_controller)
        .add_observer(detach_player_controller)
        .add_systems(Update, (player_movement, follow_camera).chain());
}

/// Connect a freshly spawned player to the scene state controller.
fn attach_player_controller(
    trigger: Trigger<OnAdd, PlayerController>,
    mut players: Query<&mut PlayerController>,
    flow: Option<ResMut<GameFlow>>,
) {
    let Some(mut flow) = flow else {
        warn!("Player spawned without a scene state controller");
        return;
    };
    if let Ok(mut player) = players.get_mut(trigger.entity()) {
        player.attach(&mut flow.0);
        debug!("Player controller attached");
    }
}

/// Drop the player's subscription when it is removed.
fn detach_player_controller(
    trigger: Trigger<OnRemove, PlayerController>,
    mut players: Query<&mut PlayerController>,
    flow: Option<ResMut<GameFlow>>,
) {
    let Some(mut flow) = flow else {
        return;
    };
    if let Ok(mut player) = players.get_mut(trigger.entity()) {
        player.detach(&mut flow.0);
        debug!("Player controller detached");
    }
}

/// Vertical speed needed to reach `height` under `gravity` (negative is down).
pub fn jump_velocity(height: f32, gravity: f32) -> f32 {
    (height * -3.0 * gravity).max(0.0).sqrt()
}

/// Read the movement bindings as a 2D vector (x = right, y = forward).
pub fn read_move_input(keyboard: &ButtonInput<KeyCode>, bindings: &InputBindings) -> Vec2 {
    let axis = |negative: KeyCode, positive: KeyCode| {
        let mut value = 0.0;
        if keyboard.pressed(positive) {
            value += 1.0;
        }
        if keyboard.pressed(negative) {
            value -= 1.0;
        }
        value
    };

    Vec2::new(
        axis(bindings.left, bindings.right),
        axis(bindings.back, bindings.forward),
    )
}

/// Turn 2D input into a horizontal direction relative to the camera's facing.
///
/// The result is never longer than 1 so diagonals are not faster.
pub fn camera_relative(input: Vec2, camera_forward: Vec3) -> Vec3 {
    let forward = Vec3::new(camera_forward.x, 0.0, camera_forward.z)
        .try_normalize()
        .unwrap_or(Vec3::NEG_Z);
    let right = forward.cross(Vec3::Y);

    let direction = right * input.x + forward * input.y;
    if direction.length_squared() > 1.0 {
        direction.normalize()
    } else {
        direction
    }
}

/// Walk, jump and fall while the player controller is enabled.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<GameConfig>,
    camera_query: Query<&Transform, (With<CameraFollow>, Without<Player>)>,
    mut player_query: Query<
        (
            &PlayerController,
            &mut MovementState,
            &mut KinematicCharacterController,
            Option<&KinematicCharacterControllerOutput>,
        ),
        With<Player>,
    >,
) {
    let Ok((player, mut movement_state, mut controller, output)) = player_query.get_single_mut() else {
        return;
    };
    if !player.is_enabled() {
        return;
    }

    let tuning = &config.player;
    let dt = time.delta_secs();

    movement_state.is_grounded = output.is_some_and(|output| output.grounded);
    if movement_state.is_grounded && movement_state.vertical_velocity < 0.0 {
        movement_state.vertical_velocity = 0.0;
    }

    let camera_forward = camera_query
        .get_single()
        .map(|transform| *transform.forward())
        .unwrap_or(Vec3::NEG_Z);
    let input = read_move_input(&keyboard, &config.input);
    let horizontal = camera_relative(input, camera_forward) * tuning.speed * dt;

    if movement_state.is_grounded && keyboard.just_pressed(config.input.jump) {
        movement_state.vertical_velocity += jump_velocity(tuning.jump_height, tuning.gravity);
    }
    movement_state.vertical_velocity += tuning.gravity * dt;

    let vertical = Vec3::Y * movement_state.vertical_velocity * dt;
    controller.translation = Some(horizontal + vertical);
}

/// Smoothly keep the camera at its offset from the player, looking at them.
fn follow_camera(
    time: Res<Time>,
    player_query: Query<&Transform, With<Player>>,
    mut camera_query: Query<(&mut Transform, &CameraFollow), Without<Player>>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };

    for (mut transform, follow) in camera_query.iter_mut() {
        let target = player_transform.translation + follow.offset;
        let t = (follow.speed * time.delta_secs()).min(1.0);
        transform.translation = transform.translation.lerp(target, t);
        transform.look_at(player_transform.translation, Vec3::Y);
    }
}

/// Spawn the player character.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
) -> Entity {
    commands
        .spawn((
            Name::new("Player"),
            Player,
            PlayerController::default(),
            MovementState::default(),
            Mesh3d(meshes.add(Capsule3d::new(0.3, 1.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.55, 0.33, 0.18))),
            Transform::from_translation(position),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.2)),
                ..default()
            },
        ))
        .id()
}
