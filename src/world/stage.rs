//! The static stage the world bundle is loaded into.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::materials::StageMaterials;
use super::shrine::spawn_shrine;
use crate::core::GameConfig;
use crate::flow::{FlowPanel, Panel};
use crate::player::{spawn_player, CameraFollow};

/// Marker for the character figure on the menu pedestal.
#[derive(Component)]
pub struct PedestalFigure;

/// Spawn ground, light, camera, pedestal, shrine and player.
pub fn setup_stage(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<GameConfig>,
) {
    let stage_materials = StageMaterials::new(&mut materials);

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.85, 0.8),
        brightness: 300.0,
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let spawn = Vec3::new(
        config.player.spawn.0,
        config.player.spawn.1,
        config.player.spawn.2,
    );
    let follow = CameraFollow::default();
    commands.spawn((
        Name::new("Stage Camera"),
        Camera3d::default(),
        Transform::from_translation(spawn + follow.offset).looking_at(spawn, Vec3::Y),
        follow,
    ));

    // Ground
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Cuboid::new(40.0, 0.2, 40.0))),
        MeshMaterial3d(stage_materials.ground.clone()),
        Transform::from_xyz(0.0, -0.1, 0.0),
        Collider::cuboid(20.0, 0.1, 20.0),
    ));

    spawn_pedestal(&mut commands, &mut meshes, &stage_materials, spawn + Vec3::new(-1.5, -1.0, -1.0));
    spawn_shrine(&mut commands, &mut meshes, &stage_materials, &config.shrine);
    spawn_player(&mut commands, &mut meshes, &mut materials, spawn);

    commands.insert_resource(stage_materials);
    info!("Stage ready");
}

/// Spawn the character display shown behind the main menu.
fn spawn_pedestal(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &StageMaterials,
    position: Vec3,
) {
    commands
        .spawn((
            Name::new("Pedestal"),
            FlowPanel(Panel::Pedestal),
            Mesh3d(meshes.add(Cylinder::new(0.6, 0.4))),
            MeshMaterial3d(materials.pedestal.clone()),
            Transform::from_translation(position + Vec3::Y * 0.2),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                PedestalFigure,
                Mesh3d(meshes.add(Capsule3d::new(0.25, 0.6))),
                MeshMaterial3d(materials.gingerbread.clone()),
                Transform::from_xyz(0.0, 0.75, 0.0),
            ));
        });
}

/// Slowly turn the figure on the pedestal.
pub fn spin_pedestal_figure(time: Res<Time>, mut figures: Query<&mut Transform, With<PedestalFigure>>) {
    for mut transform in figures.iter_mut() {
        transform.rotate_y(0.6 * time.delta_secs());
    }
}
