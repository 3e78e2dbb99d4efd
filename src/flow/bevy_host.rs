//! Bevy implementation of the flow collaborators.
//!
//! - Bundles are glTF files loaded through the [`AssetServer`]
//! - The named resource is one of the bundle's named scenes
//! - Instances are [`SceneRoot`] entities marked with [`WorldInstance`]
//! - Panels are any entity carrying a [`FlowPanel`] marker

use std::task::Poll;

use bevy::asset::LoadState;
use bevy::ecs::system::SystemParam;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::geometry::TriMeshFlags;

use super::error::LoadError;
use super::host::{BundleStorage, Panel, PanelHost, QuitHost, SceneSpawner};

/// Marks an entity whose visibility follows the current mode.
#[derive(Component, Debug, Clone, Copy)]
pub struct FlowPanel(pub Panel);

/// Marker for the root of the instantiated world bundle.
#[derive(Component)]
pub struct WorldInstance;

/// Everything the scene state controller touches inside the Bevy world.
#[derive(SystemParam)]
pub struct BevyFlowHost<'w, 's> {
    commands: Commands<'w, 's>,
    asset_server: Res<'w, AssetServer>,
    gltfs: Res<'w, Assets<Gltf>>,
    panels: Query<'w, 's, (&'static FlowPanel, &'static mut Visibility)>,
    exit: EventWriter<'w, AppExit>,
}

fn handle_path<T: Asset>(handle: &Handle<T>) -> String {
    handle
        .path()
        .map(|path| path.to_string())
        .unwrap_or_else(|| format!("{:?}", handle.id()))
}

impl PanelHost for BevyFlowHost<'_, '_> {
    fn set_visible(&mut self, panel: Panel, visible: bool) {
        for (flow_panel, mut visibility) in self.panels.iter_mut() {
            if flow_panel.0 == panel {
                *visibility = if visible {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}

impl BundleStorage for BevyFlowHost<'_, '_> {
    type Bundle = Handle<Gltf>;
    type Asset = Handle<Scene>;

    fn load_bundle(&mut self, path: &str) -> Handle<Gltf> {
        self.asset_server.load(path.to_string())
    }

    fn poll_bundle(&mut self, bundle: &Handle<Gltf>) -> Poll<Result<(), LoadError>> {
        match self.asset_server.load_state(bundle.id()) {
            LoadState::Loaded => Poll::Ready(Ok(())),
            LoadState::Failed(err) => Poll::Ready(Err(LoadError::BundleUnavailable {
                path: handle_path(bundle),
                details: err.to_string(),
            })),
            LoadState::NotLoaded | LoadState::Loading => Poll::Pending,
        }
    }

    fn load_asset(&mut self, bundle: &Handle<Gltf>, name: &str) -> Result<Handle<Scene>, LoadError> {
        let missing = || LoadError::AssetMissing {
            path: handle_path(bundle),
            name: name.to_string(),
        };

        let gltf = self.gltfs.get(bundle).ok_or_else(missing)?;
        gltf.named_scenes.get(name).cloned().ok_or_else(missing)
    }

    fn poll_asset(&mut self, asset: &Handle<Scene>) -> Poll<Result<(), LoadError>> {
        if let LoadState::Failed(err) = self.asset_server.load_state(asset.id()) {
            return Poll::Ready(Err(LoadError::AssetUnavailable {
                name: handle_path(asset),
                details: err.to_string(),
            }));
        }

        if self.asset_server.is_loaded_with_dependencies(asset.id()) {
            Poll::Ready(Ok(()))
        } else {
            Poll::Pending
        }
    }

    fn release_bundle(&mut self, bundle: Handle<Gltf>) {
        debug!("Releasing bundle {}", handle_path(&bundle));
        drop(bundle);
    }

    fn release_asset(&mut self, asset: Handle<Scene>) {
        drop(asset);
    }
}

impl SceneSpawner for BevyFlowHost<'_, '_> {
    type Resource = Handle<Scene>;
    type Instance = Entity;

    fn instantiate(&mut self, resource: &Handle<Scene>) -> Entity {
        self.commands
            .spawn((
                Name::new("World"),
                WorldInstance,
                SceneRoot(resource.clone()),
                Transform::default(),
                Visibility::Visible,
                // Trimesh colliders for the world's meshes once the scene spawns
                AsyncSceneCollider {
                    shape: Some(ComputedColliderShape::TriMesh(
                        TriMeshFlags::MERGE_DUPLICATE_VERTICES,
                    )),
                    ..default()
                },
            ))
            .id()
    }

    fn destroy(&mut self, instance: Entity) {
        if let Some(entity) = self.commands.get_entity(instance) {
            entity.despawn_recursive();
        }
    }
}

impl QuitHost for BevyFlowHost<'_, '_> {
    fn request_exit(&mut self) {
        self.exit.send(AppExit::Success);
    }
}
