//! In-memory host used by the flow tests.

use std::collections::{HashMap, HashSet};
use std::task::Poll;

use super::error::LoadError;
use super::host::{BundleStorage, Panel, PanelHost, QuitHost, SceneSpawner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeBundle {
    pub id: u32,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeAsset {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FakeInstance(pub u32);

/// Records every call and lets a test decide how loads resolve.
pub struct FakeHost {
    /// What every bundle poll returns
    pub bundle_state: Poll<Result<(), LoadError>>,
    /// What every resource poll returns
    pub asset_state: Poll<Result<(), LoadError>>,
    /// Resource names found inside any bundle
    pub bundle_contents: Vec<String>,
    pub panels: HashMap<Panel, bool>,
    pub live_bundles: HashSet<u32>,
    pub live_assets: HashSet<u32>,
    pub live_instances: HashSet<FakeInstance>,
    pub bundle_requests: Vec<String>,
    pub instantiate_calls: u32,
    /// Names of the resources passed to `instantiate`
    pub instantiated: Vec<String>,
    pub destroy_calls: u32,
    pub exit_requests: u32,
    next_id: u32,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            bundle_state: Poll::Ready(Ok(())),
            asset_state: Poll::Ready(Ok(())),
            bundle_contents: vec!["World".to_string()],
            panels: HashMap::new(),
            live_bundles: HashSet::new(),
            live_assets: HashSet::new(),
            live_instances: HashSet::new(),
            bundle_requests: Vec::new(),
            instantiate_calls: 0,
            instantiated: Vec::new(),
            destroy_calls: 0,
            exit_requests: 0,
            next_id: 0,
        }
    }
}

impl FakeHost {
    /// Make every bundle behave like a missing file.
    pub fn fail_bundles(&mut self) {
        self.bundle_state = Poll::Ready(Err(LoadError::BundleUnavailable {
            path: "bundles/world.glb".to_string(),
            details: "file not found".to_string(),
        }));
    }

    pub fn visible(&self, panel: Panel) -> Option<bool> {
        self.panels.get(&panel).copied()
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl PanelHost for FakeHost {
    fn set_visible(&mut self, panel: Panel, visible: bool) {
        self.panels.insert(panel, visible);
    }
}

impl BundleStorage for FakeHost {
    type Bundle = FakeBundle;
    type Asset = FakeAsset;

    fn load_bundle(&mut self, path: &str) -> FakeBundle {
        let id = self.next_id();
        self.live_bundles.insert(id);
        self.bundle_requests.push(path.to_string());
        FakeBundle {
            id,
            path: path.to_string(),
        }
    }

    fn poll_bundle(&mut self, _bundle: &FakeBundle) -> Poll<Result<(), LoadError>> {
        self.bundle_state.clone()
    }

    fn load_asset(&mut self, bundle: &FakeBundle, name: &str) -> Result<FakeAsset, LoadError> {
        if !self.bundle_contents.iter().any(|n| n == name) {
            return Err(LoadError::AssetMissing {
                path: bundle.path.clone(),
                name: name.to_string(),
            });
        }
        let id = self.next_id();
        self.live_assets.insert(id);
        Ok(FakeAsset {
            id,
            name: name.to_string(),
        })
    }

    fn poll_asset(&mut self, _asset: &FakeAsset) -> Poll<Result<(), LoadError>> {
        self.asset_state.clone()
    }

    fn release_bundle(&mut self, bundle: FakeBundle) {
        assert!(self.live_bundles.remove(&bundle.id), "bundle released twice");
    }

    fn release_asset(&mut self, asset: FakeAsset) {
        assert!(self.live_assets.remove(&asset.id), "asset released twice");
    }
}

impl SceneSpawner for FakeHost {
    type Resource = FakeAsset;
    type Instance = FakeInstance;

    fn instantiate(&mut self, resource: &FakeAsset) -> FakeInstance {
        assert!(self.live_assets.contains(&resource.id), "instantiated a released asset");
        self.instantiate_calls += 1;
        self.instantiated.push(resource.name.clone());
        let instance = FakeInstance(self.next_id());
        self.live_instances.insert(instance);
        instance
    }

    fn destroy(&mut self, instance: FakeInstance) {
        assert!(self.live_instances.remove(&instance), "instance destroyed twice");
        self.destroy_calls += 1;
    }
}

impl QuitHost for FakeHost {
    fn request_exit(&mut self) {
        self.exit_requests += 1;
    }
}

/// Headless app with just enough asset support for [`BevyFlowHost`](super::BevyFlowHost).
pub fn headless_app() -> bevy::prelude::App {
    use bevy::gltf::Gltf;
    use bevy::prelude::*;

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .init_asset::<Gltf>()
        .init_asset::<Scene>();
    app
}

/// Run `app` until `done` holds, giving asset IO time to finish.
pub fn update_until(app: &mut bevy::prelude::App, mut done: impl FnMut(&mut bevy::prelude::App) -> bool) -> bool {
    for _ in 0..400 {
        app.update();
        if done(app) {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    false
}
