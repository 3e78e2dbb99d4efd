//! Flow plugin - installs the scene state controller and drives it each tick.

use bevy::gltf::Gltf;
use bevy::prelude::*;

use super::bevy_host::BevyFlowHost;
use super::controller::SceneStateController;
use crate::core::{FlowSet, FlowSignal, GameConfig, Mode};

/// The game's one scene state controller.
#[derive(Resource, Deref, DerefMut)]
pub struct GameFlow(pub SceneStateController<Handle<Gltf>, Handle<Scene>, Entity>);

/// Flow plugin - owns the controller resource and the systems that feed it.
pub struct FlowPlugin;

impl Plugin for FlowPlugin {
    fn build(&self, app: &mut App) {
        let world_source = app
            .world()
            .get_resource::<GameConfig>()
            .map(|config| config.world.clone())
            .unwrap_or_default();
        install_controller(app, GameFlow(SceneStateController::new(world_source)));

        app.add_systems(PostStartup, enter_initial_mode).add_systems(
            Update,
            (apply_flow_signals, drive_world_loader)
                .chain()
                .in_set(FlowSet::Apply),
        );
    }
}

/// Insert `flow` unless a controller already exists.
///
/// A second controller is a setup error: it is logged and dropped, and the
/// first one stays in charge. Returns whether `flow` was installed.
pub fn install_controller(app: &mut App, flow: GameFlow) -> bool {
    if app.world().contains_resource::<GameFlow>() {
        error!("Multiple scene state controllers detected, discarding the new one");
        return false;
    }
    app.insert_resource(flow);
    true
}

/// Run condition: true while the controller is in `mode`.
pub fn in_mode(mode: Mode) -> impl FnMut(Option<Res<GameFlow>>) -> bool + Clone {
    move |flow: Option<Res<GameFlow>>| flow.is_some_and(|flow| flow.current_mode() == mode)
}

/// Run the first transition once every panel has been spawned.
fn enter_initial_mode(config: Res<GameConfig>, mut flow: ResMut<GameFlow>, mut host: BevyFlowHost) {
    flow.request_state(config.initial_mode, &mut host);
}

/// Apply this tick's signals, each at most once.
fn apply_flow_signals(
    mut signals: EventReader<FlowSignal>,
    mut flow: ResMut<GameFlow>,
    mut host: BevyFlowHost,
) {
    for signal in FlowSignal::dedup(signals.read().copied()) {
        flow.handle_signal(signal, &mut host);
    }
}

/// Resume the active world load.
fn drive_world_loader(mut flow: ResMut<GameFlow>, mut host: BevyFlowHost) {
    flow.tick(&mut host);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CorePlugin, WorldSource};
    use crate::flow::testing::{headless_app, update_until};
    use crate::flow::{FlowPanel, LoadStatus, Panel};

    fn flow(bundle_path: &str) -> GameFlow {
        GameFlow(SceneStateController::new(WorldSource {
            bundle_path: bundle_path.to_string(),
            ..default()
        }))
    }

    #[test]
    fn second_controller_is_discarded() {
        let mut app = App::new();
        assert!(install_controller(&mut app, flow("bundles/first.glb")));
        assert!(!install_controller(&mut app, flow("bundles/second.glb")));

        let installed = app.world().resource::<GameFlow>();
        assert_eq!(installed.world_source().bundle_path, "bundles/first.glb");
    }

    #[test]
    fn in_mode_follows_controller() {
        let mut app = App::new();
        app.init_resource::<Toggle>();
        app.add_systems(Update, flip.run_if(in_mode(Mode::MainMenu)));

        app.update();
        assert!(!app.world().resource::<Toggle>().0);

        install_controller(&mut app, flow("bundles/world.glb"));
        app.update();
        assert!(app.world().resource::<Toggle>().0);
    }

    #[test]
    fn plugins_drive_a_full_session_through_signals() {
        let mut app = headless_app();
        let mut config = GameConfig::default();
        config.world.bundle_path = "bundles/missing.glb".to_string();
        app.insert_resource(config)
            .add_plugins((CorePlugin, FlowPlugin));

        let menu = app
            .world_mut()
            .spawn((FlowPanel(Panel::MainMenu), Visibility::default()))
            .id();
        let back = app
            .world_mut()
            .spawn((FlowPanel(Panel::BackToMenu), Visibility::default()))
            .id();
        let visibility = |app: &App, entity| *app.world().get::<Visibility>(entity).unwrap();

        // Startup enters the configured initial mode
        app.update();
        assert_eq!(app.world().resource::<GameFlow>().current_mode(), Mode::MainMenu);
        assert_eq!(visibility(&app, menu), Visibility::Inherited);
        assert_eq!(visibility(&app, back), Visibility::Hidden);

        // A duplicated signal within one tick starts a single load
        app.world_mut().send_event(FlowSignal::StartGame);
        app.world_mut().send_event(FlowSignal::StartGame);
        app.update();
        let flow = app.world().resource::<GameFlow>();
        assert_eq!(flow.current_mode(), Mode::Game);
        assert_eq!(visibility(&app, menu), Visibility::Hidden);
        assert_eq!(visibility(&app, back), Visibility::Inherited);

        let failed = update_until(&mut app, |app| {
            app.world().resource::<GameFlow>().load_status() == Some(LoadStatus::Failed)
        });
        assert!(failed);
        let flow = app.world().resource::<GameFlow>();
        assert_eq!(flow.current_mode(), Mode::Game);
        assert!(flow.world_instance().is_none());
        assert!(!flow.is_loading());

        app.world_mut().send_event(FlowSignal::ReturnToMenu);
        app.update();
        assert_eq!(app.world().resource::<GameFlow>().current_mode(), Mode::MainMenu);
        assert_eq!(visibility(&app, menu), Visibility::Inherited);
        assert_eq!(visibility(&app, back), Visibility::Hidden);

        app.world_mut().send_event(FlowSignal::Quit);
        app.update();
        assert!(!app.world().resource::<Events<AppExit>>().is_empty());
    }

    #[derive(Resource, Default)]
    struct Toggle(bool);

    fn flip(mut toggle: ResMut<Toggle>) {
        toggle.0 = true;
    }
}
