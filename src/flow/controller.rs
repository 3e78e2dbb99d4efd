//! Scene state controller - the single authority for the current mode.
//!
//! Every transition runs the same path: record the mode, broadcast it, tear
//! down whatever Game left behind, then run the entry actions of the new
//! mode. Teardown always finishes before a new load starts, so at most one
//! loader and one world instance exist at any time.

use bevy::log::{debug, info};

use super::host::{FlowHost, Panel};
use super::loader::{LoadStatus, WorldLoader};
use crate::core::{FlowSignal, Mode, WorldSource};

/// Callback invoked with every broadcast mode.
pub type ModeCallback = Box<dyn FnMut(Mode) + Send + Sync>;

/// Handle returned by [`SceneStateController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the current mode, the world loader and the world instance.
///
/// `B`, `A` and `I` are the host's bundle, resource and instance handles.
pub struct SceneStateController<B, A, I> {
    current_mode: Mode,
    world_source: WorldSource,
    active_load: Option<WorldLoader<B, A>>,
    world_instance: Option<I>,
    last_load_status: Option<LoadStatus>,
    subscribers: Vec<(SubscriptionId, ModeCallback)>,
    next_subscription: u64,
}

impl<B, A, I> SceneStateController<B, A, I> {
    /// Create a controller in [`Mode::MainMenu`] that loads `world_source`
    /// whenever Game is entered.
    ///
    /// No panel is touched until the first [`request_state`](Self::request_state).
    pub fn new(world_source: WorldSource) -> Self {
        Self {
            current_mode: Mode::MainMenu,
            world_source,
            active_load: None,
            world_instance: None,
            last_load_status: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn current_mode(&self) -> Mode {
        self.current_mode
    }

    pub fn world_instance(&self) -> Option<&I> {
        self.world_instance.as_ref()
    }

    /// Whether a world load is in flight.
    pub fn is_loading(&self) -> bool {
        self.active_load.is_some()
    }

    /// Status of the most recent load attempt, kept after the loader is gone.
    pub fn load_status(&self) -> Option<LoadStatus> {
        self.last_load_status
    }

    pub fn world_source(&self) -> &WorldSource {
        &self.world_source
    }

    /// Register a callback for mode broadcasts. Callbacks run in
    /// subscription order.
    pub fn subscribe(&mut self, callback: impl FnMut(Mode) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Switch to `target`. Always succeeds, including when `target` is
    /// already the current mode.
    pub fn request_state<H>(&mut self, target: Mode, host: &mut H)
    where
        H: FlowHost<Bundle = B, Asset = A, Instance = I>,
    {
        let previous = self.current_mode;
        self.current_mode = target;
        info!("Mode {:?} -> {:?}", previous, target);

        self.broadcast(target);

        // Any previous Game session is gone before the new mode's actions run
        self.teardown_world(host);

        match target {
            Mode::MainMenu => {
                host.set_visible(Panel::MainMenu, true);
                host.set_visible(Panel::Pedestal, true);
                host.set_visible(Panel::BackToMenu, false);
            }
            Mode::Game => {
                host.set_visible(Panel::MainMenu, false);
                host.set_visible(Panel::Pedestal, false);
                host.set_visible(Panel::BackToMenu, true);

                self.active_load = Some(WorldLoader::start(&self.world_source, host));
                self.last_load_status = Some(LoadStatus::Pending);
            }
        }
    }

    /// Apply one logical input signal.
    pub fn handle_signal<H>(&mut self, signal: FlowSignal, host: &mut H)
    where
        H: FlowHost<Bundle = B, Asset = A, Instance = I>,
    {
        match signal {
            FlowSignal::StartGame => self.request_state(Mode::Game, host),
            FlowSignal::ReturnToMenu if self.current_mode.is_game() => {
                self.request_state(Mode::MainMenu, host);
            }
            FlowSignal::ReturnToMenu => debug!("Ignoring return to menu outside of Game"),
            FlowSignal::Quit => {
                info!("Exit requested");
                host.request_exit();
            }
        }
    }

    /// Advance the active world load by one tick.
    pub fn tick<H>(&mut self, host: &mut H)
    where
        H: FlowHost<Bundle = B, Asset = A, Instance = I>,
    {
        let Some(loader) = self.active_load.as_mut() else {
            return;
        };

        let instance = loader.poll(host);
        let status = loader.status();
        self.last_load_status = Some(status);

        if let Some(instance) = instance {
            self.world_instance = Some(instance);
        }
        if status.is_finished() {
            self.active_load = None;
        }
    }

    fn broadcast(&mut self, mode: Mode) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(mode);
        }
    }

    fn teardown_world<H>(&mut self, host: &mut H)
    where
        H: FlowHost<Bundle = B, Asset = A, Instance = I>,
    {
        if let Some(instance) = self.world_instance.take() {
            debug!("Destroying world instance");
            host.destroy(instance);
        }
        if let Some(mut loader) = self.active_load.take() {
            loader.cancel(host);
            self.last_load_status = Some(loader.status());
        }
    }
}
