//! Player-related components.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bevy::prelude::*;

use crate::flow::{SceneStateController, SubscriptionId};

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Enabled flag shared between a behaviour and its mode subscription.
#[derive(Debug, Clone, Default)]
pub struct ModeGate(Arc<AtomicBool>);

impl ModeGate {
    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Relaxed);
    }
}

/// Subscriber that enables player movement only while in Game.
///
/// The composition root calls [`attach`](Self::attach) when the player is
/// spawned and [`detach`](Self::detach) when it goes away.
#[derive(Component, Default)]
pub struct PlayerController {
    gate: ModeGate,
    subscription: Option<SubscriptionId>,
}

impl PlayerController {
    /// Start mirroring `controller`'s mode. Attaching twice is a no-op.
    pub fn attach<B, A, I>(&mut self, controller: &mut SceneStateController<B, A, I>) {
        if self.subscription.is_some() {
            return;
        }

        self.gate.set(controller.current_mode().is_game());
        let gate = self.gate.clone();
        self.subscription = Some(controller.subscribe(move |mode| gate.set(mode.is_game())));
    }

    /// Stop mirroring and disable movement.
    pub fn detach<B, A, I>(&mut self, controller: &mut SceneStateController<B, A, I>) {
        if let Some(id) = self.subscription.take() {
            controller.unsubscribe(id);
        }
        self.gate.set(false);
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }
}

/// Tracks player movement state for physics.
#[derive(Component, Default)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

/// Keeps a camera at a fixed offset from the player, smoothed over time.
#[derive(Component)]
pub struct CameraFollow {
    pub offset: Vec3,
    /// Interpolation speed multiplier (higher = faster)
    pub speed: f32,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 3.0, 6.0),
            speed: 6.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Mode, WorldSource};
    use crate::flow::testing::{FakeAsset, FakeBundle, FakeHost, FakeInstance};

    type Controller = SceneStateController<FakeBundle, FakeAsset, FakeInstance>;

    #[test]
    fn attached_controller_follows_broadcasts() {
        let mut host = FakeHost::default();
        let mut flow = Controller::new(WorldSource::default());
        let mut player = PlayerController::default();

        player.attach(&mut flow);
        assert!(player.is_attached());
        assert!(!player.is_enabled());

        flow.request_state(Mode::Game, &mut host);
        assert!(player.is_enabled());

        flow.request_state(Mode::MainMenu, &mut host);
        assert!(!player.is_enabled());
    }

    #[test]
    fn attach_picks_up_current_mode_once() {
        let mut host = FakeHost::default();
        let mut flow = Controller::new(WorldSource::default());
        flow.request_state(Mode::Game, &mut host);

        let mut player = PlayerController::default();
        player.attach(&mut flow);
        player.attach(&mut flow);
        assert!(player.is_enabled());
        assert_eq!(flow.subscriber_count(), 1);
    }

    #[test]
    fn detach_unsubscribes_and_disables() {
        let mut host = FakeHost::default();
        let mut flow = Controller::new(WorldSource::default());
        let mut player = PlayerController::default();
        player.attach(&mut flow);
        flow.request_state(Mode::Game, &mut host);

        player.detach(&mut flow);
        assert!(!player.is_attached());
        assert!(!player.is_enabled());
        assert_eq!(flow.subscriber_count(), 0);

        flow.request_state(Mode::Game, &mut host);
        assert!(!player.is_enabled());
    }
}
