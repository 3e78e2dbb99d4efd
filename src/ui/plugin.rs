//! UI plugin - main menu panel and the back-to-menu button.
//!
//! The panels are spawned once and never despawned. Their visibility is set
//! by the scene state controller through [`FlowPanel`] markers.

use bevy::prelude::*;
use bevy_kira_audio::prelude::{Audio, AudioControl};

use crate::audio::AudioAssets;
use crate::core::{FlowSet, FlowSignal};
use crate::flow::{FlowPanel, Panel};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_main_menu, setup_back_button))
            .add_systems(Update, menu_button_input.in_set(FlowSet::Input));
    }
}

/// Marker for menu buttons.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    StartGame,
    Quit,
    BackToMenu,
}

impl MenuButton {
    pub fn signal(self) -> FlowSignal {
        match self {
            MenuButton::StartGame => FlowSignal::StartGame,
            MenuButton::Quit => FlowSignal::Quit,
            MenuButton::BackToMenu => FlowSignal::ReturnToMenu,
        }
    }
}

const BUTTON_IDLE: Color = Color::srgb(0.35, 0.22, 0.12);
const BUTTON_HOVERED: Color = Color::srgb(0.45, 0.30, 0.16);
const BUTTON_PRESSED: Color = Color::srgb(0.55, 0.38, 0.20);

/// Set up the main menu panel. Shown or hidden by the controller.
fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Main Menu"),
            FlowPanel(Panel::MainMenu),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::End,
                padding: UiRect::right(Val::Px(120.0)),
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            // Title
            parent.spawn((
                Text::new("GINGERBREAD"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.85, 0.7)),
                Node {
                    margin: UiRect::bottom(Val::Px(50.0)),
                    ..default()
                },
            ));

            spawn_menu_button(parent, "Start", MenuButton::StartGame);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

/// Set up the back-to-menu button in the top-left corner.
fn setup_back_button(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Back To Menu"),
            FlowPanel(Panel::BackToMenu),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(20.0),
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            spawn_menu_button(parent, "Menu", MenuButton::BackToMenu);
        });
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.9, 0.85)),
            ));
        });
}

/// Turn button presses into flow signals.
fn menu_button_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    audio: Option<Res<Audio>>,
    audio_assets: Option<Res<AudioAssets>>,
    mut signals: EventWriter<FlowSignal>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                if let (Some(audio), Some(assets)) = (audio.as_ref(), audio_assets.as_ref()) {
                    audio.play(assets.button_click.clone());
                }
                signals.send(button.signal());
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVERED.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}
