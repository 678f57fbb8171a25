// src/ui/hud/systems.rs
//
// Systems for spawning HUD panels and syncing their visibility.

use bevy::prelude::*;

use crate::interaction::{
    config::InteractionSettings,
    types::{ItemKind, PanelId},
};

use super::components::{HudPanel, HudSettings, HudVisibility};

// Visual constants
const PANEL_BACKGROUND: Color = Color::srgba(0.05, 0.05, 0.08, 0.85);
const PROMPT_COLOR: Color = Color::WHITE;
const ACQUIRED_COLOR: Color = Color::srgb(0.55, 0.9, 0.55);
const WARNING_COLOR: Color = Color::srgb(1.0, 0.45, 0.35);
const SUCCESS_COLOR: Color = Color::srgb(1.0, 0.9, 0.4); // Yellow/gold

/// Spawn the crosshair and every interaction panel, hidden.
pub fn spawn_hud(
    mut commands: Commands,
    settings: Res<HudSettings>,
    interaction: Option<Res<InteractionSettings>>,
) {
    let required = interaction
        .map(|config| config.required_item)
        .unwrap_or(ItemKind::RepairModule);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Name::new("Crosshair Root"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(settings.crosshair_size),
                    height: Val::Px(settings.crosshair_size),
                    ..default()
                },
                BackgroundColor(Color::WHITE),
            ));
        });

    let mut panels = Vec::new();
    panels.extend(ItemKind::ALL.map(PanelId::PickupPrompt));
    panels.push(PanelId::TerminalPrompt);
    panels.extend(ItemKind::ALL.map(PanelId::ItemAcquired));
    panels.push(PanelId::TerminalWarning);
    panels.push(PanelId::TerminalSuccess);

    for panel in panels {
        commands
            .spawn((
                panel_root(panel, &settings),
                Visibility::Hidden,
                HudPanel(panel),
                Name::new(format!("HUD {}", panel)),
            ))
            .with_children(|parent| {
                parent
                    .spawn((
                        Node {
                            padding: UiRect::all(Val::Px(settings.padding)),
                            ..default()
                        },
                        BackgroundColor(PANEL_BACKGROUND),
                    ))
                    .with_children(|panel_box| {
                        panel_box.spawn((
                            Text::new(panel_text(panel, required)),
                            TextFont {
                                font_size: settings.font_size,
                                ..default()
                            },
                            TextColor(panel_color(panel)),
                        ));
                    });
            });
    }

    info!("HUD spawned (terminal requires {})", required);
}

/// Copy the desired panel state onto the UI nodes.
pub fn apply_hud_visibility(
    hud: Res<HudVisibility>,
    mut panels: Query<(&HudPanel, &mut Visibility)>,
) {
    if !hud.is_changed() {
        return;
    }

    for (panel, mut visibility) in panels.iter_mut() {
        let target = if hud.is_visible(panel.0) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != target {
            *visibility = target;
        }
    }
}

fn panel_root(panel: PanelId, settings: &HudSettings) -> Node {
    match panel {
        PanelId::ItemAcquired(kind) => {
            let row = ItemKind::ALL
                .iter()
                .position(|candidate| *candidate == kind)
                .unwrap_or(0) as f32;
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(settings.inventory_offset + row * (settings.font_size * 2.5)),
                left: Val::Px(settings.inventory_offset),
                ..default()
            }
        }
        PanelId::PickupPrompt(_) | PanelId::TerminalPrompt => centered_row(Val::Percent(
            settings.prompt_offset_percent,
        )),
        PanelId::TerminalWarning | PanelId::TerminalSuccess => centered_row(Val::Percent(20.0)),
    }
}

fn centered_row(top: Val) -> Node {
    Node {
        position_type: PositionType::Absolute,
        top,
        width: Val::Percent(100.0),
        justify_content: JustifyContent::Center,
        ..default()
    }
}

fn panel_text(panel: PanelId, required: ItemKind) -> String {
    match panel {
        PanelId::PickupPrompt(kind) => format!("[E] Pick up {}", kind),
        PanelId::ItemAcquired(kind) => format!("{} acquired", capitalized(kind.label())),
        PanelId::TerminalPrompt => "[E] Use terminal".to_string(),
        PanelId::TerminalWarning => format!("Terminal offline: {} required", required),
        PanelId::TerminalSuccess => "Repair complete. Shutting down...".to_string(),
    }
}

fn panel_color(panel: PanelId) -> Color {
    match panel {
        PanelId::PickupPrompt(_) | PanelId::TerminalPrompt => PROMPT_COLOR,
        PanelId::ItemAcquired(_) => ACQUIRED_COLOR,
        PanelId::TerminalWarning => WARNING_COLOR,
        PanelId::TerminalSuccess => SUCCESS_COLOR,
    }
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::context::UiSink;

    #[test]
    fn panel_text_names_items() {
        assert_eq!(
            panel_text(PanelId::PickupPrompt(ItemKind::GasMask), ItemKind::RepairModule),
            "[E] Pick up gas mask"
        );
        assert_eq!(
            panel_text(PanelId::ItemAcquired(ItemKind::RepairModule), ItemKind::RepairModule),
            "Repair module acquired"
        );
        assert!(panel_text(PanelId::TerminalWarning, ItemKind::GasMask).contains("gas mask"));
    }

    #[test]
    fn syncs_panel_visibility_from_resource() {
        let mut app = App::new();
        app.init_resource::<HudVisibility>()
            .add_systems(Update, apply_hud_visibility);

        let prompt = app
            .world_mut()
            .spawn((HudPanel(PanelId::TerminalPrompt), Visibility::Hidden))
            .id();
        let warning = app
            .world_mut()
            .spawn((HudPanel(PanelId::TerminalWarning), Visibility::Inherited))
            .id();

        app.world_mut()
            .resource_mut::<HudVisibility>()
            .set_visible(PanelId::TerminalPrompt, true);
        app.update();

        let world = app.world();
        assert_eq!(
            world.entity(prompt).get::<Visibility>(),
            Some(&Visibility::Inherited)
        );
        assert_eq!(
            world.entity(warning).get::<Visibility>(),
            Some(&Visibility::Hidden)
        );
    }
}
