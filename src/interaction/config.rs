use std::{fs, path::Path, time::Duration};

use bevy::prelude::*;
use serde::Deserialize;

use super::{errors::DiagnosticMode, terminal::TerminalTimings, types::ItemKind};

const CONFIG_PATH: &str = "config/interaction.toml";

const DEFAULT_INTERACT_DISTANCE: f32 = 2.0;
const DEFAULT_WARNING_SECONDS: f32 = 3.0;
const DEFAULT_END_SESSION_SECONDS: f32 = 5.0;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInteractionConfig {
    #[serde(default)]
    pickup: RawPickup,
    #[serde(default)]
    terminal: RawTerminal,
    #[serde(default)]
    diagnostics: RawDiagnostics,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPickup {
    interact_distance: f32,
}

impl Default for RawPickup {
    fn default() -> Self {
        Self {
            interact_distance: DEFAULT_INTERACT_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTerminal {
    interact_distance: f32,
    required_item: ItemKind,
    warning_duration_seconds: f32,
    end_session_delay_seconds: f32,
}

impl Default for RawTerminal {
    fn default() -> Self {
        Self {
            interact_distance: DEFAULT_INTERACT_DISTANCE,
            required_item: ItemKind::RepairModule,
            warning_duration_seconds: DEFAULT_WARNING_SECONDS,
            end_session_delay_seconds: DEFAULT_END_SESSION_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDiagnostics {
    missing_reference: DiagnosticMode,
}

/// Runtime configuration derived from `config/interaction.toml`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InteractionSettings {
    pub pickup_distance: f32,
    pub terminal_distance: f32,
    pub required_item: ItemKind,
    pub terminal_timings: TerminalTimings,
    pub diagnostics: DiagnosticMode,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        RawInteractionConfig::default().into()
    }
}

impl InteractionSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Using default interaction settings.",
                    CONFIG_PATH, err
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawInteractionConfig>(raw).map(Into::into)
    }
}

impl From<RawInteractionConfig> for InteractionSettings {
    fn from(raw: RawInteractionConfig) -> Self {
        Self {
            pickup_distance: sanitize(raw.pickup.interact_distance, DEFAULT_INTERACT_DISTANCE),
            terminal_distance: sanitize(
                raw.terminal.interact_distance,
                DEFAULT_INTERACT_DISTANCE,
            ),
            required_item: raw.terminal.required_item,
            terminal_timings: TerminalTimings {
                warning_duration: seconds(
                    raw.terminal.warning_duration_seconds,
                    DEFAULT_WARNING_SECONDS,
                ),
                end_session_delay: seconds(
                    raw.terminal.end_session_delay_seconds,
                    DEFAULT_END_SESSION_SECONDS,
                ),
            },
            diagnostics: raw.diagnostics.missing_reference,
        }
    }
}

fn sanitize(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        fallback
    }
}

fn seconds(value: f32, fallback: f32) -> Duration {
    let fallback_duration = Duration::from_secs_f32(fallback);
    Duration::try_from_secs_f32(sanitize(value, fallback)).unwrap_or_else(|err| {
        warn!(
            "Duration of {} seconds is out of range ({}); using {} seconds",
            value, err, fallback
        );
        fallback_duration
    })
}
