// src/ui/hud/components.rs
//
// Components and resources for the interaction HUD.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::interaction::{context::UiSink, types::PanelId};

/// Tags a UI node with the panel it renders.
#[derive(Component, Debug, Clone, Copy)]
pub struct HudPanel(pub PanelId);

/// Desired visibility per panel, written by the interaction controllers.
///
/// Panels that were never written are hidden.
#[derive(Resource, Debug, Default)]
pub struct HudVisibility {
    panels: HashMap<PanelId, bool>,
}

impl HudVisibility {
    pub fn is_visible(&self, panel: PanelId) -> bool {
        self.panels.get(&panel).copied().unwrap_or(false)
    }
}

impl UiSink for HudVisibility {
    fn set_visible(&mut self, panel: PanelId, visible: bool) {
        self.panels.insert(panel, visible);
    }
}

/// Resource containing layout settings for HUD panels.
#[derive(Resource, Debug)]
pub struct HudSettings {
    /// Font size for prompts and banners (points).
    pub font_size: f32,

    /// Padding inside panels (pixels).
    pub padding: f32,

    /// Distance of the prompt below the screen centre (percent of height).
    pub prompt_offset_percent: f32,

    /// Offset of the acquired-item list from the top-left corner (pixels).
    pub inventory_offset: f32,

    /// Crosshair dot size (pixels).
    pub crosshair_size: f32,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            padding: 10.0,
            prompt_offset_percent: 58.0,
            inventory_offset: 20.0,
            crosshair_size: 4.0,
        }
    }
}
