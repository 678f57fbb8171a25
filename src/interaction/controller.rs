//! Pickup controller: tracks the looked-at item, toggles its prompt, and
//! collects it on the activate press.
use bevy::log::{debug, info, warn};

use super::{
    context::{FrameContext, UiSink},
    errors::{ConfigurationError, DiagnosticLatch, DiagnosticMode, MissingReference},
    gaze::{GazeDetector, TargetFilter},
    registry::CollectOutcome,
    types::{InteractableId, InteractableTag, ItemKind, PanelId, Viewpoint},
};

const COMPONENT: &str = "PickupController";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetState {
    #[default]
    Idle,
    Targeting(InteractableId),
}

/// What a tick did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupTick {
    /// A required reference is missing; nothing was detected.
    Disabled,
    Idle,
    Targeting(InteractableId),
    Collected { id: InteractableId, kind: ItemKind },
}

/// HUD panels a pickup controller drives. `prompt` is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickupPanels {
    pub prompt: Option<PanelId>,
    pub acquired: Option<PanelId>,
}

impl PickupPanels {
    pub fn for_item(kind: ItemKind) -> Self {
        Self {
            prompt: Some(PanelId::PickupPrompt(kind)),
            acquired: Some(PanelId::ItemAcquired(kind)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PickupController {
    kind: ItemKind,
    detector: GazeDetector,
    panels: PickupPanels,
    state: TargetState,
    prompt_visible: bool,
    acquired_visible: Option<bool>,
    diagnostics: DiagnosticLatch,
    /// Configuration errors actually emitted, after latch suppression.
    reports: u32,
}

impl PickupController {
    pub fn new(
        kind: ItemKind,
        interact_distance: f32,
        panels: PickupPanels,
        diagnostics: DiagnosticMode,
    ) -> Self {
        Self {
            kind,
            detector: GazeDetector::new(
                interact_distance,
                TargetFilter::Tag(InteractableTag::Pickup(kind)),
            ),
            panels,
            state: TargetState::Idle,
            prompt_visible: false,
            acquired_visible: None,
            diagnostics: DiagnosticLatch::new(diagnostics),
            reports: 0,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self) -> TargetState {
        self.state
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn reports(&self) -> u32 {
        self.reports
    }

    /// Resets tracking, hides the prompt, and reports missing references.
    pub fn init(&mut self, ctx: &mut FrameContext<'_>) {
        self.state = TargetState::Idle;
        self.prompt_visible = false;
        if let Some(prompt) = self.panels.prompt {
            ctx.ui.set_visible(prompt, false);
        }

        if let Err(error) = self.check_references(ctx) {
            self.report(&error);
        }
    }

    pub fn tick(&mut self, ctx: &mut FrameContext<'_>) -> PickupTick {
        let (viewpoint, prompt) = match self.check_references(ctx) {
            Ok(resolved) => resolved,
            Err(error) => {
                self.report(&error);
                self.release(ctx.ui);
                return PickupTick::Disabled;
            }
        };
        if self.diagnostics.clear() {
            info!("[{}] {} references restored", COMPONENT, self.kind);
        }

        let outcome = self.track_gaze(ctx, viewpoint, prompt);
        self.refresh_acquired(ctx);
        outcome
    }

    fn track_gaze(
        &mut self,
        ctx: &mut FrameContext<'_>,
        viewpoint: Viewpoint,
        prompt: PanelId,
    ) -> PickupTick {
        let target = self
            .detector
            .detect(&viewpoint, ctx.ray_caster)
            .matching()
            .filter(|id| ctx.interactables.is_active(*id));

        let Some(id) = target else {
            if let TargetState::Targeting(previous) = self.state {
                debug!("[{}] Lost sight of {}", COMPONENT, previous);
            }
            self.release(ctx.ui);
            return PickupTick::Idle;
        };

        if self.state != TargetState::Targeting(id) {
            self.hide_prompt(ctx.ui);
            self.state = TargetState::Targeting(id);
            self.show_prompt(ctx.ui, prompt);
            info!("[{}] Looking at {} ({})", COMPONENT, self.kind, id);
        }

        if !ctx.input.activate_pressed() {
            return PickupTick::Targeting(id);
        }
        let Some(inventory) = ctx.inventory.as_deref_mut() else {
            return PickupTick::Targeting(id);
        };

        match ctx.interactables.collect(id, inventory) {
            CollectOutcome::Collected(kind) => {
                self.release(ctx.ui);
                info!(
                    "[{}] {} collected and added to inventory ({})",
                    COMPONENT, kind, id
                );
                PickupTick::Collected { id, kind }
            }
            outcome => {
                warn!("[{}] Activation of {} had no effect: {:?}", COMPONENT, id, outcome);
                self.release(ctx.ui);
                PickupTick::Idle
            }
        }
    }

    fn refresh_acquired(&mut self, ctx: &mut FrameContext<'_>) {
        let (Some(panel), Some(inventory)) = (self.panels.acquired, ctx.inventory.as_deref())
        else {
            return;
        };
        let held = inventory.has(self.kind);
        if self.acquired_visible != Some(held) {
            ctx.ui.set_visible(panel, held);
            self.acquired_visible = Some(held);
        }
    }

    fn check_references(
        &self,
        ctx: &FrameContext<'_>,
    ) -> Result<(Viewpoint, PanelId), ConfigurationError> {
        match (ctx.viewpoint, self.panels.prompt, ctx.inventory.is_some()) {
            (Some(viewpoint), Some(prompt), true) => Ok((viewpoint, prompt)),
            (viewpoint, prompt, has_inventory) => {
                let mut missing = Vec::new();
                if viewpoint.is_none() {
                    missing.push(MissingReference::Viewpoint);
                }
                if prompt.is_none() {
                    missing.push(MissingReference::PromptPanel);
                }
                if !has_inventory {
                    missing.push(MissingReference::Inventory);
                }
                Err(ConfigurationError::new(COMPONENT, missing))
            }
        }
    }

    fn report(&mut self, error: &ConfigurationError) {
        if self.diagnostics.should_report(error) {
            self.reports = self.reports.saturating_add(1);
            warn!("{} ({})", error, self.kind);
        }
    }

    fn release(&mut self, ui: &mut dyn UiSink) {
        self.hide_prompt(ui);
        self.state = TargetState::Idle;
    }

    fn show_prompt(&mut self, ui: &mut dyn UiSink, prompt: PanelId) {
        if !self.prompt_visible {
            ui.set_visible(prompt, true);
            self.prompt_visible = true;
        }
    }

    fn hide_prompt(&mut self, ui: &mut dyn UiSink) {
        if !self.prompt_visible {
            return;
        }
        if let Some(prompt) = self.panels.prompt {
            ui.set_visible(prompt, false);
            debug!("[{}] {} prompt hidden", COMPONENT, self.kind);
        }
        self.prompt_visible = false;
    }
}
