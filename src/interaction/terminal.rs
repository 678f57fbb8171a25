//! Terminal gate: a fixed gaze target whose activation is gated on an item.
use std::time::Duration;

use bevy::log::{debug, info, warn};

use crate::core::{
    schedule::{Fired, Scheduler, TimerHandle},
    session::SessionControl,
};

use super::{
    context::{FrameContext, UiSink},
    errors::{ConfigurationError, DiagnosticLatch, DiagnosticMode, MissingReference},
    gaze::{GazeDetector, TargetFilter},
    types::{InteractableId, ItemKind, PanelId, Viewpoint},
};

const COMPONENT: &str = "TerminalGate";

/// Deferred effects the terminal schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalAction {
    HideWarning,
    EndSession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    NotLooking,
    Looking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalTick {
    Disabled,
    NotLooking,
    Looking,
    /// Activated without the required item.
    Warned,
    /// Activated with the required item.
    Granted,
}

/// Panels are optional; an absent panel is simply never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerminalPanels {
    pub prompt: Option<PanelId>,
    pub warning: Option<PanelId>,
    pub success: Option<PanelId>,
}

impl TerminalPanels {
    pub fn standard() -> Self {
        Self {
            prompt: Some(PanelId::TerminalPrompt),
            warning: Some(PanelId::TerminalWarning),
            success: Some(PanelId::TerminalSuccess),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalTimings {
    pub warning_duration: Duration,
    pub end_session_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct TerminalGate {
    detector: GazeDetector,
    required_item: ItemKind,
    panels: TerminalPanels,
    timings: TerminalTimings,
    state: GateState,
    prompt_visible: bool,
    pending_hide: Option<TimerHandle>,
    end_session: Option<TimerHandle>,
    diagnostics: DiagnosticLatch,
}

impl TerminalGate {
    pub fn new(
        target: InteractableId,
        interact_distance: f32,
        required_item: ItemKind,
        panels: TerminalPanels,
        timings: TerminalTimings,
        diagnostics: DiagnosticMode,
    ) -> Self {
        Self {
            detector: GazeDetector::new(interact_distance, TargetFilter::Fixed(target)),
            required_item,
            panels,
            timings,
            state: GateState::NotLooking,
            prompt_visible: false,
            pending_hide: None,
            end_session: None,
            diagnostics: DiagnosticLatch::new(diagnostics),
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self) -> GateState {
        self.state
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn session_ending(&self) -> bool {
        self.end_session.is_some()
    }

    pub fn init(&mut self, ctx: &mut FrameContext<'_>) {
        self.state = GateState::NotLooking;
        self.prompt_visible = false;
        for panel in [self.panels.prompt, self.panels.warning, self.panels.success]
            .into_iter()
            .flatten()
        {
            ctx.ui.set_visible(panel, false);
        }

        if let Err(error) = self.check_references(ctx) {
            self.report(&error);
        }
    }

    pub fn tick(&mut self, ctx: &mut FrameContext<'_>) -> TerminalTick {
        let viewpoint = match self.check_references(ctx) {
            Ok(viewpoint) => viewpoint,
            Err(error) => {
                self.report(&error);
                self.look_away(ctx.ui);
                return TerminalTick::Disabled;
            }
        };
        if self.diagnostics.clear() {
            info!("[{}] references restored", COMPONENT);
        }

        if self
            .detector
            .detect(&viewpoint, ctx.ray_caster)
            .matching()
            .is_none()
        {
            self.look_away(ctx.ui);
            return TerminalTick::NotLooking;
        }

        if self.state == GateState::NotLooking {
            self.state = GateState::Looking;
            if let Some(prompt) = self.panels.prompt {
                ctx.ui.set_visible(prompt, true);
                self.prompt_visible = true;
            }
            debug!("[{}] Looking at terminal", COMPONENT);
        }

        if !ctx.input.activate_pressed() {
            return TerminalTick::Looking;
        }
        self.activate(ctx)
    }

    /// Applies a fired timer. Handles that no longer belong to this gate are ignored.
    pub fn on_deferred(
        &mut self,
        fired: Fired<TerminalAction>,
        ui: &mut dyn UiSink,
        session: &mut dyn SessionControl,
    ) {
        match fired.action {
            TerminalAction::HideWarning => {
                if self.pending_hide != Some(fired.handle) {
                    debug!("[{}] Ignoring stale {}", COMPONENT, fired.handle);
                    return;
                }
                self.pending_hide = None;
                if let Some(warning) = self.panels.warning {
                    ui.set_visible(warning, false);
                }
            }
            TerminalAction::EndSession => {
                if self.end_session != Some(fired.handle) {
                    debug!("[{}] Ignoring stale {}", COMPONENT, fired.handle);
                    return;
                }
                info!("[{}] Ending session", COMPONENT);
                session.terminate();
            }
        }
    }

    fn activate(&mut self, ctx: &mut FrameContext<'_>) -> TerminalTick {
        let has_item = ctx
            .inventory
            .as_deref()
            .is_some_and(|inventory| inventory.has(self.required_item));

        if has_item {
            self.grant(ctx.ui, ctx.scheduler);
            TerminalTick::Granted
        } else {
            self.warn_missing_item(ctx.ui, ctx.scheduler);
            TerminalTick::Warned
        }
    }

    fn warn_missing_item(
        &mut self,
        ui: &mut dyn UiSink,
        scheduler: &mut dyn Scheduler<TerminalAction>,
    ) {
        let Some(warning) = self.panels.warning else {
            debug!("[{}] {} missing; no warning panel", COMPONENT, self.required_item);
            return;
        };

        ui.set_visible(warning, true);
        if let Some(previous) = self.pending_hide.take() {
            scheduler.cancel(previous);
        }
        self.pending_hide = Some(scheduler.after(
            self.timings.warning_duration,
            TerminalAction::HideWarning,
        ));
        info!(
            "[{}] {} required; warning shown for {:.1}s",
            COMPONENT,
            self.required_item,
            self.timings.warning_duration.as_secs_f32()
        );
    }

    fn grant(&mut self, ui: &mut dyn UiSink, scheduler: &mut dyn Scheduler<TerminalAction>) {
        if let Some(success) = self.panels.success {
            ui.set_visible(success, true);
        }
        if self.end_session.is_some() {
            debug!("[{}] Session end already scheduled", COMPONENT);
            return;
        }

        self.end_session = Some(scheduler.after(
            self.timings.end_session_delay,
            TerminalAction::EndSession,
        ));
        info!(
            "[{}] {} accepted; session ends in {:.1}s",
            COMPONENT,
            self.required_item,
            self.timings.end_session_delay.as_secs_f32()
        );
    }

    fn look_away(&mut self, ui: &mut dyn UiSink) {
        if self.prompt_visible {
            if let Some(prompt) = self.panels.prompt {
                ui.set_visible(prompt, false);
            }
            self.prompt_visible = false;
        }
        self.state = GateState::NotLooking;
    }

    fn check_references(&self, ctx: &FrameContext<'_>) -> Result<Viewpoint, ConfigurationError> {
        match (ctx.viewpoint, ctx.inventory.is_some()) {
            (Some(viewpoint), true) => Ok(viewpoint),
            (viewpoint, has_inventory) => {
                let mut missing = Vec::new();
                if viewpoint.is_none() {
                    missing.push(MissingReference::Viewpoint);
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
            warn!("{}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec3;

    use super::*;
    use crate::core::session::RecordingSession;
    use crate::interaction::{context::testing::Rig, registry::Interactable};

    const WARNING: Duration = Duration::from_secs(3);
    const END_DELAY: Duration = Duration::from_secs(5);

    fn gate(target: InteractableId) -> TerminalGate {
        TerminalGate::new(
            target,
            2.0,
            ItemKind::RepairModule,
            TerminalPanels::standard(),
            TerminalTimings {
                warning_duration: WARNING,
                end_session_delay: END_DELAY,
            },
            DiagnosticMode::Once,
        )
    }

    fn rig_with_terminal() -> (Rig, InteractableId) {
        let mut rig = Rig::default();
        let id = rig.place(7, Interactable::terminal(), Vec3::new(0.0, 0.0, -1.5));
        (rig, id)
    }

    /// Advances the queue and feeds fired actions back into the gate.
    fn advance(
        rig: &mut Rig,
        gate: &mut TerminalGate,
        session: &mut RecordingSession,
        delta: Duration,
    ) -> usize {
        let fired = rig.queue.advance(delta);
        let count = fired.len();
        for fired in fired {
            gate.on_deferred(fired, &mut rig.ui, session);
        }
        count
    }

    #[test]
    fn prompt_shows_only_while_looking() {
        let (mut rig, terminal) = rig_with_terminal();
        let mut gate = gate(terminal);
        gate.init(&mut rig.frame(false));

        assert_eq!(gate.tick(&mut rig.frame(false)), TerminalTick::Looking);
        assert!(rig.ui.is_visible(PanelId::TerminalPrompt));
        assert_eq!(gate.state(), GateState::Looking);

        rig.look(Vec3::X);
        assert_eq!(gate.tick(&mut rig.frame(false)), TerminalTick::NotLooking);
        assert!(!rig.ui.is_visible(PanelId::TerminalPrompt));
        assert!(!gate.prompt_visible());
    }

    #[test]
    fn other_objects_block_the_terminal() {
        let (mut rig, terminal) = rig_with_terminal();
        rig.place(
            8,
            Interactable::pickup(ItemKind::GasMask),
            Vec3::new(0.0, 0.0, -0.75),
        );
        let mut gate = gate(terminal);

        assert_eq!(gate.tick(&mut rig.frame(true)), TerminalTick::NotLooking);
        assert!(rig.queue.is_empty());
    }

    #[test]
    fn missing_item_shows_warning_that_auto_hides() {
        let (mut rig, terminal) = rig_with_terminal();
        let mut gate = gate(terminal);
        let mut session = RecordingSession::default();

        assert_eq!(gate.tick(&mut rig.frame(true)), TerminalTick::Warned);
        assert!(rig.ui.is_visible(PanelId::TerminalWarning));
        assert!(!rig.ui.is_visible(PanelId::TerminalSuccess));
        assert!(!gate.session_ending());

        assert_eq!(advance(&mut rig, &mut gate, &mut session, Duration::from_millis(2900)), 0);
        assert!(rig.ui.is_visible(PanelId::TerminalWarning));

        assert_eq!(advance(&mut rig, &mut gate, &mut session, Duration::from_millis(100)), 1);
        assert!(!rig.ui.is_visible(PanelId::TerminalWarning));
        assert_eq!(session.terminations, 0);
        assert!(rig.queue.is_empty());
    }

    #[test]
    fn repeated_warning_restarts_the_hide_timer() {
        let (mut rig, terminal) = rig_with_terminal();
        let mut gate = gate(terminal);
        let mut session = RecordingSession::default();

        gate.tick(&mut rig.frame(true));
        assert_eq!(advance(&mut rig, &mut gate, &mut session, Duration::from_secs(2)), 0);

        gate.tick(&mut rig.frame(true));
        assert_eq!(rig.queue.len(), 1);

        // The first trigger would have fired at 3s.
        assert_eq!(advance(&mut rig, &mut gate, &mut session, Duration::from_secs(2)), 0);
        assert!(rig.ui.is_visible(PanelId::TerminalWarning));

        // Exactly one hide, three seconds after the second trigger.
        assert_eq!(advance(&mut rig, &mut gate, &mut session, Duration::from_secs(1)), 1);
        assert!(!rig.ui.is_visible(PanelId::TerminalWarning));
        assert_eq!(advance(&mut rig, &mut gate, &mut session, Duration::from_secs(10)), 0);
    }

    #[test]
    fn required_item_ends_session_after_delay() {
        let (mut rig, terminal) = rig_with_terminal();
        if let Some(inventory) = rig.inventory.as_mut() {
            inventory.grant(ItemKind::RepairModule);
        }
        let mut gate = gate(terminal);
        let mut session = RecordingSession::default();

        assert_eq!(gate.tick(&mut rig.frame(true)), TerminalTick::Granted);
        assert!(rig.ui.is_visible(PanelId::TerminalSuccess));
        assert!(!rig.ui.is_visible(PanelId::TerminalWarning));
        assert!(gate.session_ending());

        // A second activation does not stack another end.
        gate.tick(&mut rig.frame(false));
        assert_eq!(gate.tick(&mut rig.frame(true)), TerminalTick::Granted);
        assert_eq!(rig.queue.len(), 1);

        advance(&mut rig, &mut gate, &mut session, Duration::from_millis(4900));
        assert_eq!(session.terminations, 0);

        advance(&mut rig, &mut gate, &mut session, Duration::from_millis(100));
        assert_eq!(session.terminations, 1);
    }

    #[test]
    fn holding_activate_is_not_repeated_by_the_gate() {
        let (mut rig, terminal) = rig_with_terminal();
        let mut gate = gate(terminal);

        assert_eq!(gate.tick(&mut rig.frame(true)), TerminalTick::Warned);
        // The input seam reports a press for one frame only.
        assert_eq!(gate.tick(&mut rig.frame(false)), TerminalTick::Looking);
        assert_eq!(rig.queue.len(), 1);
    }

    #[test]
    fn missing_inventory_disables_gate() {
        let (mut rig, terminal) = rig_with_terminal();
        rig.inventory = None;
        let mut gate = gate(terminal);

        assert_eq!(gate.tick(&mut rig.frame(true)), TerminalTick::Disabled);
        assert!(!rig.ui.is_visible(PanelId::TerminalPrompt));
        assert!(rig.queue.is_empty());
    }

    #[test]
    fn stale_handles_are_ignored() {
        let (mut rig, terminal) = rig_with_terminal();
        let mut gate = gate(terminal);
        let mut session = RecordingSession::default();
        gate.tick(&mut rig.frame(true));

        gate.on_deferred(
            Fired {
                handle: TimerHandle::new(99),
                action: TerminalAction::HideWarning,
            },
            &mut rig.ui,
            &mut session,
        );
        gate.on_deferred(
            Fired {
                handle: TimerHandle::new(99),
                action: TerminalAction::EndSession,
            },
            &mut rig.ui,
            &mut session,
        );

        assert!(rig.ui.is_visible(PanelId::TerminalWarning));
        assert_eq!(session.terminations, 0);
    }
}
