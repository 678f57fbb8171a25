//! Collaborator seams handed to controllers once per frame.
use bevy::prelude::*;

use crate::core::schedule::Scheduler;

use super::{
    gaze::RayCaster, inventory::Inventory, registry::InteractableRegistry,
    terminal::TerminalAction, types::PanelId, types::Viewpoint,
};

/// Discrete "activate" signal, true for exactly one frame per physical press.
pub trait ActivateInput {
    fn activate_pressed(&self) -> bool;
}

impl ActivateInput for bool {
    fn activate_pressed(&self) -> bool {
        *self
    }
}

/// Binds the activate signal to a keyboard key.
pub struct KeyBinding<'a> {
    pub keyboard: &'a ButtonInput<KeyCode>,
    pub key: KeyCode,
}

impl ActivateInput for KeyBinding<'_> {
    fn activate_pressed(&self) -> bool {
        self.keyboard.just_pressed(self.key)
    }
}

/// Host UI layer. Controllers only write visibility; they never read it back.
pub trait UiSink {
    fn set_visible(&mut self, panel: PanelId, visible: bool);
}

/// Everything a controller may touch during one frame.
///
/// `viewpoint` and `inventory` are optional so that a missing collaborator is
/// reported by the controller instead of failing the whole frame.
pub struct FrameContext<'a> {
    pub viewpoint: Option<Viewpoint>,
    pub ray_caster: &'a dyn RayCaster,
    pub input: &'a dyn ActivateInput,
    pub ui: &'a mut dyn UiSink,
    pub interactables: &'a mut InteractableRegistry,
    pub inventory: Option<&'a mut Inventory>,
    pub scheduler: &'a mut dyn Scheduler<TerminalAction>,
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashMap;

    use super::*;
    use crate::core::schedule::DeferredQueue;
    use crate::interaction::{
        gaze::{CastVolume, VolumeRayCaster},
        registry::Interactable,
        types::InteractableId,
    };

    /// UI sink that remembers the last visibility written per panel.
    #[derive(Debug, Default)]
    pub struct RecordingUi {
        pub visible: HashMap<PanelId, bool>,
        pub writes: Vec<(PanelId, bool)>,
    }

    impl RecordingUi {
        pub fn is_visible(&self, panel: PanelId) -> bool {
            self.visible.get(&panel).copied().unwrap_or(false)
        }
    }

    impl UiSink for RecordingUi {
        fn set_visible(&mut self, panel: PanelId, visible: bool) {
            self.visible.insert(panel, visible);
            self.writes.push((panel, visible));
        }
    }

    /// Owns every collaborator so tests can build a [`FrameContext`] per tick.
    pub struct Rig {
        pub viewpoint: Option<Viewpoint>,
        pub caster: VolumeRayCaster,
        pub registry: InteractableRegistry,
        pub inventory: Option<Inventory>,
        pub ui: RecordingUi,
        pub queue: DeferredQueue<TerminalAction>,
        pressed: bool,
    }

    impl Default for Rig {
        fn default() -> Self {
            Self {
                viewpoint: Some(Viewpoint::new(Vec3::ZERO, Vec3::NEG_Z)),
                caster: VolumeRayCaster::default(),
                registry: InteractableRegistry::default(),
                inventory: Some(Inventory::default()),
                ui: RecordingUi::default(),
                queue: DeferredQueue::default(),
                pressed: false,
            }
        }
    }

    impl Rig {
        /// Places a half-metre box at `center` and registers it.
        pub fn place(&mut self, id: u64, interactable: Interactable, center: Vec3) -> InteractableId {
            let id = InteractableId::new(id);
            self.registry.insert(id, interactable);
            self.caster.push(CastVolume {
                id,
                tag: interactable.tag(),
                center,
                half_extents: Vec3::splat(0.25),
            });
            id
        }

        pub fn look(&mut self, forward: Vec3) {
            self.viewpoint = Some(Viewpoint::new(Vec3::ZERO, forward));
        }

        pub fn frame(&mut self, pressed: bool) -> FrameContext<'_> {
            self.pressed = pressed;
            FrameContext {
                viewpoint: self.viewpoint,
                ray_caster: &self.caster,
                input: &self.pressed,
                ui: &mut self.ui,
                interactables: &mut self.registry,
                inventory: self.inventory.as_mut(),
                scheduler: &mut self.queue,
            }
        }
    }
}
