//! Interactables known to the current frame and their one-shot activation.
use std::collections::BTreeMap;

use bevy::prelude::*;

use super::{
    inventory::Inventory,
    types::{InteractableId, InteractableTag, ItemKind},
};

/// Something in the world that can be gazed at and, once, activated.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interactable {
    tag: InteractableTag,
    active: bool,
}

impl Interactable {
    pub fn new(tag: InteractableTag) -> Self {
        Self { tag, active: true }
    }

    pub fn pickup(kind: ItemKind) -> Self {
        Self::new(InteractableTag::Pickup(kind))
    }

    pub fn terminal() -> Self {
        Self::new(InteractableTag::Terminal)
    }

    pub fn tag(&self) -> InteractableTag {
        self.tag
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Irreversibly deactivates. Returns `true` on the first call only.
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

/// Result of activating a pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    Collected(ItemKind),
    /// The item was already spent; nothing changed.
    Inactive,
    /// The id is unknown or is not a pickup.
    NotCollectable,
}

/// Frame-local view of all interactables, keyed by id.
#[derive(Debug, Default, Clone)]
pub struct InteractableRegistry {
    entries: BTreeMap<InteractableId, Interactable>,
    deactivated: Vec<InteractableId>,
}

impl InteractableRegistry {
    pub fn insert(&mut self, id: InteractableId, interactable: Interactable) {
        self.entries.insert(id, interactable);
    }

    pub fn get(&self, id: InteractableId) -> Option<&Interactable> {
        self.entries.get(&id)
    }

    pub fn is_active(&self, id: InteractableId) -> bool {
        self.get(id).is_some_and(Interactable::is_active)
    }

    /// Grants the pickup's item and deactivates it.
    pub fn collect(&mut self, id: InteractableId, inventory: &mut Inventory) -> CollectOutcome {
        let Some(entry) = self.entries.get_mut(&id) else {
            return CollectOutcome::NotCollectable;
        };
        let InteractableTag::Pickup(kind) = entry.tag() else {
            return CollectOutcome::NotCollectable;
        };
        if !entry.deactivate() {
            return CollectOutcome::Inactive;
        }

        inventory.grant(kind);
        self.deactivated.push(id);
        CollectOutcome::Collected(kind)
    }

    /// Ids deactivated since the registry was built, in activation order.
    pub fn deactivated(&self) -> &[InteractableId] {
        &self.deactivated
    }
}
