//! Identifiers and value types shared by the look-and-interact pipeline.
use std::fmt;

use bevy::prelude::*;
use serde::Deserialize;

/// Stable identity of something that can be looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractableId(u64);

impl InteractableId {
    #[cfg_attr(not(test), allow(dead_code))]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl From<Entity> for InteractableId {
    fn from(entity: Entity) -> Self {
        Self(entity.to_bits())
    }
}

impl fmt::Display for InteractableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interactable#{}", self.0)
    }
}

/// Items the player can carry. Each kind is a single possession flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    RepairModule,
    GasMask,
}

impl ItemKind {
    pub const ALL: [ItemKind; 2] = [ItemKind::RepairModule, ItemKind::GasMask];

    pub fn label(self) -> &'static str {
        match self {
            Self::RepairModule => "repair module",
            Self::GasMask => "gas mask",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What kind of object a ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractableTag {
    Pickup(ItemKind),
    Terminal,
}

/// HUD panels the interaction layer toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    PickupPrompt(ItemKind),
    ItemAcquired(ItemKind),
    TerminalPrompt,
    TerminalWarning,
    TerminalSuccess,
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PickupPrompt(kind) => write!(f, "{} prompt", kind),
            Self::ItemAcquired(kind) => write!(f, "{} acquired", kind),
            Self::TerminalPrompt => f.write_str("terminal prompt"),
            Self::TerminalWarning => f.write_str("terminal warning"),
            Self::TerminalSuccess => f.write_str("terminal success"),
        }
    }
}

/// Where the player is looking from, and towards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub origin: Vec3,
    pub forward: Vec3,
}

impl Viewpoint {
    pub fn new(origin: Vec3, forward: Vec3) -> Self {
        Self { origin, forward }
    }

    pub fn from_transform(transform: &Transform) -> Self {
        Self::new(transform.translation, transform.forward().as_vec3())
    }
}
