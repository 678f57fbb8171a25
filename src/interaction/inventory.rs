//! Possession flags carried by the player.
use bevy::prelude::*;

use super::types::ItemKind;

/// Items collected this session. Flags only ever go from `false` to `true`.
#[derive(Component, Debug, Default, Clone, PartialEq, Eq)]
pub struct Inventory {
    has_repair_module: bool,
    has_gas_mask: bool,
}

impl Inventory {
    /// Grants an item. Returns `true` if the flag changed.
    pub fn grant(&mut self, kind: ItemKind) -> bool {
        let flag = self.flag_mut(kind);
        let changed = !*flag;
        *flag = true;
        changed
    }

    pub fn has(&self, kind: ItemKind) -> bool {
        match kind {
            ItemKind::RepairModule => self.has_repair_module,
            ItemKind::GasMask => self.has_gas_mask,
        }
    }

    /// Kinds currently held, in declaration order.
    pub fn items(&self) -> impl Iterator<Item = ItemKind> + '_ {
        ItemKind::ALL.into_iter().filter(|kind| self.has(*kind))
    }

    fn flag_mut(&mut self, kind: ItemKind) -> &mut bool {
        match kind {
            ItemKind::RepairModule => &mut self.has_repair_module,
            ItemKind::GasMask => &mut self.has_gas_mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let inventory = Inventory::default();
        assert!(!inventory.has(ItemKind::RepairModule));
        assert!(!inventory.has(ItemKind::GasMask));
        assert_eq!(inventory.items().count(), 0);
    }

    #[test]
    fn grant_is_idempotent() {
        let mut once = Inventory::default();
        assert!(once.grant(ItemKind::RepairModule));

        let mut twice = Inventory::default();
        twice.grant(ItemKind::RepairModule);
        assert!(!twice.grant(ItemKind::RepairModule));

        assert_eq!(once, twice);
    }

    #[test]
    fn flags_are_independent() {
        let mut inventory = Inventory::default();
        inventory.grant(ItemKind::GasMask);

        assert!(inventory.has(ItemKind::GasMask));
        assert!(!inventory.has(ItemKind::RepairModule));
        assert_eq!(inventory.items().collect::<Vec<_>>(), vec![ItemKind::GasMask]);
    }
}
