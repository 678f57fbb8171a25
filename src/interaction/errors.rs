//! Configuration errors raised when a controller is missing a collaborator.
use std::fmt;

use serde::Deserialize;

/// A collaborator a controller needs before it can run detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MissingReference {
    Viewpoint,
    PromptPanel,
    Inventory,
    TerminalTarget,
}

impl fmt::Display for MissingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Viewpoint => "viewpoint",
            Self::PromptPanel => "prompt panel",
            Self::Inventory => "inventory",
            Self::TerminalTarget => "terminal target",
        };
        f.write_str(label)
    }
}

/// One or more required references are unset; the component skips its work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError {
    pub component: &'static str,
    pub missing: Vec<MissingReference>,
}

impl ConfigurationError {
    pub fn new(component: &'static str, mut missing: Vec<MissingReference>) -> Self {
        missing.sort();
        missing.dedup();
        Self { component, missing }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] missing reference(s): ", self.component)?;
        for (index, missing) in self.missing.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", missing)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigurationError {}

/// How often a persisting configuration error is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticMode {
    /// Report each distinct error once, again only after it has cleared.
    #[default]
    Once,
    /// Report on every tick the error persists.
    EveryTick,
}

/// Suppresses duplicate configuration reports.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticLatch {
    mode: DiagnosticMode,
    reported: Option<ConfigurationError>,
}

impl DiagnosticLatch {
    pub fn new(mode: DiagnosticMode) -> Self {
        Self {
            mode,
            reported: None,
        }
    }

    /// Returns `true` if `error` should be emitted now.
    pub fn should_report(&mut self, error: &ConfigurationError) -> bool {
        match self.mode {
            DiagnosticMode::EveryTick => {
                self.reported = Some(error.clone());
                true
            }
            DiagnosticMode::Once => {
                if self.reported.as_ref() == Some(error) {
                    return false;
                }
                self.reported = Some(error.clone());
                true
            }
        }
    }

    /// Re-arms the latch. Returns `true` if an error had been reported.
    pub fn clear(&mut self) -> bool {
        self.reported.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_inventory() -> ConfigurationError {
        ConfigurationError::new("PickupController", vec![MissingReference::Inventory])
    }

    #[test]
    fn formats_sorted_unique_references() {
        let error = ConfigurationError::new(
            "TerminalGate",
            vec![
                MissingReference::Inventory,
                MissingReference::Viewpoint,
                MissingReference::Inventory,
            ],
        );
        assert_eq!(
            error.to_string(),
            "[TerminalGate] missing reference(s): viewpoint, inventory"
        );
    }

    #[test]
    fn once_mode_reports_until_cleared() {
        let mut latch = DiagnosticLatch::new(DiagnosticMode::Once);
        let error = missing_inventory();

        assert!(latch.should_report(&error));
        assert!(!latch.should_report(&error));
        assert!(!latch.should_report(&error));

        let other = ConfigurationError::new("PickupController", vec![MissingReference::Viewpoint]);
        assert!(latch.should_report(&other));

        assert!(latch.clear());
        assert!(!latch.clear());
        assert!(latch.should_report(&error));
    }

    #[test]
    fn every_tick_mode_always_reports() {
        let mut latch = DiagnosticLatch::new(DiagnosticMode::EveryTick);
        let error = missing_inventory();

        assert!(latch.should_report(&error));
        assert!(latch.should_report(&error));
    }
}
