//! Selection request types

use serde::{Deserialize, Serialize};

use crate::route::Route;

/// Provenance of a selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Tap on a bar item or a completed swipe
    User,
    /// Host code calling `select_tab`
    Programmatic,
    /// Applying a persisted index at first layout
    Restoration,
}

impl Trigger {
    /// Restoration is never animated.
    pub fn allows_animation(&self) -> bool {
        !matches!(self, Trigger::Restoration)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::User => "user",
            Trigger::Programmatic => "programmatic",
            Trigger::Restoration => "restoration",
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Trigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Trigger::User),
            "programmatic" => Ok(Trigger::Programmatic),
            "restoration" => Ok(Trigger::Restoration),
            _ => Err(format!("Unknown trigger: {}", s)),
        }
    }
}

/// Outcome of policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionDecision {
    Allow,
    Deny,
}

impl SelectionDecision {
    pub fn from_allowed(allowed: bool) -> Self {
        if allowed {
            SelectionDecision::Allow
        } else {
            SelectionDecision::Deny
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, SelectionDecision::Allow)
    }
}

/// A single selection attempt. Built fresh per attempt and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest {
    /// Selected index before this request was evaluated
    pub from_index: usize,
    pub to_index: usize,
    pub trigger: Trigger,
    /// Target route
    pub route: Route,
}

impl SelectionRequest {
    pub fn new(from_index: usize, to_index: usize, trigger: Trigger, route: Route) -> Self {
        Self {
            from_index,
            to_index,
            trigger,
            route,
        }
    }

    /// Re-selection of the tab that is already selected.
    pub fn is_reselection(&self) -> bool {
        self.from_index == self.to_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restoration_is_never_animated() {
        assert!(Trigger::User.allows_animation());
        assert!(Trigger::Programmatic.allows_animation());
        assert!(!Trigger::Restoration.allows_animation());
    }

    #[test]
    fn test_trigger_parsing() {
        assert_eq!("User".parse::<Trigger>().unwrap(), Trigger::User);
        assert_eq!(
            Trigger::Restoration.to_string().parse::<Trigger>().unwrap(),
            Trigger::Restoration
        );
        assert!("swipe".parse::<Trigger>().is_err());
    }

    #[test]
    fn test_decision_from_bool() {
        assert!(SelectionDecision::from_allowed(true).is_allowed());
        assert_eq!(SelectionDecision::from_allowed(false), SelectionDecision::Deny);
    }
}
