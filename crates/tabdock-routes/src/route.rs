//! Route data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque reference to a content page. Equality is identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageHandle(Uuid);

impl PageHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl Default for PageHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static configuration of a single tab item.
///
/// Only `is_prominent` and `requires_authentication` carry meaning for
/// selection; the rest is render payload passed through to the tab bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabItemConfiguration {
    pub title: String,
    /// Image reference for the unselected state
    pub image: Option<String>,
    /// Image reference for the selected state
    pub selected_image: Option<String>,
    pub badge_value: Option<String>,
    /// Visually emphasized item (e.g. a center action button)
    pub is_prominent: bool,
    /// Selection is gated on the host's authentication state
    pub requires_authentication: bool,
}

impl TabItemConfiguration {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_images(mut self, image: impl Into<String>, selected: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self.selected_image = Some(selected.into());
        self
    }

    pub fn with_badge(mut self, value: impl Into<String>) -> Self {
        self.badge_value = Some(value.into());
        self
    }

    pub fn prominent(mut self) -> Self {
        self.is_prominent = true;
        self
    }

    pub fn authenticated(mut self) -> Self {
        self.requires_authentication = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub configuration: TabItemConfiguration,
    pub page: PageHandle,
}

impl Route {
    pub fn new(configuration: TabItemConfiguration, page: PageHandle) -> Self {
        Self {
            configuration,
            page,
        }
    }

    pub fn requires_authentication(&self) -> bool {
        self.configuration.requires_authentication
    }

    pub fn is_prominent(&self) -> bool {
        self.configuration.is_prominent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_handles_are_distinct() {
        assert_ne!(PageHandle::new(), PageHandle::new());

        let id = Uuid::new_v4();
        assert_eq!(PageHandle::from_uuid(id), PageHandle::from_uuid(id));
    }

    #[test]
    fn test_configuration_builder() {
        let config = TabItemConfiguration::new("Profile")
            .with_images("person", "person.fill")
            .authenticated();

        assert_eq!(config.title, "Profile");
        assert_eq!(config.selected_image.as_deref(), Some("person.fill"));
        assert!(config.requires_authentication);
        assert!(!config.is_prominent);
    }

    #[test]
    fn test_configuration_defaults_from_json() {
        let config: TabItemConfiguration =
            serde_json::from_str(r#"{"title": "Add", "is_prominent": true}"#).unwrap();
        assert!(config.is_prominent);
        assert!(config.badge_value.is_none());
    }
}
