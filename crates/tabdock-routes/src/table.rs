//! Route table
//!
//! Ordered and immutable. Index lookups are total: out-of-range indices
//! resolve to `None` rather than panicking.

use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::RouteError;
use crate::route::{PageHandle, Route, TabItemConfiguration};
use crate::Result;

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Arc<[Route]>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Result<Self> {
        if routes.is_empty() {
            return Err(RouteError::Empty);
        }

        let mut seen = HashSet::with_capacity(routes.len());
        for route in &routes {
            if !seen.insert(route.page) {
                return Err(RouteError::DuplicatePage(route.page.to_string()));
            }
        }

        Ok(Self {
            routes: routes.into(),
        })
    }

    /// Build a table from tab configurations, minting a fresh page handle for each.
    pub fn from_configurations<I>(configurations: I) -> Result<Self>
    where
        I: IntoIterator<Item = TabItemConfiguration>,
    {
        let routes = configurations
            .into_iter()
            .map(|configuration| Route::new(configuration, PageHandle::new()))
            .collect();
        Self::new(routes)
    }

    /// Parse a JSON array of tab configurations.
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(transparent)]
        struct Definition(Vec<TabItemConfiguration>);

        let Definition(configurations) = serde_json::from_str(json)?;
        Self::from_configurations(configurations)
    }

    pub fn route(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn index_of(&self, page: &PageHandle) -> Option<usize> {
        self.routes.iter().position(|route| &route.page == page)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.routes.len()
    }

    /// Validate an index, e.g. the initial selection passed at construction.
    pub fn check_index(&self, index: usize) -> Result<usize> {
        if self.contains_index(index) {
            Ok(index)
        } else {
            Err(RouteError::OutOfRange {
                index,
                len: self.routes.len(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
