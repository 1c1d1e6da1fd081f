//! Map filter state and the pin query derived from it.

use std::collections::BTreeSet;

use layers::PinKind;
use serde::{Deserialize, Serialize};

pub const PINS_PATH: &str = "/api/v1/map/pins";

/// Filters selected in the map's filter panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFilters {
    pub region: Option<String>,
    pub style: Option<String>,
    pub tags: Vec<String>,
    /// Kinds to show; empty means every kind.
    pub types: BTreeSet<PinKind>,
}

impl MapFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank input clears the region.
    pub fn set_region(&mut self, region: Option<&str>) {
        self.region = non_blank(region);
    }

    pub fn set_style(&mut self, style: Option<&str>) {
        self.style = non_blank(style);
    }

    pub fn set_tags(&mut self, tags: impl IntoIterator<Item = String>) {
        self.tags = tags.into_iter().filter(|t| !t.trim().is_empty()).collect();
    }

    pub fn set_types(&mut self, types: impl IntoIterator<Item = PinKind>) {
        self.types = types.into_iter().collect();
    }

    /// Adds `kind` if absent, removes it otherwise.
    pub fn toggle_type(&mut self, kind: PinKind) {
        if !self.types.remove(&kind) {
            self.types.insert(kind);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.region.is_some()
            || self.style.is_some()
            || !self.tags.is_empty()
            || !self.types.is_empty()
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Parameters of one `GET /api/v1/map/pins` call.
///
/// Ordered so it can key the fetch cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinQuery {
    pub region: Option<String>,
    pub types: Vec<PinKind>,
    pub style: Option<String>,
    pub tags: Vec<String>,
}

impl PinQuery {
    pub fn from_filters(filters: &MapFilters) -> Self {
        Self {
            region: filters.region.clone(),
            types: filters.types.iter().cloned().collect(),
            style: filters.style.clone(),
            tags: filters.tags.clone(),
        }
    }

    pub fn path(&self) -> &'static str {
        PINS_PATH
    }

    /// URL parameters with empty values dropped; lists repeat their key.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(r) = &self.region {
            out.push(("region", r.clone()));
        }
        for t in &self.types {
            out.push(("types", t.as_str().to_string()));
        }
        if let Some(s) = &self.style {
            out.push(("style", s.clone()));
        }
        for t in &self.tags {
            out.push(("tags", t.clone()));
        }
        out.retain(|(_, v)| !v.trim().is_empty());
        out
    }
}

impl From<&MapFilters> for PinQuery {
    fn from(filters: &MapFilters) -> Self {
        Self::from_filters(filters)
    }
}
