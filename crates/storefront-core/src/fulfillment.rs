//! Fulfillment (pickup) point records and the location selection they are
//! scoped to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Region, SubRegion};

/// Identifier assigned to a fulfillment point by the commerce API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A physical location where an order can be picked up.
///
/// Owned by the remote API; the client only ever holds a read-only copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentPoint {
    pub id: PointId,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Weekday name (`"monday"`, ...) → opening hours text (`"08:00-18:00"`).
    #[serde(default)]
    pub operating_hours: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// The shopper's current `(region, sub-region)` choice.
///
/// A set `sub_region` always belongs to the set `region`; the location
/// selector is the only writer and enforces that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LocationSelection {
    pub region: Option<Region>,
    pub sub_region: Option<SubRegion>,
}

impl LocationSelection {
    /// Returns the pair when both levels are chosen.
    #[must_use]
    pub fn pair(&self) -> Option<(&Region, &SubRegion)> {
        match (&self.region, &self.sub_region) {
            (Some(r), Some(s)) => Some((r, s)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.sub_region.is_none()
    }
}
