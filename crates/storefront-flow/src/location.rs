//! Cascading region → sub-region → fulfillment point selector.
//!
//! One struct owns all three levels so no caller can ever observe a
//! sub-region that does not belong to the selected region, or a point set
//! fetched for a location that is no longer selected.
//!
//! ```text
//! NoRegion ──choose_region──▶ RegionChosen ──choose_sub_region──▶ SubRegionChosen
//!    ▲                            │  ▲                                  │
//!    └──────── clear_region ──────┘  └──────── clear_sub_region ────────┘
//! ```

use std::sync::Arc;

use storefront_core::{
    FulfillmentPoint, LocationSelection, PointId, Region, RegionCatalog, SubRegion,
};

use crate::error::SelectionError;
use crate::resolver::{
    FulfillmentPointResolver, FulfillmentPointSet, LocationKey, ResolveRequest, Resolution,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationState {
    NoRegion,
    RegionChosen(Region),
    SubRegionChosen(Region, SubRegion),
}

impl LocationState {
    #[must_use]
    pub fn region(&self) -> Option<&Region> {
        match self {
            LocationState::NoRegion => None,
            LocationState::RegionChosen(r) | LocationState::SubRegionChosen(r, _) => Some(r),
        }
    }

    #[must_use]
    pub fn sub_region(&self) -> Option<&SubRegion> {
        match self {
            LocationState::SubRegionChosen(_, s) => Some(s),
            LocationState::NoRegion | LocationState::RegionChosen(_) => None,
        }
    }
}

pub struct LocationSelector {
    catalog: Arc<RegionCatalog>,
    state: LocationState,
    region_query: String,
    sub_region_query: String,
    region_list_open: bool,
    sub_region_list_open: bool,
    resolver: FulfillmentPointResolver,
}

impl LocationSelector {
    #[must_use]
    pub fn new(catalog: Arc<RegionCatalog>) -> Self {
        Self {
            catalog,
            state: LocationState::NoRegion,
            region_query: String::new(),
            sub_region_query: String::new(),
            region_list_open: false,
            sub_region_list_open: false,
            resolver: FulfillmentPointResolver::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> &LocationState {
        &self.state
    }

    #[must_use]
    pub fn selection(&self) -> LocationSelection {
        LocationSelection {
            region: self.state.region().cloned(),
            sub_region: self.state.sub_region().cloned(),
        }
    }

    #[must_use]
    pub fn region_query(&self) -> &str {
        &self.region_query
    }

    #[must_use]
    pub fn sub_region_query(&self) -> &str {
        &self.sub_region_query
    }

    #[must_use]
    pub fn is_region_list_open(&self) -> bool {
        self.region_list_open
    }

    #[must_use]
    pub fn is_sub_region_list_open(&self) -> bool {
        self.sub_region_list_open
    }

    // ---------------------------------------------------------------------
    // Region level
    // ---------------------------------------------------------------------

    /// Updates the region search text and opens the candidate list.
    ///
    /// If a region is chosen and the text no longer names it, the region is
    /// dropped along with everything below it.
    pub fn set_region_query(&mut self, text: &str) {
        self.region_query = text.to_owned();
        self.region_list_open = true;

        let still_matches = self
            .state
            .region()
            .is_some_and(|r| r.as_str().eq_ignore_ascii_case(text.trim()));
        if self.state.region().is_some() && !still_matches {
            tracing::debug!(query = text, "region search no longer matches selection");
            self.reset_to_no_region();
        }
    }

    /// Regions matching the current search text.
    #[must_use]
    pub fn region_candidates(&self) -> Vec<&Region> {
        self.catalog.search_regions(&self.region_query)
    }

    /// Commits a region and closes the region list.
    ///
    /// Choosing the region that is already selected changes nothing below
    /// it and triggers no fetch.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownRegion`] if `name` is not in the
    /// catalog.
    pub fn choose_region(&mut self, name: &str) -> Result<(), SelectionError> {
        let region = self
            .catalog
            .region(name)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownRegion(name.to_owned()))?;

        self.region_query = region.as_str().to_owned();
        self.region_list_open = false;

        if self.state.region() == Some(&region) {
            return Ok(());
        }

        tracing::debug!(%region, "region chosen");
        self.state = LocationState::RegionChosen(region);
        self.sub_region_query.clear();
        self.sub_region_list_open = false;
        self.resolver.invalidate();
        Ok(())
    }

    /// Drops the region, the sub-region, the point set and the chosen point.
    pub fn clear_region(&mut self) {
        self.region_query.clear();
        self.region_list_open = false;
        self.reset_to_no_region();
    }

    // ---------------------------------------------------------------------
    // Sub-region level
    // ---------------------------------------------------------------------

    /// Updates the sub-region search text and opens the candidate list.
    ///
    /// Ignored while no region is chosen. If a sub-region is chosen and the
    /// text no longer names it, the sub-region and its points are dropped.
    pub fn set_sub_region_query(&mut self, text: &str) {
        if self.state.region().is_none() {
            return;
        }
        self.sub_region_query = text.to_owned();
        self.sub_region_list_open = true;

        let still_matches = self
            .state
            .sub_region()
            .is_some_and(|s| s.as_str().eq_ignore_ascii_case(text.trim()));
        if self.state.sub_region().is_some() && !still_matches {
            tracing::debug!(query = text, "sub-region search no longer matches selection");
            self.reset_to_region();
        }
    }

    /// Sub-regions of the chosen region matching the current search text.
    /// Empty while no region is chosen.
    #[must_use]
    pub fn sub_region_candidates(&self) -> Vec<&SubRegion> {
        match self.state.region() {
            Some(region) => self
                .catalog
                .search_sub_regions(region.as_str(), &self.sub_region_query),
            None => Vec::new(),
        }
    }

    /// Commits a sub-region of the chosen region and starts resolving its
    /// fulfillment points.
    ///
    /// Membership is checked against the chosen region's own sub-regions at
    /// call time, so a same-named sub-region of another region is refused.
    /// Returns `Ok(None)` when the pair is already resolved or in flight.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::NoRegionChosen`] if no region is selected.
    /// - [`SelectionError::SubRegionNotInRegion`] if `name` is not one of
    ///   the chosen region's sub-regions.
    pub fn choose_sub_region(
        &mut self,
        name: &str,
    ) -> Result<Option<ResolveRequest>, SelectionError> {
        let region = self
            .state
            .region()
            .cloned()
            .ok_or(SelectionError::NoRegionChosen)?;

        let sub_region = self
            .catalog
            .sub_region(region.as_str(), name)
            .cloned()
            .ok_or_else(|| SelectionError::SubRegionNotInRegion {
                region: region.to_string(),
                sub_region: name.to_owned(),
            })?;

        self.sub_region_query = sub_region.as_str().to_owned();
        self.sub_region_list_open = false;

        if self.state.sub_region() != Some(&sub_region) {
            tracing::debug!(%region, %sub_region, "sub-region chosen");
        }
        self.state = LocationState::SubRegionChosen(region.clone(), sub_region.clone());

        Ok(self.resolver.begin(LocationKey { region, sub_region }))
    }

    /// Drops the sub-region and its points, keeping the region.
    pub fn clear_sub_region(&mut self) {
        self.sub_region_query.clear();
        self.sub_region_list_open = false;
        self.reset_to_region();
    }

    // ---------------------------------------------------------------------
    // Fulfillment points
    // ---------------------------------------------------------------------

    /// Feeds a finished fetch back in. Returns `false` if it was stale and
    /// dropped.
    pub fn apply_resolution(&mut self, resolution: Resolution) -> bool {
        let live = match &self.state {
            LocationState::SubRegionChosen(r, s) => {
                r == &resolution.location().region && s == &resolution.location().sub_region
            }
            LocationState::NoRegion | LocationState::RegionChosen(_) => false,
        };
        if !live {
            tracing::debug!(
                location = %resolution.location(),
                "dropping result for a location that is no longer selected"
            );
            return false;
        }
        self.resolver.commit(resolution)
    }

    /// Re-issues the fetch for the current pair after a failure.
    pub fn retry(&mut self) -> Option<ResolveRequest> {
        self.resolver.retry()
    }

    /// Re-fetches the current pair, keeping the chosen point if it is still
    /// offered.
    pub fn refresh(&mut self) -> Option<ResolveRequest> {
        self.resolver.refresh()
    }

    #[must_use]
    pub fn point_set(&self) -> &FulfillmentPointSet {
        self.resolver.set()
    }

    #[must_use]
    pub fn points(&self) -> &[FulfillmentPoint] {
        self.resolver.set().points()
    }

    #[must_use]
    pub fn selected_point_id(&self) -> Option<&PointId> {
        self.resolver.selected()
    }

    #[must_use]
    pub fn selected_point(&self) -> Option<&FulfillmentPoint> {
        self.resolver.selected_point()
    }

    /// User picks a point from the loaded set.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::PointNotAvailable`] if `id` is not loaded.
    pub fn select_point(&mut self, id: &PointId) -> Result<(), SelectionError> {
        self.resolver.select(id)
    }

    /// Clears the chosen point from outside (e.g. after an order is placed).
    /// The next resolution auto-selects as if nothing had been chosen.
    pub fn reset_point(&mut self) {
        self.resolver.clear_selection();
    }

    fn reset_to_no_region(&mut self) {
        self.state = LocationState::NoRegion;
        self.sub_region_query.clear();
        self.sub_region_list_open = false;
        self.resolver.invalidate();
    }

    fn reset_to_region(&mut self) {
        if let LocationState::SubRegionChosen(region, _) = &self.state {
            self.state = LocationState::RegionChosen(region.clone());
        }
        self.resolver.invalidate();
    }
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;
