//! Fulfillment point resolution for a confirmed `(region, sub-region)` pair.
//!
//! The resolver never awaits anything itself. [`FulfillmentPointResolver::begin`]
//! hands out a [`ResolveRequest`] stamped with the current generation; the
//! caller runs it and feeds the [`Resolution`] back through
//! [`FulfillmentPointResolver::commit`], which drops anything whose
//! generation or location no longer matches.

use storefront_api::{ApiError, CommerceApi};
use storefront_core::{FulfillmentPoint, PointId, Region, SubRegion};

use crate::error::SelectionError;

/// A fully chosen location: the only input a fetch is ever issued for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationKey {
    pub region: Region,
    pub sub_region: SubRegion,
}

impl std::fmt::Display for LocationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.region, self.sub_region)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveStatus {
    Idle,
    Loading,
    /// Zero points is a valid outcome, not an error.
    Loaded(Vec<FulfillmentPoint>),
    /// The fetch failed. Previously loaded points are not kept. `transient`
    /// hints whether retrying is likely to help.
    Error { message: String, transient: bool },
}

/// The committed result, tagged with the location it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct FulfillmentPointSet {
    pub location: Option<LocationKey>,
    pub status: ResolveStatus,
}

impl Default for FulfillmentPointSet {
    fn default() -> Self {
        Self {
            location: None,
            status: ResolveStatus::Idle,
        }
    }
}

impl FulfillmentPointSet {
    /// Loaded points; empty in every other status.
    #[must_use]
    pub fn points(&self) -> &[FulfillmentPoint] {
        match &self.status {
            ResolveStatus::Loaded(points) => points,
            _ => &[],
        }
    }

    #[must_use]
    pub fn contains(&self, id: &PointId) -> bool {
        self.points().iter().any(|p| &p.id == id)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.status, ResolveStatus::Loading)
    }
}

/// A pending fetch, captured at issue time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    generation: u64,
    location: LocationKey,
}

impl ResolveRequest {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn location(&self) -> &LocationKey {
        &self.location
    }

    /// Performs the network call. Does not touch any selector state.
    pub async fn execute<A: CommerceApi>(self, api: &A) -> Resolution {
        let result = api
            .fulfillment_points(&self.location.region, &self.location.sub_region)
            .await;
        Resolution {
            generation: self.generation,
            location: self.location,
            result,
        }
    }
}

/// A finished fetch waiting to be committed.
#[derive(Debug)]
pub struct Resolution {
    generation: u64,
    location: LocationKey,
    result: Result<Vec<FulfillmentPoint>, ApiError>,
}

impl Resolution {
    /// Builds a completion without going through [`ResolveRequest::execute`],
    /// for callers that run the fetch through their own transport.
    #[must_use]
    pub fn new(request: ResolveRequest, result: Result<Vec<FulfillmentPoint>, ApiError>) -> Self {
        Self {
            generation: request.generation,
            location: request.location,
            result,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn location(&self) -> &LocationKey {
        &self.location
    }
}

/// Owns the committed point set, the selected point, and the generation
/// counter that guards both.
#[derive(Debug, Default)]
pub struct FulfillmentPointResolver {
    generation: u64,
    set: FulfillmentPointSet,
    selected: Option<PointId>,
}

impl FulfillmentPointResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(&self) -> &FulfillmentPointSet {
        &self.set
    }

    #[must_use]
    pub fn selected(&self) -> Option<&PointId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn selected_point(&self) -> Option<&FulfillmentPoint> {
        let id = self.selected.as_ref()?;
        self.set.points().iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts resolving `location`.
    ///
    /// Returns `None` when that location is already loading or loaded, so
    /// one pair never triggers a second concurrent or repeated fetch. A new
    /// location drops the held selection; it belonged to the old set.
    pub fn begin(&mut self, location: LocationKey) -> Option<ResolveRequest> {
        if self.set.location.as_ref() == Some(&location)
            && matches!(
                self.set.status,
                ResolveStatus::Loading | ResolveStatus::Loaded(_)
            )
        {
            tracing::debug!(%location, "fulfillment points already resolved or in flight");
            return None;
        }

        if self.set.location.as_ref() != Some(&location) {
            self.selected = None;
        }
        Some(self.issue(location))
    }

    /// Re-issues the fetch for the current location after a failure.
    pub fn retry(&mut self) -> Option<ResolveRequest> {
        if !matches!(self.set.status, ResolveStatus::Error { .. }) {
            return None;
        }
        let location = self.set.location.clone()?;
        Some(self.issue(location))
    }

    /// Re-fetches the current location, keeping the held selection so it
    /// survives if it is still offered.
    pub fn refresh(&mut self) -> Option<ResolveRequest> {
        if self.set.is_loading() {
            return None;
        }
        let location = self.set.location.clone()?;
        Some(self.issue(location))
    }

    /// Forgets everything: any in-flight request becomes stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.set = FulfillmentPointSet::default();
        self.selected = None;
    }

    /// Applies a finished fetch if it is still the live one.
    ///
    /// Returns `false` (and changes nothing) for a stale completion.
    pub fn commit(&mut self, resolution: Resolution) -> bool {
        let Resolution {
            generation,
            location,
            result,
        } = resolution;

        if generation != self.generation || self.set.location.as_ref() != Some(&location) {
            tracing::debug!(
                %location,
                generation,
                current = self.generation,
                "discarding stale fulfillment point result"
            );
            return false;
        }

        match result {
            Ok(points) => {
                self.selected = match self.selected.take() {
                    Some(id) if points.iter().any(|p| p.id == id) => Some(id),
                    _ => points.first().map(|p| p.id.clone()),
                };
                tracing::info!(
                    %location,
                    count = points.len(),
                    selected = ?self.selected,
                    "fulfillment points resolved"
                );
                self.set.status = ResolveStatus::Loaded(points);
            }
            Err(e) => {
                tracing::warn!(%location, error = %e, "fulfillment point lookup failed");
                self.selected = None;
                self.set.status = ResolveStatus::Error {
                    message: e.user_message(),
                    transient: e.is_transient(),
                };
            }
        }
        true
    }

    /// Picks a point from the loaded set.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::PointNotAvailable`] if `id` is not among the
    /// loaded points.
    pub fn select(&mut self, id: &PointId) -> Result<(), SelectionError> {
        if !self.set.contains(id) {
            return Err(SelectionError::PointNotAvailable(id.to_string()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Clears the selected point. The next committed result auto-selects
    /// again.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn issue(&mut self, location: LocationKey) -> ResolveRequest {
        self.generation += 1;
        tracing::debug!(%location, generation = self.generation, "resolving fulfillment points");
        self.set = FulfillmentPointSet {
            location: Some(location.clone()),
            status: ResolveStatus::Loading,
        };
        ResolveRequest {
            generation: self.generation,
            location,
        }
    }
}
