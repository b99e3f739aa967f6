//! Client-side state machines for location-scoped fulfillment and reviews.
//!
//! All state here is owned by a single cooperative task. Asynchronous work
//! is split into a *request* (captured with a generation number when it is
//! issued) and a *completion* (applied only if that generation is still
//! current), so late responses for abandoned selections are dropped instead
//! of cancelled.

pub mod eligibility;
pub mod error;
pub mod location;
pub mod resolver;
pub mod review;

#[cfg(test)]
mod test_support;

pub use eligibility::{
    Eligibility, EligibilityCheck, EligibilityGate, EligibilityOutcome, GateStatus,
    IneligibleReason,
};
pub use error::{SelectionError, SubmitError};
pub use location::{LocationSelector, LocationState};
pub use resolver::{
    FulfillmentPointResolver, FulfillmentPointSet, LocationKey, ResolveRequest, ResolveStatus,
    Resolution,
};
pub use review::ReviewSubmissionFlow;
