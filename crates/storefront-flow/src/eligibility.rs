//! Review eligibility gate.
//!
//! Folds authentication state and the server's verdict into one
//! [`Eligibility`] value. Every explicit trigger supersedes the previous one:
//! only the most recently triggered check's outcome is applied.

use storefront_api::{ApiError, CommerceApi, EligibilityResponse};
use storefront_core::{Actor, ItemId, User};

/// Why an authenticated actor may not review an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IneligibleReason {
    /// No completed order contains the item.
    PurchaseRequired,
    /// The actor already has a review for the item.
    AlreadyReviewed,
    /// Denied without a recognised code, or the check itself failed.
    Unknown,
}

impl IneligibleReason {
    /// Maps the server's reason string; anything unrecognised is `Unknown`.
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("purchase_required") => IneligibleReason::PurchaseRequired,
            Some("already_reviewed") => IneligibleReason::AlreadyReviewed,
            _ => IneligibleReason::Unknown,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            IneligibleReason::PurchaseRequired => "purchase_required",
            IneligibleReason::AlreadyReviewed => "already_reviewed",
            IneligibleReason::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eligibility {
    /// Not signed in. Decided locally, never sent to the server.
    Unauthenticated,
    Ineligible(IneligibleReason),
    Eligible,
}

impl Eligibility {
    #[must_use]
    pub fn can_review(self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    /// Machine-readable reason; `None` when eligible.
    #[must_use]
    pub fn reason_code(self) -> Option<&'static str> {
        match self {
            Eligibility::Unauthenticated => Some("unauthenticated"),
            Eligibility::Ineligible(reason) => Some(reason.code()),
            Eligibility::Eligible => None,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Eligibility::Unauthenticated => "Log in to review",
            Eligibility::Ineligible(IneligibleReason::PurchaseRequired) => {
                "Purchase this item to review it"
            }
            Eligibility::Ineligible(IneligibleReason::AlreadyReviewed) => {
                "You have already reviewed this item"
            }
            Eligibility::Ineligible(IneligibleReason::Unknown) => {
                "Reviews are unavailable for this item right now"
            }
            Eligibility::Eligible => "Write a review",
        }
    }

    fn from_response(response: &EligibilityResponse) -> Self {
        if response.can_review {
            Eligibility::Eligible
        } else {
            Eligibility::Ineligible(IneligibleReason::from_code(response.reason.as_deref()))
        }
    }
}

impl std::fmt::Display for Eligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateStatus {
    #[default]
    Idle,
    Checking,
    Decided(Eligibility),
}

/// A pending server check, stamped with the trigger that issued it.
#[derive(Debug, Clone)]
pub struct EligibilityCheck {
    generation: u64,
    user: User,
    item: ItemId,
}

impl EligibilityCheck {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn item(&self) -> &ItemId {
        &self.item
    }

    /// Performs the single network call for this trigger.
    pub async fn run<A: CommerceApi>(self, api: &A) -> EligibilityOutcome {
        let result = api.review_eligibility(&self.user, &self.item).await;
        EligibilityOutcome {
            generation: self.generation,
            item: self.item,
            result,
        }
    }
}

#[derive(Debug)]
pub struct EligibilityOutcome {
    generation: u64,
    item: ItemId,
    result: Result<EligibilityResponse, ApiError>,
}

/// The `(actor, item)` pair the latest trigger was made for. `actor` is
/// `None` for an anonymous actor.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Subject {
    actor: Option<String>,
    item: ItemId,
}

impl Subject {
    fn matches(&self, actor: &Actor, item: &ItemId) -> bool {
        self.actor.as_deref() == actor.key() && &self.item == item
    }
}

/// Sole owner of the current eligibility verdict.
#[derive(Debug, Default)]
pub struct EligibilityGate {
    generation: u64,
    subject: Option<Subject>,
    status: GateStatus,
}

impl EligibilityGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> GateStatus {
        self.status
    }

    /// The decided verdict for the latest trigger, if no check is pending.
    #[must_use]
    pub fn verdict(&self) -> Option<Eligibility> {
        match self.status {
            GateStatus::Decided(verdict) => Some(verdict),
            GateStatus::Idle | GateStatus::Checking => None,
        }
    }

    /// The decided verdict, only if it was checked for this exact actor and
    /// item.
    #[must_use]
    pub fn verdict_for(&self, actor: &Actor, item: &ItemId) -> Option<Eligibility> {
        self.subject
            .as_ref()
            .filter(|s| s.matches(actor, item))
            .and_then(|_| self.verdict())
    }

    #[must_use]
    pub fn can_review(&self, actor: &Actor, item: &ItemId) -> bool {
        self.verdict_for(actor, item)
            .is_some_and(Eligibility::can_review)
    }

    /// Starts a check for `(actor, item)`, superseding any pending one.
    ///
    /// Anonymous actors are decided immediately as
    /// [`Eligibility::Unauthenticated`] and no check is returned.
    pub fn trigger(&mut self, actor: &Actor, item: &ItemId) -> Option<EligibilityCheck> {
        self.generation += 1;
        self.subject = Some(Subject {
            actor: actor.key().map(str::to_owned),
            item: item.clone(),
        });
        match actor {
            Actor::Anonymous => {
                tracing::debug!(%item, "anonymous actor, skipping eligibility lookup");
                self.status = GateStatus::Decided(Eligibility::Unauthenticated);
                None
            }
            Actor::Authenticated(user) => {
                tracing::debug!(%item, generation = self.generation, "checking review eligibility");
                self.status = GateStatus::Checking;
                Some(EligibilityCheck {
                    generation: self.generation,
                    user: user.clone(),
                    item: item.clone(),
                })
            }
        }
    }

    /// Applies a finished check if it belongs to the latest trigger.
    ///
    /// Returns `false` for a superseded check. A failed lookup is recorded
    /// as `Ineligible(Unknown)` and is not retried.
    pub fn apply(&mut self, outcome: EligibilityOutcome) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(
                item = %outcome.item,
                generation = outcome.generation,
                current = self.generation,
                "discarding superseded eligibility result"
            );
            return false;
        }

        let verdict = match &outcome.result {
            Ok(response) => Eligibility::from_response(response),
            Err(e) => {
                tracing::warn!(item = %outcome.item, error = %e, "review eligibility check failed");
                Eligibility::Ineligible(IneligibleReason::Unknown)
            }
        };
        self.status = GateStatus::Decided(verdict);
        true
    }

    /// Triggers, runs and applies a check in one go, returning the verdict.
    pub async fn check<A: CommerceApi>(
        &mut self,
        api: &A,
        actor: &Actor,
        item: &ItemId,
    ) -> Eligibility {
        if let Some(pending) = self.trigger(actor, item) {
            let outcome = pending.run(api).await;
            self.apply(outcome);
        }
        self.verdict()
            .unwrap_or(Eligibility::Ineligible(IneligibleReason::Unknown))
    }
}
