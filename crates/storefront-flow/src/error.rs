use storefront_api::ApiError;
use storefront_core::DraftError;
use thiserror::Error;

use crate::eligibility::Eligibility;

/// Rejected location-selector input. The selector's state is left untouched
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown region: '{0}'")]
    UnknownRegion(String),

    #[error("a region must be chosen before a sub-region")]
    NoRegionChosen,

    #[error("'{sub_region}' is not a sub-region of '{region}'")]
    SubRegionNotInRegion { region: String, sub_region: String },

    #[error("fulfillment point '{0}' is not in the loaded set")]
    PointNotAvailable(String),
}

/// Why a review submission did not go through.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The draft failed client-side checks; nothing was sent.
    #[error("review is not ready to submit: {0}")]
    Validation(#[from] DraftError),

    /// The gate does not currently allow this actor to review the item;
    /// nothing was sent.
    #[error("not eligible to review: {0}")]
    NotEligible(Eligibility),

    /// The form is not open for this actor and item; nothing was sent.
    #[error("review form is not open")]
    FormClosed,

    /// The server refused the review. `message` is shown to the user as-is.
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: ApiError,
    },
}
