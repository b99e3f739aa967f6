//! Review form and submission for one item.
//!
//! The form only opens while the [`EligibilityGate`] says the actor may
//! review. A submission validates locally first; nothing reaches the
//! server for a draft that would be rejected on shape alone.

use storefront_api::{ApiError, CommerceApi};
use storefront_core::{Actor, ItemId, Review, ReviewDraft, ReviewPage};

use crate::eligibility::{Eligibility, EligibilityGate};
use crate::error::SubmitError;

#[derive(Debug)]
pub struct ReviewSubmissionFlow {
    item: ItemId,
    page_size: u32,
    form_open: bool,
    /// Actor key the form was opened for; `None` never opens it.
    form_actor: Option<String>,
    draft: ReviewDraft,
    banner: Option<String>,
    reviews: Option<ReviewPage>,
}

impl ReviewSubmissionFlow {
    #[must_use]
    pub fn new(item: ItemId, page_size: u32) -> Self {
        Self {
            item,
            page_size: page_size.max(1),
            form_open: false,
            form_actor: None,
            draft: ReviewDraft::default(),
            banner: None,
            reviews: None,
        }
    }

    #[must_use]
    pub fn item(&self) -> &ItemId {
        &self.item
    }

    #[must_use]
    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// Opens the form if the gate's verdict for `actor` on this item allows
    /// reviewing. A verdict checked for another actor or item never counts.
    pub fn open_form(&mut self, gate: &EligibilityGate, actor: &Actor) -> bool {
        self.form_open = gate.can_review(actor, &self.item);
        self.form_actor = if self.form_open {
            actor.key().map(str::to_owned)
        } else {
            None
        };
        self.form_open
    }

    /// Hides the form. The draft is kept.
    pub fn cancel(&mut self) {
        self.form_open = false;
        self.banner = None;
    }

    #[must_use]
    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.draft.rating = Some(rating);
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.draft.comment = comment.into();
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.draft.title = title;
    }

    /// `true` when the draft would pass local validation.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.draft.is_valid()
    }

    /// The last server rejection, shown verbatim.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    #[must_use]
    pub fn reviews(&self) -> Option<&ReviewPage> {
        self.reviews.as_ref()
    }

    /// Mean rating of the loaded page.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        self.reviews.as_ref().and_then(ReviewPage::page_average)
    }

    /// `true` when [`Self::average_rating`] covers only part of the item's
    /// reviews.
    #[must_use]
    pub fn average_is_partial(&self) -> bool {
        self.reviews.as_ref().is_some_and(|p| !p.is_complete())
    }

    /// Loads one page of the item's reviews, replacing the held page.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the listing call; the previously held
    /// page is kept in that case.
    pub async fn load_reviews<A: CommerceApi>(
        &mut self,
        api: &A,
        page: u32,
    ) -> Result<(), ApiError> {
        let page = api
            .list_reviews(&self.item, page.max(1), self.page_size)
            .await?;
        tracing::debug!(
            item = %self.item,
            page = page.pagination.page,
            count = page.reviews.len(),
            total = page.pagination.total,
            "reviews loaded"
        );
        self.reviews = Some(page);
        Ok(())
    }

    /// Submits the draft.
    ///
    /// The gate must hold an eligible verdict for this exact `(actor, item)`
    /// pair. If it holds none for the pair (the actor changed, or it was
    /// checked for another item) the pair is checked first.
    ///
    /// On success the draft is cleared, the form closes, the first page of
    /// reviews is reloaded and the gate is re-checked, which normally
    /// flips it to `already_reviewed`. On a server rejection the draft is
    /// kept and the server's message becomes the banner.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Validation`] if the draft is malformed; no request
    ///   is made.
    /// - [`SubmitError::NotEligible`] if the gate does not allow this actor
    ///   to review this item; the form is closed and no review is sent.
    /// - [`SubmitError::FormClosed`] if the form was never opened for this
    ///   actor; no review is sent.
    /// - [`SubmitError::Rejected`] if the server refuses the review.
    pub async fn submit<A: CommerceApi>(
        &mut self,
        api: &A,
        gate: &mut EligibilityGate,
        actor: &Actor,
    ) -> Result<Review, SubmitError> {
        let payload = self.draft.validate()?;

        let verdict = match gate.verdict_for(actor, &self.item) {
            Some(verdict) => verdict,
            None => {
                tracing::debug!(item = %self.item, "no verdict for this actor and item, checking");
                gate.check(api, actor, &self.item).await
            }
        };

        let user = match (actor.current_user(), verdict) {
            (Some(user), Eligibility::Eligible) => user,
            (None, _) => {
                self.form_open = false;
                return Err(SubmitError::NotEligible(Eligibility::Unauthenticated));
            }
            (Some(_), verdict) => {
                self.form_open = false;
                return Err(SubmitError::NotEligible(verdict));
            }
        };

        if !self.form_open || self.form_actor.as_deref() != Some(user.id.as_str()) {
            return Err(SubmitError::FormClosed);
        }

        match api.create_review(user, &self.item, &payload).await {
            Ok(review) => {
                tracing::info!(item = %self.item, review_id = %review.id, "review submitted");
                self.draft.clear();
                self.form_open = false;
                self.banner = None;

                if let Err(e) = self.load_reviews(api, 1).await {
                    tracing::warn!(item = %self.item, error = %e, "failed to reload reviews after submit");
                }
                gate.check(api, actor, &self.item).await;
                Ok(review)
            }
            Err(source) => {
                let message = source.user_message();
                tracing::warn!(item = %self.item, error = %source, "review submission rejected");
                self.banner = Some(message.clone());

                if source.is_authorization() {
                    let verdict = gate.check(api, actor, &self.item).await;
                    if !verdict.can_review() {
                        self.form_open = false;
                    }
                }
                Err(SubmitError::Rejected { message, source })
            }
        }
    }
}

#[cfg(test)]
#[path = "review_test.rs"]
mod tests;
