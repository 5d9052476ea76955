//! Customer reviews block with the review form

use crate::app::{AppAction, AppState, StorefrontStore};
use crate::selectors;
use crate::slices::ReviewsAction;
use crate::views::Dispatched;
use crate::views::markup::{status_notice, text};
use petshop_api::{CatalogApi, NewReview};
use petshop_core::RequestStatus;
use petshop_runtime::StoreError;
use std::fmt::Write;

/// Shown once a review is accepted for moderation
pub const THANK_YOU: &str = "Thank you! Your review will appear after moderation.";

/// Published reviews plus the outcome of the last submission
pub struct ReviewsBlock<'a, A>
where
    A: CatalogApi + Clone + 'static,
{
    store: &'a StorefrontStore<A>,
}

impl<'a, A> ReviewsBlock<'a, A>
where
    A: CatalogApi + Clone + 'static,
{
    /// Bind the block to a store
    #[must_use]
    pub const fn new(store: &'a StorefrontStore<A>) -> Self {
        Self { store }
    }

    /// Fetch published reviews
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn mount(&self) -> Result<Dispatched, StoreError> {
        let handle = self.store.send(AppAction::Reviews(ReviewsAction::Fetch)).await?;
        Ok(handle.into())
    }

    /// Cancel the reviews fetch
    ///
    /// A submission already sent keeps going and still settles.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn unmount(&self) -> Result<(), StoreError> {
        let _ = self.store.send(AppAction::Reviews(ReviewsAction::Cancel)).await?;
        Ok(())
    }

    /// Submit the review form
    ///
    /// The returned handles settle after the submission and, when it
    /// succeeds, the refetch of the list.
    /// Ignored while an earlier submission is still pending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn submit(&self, review: NewReview) -> Result<Dispatched, StoreError> {
        let handle = self
            .store
            .send(AppAction::Reviews(ReviewsAction::Submit(review)))
            .await?;
        Ok(handle.into())
    }

    /// Dismiss the submission message
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn dismiss(&self) -> Result<(), StoreError> {
        let _ = self
            .store
            .send(AppAction::Reviews(ReviewsAction::ResetSubmission))
            .await?;
        Ok(())
    }

    /// Render the block
    pub async fn render(&self) -> String {
        self.store.state(render_reviews_block).await
    }
}

/// Markup of the reviews block
#[must_use]
pub fn render_reviews_block(state: &AppState) -> String {
    let mut out = String::from(r#"<section class="reviews"><h2>Reviews</h2>"#);
    out.push_str(&status_notice(&state.reviews.reviews, "reviews"));

    out.push_str("<ul>");
    for review in state.reviews.reviews.value() {
        out.push_str(r#"<li class="review">"#);
        let _ = write!(out, r#"<p class="author">{}"#, text(&review.author));
        if let Some(animal) = &review.animal {
            let _ = write!(out, r#" <span class="animal">({})</span>"#, text(animal));
        }
        let _ = write!(out, "</p><blockquote>{}</blockquote></li>", text(&review.body));
    }
    out.push_str("</ul>");

    match selectors::review_submission_status(state) {
        RequestStatus::Pending => {
            out.push_str(r#"<p class="submission submission-pending">Sending...</p>"#);
        },
        RequestStatus::Succeeded => {
            let _ = write!(
                out,
                r#"<p class="submission submission-succeeded">{THANK_YOU}</p>"#
            );
        },
        RequestStatus::Failed => {
            let _ = write!(
                out,
                r#"<p class="submission submission-failed" role="alert">{}</p>"#,
                text(state.reviews.submission.error().unwrap_or("unknown error"))
            );
        },
        RequestStatus::Idle => {},
    }

    out.push_str("</section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use petshop_api::ReviewRecord;

    #[test]
    fn test_reviews_are_escaped() {
        let mut state = AppState::default();
        let request = state.reviews.reviews.begin();
        let _ = state.reviews.reviews.resolve(
            request,
            vec![ReviewRecord {
                id: Some(1),
                author: "Anna".to_string(),
                animal: Some("Cat".to_string()),
                body: "<3 this shop".to_string(),
            }],
            None,
        );

        let html = render_reviews_block(&state);
        assert!(html.contains("Anna"));
        assert!(html.contains("(Cat)"));
        assert!(html.contains("&lt;3 this shop"));
        assert!(!html.contains("submission"));
    }

    #[test]
    fn test_submission_messages() {
        let mut state = AppState::default();
        let request = state.reviews.submission.begin();
        assert!(render_reviews_block(&state).contains("Sending..."));

        let _ = state.reviews.submission.resolve(request, (), None);
        assert!(render_reviews_block(&state).contains(THANK_YOU));

        let request = state.reviews.submission.begin();
        let _ = state.reviews.submission.reject(request, "Invalid phone number");
        let html = render_reviews_block(&state);
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains("Invalid phone number"));
    }
}
