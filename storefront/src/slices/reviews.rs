//! Reviews slice: published reviews and review submission
//!
//! A successful submission does not append the review locally. The backend
//! keeps new reviews unpublished until they are moderated, so the slice
//! refetches the list and shows whatever the server returns.

use crate::env::StorefrontEnvironment;
use crate::slices::{FetchSlot, api_effect};
use petshop_api::{ApiError, CatalogApi, NewReview, ReviewRecord, ReviewValidationError};
use petshop_core::{RequestId, SmallVec, Tracked, effect::Effect, reducer::Reducer, smallvec};
use thiserror::Error;

/// Why a review submission failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Rejected before sending
    #[error("Review rejected: {0}")]
    Invalid(#[from] ReviewValidationError),
    /// The API call failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Reviews slice state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewsState {
    /// Published reviews of the latest committed fetch
    pub reviews: Tracked<Vec<ReviewRecord>>,
    /// Status of the latest submission
    pub submission: Tracked<()>,
}

/// Reviews slice actions
#[derive(Clone, Debug)]
pub enum ReviewsAction {
    /// Fetch published reviews
    Fetch,
    /// A fetch completed
    Loaded {
        /// Request being completed
        request: RequestId,
        /// Reviews
        reviews: Vec<ReviewRecord>,
    },
    /// A fetch failed
    LoadFailed {
        /// Request being completed
        request: RequestId,
        /// Failure
        error: ApiError,
    },
    /// Submit a review from the form
    Submit(NewReview),
    /// A submission was accepted
    Submitted {
        /// Request being completed
        request: RequestId,
    },
    /// A submission failed
    SubmitFailed {
        /// Request being completed
        request: RequestId,
        /// Failure
        error: SubmitError,
    },
    /// Back to an idle submission (form closed); ignored while one is pending
    ResetSubmission,
    /// Drop the reviews fetch in flight
    ///
    /// A pending submission is not affected: the POST is already on its way
    /// and still ends as succeeded or failed.
    Cancel,
}

slice_reducer! {
    /// Reducer for [`ReviewsState`]
    ReviewsReducer
}

impl<A> Reducer for ReviewsReducer<A>
where
    A: CatalogApi + Clone + 'static,
{
    type State = ReviewsState;
    type Action = ReviewsAction;
    type Environment = StorefrontEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ReviewsAction::Fetch => {
                let request = state.reviews.begin();
                tracing::debug!(%request, "Fetching reviews");

                let api = env.api.clone();
                smallvec![api_effect(
                    async move { api.fetch_reviews().await },
                    move |result| match result {
                        Ok(reviews) => ReviewsAction::Loaded { request, reviews },
                        Err(error) => ReviewsAction::LoadFailed { request, error },
                    },
                )]
            },

            ReviewsAction::Loaded { request, reviews } => {
                state.reviews.commit_loaded(request, reviews, &*env.clock, "reviews");
                smallvec![Effect::None]
            },

            ReviewsAction::LoadFailed { request, error } => {
                state.reviews.commit_failed(request, &error, "reviews");
                smallvec![Effect::None]
            },

            ReviewsAction::Submit(review) => {
                if let Some(pending) = state.submission.in_flight() {
                    tracing::debug!(%pending, "Ignored review submission while one is pending");
                    return smallvec![Effect::None];
                }
                let request = state.submission.begin();

                // Invalid input fails right away, without a network round-trip
                if let Err(invalid) = review.validate() {
                    tracing::warn!(%request, error = %invalid, "Review rejected before submission");
                    let _ = state
                        .submission
                        .reject(request, SubmitError::from(invalid).to_string());
                    return smallvec![Effect::None];
                }

                tracing::debug!(%request, "Submitting review");
                let api = env.api.clone();
                smallvec![api_effect(
                    async move { api.submit_review(&review).await },
                    move |result| match result {
                        Ok(()) => ReviewsAction::Submitted { request },
                        Err(error) => ReviewsAction::SubmitFailed {
                            request,
                            error: error.into(),
                        },
                    },
                )]
            },

            ReviewsAction::Submitted { request } => {
                if state
                    .submission
                    .resolve(request, (), Some(env.clock.now()))
                    .is_stale()
                {
                    tracing::debug!(%request, "Discarded stale submission result");
                    return smallvec![Effect::None];
                }
                tracing::info!(%request, "Review submitted");
                self.reduce(state, ReviewsAction::Fetch, env)
            },

            ReviewsAction::SubmitFailed { request, error } => {
                if state.submission.reject(request, error.to_string()).is_stale() {
                    tracing::debug!(%request, "Discarded stale submission failure");
                } else {
                    tracing::warn!(%request, %error, "Review submission failed");
                }
                smallvec![Effect::None]
            },

            ReviewsAction::ResetSubmission => {
                if !state.submission.is_pending() {
                    state.submission.reset();
                }
                smallvec![Effect::None]
            },

            ReviewsAction::Cancel => {
                state.reviews.cancel_fetch("reviews");
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockCatalogApi;
    use petshop_core::RequestStatus;
    use petshop_testing::{ReducerTest, assertions, collect_actions, test_clock};
    use std::sync::Arc;

    fn env(api: MockCatalogApi) -> StorefrontEnvironment<MockCatalogApi> {
        StorefrontEnvironment::new(api, Arc::new(test_clock()))
    }

    fn reducer() -> ReviewsReducer<MockCatalogApi> {
        ReviewsReducer::new()
    }

    fn valid_review() -> NewReview {
        NewReview::new("Anna Petrova", "+375291234567", "Rex Barker", "Great shop")
    }

    #[test]
    fn test_invalid_review_fails_without_effect() {
        let api = MockCatalogApi::new();
        let mut review = valid_review();
        review.phone = "12".to_string();

        ReducerTest::new(reducer())
            .with_env(env(api.clone()))
            .given_state(ReviewsState::default())
            .when_action(ReviewsAction::Submit(review))
            .then_state(|state| {
                assert_eq!(state.submission.status(), RequestStatus::Failed);
                assert!(state.submission.error().is_some_and(|e| e.contains("phone")));
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        assert!(api.submitted_reviews().is_empty());
    }

    #[tokio::test]
    async fn test_submitted_refetches_instead_of_appending() {
        let env = env(MockCatalogApi::new());
        let mut state = ReviewsState::default();

        let effects = reducer().reduce(&mut state, ReviewsAction::Submit(valid_review()), &env);
        assert_eq!(state.submission.status(), RequestStatus::Pending);

        let actions = collect_actions(effects).await;
        let [ReviewsAction::Submitted { request }] = actions.as_slice() else {
            unreachable!("unexpected completion {actions:?}");
        };

        let effects =
            reducer().reduce(&mut state, ReviewsAction::Submitted { request: *request }, &env);

        assert_eq!(state.submission.status(), RequestStatus::Succeeded);
        assert!(state.reviews.value().is_empty());
        assert!(state.reviews.is_pending());
        assertions::assert_has_future_effect(&effects);
    }

    #[test]
    fn test_transport_failure_marks_failed() {
        let mut state = ReviewsState::default();
        let request = state.submission.begin();

        ReducerTest::new(reducer())
            .with_env(env(MockCatalogApi::new()))
            .given_state(state)
            .when_action(ReviewsAction::SubmitFailed {
                request,
                error: ApiError::RequestFailed("connection reset".into()).into(),
            })
            .then_state(|state| {
                assert_eq!(state.submission.status(), RequestStatus::Failed);
                assert!(state.reviews.value().is_empty());
                assert_eq!(state.reviews.status(), RequestStatus::Idle);
            })
            .run();
    }

    #[test]
    fn test_second_submit_while_pending_is_ignored() {
        let api = MockCatalogApi::new();
        let mut state = ReviewsState::default();
        let first = state.submission.begin();

        ReducerTest::new(reducer())
            .with_env(env(api.clone()))
            .given_state(state)
            .when_action(ReviewsAction::Submit(valid_review()))
            .then_state(move |state| {
                assert!(state.submission.is_current(first));
                assert!(state.submission.is_pending());
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        assert!(api.submitted_reviews().is_empty());
    }

    #[test]
    fn test_cancel_keeps_pending_submission() {
        let mut state = ReviewsState::default();
        let fetch = state.reviews.begin();
        let submit = state.submission.begin();

        ReducerTest::new(reducer())
            .with_env(env(MockCatalogApi::new()))
            .given_state(state)
            .when_action(ReviewsAction::Cancel)
            .when_action(ReviewsAction::ResetSubmission)
            .then_state(move |state| {
                assert!(!state.reviews.is_current(fetch));
                assert_eq!(state.reviews.status(), RequestStatus::Idle);
                assert!(state.submission.is_current(submit));
                assert!(state.submission.is_pending());
            })
            .run();
    }

    #[test]
    fn test_reset_submission() {
        let mut state = ReviewsState::default();
        let request = state.submission.begin();
        let _ = state.submission.reject(request, "boom");

        ReducerTest::new(reducer())
            .with_env(env(MockCatalogApi::new()))
            .given_state(state)
            .when_action(ReviewsAction::ResetSubmission)
            .then_state(|state| {
                assert_eq!(state.submission.status(), RequestStatus::Idle);
                assert!(state.submission.error().is_none());
            })
            .run();
    }
}
