//! Given-When-Then harness for slice reducers
//!
//! Reducers are pure, so a test only needs a state, an environment and a
//! list of actions. The harness reduces them in order and hands the final
//! state and the last action's effects to the assertions.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use petshop_core::{SmallVec, effect::Effect, reducer::Reducer};

type StateCheck<S> = Box<dyn FnOnce(&S)>;
type EffectCheck<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent reducer test
///
/// ```ignore
/// use petshop_testing::{ReducerTest, assertions};
///
/// ReducerTest::new(BrandsReducer::new())
///     .with_env(env)
///     .given_state(BrandsState::default())
///     .when_action(BrandsAction::Fetch(BrandQuery::new().with_animal(2)))
///     .then_state(|state| assert!(state.brands.is_pending()))
///     .then_effects(assertions::assert_has_future_effect)
///     .run();
/// ```
///
/// Repeated `when_action` calls queue several actions. Effect checks see
/// the effects of the last one only.
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    env: Option<E>,
    given: Option<S>,
    actions: Vec<A>,
    state_checks: Vec<StateCheck<S>>,
    effect_checks: Vec<EffectCheck<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Start a test for `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            env: None,
            given: None,
            actions: Vec::new(),
            state_checks: Vec::new(),
            effect_checks: Vec::new(),
        }
    }

    /// Environment passed to every reduction
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.env = Some(env);
        self
    }

    /// Starting state
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.given = Some(state);
        self
    }

    /// Queue an action
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Check the state after every queued action was reduced
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_checks.push(Box::new(check));
        self
    }

    /// Check the effects returned for the last action
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_checks.push(Box::new(check));
        self
    }

    /// Reduce the queued actions and run every check
    ///
    /// # Panics
    ///
    /// Panics if the state, the environment or the actions are missing, or
    /// if a check fails.
    #[allow(clippy::panic)] // Test harness
    pub fn run(self) {
        let Self {
            reducer,
            env,
            given,
            actions,
            state_checks,
            effect_checks,
        } = self;

        let (Some(mut state), Some(env)) = (given, env) else {
            panic!("ReducerTest needs given_state() and with_env()");
        };
        assert!(!actions.is_empty(), "ReducerTest needs at least one when_action()");

        let mut effects: SmallVec<[Effect<A>; 4]> = SmallVec::new();
        for action in actions {
            effects = reducer.reduce(&mut state, action, &env);
        }

        state_checks.into_iter().for_each(|check| check(&state));
        effect_checks.into_iter().for_each(|check| check(&effects));
    }
}

/// Effect assertions for `then_effects`
pub mod assertions {
    use petshop_core::effect::Effect;

    /// Nothing to execute: no effects, or a lone [`Effect::None`]
    ///
    /// # Panics
    ///
    /// Panics if any effect would do work.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(|e| matches!(e, Effect::None)),
            "expected no work, got {effects:?}"
        );
    }

    /// Exactly `expected` effects
    ///
    /// # Panics
    ///
    /// Panics on a different count.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(effects.len(), expected, "unexpected number of effects");
    }

    /// At least one [`Effect::Future`], i.e. a request was started
    ///
    /// # Panics
    ///
    /// Panics if there is none.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "expected a request effect"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petshop_core::{Tracked, smallvec};

    #[derive(Clone, Debug, Default)]
    struct NamesState {
        names: Tracked<Vec<String>>,
    }

    #[derive(Clone, Debug)]
    enum NamesAction {
        Fetch,
        Loaded(Vec<String>),
    }

    struct NamesReducer;

    impl Reducer for NamesReducer {
        type State = NamesState;
        type Action = NamesAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                NamesAction::Fetch => {
                    let _ = state.names.begin();
                    smallvec![Effect::Future(Box::pin(async {
                        Some(NamesAction::Loaded(vec!["Rex".to_string()]))
                    }))]
                },
                NamesAction::Loaded(names) => {
                    if let Some(request) = state.names.in_flight() {
                        let _ = state.names.resolve(request, names, None);
                    }
                    smallvec![Effect::None]
                },
            }
        }
    }

    #[test]
    fn test_fetch_starts_request() {
        ReducerTest::new(NamesReducer)
            .with_env(())
            .given_state(NamesState::default())
            .when_action(NamesAction::Fetch)
            .then_state(|state| assert!(state.names.is_pending()))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_actions_are_reduced_in_order() {
        ReducerTest::new(NamesReducer)
            .with_env(())
            .given_state(NamesState::default())
            .when_action(NamesAction::Fetch)
            .when_action(NamesAction::Loaded(vec!["Tom".to_string()]))
            .then_state(|state| assert_eq!(state.names.value(), &vec!["Tom".to_string()]))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_completion_without_request_is_ignored() {
        ReducerTest::new(NamesReducer)
            .with_env(())
            .given_state(NamesState::default())
            .when_action(NamesAction::Loaded(vec!["Tom".to_string()]))
            .then_state(|state| assert!(state.names.value().is_empty()))
            .run();
    }

    #[test]
    #[should_panic(expected = "needs given_state")]
    fn test_missing_state_panics() {
        ReducerTest::new(NamesReducer)
            .with_env(())
            .when_action(NamesAction::Fetch)
            .run();
    }
}
