use rand::Rng;

/// Represents a Markov decision process whose dynamics are fully known, so that
/// an agent can query the outcome of any action from any state without acting.
///
/// This base trait represents the deterministic case: every state action pair
/// has exactly one successor state and reward.
pub trait Environment {
    /// A representation of a state of the environment
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Determine if the state is active, i.e. its value is subject to updates
    ///
    /// Terminal states and states the agent can never occupy are inactive.
    fn is_active(&self, state: &Self::State) -> bool;

    /// Query the dynamics for taking `action` in `state`
    ///
    /// **Returns** `(next_state, reward)`
    fn step(&self, state: &Self::State, action: Self::Action) -> (Self::State, f32);

    /// Draw an action uniformly at random
    fn random_action<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Action;
}

/// An environment with a finite, enumerable state space
pub trait DiscreteStateSpace: Environment {
    /// Get every state of the environment
    fn states(&self) -> Vec<Self::State>;
}

/// An environment with a finite, enumerable action space
pub trait DiscreteActionSpace: Environment {
    /// Get the available actions
    ///
    /// The returned vec should never be empty.
    fn actions(&self) -> Vec<Self::Action>;
}
