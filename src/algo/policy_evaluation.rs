use log::{debug, info};
use rand::{thread_rng, Rng};
use serde::Serialize;

use crate::{
    assert_interval,
    ds::{Matrix, Pos},
    env::{DiscreteStateSpace, Environment},
    error::{GridError, Result},
    gym::GridWorld,
    policy::{self, Policy},
};

/// Configuration for the [`PolicyEvaluator`]
#[derive(Debug, Clone)]
pub struct PolicyEvaluatorConfig {
    pub gamma: f32,
    pub max_sweeps: u32,
    pub tolerance: f32,
}

impl Default for PolicyEvaluatorConfig {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            max_sweeps: 100,
            tolerance: 1e-3,
        }
    }
}

/// Progress report emitted after every sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepStats {
    /// 1-based index of the sweep that just finished
    pub sweep: u32,
    /// Largest absolute change of any cell's value during the sweep
    pub max_delta: f32,
}

/// The outcome of evaluating a policy on a [`GridWorld`]
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub value: Matrix<f32>,
    pub policy: Policy,
    /// Number of sweeps computed, including the one that triggered the early stop
    pub sweeps: u32,
    /// Whether the early stop fired before `max_sweeps` was exhausted
    pub converged: bool,
}

/// Iterative evaluation of a fixed deterministic policy
///
/// Every sweep recomputes the value of each active cell from the previous sweep's snapshot as
/// `reward + gamma * value[next]`, where `(next, reward)` is the outcome of the policy's action.
/// The policy itself is never changed: this evaluates the policy it is given, it does not
/// improve it.
///
/// Evaluation stops once a sweep changes no value by `tolerance` or more, in which case that
/// final sweep is discarded, or after `max_sweeps` sweeps.
pub struct PolicyEvaluator {
    gamma: f32,      // discount factor
    max_sweeps: u32, // sweep budget
    tolerance: f32,  // early stop threshold on the max delta
}

impl PolicyEvaluator {
    /// Initialize a new `PolicyEvaluator`
    ///
    /// **Panics** if `gamma` is not in the interval `[0,1]` or `tolerance` is negative
    pub fn new(config: PolicyEvaluatorConfig) -> Self {
        assert_interval!(config.gamma, 0.0, 1.0);
        assert!(config.tolerance >= 0.0, "Tolerance must not be negative.");
        Self {
            gamma: config.gamma,
            max_sweeps: config.max_sweeps,
            tolerance: config.tolerance,
        }
    }

    /// Evaluate `policy` on `env`
    ///
    /// **Errors** if the policy's shape differs from the grid's
    pub fn evaluate(&self, env: &GridWorld, policy: Policy) -> Result<Evaluation> {
        self.evaluate_with(env, policy, |_| {})
    }

    /// Evaluate `policy` on `env`, reporting to `observer` after every sweep
    pub fn evaluate_with(
        &self,
        env: &GridWorld,
        policy: Policy,
        mut observer: impl FnMut(SweepStats),
    ) -> Result<Evaluation> {
        if policy.size() != env.size() {
            return Err(GridError::PolicyShapeMismatch {
                expected: env.size(),
                found: policy.size(),
            });
        }

        let states = env
            .states()
            .into_iter()
            .filter(|s| env.is_active(s))
            .collect::<Vec<_>>();

        let mut value = env.matrix(0.0);
        let mut sweeps = 0;
        let mut converged = false;

        while sweeps < self.max_sweeps {
            let new_value = self.sweep(env, &policy, &value, &states);
            sweeps += 1;

            let max_delta = new_value.max_abs_diff(&value);
            debug!("Sweep {sweeps}: max delta {max_delta:.6}");
            observer(SweepStats { sweep: sweeps, max_delta });

            if max_delta < self.tolerance {
                converged = true;
                break;
            }
            value = new_value;
        }

        if converged {
            info!("Policy evaluation converged after {sweeps} sweeps");
        } else {
            info!("Policy evaluation stopped after {sweeps} sweeps without converging");
        }

        Ok(Evaluation {
            value,
            policy,
            sweeps,
            converged,
        })
    }

    fn sweep(
        &self,
        env: &GridWorld,
        policy: &Policy,
        value: &Matrix<f32>,
        states: &[Pos],
    ) -> Matrix<f32> {
        let mut new_value = value.clone();
        for state in states {
            let (next_state, reward) = env.step(state, policy[*state]);
            new_value[*state] = reward + self.gamma * value[next_state];
        }

        new_value
    }
}

impl Default for PolicyEvaluator {
    fn default() -> Self {
        Self::new(PolicyEvaluatorConfig::default())
    }
}

/// Evaluate a uniformly random policy drawn from `rng` on an `n` x `n` grid
///
/// `_start` is accepted for symmetry with the request shape and does not affect the result.
///
/// **Returns** `(value, policy)`
pub fn evaluate_with_rng<R: Rng + ?Sized>(
    n: usize,
    _start: Pos,
    end: Pos,
    walls: impl IntoIterator<Item = Pos>,
    rng: &mut R,
) -> Result<(Matrix<f32>, Policy)> {
    let env = GridWorld::new(n, end, walls)?;
    let policy = policy::random_with(&env, rng);
    let Evaluation { value, policy, .. } = PolicyEvaluator::default().evaluate(&env, policy)?;
    Ok((value, policy))
}

/// [`evaluate_with_rng`] using the thread-local random source
pub fn evaluate(
    n: usize,
    start: Pos,
    end: Pos,
    walls: impl IntoIterator<Item = Pos>,
) -> Result<(Matrix<f32>, Policy)> {
    evaluate_with_rng(n, start, end, walls, &mut thread_rng())
}
