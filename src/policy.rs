use rand::{thread_rng, Rng};

use crate::{
    ds::{Matrix, Pos},
    env::Environment,
    gym::{Action, GridWorld},
};

/// A deterministic policy assigning one action to every cell of a grid
///
/// Entries at walls and at the terminal cell exist but are never consulted.
pub type Policy = Matrix<Action>;

/// Draw a policy uniformly at random, independently per cell, from the given random source
pub fn random_with<R: Rng + ?Sized>(env: &GridWorld, rng: &mut R) -> Policy {
    Matrix::from_fn(env.size(), |_| env.random_action(&mut *rng))
}

/// Draw a policy uniformly at random using the thread-local random source
pub fn random(env: &GridWorld) -> Policy {
    random_with(env, &mut thread_rng())
}

/// A policy taking the same action everywhere
pub fn uniform(env: &GridWorld, action: Action) -> Policy {
    env.matrix(action)
}

/// A policy built by calling `f` for every cell
pub fn from_fn(env: &GridWorld, f: impl FnMut(Pos) -> Action) -> Policy {
    Matrix::from_fn(env.size(), f)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn seeded_policies_repeat() {
        let env = GridWorld::new(6, (5, 5), [(2, 2)]).unwrap();
        let a = random_with(&env, &mut StdRng::seed_from_u64(7));
        let b = random_with(&env, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.shape(), (6, 6), "Policy covers the grid");
        assert_eq!(a, b, "Same seed gives the same policy");
    }

    #[test]
    fn random_policy_uses_every_action() {
        let env = GridWorld::new(10, (0, 0), [(9, 9)]).unwrap();
        let policy = random_with(&env, &mut StdRng::seed_from_u64(42));
        for action in [Action::Up, Action::Right, Action::Down, Action::Left] {
            assert!(
                policy.iter().any(|(_, a)| *a == action),
                "{action:?} drawn at least once in 100 cells"
            );
        }
    }

    #[test]
    fn constructed_policies() {
        let env = GridWorld::new(3, (2, 2), [(1, 1)]).unwrap();
        assert!(uniform(&env, Action::Left).iter().all(|(_, a)| *a == Action::Left));

        let policy = from_fn(&env, |(i, _)| if i == 0 { Action::Down } else { Action::Right });
        assert_eq!(policy[(0, 1)], Action::Down);
        assert_eq!(policy[(2, 0)], Action::Right);
    }
}
