use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};
use serde::{Serialize, Serializer};
use strum::{EnumIter, FromRepr, VariantArray};

use crate::{
    ds::{Matrix, Pos},
    env::{DiscreteActionSpace, DiscreteStateSpace, Environment},
    error::{GridError, Result},
};

/// Smallest supported grid side length
pub const MIN_SIZE: usize = 3;
/// Largest supported grid side length
pub const MAX_SIZE: usize = 10;

/// Reward for a move into a free cell
pub const STEP_REWARD: f32 = -1.0;
/// Reward for bumping into a wall or the edge of the grid
pub const BUMP_REWARD: f32 = -5.0;

#[derive(EnumIter, VariantArray, FromRepr, Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Action {
    /// Unit `(row, col)` offset
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Right => '→',
            Action::Down => '↓',
            Action::Left => '←',
        }
    }
}

/// Actions go over the wire as their index
impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// A square grid with blocked cells and a single terminal cell
///
/// Moving into a free cell costs [`STEP_REWARD`]. An action that would leave the grid
/// or enter a wall leaves the agent in place and costs [`BUMP_REWARD`].
#[derive(Debug, Clone)]
pub struct GridWorld {
    size: usize,
    end: Pos,
    walls: HashSet<Pos>,
}

impl GridWorld {
    /// Construct a grid world of side length `size`
    ///
    /// **Errors** if `size` is not in `[MIN_SIZE, MAX_SIZE]` or if `end` or any wall lies outside
    /// the grid
    pub fn new(size: usize, end: Pos, walls: impl IntoIterator<Item = Pos>) -> Result<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GridError::InvalidGridSize { size: size as i64 });
        }

        let check = |pos: Pos| {
            if pos.0 < size && pos.1 < size {
                Ok(pos)
            } else {
                Err(GridError::OutOfBoundsCell {
                    row: pos.0 as i64,
                    col: pos.1 as i64,
                    size,
                })
            }
        };

        let end = check(end)?;
        let walls = walls.into_iter().map(check).collect::<Result<HashSet<_>>>()?;

        Ok(Self { size, end, walls })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.walls.contains(&pos)
    }

    pub fn walls(&self) -> impl Iterator<Item = &Pos> {
        self.walls.iter()
    }

    /// The cell reached by moving one unit in the direction of `action`, if it is inside the grid
    fn neighbor(&self, pos: Pos, action: Action) -> Option<Pos> {
        let (di, dj) = action.delta();
        let i = pos.0.checked_add_signed(di)?;
        let j = pos.1.checked_add_signed(dj)?;
        (i < self.size && j < self.size).then_some((i, j))
    }

    /// A matrix of this world's shape with every cell set to `value`
    pub fn matrix<T: Clone>(&self, value: T) -> Matrix<T> {
        Matrix::filled(self.size, value)
    }
}

impl Environment for GridWorld {
    type State = Pos;
    type Action = Action;

    fn is_active(&self, state: &Self::State) -> bool {
        *state != self.end && !self.is_wall(*state)
    }

    fn step(&self, state: &Self::State, action: Self::Action) -> (Self::State, f32) {
        match self.neighbor(*state, action) {
            Some(next) if !self.is_wall(next) => (next, STEP_REWARD),
            _ => (*state, BUMP_REWARD),
        }
    }

    fn random_action<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Action {
        *self
            .actions()
            .choose(rng)
            .expect("There is always at least one action available")
    }
}

impl DiscreteStateSpace for GridWorld {
    fn states(&self) -> Vec<Self::State> {
        (0..self.size)
            .flat_map(|i| (0..self.size).map(move |j| (i, j)))
            .collect()
    }
}

impl DiscreteActionSpace for GridWorld {
    fn actions(&self) -> Vec<Self::Action> {
        Action::VARIANTS.to_vec()
    }
}
