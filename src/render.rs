use std::fmt::Write;

use crate::{ds::Matrix, gym::GridWorld, policy::Policy};

const CELL_WIDTH: usize = 7;
const WALL: char = '▒';
const GOAL: char = '★';

/// Render the value matrix with two decimals per cell, walls shaded
pub fn value_table(env: &GridWorld, value: &Matrix<f32>) -> String {
    let wall = WALL.to_string().repeat(CELL_WIDTH);
    render(env.size(), |pos| {
        if env.is_wall(pos) {
            wall.clone()
        } else {
            format!("{:>CELL_WIDTH$.2}", value[pos])
        }
    })
}

/// Render the policy as arrows, with a star on the terminal cell and walls shaded
pub fn policy_table(env: &GridWorld, policy: &Policy) -> String {
    render(env.size(), |pos| {
        let symbol = if env.is_wall(pos) {
            WALL
        } else if pos == env.end() {
            GOAL
        } else {
            policy[pos].arrow()
        };
        symbol.to_string()
    })
}

fn render(size: usize, mut cell: impl FnMut((usize, usize)) -> String) -> String {
    let mut out = String::new();
    for i in 0..size {
        let row = (0..size).map(|j| cell((i, j))).collect::<Vec<_>>();
        // writing to a String cannot fail
        let _ = writeln!(out, "{}", row.join(" "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gym::Action, policy};

    #[test]
    fn value_table_layout() {
        let env = GridWorld::new(3, (2, 2), [(1, 1)]).unwrap();
        let mut value = env.matrix(0.0f32);
        value[(0, 0)] = -49.987;
        value[(2, 1)] = -1.0;

        let table = value_table(&env, &value);
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3, "One line per row");
        assert_eq!(lines[0], " -49.99    0.00    0.00", "Two decimals, right aligned");
        assert_eq!(lines[1], "   0.00 ▒▒▒▒▒▒▒    0.00", "Wall shaded");
        assert_eq!(lines[2], "   0.00   -1.00    0.00", "Terminal shows its value");
    }

    #[test]
    fn policy_table_layout() {
        let env = GridWorld::new(3, (2, 2), [(1, 1)]).unwrap();
        let policy = policy::from_fn(&env, |(i, j)| match (i + j) % 4 {
            0 => Action::Up,
            1 => Action::Right,
            2 => Action::Down,
            _ => Action::Left,
        });

        assert_eq!(policy_table(&env, &policy), "↑ → ↓\n→ ▒ ←\n↓ ← ★\n");
    }
}
