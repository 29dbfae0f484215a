use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    algo::{Evaluation, PolicyEvaluator},
    ds::{Matrix, Pos},
    error::{GridError, Result},
    gym::{
        grid_world::{MAX_SIZE, MIN_SIZE},
        GridWorld,
    },
    policy::{self, Policy},
};

/// Grid size used when the form field is missing or unparsable
pub const DEFAULT_SIZE: usize = 5;

/// Parse the grid size field of the input form
///
/// Missing or unparsable input falls back to [`DEFAULT_SIZE`]; anything else is clamped into
/// `[MIN_SIZE, MAX_SIZE]`.
pub fn form_grid_size(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|n| n.clamp(MIN_SIZE as i64, MAX_SIZE as i64) as usize)
        .unwrap_or(DEFAULT_SIZE)
}

/// A request to evaluate a random policy, e.g.
/// `{"n": 5, "start": [0, 0], "end": [4, 4], "walls": [[1, 1], [2, 3]]}`
///
/// Coordinates are signed so that negative input is reported as out of bounds rather than as a
/// parse failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridRequest {
    pub n: i64,
    /// Not used by the evaluation
    pub start: [i64; 2],
    pub end: [i64; 2],
    #[serde(default)]
    pub walls: Vec<[i64; 2]>,
}

impl GridRequest {
    pub fn from_json(body: &str) -> Result<Self> {
        let request = serde_json::from_str::<Self>(body)?;
        debug!(
            "Request: n = {}, start = {:?}, end = {:?}, walls = {:?}",
            request.n, request.start, request.end, request.walls
        );
        Ok(request)
    }

    /// Validate the request and build the grid world it describes
    ///
    /// **Errors** if `n` is not in `[MIN_SIZE, MAX_SIZE]` or if `end` or any wall lies outside
    /// the grid
    pub fn world(&self) -> Result<GridWorld> {
        if !(MIN_SIZE as i64..=MAX_SIZE as i64).contains(&self.n) {
            return Err(GridError::InvalidGridSize { size: self.n });
        }
        let size = self.n as usize;

        let end = to_pos(self.end, size)?;
        let walls = self
            .walls
            .iter()
            .map(|&w| to_pos(w, size))
            .collect::<Result<Vec<_>>>()?;

        GridWorld::new(size, end, walls)
    }

    /// Evaluate a random policy drawn from `rng` on the requested grid
    pub fn respond<R: Rng + ?Sized>(
        &self,
        evaluator: &PolicyEvaluator,
        rng: &mut R,
    ) -> Result<GridResponse> {
        let env = self.world()?;
        let evaluation = evaluator.evaluate(&env, policy::random_with(&env, rng))?;
        Ok(GridResponse::new(&env, evaluation))
    }
}

fn to_pos([row, col]: [i64; 2], size: usize) -> Result<Pos> {
    let in_bounds = |x: i64| x >= 0 && (x as usize) < size;
    if in_bounds(row) && in_bounds(col) {
        Ok((row as usize, col as usize))
    } else {
        Err(GridError::OutOfBoundsCell { row, col, size })
    }
}

/// Everything a renderer needs to draw the value and policy matrices
///
/// Actions are encoded by index: 0 up, 1 right, 2 down, 3 left.
#[derive(Debug, Clone, Serialize)]
pub struct GridResponse {
    pub n: usize,
    pub end: Pos,
    pub walls: Vec<Pos>,
    pub value: Matrix<f32>,
    pub policy: Policy,
    pub sweeps: u32,
    pub converged: bool,
}

impl GridResponse {
    pub fn new(env: &GridWorld, evaluation: Evaluation) -> Self {
        let mut walls = env.walls().copied().collect::<Vec<_>>();
        walls.sort_unstable();

        let Evaluation {
            value,
            policy,
            sweeps,
            converged,
        } = evaluation;

        Self {
            n: env.size(),
            end: env.end(),
            walls,
            value,
            policy,
            sweeps,
            converged,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn form_size_defaults_and_clamps() {
        assert_eq!(form_grid_size(None), 5, "Missing field uses default");
        assert_eq!(form_grid_size(Some("abc")), 5, "Garbage uses default");
        assert_eq!(form_grid_size(Some(" 7 ")), 7, "Whitespace is ignored");
        assert_eq!(form_grid_size(Some("1")), 3, "Clamped up to the minimum");
        assert_eq!(form_grid_size(Some("-4")), 3, "Negative clamped up");
        assert_eq!(form_grid_size(Some("25")), 10, "Clamped down to the maximum");
    }

    #[test]
    fn parse_request() {
        let body = r#"{"n": 4, "start": [0, 0], "end": [3, 3], "walls": [[1, 1], [2, 1]]}"#;
        let request = GridRequest::from_json(body).unwrap();
        assert_eq!(request.n, 4);
        assert_eq!(request.walls, vec![[1, 1], [2, 1]]);

        let env = request.world().unwrap();
        assert_eq!(env.size(), 4);
        assert_eq!(env.end(), (3, 3));
        assert!(env.is_wall((2, 1)), "Walls carried over");

        let request =
            GridRequest::from_json(r#"{"n": 3, "start": [0, 0], "end": [2, 2]}"#).unwrap();
        assert!(request.walls.is_empty(), "Walls default to empty");
    }

    #[test]
    fn malformed_requests() {
        assert!(matches!(
            GridRequest::from_json(r#"{"n": 4, "end": [3, 3]}"#),
            Err(GridError::MalformedRequest(_))
        ));
        assert!(matches!(
            GridRequest::from_json("not json"),
            Err(GridError::MalformedRequest(_))
        ));
    }

    #[test]
    fn invalid_requests() {
        let request = |body: &str| GridRequest::from_json(body).unwrap().world();

        assert!(matches!(
            request(r#"{"n": 2, "start": [0, 0], "end": [1, 1], "walls": []}"#),
            Err(GridError::InvalidGridSize { size: 2 })
        ));
        assert!(matches!(
            request(r#"{"n": 11, "start": [0, 0], "end": [1, 1], "walls": []}"#),
            Err(GridError::InvalidGridSize { size: 11 })
        ));
        assert!(matches!(
            request(r#"{"n": 3, "start": [0, 0], "end": [-1, 2], "walls": []}"#),
            Err(GridError::OutOfBoundsCell { row: -1, col: 2, size: 3 })
        ));
        assert!(matches!(
            request(r#"{"n": 3, "start": [0, 0], "end": [2, 2], "walls": [[1, 1], [0, 3]]}"#),
            Err(GridError::OutOfBoundsCell { row: 0, col: 3, size: 3 })
        ));
        assert!(
            request(r#"{"n": 3, "start": [7, -7], "end": [2, 2], "walls": []}"#).is_ok(),
            "Start is not validated"
        );
    }

    #[test]
    fn respond_to_request() {
        let body = r#"{"n": 3, "start": [0, 0], "end": [2, 2], "walls": [[1, 1]]}"#;
        let request = GridRequest::from_json(body).unwrap();
        let response = request
            .respond(&PolicyEvaluator::default(), &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(response.value.shape(), (3, 3));
        assert_eq!(response.value[(1, 1)], 0.0, "Wall value untouched");
        assert_eq!(response.value[(2, 2)], 0.0, "Terminal value untouched");
        assert!(response.sweeps >= 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["n"], 3);
        assert_eq!(json["end"], serde_json::json!([2, 2]));
        assert_eq!(json["walls"], serde_json::json!([[1, 1]]));
        assert_eq!(json["value"].as_array().unwrap().len(), 3, "Value rows");

        let action = response.policy[(0, 0)];
        assert_eq!(json["policy"][0][0], action as u8, "Actions encoded by index");
    }
}
