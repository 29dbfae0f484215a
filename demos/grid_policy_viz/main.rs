use std::{error::Error, fs, path::Path, thread, time::Duration};

use gridworld::{
    algo::{PolicyEvaluator, PolicyEvaluatorConfig},
    ds::Matrix,
    policy,
    request::GridRequest,
    viz::{self, Update},
};

const REQUEST: &str = r#"{
    "n": 8,
    "start": [0, 0],
    "end": [7, 7],
    "walls": [[1, 1], [1, 2], [1, 3], [3, 5], [4, 5], [5, 5], [6, 2], [6, 3]]
}"#;

/// Slows the sweeps down so the progress is visible
const SWEEP_DELAY: Duration = Duration::from_millis(20);

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos/grid_policy_viz");

    let world = GridRequest::from_json(REQUEST)?.world()?;
    let config = PolicyEvaluatorConfig::default();
    let (handle, tx) = viz::init(world.clone(), &config);

    let policy = policy::random(&world);
    let evaluation = PolicyEvaluator::new(config).evaluate_with(&world, policy, |stats| {
        let _ = tx.send(Update::Sweep(stats));
        thread::sleep(SWEEP_DELAY);
    })?;

    // Write data to CSV

    fs::create_dir_all(path.join("out"))?;
    write_csv(&path.join("out/value.csv"), &evaluation.value.map(|v| format!("{v:.4}")))?;
    let actions = evaluation.policy.map(|a| (*a as u8).to_string());
    write_csv(&path.join("out/policy.csv"), &actions)?;

    viz::finish(handle, tx, evaluation)?;

    Ok(())
}

fn write_csv(path: &Path, matrix: &Matrix<String>) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in matrix.rows() {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
