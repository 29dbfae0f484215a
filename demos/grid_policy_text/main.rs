use std::{env, error::Error};

use gridworld::{algo::PolicyEvaluator, render, request::GridRequest};
use rand::thread_rng;

const DEFAULT_REQUEST: &str =
    r#"{"n": 5, "start": [0, 0], "end": [4, 4], "walls": [[1, 1], [1, 2], [3, 2]]}"#;

fn main() -> Result<(), Box<dyn Error>> {
    let body = env::args().nth(1).unwrap_or_else(|| String::from(DEFAULT_REQUEST));
    let request = GridRequest::from_json(&body)?;
    let world = request.world()?;

    let response = request.respond(&PolicyEvaluator::default(), &mut thread_rng())?;

    println!("Value Matrix");
    println!("{}", render::value_table(&world, &response.value));
    println!("Policy Matrix");
    println!("{}", render::policy_table(&world, &response.policy));
    println!(
        "{} sweeps, {}",
        response.sweeps,
        if response.converged { "converged" } else { "sweep budget exhausted" }
    );

    println!("{}", response.to_json()?);

    Ok(())
}
