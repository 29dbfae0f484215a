pub mod policy_evaluation;

pub use policy_evaluation::{
    evaluate, evaluate_with_rng, Evaluation, PolicyEvaluator, PolicyEvaluatorConfig, SweepStats,
};
