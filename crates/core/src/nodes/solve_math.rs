use std::sync::Arc;

use crate::{
    generate::{GenerationRequest, TextGenerator},
    node::{Node, Outcome},
    store::SharedStore,
};

static MATH_ROLE: &str =
    "You are a highly accurate mathematical assistant. Provide solutions and steps where appropriate.";

/// Solves the mathematical query in the processed input.
///
/// `math_solver_reasoning` is a derived copy of the solution text; on failure
/// it carries the failure message instead.
pub struct MathSolver {
    generator: Arc<dyn TextGenerator>,
}

impl MathSolver {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

impl Node for MathSolver {
    fn name(&self) -> &'static str {
        "MathSolver"
    }

    async fn execute(&self, store: &mut SharedStore) -> Outcome {
        let Some(query) = store.processed_input.clone().filter(|q| !q.is_empty()) else {
            store.set_error("No mathematical query provided.");
            return Outcome::Error;
        };

        let prompt = format!(
            "Solve the following mathematical problem. \
             Provide the solution clearly and concisely. \
             If it's a differentiation or integration, show the steps. Problem:\n\n{}",
            query
        );

        match self
            .generator
            .generate(GenerationRequest {
                system: MATH_ROLE,
                prompt,
                max_tokens: 200,
                temperature: 0.1,
            })
            .await
        {
            Ok(solution) => {
                store.math_solver_reasoning = Some(solution.clone());
                store.math_solution = Some(solution);
                Outcome::Success
            }
            Err(err) => {
                let message = format!("Math solving failed: {}", err);
                store.math_solver_reasoning = Some(format!("Error during math solving: {}", err));
                store.set_error(message);
                Outcome::MathSolverFailed
            }
        }
    }
}
