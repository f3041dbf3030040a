use formulary_rs::{Evaluator, Formula, Variable};
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let formula = Formula::new("loan", "Monthly payment")
        .with_input(Variable::new("principal", 200_000.0))
        .with_input(Variable::new("rate", 4.5).with_unit("%"))
        .with_constant(Variable::new("months", 360.0))
        .with_output(
            "payment",
            "principal * (rate / 1200) / (1 - pow(1 + rate / 1200, -months))",
        );

    let input_sets: Vec<HashMap<String, f64>> = [2.5, 3.5, 4.5, 5.5, 0.0]
        .iter()
        .map(|rate| {
            HashMap::from([
                ("principal".to_string(), 200_000.0),
                ("rate".to_string(), *rate),
            ])
        })
        .collect();

    let evaluator = Evaluator::default();
    for (inputs, report) in input_sets
        .iter()
        .zip(evaluator.evaluate_many(&formula, &input_sets))
    {
        println!("rate {}% -> {}", inputs["rate"], report.outputs[0].value);
    }
}
