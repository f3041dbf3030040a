use formulary_rs::{Evaluator, EvaluatorOptions};
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::new(EvaluatorOptions::default().with_max_depth(16));

    let ast = evaluator
        .parse_expression("price > 50 && volume < 5000")
        .expect("Failed to parse");
    println!("AST: {:#?}", ast);

    let context: HashMap<String, f64> =
        [("price".to_string(), 120.0), ("volume".to_string(), 3000.0)]
            .iter()
            .cloned()
            .collect();

    match evaluator.evaluate(&ast, &context) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }

    for expression in ["max(price, volume) / 0", "price +", "volume(2)"] {
        match evaluator.evaluate_expression(expression, &context) {
            Ok(result) => println!("{} = {}", expression, result),
            Err(err) => println!("{} -> {:?}: {}", expression, err.kind(), err),
        }
    }
}
