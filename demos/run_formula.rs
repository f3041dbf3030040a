use formulary_rs::{evaluate_formula, Formula, Variable};

fn main() {
    pretty_env_logger::init();

    let formula = Formula::new("projectile", "Projectile range")
        .with_description("Range and flight time of a projectile on flat ground")
        .with_input(Variable::new("v", 20.0).with_label("Launch speed").with_unit("m/s"))
        .with_input(Variable::new("angle", 45.0).with_unit("deg"))
        .with_constant(Variable::new("g", 9.81).with_unit("m/s²"))
        .with_output("range", "pow(v, 2) * sin(2 * angle * PI / 180) / g")
        .with_output("flight time", "2 * v * sin(angle * PI / 180) / g")
        .with_output("broken", "v * drag");

    let mut inputs = formula.default_inputs();
    for angle in [15.0, 45.0, 75.0] {
        inputs.insert("angle".to_string(), angle);
        let report = evaluate_formula(&formula, &inputs);
        println!("angle = {}", angle);
        for output in &report.outputs {
            match output.value.error() {
                Some(err) => println!("  {}: {} ({})", output.name, output.value, err),
                None => println!("  {}: {}", output.name, output.value),
            }
        }
    }
}
