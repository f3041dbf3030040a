pub mod math;
pub mod percent;

use crate::ast::Evaluator;

/// Fills `evaluator` with the fixed builtin library.
pub fn register_functions(evaluator: &mut Evaluator) {
    math::register(evaluator);
    percent::register(evaluator);

    evaluator.register_constant("PI", std::f64::consts::PI);
    evaluator.register_constant("E", std::f64::consts::E);
}
