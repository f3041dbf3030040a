use crate::ast::Evaluator;
use crate::error::EvalError;
use formulary_macros::builtin_fn;

pub fn register(evaluator: &mut Evaluator) {
    evaluator.register_function("sin", sin);
    evaluator.register_function("cos", cos);
    evaluator.register_function("tan", tan);
    evaluator.register_function("asin", asin);
    evaluator.register_function("acos", acos);
    evaluator.register_function("atan", atan);

    evaluator.register_function("sqrt", sqrt);
    evaluator.register_function("pow", pow);
    evaluator.register_function("abs", abs);

    evaluator.register_function("floor", floor);
    evaluator.register_function("ceil", ceil);
    evaluator.register_function("round", round);

    evaluator.register_function("min", min);
    evaluator.register_function("max", max);

    evaluator.register_function("log", natural_log);
    evaluator.register_function("exp", exp);
}

#[builtin_fn]
pub fn sin(x: f64) -> f64 {
    x.sin()
}

#[builtin_fn]
pub fn cos(x: f64) -> f64 {
    x.cos()
}

#[builtin_fn]
pub fn tan(x: f64) -> f64 {
    x.tan()
}

#[builtin_fn]
pub fn asin(x: f64) -> f64 {
    x.asin()
}

#[builtin_fn]
pub fn acos(x: f64) -> f64 {
    x.acos()
}

#[builtin_fn]
pub fn atan(x: f64) -> f64 {
    x.atan()
}

#[builtin_fn]
pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

/// `powf`, except that a NaN exponent and `(±1) ^ ±Infinity` give NaN.
#[builtin_fn]
pub fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        f64::NAN
    } else {
        base.powf(exponent)
    }
}

#[builtin_fn]
pub fn abs(x: f64) -> f64 {
    x.abs()
}

#[builtin_fn]
pub fn floor(x: f64) -> f64 {
    x.floor()
}

#[builtin_fn]
pub fn ceil(x: f64) -> f64 {
    x.ceil()
}

/// Rounds half toward positive infinity: `round(2.5) = 3`, `round(-2.5) = -2`.
#[builtin_fn]
pub fn round(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[builtin_fn(name = "log")]
pub fn natural_log(x: f64) -> f64 {
    x.ln()
}

#[builtin_fn]
pub fn exp(x: f64) -> f64 {
    x.exp()
}

/// Variadic fold that propagates NaN instead of skipping it.
fn extreme(
    name: &str,
    args: &[f64],
    pick: fn(f64, f64) -> f64,
) -> Result<f64, EvalError> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| EvalError::arity_at_least(name, 1, 0))?;

    if args.iter().any(|value| value.is_nan()) {
        return Ok(f64::NAN);
    }
    Ok(rest.iter().fold(*first, |acc, value| pick(acc, *value)))
}

pub fn min(args: &[f64]) -> Result<f64, EvalError> {
    extreme("min", args, f64::min)
}

pub fn max(args: &[f64]) -> Result<f64, EvalError> {
    extreme("max", args, f64::max)
}
