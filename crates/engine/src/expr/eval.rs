// Expression evaluator - evaluates parsed ASTs

use super::parser::{BinOp, Expr, Func};

/// Evaluate an expression tree.
///
/// Arithmetic faults (division by zero, negative square roots, log of a
/// non-positive number) surface as infinities or NaN and are rejected by the
/// caller's finite check. Trig functions take radians; `log` is base 10.
pub fn evaluate(expr: &Expr) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::Function { func, arg } => {
            let x = evaluate(arg);
            match func {
                Func::Sin => x.sin(),
                Func::Cos => x.cos(),
                Func::Tan => x.tan(),
                Func::Log => x.log10(),
                Func::Sqrt => x.sqrt(),
            }
        }
        Expr::BinaryOp { op, left, right } => {
            let l = evaluate(left);
            let r = evaluate(right);
            match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
                BinOp::Rem => l % r,
                BinOp::Pow => l.powf(r),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parser::parse;

    fn eval_str(s: &str) -> f64 {
        evaluate(&parse(s).unwrap())
    }

    #[test]
    fn test_binary_ops() {
        assert_eq!(eval_str("2+3"), 5.0);
        assert_eq!(eval_str("2-3"), -1.0);
        assert_eq!(eval_str("2*3"), 6.0);
        assert_eq!(eval_str("3/2"), 1.5);
        assert_eq!(eval_str("10%3"), 1.0);
        assert_eq!(eval_str("2^10"), 1024.0);
    }

    #[test]
    fn test_remainder_sign_follows_dividend() {
        assert_eq!(eval_str("0-10%3"), -1.0);
        assert_eq!(eval_str("(0-10)%3"), -1.0);
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        assert!(eval_str("1/0").is_infinite());
        assert!(eval_str("0/0").is_nan());
    }

    #[test]
    fn test_functions() {
        assert!((eval_str("sin(0)")).abs() < 1e-12);
        assert!((eval_str("cos(0)") - 1.0).abs() < 1e-12);
        assert!((eval_str("sqrt(16)") - 4.0).abs() < 1e-12);
        assert!((eval_str("log(1000)") - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_domain_faults_are_nan() {
        assert!(eval_str("sqrt(0-4)").is_nan());
        assert!(eval_str("log(0)").is_infinite());
    }

    #[test]
    fn test_nested() {
        assert_eq!(eval_str("sqrt((3+1)*(5-1))"), 4.0);
    }
}
