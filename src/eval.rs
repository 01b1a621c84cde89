//! Tree-walking evaluator. Never panics: every failure mode (out-of-range array index,
//! out-of-range bitwise operand, a non-variable array argument, ...) evaluates to NaN.

use crate::ast::{AggregateArg, Node};
use crate::builtin::{arr_len, arr_max, arr_min, arr_sum, linear_interpolate, AggregateKind};
use crate::symbol::ArrayView;

pub(crate) fn eval(node: &Node) -> f64 {
    match node {
        Node::Literal(v) => *v,
        Node::Scalar(cell) => cell.get(),
        Node::ArrayRef(_) => f64::NAN,
        Node::Neg(inner) => -eval(inner),
        Node::Index { array, index } => array.get(eval(index)).unwrap_or(f64::NAN),
        Node::Call { callable, args, .. } => {
            let values: Vec<f64> = args.iter().map(eval).collect();
            callable.call(&values)
        }
        Node::Aggregate { kind, args } => eval_aggregate(*kind, args),
    }
}

fn eval_aggregate(kind: AggregateKind, args: &[AggregateArg]) -> f64 {
    use AggregateKind::*;
    match kind {
        ArrLen => array_arg(&args[0]).map(arr_len).unwrap_or(f64::NAN),
        ArrMax => array_arg(&args[0]).map(arr_max).unwrap_or(f64::NAN),
        ArrMin => array_arg(&args[0]).map(arr_min).unwrap_or(f64::NAN),
        Sum => array_arg(&args[0]).map(arr_sum).unwrap_or(f64::NAN),
        LinearInterpolate => {
            let d = match array_arg(&args[0]) {
                Some(v) => v,
                None => return f64::NAN,
            };
            let r = match array_arg(&args[1]) {
                Some(v) => v,
                None => return f64::NAN,
            };
            let x = match &args[2] {
                AggregateArg::Scalar(n) => eval(n),
                _ => return f64::NAN,
            };
            linear_interpolate(d, r, x)
        }
    }
}

fn array_arg<'a>(arg: &AggregateArg<'a>) -> Option<ArrayView<'a>> {
    match arg {
        AggregateArg::Array(v) => Some(*v),
        _ => None,
    }
}
