//! Single bottom-up constant-folding pass: a pure call (or unary negation) whose children have
//! all folded to literals is itself replaced with a literal. Array-index nodes, impure calls,
//! and anything built over a variable reference are left as-is.

use crate::ast::{AggregateArg, Node};

pub(crate) fn optimize(node: Node) -> Node {
    match node {
        Node::Literal(_) | Node::Scalar(_) | Node::ArrayRef(_) => node,
        Node::Neg(inner) => {
            let inner = optimize(*inner);
            if let Node::Literal(v) = inner {
                tracing::trace!(result = -v, "constant-folded unary negate");
                Node::Literal(-v)
            } else {
                Node::Neg(Box::new(inner))
            }
        }
        Node::Index { array, index } => {
            let index = optimize(*index);
            Node::Index {
                array,
                index: Box::new(index),
            }
        }
        Node::Call {
            callable,
            pure,
            args,
        } => {
            let args: Vec<Node> = args.into_iter().map(optimize).collect();
            if pure && args.iter().all(|a| matches!(a, Node::Literal(_))) {
                let values: Vec<f64> = args
                    .iter()
                    .map(|a| match a {
                        Node::Literal(v) => *v,
                        _ => unreachable!("just checked all args are literals"),
                    })
                    .collect();
                let result = callable.call(&values);
                tracing::trace!(result, "constant-folded call");
                Node::Literal(result)
            } else {
                Node::Call {
                    callable,
                    pure,
                    args,
                }
            }
        }
        Node::Aggregate { kind, args } => {
            // Array-typed arguments are bound to a variable by construction and so never fold;
            // only the scalar arguments (e.g. linear_interpolate's `x`) are worth recursing into.
            let args = args
                .into_iter()
                .map(|arg| match arg {
                    AggregateArg::Scalar(n) => AggregateArg::Scalar(optimize(n)),
                    other => other,
                })
                .collect();
            Node::Aggregate { kind, args }
        }
    }
}
