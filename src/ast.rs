//! The expression tree. Every node owns its children; array/scalar leaves borrow into
//! caller-supplied storage for the lifetime `'a`.

use crate::builtin::AggregateKind;
use crate::symbol::ArrayView;
use std::cell::Cell;

pub(crate) type PlainFn = fn(&[f64]) -> f64;

/// A callable bound into the tree: either a plain function pointer (no captured state) or a
/// closure that may capture (and mutate) caller-owned state.
#[derive(Clone, Copy)]
pub(crate) enum Callable<'a> {
    Static(PlainFn),
    Dynamic(&'a dyn Fn(&[f64]) -> f64),
}

impl<'a> Callable<'a> {
    pub(crate) fn call(&self, args: &[f64]) -> f64 {
        match self {
            Callable::Static(f) => f(args),
            Callable::Dynamic(f) => f(args),
        }
    }
}

/// An aggregate builtin's argument: either a raw array binding (for array-typed parameters) or
/// a subtree to evaluate (for scalar parameters). `Invalid` marks an array-typed parameter whose
/// source expression was not a bare array-variable reference; it evaluates to NaN without ever
/// evaluating the discarded subtree.
pub(crate) enum AggregateArg<'a> {
    Array(ArrayView<'a>),
    Scalar(Node<'a>),
    Invalid,
}

pub(crate) enum Node<'a> {
    Literal(f64),
    Scalar(&'a Cell<f64>),
    /// A bare array-variable reference with no postfix index applied. Only meaningful as an
    /// aggregate-builtin argument or as the operand of `Index`; evaluated directly it is NaN,
    /// since an array has no scalar value of its own.
    ArrayRef(ArrayView<'a>),
    Neg(Box<Node<'a>>),
    Index {
        array: ArrayView<'a>,
        index: Box<Node<'a>>,
    },
    Call {
        callable: Callable<'a>,
        pure: bool,
        args: Vec<Node<'a>>,
    },
    Aggregate {
        kind: AggregateKind,
        args: Vec<AggregateArg<'a>>,
    },
}

impl<'a> Node<'a> {
    pub(crate) fn call(callable: Callable<'a>, pure: bool, args: Vec<Node<'a>>) -> Self {
        Node::Call {
            callable,
            pure,
            args,
        }
    }
}
