use rexpr::{compile, interp, Symbol};
use std::cell::Cell;

fn array(values: &[f64]) -> Vec<Cell<f64>> {
    let mut storage = Vec::with_capacity(values.len() + 1);
    storage.push(Cell::new(values.len() as f64));
    storage.extend(values.iter().copied().map(Cell::new));
    storage
}

#[test]
fn arithmetic_precedence_and_grouping() {
    assert_eq!(interp("2 + 3 * 4"), 14.0);
    assert_eq!(interp("(2 + 3) * 4"), 20.0);
    assert_eq!(interp("2 ^ 10"), 1024.0);
}

#[test]
fn array_indexing() {
    let a1 = array(&[10.0, 20.0, 30.0]);
    let symbols = [Symbol::array("A1", &a1)];

    assert_eq!(compile("A1[0]", &symbols).unwrap().evaluate(), 10.0);
    assert_eq!(compile("A1[1]", &symbols).unwrap().evaluate(), 20.0);
    assert!(compile("A1[5]", &symbols).unwrap().evaluate().is_nan());
    assert!(compile("A1[-1]", &symbols).unwrap().evaluate().is_nan());
    assert_eq!(compile("A1[1.9]", &symbols).unwrap().evaluate(), 20.0);
}

#[test]
fn array_aggregates() {
    let a1 = array(&[10.0, 20.0, 30.0]);
    let a4 = array(&[10.0, 20.0, 30.0, 40.0]);
    let symbols = [Symbol::array("A1", &a1), Symbol::array("A4", &a4)];

    assert_eq!(compile("sum(A1)", &symbols).unwrap().evaluate(), 60.0);
    assert_eq!(compile("arrlen(A4)", &symbols).unwrap().evaluate(), 4.0);
    assert_eq!(compile("arrmax(A4)", &symbols).unwrap().evaluate(), 40.0);
    assert_eq!(compile("arrmin(A4)", &symbols).unwrap().evaluate(), 10.0);
}

#[test]
fn aggregate_over_a_non_variable_argument_is_nan() {
    let a1 = array(&[10.0, 20.0, 30.0]);
    let symbols = [Symbol::array("A1", &a1)];
    // `sum` requires a bare array reference; `A1` plus anything else is not one.
    let expr = compile("sum(A1[0])", &symbols).unwrap();
    assert!(expr.evaluate().is_nan());
}

#[test]
fn linear_interpolation_ascending_in_and_out_of_range() {
    let a2 = array(&[100.0, 200.0]);
    let a3 = array(&[300.0, 600.0]);
    let a4 = array(&[10.0, 20.0, 30.0, 40.0]);
    let a5 = array(&[10.0, 80.0, 300.0, 1000.0]);
    let symbols = [
        Symbol::array("A2", &a2),
        Symbol::array("A3", &a3),
        Symbol::array("A4", &a4),
        Symbol::array("A5", &a5),
    ];

    assert_eq!(
        compile("linear_interpolate(A2, A3, 150)", &symbols)
            .unwrap()
            .evaluate(),
        450.0
    );
    assert!(compile("linear_interpolate(A2, A3, 50)", &symbols)
        .unwrap()
        .evaluate()
        .is_nan());
    assert_eq!(
        compile("linear_interpolate(A4, A5, 25)", &symbols)
            .unwrap()
            .evaluate(),
        190.0
    );
}

#[test]
fn linear_interpolation_descending_domain() {
    let d = array(&[30.0, 20.0, 10.0]);
    let r = array(&[300.0, 200.0, 100.0]);
    let symbols = [Symbol::array("D", &d), Symbol::array("R", &r)];

    assert_eq!(
        compile("linear_interpolate(D, R, 25)", &symbols)
            .unwrap()
            .evaluate(),
        250.0
    );
    assert!(compile("linear_interpolate(D, R, 5)", &symbols)
        .unwrap()
        .evaluate()
        .is_nan());
}

#[test]
fn bitwise_ops() {
    assert_eq!(interp("5 & 3"), 1.0);
    assert_eq!(interp("5 | 2"), 7.0);
    assert_eq!(interp("xor(255, 170)"), 85.0);
    assert_eq!(interp("bit(1024, 10)"), 1.0);
    assert!(interp("5 & -1").is_nan());
}

#[test]
fn functions_and_constants() {
    assert_eq!(interp("pow(2, 10)"), 1024.0);
    assert!((interp("sin(0)") - 0.0).abs() < 1e-12);
    assert!((interp("pi") - std::f64::consts::PI).abs() < 1e-12);
    assert_eq!(interp("fac(5)"), 120.0);
    assert_eq!(interp("ncr(5, 2)"), 10.0);
    assert!(interp("fac(1000000000)").is_infinite());
}

#[test]
fn host_function_with_fixed_arity() {
    fn triple_sum(args: &[f64]) -> f64 {
        args[0] + args[1] + args[2]
    }
    let symbols = [Symbol::function("triple_sum", 3, true, triple_sum)];
    assert_eq!(
        compile("triple_sum(1, 2, 3)", &symbols).unwrap().evaluate(),
        6.0
    );
}

#[test]
fn closure_over_mutable_captured_state_is_not_folded() {
    let calls = Cell::new(0u32);
    let counter = |_args: &[f64]| {
        calls.set(calls.get() + 1);
        calls.get() as f64
    };
    let symbols = [Symbol::closure("counter", 0, false, &counter)];
    let expr = compile("counter()", &symbols).unwrap();
    assert_eq!(expr.evaluate(), 1.0);
    assert_eq!(expr.evaluate(), 2.0);
    assert_eq!(expr.evaluate(), 3.0);
}

#[test]
fn comma_list_evaluates_left_to_right_and_returns_last() {
    let calls = Cell::new(0u32);
    let record = |args: &[f64]| {
        calls.set(calls.get() + 1);
        args[0]
    };
    let symbols = [Symbol::closure("record", 1, false, &record)];
    let expr = compile("(record(1), record(2), record(3))", &symbols).unwrap();
    assert_eq!(expr.evaluate(), 3.0);
    assert_eq!(calls.get(), 3);
}

#[test]
fn idempotent_evaluation() {
    let expr = compile("2 + 3 * sqrt(16)", &[]).unwrap();
    let first = expr.evaluate();
    let second = expr.evaluate();
    assert_eq!(first, second);
    assert_eq!(first, 14.0);
}

#[test]
fn unknown_identifier_is_a_compile_error() {
    let err = compile("frobnicate(1)", &[]).unwrap_err();
    assert!(err.position() >= 1);
    assert_eq!(err.reason(), "unknown identifier 'frobnicate'");
}

#[test]
fn indexing_a_scalar_is_a_compile_error() {
    let x = Cell::new(1.0);
    let symbols = [Symbol::scalar("x", &x)];
    let err = compile("x[0]", &symbols).unwrap_err();
    assert_eq!(err.reason(), "'[' index can only follow an array variable");
}

#[test]
fn nested_indexing_expression() {
    let a1 = array(&[10.0, 20.0, 30.0]);
    let symbols = [Symbol::array("A1", &a1)];
    // A1[A1[0] / 10] == A1[1] == 20
    assert_eq!(
        compile("A1[A1[0] / 10]", &symbols).unwrap().evaluate(),
        20.0
    );
}
