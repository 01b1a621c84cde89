//! The builtin function table: a static, name-sorted slice resolved by binary search, mirroring
//! how the caller's own symbol table is resolved by linear scan — builtins are simply the
//! fallback tier once the caller's bindings have been checked.

use crate::ast::PlainFn;
use crate::symbol::ArrayView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AggregateKind {
    ArrLen,
    ArrMax,
    ArrMin,
    Sum,
    LinearInterpolate,
}

pub(crate) enum BuiltinKind {
    Plain(PlainFn),
    Aggregate(AggregateKind),
}

pub(crate) struct BuiltinDescriptor {
    pub name: &'static str,
    pub arity: u8,
    pub pure: bool,
    pub kind: BuiltinKind,
    /// Bitmask over argument positions: bit `i` set means argument `i` must be a bare array
    /// reference rather than a value to evaluate. Only meaningful for `Aggregate` builtins.
    pub array_params: u8,
}

macro_rules! plain {
    ($name:expr, $arity:expr, $f:expr) => {
        BuiltinDescriptor {
            name: $name,
            arity: $arity,
            pure: true,
            kind: BuiltinKind::Plain($f),
            array_params: 0,
        }
    };
}

macro_rules! aggregate {
    ($name:expr, $arity:expr, $kind:expr, $mask:expr) => {
        BuiltinDescriptor {
            name: $name,
            arity: $arity,
            pure: true,
            kind: BuiltinKind::Aggregate($kind),
            array_params: $mask,
        }
    };
}

pub(crate) static BUILTINS: &[BuiltinDescriptor] = &[
    plain!("abs", 1, b_abs),
    plain!("acos", 1, b_acos),
    aggregate!("arrlen", 1, AggregateKind::ArrLen, 0b1),
    aggregate!("arrmax", 1, AggregateKind::ArrMax, 0b1),
    aggregate!("arrmin", 1, AggregateKind::ArrMin, 0b1),
    plain!("asin", 1, b_asin),
    plain!("atan", 1, b_atan),
    plain!("atan2", 2, b_atan2),
    plain!("bit", 2, b_bit),
    plain!("ceil", 1, b_ceil),
    plain!("cos", 1, b_cos),
    plain!("cosh", 1, b_cosh),
    plain!("e", 0, b_e),
    plain!("exp", 1, b_exp),
    plain!("fac", 1, b_fac),
    plain!("floor", 1, b_floor),
    aggregate!(
        "linear_interpolate",
        3,
        AggregateKind::LinearInterpolate,
        0b011
    ),
    plain!("ln", 1, b_ln),
    plain!("log", 1, b_log),
    plain!("log10", 1, b_log10),
    plain!("ncr", 2, b_ncr),
    plain!("npr", 2, b_npr),
    plain!("pi", 0, b_pi),
    plain!("pow", 2, b_pow),
    plain!("sin", 1, b_sin),
    plain!("sinh", 1, b_sinh),
    plain!("sqrt", 1, b_sqrt),
    aggregate!("sum", 1, AggregateKind::Sum, 0b1),
    plain!("tan", 1, b_tan),
    plain!("tanh", 1, b_tanh),
    plain!("xor", 2, b_xor),
];

pub(crate) fn lookup(name: &str) -> Option<&'static BuiltinDescriptor> {
    BUILTINS
        .binary_search_by(|d| d.name.cmp(name))
        .ok()
        .map(|i| &BUILTINS[i])
}

fn b_abs(a: &[f64]) -> f64 {
    a[0].abs()
}
fn b_acos(a: &[f64]) -> f64 {
    a[0].acos()
}
fn b_asin(a: &[f64]) -> f64 {
    a[0].asin()
}
fn b_atan(a: &[f64]) -> f64 {
    a[0].atan()
}
fn b_atan2(a: &[f64]) -> f64 {
    a[0].atan2(a[1])
}
fn b_bit(a: &[f64]) -> f64 {
    bit_at(a[0], a[1])
}
fn b_ceil(a: &[f64]) -> f64 {
    a[0].ceil()
}
fn b_cos(a: &[f64]) -> f64 {
    a[0].cos()
}
fn b_cosh(a: &[f64]) -> f64 {
    a[0].cosh()
}
fn b_e(_a: &[f64]) -> f64 {
    std::f64::consts::E
}
fn b_exp(a: &[f64]) -> f64 {
    a[0].exp()
}
fn b_fac(a: &[f64]) -> f64 {
    factorial(a[0])
}
fn b_floor(a: &[f64]) -> f64 {
    a[0].floor()
}
fn b_ln(a: &[f64]) -> f64 {
    a[0].ln()
}
fn b_log(a: &[f64]) -> f64 {
    #[cfg(feature = "natural-log")]
    {
        a[0].ln()
    }
    #[cfg(not(feature = "natural-log"))]
    {
        a[0].log10()
    }
}
fn b_log10(a: &[f64]) -> f64 {
    a[0].log10()
}
fn b_ncr(a: &[f64]) -> f64 {
    ncr(a[0], a[1])
}
fn b_npr(a: &[f64]) -> f64 {
    npr(a[0], a[1])
}
fn b_pi(_a: &[f64]) -> f64 {
    std::f64::consts::PI
}
fn b_pow(a: &[f64]) -> f64 {
    a[0].powf(a[1])
}
fn b_sin(a: &[f64]) -> f64 {
    a[0].sin()
}
fn b_sinh(a: &[f64]) -> f64 {
    a[0].sinh()
}
fn b_sqrt(a: &[f64]) -> f64 {
    a[0].sqrt()
}
fn b_tan(a: &[f64]) -> f64 {
    a[0].tan()
}
fn b_tanh(a: &[f64]) -> f64 {
    a[0].tanh()
}
fn b_xor(a: &[f64]) -> f64 {
    xor_bits(a[0], a[1])
}

const MAX_53: u64 = (1u64 << 53) - 1;

fn to_u53(x: f64) -> Option<u64> {
    if !x.is_finite() {
        return None;
    }
    let r = x.round();
    if r < 0.0 || r > MAX_53 as f64 {
        return None;
    }
    Some(r as u64)
}

pub(crate) fn band(a: f64, b: f64) -> f64 {
    match (to_u53(a), to_u53(b)) {
        (Some(x), Some(y)) => (x & y) as f64,
        _ => f64::NAN,
    }
}

pub(crate) fn bor(a: f64, b: f64) -> f64 {
    match (to_u53(a), to_u53(b)) {
        (Some(x), Some(y)) => (x | y) as f64,
        _ => f64::NAN,
    }
}

fn xor_bits(a: f64, b: f64) -> f64 {
    match (to_u53(a), to_u53(b)) {
        (Some(x), Some(y)) => (x ^ y) as f64,
        _ => f64::NAN,
    }
}

fn bit_at(n: f64, i: f64) -> f64 {
    let x = match to_u53(n) {
        Some(x) => x,
        None => return f64::NAN,
    };
    if !i.is_finite() || i < 0.0 || i >= 53.0 {
        return f64::NAN;
    }
    let idx = i.trunc() as u32;
    if (x >> idx) & 1 == 1 {
        1.0
    } else {
        0.0
    }
}

/// Factorial, capped at `u32::MAX` as input and saturating to `+Infinity` past it (and past any
/// intermediate `f64` overflow).
fn factorial(n: f64) -> f64 {
    if !n.is_finite() || n < 0.0 {
        return f64::NAN;
    }
    let n = n.round();
    if n > u32::MAX as f64 {
        return f64::INFINITY;
    }
    let n = n as u64;
    let mut acc = 1.0f64;
    for i in 2..=n {
        acc *= i as f64;
        if acc.is_infinite() {
            return f64::INFINITY;
        }
    }
    acc
}

fn ncr(n: f64, r: f64) -> f64 {
    if !n.is_finite() || !r.is_finite() || n < 0.0 || r < 0.0 {
        return f64::NAN;
    }
    let n = n.round();
    let r = r.round();
    if r > n {
        return f64::NAN;
    }
    let r = r.min(n - r);
    let mut result = 1.0f64;
    let rn = r as u64;
    for i in 0..rn {
        result *= (n - i as f64) / (i as f64 + 1.0);
        if !result.is_finite() {
            return f64::INFINITY;
        }
    }
    if result > u32::MAX as f64 {
        return f64::INFINITY;
    }
    result.round()
}

fn npr(n: f64, r: f64) -> f64 {
    if !n.is_finite() || !r.is_finite() || n < 0.0 || r < 0.0 {
        return f64::NAN;
    }
    let n = n.round();
    let r = r.round();
    if r > n {
        return f64::NAN;
    }
    let mut result = 1.0f64;
    let rn = r as u64;
    for i in 0..rn {
        result *= n - i as f64;
        if result.is_infinite() {
            return f64::INFINITY;
        }
    }
    if result > u32::MAX as f64 {
        return f64::INFINITY;
    }
    result
}

pub(crate) fn arr_len(view: ArrayView) -> f64 {
    view.len() as f64
}

pub(crate) fn arr_max(view: ArrayView) -> f64 {
    let n = view.len();
    if n == 0 {
        return f64::NAN;
    }
    (0..n).map(|i| view.at(i)).fold(f64::NEG_INFINITY, f64::max)
}

pub(crate) fn arr_min(view: ArrayView) -> f64 {
    let n = view.len();
    if n == 0 {
        return f64::NAN;
    }
    (0..n).map(|i| view.at(i)).fold(f64::INFINITY, f64::min)
}

pub(crate) fn arr_sum(view: ArrayView) -> f64 {
    (0..view.len()).map(|i| view.at(i)).sum()
}

/// Linear interpolation over two parallel arrays (domain, range), ascending or descending.
pub(crate) fn linear_interpolate(d: ArrayView, r: ArrayView, x: f64) -> f64 {
    let n = d.len();
    if n < 2 || r.len() != n {
        return f64::NAN;
    }
    let ascending = d.at(n - 1) > d.at(0);
    for i in 0..n - 1 {
        let (d0, d1) = (d.at(i), d.at(i + 1));
        let (lo, hi) = if ascending { (d0, d1) } else { (d1, d0) };
        if x >= lo && x <= hi {
            let (r0, r1) = (r.at(i), r.at(i + 1));
            if d1 == d0 {
                return (r0 + r1) / 2.0;
            }
            return r0 + (x - d0) / (d1 - d0) * (r1 - r0);
        }
    }
    f64::NAN
}
