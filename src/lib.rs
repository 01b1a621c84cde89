//! A tiny, embeddable arithmetic expression compiler and evaluator.
//!
//! ```text
//! list    := expr (',' expr)*
//! expr    := term (('+'|'-') term)*
//! term    := factor (('*'|'/'|'%'|'&'|'|') factor)*
//! factor  := power ('^' power)*            -- left-assoc by default
//! power   := ('+'|'-')* base
//! base    := number
//!          | variable postfix?
//!          | func0 ('(' ')')?
//!          | func1 power
//!          | funcN '(' expr (',' expr){N-1} ')'      N >= 2
//!          | '(' list ')'
//! postfix := '[' list ']'
//! ```
//!
//! Compilation binds scalar and array identifiers to caller-owned storage (see [`Symbol`]) and
//! resolves everything else against a fixed builtin table. Evaluation never panics: the only
//! runtime error signal is `NaN`.

mod ast;
mod builtin;
mod error;
mod eval;
mod lexer;
mod optimize;
mod parser;
mod symbol;
mod token;

pub mod diagnostics;

pub use error::CompileError;
pub use symbol::Symbol;

use ast::Node;
use parser::Parser;
use symbol::SymbolTable;

/// A compiled expression tree, borrowing the caller-bound storage passed to [`compile`] for the
/// lifetime `'a`.
pub struct CompiledExpr<'a> {
    root: Node<'a>,
}

impl<'a> CompiledExpr<'a> {
    /// Evaluates the tree against the current contents of its bound scalars and arrays. Never
    /// panics; any runtime failure (out-of-range index, out-of-range bitwise operand, ...)
    /// surfaces as `NaN`.
    pub fn evaluate(&self) -> f64 {
        eval::eval(&self.root)
    }
}

/// Compiles `text` against `symbols`, returning a tree ready to be [`evaluate`](CompiledExpr::evaluate)d
/// repeatedly as the caller mutates the scalars/arrays it was bound to.
pub fn compile<'a>(
    text: &str,
    symbols: &'a [Symbol<'a>],
) -> Result<CompiledExpr<'a>, CompileError> {
    let span = tracing::debug_span!("compile", len = text.len());
    let _enter = span.enter();

    let table = SymbolTable::new(symbols);
    let tokens = lexer::lex(text, &table);
    match Parser::new(tokens).parse() {
        Ok(root) => {
            let root = optimize::optimize(root);
            Ok(CompiledExpr { root })
        }
        Err(err) => {
            tracing::debug!(pos = err.position(), reason = err.reason(), "compile failed");
            Err(err)
        }
    }
}

/// Compiles and immediately evaluates `text` with no bindings. Returns `NaN` if `text` does not
/// compile, exactly as a runtime evaluation failure would.
pub fn interp(text: &str) -> f64 {
    match compile(text, &[]) {
        Ok(expr) => expr.evaluate(),
        Err(_) => f64::NAN,
    }
}

/// Releases a compiled expression. Provided for interface parity with hosts that expect an
/// explicit teardown call; in practice, letting `tree` go out of scope does the same thing.
pub fn free(tree: CompiledExpr<'_>) {
    drop(tree);
}
