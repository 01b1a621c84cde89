//! Optional pretty-printing of a [`CompileError`] against its source text, for hosts that want a
//! caret-pointing report instead of (or in addition to) the bare byte offset.

use crate::error::CompileError;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::{self, termcolor::Buffer};

/// Renders `error` against `source` as a human-readable, caret-pointing report. `file_name` is
/// only used as the report's header; it need not correspond to a real file.
///
/// Propagates `codespan_reporting`'s own emit failure rather than panicking; a `SimpleFile` with
/// a label clamped to the source's bounds is not expected to ever actually produce one.
pub fn render(
    source: &str,
    file_name: &str,
    error: &CompileError,
) -> Result<String, codespan_reporting::files::Error> {
    let file = SimpleFile::new(file_name, source);
    let start = error.position().saturating_sub(1).min(source.len());
    let end = (start + 1).min(source.len()).max(start);
    let diagnostic: Diagnostic<()> = Diagnostic::error()
        .with_message(error.to_string())
        .with_labels(vec![Label::primary((), start..end).with_message("here")]);

    let mut buffer = Buffer::no_color();
    term::emit(&mut buffer, &term::Config::default(), &file, &diagnostic)?;
    Ok(String::from_utf8(buffer.into_inner()).expect("codespan-reporting emits valid UTF-8"))
}
