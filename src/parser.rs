//! Recursive-descent S-expression parser over a [`Stream`].
//!
//! Grammar:
//!
//! ```text
//! sexp -> wss (atom | '(' list) wss
//! list -> '(' wss sexp* ')'
//! atom -> any run of characters outside {whitespace, '(', ')'}
//! ```
//!
//! Parsing is single-pass and linear: every successful step consumes at
//! least one byte and a failed list element is never re-consumed, so there
//! is no backtracking. A failed parse yields no partial tree.

use crate::error::ParseError;
use crate::sexp::Sexp;
use crate::stream::Stream;

/// Parses exactly one S-expression from `text`. Leading and trailing
/// whitespace is insignificant; anything else left over after the expression
/// is an error.
pub fn parse_str(text: &str) -> Result<Sexp, ParseError> {
    parse_stream(&mut Stream::from_text(text))
}

/// Parses exactly one S-expression from a raw byte buffer, treated as UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<Sexp, ParseError> {
    parse_stream(&mut Stream::from_bytes(bytes))
}

/// Parses one S-expression from a caller-supplied stream and requires the
/// stream to be exhausted afterwards. The stream stays with the caller, so
/// low-level reads can continue on it after a failed parse.
pub fn parse_stream(stream: &mut Stream<'_>) -> Result<Sexp, ParseError> {
    let sexp = parse_expr(stream)?;
    if !stream.at_end() {
        let found = stream.peek_char().unwrap_or('\u{FFFD}');
        return Err(ParseError::unexpected_char(found, "end of input", stream));
    }
    Ok(sexp)
}

fn is_atom_terminator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '(' || c == ')'
}

/// Consumes ASCII whitespace. A consumed `'\n'` additionally starts a new
/// line; this is the only place line/column bookkeeping is driven from
/// content.
fn skip_whitespace(stream: &mut Stream<'_>) {
    while let Ok(c) = stream.peek_char() {
        if !c.is_ascii_whitespace() {
            break;
        }
        let newline = c == '\n';
        let _ = stream.read_char(); // same bytes the peek just decoded
        if newline {
            stream.advance_line();
        }
    }
}

/// `sexp -> wss (atom | '(' list) wss`
fn parse_expr(stream: &mut Stream<'_>) -> Result<Sexp, ParseError> {
    skip_whitespace(stream);
    if stream.at_end() {
        return Err(ParseError::unexpected_end_of_input("atom or list", stream));
    }
    let sexp = if stream.accept_char('(').unwrap_or(false) {
        parse_list(stream)?
    } else {
        parse_atom(stream)?
    };
    skip_whitespace(stream);
    Ok(sexp)
}

/// `atom -> symbol | number` — both yield the same leaf; the grammar does
/// not classify numerals.
fn parse_atom(stream: &mut Stream<'_>) -> Result<Sexp, ParseError> {
    let start = stream.position();
    while let Ok(c) = stream.peek_char() {
        if is_atom_terminator(c) {
            break;
        }
        let _ = stream.read_char();
    }
    let end = stream.position();
    if end == start {
        // Empty span: report the terminator if there is one, otherwise the
        // input simply ran out.
        return Err(match stream.peek_char() {
            Ok(c) => ParseError::unexpected_char(c, "atom", stream),
            Err(_) => ParseError::unexpected_end_of_input("atom", stream),
        });
    }
    let text = String::from_utf8_lossy(&stream.bytes()[start..end]).into_owned();
    Ok(Sexp::Atom(text))
}

/// `list -> '(' wss sexp* ')'` — the opening `'('` was consumed by the
/// caller.
fn parse_list(stream: &mut Stream<'_>) -> Result<Sexp, ParseError> {
    let mut items = Vec::new();
    skip_whitespace(stream);
    loop {
        skip_whitespace(stream);
        // A failed element parse terminates the loop rather than the list:
        // whatever stopped it is either the closing ')' or a real error that
        // the closing check below reports.
        match parse_expr(stream) {
            Ok(item) => items.push(item),
            Err(_) => break,
        }
    }
    if stream.at_end() {
        return Err(ParseError::unexpected_end_of_input("')'", stream));
    }
    match stream.accept_char(')') {
        Ok(true) => Ok(Sexp::List(items)),
        _ => {
            let found = stream.peek_char().unwrap_or('\u{FFFD}');
            Err(ParseError::unexpected_char(found, "')'", stream))
        }
    }
}
