//! The parse result tree.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::parser::parse_str;

/// An S-expression: either an atom or an ordered list of sub-expressions.
///
/// The tree is plain data. Atoms hold the decoded source text as-is; the
/// grammar does not yet distinguish symbols from numbers, so both come back
/// as [`Sexp::Atom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sexp {
    /// A leaf token, opaque to the grammar.
    Atom(String),
    /// A possibly empty sequence of sub-expressions in source order.
    List(Vec<Sexp>),
}

impl Sexp {
    /// Returns the atom's text, or `None` for a list.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Sexp::Atom(text) => Some(text),
            Sexp::List(_) => None,
        }
    }

    /// Returns the list's items, or `None` for an atom.
    pub fn as_list(&self) -> Option<&[Sexp]> {
        match self {
            Sexp::Atom(_) => None,
            Sexp::List(items) => Some(items),
        }
    }

    /// Consumes the value, returning the list's items if it is a list.
    pub fn into_list(self) -> Option<Vec<Sexp>> {
        match self {
            Sexp::Atom(_) => None,
            Sexp::List(items) => Some(items),
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Sexp::Atom(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Sexp::List(_))
    }
}

impl FromStr for Sexp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}
