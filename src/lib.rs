//! Cursor-based byte stream and recursive-descent S-expression parser.
//!
//! Two layered pieces:
//!
//! - [`Stream`]: an immutable byte buffer plus a mutable read cursor
//!   (byte offset, 1-based line and column) with typed little-endian
//!   peek/read/expect/accept readers. It knows nothing about parsing.
//! - The parser ([`parse_str`], [`parse_bytes`], [`parse_stream`]): drives a
//!   `Stream` to a [`Sexp`] tree or a positioned [`ParseError`].
//!
//! Parsing is synchronous, in-memory, and single-pass; there is no shared
//! state between parse calls.
//!
//! ```
//! use sexp_stream::{parse_str, Sexp};
//!
//! let tree = parse_str("(add (add2 foo))").unwrap();
//! let items = tree.into_list().unwrap();
//! assert_eq!(items[0], Sexp::Atom("add".into()));
//! ```

pub mod error;
pub mod parser;
pub mod sexp;
pub mod stream;

pub use crate::error::ParseError;
pub use crate::parser::{parse_bytes, parse_str, parse_stream};
pub use crate::sexp::Sexp;
pub use crate::stream::{char_width, OutOfBounds, Stream};
