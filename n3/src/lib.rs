//! Implementation of a [Notation3](https://www.w3.org/TeamSubmission/n3/) parser.
//!
//! The parser works in streaming from a `BufRead` implementation. It understands the shorthand
//! words (`a`, `is ... of`, `has`), the `=`, `=>` and `<=` operators, the `!` and `^` paths,
//! ordered lists, blank nodes and quoted graphs.
//!
//! Malformed statements are skipped and reported as warnings rather than aborting the parse.

mod context;
mod error;
mod lexer;
mod links;
mod parser;
mod utils;

pub use context::Context;
pub use error::{N3Error, N3ErrorKind, N3Warning, Scope, WarningKind};
pub use parser::N3Parser;
