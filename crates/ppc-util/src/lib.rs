//! Shared foundation types for the compiler pipeline: source spans and the
//! per-stage error enums every other crate in the workspace reports through.
//!
//! Kept deliberately small. The pipeline has no multi-file compilation and no
//! diagnostic accumulation, so this crate does not carry a string interner,
//! typed index vectors, or a diagnostic-accumulating `Handler` — each stage
//! returns a `Result` and the driver stops at the first `Err` it sees.

pub mod error;
pub mod span;

pub use error::{LexError, LexResult, ParseError, ParseResult, SemanticError, SemanticResult};
pub use span::Span;
