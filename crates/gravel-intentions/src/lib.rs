//! Syntax-level intentions for Groovy sources.
//!
//! The only intention today is [`ConvertLambdaToClosure`], which rewrites a Java-style
//! lambda (`(a, b) -> a + b`) into the equivalent Groovy closure literal
//! (`{a, b -> a + b}`). The text synthesis lives in [`closure_text`]; everything
//! that touches a live document goes through the [`IntentionHost`] seam.

mod closure;
mod convert_lambda;
mod host;

pub use closure::closure_text;
pub use convert_lambda::{convert_all, intentions_at, ConvertLambdaToClosure};
pub use host::{Document, IntentionHost, ReplaceError};
