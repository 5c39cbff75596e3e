//! Command parsing, definition and registration.
//!
//! Parsing is split from dispatch so tokenizing and binding can be unit
//! tested without a running shell.

pub mod context;
pub mod definitions;
pub mod help;
pub mod registry;
pub mod tokenizer;

pub use context::{bind, CallContext};
pub use definitions::{Command, Completer, Hook};
pub use registry::{CommandBundle, Operations, Registry};
pub use tokenizer::tokenize;
