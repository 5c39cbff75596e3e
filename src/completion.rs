//! Tab-completion resolution.
//!
//! Candidates are whole lines: the line editor replaces everything typed so
//! far with the chosen candidate.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::commands::context::bind;
use crate::commands::registry::Registry;
use crate::commands::tokenizer::tokenize;

/// Resolves completion candidates against a shared registry.
#[derive(Debug, Clone)]
pub struct Completion {
    registry: Rc<RefCell<Registry>>,
}

impl Completion {
    pub fn new(registry: Rc<RefCell<Registry>>) -> Self {
        Self { registry }
    }

    /// Returns completion candidates for a partially typed line.
    ///
    /// - When the first token names a command, the command's completer
    ///   supplies candidates for its arguments.
    /// - When the line is still a single unknown word, command names and
    ///   aliases starting with it are returned.
    /// - Otherwise there are no candidates.
    pub fn complete(&self, partial: &str) -> Vec<String> {
        let registry = self.registry.borrow();
        let tokens = tokenize(partial);
        let filled = tokens.iter().filter(|t| !t.is_empty()).count();

        if filled > 0 {
            if let Some(cmd) = registry.resolve(&tokens[0]) {
                let Some(completer) = cmd.completer.as_ref() else {
                    return Vec::new();
                };

                let candidates = completer(&bind(&tokens));
                trace!(command = %cmd.name, count = candidates.len(), "completer candidates");

                let prefix = line_prefix(&tokens);
                // A bare command word completes as if followed by a space.
                let appending = partial.ends_with(' ') || filled == 1;
                if appending {
                    return candidates
                        .into_iter()
                        .map(|c| format!("{prefix} {c}"))
                        .collect();
                }

                let last = tokens
                    .iter()
                    .rev()
                    .find(|t| !t.is_empty())
                    .map(String::as_str)
                    .unwrap_or_default();
                return candidates
                    .into_iter()
                    .filter(|c| c.replace('"', "").starts_with(last))
                    .map(|c| format!("{prefix} {c}"))
                    .collect();
            }
        }

        if tokens.len() <= 1 {
            return registry
                .names()
                .into_iter()
                .filter(|name| name.starts_with(partial))
                .collect();
        }

        Vec::new()
    }
}

/// Rebuilds the line from all but the last token.
///
/// With a single token there is nothing before it, so the command word
/// itself is used.
fn line_prefix(tokens: &[String]) -> String {
    match tokens.split_last() {
        Some((_, [])) | None => tokens.first().cloned().unwrap_or_default(),
        Some((_, head)) => head.join(" "),
    }
}
