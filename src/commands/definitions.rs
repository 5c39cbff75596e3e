//! Command definitions.
//!
//! A [`Command`] is a named, aliasable operation with up to three lifecycle
//! hooks and an optional completer. Commands are built once and never mutated
//! after registration.

use std::fmt;

use super::context::CallContext;

/// A lifecycle hook (before, handler or after).
pub type Hook = Box<dyn Fn(&CallContext) -> anyhow::Result<()>>;

/// Produces completion candidates for a partially typed invocation.
pub type Completer = Box<dyn Fn(&CallContext) -> Vec<String>>;

/// A registered command.
pub struct Command {
    /// Primary name, matched case-insensitively.
    pub name: String,
    /// Alternative names, matched case-insensitively.
    pub aliases: Vec<String>,
    /// One-line explanation shown by `help`.
    pub explain: String,
    /// Runs before the handler.
    pub before: Option<Hook>,
    /// The command body.
    pub handler: Option<Hook>,
    /// Runs after the handler completes normally.
    pub after: Option<Hook>,
    /// Completion candidates for the command's arguments.
    pub completer: Option<Completer>,
}

impl Command {
    /// Creates a command with no aliases, explanation or hooks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            explain: String::new(),
            before: None,
            handler: None,
            after: None,
            completer: None,
        }
    }

    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds several aliases.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Sets the explanation text.
    pub fn explain(mut self, explain: impl Into<String>) -> Self {
        self.explain = explain.into();
        self
    }

    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CallContext) -> anyhow::Result<()> + 'static,
    {
        self.before = Some(Box::new(hook));
        self
    }

    pub fn handler<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CallContext) -> anyhow::Result<()> + 'static,
    {
        self.handler = Some(Box::new(hook));
        self
    }

    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CallContext) -> anyhow::Result<()> + 'static,
    {
        self.after = Some(Box::new(hook));
        self
    }

    pub fn completer<F>(mut self, completer: F) -> Self
    where
        F: Fn(&CallContext) -> Vec<String> + 'static,
    {
        self.completer = Some(Box::new(completer));
        self
    }

    /// Returns true if `text` equals the name or any alias, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.name.to_lowercase() == text || self.aliases.iter().any(|a| a.to_lowercase() == text)
    }

    /// Returns the name followed by every alias, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("explain", &self.explain)
            .field("before", &self.before.is_some())
            .field("handler", &self.handler.is_some())
            .field("after", &self.after.is_some())
            .field("completer", &self.completer.is_some())
            .finish()
    }
}
