//! Command registry.
//!
//! An append-ordered list of commands. Lookup is a linear scan in
//! registration order, so the first command whose name or alias matches wins.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use super::context::CallContext;
use super::definitions::Command;

/// Ordered collection of registered commands.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<Rc<Command>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn append(&mut self, command: Command) {
        debug!(name = %command.name, aliases = ?command.aliases, "registering command");
        self.commands.push(Rc::new(command));
    }

    /// Resolves a command by name or alias, ignoring case.
    pub fn resolve(&self, text: &str) -> Option<Rc<Command>> {
        self.commands.iter().find(|cmd| cmd.matches(text)).cloned()
    }

    /// Removes the first command whose primary name matches, ignoring case.
    ///
    /// The command's aliases go with it. Aliases are not accepted here, so
    /// `remove("h")` does not remove `help`. A dispatch already holding the
    /// command keeps its own reference and runs to completion.
    pub fn remove(&mut self, name: &str) -> Option<Rc<Command>> {
        let name = name.to_lowercase();
        let index = self
            .commands
            .iter()
            .position(|cmd| cmd.name.to_lowercase() == name)?;
        debug!(name = %name, "removing command");
        Some(self.commands.remove(index))
    }

    /// Iterates over commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Command>> {
        self.commands.iter()
    }

    /// Every name and alias, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.commands
            .iter()
            .flat_map(|cmd| cmd.names().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// A group of related operations registered together.
///
/// Implementors describe their operations' aliases and explanations by name,
/// then enumerate each operation explicitly in [`CommandBundle::operations`].
/// The bundle is shared by every command derived from it, so operations
/// usually capture a clone of the `Rc<Self>` they are given.
pub trait CommandBundle: 'static {
    /// Alias lists keyed by operation name.
    fn aliases(&self) -> HashMap<String, Vec<String>> {
        HashMap::new()
    }

    /// Explanation text keyed by operation name.
    fn explains(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Adds one entry per operation.
    fn operations(self: Rc<Self>, ops: &mut Operations);
}

/// A single operation enumerated by a bundle.
struct Operation {
    name: String,
    handler: Box<dyn Fn(&CallContext) -> anyhow::Result<()>>,
    completer: Option<Box<dyn Fn(&CallContext) -> Vec<String>>>,
}

/// Operation list filled in by [`CommandBundle::operations`].
#[derive(Default)]
pub struct Operations {
    entries: Vec<Operation>,
}

impl Operations {
    /// Adds an operation without a completer.
    pub fn add<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&CallContext) -> anyhow::Result<()> + 'static,
    {
        self.entries.push(Operation {
            name: name.into(),
            handler: Box::new(handler),
            completer: None,
        });
        self
    }

    /// Adds an operation with its paired completer.
    pub fn add_with_completer<F, C>(
        &mut self,
        name: impl Into<String>,
        handler: F,
        completer: C,
    ) -> &mut Self
    where
        F: Fn(&CallContext) -> anyhow::Result<()> + 'static,
        C: Fn(&CallContext) -> Vec<String> + 'static,
    {
        self.entries.push(Operation {
            name: name.into(),
            handler: Box::new(handler),
            completer: Some(Box::new(completer)),
        });
        self
    }
}

/// Derives one command per operation of `bundle`.
pub fn bundle_commands<B: CommandBundle>(bundle: B) -> Vec<Command> {
    let bundle = Rc::new(bundle);
    let mut aliases = bundle.aliases();
    let mut explains = bundle.explains();

    let mut ops = Operations::default();
    Rc::clone(&bundle).operations(&mut ops);

    ops.entries
        .into_iter()
        .map(|op| Command {
            aliases: aliases.remove(&op.name).unwrap_or_default(),
            explain: explains.remove(&op.name).unwrap_or_default(),
            before: None,
            handler: Some(op.handler),
            after: None,
            completer: op.completer,
            name: op.name,
        })
        .collect()
}
