//! The built-in `help` command.

use std::cell::RefCell;
use std::rc::Weak;

use super::definitions::Command;
use super::registry::Registry;
use crate::layout::format_table;
use crate::output::Sink;

/// Margin between help table columns.
const HELP_MARGIN: usize = 2;

/// Builds the help table: a header row, then one row per command.
pub fn help_table(registry: &Registry) -> Vec<Vec<String>> {
    let mut table = vec![vec![
        "Command".to_string(),
        "Alias".to_string(),
        "Explain".to_string(),
    ]];
    for cmd in registry.iter() {
        table.push(vec![
            cmd.name.clone(),
            cmd.aliases.join(" "),
            cmd.explain.clone(),
        ]);
    }
    table
}

/// Renders the help table as text.
pub fn help_text(registry: &Registry) -> String {
    format_table(&help_table(registry), HELP_MARGIN)
}

/// Creates the `help` command for the given registry, printing to `sink`.
///
/// Holds a weak reference so the registry does not keep itself alive.
pub fn help_command(registry: Weak<RefCell<Registry>>, sink: Sink) -> Command {
    Command::new("help")
        .alias("h")
        .explain("show help")
        .handler(move |_| {
            if let Some(registry) = registry.upgrade() {
                let text = help_text(&registry.borrow());
                sink.write_str(&text)?;
            }
            Ok(())
        })
}
