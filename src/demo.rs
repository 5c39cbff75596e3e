//! Commands registered by the `replkit` binary.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{bail, Context};
use replkit::layout;
use replkit::terminal::{CrosstermTerminal, Terminal};
use replkit::{CallContext, Command, CommandBundle, Operations, Prompter, Shell, ShellConfig};

/// Registers the demo commands on `shell`.
pub fn register(shell: &mut Shell, config: &ShellConfig) {
    shell.append_command(echo_command());
    shell.append_command(columns_command(config.margin, config.width_factor));
    shell.append_command(clear_command());
    shell.append_command(login_command(shell.prompter()));
    shell.add_bundle(Notes::default());
}

fn echo_command() -> Command {
    Command::new("echo")
        .explain("print arguments and flags")
        .handler(|ctx| {
            println!("{}", ctx.positionals.join(" "));
            for (name, value) in &ctx.flags {
                println!("  --{name} = {value:?}");
            }
            Ok(())
        })
}

fn columns_command(margin: usize, width_factor: f32) -> Command {
    Command::new("columns")
        .alias("ls")
        .explain("lay out arguments in columns")
        .handler(move |ctx| {
            let margin = match ctx.flag("margin") {
                Some(m) => m.parse().context("--margin expects a number")?,
                None => margin,
            };
            let (columns, _) = CrosstermTerminal.size()?;
            let width = layout::available_width(columns, width_factor);
            print!("{}", layout::format_columns(&ctx.positionals[..], margin, width));
            Ok(())
        })
}

fn clear_command() -> Command {
    Command::new("clear")
        .alias("cls")
        .explain("clear the screen")
        .handler(|_| {
            CrosstermTerminal.clear_screen()?;
            Ok(())
        })
}

fn login_command(prompter: Prompter) -> Command {
    Command::new("login")
        .explain("prompt for credentials")
        .handler(move |ctx| {
            let user = match ctx.flag_any(&["user", "u"]) {
                Some(user) if !user.is_empty() => user.to_string(),
                _ => prompter.read_line("user: ")?,
            };
            let password = prompter.read_password("password: ")?;
            if password.is_empty() {
                bail!("empty password");
            }
            println!("logged in as {user}");
            Ok(())
        })
}

/// An in-memory note list exposed as `add`, `notes` and `drop`.
#[derive(Debug, Default)]
struct Notes {
    items: RefCell<Vec<String>>,
}

impl CommandBundle for Notes {
    fn aliases(&self) -> HashMap<String, Vec<String>> {
        HashMap::from([("notes".to_string(), vec!["n".to_string()])])
    }

    fn explains(&self) -> HashMap<String, String> {
        HashMap::from([
            ("add".to_string(), "add a note".to_string()),
            ("notes".to_string(), "list notes".to_string()),
            ("drop".to_string(), "remove a note".to_string()),
        ])
    }

    fn operations(self: Rc<Self>, ops: &mut Operations) {
        let (add, list, remove, complete) = (
            Rc::clone(&self),
            Rc::clone(&self),
            Rc::clone(&self),
            Rc::clone(&self),
        );
        ops.add("add", move |ctx| add.add(ctx))
            .add("notes", move |_| {
                for (i, note) in list.items.borrow().iter().enumerate() {
                    println!("{:>3}  {note}", i + 1);
                }
                Ok(())
            })
            .add_with_completer(
                "drop",
                move |ctx| remove.drop_note(ctx),
                move |_| complete.items.borrow().iter().map(|n| quote(n)).collect(),
            );
    }
}

/// Quotes a multi-word note so it tokenizes back into one argument.
fn quote(note: &str) -> String {
    if note.contains(' ') {
        format!("\"{note}\"")
    } else {
        note.to_string()
    }
}

impl Notes {
    fn add(&self, ctx: &CallContext) -> anyhow::Result<()> {
        if ctx.positionals.is_empty() {
            bail!("nothing to add");
        }
        self.items.borrow_mut().push(ctx.positionals.join(" "));
        Ok(())
    }

    fn drop_note(&self, ctx: &CallContext) -> anyhow::Result<()> {
        let Some(target) = ctx.positional(0) else {
            bail!("usage: drop <note>");
        };
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(|note| note != target);
        if items.len() == before {
            bail!("no note {target:?}");
        }
        Ok(())
    }
}
