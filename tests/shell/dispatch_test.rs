//! Dispatch through the running loop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use replkit::{
    CallContext, Command, CommandBundle, LoopExit, Operations, ReadOutcome, Shell, ShellConfig,
    ShellError,
};

use super::common::{line, output, quiet_shell, shared, ScriptedEditor};

#[test]
fn test_fault_does_not_stop_the_loop() {
    let (mut shell, buf) = quiet_shell();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    shell.append_command(Command::new("boom").handler(|_| panic!("handler exploded")));
    shell.append_command(Command::new("ok").handler(move |ctx| {
        sink.borrow_mut().push(ctx.raw_args.clone());
        Ok(())
    }));

    let (_, editor) = shared(ScriptedEditor::new([line("boom"), line("ok 1")]));
    let exit = shell.run(editor).unwrap();

    assert_eq!(exit, LoopExit::EndOfInput);
    assert_eq!(*seen.borrow(), vec![vec!["ok".to_string(), "1".to_string()]]);
    assert_eq!(
        output(&buf),
        "error to handle command boom: handler exploded\n"
    );
}

#[test]
fn test_blank_lines_are_unknown_commands() {
    let (mut shell, buf) = quiet_shell();
    let (editor, shared_editor) = shared(ScriptedEditor::new([
        line(""),
        line("   "),
        line("nope"),
    ]));

    shell.run(shared_editor).unwrap();

    assert_eq!(output(&buf), "Unknown command\n".repeat(3));
    assert_eq!(editor.borrow().history, vec!["nope".to_string()]);
    assert_eq!(editor.borrow().prompts.len(), 4);
}

#[test]
fn test_blank_lines_can_be_skipped() {
    let buf = Rc::new(RefCell::new(Vec::new()));
    let mut shell = Shell::with_config(&ShellConfig {
        skip_blank_lines: true,
        ..Default::default()
    });
    shell.set_output(buf.clone());
    let (_, editor) = shared(ScriptedEditor::new([line(""), line("   "), line("nope")]));

    shell.run(editor).unwrap();

    assert_eq!(output(&buf), "Unknown command\n");
}

#[test]
fn test_prompt_is_shown_for_every_read() {
    let (mut shell, _) = quiet_shell();
    shell.set_prompt("db> ");
    let (editor, shared_editor) = shared(ScriptedEditor::new([line("help")]));

    shell.run(shared_editor).unwrap();

    assert_eq!(editor.borrow().prompts, vec!["db> ", "db> "]);
}

#[test]
fn test_handler_prompts_for_password() {
    let (mut shell, buf) = quiet_shell();
    let prompter = shell.prompter();
    let secret = Rc::new(RefCell::new(None));
    let sink = secret.clone();
    shell.append_command(Command::new("login").handler(move |_| {
        *sink.borrow_mut() = Some(prompter.read_password("password: ")?);
        Ok(())
    }));

    let (editor, shared_editor) = shared(ScriptedEditor::new([line("login"), line("hunter2")]));
    shell.run(shared_editor).unwrap();

    assert_eq!(secret.borrow().as_deref(), Some("hunter2"));
    assert_eq!(editor.borrow().password_prompts, vec!["password: "]);
    // The password is not recorded as a command.
    assert_eq!(editor.borrow().history, vec!["login".to_string()]);
    assert_eq!(output(&buf), "");
}

#[test]
fn test_interrupted_password_prompt_faults_the_command() {
    let (mut shell, buf) = quiet_shell();
    let prompter = shell.prompter();
    shell.append_command(Command::new("login").handler(move |_| {
        prompter.read_password("password: ")?;
        Ok(())
    }));

    let (_, editor) = shared(ScriptedEditor::new([line("login"), ReadOutcome::Interrupted]));
    shell.run(editor).unwrap();

    assert_eq!(
        output(&buf),
        format!("error to handle command login: {}\n", ShellError::Interrupted)
    );
}

#[test]
fn test_prompter_outside_run_is_not_running() {
    let (shell, _) = quiet_shell();
    let err = shell.read_line("name: ").unwrap_err();
    assert!(matches!(err, ShellError::NotRunning));
}

#[derive(Default)]
struct Counter {
    value: RefCell<i64>,
}

impl CommandBundle for Counter {
    fn aliases(&self) -> HashMap<String, Vec<String>> {
        HashMap::from([("incr".to_string(), vec!["+".to_string()])])
    }

    fn explains(&self) -> HashMap<String, String> {
        HashMap::from([("incr".to_string(), "add to the counter".to_string())])
    }

    fn operations(self: Rc<Self>, ops: &mut Operations) {
        let incr = Rc::clone(&self);
        let reset = Rc::clone(&self);
        ops.add("incr", move |ctx: &CallContext| {
            let by = ctx.flag("by").unwrap_or("1").parse::<i64>()?;
            *incr.value.borrow_mut() += by;
            Ok(())
        })
        .add("reset", move |_| {
            *reset.value.borrow_mut() = 0;
            Ok(())
        });
    }
}

#[test]
fn test_bundle_operations_share_state() {
    let (mut shell, buf) = quiet_shell();
    shell.add_bundle(Counter::default());
    let registry = shell.registry();
    let incr = registry.borrow().resolve("+").unwrap();
    assert_eq!(incr.explain, "add to the counter");

    let (_, editor) = shared(ScriptedEditor::new([
        line("incr"),
        line("+ --by 5"),
        line("INCR --by x"),
    ]));
    shell.run(editor).unwrap();

    assert!(output(&buf).starts_with("error to handle command incr: "));
    assert!(shell.execute("reset").is_ok());
    assert!(registry.borrow().resolve("reset").is_some());
}

#[test]
fn test_help_lists_every_command() {
    let (mut shell, buf) = quiet_shell();
    shell.append_command(Command::new("exit").aliases(["quit", "q"]).explain("leave"));
    let (_, editor) = shared(ScriptedEditor::new([line("help")]));

    shell.run(editor).unwrap();

    assert_eq!(
        output(&buf),
        "Command  Alias   Explain\n\
         help     h       show help\n\
         exit     quit q  leave\n"
    );
}
