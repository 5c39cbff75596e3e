//! Completion through the completer the shell installs on its editor.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use replkit::Command;

use super::common::{line, quiet_shell, shared, ScriptedEditor};

#[test]
fn test_run_installs_completer() {
    let (mut shell, _) = quiet_shell();
    shell.append_command(Command::new("history").alias("hist"));
    let (editor, shared_editor) = shared(ScriptedEditor::default());

    shell.run(shared_editor).unwrap();

    let editor = editor.borrow();
    assert!(editor.completer.is_some());
    assert_eq!(editor.complete("hi"), vec!["history", "hist"]);
    assert_eq!(editor.complete("he"), vec!["help"]);
}

#[test]
fn test_completer_follows_registry_changes() {
    let (mut shell, _) = quiet_shell();
    let (editor, shared_editor) = shared(ScriptedEditor::default());
    shell.run(shared_editor).unwrap();

    shell.append_command(Command::new("deploy"));
    assert_eq!(editor.borrow().complete("de"), vec!["deploy"]);

    shell.remove_command("deploy");
    assert!(editor.borrow().complete("de").is_empty());
}

#[test]
fn test_argument_completion_reflects_handler_state() {
    let (mut shell, _) = quiet_shell();
    let tags = Rc::new(RefCell::new(Vec::<String>::new()));
    let (add, list) = (tags.clone(), tags.clone());
    shell.append_command(
        Command::new("tag")
            .handler(move |ctx| {
                add.borrow_mut().extend(ctx.positionals.iter().cloned());
                Ok(())
            })
            .completer(move |_| list.borrow().clone()),
    );

    let (editor, shared_editor) = shared(ScriptedEditor::new([
        line("tag release"),
        line("tag \"release candidate\""),
    ]));
    shell.run(shared_editor).unwrap();

    assert_eq!(
        editor.borrow().complete("tag rel"),
        vec!["tag release", "tag release candidate"]
    );
    assert_eq!(
        editor.borrow().complete("tag "),
        vec!["tag release", "tag release candidate"]
    );
}
