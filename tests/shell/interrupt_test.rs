//! Interrupt counting, abort callbacks and history persistence.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use replkit::{AbortAction, LoopExit, ReadOutcome, Shell, ShellConfig};

use super::common::{line, output, quiet_shell, shared, ScriptedEditor};

const INT: ReadOutcome = ReadOutcome::Interrupted;

#[test]
fn test_second_interrupt_aborts_by_default() {
    let (mut shell, buf) = quiet_shell();
    let (editor, shared_editor) = shared(ScriptedEditor::new([INT, INT, line("help")]));

    let exit = shell.run(shared_editor).unwrap();

    assert_eq!(exit, LoopExit::Aborted(2));
    assert_eq!(output(&buf), "press Ctrl-C again to exit\n");
    // The line after the second interrupt is never read.
    assert_eq!(editor.borrow().script.len(), 1);
}

#[test]
fn test_configured_threshold() {
    let buf = Rc::new(RefCell::new(Vec::new()));
    let mut shell = Shell::with_config(&ShellConfig {
        abort_threshold: 3,
        ..Default::default()
    });
    shell.set_output(buf.clone());
    let (_, editor) = shared(ScriptedEditor::new([INT, INT, INT]));

    assert_eq!(shell.run(editor).unwrap(), LoopExit::Aborted(3));
    assert_eq!(
        output(&buf),
        "press Ctrl-C again to exit\npress Ctrl-C again to exit\n"
    );
}

#[test]
fn test_successful_line_resets_counter() {
    let (mut shell, _) = quiet_shell();
    let (_, editor) = shared(ScriptedEditor::new([INT, line("help"), INT, line("")]));

    let exit = shell.run(editor).unwrap();

    assert_eq!(exit, LoopExit::EndOfInput);
    assert_eq!(shell.abort_count(), 0);
}

#[test]
fn test_custom_callback_sees_counts() {
    let (mut shell, buf) = quiet_shell();
    let counts = Rc::new(RefCell::new(Vec::new()));
    let sink = counts.clone();
    shell.on_abort(move |count| {
        sink.borrow_mut().push(count);
        if count >= 4 {
            AbortAction::Exit
        } else {
            AbortAction::Continue
        }
    });
    let (_, editor) = shared(ScriptedEditor::new([INT, INT, line("x"), INT, INT, INT, INT]));

    assert_eq!(shell.run(editor).unwrap(), LoopExit::Aborted(4));
    assert_eq!(*counts.borrow(), vec![1, 2, 1, 2, 3, 4]);
    // Only the unknown command is reported; the callback printed nothing.
    assert_eq!(output(&buf), "Unknown command\n");
}

#[test]
fn test_cleared_callback_only_counts() {
    let (mut shell, buf) = quiet_shell();
    shell.clear_on_abort();
    let (_, editor) = shared(ScriptedEditor::new([INT, INT, INT]));

    assert_eq!(shell.run(editor).unwrap(), LoopExit::EndOfInput);
    assert_eq!(shell.abort_count(), 3);
    assert_eq!(output(&buf), "");
}

#[test]
fn test_history_saved_before_abort_callback() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history");
    let (mut shell, _) = quiet_shell();
    shell.set_history_file(&path);

    let (editor, shared_editor) = shared(ScriptedEditor::new([INT]));
    let observer = editor.clone();
    let saved_at_abort = Rc::new(RefCell::new(None));
    let sink = saved_at_abort.clone();
    shell.on_abort(move |_| {
        *sink.borrow_mut() = Some(observer.borrow().saved.len());
        AbortAction::Exit
    });

    assert_eq!(shell.run(shared_editor).unwrap(), LoopExit::Aborted(1));
    assert_eq!(*saved_at_abort.borrow(), Some(1));
    assert_eq!(editor.borrow().loaded, vec![path.clone()]);
    assert_eq!(editor.borrow().saved, vec![path]);
}

#[test]
fn test_history_saved_at_end_of_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history");
    let (mut shell, _) = quiet_shell();
    shell.set_history_file(&path);

    let (editor, shared_editor) = shared(ScriptedEditor::new([line("help"), line("help")]));
    shell.run(shared_editor).unwrap();

    let editor = editor.borrow();
    assert_eq!(editor.history, vec!["help", "help"]);
    assert_eq!(editor.saved, vec![path]);
}

#[test]
fn test_no_history_file_means_no_persistence() {
    let (mut shell, _) = quiet_shell();
    let (editor, shared_editor) = shared(ScriptedEditor::new([INT, line("help")]));

    shell.run(shared_editor).unwrap();

    assert!(editor.borrow().loaded.is_empty());
    assert!(editor.borrow().saved.is_empty());
}
