use std::fs;
use std::io::Cursor;

use pretty_assertions::assert_eq;
use tab_shell::shell::Shell;
use tabbed_session::workbench::ABOUT_TEXT;
use tabbed_session::KeybindingsManager;

type ScriptShell = Shell<Cursor<Vec<u8>>, Vec<u8>>;

fn run_script(script: &str) -> ScriptShell {
    let mut shell = Shell::new(
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
        KeybindingsManager::default(),
        24,
    );
    shell.run().expect("in-memory shell I/O cannot fail");
    shell
}

fn output_of(shell: ScriptShell) -> String {
    String::from_utf8(shell.into_output()).expect("shell output should be UTF-8")
}

#[test]
fn type_save_and_quit() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("a.txt");
    let script = format!("hello\n/save {}\n/tabs\n/quit\nnever read\n", path.display());

    let shell = run_script(&script);

    assert!(shell.workbench().should_exit());
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    assert_eq!(
        output_of(shell),
        "+ Untitled\n[Untitled]\n~ Untitled*\n~ a.txt\n[a.txt]\n"
    );
}

#[test]
fn dirty_quit_asks_until_confirmed() {
    let shell = run_script("draft\n/quit\nn\n/quit\nyes\n");

    assert!(shell.workbench().should_exit());
    let output = output_of(shell);
    assert_eq!(output.matches("are you sure you want to quit? [y/N] ").count(), 2);
}

#[test]
fn closing_last_dirty_tab_replaces_it() {
    let shell = run_script("text\n/close\ny\n/tabs\n");

    assert_eq!(shell.workbench().session().len(), 1);
    assert!(!shell.workbench().should_exit());
    let output = output_of(shell);
    assert!(output.ends_with(
        "are you sure you want to close this tab? [y/N] + Untitled\n- Untitled*\n[Untitled]\n"
    ));
}

#[test]
fn declined_close_keeps_tab_and_buffer() {
    let shell = run_script("keep me\n/close\nn\n");

    let session = shell.workbench().session();
    assert_eq!(session.len(), 1);
    let id = session.active_id();
    assert_eq!(shell.host().buffer(id), Some("keep me"));
}

#[test]
fn open_missing_file_reports_status() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let script = format!("/open {}\n", dir.path().join("gone.txt").display());

    let shell = run_script(&script);

    assert_eq!(shell.workbench().session().len(), 1);
    assert!(output_of(shell).contains("! open operation unsuccessful\n"));
}

#[test]
fn open_edit_and_undo_back_to_clean() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("notes.txt");
    fs::write(&path, "line one").unwrap();
    let script = format!("/open {}\nline two\n/undo\n/show\n/tab 1\n", path.display());

    let shell = run_script(&script);

    assert_eq!(shell.workbench().session().len(), 2);
    assert_eq!(
        output_of(shell),
        "+ Untitled\n[Untitled]\n+ notes.txt\n~ notes.txt*\n~ notes.txt\nline one\n[Untitled]| notes.txt \n"
    );
}

#[test]
fn cancelled_save_keeps_dirty_label() {
    let shell = run_script("draft\n/save\n\n/tabs\n");

    let output = output_of(shell);
    assert!(output.contains("save as: ! save operation unsuccessful\n"));
    assert!(output.ends_with("[Untitled*]\n"));
}

#[test]
fn key_chords_resolve_through_keybindings() {
    let shell = run_script("/key ctrl+n\n/key ctrl+z\n/key F1\n");

    assert_eq!(shell.workbench().session().len(), 2);
    let output = output_of(shell);
    assert_eq!(output.matches("+ Untitled\n").count(), 2);
    assert!(output.contains("! unbound key ctrl+z\n"));
    assert!(output.contains(&format!("! {ABOUT_TEXT}\n")));
}

#[test]
fn leading_blank_line_is_kept() {
    let shell = run_script("\nx\n/undo\ny\n");

    let id = shell.workbench().session().active_id();
    assert_eq!(shell.host().buffer(id), Some("\ny"));
}

#[test]
fn empty_answer_to_second_save_cancels() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("a.txt");
    let script = format!("a\n/save {}\nb\n/save\n\n/tabs\n", path.display());

    let shell = run_script(&script);

    assert_eq!(fs::read_to_string(&path).unwrap(), "a");
    let output = output_of(shell);
    assert!(output.contains(&format!(
        "save as (last {}): ! save operation unsuccessful\n",
        path.display()
    )));
    assert!(output.ends_with("[a.txt*]\n"));
}

#[test]
fn doubled_slash_types_literal_path() {
    let shell = run_script("//etc/hosts\n");

    let id = shell.workbench().session().active_id();
    assert_eq!(shell.host().buffer(id), Some("/etc/hosts"));
}
