use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tabbed_session::{
    DocumentId, FsStore, Host, KeybindingsManager, Prompt, SessionAction, TabEvent, Workbench,
};
use tracing::debug;

use crate::commands::{parse_command, ShellCommand, HELP_TEXT};
use crate::tab_strip::{render_tab_strip, TabLabel};

/// Buffer text plus how many lines it holds, so an empty line is still a line.
#[derive(Debug, Default)]
struct Buffer {
    text: String,
    lines: usize,
}

impl Buffer {
    fn loaded(text: String) -> Self {
        let lines = if text.is_empty() {
            0
        } else {
            text.split('\n').count()
        };
        Self { text, lines }
    }

    fn push_line(&mut self, line: &str) {
        if self.lines > 0 {
            self.text.push('\n');
        }
        self.text.push_str(line);
        self.lines += 1;
    }

    fn pop_line(&mut self) {
        match self.lines {
            0 => {}
            1 => self.text.clear(),
            _ => {
                if let Some(index) = self.text.rfind('\n') {
                    self.text.truncate(index);
                }
            }
        }
        self.lines = self.lines.saturating_sub(1);
    }
}

/// Presentation state: buffers and tab labels, fed by workbench events.
pub struct ShellHost<R, W> {
    input: R,
    output: W,
    buffers: HashMap<DocumentId, Buffer>,
    tabs: Vec<(DocumentId, String)>,
    active: Option<DocumentId>,
    pending_path: Option<PathBuf>,
    write_error: Option<io::Error>,
}

impl<R: BufRead, W: Write> ShellHost<R, W> {
    fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            buffers: HashMap::new(),
            tabs: Vec::new(),
            active: None,
            pending_path: None,
            write_error: None,
        }
    }

    /// Next input line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn say(&mut self, text: &str) {
        if self.write_error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.output, "{text}") {
            self.write_error = Some(err);
        }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        if self.write_error.is_none() {
            let written = write!(self.output, "{question}").and_then(|()| self.output.flush());
            if let Err(err) = written {
                self.write_error = Some(err);
            }
        }
        match self.read_line() {
            Ok(answer) => answer,
            Err(err) => {
                self.write_error.get_or_insert(err);
                None
            }
        }
    }

    fn take_error(&mut self) -> io::Result<()> {
        match self.write_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn title_of(&self, id: DocumentId) -> String {
        self.tabs
            .iter()
            .find(|(tab, _)| *tab == id)
            .map(|(_, title)| title.clone())
            .unwrap_or_default()
    }

    fn active_buffer_mut(&mut self) -> Option<(DocumentId, &mut Buffer)> {
        let id = self.active?;
        self.buffers.get_mut(&id).map(|buffer| (id, buffer))
    }

    pub fn buffer(&self, id: DocumentId) -> Option<&str> {
        self.buffers.get(&id).map(|buffer| buffer.text.as_str())
    }
}

impl<R: BufRead, W: Write> Host for ShellHost<R, W> {
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        let answer = self.ask(&format!("{}: {} [y/N] ", prompt.title, prompt.message));
        matches!(
            answer.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
            Some("y" | "yes")
        )
    }

    fn choose_save_path(&mut self, suggested: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = self.pending_path.take() {
            return Some(path);
        }
        let question = match suggested {
            Some(path) => format!("save as (last {}): ", path.display()),
            None => "save as: ".to_string(),
        };
        let answer = self.ask(&question)?;
        let answer = answer.trim();
        (!answer.is_empty()).then(|| PathBuf::from(answer))
    }

    fn choose_open_path(&mut self) -> Option<PathBuf> {
        if let Some(path) = self.pending_path.take() {
            return Some(path);
        }
        let answer = self.ask("open: ")?;
        let answer = answer.trim();
        (!answer.is_empty()).then(|| PathBuf::from(answer))
    }

    fn snapshot(&self, id: DocumentId) -> Option<String> {
        self.buffers.get(&id).map(|buffer| buffer.text.clone())
    }

    fn on_tab_event(&mut self, event: TabEvent) {
        match event {
            TabEvent::Opened { id, title, content } => {
                self.say(&format!("+ {title}"));
                self.buffers.insert(id, Buffer::loaded(content));
                self.tabs.push((id, title));
            }
            TabEvent::Retitled { id, title } => {
                self.say(&format!("~ {title}"));
                if let Some((_, label)) = self.tabs.iter_mut().find(|(tab, _)| *tab == id) {
                    *label = title;
                }
            }
            TabEvent::Closed { id } => {
                let title = self.title_of(id);
                self.say(&format!("- {title}"));
                self.buffers.remove(&id);
                self.tabs.retain(|(tab, _)| *tab != id);
            }
            TabEvent::Activated { id } => {
                self.active = Some(id);
            }
            TabEvent::Status(message) => self.say(&format!("! {message}")),
        }
    }
}

pub struct Shell<R, W> {
    workbench: Workbench<FsStore>,
    host: ShellHost<R, W>,
    keybindings: KeybindingsManager,
    tab_width: usize,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, keybindings: KeybindingsManager, tab_width: usize) -> Self {
        Self {
            workbench: Workbench::new(FsStore),
            host: ShellHost::new(input, output),
            keybindings,
            tab_width,
        }
    }

    pub fn workbench(&self) -> &Workbench<FsStore> {
        &self.workbench
    }

    pub fn host(&self) -> &ShellHost<R, W> {
        &self.host
    }

    pub fn into_output(self) -> W {
        self.host.output
    }

    /// Processes input until a quit is confirmed or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        self.workbench.start(&mut self.host);
        self.render_tabs();

        while !self.workbench.should_exit() {
            self.host.take_error()?;
            let Some(line) = self.host.read_line()? else {
                debug!("input closed");
                break;
            };
            self.handle_line(&line);
        }

        self.host.take_error()?;
        self.host.output.flush()
    }

    pub fn handle_line(&mut self, line: &str) {
        let Some(command) = parse_command(line) else {
            self.type_line(line);
            return;
        };
        debug!(?command, "shell command");

        match command {
            ShellCommand::New => self.dispatch(SessionAction::NewDocument),
            ShellCommand::Open(path) => {
                self.host.pending_path = path;
                self.dispatch(SessionAction::OpenDocument);
            }
            ShellCommand::Save(path) => {
                self.host.pending_path = path;
                self.dispatch(SessionAction::SaveDocument);
            }
            ShellCommand::Close => self.dispatch(SessionAction::CloseTab),
            ShellCommand::Quit => self.dispatch(SessionAction::Quit),
            ShellCommand::About => self.dispatch(SessionAction::About),
            ShellCommand::Key(chord) => match self.keybindings.resolve(&chord) {
                Some(action) => self.dispatch(action),
                None => self.host.say(&format!("! unbound key {chord}")),
            },
            ShellCommand::Tabs => self.render_tabs(),
            ShellCommand::Tab(position) => self.activate_position(position),
            ShellCommand::Show => {
                let content = self
                    .host
                    .active
                    .and_then(|id| self.host.buffer(id))
                    .unwrap_or_default()
                    .to_string();
                self.host.say(&content);
            }
            ShellCommand::Undo => self.undo_line(),
            ShellCommand::Text(text) => self.type_line(&text),
            ShellCommand::Help => self.host.say(HELP_TEXT),
            ShellCommand::Unknown(command) => {
                self.host.say(&format!("! unknown command {command}"));
            }
        }
    }

    fn dispatch(&mut self, action: SessionAction) {
        self.workbench.dispatch(&mut self.host, action);
        // A path given on the command line must not leak into a later prompt.
        self.host.pending_path = None;
    }

    fn type_line(&mut self, line: &str) {
        let Some((id, buffer)) = self.host.active_buffer_mut() else {
            return;
        };
        buffer.push_line(line);
        self.buffer_changed(id);
    }

    fn undo_line(&mut self) {
        let Some((id, buffer)) = self.host.active_buffer_mut() else {
            return;
        };
        buffer.pop_line();
        self.buffer_changed(id);
    }

    fn buffer_changed(&mut self, id: DocumentId) {
        if let Err(err) = self.workbench.buffer_changed(&mut self.host, id) {
            self.host.say(&format!("! {err}"));
        }
    }

    fn activate_position(&mut self, position: usize) {
        let Some(id) = self.workbench.session().ids().nth(position - 1) else {
            self.host.say(&format!("! no tab {position}"));
            return;
        };
        if let Err(err) = self.workbench.activate(&mut self.host, id) {
            self.host.say(&format!("! {err}"));
            return;
        }
        self.render_tabs();
    }

    fn render_tabs(&mut self) {
        let active = self.host.active;
        let labels: Vec<TabLabel<'_>> = self
            .host
            .tabs
            .iter()
            .map(|(id, title)| TabLabel {
                title,
                active: Some(*id) == active,
            })
            .collect();
        let strip = render_tab_strip(&labels, self.tab_width);
        self.host.say(&strip);
    }
}
