use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    New,
    Open(Option<PathBuf>),
    Save(Option<PathBuf>),
    Close,
    Quit,
    About,
    /// Run whatever action a key chord such as `ctrl+s` is bound to.
    Key(String),
    Tabs,
    Tab(usize),
    Show,
    Undo,
    Help,
    /// Literal text that starts with `/`, typed with a doubled leading slash.
    Text(String),
    Unknown(String),
}

pub const HELP_TEXT: &str = "Commands: /new, /open [path], /save [path], /close, /quit, /about, \
/key <chord>, /tabs, /tab <n>, /show, /undo, /help. Start a line with // to type a literal /.";

pub fn parse_command(input: &str) -> Option<ShellCommand> {
    if let Some(text) = input.strip_prefix('/').filter(|rest| rest.starts_with('/')) {
        return Some(ShellCommand::Text(text.to_string()));
    }

    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    let parsed = match command {
        "/new" => ShellCommand::New,
        "/open" => ShellCommand::Open(argument.map(PathBuf::from)),
        "/save" => ShellCommand::Save(argument.map(PathBuf::from)),
        "/close" => ShellCommand::Close,
        "/quit" | "/exit" => ShellCommand::Quit,
        "/about" => ShellCommand::About,
        "/key" => match argument {
            Some(chord) => ShellCommand::Key(chord),
            None => ShellCommand::Unknown(command.to_string()),
        },
        "/tabs" => ShellCommand::Tabs,
        "/tab" => match rest.parse::<usize>() {
            Ok(position) if position > 0 => ShellCommand::Tab(position),
            _ => ShellCommand::Unknown(trimmed.to_string()),
        },
        "/show" => ShellCommand::Show,
        "/undo" => ShellCommand::Undo,
        "/help" => ShellCommand::Help,
        _ => ShellCommand::Unknown(command.to_string()),
    };

    Some(parsed)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{parse_command, ShellCommand};

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("hello world"), None);
        assert_eq!(parse_command("  indented / slash"), None);
    }

    #[test]
    fn commands_with_optional_paths() {
        assert_eq!(parse_command("/open"), Some(ShellCommand::Open(None)));
        assert_eq!(
            parse_command("/save  /tmp/my notes.txt "),
            Some(ShellCommand::Save(Some(PathBuf::from("/tmp/my notes.txt"))))
        );
    }

    #[test]
    fn doubled_slash_escapes_literal_text() {
        assert_eq!(
            parse_command("//etc/hosts"),
            Some(ShellCommand::Text("/etc/hosts".to_string()))
        );
        assert_eq!(
            parse_command("///"),
            Some(ShellCommand::Text("//".to_string()))
        );
    }

    #[test]
    fn tab_requires_positive_index() {
        assert_eq!(parse_command("/tab 2"), Some(ShellCommand::Tab(2)));
        assert_eq!(
            parse_command("/tab 0"),
            Some(ShellCommand::Unknown("/tab 0".to_string()))
        );
        assert_eq!(
            parse_command("/tab"),
            Some(ShellCommand::Unknown("/tab".to_string()))
        );
    }

    #[test]
    fn key_and_unknown_commands() {
        assert_eq!(
            parse_command("/key ctrl+s"),
            Some(ShellCommand::Key("ctrl+s".to_string()))
        );
        assert_eq!(parse_command("/exit"), Some(ShellCommand::Quit));
        assert_eq!(
            parse_command("/nope extra"),
            Some(ShellCommand::Unknown("/nope".to_string()))
        );
    }
}
