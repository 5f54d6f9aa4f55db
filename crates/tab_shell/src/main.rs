use std::io;

use anyhow::Context;
use tab_shell::shell::Shell;
use tabbed_session::config::EnvConfig;
use tabbed_session::{logging, KeybindingsConfig, KeybindingsManager};

fn main() -> anyhow::Result<()> {
    let config = EnvConfig::from_env();
    logging::init(&config).context("failed to initialise logging")?;

    let keybindings = match &config.keymap_path {
        Some(path) => {
            let overrides = KeybindingsConfig::load(path)
                .with_context(|| format!("failed to load keymap {}", path.display()))?;
            KeybindingsManager::new(overrides)
        }
        None => KeybindingsManager::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), keybindings, config.tab_width);
    shell.run().context("shell I/O failed")?;
    Ok(())
}
