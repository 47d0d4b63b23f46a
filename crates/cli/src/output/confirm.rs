use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::IsTerminal;

/// Defaults to no. Without a terminal on stdin the answer is no, so scripts
/// must pass `--yes`.
pub fn confirm_action(msg: &str) -> bool {
    if !std::io::stdin().is_terminal() {
        return false;
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(msg)
        .default(false)
        .interact()
        .unwrap_or(false)
}
