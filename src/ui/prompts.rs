use anyhow::Result;
use dialoguer::Select;
use is_terminal::IsTerminal;
use log::warn;

/// Asks the operator whether to go ahead with a change
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Asks on the terminal; declines when stdin is not a terminal
pub struct InteractiveConfirm;

impl Confirmation for InteractiveConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        if !std::io::stdin().is_terminal() {
            warn!("stdin is not a terminal, declining: {}", prompt);
            return Ok(false);
        }
        prompt_confirmation(prompt, false)
    }
}

/// Answers every prompt the same way without asking
pub struct AutoConfirm(pub bool);

impl AutoConfirm {
    pub fn yes() -> Self {
        Self(true)
    }

    pub fn no() -> Self {
        Self(false)
    }
}

impl Confirmation for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(self.0)
    }
}

/// Interactive confirmation prompt using arrow-key navigable selection
///
/// # Arguments
/// * `prompt` - The question to ask the user
/// * `default_yes` - Whether "Yes" should be the default selection (index 0)
///
/// # Returns
/// * `Ok(true)` if user selects "Yes"
/// * `Ok(false)` if user selects "No"
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_confirm() {
        assert!(AutoConfirm::yes().confirm("Commit?").unwrap());
        assert!(!AutoConfirm::no().confirm("Commit?").unwrap());
    }
}
