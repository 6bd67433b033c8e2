//! Terminal prompt for the member-vs-volume discount choice.

use console::Term;
use dialoguer::Select;
use museum_commerce::cart::{DiscountChoice, DiscountDecider, DiscountPrompt};

/// Asks on the terminal, or answers from a preset.
///
/// Without a preset and without a terminal to ask on, the prompt counts as
/// dismissed.
pub struct PromptDecider {
    preset: Option<DiscountChoice>,
    quiet: bool,
}

impl PromptDecider {
    pub fn new(preset: Option<DiscountChoice>, quiet: bool) -> Self {
        Self { preset, quiet }
    }

    fn ask(&self, prompt: &DiscountPrompt) -> Option<DiscountChoice> {
        let items = [
            format!("Member discount (save {})", prompt.member_savings()),
            format!("Volume discount (save {})", prompt.volume_savings()),
        ];
        let picked = Select::new()
            .with_prompt("Discounts cannot be combined. Which one?")
            .items(&items)
            .default(0)
            .interact_on_opt(&Term::stderr());

        match picked {
            Ok(Some(0)) => Some(DiscountChoice::Member),
            Ok(Some(_)) => Some(DiscountChoice::Volume),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "discount prompt failed");
                None
            }
        }
    }
}

impl DiscountDecider for PromptDecider {
    fn decide(&mut self, prompt: &DiscountPrompt) -> Option<String> {
        if let Some(choice) = self.preset {
            return Some(choice.as_str().to_string());
        }
        if self.quiet || !Term::stderr().is_term() {
            tracing::debug!("{}", prompt.message());
            tracing::info!("no terminal to ask on, discount prompt dismissed");
            return None;
        }
        self.ask(prompt).map(|choice| choice.as_str().to_string())
    }
}
