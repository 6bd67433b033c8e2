//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use museum_cache::FileStore;
use museum_commerce::prelude::*;

use crate::commands::ChoiceArg;
use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;
use crate::prompt::PromptDecider;

/// The storefront as the CLI wires it.
pub type CliStorefront = Storefront<FileStore, Document, PromptDecider>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the config was loaded from, if anywhere.
    pub config_file: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Initial member checkbox state.
    pub member: bool,
    /// Preset answer to the discount prompt.
    pub choice: Option<ChoiceArg>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        output: Output,
        member: bool,
        choice: Option<ChoiceArg>,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_file) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(ref path) = config_file {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_file,
            output,
            cwd,
            member,
            choice,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => {
                            let error = format!("{:#}", e);
                            tracing::warn!(
                                path = %config_path.display(),
                                error = %error,
                                "skipping unreadable config"
                            );
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative store paths are resolved against: the config
    /// file's directory, or the working directory without one.
    pub fn base_dir(&self) -> PathBuf {
        self.config_file
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Path of the storage file.
    pub fn store_path(&self) -> PathBuf {
        let path = &self.config.store.path;
        if path.is_absolute() {
            path.clone()
        } else {
            self.base_dir().join(path)
        }
    }

    /// The cart slot.
    pub fn cart_store(&self) -> CartStore<FileStore> {
        CartStore::with_key(FileStore::open(self.store_path()), self.config.store.key.clone())
    }

    /// Pricing rules from the config, checked before any cart is priced.
    pub fn pricing_rules(&self) -> Result<PricingRules> {
        let rules = self.config.pricing.clone();
        rules.validate().with_context(|| match self.config_file {
            Some(ref path) => format!("Invalid [pricing] in {}", path.display()),
            None => "Invalid default pricing".to_string(),
        })?;
        Ok(rules)
    }

    /// A storefront over the cart slot, drawing into `page`.
    ///
    /// The member checkbox starts in the state given on the command line.
    /// Fails if the configured pricing rules are invalid.
    pub fn storefront(&self, mut page: Document) -> Result<CliStorefront> {
        let renderer = RenderController::new(self.pricing_rules()?);
        page.set_checked(Element::MemberToggle, self.member);
        Ok(Storefront::new(
            self.cart_store(),
            page,
            PromptDecider::new(self.choice.map(ChoiceArg::into_choice), self.output.is_json()),
            renderer,
        ))
    }
}
