//! Configuration management commands.

use std::collections::BTreeSet;
use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_file {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    // Store section
    ctx.output.blank();
    ctx.output.info("[store]");
    ctx.output.kv("path", &ctx.store_path().display().to_string());
    ctx.output.kv("key", &ctx.config.store.key);

    // Pricing section
    let pricing = &ctx.config.pricing;
    ctx.output.blank();
    ctx.output.info("[pricing]");
    ctx.output.kv("member_rate", &pricing.member_rate.to_string());
    ctx.output.kv("tax_rate", &pricing.tax_rate.to_string());
    ctx.output.kv("flat_shipping", &pricing.flat_shipping.to_string());
    ctx.output.kv(
        "free_shipping_threshold",
        &pricing.free_shipping_threshold.to_string(),
    );
    for tier in &pricing.tiers {
        let max = tier
            .max
            .map(|m| m.to_string())
            .unwrap_or_else(|| "and up".to_string());
        ctx.output
            .list_item(&format!("{} - {}: {}", tier.min, max, tier.rate));
    }

    // Shop section
    ctx.output.blank();
    ctx.output.info("[shop]");
    ctx.output
        .kv("items", &ctx.config.shop.items.len().to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("museum.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

/// Problems found in a config, split by severity.
#[derive(Debug, Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn check_config(config: &CliConfig) -> Findings {
    let mut findings = Findings::default();

    if let Err(e) = config.pricing.validate() {
        findings.errors.push(format!("pricing: {}", e));
    }

    if config.store.key.trim().is_empty() {
        findings.errors.push("store.key must not be empty".to_string());
    }

    let mut seen = BTreeSet::new();
    for (i, item) in config.shop.items.iter().enumerate() {
        if item.id.as_str().trim().is_empty() {
            findings
                .errors
                .push(format!("shop.items[{}].id must not be empty", i));
        } else if !seen.insert(item.id.as_str()) {
            findings
                .errors
                .push(format!("shop.items[{}].id '{}' is a duplicate", i, item.id));
        }
        if let Err(e) = item.unit_price() {
            findings
                .errors
                .push(format!("shop.items[{}].price: {}", i, e));
        }
        if item.image.is_empty() {
            findings
                .warnings
                .push(format!("shop.items[{}] has no image", i));
        }
    }

    if config.shop.items.is_empty() {
        findings
            .warnings
            .push("shop.items is empty; `museum add` has nothing to add".to_string());
    }

    findings
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let Findings { errors, warnings } = check_config(&ctx.config);

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
