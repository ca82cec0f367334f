//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use tienda_commerce::search::{MatchField, MatchFields};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
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
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let c = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("data_file", &c.catalog.data_file);
    ctx.output.kv("page_size", &c.catalog.page_size.to_string());
    ctx.output.kv("admin_page_size", &c.catalog.admin_page_size.to_string());
    ctx.output.kv("featured_limit", &c.catalog.featured_limit.to_string());

    ctx.output.info("");
    ctx.output.info("[search]");
    ctx.output.kv("match_fields", &fields_list(&c.search.match_fields));
    ctx.output
        .kv("admin_match_fields", &fields_list(&c.search.admin_match_fields));
    ctx.output.kv(
        "suggestion_min_chars",
        &c.search.suggestion_min_chars.to_string(),
    );
    ctx.output
        .kv("suggestion_limit", &c.search.suggestion_limit.to_string());

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("cart_dir", &c.storage.cart_dir);
    ctx.output.kv("cart_key", &c.storage.cart_key);

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &c.logging.level);

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        bail!("No config file found. Run `tienda config init` to create one.");
    };
    let path = path.to_string_lossy();

    let mut config = CliConfig::load(&path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = config_errors(&ctx.config);
    let mut warnings: Vec<String> = Vec::new();

    if !ctx.data_file().exists() {
        warnings.push(format!(
            "catalog.data_file {} does not exist yet",
            ctx.data_file().display()
        ));
    }
    if ctx.config.logging.level.parse::<tracing_subscriber::EnvFilter>().is_err() {
        warnings.push(format!(
            "logging.level '{}' is not a valid filter",
            ctx.config.logging.level
        ));
    }

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

fn config_errors(config: &CliConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.catalog.data_file.trim().is_empty() {
        errors.push("catalog.data_file is required".to_string());
    }
    if config.catalog.page_size == 0 {
        errors.push("catalog.page_size must be at least 1".to_string());
    }
    if config.catalog.admin_page_size == 0 {
        errors.push("catalog.admin_page_size must be at least 1".to_string());
    }
    if config.search.match_fields.is_empty() {
        errors.push("search.match_fields must name at least one field".to_string());
    }
    if config.search.admin_match_fields.is_empty() {
        errors.push("search.admin_match_fields must name at least one field".to_string());
    }
    if config.search.suggestion_limit == 0 {
        errors.push("search.suggestion_limit must be at least 1".to_string());
    }
    if config.storage.cart_key.trim().is_empty() {
        errors.push("storage.cart_key is required".to_string());
    } else if !tienda_cache::is_valid_key(&config.storage.cart_key) {
        errors.push(format!(
            "storage.cart_key '{}' may only use letters, digits, '-', '_' and '.', and must not start with '.'",
            config.storage.cart_key
        ));
    }

    errors
}

fn fields_list(fields: &MatchFields) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_fields(value: &str) -> Result<MatchFields> {
    let mut fields = Vec::new();
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match MatchField::from_str(part) {
            Some(field) => fields.push(field),
            None => bail!("Unknown match field: {} (expected name, category or subcategory)", part),
        }
    }
    Ok(MatchFields::new(fields))
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "data_file"] => Ok(config.catalog.data_file.clone()),
        ["catalog", "page_size"] => Ok(config.catalog.page_size.to_string()),
        ["catalog", "admin_page_size"] => Ok(config.catalog.admin_page_size.to_string()),
        ["catalog", "featured_limit"] => Ok(config.catalog.featured_limit.to_string()),
        ["search", "match_fields"] => Ok(fields_list(&config.search.match_fields)),
        ["search", "admin_match_fields"] => Ok(fields_list(&config.search.admin_match_fields)),
        ["search", "suggestion_min_chars"] => Ok(config.search.suggestion_min_chars.to_string()),
        ["search", "suggestion_limit"] => Ok(config.search.suggestion_limit.to_string()),
        ["storage", "cart_dir"] => Ok(config.storage.cart_dir.clone()),
        ["storage", "cart_key"] => Ok(config.storage.cart_key.clone()),
        ["logging", "level"] => Ok(config.logging.level.clone()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "data_file"] => config.catalog.data_file = value.to_string(),
        ["catalog", "page_size"] => config.catalog.page_size = value.parse()?,
        ["catalog", "admin_page_size"] => config.catalog.admin_page_size = value.parse()?,
        ["catalog", "featured_limit"] => config.catalog.featured_limit = value.parse()?,
        ["search", "match_fields"] => config.search.match_fields = parse_fields(value)?,
        ["search", "admin_match_fields"] => config.search.admin_match_fields = parse_fields(value)?,
        ["search", "suggestion_min_chars"] => config.search.suggestion_min_chars = value.parse()?,
        ["search", "suggestion_limit"] => config.search.suggestion_limit = value.parse()?,
        ["storage", "cart_dir"] => config.storage.cart_dir = value.to_string(),
        ["storage", "cart_key"] => config.storage.cart_key = value.to_string(),
        ["logging", "level"] => config.logging.level = value.to_string(),
        _ => bail!("Unknown config key: {}", key),
    }

    let errors = config_errors(config);
    if let Some(first) = errors.first() {
        bail!("Invalid value for {}: {}", key, first);
    }

    Ok(())
}
