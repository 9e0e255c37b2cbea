//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, MatchMode};
use crate::error::{LabelError, LabelResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

/// Keys accepted by `config set`
const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "table.path",
    "table.sheet",
    "table.sku_column",
    "table.description_column",
    "table.match_mode",
    "cache.dir",
    "barcode.module_width_px",
    "barcode.bar_height_px",
    "barcode.quiet_zone_modules",
    "barcode.human_readable",
    "barcode.font",
    "barcode.font_size_px",
    "label.width_in",
    "label.height_in",
    "label.margin_in",
    "label.barcode_width_in",
    "label.font_size_pt",
    "label.wrap_chars",
    "label.output_dir",
];

/// Execute the config command
///
/// `config` is the effective configuration (command-line overrides
/// included); `set` edits the file behind `manager` instead.
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> LabelResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> LabelResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> LabelResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok_detail(&ctx, "Configuration initialized", &path.display().to_string());
    Ok(())
}

async fn set_value(manager: &ConfigManager, key: &str, value: &str) -> LabelResult<()> {
    let ctx = UiContext::detect();
    let mut config = manager.load().await?;

    if let Err(e) = apply(&mut config, key, value) {
        if matches!(e, LabelError::User(ref m) if m.starts_with("Unknown config key")) {
            ui::remark(&ctx, "Valid keys:");
            for key in VALID_KEYS {
                eprintln!("  {}", key);
            }
        }
        return Err(e);
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));
    Ok(())
}

/// Set one dotted key on `config`
fn apply(config: &mut Config, key: &str, value: &str) -> LabelResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => config.general.log_format = parse_log_format(value)?,

        ["table", "path"] => config.table.path = PathBuf::from(value),
        ["table", "sheet"] => config.table.sheet = optional(value),
        ["table", "sku_column"] => config.table.sku_column = value.to_string(),
        ["table", "description_column"] => config.table.description_column = value.to_string(),
        ["table", "match_mode"] => config.table.match_mode = parse_match_mode(value)?,

        ["cache", "dir"] => config.cache.dir = PathBuf::from(value),

        ["barcode", "module_width_px"] => config.barcode.module_width_px = parse_positive(value)?,
        ["barcode", "bar_height_px"] => config.barcode.bar_height_px = parse_positive(value)?,
        ["barcode", "quiet_zone_modules"] => config.barcode.quiet_zone_modules = parse_u32(value)?,
        ["barcode", "human_readable"] => config.barcode.human_readable = parse_bool(value)?,
        ["barcode", "font"] => config.barcode.font = optional(value).map(PathBuf::from),
        ["barcode", "font_size_px"] => config.barcode.font_size_px = parse_f32(value)?,

        ["label", "width_in"] => config.label.width_in = parse_f32(value)?,
        ["label", "height_in"] => config.label.height_in = parse_f32(value)?,
        ["label", "margin_in"] => config.label.margin_in = parse_f32(value)?,
        ["label", "barcode_width_in"] => config.label.barcode_width_in = parse_f32(value)?,
        ["label", "font_size_pt"] => config.label.font_size_pt = parse_f32(value)?,
        ["label", "wrap_chars"] => config.label.wrap_chars = parse_positive(value)? as usize,
        ["label", "output_dir"] => config.label.output_dir = optional(value).map(PathBuf::from),

        _ => return Err(LabelError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}

/// Empty string clears an optional setting
fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_bool(value: &str) -> LabelResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(LabelError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u32(value: &str) -> LabelResult<u32> {
    value
        .parse()
        .map_err(|_| LabelError::User(format!("Invalid number: {}", value)))
}

fn parse_positive(value: &str) -> LabelResult<u32> {
    match parse_u32(value)? {
        0 => Err(LabelError::User(format!("{} must be greater than 0", value))),
        n => Ok(n),
    }
}

fn parse_f32(value: &str) -> LabelResult<f32> {
    value
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| LabelError::User(format!("Invalid number: {}", value)))
}

fn parse_match_mode(value: &str) -> LabelResult<MatchMode> {
    match value.to_lowercase().as_str() {
        "exact" => Ok(MatchMode::Exact),
        "normalized" => Ok(MatchMode::Normalized),
        _ => Err(LabelError::User(format!(
            "Invalid match mode: {}. Use exact/normalized",
            value
        ))),
    }
}

fn parse_log_format(value: &str) -> LabelResult<String> {
    match value {
        "text" | "json" => Ok(value.to_string()),
        _ => Err(LabelError::User(format!(
            "Invalid log format: {}. Use text/json",
            value
        ))),
    }
}
