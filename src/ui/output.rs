//! Output functions for consistent CLI formatting

use super::context::UiContext;
use crate::barcode::ProducedBarcode;
use crate::service::ExportedLabel;
use console::{style, StyledObject};

/// Plain-mode status tags
fn tag(text: &'static str) -> StyledObject<&'static str> {
    match text {
        "[OK]" => style(text).green(),
        "[WARN]" => style(text).yellow(),
        "[FAIL]" => style(text).red(),
        _ => style(text).cyan(),
    }
}

/// Display intro banner
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).green().bold()).ok();
    } else {
        println!("{}", style(title).green().bold());
        println!();
    }
}

/// Display closing line
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(message).green()).ok();
    } else {
        println!();
        println!("{} {}", tag("[OK]"), message);
    }
}

pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(message).ok();
    } else {
        println!("  {} {}", tag("[OK]"), message);
    }
}

pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(format!("{} ({})", message, style(detail).dim())).ok();
    } else {
        println!("  {} {} ({})", tag("[OK]"), message, detail);
    }
}

pub fn step_warn(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(message).ok();
    } else {
        println!("  {} {}", tag("[WARN]"), message);
    }
}

pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(format!("{} - {}", message, style(hint).dim())).ok();
    } else {
        println!("  {} {} - {}", tag("[WARN]"), message, hint);
    }
}

pub fn step_error_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::error(format!("{}: {}", message, style(detail).red())).ok();
    } else {
        println!("  {} {}: {}", tag("[FAIL]"), message, detail);
    }
}

pub fn step_info(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::info(message).ok();
    } else {
        println!("  {} {}", tag("[INFO]"), message);
    }
}

/// Dimmed hint line
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Print styled key-value pair
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.use_fancy_output() {
        println!("  {}: {}", style(key).dim(), value);
    } else {
        println!("  {}: {}", key, value);
    }
}

/// Where a barcode image came from
pub fn barcode_summary(ctx: &UiContext, produced: &ProducedBarcode) {
    let origin = if produced.cache_hit { "cached" } else { "rendered" };
    key_value(ctx, "Payload", &produced.payload);
    key_value(
        ctx,
        "Barcode",
        &format!("{} ({})", produced.path.display(), origin),
    );
}

/// Everything written for a label request
pub fn label_summary(ctx: &UiContext, exported: &ExportedLabel) {
    let label = &exported.label;
    key_value(ctx, "SKU", &label.sku);
    key_value(ctx, "Description", &label.description);
    barcode_summary(
        ctx,
        &ProducedBarcode {
            path: label.image_path.clone(),
            payload: label.payload.clone(),
            cache_hit: exported.cache_hit,
        },
    );
    key_value(ctx, "Label", &exported.pdf_path.display().to_string());
    if let Some(ref page) = exported.print_page_path {
        key_value(ctx, "Print page", &page.display().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use std::path::PathBuf;

    #[test]
    fn output_non_interactive() {
        let ctx = UiContext::non_interactive();
        intro(&ctx, "Test");
        step_ok(&ctx, "Label generated");
        step_warn_hint(&ctx, "SKU not found", "Try another");
        step_error_detail(&ctx, "Rendering failed", "bad payload");
        outro_success(&ctx, "Done");
    }

    #[test]
    fn summaries_non_interactive() {
        let ctx = UiContext::non_interactive();
        let exported = ExportedLabel {
            label: Label {
                sku: "999.1234".to_string(),
                description: "Special bin".to_string(),
                image_path: PathBuf::from("/tmp/k.png"),
                payload: "99999.1234".to_string(),
            },
            pdf_path: PathBuf::from("/tmp/label.pdf"),
            print_page_path: Some(PathBuf::from("/tmp/label.html")),
            cache_hit: true,
        };
        label_summary(&ctx, &exported);
    }
}
