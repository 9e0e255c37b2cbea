//! Interactive loop - one label per entered SKU

use super::{build_service, ConfiguredService};
use crate::config::Config;
use crate::error::{LabelError, LabelResult};
use crate::ui::{self, UiContext};
use std::path::Path;
use tracing::{debug, warn};

const EXIT_WORD: &str = "exit";

/// What to do with one line of operator input
#[derive(Debug, PartialEq, Eq)]
enum Entry<'a> {
    Exit,
    Blank,
    Sku(&'a str),
}

fn classify(line: &str) -> Entry<'_> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case(EXIT_WORD) {
        Entry::Exit
    } else if trimmed.is_empty() {
        Entry::Blank
    } else {
        Entry::Sku(trimmed)
    }
}

/// Execute the interactive loop
///
/// Request errors are reported and the loop carries on; fatal errors end it.
pub async fn execute(config: &Config) -> LabelResult<()> {
    let ctx = UiContext::detect();
    let service = build_service(config).await?;
    let output_dir = config.label.output_dir();

    ui::intro(&ctx, "SKU Barcode Generator");
    ui::remark(&ctx, &format!("Type a SKU, or '{}' to quit", EXIT_WORD));

    let mut generated = 0usize;
    loop {
        let Some(line) = ui::input_line(&ctx, "Enter SKU").await? else {
            debug!("Input closed");
            break;
        };

        let sku = match classify(&line) {
            Entry::Exit => break,
            Entry::Blank => {
                ui::step_warn(&ctx, &LabelError::InvalidSku.to_string());
                continue;
            }
            Entry::Sku(sku) => sku,
        };

        match handle(&ctx, &service, sku, &output_dir) {
            Ok(()) => generated += 1,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => report(&ctx, sku, &e),
        }
    }

    ui::outro_success(&ctx, &format!("Generated {} label(s)", generated));
    Ok(())
}

fn handle(
    ctx: &UiContext,
    service: &ConfiguredService,
    sku: &str,
    output_dir: &Path,
) -> LabelResult<()> {
    let exported = service.export(sku, output_dir, None, false)?;
    ui::step_ok_detail(
        ctx,
        &format!("Label for {}", exported.label.sku),
        &exported.pdf_path.display().to_string(),
    );
    ui::key_value(ctx, "Description", &exported.label.description);
    Ok(())
}

fn report(ctx: &UiContext, sku: &str, err: &LabelError) {
    match err {
        LabelError::LookupMiss(_) => {
            ui::step_warn_hint(ctx, &format!("SKU not found: {}", sku), "Try another SKU");
        }
        _ => {
            warn!("Label for {} failed: {}", sku, err);
            ui::step_error_detail(ctx, &format!("Label for {} failed", sku), &err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_word_any_case() {
        assert_eq!(classify("exit"), Entry::Exit);
        assert_eq!(classify("  EXIT \n"), Entry::Exit);
    }

    #[test]
    fn blank_and_sku() {
        assert_eq!(classify("   "), Entry::Blank);
        assert_eq!(classify(" 999.1234 "), Entry::Sku("999.1234"));
        assert_eq!(classify("exit2"), Entry::Sku("exit2"));
    }
}
