//! Label command - generate one label

use super::build_service;
use crate::cli::args::LabelArgs;
use crate::config::Config;
use crate::error::{LabelError, LabelResult};
use crate::ui::{self, TaskSpinner, UiContext};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Execute the label command
pub async fn execute(args: LabelArgs, config: &Config) -> LabelResult<()> {
    let ctx = UiContext::detect();
    let service = build_service(config).await?;
    let output_dir = config.label.output_dir();

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Generating label for {}...", args.sku.trim()));

    let exported = match service.export(
        &args.sku,
        &output_dir,
        args.output.as_deref(),
        args.print_page,
    ) {
        Ok(exported) => exported,
        Err(e) => {
            spinner.stop_error("Label not generated");
            return Err(e);
        }
    };
    spinner.stop("Label generated");
    ui::label_summary(&ctx, &exported);

    if args.open {
        let target = exported
            .print_page_path
            .as_deref()
            .unwrap_or(exported.pdf_path.as_path());
        open_with_viewer(target)?;
        ui::step_info(&ctx, &format!("Opened {}", target.display()));
    }

    Ok(())
}

/// Hand a file to the platform's default viewer
pub fn open_with_viewer(path: &Path) -> LabelResult<()> {
    let mut command = viewer_command(path);
    debug!("Opening with {:?}", command);

    let status = command
        .status()
        .map_err(|e| LabelError::command_failed(format!("{:?}", command.get_program()), e))?;
    if !status.success() {
        return Err(LabelError::User(format!(
            "Viewer exited with {} for {}",
            status,
            path.display()
        )));
    }
    Ok(())
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_gets_the_path() {
        let cmd = viewer_command(Path::new("/tmp/label.pdf"));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args.last().map(|a| a.to_os_string()), Some("/tmp/label.pdf".into()));
    }
}
