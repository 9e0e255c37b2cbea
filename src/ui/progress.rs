//! Spinner for slow steps, plain lines outside a terminal

use super::context::UiContext;
use console::style;

/// Spinner shown while a barcode renders or a label is written
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    fancy: bool,
}

impl TaskSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            fancy: ctx.use_fancy_output(),
        }
    }

    pub fn start(&mut self, message: &str) {
        if self.fancy {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    pub fn stop(&mut self, message: &str) {
        match self.spinner.take() {
            Some(spinner) => spinner.stop(message),
            None if self.fancy => println!("{} {}", style("✓").green(), message),
            None => println!("{} {}", style("[OK]").green(), message),
        }
    }

    pub fn stop_error(&mut self, message: &str) {
        match self.spinner.take() {
            Some(spinner) => spinner.error(message),
            None if self.fancy => println!("{} {}", style("✗").red(), message),
            None => println!("{} {}", style("[FAIL]").red(), message),
        }
    }

    /// Drop the spinner line without a message
    pub fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_non_interactive() {
        let ctx = UiContext::non_interactive();
        let mut spinner = TaskSpinner::new(&ctx);
        spinner.start("Rendering barcode...");
        spinner.stop("Barcode ready");
        spinner.start("Writing label...");
        spinner.stop_error("Label failed");
        spinner.clear();
    }
}
