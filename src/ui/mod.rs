//! Terminal output for the label tool
//!
//! Uses `cliclack` for spinners and prompts when attached to a terminal
//! and falls back to plain tagged lines when piped or running in CI.
//!
//! # Example
//!
//! ```rust,ignore
//! use skulabel::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//! ui::intro(&ctx, "SKU Barcode Generator");
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Rendering barcode...");
//! spinner.stop("Barcode ready");
//!
//! ui::step_warn_hint(&ctx, "SKU not found", "Check the reference table");
//! ```

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{
    barcode_summary, intro, key_value, label_summary, outro_success, remark, step_error_detail,
    step_info, step_ok, step_ok_detail, step_warn, step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::{confirm, input_line};
