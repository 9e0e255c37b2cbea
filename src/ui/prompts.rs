//! Operator prompts with a plain stdin fallback

use super::context::UiContext;
use crate::error::{LabelError, LabelResult};
use std::io::{self, BufRead, ErrorKind, Write};

/// Yes/no question; `default` when nobody is there to answer
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> LabelResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message).initial_value(default).interact()
    })
    .await
    .map_err(|e| LabelError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| LabelError::User(format!("Prompt failed: {}", e)))
}

/// Read one line from the operator
///
/// `None` means the input ended (Ctrl-C, Ctrl-D or closed stdin).
pub async fn input_line(ctx: &UiContext, message: &str) -> LabelResult<Option<String>> {
    let message = message.to_string();
    let interactive = ctx.is_interactive();

    let result = tokio::task::spawn_blocking(move || {
        if interactive {
            prompt_line(&message)
        } else {
            read_plain_line(&mut io::stdin().lock(), &message)
        }
    })
    .await
    .map_err(|e| LabelError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| LabelError::User(format!("Prompt failed: {}", e)))
}

fn prompt_line(message: &str) -> io::Result<Option<String>> {
    let answer: Result<String, io::Error> = cliclack::input(message)
        .placeholder("SKU")
        .required(false)
        .interact();
    match answer {
        Ok(line) => Ok(Some(line)),
        Err(e) if e.kind() == ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e),
    }
}

fn read_plain_line(reader: &mut impl BufRead, message: &str) -> io::Result<Option<String>> {
    print!("{}: ", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn confirm_auto_yes() {
        let ctx = UiContext::non_interactive().with_auto_yes(true);
        assert!(confirm(&ctx, "Clear cache?", false).await.unwrap());
    }

    #[tokio::test]
    async fn confirm_non_interactive_default() {
        let ctx = UiContext::non_interactive();
        assert!(confirm(&ctx, "Clear cache?", true).await.unwrap());
        assert!(!confirm(&ctx, "Clear cache?", false).await.unwrap());
    }

    #[test]
    fn plain_line_strips_newline() {
        let mut input = Cursor::new("ABC123\r\nXYZ\n");
        assert_eq!(
            read_plain_line(&mut input, "SKU").unwrap(),
            Some("ABC123".to_string())
        );
        assert_eq!(
            read_plain_line(&mut input, "SKU").unwrap(),
            Some("XYZ".to_string())
        );
        assert_eq!(read_plain_line(&mut input, "SKU").unwrap(), None);
    }

    #[test]
    fn plain_line_keeps_blank_answer() {
        let mut input = Cursor::new("\n");
        assert_eq!(
            read_plain_line(&mut input, "SKU").unwrap(),
            Some(String::new())
        );
    }
}
