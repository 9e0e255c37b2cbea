//! Browser print page
//!
//! A self-contained HTML file sized to the label that opens the print
//! dialog as soon as it loads. The barcode is inlined as a base64 data URI.

use super::layout::wrap_words;
use crate::config::LabelConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Build the print page for one label
pub fn render_print_page(config: &LabelConfig, sku: &str, description: &str, png: &[u8]) -> String {
    let lines: Vec<String> = wrap_words(description, config.wrap_chars)
        .iter()
        .map(|l| escape_html(l))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
@page {{ size: {w}in {h}in; margin: 0; }}
html, body {{ margin: 0; padding: 0; }}
.label {{ width: {w}in; height: {h}in; padding: {m}in; box-sizing: border-box; text-align: center; overflow: hidden; font-family: Arial, Helvetica, sans-serif; font-size: {font}pt; line-height: 1.15; }}
.label img {{ width: {bw}in; display: block; margin: 0 auto; }}
</style>
</head>
<body>
<div class="label">
<img src="data:image/png;base64,{data}" alt="{title}">
<div>{text}</div>
</div>
<script>window.addEventListener("load", function () {{ window.print(); }});</script>
</body>
</html>
"#,
        title = escape_html(sku),
        w = config.width_in,
        h = config.height_in,
        m = config.margin_in,
        bw = config.barcode_width_in,
        font = config.font_size_pt.clamp(8.0, 11.0),
        data = STANDARD.encode(png),
        text = lines.join("<br>"),
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
