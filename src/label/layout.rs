//! Label geometry
//!
//! All units are PDF points (1/72 in) with the origin at the bottom-left
//! corner of the page.

use crate::config::LabelConfig;

const POINTS_PER_INCH: f32 = 72.0;
const MIN_FONT_PT: f32 = 8.0;
const MAX_FONT_PT: f32 = 11.0;
const LEADING: f32 = 1.15;
/// Share of the printable height the description may take
const MAX_TEXT_SHARE: f32 = 0.5;

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];
const DEFAULT_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
}

/// Placement of the barcode and description on one label page
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub image: Rect,
    pub font_size: f32,
    pub lines: Vec<TextLine>,
}

impl LabelLayout {
    /// Lay out a barcode image of `image_px` pixels above `description`
    ///
    /// The barcode keeps its aspect ratio and shrinks when the text needs
    /// the room. Description lines that do not fit are dropped.
    pub fn compute(config: &LabelConfig, image_px: (u32, u32), description: &str) -> Self {
        let page_width = config.width_in * POINTS_PER_INCH;
        let page_height = config.height_in * POINTS_PER_INCH;
        let margin = config.margin_in * POINTS_PER_INCH;
        let font_size = config.font_size_pt.clamp(MIN_FONT_PT, MAX_FONT_PT);
        let leading = font_size * LEADING;

        let printable_width = (page_width - 2.0 * margin).max(1.0);
        let printable_height = (page_height - 2.0 * margin).max(1.0);

        let max_lines = ((printable_height * MAX_TEXT_SHARE) / leading).floor().max(1.0) as usize;
        let mut wrapped = wrap_words(description, config.wrap_chars);
        wrapped.truncate(max_lines);
        let text_height = wrapped.len() as f32 * leading;

        let (px_w, px_h) = (image_px.0.max(1) as f32, image_px.1.max(1) as f32);
        let mut width = (config.barcode_width_in * POINTS_PER_INCH).min(printable_width);
        let mut height = width * px_h / px_w;
        let max_height = (printable_height - text_height).max(1.0);
        if height > max_height {
            height = max_height;
            width = height * px_w / px_h;
        }

        let image = Rect {
            x: (page_width - width) / 2.0,
            y: page_height - margin - height,
            width,
            height,
        };

        let lines = wrapped
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let x = ((page_width - text_width(&text, font_size)) / 2.0).max(margin);
                let baseline = image.y - i as f32 * leading - font_size * 0.9;
                TextLine { text, x, baseline }
            })
            .collect();

        Self {
            page_width,
            page_height,
            image,
            font_size,
            lines,
        }
    }
}

/// Word-wrap `text` to lines of at most `width` characters
///
/// Words longer than a line are split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();

        if chars.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chunks = chars.chunks(width).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
            continue;
        }

        if current.is_empty() {
            current = word.to_string();
            current_len = chars.len();
        } else if current_len + 1 + chars.len() <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + chars.len();
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = chars.len();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Rendered width of `text` in Helvetica at `size` points
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let width = match c as u32 {
                code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize],
                _ => DEFAULT_WIDTH,
            };
            u32::from(width)
        })
        .sum();
    units as f32 * size / 1000.0
}
