//! Single-page PDF writer for labels
//!
//! Writes PDF 1.4 by hand: one page, the barcode as a FlateDecode grayscale
//! image XObject, and the description in the standard Helvetica font (no
//! embedding needed).

use super::layout::LabelLayout;
use crate::error::{LabelError, LabelResult};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::GrayImage;
use std::io::Write;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const PAGE_ID: usize = 3;
const CONTENTS_ID: usize = 4;
const FONT_ID: usize = 5;
const IMAGE_ID: usize = 6;
const INFO_ID: usize = 7;

/// Render `layout` with `image` as the barcode into PDF bytes
pub fn write_label_pdf(layout: &LabelLayout, image: &GrayImage, title: &str) -> LabelResult<Vec<u8>> {
    let content = content_stream(layout);
    let content = deflate(content.as_bytes())?;
    let pixels = deflate(image.as_raw())?;

    let objects: Vec<Vec<u8>> = vec![
        format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).into_bytes(),
        format!("<< /Type /Pages /Kids [{} 0 R] /Count 1 >>", PAGE_ID).into_bytes(),
        format!(
            "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 {} 0 R >> /XObject << /Im1 {} 0 R >> >> \
             /Contents {} 0 R >>",
            PAGES_ID,
            num(layout.page_width),
            num(layout.page_height),
            FONT_ID,
            IMAGE_ID,
            CONTENTS_ID
        )
        .into_bytes(),
        stream_object(
            &format!("/Length {} /Filter /FlateDecode", content.len()),
            &content,
        ),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        stream_object(
            &format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace /DeviceGray /BitsPerComponent 8 /Filter /FlateDecode /Length {}",
                image.width(),
                image.height(),
                pixels.len()
            ),
            &pixels,
        ),
        format!(
            "<< /Title ({}) /Producer (skulabel) >>",
            pdf_string(title)
        )
        .into_bytes(),
    ];

    Ok(build_pdf(objects))
}

/// Page drawing operators
fn content_stream(layout: &LabelLayout) -> String {
    let img = &layout.image;
    let mut ops = format!(
        "q\n{} 0 0 {} {} {} cm\n/Im1 Do\nQ\n",
        num(img.width),
        num(img.height),
        num(img.x),
        num(img.y)
    );
    for line in &layout.lines {
        ops.push_str(&format!(
            "BT\n/F1 {} Tf\n{} {} Td\n({}) Tj\nET\n",
            num(layout.font_size),
            num(line.x),
            num(line.baseline),
            pdf_string(&line.text)
        ));
    }
    ops
}

fn stream_object(dict_entries: &str, data: &[u8]) -> Vec<u8> {
    let mut obj = format!("<< {} >>\nstream\n", dict_entries).into_bytes();
    obj.extend_from_slice(data);
    obj.extend_from_slice(b"\nendstream");
    obj
}

fn build_pdf(objects: Vec<Vec<u8>>) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");
    out.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (index, obj) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        out.extend_from_slice(obj);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }

    let trailer = format!(
        "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF",
        objects.len() + 1,
        CATALOG_ID,
        INFO_ID,
        xref_start
    );
    out.extend_from_slice(trailer.as_bytes());
    out
}

fn deflate(data: &[u8]) -> LabelResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| LabelError::io("compressing PDF stream", e))?;
    encoder
        .finish()
        .map_err(|e| LabelError::io("compressing PDF stream", e))
}

/// Literal string body in WinAnsi; characters outside Latin-1 become `?`
fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}

/// Compact decimal for PDF operands
fn num(value: f32) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelConfig;
    use image::Luma;

    fn sample_pdf() -> Vec<u8> {
        let image = GrayImage::from_pixel(40, 10, Luma([0]));
        let layout = LabelLayout::compute(&LabelConfig::default(), (40, 10), "Widget A");
        write_label_pdf(&layout, &image, "ABC123").unwrap()
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn pdf_envelope() {
        let pdf = sample_pdf();
        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF"));
        assert!(find(&pdf, b"/MediaBox [0 0 216 72]").is_some());
        assert!(find(&pdf, b"/BaseFont /Helvetica").is_some());
        assert!(find(&pdf, b"/Width 40 /Height 10").is_some());
        assert!(find(&pdf, b"/Title (ABC123)").is_some());
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let pdf = sample_pdf();
        let tail = String::from_utf8_lossy(&pdf[pdf.len() - 40..]).to_string();
        let start: usize = tail
            .split("startxref\n")
            .nth(1)
            .and_then(|s| s.lines().next())
            .unwrap()
            .parse()
            .unwrap();
        assert!(pdf[start..].starts_with(b"xref\n0 8\n"));

        let table = String::from_utf8_lossy(&pdf[start..]).to_string();
        for (id, line) in table.lines().skip(3).take(7).enumerate() {
            let offset: usize = line[..10].parse().unwrap();
            let header = format!("{} 0 obj", id + 1);
            assert!(pdf[offset..].starts_with(header.as_bytes()), "object {}", id + 1);
        }
    }

    #[test]
    fn content_stream_draws_image_and_text() {
        let layout = LabelLayout::compute(&LabelConfig::default(), (40, 10), "Widget (A)");
        let ops = content_stream(&layout);
        assert!(ops.contains("/Im1 Do"));
        assert!(ops.contains("/F1 11 Tf"));
        assert!(ops.contains("(Widget \\(A\\)) Tj"));
    }

    #[test]
    fn string_escaping() {
        assert_eq!(pdf_string("a\\b"), "a\\\\b");
        assert_eq!(pdf_string("café"), "caf\\351");
        assert_eq!(pdf_string("→x"), "?x");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(num(216.0), "216");
        assert_eq!(num(131.76), "131.76");
        assert_eq!(num(3.5), "3.5");
        assert_eq!(num(-0.001), "0");
    }
}
