//! Raster rendering of Code 128 symbols to PNG

use super::code128;
use crate::config::BarcodeConfig;
use crate::error::{LabelError, LabelResult};
use ab_glyph::{FontVec, PxScale};
use image::{GrayImage, ImageFormat, Luma};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;
use tracing::debug;

const WHITE: Luma<u8> = Luma([255]);
const BLACK: Luma<u8> = Luma([0]);

/// Renders a payload to an image file
///
/// `caption` is the human-readable line printed under the bars. `None`
/// suppresses it.
pub trait BarcodeRenderer {
    fn render(&self, payload: &str, caption: Option<&str>, dest: &Path) -> LabelResult<()>;
}

/// Fixed render scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub module_width_px: u32,
    pub bar_height_px: u32,
    pub quiet_zone_modules: u32,
    pub font_size_px: f32,
}

impl From<&BarcodeConfig> for RenderOptions {
    fn from(config: &BarcodeConfig) -> Self {
        Self {
            module_width_px: config.module_width_px.max(1),
            bar_height_px: config.bar_height_px.max(1),
            quiet_zone_modules: config.quiet_zone_modules,
            font_size_px: config.font_size_px,
        }
    }
}

/// Code 128 renderer producing grayscale PNG files
pub struct Code128Renderer {
    options: RenderOptions,
    font: Option<FontVec>,
}

impl Code128Renderer {
    /// Renderer without a caption font
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            font: None,
        }
    }

    /// Use `font` for captions
    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(font);
        self
    }

    /// Build from config, loading the caption font when one is configured
    pub fn from_config(config: &BarcodeConfig) -> LabelResult<Self> {
        let renderer = Self::new(RenderOptions::from(config));

        let Some(path) = config.font.as_ref().filter(|_| config.human_readable) else {
            return Ok(renderer);
        };

        if !path.is_file() {
            return Err(LabelError::ResourceMissing {
                what: "font",
                path: path.clone(),
            });
        }

        let bytes = std::fs::read(path)
            .map_err(|e| LabelError::io(format!("reading font {}", path.display()), e))?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| LabelError::FontInvalid {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        debug!("Loaded caption font {}", path.display());
        Ok(renderer.with_font(font))
    }

    /// Whether captions will actually be drawn
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Draw the symbol (and caption, if a font is loaded) into an image
    pub fn draw(&self, payload: &str, caption: Option<&str>) -> LabelResult<GrayImage> {
        let symbol =
            code128::encode(payload).map_err(|e| LabelError::rendering(payload, e.to_string()))?;
        let modules = symbol.modules();
        let opts = &self.options;

        let width = (modules.len() as u32 + 2 * opts.quiet_zone_modules) * opts.module_width_px;
        let caption = caption.zip(self.font.as_ref());
        let band = match caption {
            Some(_) => (opts.font_size_px * 1.4).ceil() as u32,
            None => 0,
        };

        let mut img = GrayImage::from_pixel(width, opts.bar_height_px + band, WHITE);

        for (i, _) in modules.iter().enumerate().filter(|(_, bar)| **bar) {
            let x0 = (opts.quiet_zone_modules + i as u32) * opts.module_width_px;
            for x in x0..x0 + opts.module_width_px {
                for y in 0..opts.bar_height_px {
                    img.put_pixel(x, y, BLACK);
                }
            }
        }

        if let Some((text, font)) = caption {
            let scale = PxScale::from(opts.font_size_px);
            let (text_w, _) = text_size(scale, font, text);
            let x = width.saturating_sub(text_w) / 2;
            let y = opts.bar_height_px + (opts.font_size_px * 0.2) as u32;
            draw_text_mut(&mut img, BLACK, x as i32, y as i32, scale, font, text);
        }

        Ok(img)
    }
}

impl BarcodeRenderer for Code128Renderer {
    fn render(&self, payload: &str, caption: Option<&str>, dest: &Path) -> LabelResult<()> {
        if caption.is_some() && self.font.is_none() {
            debug!("No caption font loaded, caption suppressed");
        }

        let img = self.draw(payload, caption)?;
        img.save_with_format(dest, ImageFormat::Png).map_err(|e| {
            LabelError::rendering(payload, format!("writing {}: {}", dest.display(), e))
        })?;

        debug!(
            "Rendered {} ({}x{}) to {}",
            payload,
            img.width(),
            img.height(),
            dest.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options() -> RenderOptions {
        RenderOptions {
            module_width_px: 2,
            bar_height_px: 20,
            quiet_zone_modules: 10,
            font_size_px: 12.0,
        }
    }

    #[test]
    fn draw_dimensions() {
        let renderer = Code128Renderer::new(options());
        let img = renderer.draw("ABC123", Some("ABC123")).unwrap();

        // 101 modules + 2 * 10 quiet, 2px each; no font so no caption band
        assert_eq!(img.width(), (101 + 20) * 2);
        assert_eq!(img.height(), 20);
    }

    #[test]
    fn quiet_zone_is_white_and_first_bar_black() {
        let renderer = Code128Renderer::new(options());
        let img = renderer.draw("XYZ", None).unwrap();

        assert_eq!(img.get_pixel(0, 0), &WHITE);
        assert_eq!(img.get_pixel(19, 10), &WHITE);
        assert_eq!(img.get_pixel(20, 10), &BLACK);
    }

    #[test]
    fn render_writes_png() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out.png");
        let renderer = Code128Renderer::new(options());

        renderer.render("99999.1234", Some("999.1234"), &dest).unwrap();

        let loaded = image::open(&dest).unwrap();
        assert_eq!(loaded.height(), 20);
    }

    #[test]
    fn unencodable_payload_is_rendering_error() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out.png");
        let renderer = Code128Renderer::new(options());

        let err = renderer.render("SKU-ü", None, &dest).unwrap_err();
        assert!(matches!(err, LabelError::Rendering { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn missing_font_is_resource_missing() {
        let config = BarcodeConfig {
            font: Some("/nonexistent/skulabel/arial.ttf".into()),
            ..BarcodeConfig::default()
        };
        let err = Code128Renderer::from_config(&config).err().unwrap();
        assert!(matches!(err, LabelError::ResourceMissing { what: "font", .. }));
    }

    #[test]
    fn font_ignored_when_caption_disabled() {
        let config = BarcodeConfig {
            font: Some("/nonexistent/skulabel/arial.ttf".into()),
            human_readable: false,
            ..BarcodeConfig::default()
        };
        let renderer = Code128Renderer::from_config(&config).unwrap();
        assert!(!renderer.has_font());
    }

    #[test]
    fn garbage_font_is_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let config = BarcodeConfig {
            font: Some(path),
            ..BarcodeConfig::default()
        };
        let err = Code128Renderer::from_config(&config).err().unwrap();
        assert!(matches!(err, LabelError::FontInvalid { .. }));
    }
}
