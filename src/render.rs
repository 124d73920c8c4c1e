//! Rasterizes draw instructions onto RGB images.
//!
//! Available when the `render` feature is enabled.

use crate::config::OverlayStyle;
use crate::overlay::{draw_instructions, DrawInstruction};
use crate::pipeline::MatchResult;
use crate::trace::trace_warn;
use crate::util::{PlateMatchError, PlateMatchResult};
use ab_glyph::{FontArc, PxScale};
use ::image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use std::fs;

const BASE_FONT_PX: f32 = 24.0;

/// Draws match results with an [`OverlayStyle`].
pub struct Annotator {
    style: OverlayStyle,
    font: Option<FontArc>,
}

impl Annotator {
    /// Creates an annotator, loading the style's font when one is configured.
    pub fn new(style: OverlayStyle) -> PlateMatchResult<Self> {
        let font = match &style.font_path {
            Some(path) => {
                let bytes = fs::read(path).map_err(|err| PlateMatchError::Font {
                    reason: format!("{}: {err}", path.display()),
                })?;
                let font = FontArc::try_from_vec(bytes).map_err(|err| PlateMatchError::Font {
                    reason: format!("{}: {err}", path.display()),
                })?;
                Some(font)
            }
            None => None,
        };
        Ok(Self { style, font })
    }

    /// Returns the overlay style.
    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Annotates `image` in place, one overlay per result.
    pub fn annotate(&self, image: &mut RgbImage, results: &[MatchResult]) {
        if self.font.is_none() && !results.is_empty() {
            trace_warn!("labels_skipped", reason = "no font configured");
        }
        for instr in draw_instructions(results, &self.style) {
            self.draw(image, &instr);
        }
    }

    fn draw(&self, image: &mut RgbImage, instr: &DrawInstruction) {
        blend_rect(image, instr);
        outline_rect(image, instr);

        let Some(font) = &self.font else {
            return;
        };
        let scale = PxScale::from(BASE_FONT_PX * instr.font_scale);
        let (text_width, text_height) = text_size(scale, font, &instr.label);
        let (x, baseline) = instr.label_origin(text_width as i32);
        let top = (baseline - text_height as i32).max(0);
        draw_text_mut(
            image,
            Rgb(instr.text_color),
            x,
            top,
            scale,
            font,
            &instr.label,
        );
    }
}

/// Alpha-blends the instruction color over the pixels inside its rectangle.
fn blend_rect(image: &mut RgbImage, instr: &DrawInstruction) {
    let rect = instr.rect;
    let x0 = rect.x.max(0) as u32;
    let y0 = rect.y.max(0) as u32;
    let x1 = rect.right().clamp(0, image.width() as i32) as u32;
    let y1 = rect.bottom().clamp(0, image.height() as i32) as u32;
    let alpha = instr.alpha;

    for y in y0..y1 {
        for x in x0..x1 {
            let pixel = image.get_pixel_mut(x, y);
            for (channel, &color) in pixel.0.iter_mut().zip(instr.color.iter()) {
                let value = alpha * color as f32 + (1.0 - alpha) * *channel as f32;
                *channel = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Draws an opaque outline `thickness` pixels wide, centered on the edge.
fn outline_rect(image: &mut RgbImage, instr: &DrawInstruction) {
    let rect = instr.rect;
    let half = (instr.thickness / 2) as i32;
    for ring in 0..instr.thickness as i32 {
        let offset = ring - half;
        let width = rect.width - 2 * offset;
        let height = rect.height - 2 * offset;
        if width <= 0 || height <= 0 {
            break;
        }
        let ring_rect = imageproc::rect::Rect::at(rect.x + offset, rect.y + offset)
            .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(image, ring_rect, Rgb(instr.color));
    }
}
