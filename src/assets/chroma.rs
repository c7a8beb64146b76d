use std::io::Cursor;

use anyhow::Context as _;
use image::RgbaImage;
use rayon::prelude::*;

use crate::foundation::error::DramaResult;

/// Per-channel distance below which a pixel counts as background.
pub const DEFAULT_TOLERANCE: u8 = 60;

/// Green must exceed both red and blue by more than this for [`key_green_in_place`].
pub const GREEN_MARGIN: u8 = 20;

/// Chroma-key parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChromaKeyOpts {
    /// A pixel matches a corner color when every RGB channel differs by less than this.
    pub tolerance: u8,
}

impl Default for ChromaKeyOpts {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// RGB of the top-left, top-right, bottom-left and bottom-right pixels.
///
/// Alpha is ignored, so corners erased by an earlier pass still yield their original
/// color. Returns `None` for an empty image.
pub fn corner_colors(img: &RgbaImage) -> Option<[[u8; 3]; 4]> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return None;
    }
    let rgb = |x: u32, y: u32| {
        let p = img.get_pixel(x, y).0;
        [p[0], p[1], p[2]]
    };
    Some([rgb(0, 0), rgb(w - 1, 0), rgb(0, h - 1), rgb(w - 1, h - 1)])
}

fn near(px: &[u8], c: [u8; 3], tolerance: u8) -> bool {
    px[0].abs_diff(c[0]) < tolerance
        && px[1].abs_diff(c[1]) < tolerance
        && px[2].abs_diff(c[2]) < tolerance
}

/// Zero the alpha of every visible pixel for which `is_background` holds. RGB is kept.
fn clear_alpha_where<F>(img: &mut RgbaImage, is_background: F) -> usize
where
    F: Fn(&[u8]) -> bool + Sync,
{
    img.par_chunks_exact_mut(4)
        .map(|px| {
            if px[3] != 0 && is_background(px) {
                px[3] = 0;
                1
            } else {
                0
            }
        })
        .sum()
}

/// Corner-sampled chroma key over a decoded buffer. Returns the number of pixels erased.
pub fn key_corners_in_place(img: &mut RgbaImage, opts: ChromaKeyOpts) -> usize {
    let Some(corners) = corner_colors(img) else {
        return 0;
    };
    let tolerance = opts.tolerance;
    clear_alpha_where(img, |px| corners.iter().any(|&c| near(px, c, tolerance)))
}

/// Green-screen key: erases pixels whose green dominates red and blue by [`GREEN_MARGIN`].
pub fn key_green_in_place(img: &mut RgbaImage) -> usize {
    clear_alpha_where(img, |px| {
        let (r, g, b) = (u16::from(px[0]), u16::from(px[1]), u16::from(px[2]));
        let m = u16::from(GREEN_MARGIN);
        g > r + m && g > b + m
    })
}

/// Make the inferred background of an encoded image transparent and re-encode as PNG.
///
/// Never fails: undecodable input is returned unchanged.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn extract_transparency(bytes: &[u8]) -> Vec<u8> {
    extract_transparency_with(bytes, ChromaKeyOpts::default())
}

/// [`extract_transparency`] with explicit options.
pub fn extract_transparency_with(bytes: &[u8], opts: ChromaKeyOpts) -> Vec<u8> {
    transform_encoded(bytes, |img| key_corners_in_place(img, opts))
}

/// Apply [`key_green_in_place`] to an encoded image. Undecodable input is returned unchanged.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn extract_green_screen(bytes: &[u8]) -> Vec<u8> {
    transform_encoded(bytes, key_green_in_place)
}

fn transform_encoded<F>(bytes: &[u8], key: F) -> Vec<u8>
where
    F: FnOnce(&mut RgbaImage) -> usize,
{
    match try_transform_encoded(bytes, key) {
        Ok(out) => out,
        Err(err) => {
            tracing::warn!(error = %err, "chroma key skipped; returning original image");
            bytes.to_vec()
        }
    }
}

fn try_transform_encoded<F>(bytes: &[u8], key: F) -> DramaResult<Vec<u8>>
where
    F: FnOnce(&mut RgbaImage) -> usize,
{
    let mut img = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .to_rgba8();
    let erased = key(&mut img);
    tracing::debug!(
        erased,
        width = img.width(),
        height = img.height(),
        "chroma key applied"
    );
    encode_png(img)
}

/// Encode an RGBA buffer as PNG.
pub fn encode_png(img: RgbaImage) -> DramaResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/chroma.rs"]
mod tests;
