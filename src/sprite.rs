// Icon artwork for the preview window.
// Local raster files are decoded with `image`; remote URLs and vector icons
// fall back to a flat disc so every icon still has something to draw.

use image::RgbaImage;
use std::path::Path;
use tracing::warn;

use crate::error::Result;

/// Disc colours, picked by icon index.
const PALETTE: [u32; 6] = [0x9333EA, 0x06B6D4, 0xEC4899, 0xA855F7, 0x22D3EE, 0xF472B6];

/// What to draw for one icon.
#[derive(Clone, Debug)]
pub enum IconArt {
    Bitmap(RgbaImage),
    Disc(u32),
}

impl IconArt {
    /// Decode a raster icon from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let img = image::open(path)?;
        Ok(IconArt::Bitmap(img.to_rgba8()))
    }

    /// Artwork for icon `index`, falling back to a disc when `src` is not a
    /// readable local raster file.
    pub fn load(src: &str, index: usize) -> Self {
        let fallback = IconArt::Disc(PALETTE[index % PALETTE.len()]);
        if src.contains("://") {
            return fallback;
        }
        match IconArt::open(src) {
            Ok(art) => art,
            Err(e) => {
                warn!(icon = src, error = %e, "could not load icon, drawing a disc instead");
                fallback
            }
        }
    }

    pub fn load_all(icons: &[String]) -> Vec<IconArt> {
        icons
            .iter()
            .enumerate()
            .map(|(index, src)| IconArt::load(src, index))
            .collect()
    }

    /// Colour and coverage (0..=1) at (u, v) in unit icon space.
    pub fn sample(&self, u: f64, v: f64) -> (u32, f32) {
        match self {
            IconArt::Bitmap(img) => {
                let x = ((u * img.width() as f64) as u32).min(img.width().saturating_sub(1));
                let y = ((v * img.height() as f64) as u32).min(img.height().saturating_sub(1));
                let [r, g, b, a] = img.get_pixel(x, y).0;
                (
                    ((r as u32) << 16) | ((g as u32) << 8) | b as u32,
                    a as f32 / 255.0,
                )
            }
            IconArt::Disc(color) => {
                let du = u - 0.5;
                let dv = v - 0.5;
                let coverage = if du * du + dv * dv <= 0.25 { 1.0 } else { 0.0 };
                (*color, coverage)
            }
        }
    }
}
