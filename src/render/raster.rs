use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{DiablocError, DiablocResult};

const MAX_DIM: u32 = 16_384;

/// Straight (non-premultiplied) RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Raster {
    pub fn save_png(&self, path: &Path) -> DiablocResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Rasterize an SVG document at `scale` device pixels per diagram unit.
pub fn rasterize_svg(svg: &str, scale: f64) -> DiablocResult<Raster> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(DiablocError::render("scale must be finite and > 0"));
    }

    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;

    let size = tree.size();
    let width = to_px(f64::from(size.width()) * scale)?;
    let height = to_px(f64::from(size.height()) * scale)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| DiablocError::render("failed to allocate pixmap"))?;

    let sx = width as f32 / size.width();
    let sy = height as f32 / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut data = pixmap.data().to_vec();
    demultiply_rgba8_in_place(&mut data);
    tracing::debug!(width, height, "rasterized diagram");

    Ok(Raster {
        width,
        height,
        data,
    })
}

fn to_px(v: f64) -> DiablocResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(DiablocError::render("diagram has zero or invalid size"));
    }
    let px = v.ceil();
    if px > f64::from(MAX_DIM) {
        return Err(DiablocError::render(format!(
            "raster size too large: {px} (max {MAX_DIM})"
        )));
    }
    Ok(px as u32)
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
