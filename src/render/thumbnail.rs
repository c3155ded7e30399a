//! Labeled thumbnails.
//!
//! A thumbnail is `S × (S + T)` pixels: the source SVG rasterized contain-fit into the top
//! `S × S` square, and its label centered underneath with the baseline at `S + font_size - 10`.

use anyhow::Context as _;
use image::{Rgba, RgbaImage};
use kurbo::Affine;
use resvg::tiny_skia;

use crate::{
    assets::font::LabelFont,
    foundation::core::Rgba8,
    foundation::error::{FlagGridError, FlagGridResult},
    render::grid::{GridGeometry, LABEL_PADDING},
};

/// Transform mapping an SVG of `svg_size` into a centered, aspect-preserving fit of a
/// `box_size × box_size` square.
pub fn contain_fit(svg_size: usvg::Size, box_size: u32) -> FlagGridResult<Affine> {
    let (w, h) = (f64::from(svg_size.width()), f64::from(svg_size.height()));
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return Err(FlagGridError::decode("svg has invalid width/height"));
    }

    let side = f64::from(box_size);
    let scale = (side / w).min(side / h);
    let dx = (side - w * scale) / 2.0;
    let dy = (side - h * scale) / 2.0;
    Ok(Affine::translate((dx, dy)) * Affine::scale(scale))
}

/// Render one labeled thumbnail in straight RGBA8.
pub fn render_thumbnail(
    tree: &usvg::Tree,
    label: &str,
    font: &LabelFont,
    text_color: Rgba8,
    geometry: &GridGeometry,
) -> FlagGridResult<RgbaImage> {
    geometry.validate()?;
    let (width, height) = geometry.thumbnail_dims();

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FlagGridError::validation("failed to allocate thumbnail pixmap"))?;

    let image = rasterize_contained(tree, geometry.thumbnail_size)?;
    pixmap.draw_pixmap(
        0,
        0,
        image.as_ref(),
        &tiny_skia::PixmapPaint::default(),
        tiny_skia::Transform::identity(),
        None,
    );

    if !label.trim().is_empty() {
        let svg = label_svg(label, font.family(), text_color, geometry);
        let label_tree = usvg::Tree::from_data(svg.as_bytes(), &font.usvg_options())
            .with_context(|| format!("lay out label '{label}'"))?;
        resvg::render(
            &label_tree,
            tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
    }

    Ok(pixmap_to_rgba(&pixmap))
}

/// Rasterize `tree` contain-fit into a `side × side` pixmap, clipped to the fitted viewport so
/// content outside the SVG's own bounds never reaches the padding.
fn rasterize_contained(tree: &usvg::Tree, side: u32) -> FlagGridResult<tiny_skia::Pixmap> {
    let fit = contain_fit(tree.size(), side)?;
    let mut image = tiny_skia::Pixmap::new(side, side)
        .ok_or_else(|| FlagGridError::validation("failed to allocate svg pixmap"))?;
    resvg::render(tree, to_skia(fit), &mut image.as_mut());

    let size = tree.size();
    let viewport = fit.transform_rect_bbox(kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(size.width()),
        f64::from(size.height()),
    ));
    let clip = tiny_skia::Rect::from_ltrb(
        viewport.x0 as f32,
        viewport.y0 as f32,
        viewport.x1 as f32,
        viewport.y1 as f32,
    )
    .ok_or_else(|| FlagGridError::decode("svg viewport is empty after fitting"))?;

    let mut mask = tiny_skia::Mask::new(side, side)
        .ok_or_else(|| FlagGridError::validation("failed to allocate svg clip mask"))?;
    mask.fill_path(
        &tiny_skia::PathBuilder::from_rect(clip),
        tiny_skia::FillRule::Winding,
        true,
        tiny_skia::Transform::identity(),
    );
    image.apply_mask(&mask);

    Ok(image)
}

fn to_skia(affine: Affine) -> tiny_skia::Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    tiny_skia::Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// Standalone SVG document holding only the label text, sized like the whole thumbnail.
fn label_svg(label: &str, family: &str, color: Rgba8, geometry: &GridGeometry) -> String {
    let (width, height) = geometry.thumbnail_dims();
    let size = geometry.thumbnail_size;
    let x = f64::from(size) / 2.0;
    let baseline = i64::from(size) + i64::from(geometry.font_size) - i64::from(LABEL_PADDING);

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<text x="{x}" y="{y}" font-family="'{family}'" font-size="{fs}" font-weight="bold" "#,
            r#"fill="{fill}" fill-opacity="{opacity}" text-anchor="middle">{text}</text>"#,
            "</svg>"
        ),
        w = width,
        h = height,
        x = x,
        y = baseline,
        family = escape_xml(family),
        fs = geometry.font_size,
        fill = color.to_hex_rgb(),
        opacity = color.opacity(),
        text = escape_xml(label),
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn pixmap_to_rgba(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/thumbnail.rs"]
mod tests;
