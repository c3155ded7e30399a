use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{FlagGridError, FlagGridResult};

/// Extra vertical room below the font size reserved for each label band.
pub const LABEL_PADDING: u32 = 10;

/// Sizing constants of the preview grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridGeometry {
    /// Row capacity `K`.
    pub flags_per_row: u32,
    /// Edge length `S` of the square image area of each thumbnail.
    pub thumbnail_size: u32,
    /// Gap `P` between neighbouring cells.
    pub spacing: u32,
    /// Margin `E` around the whole grid.
    pub edge_spacing: u32,
    /// Label font size in pixels.
    pub font_size: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            flags_per_row: 10,
            thumbnail_size: 100,
            spacing: 10,
            edge_spacing: 20,
            font_size: 25,
        }
    }
}

impl GridGeometry {
    pub fn validate(&self) -> FlagGridResult<()> {
        if self.flags_per_row == 0 {
            return Err(FlagGridError::validation("flags_per_row must be >= 1"));
        }
        if self.thumbnail_size == 0 {
            return Err(FlagGridError::validation("thumbnail_size must be >= 1"));
        }
        if self.font_size == 0 {
            return Err(FlagGridError::validation("font_size must be >= 1"));
        }
        self.thumbnail_size
            .checked_add(self.font_size)
            .and_then(|v| v.checked_add(LABEL_PADDING))
            .ok_or_else(|| {
                FlagGridError::validation(format!(
                    "thumbnail height {} + {} + {LABEL_PADDING} exceeds the u32 range",
                    self.thumbnail_size, self.font_size
                ))
            })?;
        Ok(())
    }

    /// Height `T` of the label band under each image.
    ///
    /// Saturates for geometries [`GridGeometry::validate`] rejects.
    pub fn text_height(&self) -> u32 {
        self.font_size.saturating_add(LABEL_PADDING)
    }

    /// `(width, height)` every rendered thumbnail must have: `S × (S + T)`.
    pub fn thumbnail_dims(&self) -> (u32, u32) {
        (
            self.thumbnail_size,
            self.thumbnail_size.saturating_add(self.text_height()),
        )
    }

    /// Horizontal distance between the left edges of neighbouring columns.
    fn column_stride(&self) -> u64 {
        u64::from(self.thumbnail_size) + u64::from(self.spacing)
    }

    /// Vertical distance between the top edges of neighbouring rows.
    fn row_stride(&self) -> u64 {
        self.column_stride() + u64::from(self.text_height())
    }
}

/// Pixel placement of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPlacement {
    pub row: u64,
    pub col: u64,
    pub top: u64,
    pub left: u64,
}

/// Canvas size and cell placement for `count` thumbnails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    count: usize,
    geometry: GridGeometry,
    rows: u32,
    width: u32,
    height: u32,
}

impl GridLayout {
    /// Compute the layout for `count` thumbnails. An empty grid is an error, never a zero-area
    /// canvas.
    pub fn new(count: usize, geometry: &GridGeometry) -> FlagGridResult<Self> {
        geometry.validate()?;
        if count == 0 {
            return Err(FlagGridError::empty_input(
                "no images to place in the grid",
            ));
        }

        let per_row = u64::from(geometry.flags_per_row);
        let rows = u64::try_from(count)
            .map_err(|_| FlagGridError::validation(format!("image count {count} is too large")))?
            .div_ceil(per_row);
        let edges = 2 * u64::from(geometry.edge_spacing);
        let spacing = u64::from(geometry.spacing);

        // Strides are at least `spacing`, so the subtraction cannot underflow.
        let extent = |stride: u64, cells: u64, what: &str| {
            stride
                .checked_mul(cells)
                .map(|v| v - spacing)
                .and_then(|v| v.checked_add(edges))
                .ok_or_else(|| {
                    FlagGridError::validation(format!("grid {what} exceeds the u64 range"))
                })
        };
        let width = extent(geometry.column_stride(), per_row, "width")?;
        let height = extent(geometry.row_stride(), rows, "height")?;

        let fit = |v: u64, what: &str| {
            u32::try_from(v).map_err(|_| {
                FlagGridError::validation(format!("grid {what} {v} exceeds the u32 range"))
            })
        };

        Ok(Self {
            count,
            geometry: *geometry,
            rows: fit(rows, "row count")?,
            width: fit(width, "width")?,
            height: fit(height, "height")?,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Placement of the thumbnail at `index`.
    ///
    /// Defined for every index, including ones past `count`; fails only when the placement does
    /// not fit in `u64`. Indices below `count` always succeed.
    pub fn cell(&self, index: usize) -> FlagGridResult<CellPlacement> {
        let g = &self.geometry;
        let overflow =
            || FlagGridError::validation(format!("placement of cell {index} exceeds the u64 range"));

        let per_row = u64::from(g.flags_per_row);
        let index_u64 = u64::try_from(index).map_err(|_| overflow())?;
        let row = index_u64 / per_row;
        let col = index_u64 % per_row;
        let edge = u64::from(g.edge_spacing);

        let top = row
            .checked_mul(g.row_stride())
            .and_then(|v| v.checked_add(edge))
            .ok_or_else(overflow)?;
        let left = col
            .checked_mul(g.column_stride())
            .and_then(|v| v.checked_add(edge))
            .ok_or_else(overflow)?;

        Ok(CellPlacement {
            row,
            col,
            top,
            left,
        })
    }

    /// Pixel rectangle covered by the thumbnail at `index`.
    pub fn cell_rect(&self, index: usize) -> FlagGridResult<kurbo::Rect> {
        let cell = self.cell(index)?;
        let (w, h) = self.geometry.thumbnail_dims();
        Ok(kurbo::Rect::from_origin_size(
            (cell.left as f64, cell.top as f64),
            (f64::from(w), f64::from(h)),
        ))
    }

    /// Placements of every thumbnail, in index order.
    pub fn cells(&self) -> impl Iterator<Item = FlagGridResult<CellPlacement>> + '_ {
        (0..self.count).map(|i| self.cell(i))
    }
}

/// Paint `thumbs` onto a transparent canvas at their grid cells.
pub fn compose(thumbs: &[RgbaImage], geometry: &GridGeometry) -> FlagGridResult<RgbaImage> {
    let layout = GridLayout::new(thumbs.len(), geometry)?;
    let expected = geometry.thumbnail_dims();

    let mut canvas = RgbaImage::new(layout.width(), layout.height());
    for (index, thumb) in thumbs.iter().enumerate() {
        let cell = layout.cell(index)?;
        if thumb.dimensions() != expected {
            let (w, h) = thumb.dimensions();
            return Err(FlagGridError::validation(format!(
                "thumbnail {index} is {w}x{h}, expected {}x{}",
                expected.0, expected.1
            )));
        }
        // Cells are disjoint and the canvas starts transparent, so copying equals source-over.
        image::imageops::replace(&mut canvas, thumb, cell.left as i64, cell.top as i64);
    }

    Ok(canvas)
}

/// Write `canvas` as PNG, creating the parent directory and overwriting any existing file.
pub fn write_png(canvas: &RgbaImage, path: &Path) -> FlagGridResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            FlagGridError::write(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }

    canvas
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| FlagGridError::write(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid.rs"]
mod tests;
