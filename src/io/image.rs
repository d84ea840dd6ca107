//! Board rendering: tile images composited into a PNG as cells collapse

use crate::io::catalog::{Rotation, TileImage};
use crate::io::configuration::{FALLBACK_CELL_SIZE, MAX_CANVAS_PIXELS};
use crate::io::error::{CollapseError, Result, invalid_parameter};
use crate::io::visitor::{CellVisit, Visitor};
use crate::spatial::tiles::Tile;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const EMPTY: Rgba<u8> = Rgba([0, 0, 0, 0]);
const CONTRADICTION: Rgba<u8> = Rgba([200, 30, 30, 255]);

/// Tile images prepared for drawing: rotated and scaled to their declared size
#[derive(Debug, Clone)]
pub struct TileAtlas {
    cell_size: (u32, u32),
    images: HashMap<TileImage, RgbaImage>,
}

impl TileAtlas {
    /// Create an empty atlas with the given cell size (width, height)
    pub fn new(cell_size: (u32, u32)) -> Self {
        Self {
            cell_size,
            images: HashMap::new(),
        }
    }

    /// Load and prepare the image of every catalog tile
    ///
    /// Each source file is decoded once, however many rotations use it. The cell
    /// size is the largest declared tile size.
    ///
    /// # Errors
    ///
    /// Returns `ImageLoad` if a tile image cannot be opened or decoded
    pub fn load(catalog: &[Tile<TileImage>]) -> Result<Self> {
        let cell_size = catalog.iter().fold((0, 0), |(w, h), tile| {
            (w.max(tile.value().width), h.max(tile.value().height))
        });
        let cell_size = (
            non_zero_or_fallback(cell_size.0),
            non_zero_or_fallback(cell_size.1),
        );

        let mut sources: HashMap<PathBuf, RgbaImage> = HashMap::new();
        let mut atlas = Self::new(cell_size);

        for tile in catalog {
            let payload = tile.value();
            if atlas.images.contains_key(payload) {
                continue;
            }

            let source = match sources.get(&payload.path) {
                Some(source) => source.clone(),
                None => {
                    let decoded = image::open(&payload.path)
                        .map_err(|e| CollapseError::ImageLoad {
                            path: payload.path.clone(),
                            source: e,
                        })?
                        .to_rgba8();
                    sources.insert(payload.path.clone(), decoded.clone());
                    decoded
                }
            };

            atlas.insert(payload.clone(), &source);
        }

        tracing::debug!(
            images = sources.len(),
            variants = atlas.images.len(),
            "loaded tile atlas"
        );
        Ok(atlas)
    }

    /// Rotate and scale `source` for `payload` and store the result
    pub fn insert(&mut self, payload: TileImage, source: &RgbaImage) {
        let rotated = match payload.rotation {
            Rotation::None => source.clone(),
            Rotation::Quarter => imageops::rotate90(source),
            Rotation::Half => imageops::rotate180(source),
            Rotation::ThreeQuarter => imageops::rotate270(source),
        };

        let width = if payload.width == 0 {
            self.cell_size.0
        } else {
            payload.width
        };
        let height = if payload.height == 0 {
            self.cell_size.1
        } else {
            payload.height
        };

        let prepared = if rotated.dimensions() == (width, height) {
            rotated
        } else {
            imageops::resize(&rotated, width, height, FilterType::Nearest)
        };
        self.images.insert(payload, prepared);
    }

    /// Prepared image of a tile
    pub fn get(&self, payload: &TileImage) -> Option<&RgbaImage> {
        self.images.get(payload)
    }

    /// Cell size in pixels (width, height)
    pub const fn cell_size(&self) -> (u32, u32) {
        self.cell_size
    }
}

const fn non_zero_or_fallback(size: u32) -> u32 {
    if size == 0 { FALLBACK_CELL_SIZE } else { size }
}

/// Visitor drawing the board into an RGBA canvas
///
/// Collapsed cells show their tile image. In propagating mode, open cells are
/// shaded darker the fewer candidates they have left, and cells with none left
/// are drawn in red.
#[derive(Debug, Clone)]
pub struct ImageRenderer {
    atlas: TileAtlas,
    canvas: RgbaImage,
    catalog_len: usize,
}

impl ImageRenderer {
    /// Create a renderer for a `rows` x `cols` board over a catalog of `catalog_len` tiles
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the canvas would exceed `MAX_CANVAS_PIXELS`
    pub fn new(atlas: TileAtlas, rows: usize, cols: usize, catalog_len: usize) -> Result<Self> {
        let (cell_w, cell_h) = atlas.cell_size();
        let width = u64::from(cell_w).saturating_mul(u64::try_from(cols).unwrap_or(u64::MAX));
        let height = u64::from(cell_h).saturating_mul(u64::try_from(rows).unwrap_or(u64::MAX));
        let too_large = || {
            invalid_parameter(
                "canvas",
                &format!("{width}x{height}"),
                &format!("must not exceed {MAX_CANVAS_PIXELS} pixels"),
            )
        };

        if width.saturating_mul(height) > MAX_CANVAS_PIXELS {
            return Err(too_large());
        }
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(too_large());
        };

        Ok(Self {
            atlas,
            canvas: RgbaImage::new(width, height),
            catalog_len,
        })
    }

    /// Current rendering
    pub const fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Tile atlas used for drawing
    pub const fn atlas(&self) -> &TileAtlas {
        &self.atlas
    }

    /// Save the current rendering as PNG
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the image cannot be saved
    pub fn save(&self, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CollapseError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        self.canvas
            .save(output_path)
            .map_err(|e| CollapseError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }

    fn cell_origin(&self, x: usize, y: usize) -> (u32, u32) {
        let (cell_w, cell_h) = self.atlas.cell_size();
        (
            cell_w.saturating_mul(y as u32),
            cell_h.saturating_mul(x as u32),
        )
    }

    fn fill_cell(&mut self, x: usize, y: usize, color: Rgba<u8>) {
        let (left, top) = self.cell_origin(x, y);
        let (cell_w, cell_h) = self.atlas.cell_size();
        let right = left.saturating_add(cell_w).min(self.canvas.width());
        let bottom = top.saturating_add(cell_h).min(self.canvas.height());

        for py in top..bottom {
            for px in left..right {
                self.canvas.put_pixel(px, py, color);
            }
        }
    }

    fn shade(&self, candidates: usize) -> Rgba<u8> {
        if candidates == 0 {
            return CONTRADICTION;
        }

        let open = candidates.min(self.catalog_len) as f64 / self.catalog_len.max(1) as f64;
        let alpha = (1.0 - open).mul_add(191.0, 64.0) as u8;
        Rgba([40, 40, 40, alpha])
    }
}

impl Visitor<TileImage> for ImageRenderer {
    fn before_visit(&mut self) {
        for pixel in self.canvas.pixels_mut() {
            *pixel = EMPTY;
        }
    }

    fn visit(&mut self, cell: CellVisit<'_, TileImage>) {
        self.fill_cell(cell.x, cell.y, EMPTY);

        match cell.value {
            Some(payload) => {
                let (left, top) = self.cell_origin(cell.x, cell.y);
                if let Some(image) = self.atlas.get(payload) {
                    imageops::replace(&mut self.canvas, image, i64::from(left), i64::from(top));
                }
            }
            None if !cell.fast_way() => {
                let color = self.shade(cell.candidates);
                self.fill_cell(cell.x, cell.y, color);
            }
            None => {}
        }
    }
}
