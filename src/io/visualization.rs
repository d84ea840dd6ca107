//! Frame capture and GIF generation for collapse visualization

use crate::io::catalog::TileImage;
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{CollapseError, Result};
use crate::io::image::ImageRenderer;
use crate::io::visitor::{CellVisit, Visitor};
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// Captures the rendered board after every collapsed cell
///
/// Wraps an [`ImageRenderer`] so the same visitor both draws the board and
/// records its history. Propagation reports update the canvas without adding
/// frames; the next collapse captures them.
pub struct VisualizationCapture {
    renderer: ImageRenderer,
    frames: Vec<RgbaImage>,
    collapses: usize,
}

impl VisualizationCapture {
    /// Start capturing around a renderer
    pub const fn new(renderer: ImageRenderer) -> Self {
        Self {
            renderer,
            frames: Vec::new(),
            collapses: 0,
        }
    }

    /// Returns all captured frames
    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    /// Number of collapses seen since the last `before_visit`
    pub const fn collapse_count(&self) -> usize {
        self.collapses
    }

    /// The wrapped renderer
    pub const fn renderer(&self) -> &ImageRenderer {
        &self.renderer
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// Skips frames when the requested frame rate exceeds viewer capabilities.
    /// With a 5ms delay and a 50ms viewer minimum, every 10th frame is kept so
    /// the apparent animation speed is preserved. The last frame always stays
    /// and is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(CollapseError::InvalidParameter {
                parameter: "frames",
                value: "0".to_string(),
                reason: "No collapses captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let frames = self.select_frames(effective_delay_ms, skip_factor);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CollapseError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| CollapseError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| CollapseError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn select_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let last_index = self.frames.len().saturating_sub(1);
        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .enumerate()
            .filter(|(index, _)| index % skip_factor == 0 || *index == last_index)
            .map(|(_, image)| {
                Frame::from_parts(
                    image.clone(),
                    0,
                    0,
                    Delay::from_numer_denom_ms(delay_ms, 1),
                )
            })
            .collect();

        // Hold the final board
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        frames
    }
}

impl Visitor<TileImage> for VisualizationCapture {
    fn before_visit(&mut self) {
        self.renderer.before_visit();
        self.frames.clear();
        self.collapses = 0;
    }

    fn visit(&mut self, cell: CellVisit<'_, TileImage>) {
        self.renderer.visit(cell);

        if cell.value.is_some() {
            self.collapses += 1;
            self.frames.push(self.renderer.canvas().clone());
        }
    }
}
