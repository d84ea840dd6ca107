//! Rule files describing tile images, their rotations and socket codes
//!
//! A rule file is a JSON array of entries such as
//!
//! ```json
//! [{ "Img": "road.png", "Width": 32, "Height": 32,
//!    "Rotations": [{ "RotationDegree": 90, "SideRules": [[0], [1], [0], [1]] }] }]
//! ```
//!
//! `SideRules` lists socket codes in TOP, RIGHT, BOTTOM, LEFT order. Every
//! rotation becomes one catalog tile, in file order.

use crate::io::error::{CollapseError, Result, invalid_parameter};
use crate::spatial::orientation::Orientation;
use crate::spatial::tiles::{SocketCode, Tile, TileBuilder};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// One tile image together with its rotation variants
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TileRule {
    /// Image path, relative to the rule file unless absolute
    pub img: PathBuf,
    /// Drawn width in pixels
    pub width: u32,
    /// Drawn height in pixels
    pub height: u32,
    /// Rotation variants, each becoming a separate tile
    pub rotations: Vec<RotationRule>,
}

/// Socket codes of one rotation of a tile image
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RotationRule {
    /// Clockwise rotation in degrees
    pub rotation_degree: i32,
    /// Socket codes in TOP, RIGHT, BOTTOM, LEFT order
    pub side_rules: Vec<SocketCode>,
}

/// Clockwise quarter-turn rotation applied when drawing a tile image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// Drawn as stored
    #[default]
    None,
    /// 90 degrees clockwise
    Quarter,
    /// 180 degrees
    Half,
    /// 270 degrees clockwise
    ThreeQuarter,
}

impl Rotation {
    /// Rotation in degrees
    pub const fn degrees(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Quarter => 90,
            Self::Half => 180,
            Self::ThreeQuarter => 270,
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = CollapseError;

    fn try_from(degrees: i32) -> Result<Self> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::None),
            90 => Ok(Self::Quarter),
            180 => Ok(Self::Half),
            270 => Ok(Self::ThreeQuarter),
            _ => Err(CollapseError::InvalidRotation { degrees }),
        }
    }
}

/// Payload of an image-backed catalog tile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileImage {
    /// Resolved image path
    pub path: PathBuf,
    /// Drawn width in pixels
    pub width: u32,
    /// Drawn height in pixels
    pub height: u32,
    /// Rotation applied when drawing
    pub rotation: Rotation,
}

impl fmt::Display for TileImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "img: {} | rotation: {}",
            self.path.display(),
            self.rotation.degrees()
        )
    }
}

/// Parse rule file contents
///
/// # Errors
///
/// Returns `CatalogParse` if the text is not a valid rule array
pub fn parse_rules(json: &str, path: &Path) -> Result<Vec<TileRule>> {
    serde_json::from_str(json).map_err(|e| CollapseError::CatalogParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read and parse a rule file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read and `CatalogParse` if it is malformed
pub fn load_rules(path: &Path) -> Result<Vec<TileRule>> {
    let json = std::fs::read_to_string(path).map_err(|e| CollapseError::FileSystem {
        path: path.to_path_buf(),
        operation: "read rules",
        source: e,
    })?;
    parse_rules(&json, path)
}

/// Turn parsed rules into catalog tiles, one per rotation
///
/// # Errors
///
/// Returns `MissingSocket` when a rotation lists fewer than four sides,
/// `InvalidParameter` when it lists more, and `InvalidRotation` for angles
/// that are not quarter turns
pub fn build_catalog(rules: &[TileRule], base_dir: &Path) -> Result<Vec<Tile<TileImage>>> {
    let mut builder = TileBuilder::new();
    let mut catalog = Vec::new();

    for rule in rules {
        let path = if rule.img.is_absolute() {
            rule.img.clone()
        } else {
            base_dir.join(&rule.img)
        };

        for rotation in &rule.rotations {
            if rotation.side_rules.len() > Orientation::ALL.len() {
                return Err(invalid_parameter(
                    "SideRules",
                    &rotation.side_rules.len(),
                    &"expected one socket code per side (4)",
                ));
            }

            builder.value(TileImage {
                path: path.clone(),
                width: rule.width,
                height: rule.height,
                rotation: Rotation::try_from(rotation.rotation_degree)?,
            });
            for (orientation, code) in Orientation::ALL.into_iter().zip(&rotation.side_rules) {
                builder.socket(orientation, code.clone());
            }

            catalog.push(builder.build()?);
        }
    }

    tracing::debug!(rules = rules.len(), tiles = catalog.len(), "built catalog");
    Ok(catalog)
}

/// Read a rule file and build its catalog
///
/// # Errors
///
/// Propagates any error from [`load_rules`] and [`build_catalog`]
pub fn load_catalog(path: &Path) -> Result<Vec<Tile<TileImage>>> {
    let rules = load_rules(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    build_catalog(&rules, base_dir)
}
