//! Named camera channels and matrix cells.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CameraError;

/// One animated camera attribute, named as in `.cam` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    Sx,
    Sy,
    Sz,
    Focal,
    Focus,
    Fstop,
    Near,
    Far,
    PanX,
    PanY,
    ZoomX,
    ZoomY,
}

impl Channel {
    pub const COUNT: usize = 18;

    /// File order.
    pub const ALL: [Channel; Self::COUNT] = [
        Self::X,
        Self::Y,
        Self::Z,
        Self::Rx,
        Self::Ry,
        Self::Rz,
        Self::Sx,
        Self::Sy,
        Self::Sz,
        Self::Focal,
        Self::Focus,
        Self::Fstop,
        Self::Near,
        Self::Far,
        Self::PanX,
        Self::PanY,
        Self::ZoomX,
        Self::ZoomY,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::Rx => "rx",
            Self::Ry => "ry",
            Self::Rz => "rz",
            Self::Sx => "sx",
            Self::Sy => "sy",
            Self::Sz => "sz",
            Self::Focal => "focal",
            Self::Focus => "focus",
            Self::Fstop => "fstop",
            Self::Near => "near",
            Self::Far => "far",
            Self::PanX => "pan_x",
            Self::PanY => "pan_y",
            Self::ZoomX => "zoom_x",
            Self::ZoomY => "zoom_y",
        }
    }

    /// Position in [`Channel::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Value used when the channel has no keyframes.
    pub fn neutral(&self) -> f64 {
        match self {
            Self::Sx | Self::Sy | Self::Sz | Self::ZoomX | Self::ZoomY => 1.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| CameraError::UnknownChannel {
                name: s.to_string(),
            })
    }
}

/// Name of matrix cell `(row, col)`, e.g. `a03`.
pub fn cell_name(row: usize, col: usize) -> String {
    format!("a{row}{col}")
}

/// Parse `aRC` with `R` and `C` in `0..4`.
pub fn parse_cell(name: &str) -> Option<(usize, usize)> {
    match name.as_bytes() {
        [b'a', r @ b'0'..=b'3', c @ b'0'..=b'3'] => {
            Some((usize::from(r - b'0'), usize::from(c - b'0')))
        }
        _ => None,
    }
}

/// Either kind of curve slot in a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Channel(Channel),
    Cell(usize, usize),
}

impl FromStr for Slot {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((row, col)) = parse_cell(s) {
            return Ok(Self::Cell(row, col));
        }
        s.parse().map(Self::Channel)
    }
}
