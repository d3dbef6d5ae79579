//! Decoration styles.
//!
//! Every widget that paints takes its colors and metrics from one of these
//! structs, passed in at construction. [`WindowStyle`] bundles the lot and
//! can be loaded from a TOML document:
//!
//! ```
//! use casement::style::WindowStyle;
//!
//! let style = WindowStyle::from_toml_str(r#"
//! [titlebar]
//! height = 24
//!
//! [border]
//! width = 2
//! color = 0xff336699
//! "#).unwrap();
//!
//! assert_eq!(style.titlebar.height, 24);
//! assert_eq!(style.border.width, 2);
//! // Unspecified fields keep their defaults.
//! assert_eq!(style.resizebar.height, 7);
//! ```
//!
//! Colors are ARGB, one byte per channel, alpha in the high byte.

use serde::{Deserialize, Serialize};

use casement_core::{Result, ToolkitError};

/// A colored margin or border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginStyle {
    pub width: i32,
    pub color: u32,
}

impl Default for MarginStyle {
    fn default() -> Self {
        Self { width: 1, color: 0xff00_0000 }
    }
}

/// How a background is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Fill {
    Solid { color: u32 },
    /// Left to right.
    HGradient { from: u32, to: u32 },
    /// Top to bottom.
    VGradient { from: u32, to: u32 },
}

impl Default for Fill {
    fn default() -> Self {
        Fill::Solid { color: 0xff80_8080 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleBarStyle {
    pub focused_fill: Fill,
    pub blurred_fill: Fill,
    pub focused_text_color: u32,
    pub blurred_text_color: u32,
    /// Height of the bar; buttons are square at this size.
    pub height: i32,
    pub bezel_width: i32,
    pub margin: MarginStyle,
}

impl Default for TitleBarStyle {
    fn default() -> Self {
        Self {
            focused_fill: Fill::HGradient { from: 0xff50_5a5e, to: 0xff20_2a2e },
            blurred_fill: Fill::HGradient { from: 0xffc2_c0c5, to: 0xff82_8085 },
            focused_text_color: 0xffff_ffff,
            blurred_text_color: 0xff00_0000,
            height: 22,
            bezel_width: 1,
            margin: MarginStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeBarStyle {
    pub fill: Fill,
    pub height: i32,
    /// Width of the corner areas that resize along two edges.
    pub corner_width: i32,
    pub bezel_width: i32,
    pub margin: MarginStyle,
}

impl Default for ResizeBarStyle {
    fn default() -> Self {
        Self {
            fill: Fill::Solid { color: 0xffc2_c0c5 },
            height: 7,
            corner_width: 29,
            bezel_width: 1,
            margin: MarginStyle::default(),
        }
    }
}

/// Everything a decorated window needs to paint itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowStyle {
    pub titlebar: TitleBarStyle,
    pub resizebar: ResizeBarStyle,
    /// Spacing between title bar, content and resize bar.
    pub margin: MarginStyle,
    /// Frame around the whole window.
    pub border: MarginStyle,
}

impl WindowStyle {
    /// Parse a style from TOML. Missing tables and fields take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|err| ToolkitError::Style(err.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| ToolkitError::Style(err.to_string()))
    }
}

static_assertions::assert_impl_all!(WindowStyle: Send, Sync, Copy);
