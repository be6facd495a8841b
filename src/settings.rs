//! Map rendering configuration, as read from a `render_settings` document.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Self::Named(name.into())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(name) => write!(f, "{name}"),
            Color::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({r},{g},{b},{a})"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Named(String),
    Components(Vec<serde_json::Number>),
}

impl RawColor {
    fn into_color(self) -> Result<Color, RenderError> {
        let components = match self {
            RawColor::Named(name) => return Ok(Color::Named(name)),
            RawColor::Components(components) => components,
        };

        let channel = |n: &serde_json::Number| {
            n.as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .ok_or_else(|| RenderError::InvalidColor(format!("channel {n} is not in 0..=255")))
        };

        match components.as_slice() {
            [r, g, b] => Ok(Color::Rgb(channel(r)?, channel(g)?, channel(b)?)),
            [r, g, b, a] => {
                let alpha = a
                    .as_f64()
                    .ok_or_else(|| RenderError::InvalidColor(format!("opacity {a}")))?;
                Ok(Color::Rgba(channel(r)?, channel(g)?, channel(b)?, alpha))
            }
            other => Err(RenderError::InvalidColor(format!(
                "expected 3 or 4 components, got {}",
                other.len()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawColor::deserialize(deserializer)?
            .into_color()
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl From<[f64; 2]> for Offset {
    fn from([dx, dy]: [f64; 2]) -> Self {
        Self { dx, dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub font_size: u32,
    pub offset: Offset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnderLayer {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: Offset,
    pub stop_label_font_size: u32,
    pub stop_label_offset: Offset,
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

impl RenderSettings {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
            padding: self.padding,
        }
    }

    pub fn bus_label(&self) -> LabelStyle {
        LabelStyle {
            font_size: self.bus_label_font_size,
            offset: self.bus_label_offset,
        }
    }

    pub fn stop_label(&self) -> LabelStyle {
        LabelStyle {
            font_size: self.stop_label_font_size,
            offset: self.stop_label_offset,
        }
    }

    pub fn underlayer(&self) -> UnderLayer {
        UnderLayer {
            color: self.underlayer_color.clone(),
            width: self.underlayer_width,
        }
    }

    /// Palette color for the route at `index` in drawing order.
    pub fn route_color(&self, index: usize) -> Result<&Color, RenderError> {
        if self.color_palette.is_empty() {
            return Err(RenderError::EmptyPalette);
        }
        Ok(&self.color_palette[index % self.color_palette.len()])
    }

    /// Checks the canvas geometry. An empty palette is only an error once
    /// there is a route to color, so it is left to the composer.
    pub fn validate(&self) -> Result<(), RenderError> {
        let Canvas {
            width,
            height,
            padding,
        } = self.canvas();

        let valid = width > 0.0
            && height > 0.0
            && padding >= 0.0
            && padding < width.min(height) / 2.0;

        if valid {
            Ok(())
        } else {
            Err(RenderError::InvalidCanvas {
                width,
                height,
                padding,
            })
        }
    }
}
