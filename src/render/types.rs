// Renderer-agnostic types that don't depend on any specific backend

use serde::Serialize;

/// A color represented as RGBA values (0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl RenderColor {
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Inverse slide background, RGB(39, 40, 34)
    pub fn charcoal() -> Self {
        Self::rgb(0.153, 0.157, 0.133)
    }

    /// Inverse slide text, RGB(119, 120, 114)
    pub fn slate() -> Self {
        Self::rgb(0.467, 0.471, 0.447)
    }
}

impl Default for RenderColor {
    fn default() -> Self {
        Self::white()
    }
}

/// Vertical placement of the slide content (`top` / `middle` / `bottom`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum TextPosition {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Text alignment within the slide (`left` / `center` / `right`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How background images should be scaled (`background-size`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum BackgroundScale {
    #[default]
    Fit,      // contain: fit within the slide, may letterbox
    Fill,     // cover: fill the slide, may crop
    Stretch,  // 100% 100%: may distort
    Unscaled, // auto: keep original size
}

/// Foreground and background colors of a slide
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    pub background: RenderColor,
    pub foreground: RenderColor,
}

impl Theme {
    pub fn inverse() -> Self {
        Self {
            background: RenderColor::charcoal(),
            foreground: RenderColor::slate(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: RenderColor::white(),
            foreground: RenderColor::black(),
        }
    }
}

/// Dimensions for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderDimensions {
    pub width: f32,
    pub height: f32,
}

impl RenderDimensions {
    /// Dimensions for an aspect ratio like "16:9", keeping the default width.
    pub fn from_ratio(ratio: &str) -> Option<Self> {
        let (w, h) = ratio.split_once(':')?;
        let w: f32 = w.trim().parse().ok()?;
        let h: f32 = h.trim().parse().ok()?;
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return None;
        }
        let width = Self::default().width;
        Some(Self {
            width,
            height: width * h / w,
        })
    }
}

impl Default for RenderDimensions {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Background specification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BackgroundSpec {
    SolidColor(RenderColor),
    Image { url: String, scale: BackgroundScale },
}

impl Default for BackgroundSpec {
    fn default() -> Self {
        Self::SolidColor(RenderColor::white())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ratio() {
        let d = RenderDimensions::from_ratio("16:9").unwrap();
        assert_eq!(d.width, 1024.0);
        assert_eq!(d.height, 576.0);
        assert_eq!(RenderDimensions::from_ratio("4:3"), Some(RenderDimensions::default()));
        assert!(RenderDimensions::from_ratio("wide").is_none());
        assert!(RenderDimensions::from_ratio("0:3").is_none());
        assert!(RenderDimensions::from_ratio("NaN:1").is_none());
        assert!(RenderDimensions::from_ratio("1:inf").is_none());
        assert!(RenderDimensions::from_ratio("inf:1").is_none());
    }
}
