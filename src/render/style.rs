use crate::foundation::core::Rgba8;

/// Shape of stroke ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LineCap {
    /// Flat end at the endpoint.
    Butt,
    /// Half-disc past the endpoint.
    #[default]
    Round,
    /// Half-square past the endpoint.
    Square,
}

/// Shape of stroke corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LineJoin {
    /// Sharp corner.
    Miter,
    /// Rounded corner.
    #[default]
    Round,
    /// Cut corner.
    Bevel,
}

/// Blurred copy of a shape drawn underneath it, as in the 2D canvas shadow model.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shadow {
    /// Blur radius in logical pixels; the Gaussian sigma is half of it.
    pub blur: f64,
    /// Shadow color. Its alpha is further multiplied by the shape's own alpha.
    pub color: Rgba8,
}

impl Shadow {
    /// `true` when the shadow would leave a mark.
    pub fn is_visible(&self) -> bool {
        self.blur.is_finite() && self.blur > 0.0 && !self.color.is_transparent()
    }
}

/// Complete description of one stroke. Every draw call carries its own style, so nothing
/// depends on state left behind by earlier calls.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgba8,
    /// Line width in logical pixels.
    pub width: f64,
    /// End caps.
    pub cap: LineCap,
    /// Corner joins.
    pub join: LineJoin,
    /// Optional glow underneath the stroke.
    pub shadow: Option<Shadow>,
}

impl StrokeStyle {
    /// Round-capped, round-joined stroke without a shadow.
    pub fn new(color: Rgba8, width: f64) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Round,
            join: LineJoin::Round,
            shadow: None,
        }
    }

    /// Same stroke with a shadow.
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

/// Complete description of one fill.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FillStyle {
    /// Fill color.
    pub color: Rgba8,
    /// Optional glow underneath the fill.
    pub shadow: Option<Shadow>,
}

impl FillStyle {
    /// Fill without a shadow.
    pub fn new(color: Rgba8) -> Self {
        Self {
            color,
            shadow: None,
        }
    }

    /// Same fill with a shadow.
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}
