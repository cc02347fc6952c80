//! Visual attributes applied when an object enters a state.

/// Background material of a panel or button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear RGBA color.
    pub color: [f32; 4],
    /// Opacity multiplier (0.0 to 1.0).
    pub opacity: f32,
}

impl Material {
    /// Fully opaque material.
    pub const fn solid(color: [f32; 4]) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    /// Material drawn with the given opacity.
    pub fn translucent(color: [f32; 4], opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::solid([1.0, 1.0, 1.0, 1.0])
    }
}

/// Partial attribute set registered for a state.
///
/// Only the properties that are `Some` are written when the state is
/// entered, so entering the same state twice leaves the object unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    /// Distance the element floats in front of its parent.
    pub offset: Option<f32>,
    /// Background material.
    pub background: Option<Material>,
    /// Visibility.
    pub visible: Option<bool>,
}

impl Attributes {
    /// Empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the offset.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Builder: set the background material.
    pub fn with_background(mut self, material: Material) -> Self {
        self.background = Some(material);
        self
    }

    /// Builder: set visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Overwrite the named properties of `target`.
    pub fn apply_to(&self, target: &mut AppliedAttributes) {
        if let Some(offset) = self.offset {
            target.offset = offset;
        }
        if let Some(background) = self.background {
            target.background = background;
        }
        if let Some(visible) = self.visible {
            target.visible = visible;
        }
    }
}

/// Resolved attribute values an object currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedAttributes {
    /// Distance in front of the parent.
    pub offset: f32,
    /// Background material.
    pub background: Material,
    /// Visibility.
    pub visible: bool,
}

impl Default for AppliedAttributes {
    fn default() -> Self {
        Self {
            offset: 0.0,
            background: Material::default(),
            visible: true,
        }
    }
}
