//! Live viewer parameters and change detection.
//!
//! The external control panel mutates a live [`Params`] snapshot; once per
//! frame the viewer diffs it against the committed copy and pushes only the
//! changed fields to the GPU. The diff itself is pure so it can be tested
//! without a backend.

use glam::Vec4;
use pyre_config::ViewerConfig;

/// A value-equality snapshot of every user-tunable parameter.
///
/// Colors are stored as the control panel's 8-bit RGB triples and compared
/// by value. Replacing a color with an equal one is not a change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub tessellations: u32,
    pub inner_color: [u8; 3],
    pub outer_color: [u8; 3],
    pub radial_bias: f32,
    pub radial_gain: f32,
    pub color_bias: f32,
    pub color_gain: f32,
}

/// One parameter that changed between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Tessellations,
    InnerColor,
    OuterColor,
    RadialBias,
    RadialGain,
    ColorBias,
    ColorGain,
}

impl Params {
    /// The fields whose values differ between `old` and `new`, in a fixed
    /// order. Pure; pushing the changes is the caller's step.
    pub fn diff(old: &Params, new: &Params) -> Vec<ParamField> {
        let mut changed = Vec::new();
        if old.tessellations != new.tessellations {
            changed.push(ParamField::Tessellations);
        }
        if old.inner_color != new.inner_color {
            changed.push(ParamField::InnerColor);
        }
        if old.outer_color != new.outer_color {
            changed.push(ParamField::OuterColor);
        }
        if old.radial_bias != new.radial_bias {
            changed.push(ParamField::RadialBias);
        }
        if old.radial_gain != new.radial_gain {
            changed.push(ParamField::RadialGain);
        }
        if old.color_bias != new.color_bias {
            changed.push(ParamField::ColorBias);
        }
        if old.color_gain != new.color_gain {
            changed.push(ParamField::ColorGain);
        }
        changed
    }

    /// Inner color as normalized RGBA, alpha 1.
    pub fn inner_color_vec4(&self) -> Vec4 {
        rgb_to_vec4(self.inner_color)
    }

    /// Outer color as normalized RGBA, alpha 1.
    pub fn outer_color_vec4(&self) -> Vec4 {
        rgb_to_vec4(self.outer_color)
    }
}

impl From<&ViewerConfig> for Params {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            tessellations: config.tessellations,
            inner_color: config.inner_color,
            outer_color: config.outer_color,
            radial_bias: config.radial_bias,
            radial_gain: config.radial_gain,
            color_bias: config.color_bias,
            color_gain: config.color_gain,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::from(&ViewerConfig::default())
    }
}

fn rgb_to_vec4(rgb: [u8; 3]) -> Vec4 {
    Vec4::new(
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        1.0,
    )
}

/// Commands dispatched by the external control panel, handled between
/// frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Rebuild the scene geometry from the current parameters.
    LoadScene,
    /// Restore every parameter to its default value.
    Reset,
}
