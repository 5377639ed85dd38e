//! Portrayal Descriptors
//!
//! The structured descriptor the external rendering layer draws from.
//! Colors come from the same classification the statistics use, so the
//! two can never disagree.

use serde::Serialize;

use crate::components::person::{PersonView, WealthClass};

// Matplotlib tab10 palette
pub const RICH_COLOR: &str = "#2ca02c";
pub const POOR_COLOR: &str = "#d62728";
pub const MID_COLOR: &str = "#1f77b4";

/// Marker shapes the rendering layer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shape {
    Circle,
}

/// Structured rendering descriptor for one agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portrayal {
    pub shape: Shape,
    pub radius: f32,
    pub color: &'static str,
    pub layer: u32,
    pub filled: bool,
}

/// Capability interface for anything the rendering layer can draw
pub trait Renderable {
    fn portrayal(&self) -> Portrayal;
}

/// Fill color for a wealth class
pub fn class_color(class: WealthClass) -> &'static str {
    match class {
        WealthClass::Rich => RICH_COLOR,
        WealthClass::Poor => POOR_COLOR,
        WealthClass::Middle => MID_COLOR,
    }
}

impl Renderable for PersonView {
    fn portrayal(&self) -> Portrayal {
        Portrayal {
            shape: Shape::Circle,
            radius: 0.5,
            color: class_color(self.class),
            layer: 0,
            filled: true,
        }
    }
}
