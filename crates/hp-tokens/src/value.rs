// SPDX-License-Identifier: MIT

//! Typed token values: a closed set of design primitives.

use std::collections::BTreeMap;
use std::fmt;

use hp_color::Color;
use serde::{Deserialize, Serialize};

/// Discriminant of a [`TokenValue`], used for type checks and `$type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Color,
    Dimension,
    Shadow,
    Gradient,
    Composite,
}

impl TokenKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::Shadow => "shadow",
            Self::Gradient => "gradient",
            Self::Composite => "composite",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value carried by a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum TokenValue {
    Color(Color),
    Dimension(Dimension),
    /// Layered shadows, painted first to last.
    Shadow(Vec<Shadow>),
    Gradient(Gradient),
    /// Named sub-values, e.g. a variant's background/text/border trio.
    Composite(BTreeMap<String, TokenValue>),
}

impl TokenValue {
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Color(_) => TokenKind::Color,
            Self::Dimension(_) => TokenKind::Dimension,
            Self::Shadow(_) => TokenKind::Shadow,
            Self::Gradient(_) => TokenKind::Gradient,
            Self::Composite(_) => TokenKind::Composite,
        }
    }

    #[must_use]
    pub const fn as_color(&self) -> Option<&Color> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }

    /// CSS text for this value.
    ///
    /// Composites have no single CSS form; they render as `key: value`
    /// pairs separated by `; `. Exporters flatten them instead.
    #[must_use]
    pub fn css_value(&self) -> String {
        match self {
            Self::Color(c) => c.to_hex(),
            Self::Dimension(d) => d.to_string(),
            Self::Shadow(layers) => {
                if layers.is_empty() {
                    "none".to_string()
                } else {
                    layers.iter().map(Shadow::css).collect::<Vec<_>>().join(", ")
                }
            }
            Self::Gradient(g) => g.css(),
            Self::Composite(parts) => parts
                .iter()
                .map(|(k, v)| format!("{k}: {}", v.css_value()))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

impl From<Color> for TokenValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

// ─── Dimension ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    Px,
    Rem,
    Em,
    Percent,
}

impl DimensionUnit {
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Rem => "rem",
            Self::Em => "em",
            Self::Percent => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub value: f32,
    pub unit: DimensionUnit,
}

impl Dimension {
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self { value, unit: DimensionUnit::Px }
    }

    #[must_use]
    pub const fn rem(value: f32) -> Self {
        Self { value, unit: DimensionUnit::Rem }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit.suffix())
    }
}

// ─── Shadow ──────────────────────────────────────────────────────────────────

/// One shadow layer. Offsets, blur and spread are in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
    #[serde(default)]
    pub inset: bool,
}

impl Shadow {
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "{}{}px {}px {}px {}px {}",
            if self.inset { "inset " } else { "" },
            format_number(self.offset_x),
            format_number(self.offset_y),
            format_number(self.blur),
            format_number(self.spread),
            self.color.to_hex()
        )
    }
}

// ─── Gradient ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum GradientKind {
    Linear { angle: f32 },
    Radial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Color,
    /// 0.0–1.0 along the gradient line.
    pub position: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Evenly spaced linear gradient through `colors`.
    #[must_use]
    pub fn linear(angle: f32, colors: &[Color]) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f32;
        Self {
            kind: GradientKind::Linear { angle },
            stops: colors
                .iter()
                .enumerate()
                .map(|(i, c)| GradientStop {
                    color: c.clone(),
                    position: i as f32 / last,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn css(&self) -> String {
        let stops = self
            .stops
            .iter()
            .map(|s| format!("{} {}%", s.color.to_hex(), format_number(s.position * 100.0)))
            .collect::<Vec<_>>()
            .join(", ");
        match self.kind {
            GradientKind::Linear { angle } => {
                format!("linear-gradient({}deg, {stops})", format_number(angle))
            }
            GradientKind::Radial => format!("radial-gradient(circle, {stops})"),
        }
    }
}

/// Up to three decimals, trailing zeros trimmed (`1.5`, `4`, `0.125`).
pub(crate) fn format_number(v: f32) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
