// SPDX-License-Identifier: MIT
//
// hp-color color system — OKLCH-native perceptual color values.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Every color operation (lighten, darken, rotate hue, interpolate) happens
// in perceptual space, so derived tokens step evenly to human eyes rather
// than in raw RGB.
//
// Conversion pipeline:
//
//   OKLCH ↔ Oklab ↔ LMS ↔ Linear sRGB ↔ sRGB ↔ 8-bit RGB / hex / HSL
//
// The canonical state is (l, c, h, alpha). Every other representation is
// derived on first read and cached in a write-once cell.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::analysis::{self, PerceptualAnalysis};
use crate::error::ColorError;

/// Conventional chroma ceiling used by the validating constructors.
pub const MAX_CHROMA: f32 = 0.4;

/// Scale between OKLCH chroma and the coarse HCT chroma axis.
///
/// HCT chroma 100 corresponds to OKLCH chroma 0.4.
pub const HCT_CHROMA_SCALE: f32 = 250.0;

// ─── Derived representations ─────────────────────────────────────────────────

/// 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels normalized to 0.0–1.0.
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl From<Rgb8> for (u8, u8, u8) {
    fn from(rgb: Rgb8) -> Self {
        (rgb.r, rgb.g, rgb.b)
    }
}

/// HSL triple: hue in degrees, saturation and lightness in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Coarse hue/chroma/tone triple.
///
/// Tone is OKLCH lightness × 100 and chroma is OKLCH chroma ×
/// [`HCT_CHROMA_SCALE`]. It is a convenience axis for callers that think in
/// "tone 0–100" rather than a colorimetric CAM16 model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hct {
    pub hue: f32,
    pub chroma: f32,
    pub tone: f32,
}

/// How hue is interpolated around the color wheel.
///
/// Two hues always define two arcs. Each policy picks one of them before
/// the linear blend happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HueDirection {
    /// The arc of at most 180°.
    #[default]
    Shorter,
    /// The arc of at least 180°.
    Longer,
    /// Always travel with increasing hue angle.
    Increasing,
    /// Always travel with decreasing hue angle.
    Decreasing,
}

// ─── Cache ───────────────────────────────────────────────────────────────────

/// Write-once cells for derived representations.
///
/// Two threads racing to fill the same cell both compute the same value;
/// whichever lands first is kept. Nothing observable changes.
#[derive(Clone, Default)]
struct ColorCache {
    rgb8: OnceLock<Rgb8>,
    hsl: OnceLock<Hsl>,
    analysis: OnceLock<PerceptualAnalysis>,
}

impl ColorCache {
    const fn new() -> Self {
        Self {
            rgb8: OnceLock::new(),
            hsl: OnceLock::new(),
            analysis: OnceLock::new(),
        }
    }
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// A perceptual color stored in OKLCH space with alpha transparency.
///
/// The value is immutable: every transform returns a new `Color`.
/// Coordinates are clamped (lightness, chroma, alpha) or wrapped (hue) at
/// construction, so every `Color` satisfies `0 ≤ l ≤ 1`, `c ≥ 0` and
/// `0 ≤ h < 360`.
///
/// # Examples
///
/// ```
/// use hp_color::{Color, HueDirection};
///
/// let brand = Color::hex("#0EB58C").unwrap();
/// let hover = brand.lighten(0.05);
/// assert!(hover.lightness() > brand.lightness());
///
/// let sunset = Color::oklch(0.7, 0.15, 40.0);
/// let ramp = brand.gradient(&sunset, 5, HueDirection::Shorter);
/// assert_eq!(ramp.len(), 5);
/// ```
#[derive(Clone)]
pub struct Color {
    l: f32,
    c: f32,
    h: f32,
    alpha: f32,
    gamut_mapped: bool,
    cache: ColorCache,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from OKLCH values, clamping out-of-range input.
    ///
    /// - `l`: Lightness, clamped to 0.0–1.0
    /// - `c`: Chroma, floored at 0.0
    /// - `h`: Hue angle in degrees, wrapped into 0.0–360.0
    #[must_use]
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::oklcha(l, c, h, 1.0)
    }

    /// Create a color from OKLCH values with alpha, clamping out-of-range input.
    #[must_use]
    pub fn oklcha(l: f32, c: f32, h: f32, alpha: f32) -> Self {
        Self::from_parts(
            finite_or_zero(l).clamp(0.0, 1.0),
            finite_or_zero(c).max(0.0),
            normalize_hue(finite_or_zero(h)),
            finite_or_zero(alpha).clamp(0.0, 1.0),
            false,
        )
    }

    /// Create a color without clamping.
    ///
    /// Only for trusted internal constants whose coordinates are already in
    /// range. Nothing checks the invariants here.
    #[must_use]
    pub const fn oklch_unchecked(l: f32, c: f32, h: f32) -> Self {
        Self::oklcha_unchecked(l, c, h, 1.0)
    }

    /// Alpha variant of [`oklch_unchecked`](Self::oklch_unchecked).
    #[must_use]
    pub const fn oklcha_unchecked(l: f32, c: f32, h: f32, alpha: f32) -> Self {
        Self {
            l,
            c,
            h,
            alpha,
            gamut_mapped: false,
            cache: ColorCache::new(),
        }
    }

    /// Validating OKLCH constructor.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::NonFinite`] for NaN/infinite input and
    /// [`ColorError::OutOfRange`] when lightness, chroma, or alpha fall
    /// outside their accepted range. Hue is always wrapped.
    pub fn try_oklcha(l: f32, c: f32, h: f32, alpha: f32) -> Result<Self, ColorError> {
        check_range("lightness", l, 0.0, 1.0)?;
        check_range("chroma", c, 0.0, MAX_CHROMA)?;
        if !h.is_finite() {
            return Err(ColorError::NonFinite { channel: "hue" });
        }
        check_range("alpha", alpha, 0.0, 1.0)?;
        Ok(Self::oklcha(l, c, h, alpha))
    }

    /// Validating OKLCH constructor with full opacity.
    ///
    /// # Errors
    ///
    /// See [`try_oklcha`](Self::try_oklcha).
    pub fn try_oklch(l: f32, c: f32, h: f32) -> Result<Self, ColorError> {
        Self::try_oklcha(l, c, h, 1.0)
    }

    /// Create a color from sRGB values (0.0 to 1.0 range, clamped).
    #[must_use]
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        Self::srgba(r, g, b, 1.0)
    }

    /// Create a color from sRGB values with alpha.
    #[must_use]
    pub fn srgba(r: f32, g: f32, b: f32, alpha: f32) -> Self {
        let (l, c, h) = srgb_to_oklch(
            finite_or_zero(r).clamp(0.0, 1.0),
            finite_or_zero(g).clamp(0.0, 1.0),
            finite_or_zero(b).clamp(0.0, 1.0),
        );
        Self::oklcha(l, c, h, alpha)
    }

    /// Create a color from 8-bit sRGB values (0 to 255).
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    /// Create a color from 8-bit sRGB values with alpha.
    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::srgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Create a color from the coarse hue/chroma/tone triple (clamped).
    #[must_use]
    pub fn hct(hue: f32, chroma: f32, tone: f32) -> Self {
        Self::oklch(tone / 100.0, chroma / HCT_CHROMA_SCALE, hue)
    }

    /// Validating HCT constructor.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] when tone leaves 0–100 or chroma
    /// leaves 0–100, and [`ColorError::NonFinite`] for NaN/infinite hue.
    pub fn try_hct(hue: f32, chroma: f32, tone: f32) -> Result<Self, ColorError> {
        check_range("tone", tone, 0.0, 100.0)?;
        check_range("chroma", chroma, 0.0, MAX_CHROMA * HCT_CHROMA_SCALE)?;
        if !hue.is_finite() {
            return Err(ColorError::NonFinite { channel: "hue" });
        }
        Ok(Self::hct(hue, chroma, tone))
    }

    /// Create a color from a hex string.
    ///
    /// Supports: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (with or without `#`).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] if the string is not a valid hex color.
    pub fn hex(s: &str) -> Result<Self, ColorError> {
        parse_hex(s).ok_or_else(|| ColorError::InvalidHex(s.to_string()))
    }

    /// Create a pure gray color at the given lightness.
    ///
    /// Uses OKLCH lightness, so 0.5 is perceptual mid-gray (not sRGB 128).
    #[must_use]
    pub fn gray(lightness: f32) -> Self {
        Self::oklch(lightness, 0.0, 0.0)
    }

    /// Pure black.
    pub const BLACK: Self = Self::oklch_unchecked(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::oklch_unchecked(1.0, 0.0, 0.0);

    /// Fully transparent (invisible).
    pub const TRANSPARENT: Self = Self::oklcha_unchecked(0.0, 0.0, 0.0, 0.0);

    const fn from_parts(l: f32, c: f32, h: f32, alpha: f32, gamut_mapped: bool) -> Self {
        Self {
            l,
            c,
            h,
            alpha,
            gamut_mapped,
            cache: ColorCache::new(),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Lightness: 0.0 (black) to 1.0 (white).
    #[inline]
    #[must_use]
    pub const fn lightness(&self) -> f32 {
        self.l
    }

    /// Chroma (colorfulness): 0.0 (gray) upward, ~0.37 for the most vivid sRGB.
    #[inline]
    #[must_use]
    pub const fn chroma(&self) -> f32 {
        self.c
    }

    /// Hue angle in degrees, 0.0 to 360.0 (exclusive).
    #[inline]
    #[must_use]
    pub const fn hue(&self) -> f32 {
        self.h
    }

    /// Alpha (opacity): 0.0 (fully transparent) to 1.0 (fully opaque).
    #[inline]
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Whether [`to_gamut`](Self::to_gamut) had to reduce chroma for this value.
    #[inline]
    #[must_use]
    pub const fn is_gamut_mapped(&self) -> bool {
        self.gamut_mapped
    }

    /// Whether this color is fully opaque (alpha >= 1.0).
    #[inline]
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    /// Whether this color is achromatic (no visible chroma).
    #[inline]
    #[must_use]
    pub fn is_achromatic(&self) -> bool {
        self.c < 1e-5
    }

    // ─── Perceptual Operations ───────────────────────────────────────────
    //
    // These all work in OKLCH space and return new values.

    /// Increase lightness by `amount` (clamped to 0.0–1.0).
    #[must_use]
    pub fn lighten(&self, amount: f32) -> Self {
        self.with_lightness(self.l + amount)
    }

    /// Decrease lightness by `amount` (clamped to 0.0–1.0).
    #[must_use]
    pub fn darken(&self, amount: f32) -> Self {
        self.with_lightness(self.l - amount)
    }

    /// Set lightness to an absolute value (clamped to 0.0–1.0).
    #[must_use]
    pub fn with_lightness(&self, l: f32) -> Self {
        Self::oklcha(l, self.c, self.h, self.alpha)
    }

    /// Increase chroma (color intensity) by `amount`.
    #[must_use]
    pub fn saturate(&self, amount: f32) -> Self {
        self.with_chroma(self.c + amount)
    }

    /// Decrease chroma by `amount` (floored at 0.0).
    #[must_use]
    pub fn desaturate(&self, amount: f32) -> Self {
        self.with_chroma(self.c - amount)
    }

    /// Set chroma to an absolute value (floored at 0.0).
    #[must_use]
    pub fn with_chroma(&self, c: f32) -> Self {
        Self::oklcha(self.l, c, self.h, self.alpha)
    }

    /// Rotate the hue by `degrees` (wraps around 360°).
    #[must_use]
    pub fn rotate_hue(&self, degrees: f32) -> Self {
        self.with_hue(self.h + degrees)
    }

    /// Set hue to an absolute angle (normalized to 0°–360°).
    #[must_use]
    pub fn with_hue(&self, h: f32) -> Self {
        Self::oklcha(self.l, self.c, h, self.alpha)
    }

    /// Return a copy with the given alpha value (clamped to 0.0–1.0).
    #[must_use]
    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self::oklcha(self.l, self.c, self.h, alpha)
    }

    /// Get the complementary color (hue rotated 180°).
    #[must_use]
    pub fn complement(&self) -> Self {
        self.rotate_hue(180.0)
    }

    /// Blend toward `target` in OKLCH space.
    ///
    /// `t` = 0.0 returns `self`, `t` = 1.0 returns `target`. The hue arc is
    /// chosen by `direction`. An achromatic endpoint adopts the other
    /// endpoint's hue so grays don't drag the blend through red.
    #[must_use]
    pub fn interpolate(&self, target: &Self, t: f32, direction: HueDirection) -> Self {
        let t = finite_or_zero(t).clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        let h = match (self.is_achromatic(), target.is_achromatic()) {
            (true, true) => self.h,
            (true, false) => target.h,
            (false, true) => self.h,
            (false, false) => interpolate_hue(self.h, target.h, t, direction),
        };

        Self::oklcha(
            self.l.mul_add(inv_t, target.l * t),
            self.c.mul_add(inv_t, target.c * t),
            h,
            self.alpha.mul_add(inv_t, target.alpha * t),
        )
    }

    /// Evenly spaced colors from `self` to `target`, both endpoints included.
    ///
    /// Fewer than two steps is treated as two.
    #[must_use]
    pub fn gradient(&self, target: &Self, steps: usize, direction: HueDirection) -> Vec<Self> {
        let steps = steps.max(2);
        let last = (steps - 1) as f32;
        (0..steps)
            .map(|i| self.interpolate(target, i as f32 / last, direction))
            .collect()
    }

    /// Compute the perceptual distance to another color.
    ///
    /// Euclidean distance in Oklab (Delta E). Values below ~0.02 are
    /// generally imperceptible.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        let (l1, a1, b1) = oklch_to_oklab(self.l, self.c, self.h);
        let (l2, a2, b2) = oklch_to_oklab(other.l, other.c, other.h);
        let dl = l1 - l2;
        let da = a1 - a2;
        let db = b1 - b2;
        db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
    }

    // ─── Gamut ───────────────────────────────────────────────────────────

    /// Whether this color is within the sRGB gamut.
    #[must_use]
    pub fn in_srgb_gamut(&self) -> bool {
        const EPS: f32 = 1e-4;
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        let ok = |v: f32| (-EPS..=1.0 + EPS).contains(&v);
        ok(r) && ok(g) && ok(b)
    }

    /// Reduce chroma until this color fits within the sRGB gamut.
    ///
    /// Binary search on chroma, preserving hue and lightness. The returned
    /// color reports [`is_gamut_mapped`](Self::is_gamut_mapped) when chroma
    /// had to change.
    #[must_use]
    pub fn to_gamut(&self) -> Self {
        if self.in_srgb_gamut() {
            return self.clone();
        }

        let mut lo: f32 = 0.0;
        let mut hi: f32 = self.c;

        for _ in 0..20 {
            let mid = (lo + hi) * 0.5;
            if Self::oklch_unchecked(self.l, mid, self.h).in_srgb_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Self::from_parts(self.l, lo, self.h, self.alpha, true)
    }

    // ─── Derived representations ─────────────────────────────────────────

    /// Convert to sRGB with gamut clamping (values in 0.0–1.0).
    #[must_use]
    pub fn to_srgb(&self) -> (f32, f32, f32) {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Convert to 8-bit sRGB with gamut clamping. Cached per instance.
    #[must_use]
    pub fn to_rgb8(&self) -> Rgb8 {
        *self.cache.rgb8.get_or_init(|| {
            let (r, g, b) = self.to_srgb();
            Rgb8::new(to_u8(r), to_u8(g), to_u8(b))
        })
    }

    /// Convert to 8-bit sRGBA with gamut clamping.
    #[must_use]
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let Rgb8 { r, g, b } = self.to_rgb8();
        (r, g, b, to_u8(self.alpha))
    }

    /// Convert to hex string (`#rrggbb`, or `#rrggbbaa` if alpha < 1.0).
    #[must_use]
    pub fn to_hex(&self) -> String {
        let Rgb8 { r, g, b } = self.to_rgb8();
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            let a = to_u8(self.alpha);
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// HSL view of the 8-bit sRGB value. Cached per instance.
    #[must_use]
    pub fn to_hsl(&self) -> Hsl {
        *self.cache.hsl.get_or_init(|| rgb8_to_hsl(self.to_rgb8()))
    }

    /// Coarse hue/chroma/tone view.
    #[must_use]
    pub fn to_hct(&self) -> Hct {
        Hct {
            hue: self.h,
            chroma: self.c * HCT_CHROMA_SCALE,
            tone: self.l * 100.0,
        }
    }

    /// Warmth, brightness, saturation and content polarity. Cached per instance.
    #[must_use]
    pub fn analysis(&self) -> PerceptualAnalysis {
        *self
            .cache
            .analysis
            .get_or_init(|| analysis::analyze(self.l, self.c, self.h))
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "Color::oklch({:.4}, {:.4}, {:.1})", self.l, self.c, self.h)
        } else {
            write!(
                f,
                "Color::oklcha({:.4}, {:.4}, {:.1}, {:.2})",
                self.l, self.c, self.h, self.alpha
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        // Compare with small epsilon for floating point
        const EPS: f32 = 1e-5;
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.alpha - other.alpha).abs() < EPS
            && (self.is_achromatic() || other.is_achromatic() || hue_diff(self.h, other.h) < EPS)
    }
}

impl Default for Color {
    /// Default is fully opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::hex(s)
    }
}

impl From<Rgb8> for Color {
    fn from(rgb: Rgb8) -> Self {
        Self::rgb8(rgb.r, rgb.g, rgb.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::hex(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Color Space Conversion Functions ────────────────────────────────────────
//
// These implement the Oklab color space math created by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/
//
// Pipeline: OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

fn check_range(channel: &'static str, value: f32, min: f32, max: f32) -> Result<(), ColorError> {
    if !value.is_finite() {
        return Err(ColorError::NonFinite { channel });
    }
    if value < min || value > max {
        return Err(ColorError::OutOfRange {
            channel,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Normalize a hue angle to the range [0, 360).
#[inline]
pub(crate) fn normalize_hue(h: f32) -> f32 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

/// Absolute hue difference (shortest arc on the color wheel).
#[inline]
fn hue_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

/// Signed hue travel from `from` to `to` under the given direction.
fn hue_delta(from: f32, to: f32, direction: HueDirection) -> f32 {
    let d = to - from;
    match direction {
        HueDirection::Shorter => {
            if d > 180.0 {
                d - 360.0
            } else if d < -180.0 {
                d + 360.0
            } else {
                d
            }
        }
        HueDirection::Longer => {
            if d > 0.0 && d < 180.0 {
                d - 360.0
            } else if d < 0.0 && d > -180.0 {
                d + 360.0
            } else {
                d
            }
        }
        HueDirection::Increasing => {
            if d < 0.0 { d + 360.0 } else { d }
        }
        HueDirection::Decreasing => {
            if d > 0.0 { d - 360.0 } else { d }
        }
    }
}

#[inline]
fn interpolate_hue(h1: f32, h2: f32, t: f32, direction: HueDirection) -> f32 {
    normalize_hue(hue_delta(h1, h2, direction).mul_add(t, h1))
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

#[inline]
fn oklch_to_oklab_ab(c: f32, h: f32) -> (f32, f32) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

#[inline]
fn oklab_ab_to_oklch(a: f32, b: f32) -> (f32, f32) {
    let c = a.hypot(b);
    let h = if c < 1e-8 {
        0.0 // Achromatic: hue is undefined, default to 0
    } else {
        normalize_hue(b.atan2(a).to_degrees())
    };
    (c, h)
}

#[inline]
fn oklch_to_oklab(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    (l, a, b)
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// The conversion goes through an intermediate LMS (cone response) space.
// The matrices below are from Björn Ottosson's OKLab derivation.

#[inline]
fn oklab_to_linear_srgb(l_ok: f32, a: f32, b: f32) -> (f32, f32, f32) {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_76f32.mul_add(b, 0.396_337_78f32.mul_add(a, l_ok));
    let m_ = 0.063_854_17f32.mul_add(-b, 0.105_561_346f32.mul_add(-a, l_ok));
    let s_ = 1.291_485_5f32.mul_add(-b, 0.089_484_18f32.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_94f32.mul_add(s, 4.076_741_7f32.mul_add(l, -(3.307_711_6 * m)));
    let g = 0.341_319_38f32.mul_add(-s, (-1.268_438f32).mul_add(l, 2.609_757_4 * m));
    let bl = 1.707_614_7f32.mul_add(s, (-0.004_196_086_3f32).mul_add(l, -(0.703_418_6 * m)));

    (r, g, bl)
}

#[inline]
fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    // Linear sRGB → LMS
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g));
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g));
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g));

    // Cube root (LMS → Oklab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    // Oklab intermediate → Oklab
    let l_ok = 0.004_072_047f32.mul_add(-s_, 0.210_454_26f32.mul_add(l_, 0.793_617_8 * m_));
    let a = 0.450_593_7f32.mul_add(s_, 1.977_998_5f32.mul_add(l_, -(2.428_592_2 * m_)));
    let b_ok = 0.808_675_77f32.mul_add(-s_, 0.025_904_037f32.mul_add(l_, 0.782_771_77 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

fn srgb_to_oklch(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let (l, a, b_ok) = linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    let (c, h) = oklab_ab_to_oklch(a, b_ok);
    (l, c, h)
}

/// OKLCH → sRGB (0.0–1.0, may be out of gamut).
fn oklch_to_srgb(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

fn rgb8_to_hsl(rgb: Rgb8) -> Hsl {
    let (r, g, b) = rgb.to_unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta < 1e-12 {
        return Hsl { h: 0.0, s: 0.0, l: l as f32 };
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if (max - r).abs() < 1e-12 {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < 1e-12 {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl {
        h: normalize_hue((h * 60.0) as f32),
        s: s as f32,
        l: l as f32,
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RGBA
        4 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            let a = parse_hex_digit(bytes[3])?;
            Some(Color::rgba8(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::rgb8(r, g, b))
        }
        // #RRGGBBAA
        8 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            let a = parse_hex_byte(&bytes[6..8])?;
            Some(Color::rgba8(r, g, b, a))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
