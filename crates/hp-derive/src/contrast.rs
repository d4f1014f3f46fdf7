// SPDX-License-Identifier: MIT

//! Contrast measurement: WCAG 2.x ratios and a signed perceptual
//! lightness-contrast metric (Lc).
//!
//! Both metrics read the 8-bit sRGB value of each color, so whatever the
//! OKLCH coordinates are, two colors that render identically measure
//! identically. Alpha is ignored; composite translucent colors over their
//! backdrop first.
//!
//! WCAG is symmetric and bounded to [1, 21]. Lc is signed by polarity:
//! positive for dark text on a lighter background, negative for light text
//! on a darker one, bounded to roughly ±114.

use hp_color::{Color, Rgb8};
use serde::{Deserialize, Serialize};

// ─── Constants ───────────────────────────────────────────────────────────────

const WCAG_LINEAR_THRESHOLD: f64 = 0.039_28;
const GAMMA: f64 = 2.4;
const WEIGHTS: (f64, f64, f64) = (0.2126, 0.7152, 0.0722);

const BG_EXPONENT: f64 = 0.56;
const FG_EXPONENT: f64 = 0.57;
const LC_SCALE: f64 = 1.14;

/// Ties in `suggest_text_color` are resolved by preference within this.
const TIE_EPSILON: f64 = 1e-9;

// ─── Luminance ───────────────────────────────────────────────────────────────

/// WCAG relative luminance in [0, 1].
#[must_use]
pub fn wcag_luminance(rgb: Rgb8) -> f64 {
    let linear = |v: f64| {
        if v <= WCAG_LINEAR_THRESHOLD {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(GAMMA)
        }
    };
    let (r, g, b) = rgb.to_unit();
    WEIGHTS.0.mul_add(linear(r), WEIGHTS.1.mul_add(linear(g), WEIGHTS.2 * linear(b)))
}

/// Simplified screen luminance for the perceptual metric: a plain 2.4
/// power curve with no linear segment.
#[must_use]
pub fn perceptual_luminance(rgb: Rgb8) -> f64 {
    let (r, g, b) = rgb.to_unit();
    WEIGHTS
        .0
        .mul_add(r.powf(GAMMA), WEIGHTS.1.mul_add(g.powf(GAMMA), WEIGHTS.2 * b.powf(GAMMA)))
}

// ─── Metrics ─────────────────────────────────────────────────────────────────

/// WCAG contrast ratio in [1, 21]. Argument order does not matter.
#[must_use]
pub fn wcag_ratio(a: &Color, b: &Color) -> f64 {
    let la = wcag_luminance(a.to_rgb8());
    let lb = wcag_luminance(b.to_rgb8());
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Signed perceptual contrast of `foreground` text on `background`.
///
/// Black on white is `+114`, white on black is `-114`.
#[must_use]
pub fn perceptual_contrast(foreground: &Color, background: &Color) -> f64 {
    let y_fg = perceptual_luminance(foreground.to_rgb8());
    let y_bg = perceptual_luminance(background.to_rgb8());
    let raw = (y_bg.powf(BG_EXPONENT) - y_fg.powf(FG_EXPONENT)) * LC_SCALE;
    let sign = if y_bg >= y_fg { 1.0 } else { -1.0 };
    sign * raw.abs() * 100.0
}

// ─── Levels ──────────────────────────────────────────────────────────────────

/// WCAG conformance tier reached by a ratio. Ordered weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WcagLevel {
    Fail,
    /// 3:1, large text only.
    AaLarge,
    Aa,
    Aaa,
}

impl WcagLevel {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            Self::Aaa
        } else if ratio >= 4.5 {
            Self::Aa
        } else if ratio >= 3.0 {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    /// Ratio needed to reach this tier.
    #[must_use]
    pub const fn min_ratio(self) -> f64 {
        match self {
            Self::Fail => 1.0,
            Self::AaLarge => 3.0,
            Self::Aa => 4.5,
            Self::Aaa => 7.0,
        }
    }
}

/// Usage tier reached by |Lc|. Ordered weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerceptualLevel {
    Fail,
    /// Non-text decoration (≥ 15).
    Minimal,
    /// Headlines and large text (≥ 45).
    Heading,
    /// Content text (≥ 60).
    Content,
    /// Body text (≥ 75).
    Body,
    /// Preferred for long-form reading (≥ 90).
    Fluent,
}

impl PerceptualLevel {
    /// Classify a signed Lc by magnitude.
    #[must_use]
    pub fn from_lc(lc: f64) -> Self {
        let lc = lc.abs();
        if lc >= 90.0 {
            Self::Fluent
        } else if lc >= 75.0 {
            Self::Body
        } else if lc >= 60.0 {
            Self::Content
        } else if lc >= 45.0 {
            Self::Heading
        } else if lc >= 15.0 {
            Self::Minimal
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn min_lc(self) -> f64 {
        match self {
            Self::Fail => 0.0,
            Self::Minimal => 15.0,
            Self::Heading => 45.0,
            Self::Content => 60.0,
            Self::Body => 75.0,
            Self::Fluent => 90.0,
        }
    }
}

/// Both metrics for one foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastReport {
    pub wcag_ratio: f64,
    pub wcag_level: WcagLevel,
    pub perceptual: f64,
    pub perceptual_level: PerceptualLevel,
}

#[must_use]
pub fn measure(foreground: &Color, background: &Color) -> ContrastReport {
    let wcag_ratio = wcag_ratio(foreground, background);
    let perceptual = perceptual_contrast(foreground, background);
    ContrastReport {
        wcag_ratio,
        wcag_level: WcagLevel::from_ratio(wcag_ratio),
        perceptual,
        perceptual_level: PerceptualLevel::from_lc(perceptual),
    }
}

/// Whether a pair reaches `tier` and has at least `perceptual_floor` |Lc|.
#[must_use]
pub fn meets_minimum(foreground: &Color, background: &Color, tier: WcagLevel, perceptual_floor: f64) -> bool {
    let report = measure(foreground, background);
    report.wcag_level >= tier && report.perceptual.abs() >= perceptual_floor
}

/// Minimum contrast requirements used when none are given explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContrastConfig {
    pub minimum_wcag: WcagLevel,
    /// Minimum |Lc|.
    pub perceptual_floor: f64,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            minimum_wcag: WcagLevel::Aa,
            perceptual_floor: PerceptualLevel::Content.min_lc(),
        }
    }
}

impl ContrastConfig {
    #[must_use]
    pub fn is_met(&self, foreground: &Color, background: &Color) -> bool {
        meets_minimum(foreground, background, self.minimum_wcag, self.perceptual_floor)
    }
}

// ─── Text color selection ────────────────────────────────────────────────────

/// Which text color wins when white and black score the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextPreference {
    #[default]
    Light,
    Dark,
}

/// White or black, whichever has the larger |Lc| on `background`.
#[must_use]
pub fn suggest_text_color(background: &Color, prefer: TextPreference) -> Color {
    let white = perceptual_contrast(&Color::WHITE, background).abs();
    let black = perceptual_contrast(&Color::BLACK, background).abs();
    if (white - black).abs() <= TIE_EPSILON {
        return match prefer {
            TextPreference::Light => Color::WHITE,
            TextPreference::Dark => Color::BLACK,
        };
    }
    if white > black { Color::WHITE } else { Color::BLACK }
}

/// Move `fg`'s OKLCH lightness until it reaches `min_ratio` against `bg`.
///
/// `prefer_lighter` searches upward from the current lightness, otherwise
/// downward. The search keeps the candidate closest to the original that
/// passes, so a readable `fg` comes back unchanged apart from gamut mapping.
/// If no lightness in that direction passes, the extreme is returned.
#[must_use]
pub fn ensure_readability(fg: &Color, bg: &Color, min_ratio: f64, prefer_lighter: bool) -> Color {
    if wcag_ratio(fg, bg) >= min_ratio {
        return fg.to_gamut();
    }

    let (mut lo, mut hi) = if prefer_lighter {
        (fg.lightness(), 1.0)
    } else {
        (0.0, fg.lightness())
    };

    let extreme = if prefer_lighter { 1.0 } else { 0.0 };
    let mut best = Color::oklcha(extreme, fg.chroma(), fg.hue(), fg.alpha()).to_gamut();
    for _ in 0..32 {
        let mid = (lo + hi) * 0.5;
        let candidate = Color::oklcha(mid, fg.chroma(), fg.hue(), fg.alpha()).to_gamut();
        if wcag_ratio(&candidate, bg) >= min_ratio {
            best = candidate;
            if prefer_lighter {
                hi = mid;
            } else {
                lo = mid;
            }
        } else if prefer_lighter {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Luminance ──

    #[test]
    fn luminance_endpoints() {
        assert!(approx_eq(wcag_luminance(Rgb8::new(0, 0, 0)), 0.0, 1e-12));
        assert!(approx_eq(wcag_luminance(Rgb8::new(255, 255, 255)), 1.0, 1e-12));
        assert!(approx_eq(wcag_luminance(Rgb8::new(255, 0, 0)), 0.2126, 1e-9));
        assert!(approx_eq(perceptual_luminance(Rgb8::new(0, 255, 0)), 0.7152, 1e-9));
    }

    #[test]
    fn linear_segment_below_threshold() {
        // 10/255 ≈ 0.0392 sits just under the breakpoint.
        let lum = wcag_luminance(Rgb8::new(10, 10, 10));
        assert!(approx_eq(lum, (10.0 / 255.0) / 12.92, 1e-12));
    }

    // ── WCAG ──

    #[test]
    fn black_white_is_21() {
        let ratio = wcag_ratio(&Color::BLACK, &Color::WHITE);
        assert!(approx_eq(ratio, 21.0, 1e-9), "ratio: {ratio}");
        assert_eq!(WcagLevel::from_ratio(ratio), WcagLevel::Aaa);
    }

    #[test]
    fn wcag_is_symmetric() {
        let a = Color::oklch(0.55, 0.12, 40.0);
        let b = Color::oklch(0.92, 0.03, 200.0);
        assert!(approx_eq(wcag_ratio(&a, &b), wcag_ratio(&b, &a), 1e-12));
        assert!(approx_eq(wcag_ratio(&a, &a), 1.0, 1e-12));
    }

    #[test]
    fn wcag_level_boundaries() {
        assert_eq!(WcagLevel::from_ratio(2.99), WcagLevel::Fail);
        assert_eq!(WcagLevel::from_ratio(3.0), WcagLevel::AaLarge);
        assert_eq!(WcagLevel::from_ratio(4.5), WcagLevel::Aa);
        assert_eq!(WcagLevel::from_ratio(7.0), WcagLevel::Aaa);
        assert!(WcagLevel::Aa > WcagLevel::AaLarge);
    }

    // ── Perceptual ──

    #[test]
    fn perceptual_polarity_and_magnitude() {
        let dark_on_light = perceptual_contrast(&Color::BLACK, &Color::WHITE);
        let light_on_dark = perceptual_contrast(&Color::WHITE, &Color::BLACK);
        assert!(approx_eq(dark_on_light, 114.0, 1e-6), "{dark_on_light}");
        assert!(approx_eq(light_on_dark, -114.0, 1e-6), "{light_on_dark}");
    }

    #[test]
    fn identical_colors_have_near_zero_lc() {
        let c = Color::oklch(0.6, 0.1, 120.0);
        assert!(perceptual_contrast(&c, &c).abs() < 2.0);
    }

    #[test]
    fn perceptual_level_uses_magnitude() {
        assert_eq!(PerceptualLevel::from_lc(-80.0), PerceptualLevel::Body);
        assert_eq!(PerceptualLevel::from_lc(59.9), PerceptualLevel::Heading);
        assert_eq!(PerceptualLevel::from_lc(14.0), PerceptualLevel::Fail);
        assert_eq!(PerceptualLevel::from_lc(114.0), PerceptualLevel::Fluent);
    }

    #[test]
    fn measure_and_minimum() {
        let report = measure(&Color::BLACK, &Color::WHITE);
        assert_eq!(report.wcag_level, WcagLevel::Aaa);
        assert_eq!(report.perceptual_level, PerceptualLevel::Fluent);
        assert!(meets_minimum(&Color::BLACK, &Color::WHITE, WcagLevel::Aaa, 90.0));

        let gray = Color::gray(0.75);
        assert!(!meets_minimum(&gray, &Color::WHITE, WcagLevel::Aa, 60.0));
        assert!(ContrastConfig::default().is_met(&Color::BLACK, &Color::WHITE));
    }

    // ── Text color ──

    #[test]
    fn suggests_readable_text() {
        assert_eq!(suggest_text_color(&Color::gray(0.15), TextPreference::Dark), Color::WHITE);
        assert_eq!(suggest_text_color(&Color::gray(0.95), TextPreference::Light), Color::BLACK);
    }

    #[test]
    fn ensure_readability_darkens_on_white() {
        let pale = Color::oklch(0.85, 0.08, 250.0);
        let fixed = ensure_readability(&pale, &Color::WHITE, 4.5, false);
        assert!(wcag_ratio(&fixed, &Color::WHITE) >= 4.5);
        assert!(fixed.lightness() < pale.lightness());
    }

    #[test]
    fn ensure_readability_keeps_readable_color() {
        let ink = Color::oklch(0.25, 0.05, 250.0);
        let kept = ensure_readability(&ink, &Color::WHITE, 4.5, false);
        assert!((kept.lightness() - ink.lightness()).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn wcag_ratio_bounded(l1 in 0.0f32..=1.0, l2 in 0.0f32..=1.0, h in 0.0f32..360.0) {
            let a = Color::oklch(l1, 0.05, h);
            let b = Color::oklch(l2, 0.05, h);
            let ratio = wcag_ratio(&a, &b);
            prop_assert!((1.0..=21.0 + 1e-9).contains(&ratio));
        }

        #[test]
        fn lc_sign_follows_polarity(l1 in 0.0f32..=1.0, l2 in 0.0f32..=1.0) {
            let fg = Color::gray(l1);
            let bg = Color::gray(l2);
            let lc = perceptual_contrast(&fg, &bg);
            let y_fg = perceptual_luminance(fg.to_rgb8());
            let y_bg = perceptual_luminance(bg.to_rgb8());
            if y_bg > y_fg {
                prop_assert!(lc >= 0.0);
            } else if y_bg < y_fg {
                prop_assert!(lc <= 0.0);
            }
        }
    }
}
