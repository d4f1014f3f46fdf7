// SPDX-License-Identifier: MIT

//! Named policy sets ready to evaluate against.

use hp_tokens::SemVer;

use crate::condition::{ColorCondition, Condition, ThemeCondition, TokenCondition};
use crate::policy::{Enforcement, Policy, PolicyCategory, PolicyScope, Rule, Severity};
use crate::set::PolicySet;

/// Lowercase dotted segments, hyphens allowed inside a segment.
pub const TOKEN_NAME_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*(?:\.[a-z0-9]+(?:-[a-z0-9]+)*)*$";

/// Look up a builtin policy set by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn policy_set(name: &str) -> Option<PolicySet> {
    let set = PolicySet::new(name, SemVer::new(1, 0, 0));
    Some(match name {
        "wcag-aa" => set.with_policy(wcag_aa()?).with_policy(large_text()?),
        "wcag-aaa" => set.with_policy(wcag_aaa()?).with_policy(perceptual_body()?),
        "enterprise" => set
            .with_policy(wcag_aa()?)
            .with_policy(large_text()?)
            .with_policy(perceptual_body()?)
            .with_policy(naming()?)
            .with_policy(no_deprecated()?)
            .with_policy(theme_coverage()?)
            .with_policy(chroma_ceiling()?),
        _ => return None,
    })
}

/// List all builtin policy set names.
#[must_use]
pub const fn names() -> &'static [&'static str] {
    &["wcag-aa", "wcag-aaa", "enterprise"]
}

fn wcag_aa() -> Option<Policy> {
    Policy::builder("wcag-aa-contrast")
        .name("WCAG AA contrast")
        .description("Body text reaches a 4.5:1 contrast ratio")
        .category(PolicyCategory::Accessibility)
        .scope(PolicyScope::Accessibility)
        .enforcement(Enforcement::Required)
        .severity(Severity::Critical)
        .tag("wcag")
        .rule(
            Rule::new("ratio-4.5", Condition::wcag_ratio(4.5), "contrast ratio is below 4.5:1")
                .with_suggestion("darken the text or lighten the background")
                .auto_fixable(),
        )
        .build()
        .ok()
}

fn large_text() -> Option<Policy> {
    Policy::builder("wcag-aa-large-text")
        .name("WCAG AA large text")
        .description("Large text and UI glyphs reach a 3:1 contrast ratio")
        .category(PolicyCategory::Accessibility)
        .scope(PolicyScope::Accessibility)
        .enforcement(Enforcement::Required)
        .severity(Severity::High)
        .tag("wcag")
        .rule(Rule::new("ratio-3", Condition::wcag_ratio(3.0), "contrast ratio is below 3:1").auto_fixable())
        .build()
        .ok()
}

fn wcag_aaa() -> Option<Policy> {
    Policy::builder("wcag-aaa-contrast")
        .name("WCAG AAA contrast")
        .description("Body text reaches a 7:1 contrast ratio")
        .category(PolicyCategory::Accessibility)
        .scope(PolicyScope::Accessibility)
        .enforcement(Enforcement::Required)
        .severity(Severity::Critical)
        .tag("wcag")
        .rule(
            Rule::new("ratio-7", Condition::wcag_ratio(7.0), "contrast ratio is below 7:1")
                .with_suggestion("move text and background further apart in lightness")
                .auto_fixable(),
        )
        .build()
        .ok()
}

fn perceptual_body() -> Option<Policy> {
    Policy::builder("perceptual-body")
        .name("Perceptual body contrast")
        .description("Body text reaches |Lc| 75")
        .category(PolicyCategory::Accessibility)
        .scope(PolicyScope::Accessibility)
        .enforcement(Enforcement::Recommended)
        .severity(Severity::High)
        .rule(Rule::new("lc-75", Condition::perceptual(75.0), "perceptual contrast is below Lc 75").auto_fixable())
        .build()
        .ok()
}

fn naming() -> Option<Policy> {
    Policy::builder("token-naming")
        .name("Token naming")
        .description("Token names are lowercase, dot-separated and hyphenated")
        .category(PolicyCategory::Naming)
        .scope(PolicyScope::Token)
        .enforcement(Enforcement::Recommended)
        .severity(Severity::Medium)
        .rule(
            Rule::new(
                "lowercase-dotted",
                Condition::name_pattern(TOKEN_NAME_PATTERN).ok()?,
                "token name is not lowercase dotted form",
            )
            .with_suggestion("rename to lowercase segments like `button.primary.hover`"),
        )
        .build()
        .ok()
}

fn no_deprecated() -> Option<Policy> {
    Policy::builder("no-deprecated")
        .name("No deprecated tokens")
        .description("Collections do not ship deprecated tokens")
        .category(PolicyCategory::Consistency)
        .scope(PolicyScope::Token)
        .enforcement(Enforcement::Recommended)
        .severity(Severity::Low)
        .rule(
            Rule::new(
                "none-deprecated",
                Condition::Token(TokenCondition::NoDeprecated),
                "collection contains deprecated tokens",
            )
            .auto_fixable(),
        )
        .build()
        .ok()
}

fn theme_coverage() -> Option<Policy> {
    Policy::builder("theme-modes")
        .name("Light and dark modes")
        .description("Themes provide both light and dark role tokens")
        .category(PolicyCategory::Theme)
        .scope(PolicyScope::Theme)
        .enforcement(Enforcement::Optional)
        .severity(Severity::Medium)
        .rule(Rule::new(
            "both-modes",
            Condition::Theme(ThemeCondition {
                require_light: true,
                require_dark: true,
            }),
            "theme is missing a light or dark mode",
        ))
        .build()
        .ok()
}

fn chroma_ceiling() -> Option<Policy> {
    Policy::builder("chroma-ceiling")
        .name("Chroma ceiling")
        .description("Brand colors stay below OKLCH chroma 0.37")
        .category(PolicyCategory::Color)
        .scope(PolicyScope::Global)
        .enforcement(Enforcement::Optional)
        .severity(Severity::Low)
        .rule(Rule::new(
            "max-chroma",
            Condition::Color(ColorCondition {
                max_chroma: Some(0.37),
                ..ColorCondition::default()
            }),
            "color is more saturated than most displays can show",
        ))
        .build()
        .ok()
}
