// SPDX-License-Identifier: MIT

//! Rendering collections for consumers: CSS custom properties, SCSS
//! variables, W3C design-token JSON, and a flat name → value map.
//!
//! Composite values have no single textual form, so the CSS, SCSS and flat
//! outputs expand them into one entry per part (`button.solid` with a
//! `background` part becomes `button.solid.background`). The W3C document
//! keeps them nested.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::collection::TokenCollection;
use crate::error::TokenError;
use crate::token::Token;
use crate::value::{TokenValue, format_number};

/// Vendor key under `$extensions` in W3C output.
pub const EXTENSION_KEY: &str = "com.hueprint";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    CssCustomProperties,
    Scss,
    W3cJson,
    FlatMap,
}

impl FromStr for ExportFormat {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "css" | "css-custom-properties" => Ok(Self::CssCustomProperties),
            "scss" => Ok(Self::Scss),
            "w3c" | "json" | "w3c-json" => Ok(Self::W3cJson),
            "flat" | "flat-map" => Ok(Self::FlatMap),
            _ => Err(TokenError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Prepended to every variable name (`hp` → `--hp-brand-500`).
    pub prefix: String,
    /// Selector wrapping CSS custom properties.
    pub selector: String,
    /// Emit token descriptions as comments / `$description`.
    pub include_descriptions: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            selector: ":root".to_string(),
            include_descriptions: true,
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn variable(&self, dotted: &str) -> String {
        let name = dotted.replace('.', "-");
        if self.prefix.is_empty() {
            name
        } else {
            format!("{}-{name}", self.prefix)
        }
    }
}

/// Render `collection` in `format`.
#[must_use]
pub fn render(collection: &TokenCollection, format: ExportFormat, options: &ExportOptions) -> String {
    match format {
        ExportFormat::CssCustomProperties => render_css(collection, options),
        ExportFormat::Scss => render_scss(collection, options),
        ExportFormat::W3cJson => format!("{:#}", to_w3c_document(collection, options)),
        ExportFormat::FlatMap => {
            let map: Map<String, Value> = to_flat_map(collection)
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            format!("{:#}", Value::Object(map))
        }
    }
}

fn render_css(collection: &TokenCollection, options: &ExportOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {{", options.selector);
    for token in collection {
        if options.include_descriptions {
            if let Some(desc) = token.description() {
                let _ = writeln!(out, "  /* {} */", comment_safe(desc));
            }
        }
        for (name, value) in flatten(token) {
            let _ = writeln!(out, "  --{}: {value};", options.variable(&name));
        }
    }
    out.push_str("}\n");
    out
}

fn render_scss(collection: &TokenCollection, options: &ExportOptions) -> String {
    let mut out = String::new();
    for token in collection {
        if options.include_descriptions {
            if let Some(desc) = token.description() {
                let _ = writeln!(out, "// {}", desc.replace('\n', " "));
            }
        }
        for (name, value) in flatten(token) {
            let _ = writeln!(out, "${}: {value};", options.variable(&name));
        }
    }
    out
}

fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /").replace('\n', " ")
}

/// Dotted name → CSS value, with composites expanded.
#[must_use]
pub fn to_flat_map(collection: &TokenCollection) -> BTreeMap<String, String> {
    collection.iter().flat_map(flatten).collect()
}

fn flatten(token: &Token) -> Vec<(String, String)> {
    let mut out = Vec::new();
    flatten_value(token.name().as_str(), token.value(), &mut out);
    out
}

fn flatten_value(name: &str, value: &TokenValue, out: &mut Vec<(String, String)>) {
    match value {
        TokenValue::Composite(parts) => {
            for (key, part) in parts {
                flatten_value(&format!("{name}.{key}"), part, out);
            }
        }
        other => out.push((name.to_string(), other.css_value())),
    }
}

// ─── W3C design tokens ───────────────────────────────────────────────────────

/// W3C design-token document: groups nested by name segment, leaves with
/// `$value`, `$type`, optional `$description`, and `$extensions`.
#[must_use]
pub fn to_w3c_document(collection: &TokenCollection, options: &ExportOptions) -> Value {
    let mut root = Map::new();
    root.insert(
        "$description".to_string(),
        Value::String(collection.description().to_string()),
    );
    root.insert(
        "$extensions".to_string(),
        json!({
            EXTENSION_KEY: {
                "name": collection.name(),
                "version": collection.version().to_string(),
            }
        }),
    );

    'tokens: for token in collection {
        let mut node = &mut root;
        for segment in token.name().segments() {
            let entry = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Some(next) = entry.as_object_mut() else {
                continue 'tokens;
            };
            node = next;
        }
        write_leaf(node, token, options);
    }
    Value::Object(root)
}

fn write_leaf(node: &mut Map<String, Value>, token: &Token, options: &ExportOptions) {
    node.insert("$value".to_string(), w3c_value(token.value()));
    node.insert("$type".to_string(), Value::String(token.kind().name().to_string()));
    if options.include_descriptions {
        if let Some(desc) = token.description() {
            node.insert("$description".to_string(), Value::String(desc.to_string()));
        }
    }
    node.insert(
        "$extensions".to_string(),
        json!({
            EXTENSION_KEY: {
                "category": token.category(),
                "context": token.context(),
                "provenance": token.provenance(),
            }
        }),
    );
}

fn w3c_value(value: &TokenValue) -> Value {
    match value {
        TokenValue::Color(c) => Value::String(c.to_hex()),
        TokenValue::Dimension(d) => Value::String(d.to_string()),
        TokenValue::Shadow(layers) => Value::Array(
            layers
                .iter()
                .map(|s| {
                    json!({
                        "color": s.color.to_hex(),
                        "offsetX": format!("{}px", format_number(s.offset_x)),
                        "offsetY": format!("{}px", format_number(s.offset_y)),
                        "blur": format!("{}px", format_number(s.blur)),
                        "spread": format!("{}px", format_number(s.spread)),
                        "inset": s.inset,
                    })
                })
                .collect(),
        ),
        TokenValue::Gradient(g) => Value::Array(
            g.stops
                .iter()
                .map(|s| json!({ "color": s.color.to_hex(), "position": s.position }))
                .collect(),
        ),
        TokenValue::Composite(parts) => Value::Object(
            parts
                .iter()
                .map(|(k, v)| (k.clone(), w3c_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Provenance, TokenContext};
    use crate::value::{Dimension, Shadow};
    use chrono::{DateTime, Utc};
    use hp_color::Color;
    use pretty_assertions::assert_eq;

    fn provenance() -> Provenance {
        Provenance::new("test", DateTime::<Utc>::UNIX_EPOCH)
    }

    fn sample() -> TokenCollection {
        let mut parts = BTreeMap::new();
        parts.insert("background".to_string(), TokenValue::Color(Color::BLACK));
        parts.insert("text".to_string(), TokenValue::Color(Color::WHITE));

        let tokens = [
            Token::named("brand.500", Color::rgb8(0x0e, 0xb5, 0x8c).into(), TokenContext::new(), provenance())
                .unwrap()
                .with_description("Brand base"),
            Token::named(
                "button.solid",
                TokenValue::Composite(parts),
                TokenContext::new().component("button").variant("solid"),
                provenance(),
            )
            .unwrap(),
            Token::named(
                "space.md",
                TokenValue::Dimension(Dimension::rem(1.0)),
                TokenContext::new(),
                provenance(),
            )
            .unwrap(),
        ];
        TokenCollection::from_tokens("demo", "demo tokens", tokens, DateTime::<Utc>::UNIX_EPOCH).unwrap()
    }

    #[test]
    fn css_custom_properties() {
        let css = render(
            &sample(),
            ExportFormat::CssCustomProperties,
            &ExportOptions::default().with_prefix("hp"),
        );
        assert_eq!(
            css,
            ":root {\n\
             \x20 /* Brand base */\n\
             \x20 --hp-brand-500: #0eb58c;\n\
             \x20 --hp-button-solid-background: #000000;\n\
             \x20 --hp-button-solid-text: #ffffff;\n\
             \x20 --hp-space-md: 1rem;\n\
             }\n"
        );
    }

    #[test]
    fn scss_without_descriptions() {
        let options = ExportOptions {
            include_descriptions: false,
            ..ExportOptions::default()
        };
        let scss = render(&sample(), ExportFormat::Scss, &options);
        assert!(scss.starts_with("$brand-500: #0eb58c;\n"));
        assert!(!scss.contains("//"));
    }

    #[test]
    fn flat_map_expands_composites() {
        let flat = to_flat_map(&sample());
        assert_eq!(flat.get("button.solid.text").map(String::as_str), Some("#ffffff"));
        assert_eq!(flat.len(), 4);
    }

    #[test]
    fn w3c_document_nests_by_segment() {
        let doc = to_w3c_document(&sample(), &ExportOptions::default());
        assert_eq!(doc["brand"]["500"]["$value"], "#0eb58c");
        assert_eq!(doc["brand"]["500"]["$type"], "color");
        assert_eq!(doc["brand"]["500"]["$description"], "Brand base");
        assert_eq!(doc["button"]["solid"]["$type"], "composite");
        assert_eq!(doc["button"]["solid"]["$value"]["text"], "#ffffff");
        assert_eq!(
            doc["button"]["solid"]["$extensions"][EXTENSION_KEY]["category"],
            "component"
        );
        assert_eq!(doc["$extensions"][EXTENSION_KEY]["version"], "1.0.0");
    }

    #[test]
    fn w3c_shadow_layers() {
        let shadow = Shadow {
            offset_x: 0.0,
            offset_y: 4.0,
            blur: 8.0,
            spread: 0.0,
            color: Color::BLACK.with_alpha(0.25),
            inset: false,
        };
        let value = w3c_value(&TokenValue::Shadow(vec![shadow]));
        assert_eq!(value[0]["offsetY"], "4px");
        assert_eq!(value[0]["color"], "#00000040");
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("css".parse::<ExportFormat>().unwrap(), ExportFormat::CssCustomProperties);
        assert_eq!("W3C".parse::<ExportFormat>().unwrap(), ExportFormat::W3cJson);
        assert!(matches!("yaml".parse::<ExportFormat>(), Err(TokenError::UnknownFormat(_))));
    }
}
