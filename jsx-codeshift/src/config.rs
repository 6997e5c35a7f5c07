use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TransformError};

// -----------------------------------------------------------------------------
// Factory registry
// -----------------------------------------------------------------------------

/// Tag names exposed by the legacy `React.DOM` factory table.
pub const DOM_FACTORIES: &[&str] = &[
    // HTML
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "big", "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col",
    "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins",
    "kbd", "keygen", "label", "legend", "li", "link", "main", "map", "mark", "menu", "menuitem",
    "meta", "meter", "nav", "noscript", "object", "ol", "optgroup", "option", "output", "p",
    "param", "picture", "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp", "script",
    "section", "select", "small", "source", "span", "strong", "style", "sub", "summary", "sup",
    "table", "tbody", "td", "textarea", "tfoot", "th", "thead", "time", "title", "tr", "track",
    "u", "ul", "var", "video", "wbr",
    // SVG
    "circle", "clipPath", "defs", "ellipse", "g", "image", "line", "linearGradient", "mask",
    "path", "pattern", "polygon", "polyline", "radialGradient", "rect", "stop", "svg", "text",
    "tspan",
];

/// Set of identifiers that are treated as legacy DOM factory calls.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RegistryRepr")]
pub struct FactoryRegistry {
    names: BTreeSet<String>,
}

/// The registry may be written as a list of names or as a
/// name -> factory table; only the keys matter.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegistryRepr {
    Names(Vec<String>),
    Table(HashMap<String, serde_json::Value>),
}

impl From<RegistryRepr> for FactoryRegistry {
    fn from(repr: RegistryRepr) -> Self {
        match repr {
            RegistryRepr::Names(names) => names.into_iter().collect(),
            RegistryRepr::Table(table) => table.into_keys().collect(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for FactoryRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        DOM_FACTORIES.iter().copied().collect()
    }
}

impl FactoryRegistry {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Transform config
// -----------------------------------------------------------------------------

/// Names the rewrite passes look for. Every field has a default matching the
/// legacy React API, so an empty JSON object is a valid config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Root namespace identifier (`React`).
    pub namespace: String,
    /// Factory table under the namespace (`DOM` in `React.DOM.div`).
    pub factory_table: String,
    /// Generic constructor under the namespace (`createElement`).
    pub create_fn: String,
    /// Spread helper under the namespace (`React.__spread`).
    pub spread_helper: String,
    /// Object of the generic merge call (`Object` in `Object.assign`).
    pub merge_object: String,
    /// Method of the generic merge call (`assign`).
    pub merge_fn: String,
    /// Property key of render functions.
    pub render_key: String,
    /// Key prefix of private render helpers (`_renderRow`).
    pub private_render_prefix: String,
    pub factories: FactoryRegistry,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            namespace: "React".to_string(),
            factory_table: "DOM".to_string(),
            create_fn: "createElement".to_string(),
            spread_helper: "__spread".to_string(),
            merge_object: "Object".to_string(),
            merge_fn: "assign".to_string(),
            render_key: "render".to_string(),
            private_render_prefix: "_render".to_string(),
            factories: FactoryRegistry::default(),
        }
    }
}

impl TransformConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| TransformError::io(path, e))?;
        Self::from_json_str(&json)
    }

    pub fn is_render_key(&self, key: &str) -> bool {
        key == self.render_key
    }

    pub fn is_render_like_key(&self, key: &str) -> bool {
        self.is_render_key(key) || key.starts_with(&self.private_render_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_react_defaults() {
        let config = TransformConfig::from_json_str("{}").unwrap();
        assert_eq!(config.namespace, "React");
        assert_eq!(config.factory_table, "DOM");
        assert_eq!(config.create_fn, "createElement");
        assert!(config.factories.contains("div"));
        assert!(config.factories.contains("clipPath"));
        assert!(!config.factories.contains("Div"));
    }

    #[test]
    fn factories_accept_list_or_table() {
        let listed = TransformConfig::from_json_str(r#"{"factories": ["div", "span"]}"#).unwrap();
        assert_eq!(listed.factories.len(), 2);
        assert!(listed.factories.contains("span"));

        let table =
            TransformConfig::from_json_str(r#"{"factories": {"div": "div", "td": null}}"#).unwrap();
        assert!(table.factories.contains("td"));
        assert!(!table.factories.contains("span"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = TransformConfig::from_json_str(r#"{"namespcae": "Preact"}"#).unwrap_err();
        assert!(matches!(err, TransformError::Config(_)));
    }

    #[test]
    fn render_like_keys() {
        let config = TransformConfig::default();
        assert!(config.is_render_key("render"));
        assert!(config.is_render_like_key("render"));
        assert!(config.is_render_like_key("_renderRow"));
        assert!(!config.is_render_like_key("renderRow"));
        assert!(!config.is_render_key("_render"));
    }
}
