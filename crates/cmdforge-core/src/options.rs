//! Option normalization
//!
//! Commands are authored with shorthand declarations: `true` for a required
//! field, `false` for an optional one, a string for a required field with a
//! description, or a partial config record. Everything is expanded into one
//! canonical [`FieldConfig`] before validators and examples are built.

use serde::de::{Error as _, IgnoredAny};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::example::ExampleInput;
use crate::predicate::Predicate;

/// Attribute values supplied alongside a command invocation
pub type Attributes = Map<String, Value>;

/// Canonical attribute or body configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldConfig {
    pub description: Option<String>,
    /// When false, the value must be present for validation to pass
    pub optional: bool,
    pub validate: Option<Predicate>,
    /// Used by example synthesis in place of a heuristic value
    pub default: Option<Value>,
}

impl FieldConfig {
    /// The config an undeclared body gets: optional, nothing else
    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Self::default()
        }
    }

    pub fn is_required(&self) -> bool {
        !self.optional
    }
}

/// A partially specified config record.
///
/// Unset fields are filled by [`PartialConfig::merge_defaults`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialConfig {
    pub description: Option<String>,
    pub optional: Option<bool>,
    pub validate: Option<Predicate>,
    pub default: Option<Value>,
}

impl PartialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }

    pub fn validate<F>(mut self, func: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Predicate::new(func));
        self
    }

    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.validate = Some(predicate);
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Complete the record: a missing `optional` means required.
    pub fn merge_defaults(self) -> FieldConfig {
        FieldConfig {
            description: self.description,
            optional: self.optional.unwrap_or(false),
            validate: self.validate,
            default: self.default,
        }
    }
}

/// One declaration slot as written by a command author
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `true` is required, `false` is optional
    Flag(bool),
    /// Required, with this description
    Description(String),
    Config(PartialConfig),
}

impl Declaration {
    pub fn normalize(self) -> FieldConfig {
        match self {
            Self::Flag(required) => FieldConfig {
                optional: !required,
                ..FieldConfig::default()
            },
            Self::Description(description) => FieldConfig {
                description: Some(description),
                optional: false,
                ..FieldConfig::default()
            },
            Self::Config(partial) => partial.merge_defaults(),
        }
    }
}

impl From<bool> for Declaration {
    fn from(required: bool) -> Self {
        Self::Flag(required)
    }
}

impl From<&str> for Declaration {
    fn from(description: &str) -> Self {
        Self::Description(description.to_string())
    }
}

impl From<String> for Declaration {
    fn from(description: String) -> Self {
        Self::Description(description)
    }
}

impl From<PartialConfig> for Declaration {
    fn from(partial: PartialConfig) -> Self {
        Self::Config(partial)
    }
}

/// An already-normalized config re-enters as a full record
impl From<FieldConfig> for Declaration {
    fn from(config: FieldConfig) -> Self {
        Self::Config(PartialConfig {
            description: config.description,
            optional: Some(config.optional),
            validate: config.validate,
            default: config.default,
        })
    }
}

// Wire form of a declaration. Objects are read key by key so a mistyped
// field is dropped on its own; other shapes become an empty record.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDeclaration {
    Flag(bool),
    Description(String),
    Config(Map<String, Value>),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Declaration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = match RawDeclaration::deserialize(deserializer)? {
            RawDeclaration::Flag(required) => return Ok(Self::Flag(required)),
            RawDeclaration::Description(description) => return Ok(Self::Description(description)),
            RawDeclaration::Config(fields) => fields,
            RawDeclaration::Other(_) => return Ok(Self::Config(PartialConfig::default())),
        };

        // `validate` names a built-in rule
        let validate = match fields.get("validate") {
            Some(Value::String(rule)) => Some(
                Predicate::named(rule)
                    .ok_or_else(|| D::Error::custom(format!("unknown validation rule '{}'", rule)))?,
            ),
            _ => None,
        };

        Ok(Self::Config(PartialConfig {
            description: fields.get("description").and_then(Value::as_str).map(str::to_string),
            optional: fields.get("optional").and_then(Value::as_bool),
            validate,
            default: fields.remove("default"),
        }))
    }
}

/// Options accepted when defining a command
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OptionsInput {
    pub attributes: BTreeMap<String, Declaration>,
    pub body: Option<Declaration>,
    pub description: Option<String>,
    pub example: Option<ExampleInput>,
}

impl OptionsInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: impl Into<String>, declaration: impl Into<Declaration>) -> Self {
        self.attributes.insert(name.into(), declaration.into());
        self
    }

    pub fn body(mut self, declaration: impl Into<Declaration>) -> Self {
        self.body = Some(declaration.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn example(mut self, example: ExampleInput) -> Self {
        self.example = Some(example);
        self
    }
}

/// The canonical form of a command's options
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSchema {
    pub attributes: BTreeMap<String, FieldConfig>,
    pub body: FieldConfig,
    pub description: String,
    /// Carried through untouched for example synthesis
    pub example: Option<ExampleInput>,
}

impl From<NormalizedSchema> for OptionsInput {
    fn from(schema: NormalizedSchema) -> Self {
        Self {
            attributes: schema
                .attributes
                .into_iter()
                .map(|(name, config)| (name, Declaration::from(config)))
                .collect(),
            body: Some(Declaration::from(schema.body)),
            description: Some(schema.description),
            example: schema.example,
        }
    }
}

/// Default description for a command without one
pub fn default_description(name: &str) -> String {
    format!("A command named {}", name)
}

/// Expand every declaration in `options` into its canonical form
pub fn normalize_options(name: &str, options: OptionsInput) -> NormalizedSchema {
    let attributes = options
        .attributes
        .into_iter()
        .map(|(key, declaration)| (key, declaration.normalize()))
        .collect();

    // An empty description counts as no body declaration at all
    let body = options
        .body
        .filter(|declaration| !matches!(declaration, Declaration::Description(d) if d.is_empty()))
        .map(Declaration::normalize)
        .unwrap_or_else(FieldConfig::optional);

    let description = options
        .description
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| default_description(name));

    NormalizedSchema {
        attributes,
        body,
        description,
        example: options.example,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shorthand_booleans() {
        assert_eq!(
            Declaration::from(true).normalize(),
            FieldConfig { optional: false, ..FieldConfig::default() }
        );
        assert_eq!(Declaration::from(false).normalize(), FieldConfig::optional());
    }

    #[test]
    fn test_shorthand_description() {
        let config = Declaration::from("Processing mode").normalize();
        assert_eq!(config.description.as_deref(), Some("Processing mode"));
        assert!(config.is_required());
        assert!(config.validate.is_none());
        assert!(config.default.is_none());
    }

    #[test]
    fn test_partial_config_keeps_supplied_fields() {
        let predicate = Predicate::named("string").unwrap();
        let config = Declaration::from(
            PartialConfig::new()
                .description("Type of items")
                .predicate(predicate.clone())
                .with_default(json!("all")),
        )
        .normalize();

        assert!(!config.optional);
        assert_eq!(config.description.as_deref(), Some("Type of items"));
        assert_eq!(config.validate, Some(predicate));
        assert_eq!(config.default, Some(json!("all")));

        let optional = PartialConfig::new().optional(true).merge_defaults();
        assert!(optional.optional);
    }

    #[test]
    fn test_schema_defaults() {
        let schema = normalize_options("test", OptionsInput::new());
        assert!(schema.attributes.is_empty());
        assert_eq!(schema.body, FieldConfig::optional());
        assert_eq!(schema.description, "A command named test");
        assert!(schema.example.is_none());

        let schema = normalize_options("test", OptionsInput::new().description(""));
        assert_eq!(schema.description, "A command named test");
    }

    #[test]
    fn test_every_attribute_normalized_once() {
        let options = OptionsInput::new()
            .attribute("mode", true)
            .attribute("optional", false)
            .attribute("label", "Display label")
            .body(true)
            .description("Custom description");
        let schema = normalize_options("test", options);

        assert_eq!(schema.attributes.len(), 3);
        assert!(schema.attributes["mode"].is_required());
        assert!(schema.attributes["optional"].optional);
        assert_eq!(schema.attributes["label"].description.as_deref(), Some("Display label"));
        assert!(schema.body.is_required());
        assert_eq!(schema.description, "Custom description");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let options = OptionsInput::new()
            .attribute("username", PartialConfig::new().validate(|v| v.is_string()))
            .attribute("verbose", false)
            .attribute("mode", "Processing mode")
            .body(PartialConfig::new().description("Payload").with_default(json!([1, 2])));

        let once = normalize_options("cmd", options);
        let twice = normalize_options("cmd", OptionsInput::from(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_deserialize_declarations() {
        let options: OptionsInput = serde_json::from_value(json!({
            "attributes": {
                "mode": true,
                "quiet": false,
                "label": "Display label",
                "count": { "validate": "integer", "optional": true, "default": 3 },
                "odd": 42
            },
            "body": { "description": "Input data", "default": null },
            "description": "Process input"
        }))
        .unwrap();
        let schema = normalize_options("process", options);

        assert!(schema.attributes["mode"].is_required());
        assert!(schema.attributes["quiet"].optional);
        assert_eq!(schema.attributes["label"].description.as_deref(), Some("Display label"));

        let count = &schema.attributes["count"];
        assert!(count.optional);
        assert_eq!(count.default, Some(json!(3)));
        assert_eq!(count.validate.as_ref().and_then(Predicate::rule), Some("integer"));

        assert_eq!(schema.attributes["odd"], FieldConfig::default());
        assert_eq!(schema.body.default, Some(Value::Null));
        assert!(schema.body.is_required());
    }

    #[test]
    fn test_deserialize_unknown_rule_fails() {
        let result: Result<OptionsInput, _> = serde_json::from_value(json!({
            "attributes": { "id": { "validate": "uuid" } }
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown validation rule 'uuid'"), "{}", err);
    }

    #[test]
    fn test_deserialize_mistyped_field_keeps_the_rest() {
        let options: OptionsInput = serde_json::from_value(json!({
            "attributes": {
                "query": { "description": "Search query", "optional": "yes" },
                "limit": { "description": "Max results", "validate": 5, "default": 10 }
            }
        }))
        .unwrap();
        let schema = normalize_options("search", options);

        let query = &schema.attributes["query"];
        assert_eq!(query.description.as_deref(), Some("Search query"));
        assert!(query.is_required());

        let limit = &schema.attributes["limit"];
        assert_eq!(limit.description.as_deref(), Some("Max results"));
        assert!(limit.validate.is_none());
        assert_eq!(limit.default, Some(json!(10)));
    }

    #[test]
    fn test_empty_body_description_is_absent() {
        let schema = normalize_options("test", OptionsInput::new().body(""));
        assert_eq!(schema.body, FieldConfig::optional());

        let schema = normalize_options("test", OptionsInput::new().body("Payload"));
        assert!(schema.body.is_required());
    }
}
