//! Built-in demo commands

use cmdforge_core::{define_command, Attributes, CommandDescriptor, ExampleInput, OptionsInput, PartialConfig};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;

fn is_email(value: &Value) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
    value.as_str().map_or(false, |s| re.is_match(s))
}

fn greet() -> CommandDescriptor {
    define_command(
        "greet",
        |_: &Attributes, _: Option<&Value>| json!("Hello, world!"),
        OptionsInput::new().description("Print a friendly greeting"),
    )
}

fn echo() -> CommandDescriptor {
    define_command(
        "echo",
        |attrs: &Attributes, body: Option<&Value>| {
            let prefix = attrs.get("prefix").and_then(Value::as_str).unwrap_or("");
            let text = match body {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            json!(format!("{}{}", prefix, text))
        },
        OptionsInput::new()
            .attribute("prefix", PartialConfig::new().optional(true).description("Text placed before the body"))
            .body("Message to echo back")
            .description("Echo the body, optionally prefixed"),
    )
}

fn create_user() -> CommandDescriptor {
    define_command(
        "create_user",
        |attrs: &Attributes, body: Option<&Value>| {
            json!({
                "username": attrs.get("username").cloned().unwrap_or(Value::Null),
                "email": body.cloned().unwrap_or(Value::Null),
            })
        },
        OptionsInput::new()
            .attribute(
                "username",
                PartialConfig::new()
                    .description("Login name, 3 to 20 characters")
                    .validate(|v| v.as_str().map_or(false, |s| (3..=20).contains(&s.chars().count()))),
            )
            .body(PartialConfig::new().description("Email address").validate(is_email))
            .description("Create a user record")
            .example(
                ExampleInput::new(
                    json!({ "username": "johndoe" }).as_object().cloned().unwrap_or_default(),
                    json!("john@example.com"),
                )
                .with_description("Create johndoe with an email address"),
            ),
    )
}

fn multiply() -> CommandDescriptor {
    define_command(
        "multiply",
        |attrs: &Attributes, body: Option<&Value>| {
            let factor = attrs.get("factor").and_then(Value::as_f64).unwrap_or(1.0);
            let items = body.and_then(Value::as_array).cloned().unwrap_or_default();
            Value::Array(
                items
                    .iter()
                    .filter_map(Value::as_f64)
                    .map(|n| json!(n * factor))
                    .collect(),
            )
        },
        OptionsInput::new()
            .attribute(
                "factor",
                PartialConfig::new()
                    .description("Multiplication factor")
                    .validate(Value::is_number)
                    .with_default(json!(2)),
            )
            .body(
                PartialConfig::new()
                    .description("List of numbers to multiply")
                    .validate(|v| v.as_array().map_or(false, |items| items.iter().all(Value::is_number)))
                    .with_default(json!([1, 2, 3])),
            )
            .description("Multiply every number in the body"),
    )
}

pub fn all() -> Vec<CommandDescriptor> {
    vec![greet(), echo(), create_user(), multiply()]
}
