//! Cmdforge Core - declarative command definitions
//!
//! Turns a command name, an implementation and a shorthand options schema into
//! a [`CommandDescriptor`] carrying a validator, a usage example and metadata.

pub mod command;
pub mod error;
pub mod example;
pub mod manifest;
pub mod options;
pub mod predicate;
pub mod registry;
pub mod validator;

pub use command::{define_command, define_command_with, CommandDescriptor, ExecuteFn};
pub use error::{DispatchError, ManifestError};
pub use example::{Example, ExampleInput};
pub use manifest::Manifest;
pub use options::{
    normalize_options, Attributes, Declaration, FieldConfig, NormalizedSchema, OptionsInput, PartialConfig,
};
pub use predicate::Predicate;
pub use registry::CommandRegistry;
pub use validator::{create_validator, Validator};
