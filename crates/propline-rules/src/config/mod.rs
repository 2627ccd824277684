//! Rule options and their validation
//!
//! Options arrive in the shape users write them (ESLint-style JSON or a
//! `[rule]` table in `.propline.toml`) and are validated once into a
//! [`MaxPropsConfig`] before any element is checked.

mod options;
mod whitespace;

pub use options::{ConfigError, MaxPropsConfig, MaxPropsOptions, Maximum, MaximumOption, SplitMaximum, When};
pub use whitespace::LineEnding;
