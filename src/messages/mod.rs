//! Reminder message generation.
//!
//! A reminder is built from a [`MessageContext`] describing the time of day,
//! the temperature and how the user is doing. A [`Style`] is selected first,
//! then one template is drawn among every category that applies to the
//! context, and its `{{progress}}`, `{{cups}}` and `{{remaining}}` variables
//! are filled in.
//!
//! # Modules
//!
//! - `generator` - Context types, style selection and variable substitution
//! - `templates` - Built-in templates by style and category

mod generator;
mod templates;

pub use crate::messages::generator::{
    MessageContext, Style, TemplateCategory, TimeSegment, WeatherCategory, generate,
};
