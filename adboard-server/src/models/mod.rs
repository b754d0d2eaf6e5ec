//! Domain models with validation at the boundary
//!
//! Raw JSON bodies are turned into [`NewAd`] / [`AdPatch`] by the validation
//! layer. Invalid input returns ValidationError, not panic.

pub mod ad;
pub mod validation;

pub use ad::{creation_timestamp, Ad, AdPatch, NewAd};
pub use validation::{
    validate_create, validate_update, FieldError, FieldErrorKind, FieldRule, Mode,
    ValidationError, AD_FIELDS,
};
