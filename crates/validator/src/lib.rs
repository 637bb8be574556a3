//! # keyward-validator
//!
//! Small, composable field validators used by keyward forms.
//!
//! ```rust,ignore
//! use keyward_validator::prelude::*;
//!
//! let name = not_blank().and(max_length(64));
//! assert!(name.validate("production-dns").is_ok());
//! assert!(name.validate("   ").is_err());
//! ```
//!
//! Validators report a single [`ValidationError`]; forms collect the
//! per-field results into [`ValidationErrors`], which is the error type
//! surfaced to hosts.

// ValidationError is the fundamental error type for every validator;
// boxing it would add indirection to every call for no benefit.
#![allow(clippy::result_large_err)]

mod error;
mod traits;
pub mod validators;

pub use error::{ValidationError, ValidationErrors};
pub use traits::{And, Validate, ValidateExt};

/// Commonly used validators and traits
pub mod prelude {
    pub use crate::error::{ValidationError, ValidationErrors};
    pub use crate::traits::{And, Validate, ValidateExt};
    pub use crate::validators::{
        InRange, MaxLength, MinLength, NotBlank, OneOf, Url, in_range, max_length, min_length,
        not_blank, one_of, url,
    };
}
