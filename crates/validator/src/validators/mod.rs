//! Built-in validators
//!
//! - **String**: [`NotBlank`], [`MinLength`], [`MaxLength`], [`Url`], [`OneOf`]
//! - **Numeric**: [`InRange`]

mod choice;
mod format;
mod length;
mod range;

pub use choice::{OneOf, one_of};
pub use format::{Url, url};
pub use length::{MaxLength, MinLength, NotBlank, max_length, min_length, not_blank};
pub use range::{InRange, in_range};
