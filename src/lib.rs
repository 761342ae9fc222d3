pub mod decoder;
pub mod emit;
pub mod error;
pub mod fixture;
pub mod i18n;
pub mod pipeline;
pub mod report;
pub mod types;

pub use crate::error::GenerateError;
// Re-export the localization helpers
pub use crate::i18n::{t, t_with_args};
