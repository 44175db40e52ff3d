//! # OSB Common Library
//!
//! Shared code for the osu! specialist bank services:
//! - Error type
//! - Configuration loading and data folder resolution
//! - Translation catalog

pub mod config;
pub mod error;
pub mod i18n;

pub use error::{Error, Result};
pub use i18n::{Translations, Translator};
