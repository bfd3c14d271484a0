//! Language catalog consumed by the voice engine.
//!
//! The engine only needs the active [`LanguageDescriptor`] and a
//! `translate(key)` lookup. Translation content lives in TOML tables;
//! English and Spanish voice phrases ship with the crate.

mod catalog;
mod descriptor;

#[cfg(test)]
mod tests;

pub use catalog::{LanguageCatalog, StaticCatalog};
pub use descriptor::{DEFAULT_LANGUAGE, LanguageDescriptor, SUPPORTED_LANGUAGES};
