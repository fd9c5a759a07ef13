//! Translation catalogs: registration, ordering and lookup.
//!
//! [`CatalogRegistry`] tracks which domains are loaded and in what priority.
//! [`recompute`] turns that order and a [`LanguageList`](parlance_common::LanguageList)
//! into the flat list of [`CatalogInstance`]s that [`TranslationResolver`]
//! walks. [`CatalogStore`] is the seam to the message source.

mod registry;
mod resolver;
mod store;

pub use registry::{CatalogHandle, CatalogRegistry, RegistryChange};
pub use resolver::{CatalogInstance, Translation, TranslationResolver, format_fallback, recompute};
pub use store::{Arguments, CatalogError, CatalogStore, FluentCatalogStore};
