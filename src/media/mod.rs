//! Media extraction and representation.

pub mod extractor;
pub mod item;
pub mod strategies;

pub use extractor::MediaExtractor;
pub use item::{MediaEntry, MediaKind, MediaVariant};
pub use strategies::{EmbeddedJsonStrategy, ExtractStrategy, HtmlScanStrategy};
