//! Raw CMS schema: WordPress entities and ACF flexible-content blocks.
//!
//! Defaulting happens here, at the deserialization boundary, so that the
//! [`mapper`](crate::mapper) can work with plain typed values.

pub mod blocks;
pub mod de;
pub mod wp;

pub use blocks::*;
pub use de::Repeater;
pub use wp::{Embedded, EmbeddedMedia, EmbeddedTerm, RawCategory, RawPage, RawPost, Rendered};
