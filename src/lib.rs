//! Bidirectional registry mapping textual labels to numeric ids.
//!
//! A [`LabelMap`] encodes categorical dataset labels (class names) into
//! stable integer or float ids and decodes predicted ids back into labels.
//! It is filled from an already-parsed [`Table`] and grows on demand through
//! [`LabelMap::add`] and [`LabelMap::force_get`].
//!
//! ```
//! use labelmap::{LabelId, LabelMap};
//!
//! let mut map = LabelMap::new();
//! assert_eq!(map.force_get("cat"), LabelId::Int(0));
//! assert_eq!(map.force_get("dog"), LabelId::Int(1));
//! assert_eq!(map.to_text(1).unwrap(), "dog");
//! ```
//!
//! The map is not synchronized. Share it across threads behind a single
//! lock around the whole value.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod render;
pub mod source;
pub mod store;
pub mod types;

pub use config::{LabelMapConfig, TableSource};
pub use error::{LabelMapError, Result};
pub use fingerprint::MapFingerprint;
pub use render::RenderOptions;
pub use source::Table;
pub use store::LabelMap;
pub use types::{IdType, LabelId, LoadSummary};
