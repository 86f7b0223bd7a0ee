//! Point codecs
//!
//! Classification, identifier derivation, slot path escaping, address
//! assembly and enum range parsing. Pure functions over strings and type
//! info; nothing here touches the index.
//!
//! @module point

pub mod address;
pub mod classify;
pub mod enum_range;
pub mod ids;
pub mod slot_path;

pub use address::point_addr;
pub use classify::{classify, Classification, PointKind};
pub use ids::{handle_for_point_id, point_id, source_id};
