//! Point classification
//!
//! Maps a node's type onto the closed set of point kinds. Everything
//! downstream pattern-matches on `PointKind` instead of re-checking types.
//!
//! @module point/classify

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tree::{
    TypeInfo, BOOLEAN_POINT, BOOLEAN_WRITABLE, CONTROL_POINT, ENUM_POINT, ENUM_WRITABLE,
    NUMERIC_POINT, NUMERIC_WRITABLE,
};

/// Kind of an indexable point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    AnalogInput,
    AnalogOutput,
    BinaryInput,
    BinaryOutput,
    MultiStateInput,
    MultiStateOutput,
}

impl PointKind {
    pub const ALL: [PointKind; 6] = [
        Self::AnalogInput,
        Self::AnalogOutput,
        Self::BinaryInput,
        Self::BinaryOutput,
        Self::MultiStateInput,
        Self::MultiStateOutput,
    ];

    /// Address prefix: `v` for writable kinds, `i` for read-only
    pub fn prefix(self) -> &'static str {
        match self {
            Self::AnalogInput => "ai",
            Self::AnalogOutput => "av",
            Self::BinaryInput => "bi",
            Self::BinaryOutput => "bv",
            Self::MultiStateInput => "ei",
            Self::MultiStateOutput => "ev",
        }
    }

    pub fn is_writable(self) -> bool {
        matches!(
            self,
            Self::AnalogOutput | Self::BinaryOutput | Self::MultiStateOutput
        )
    }

    pub fn is_multi_state(self) -> bool {
        matches!(self, Self::MultiStateInput | Self::MultiStateOutput)
    }
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Result of classifying one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Point(PointKind),
    /// A control point with no supported kind; logged, never indexed
    Unsupported,
    NotAPoint,
}

/// Classify a node by its type. Writable types are checked before the
/// read-only types they extend.
pub fn classify(info: &TypeInfo) -> Classification {
    const TABLE: [(&str, PointKind); 6] = [
        (NUMERIC_WRITABLE, PointKind::AnalogOutput),
        (NUMERIC_POINT, PointKind::AnalogInput),
        (BOOLEAN_WRITABLE, PointKind::BinaryOutput),
        (BOOLEAN_POINT, PointKind::BinaryInput),
        (ENUM_WRITABLE, PointKind::MultiStateOutput),
        (ENUM_POINT, PointKind::MultiStateInput),
    ];

    for (spec, kind) in TABLE {
        if info.is(spec) {
            return Classification::Point(kind);
        }
    }

    if info.is(CONTROL_POINT) {
        Classification::Unsupported
    } else {
        Classification::NotAPoint
    }
}
