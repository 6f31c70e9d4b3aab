//! Error types for the table layout manager.

use std::fmt;

use thiserror::Error;

/// The coordinate axis an out-of-range index was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// A section index.
    Section,
    /// A linear item index within a section.
    Item,
    /// A grid row within a section.
    Row,
    /// A grid column within a section.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section => write!(f, "section"),
            Self::Item => write!(f, "item"),
            Self::Row => write!(f, "row"),
            Self::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur while translating between linear and grid coordinates.
///
/// Both variants indicate a caller contract violation: the rendering surface
/// asked about something the manager did not report, or the data source
/// reported a shape that cannot be addressed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// An index exceeds the bounds reported by the data source at query time.
    #[error("{axis} {index} out of range in section {section} (count {count})")]
    OutOfRange {
        axis: Axis,
        section: usize,
        index: usize,
        count: usize,
    },

    /// The section's item count does not fit in `usize`.
    #[error("item count of section {section} overflows")]
    ShapeOverflow { section: usize },
}

impl LayoutError {
    /// Create an out-of-range error.
    pub fn out_of_range(axis: Axis, section: usize, index: usize, count: usize) -> Self {
        Self::OutOfRange {
            axis,
            section,
            index,
            count,
        }
    }

    /// Returns the axis for out-of-range errors.
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Self::OutOfRange { axis, .. } => Some(*axis),
            Self::ShapeOverflow { .. } => None,
        }
    }
}

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

static_assertions::assert_impl_all!(LayoutError: Send, Sync);
