//! Work-in-progress limits.

use super::BoardDomainError;
use std::fmt;
use std::num::NonZeroU32;

/// Work-in-progress limit of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WipLimit {
    /// No limit; the default for every new column.
    #[default]
    Unbounded,
    /// At most this many tasks.
    Max(NonZeroU32),
}

impl WipLimit {
    /// Raw value standing for [`WipLimit::Unbounded`] in storage and at the
    /// registry boundary.
    pub const UNBOUNDED_SENTINEL: i64 = -1;

    /// Parses a raw limit: the sentinel `-1` or a positive integer.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidLimit`] for zero, any other
    /// negative value, or a value beyond `u32::MAX`.
    pub fn from_raw(raw: i64) -> Result<Self, BoardDomainError> {
        if raw == Self::UNBOUNDED_SENTINEL {
            return Ok(Self::Unbounded);
        }
        u32::try_from(raw)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self::Max)
            .ok_or(BoardDomainError::InvalidLimit(raw))
    }

    /// Returns the raw stored value.
    #[must_use]
    pub fn to_raw(self) -> i64 {
        match self {
            Self::Unbounded => Self::UNBOUNDED_SENTINEL,
            Self::Max(max) => i64::from(max.get()),
        }
    }

    /// Returns whether a column holding `count` tasks may take one more.
    #[must_use]
    pub fn admits_another(self, count: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Max(max) => u32::try_from(count).is_ok_and(|held| held < max.get()),
        }
    }

    /// Returns whether `count` tasks fit within the limit.
    #[must_use]
    pub fn covers(self, count: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Max(max) => u32::try_from(count).is_ok_and(|held| held <= max.get()),
        }
    }
}

impl fmt::Display for WipLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("unbounded"),
            Self::Max(max) => write!(f, "{max}"),
        }
    }
}

impl TryFrom<i64> for WipLimit {
    type Error = BoardDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_raw(value)
    }
}
