use serde::{Deserialize, Serialize};
use shared::{DEFAULT_CYCLE_LENGTH, MAX_CYCLE_LENGTH, MIN_CYCLE_LENGTH};

/// Average number of days between period start dates, always within
/// `MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CycleLength(u32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleLengthError {
    #[error(
        "Cycle length {0} is outside {min}..={max} days",
        min = MIN_CYCLE_LENGTH,
        max = MAX_CYCLE_LENGTH
    )]
    OutOfRange(u32),
}

impl CycleLength {
    pub const MIN: CycleLength = CycleLength(MIN_CYCLE_LENGTH);
    pub const MAX: CycleLength = CycleLength(MAX_CYCLE_LENGTH);

    /// Strict constructor, rejects values outside the supported range
    pub fn new(days: u32) -> Result<Self, CycleLengthError> {
        if (MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH).contains(&days) {
            Ok(Self(days))
        } else {
            Err(CycleLengthError::OutOfRange(days))
        }
    }

    /// Pull any value into the supported range
    pub fn clamped(days: u32) -> Self {
        Self(days.clamp(MIN_CYCLE_LENGTH, MAX_CYCLE_LENGTH))
    }

    pub fn days(self) -> u32 {
        self.0
    }

    /// One day longer, or `None` when already at the maximum
    pub fn increment(self) -> Option<Self> {
        (self < Self::MAX).then(|| Self(self.0 + 1))
    }

    /// One day shorter, or `None` when already at the minimum
    pub fn decrement(self) -> Option<Self> {
        (self > Self::MIN).then(|| Self(self.0 - 1))
    }

    pub fn is_min(self) -> bool {
        self == Self::MIN
    }

    pub fn is_max(self) -> bool {
        self == Self::MAX
    }
}

impl Default for CycleLength {
    fn default() -> Self {
        Self(DEFAULT_CYCLE_LENGTH)
    }
}

impl TryFrom<u32> for CycleLength {
    type Error = CycleLengthError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<CycleLength> for u32 {
    fn from(length: CycleLength) -> Self {
        length.0
    }
}

impl std::fmt::Display for CycleLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days", self.0)
    }
}
