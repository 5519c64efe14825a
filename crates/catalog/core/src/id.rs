use std::fmt;
use std::num::NonZeroU32;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a creature within the provider's numeric range.
///
/// Ids are positive; `0` is never a valid creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(NonZeroU32);

impl EntityId {
    /// Returns `None` for `0`.
    #[inline]
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl TryFrom<u32> for EntityId {
    type Error = IdError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(IdError::Zero)
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u32 = s
            .trim()
            .trim_start_matches('#')
            .parse()
            .map_err(|_| IdError::Malformed(s.to_string()))?;
        Self::try_from(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("creature ids start at 1")]
    Zero,

    #[error("malformed creature id `{0}`")]
    Malformed(String),

    #[error("malformed id range `{0}`, expected `start-end`")]
    MalformedRange(String),

    #[error("id range {start}-{end} is empty")]
    EmptyRange { start: u32, end: u32 },
}

/// Inclusive range of creature ids fetched in one aggregation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityRange {
    start: EntityId,
    end: EntityId,
}

impl EntityRange {
    /// Number of creatures in the original regional catalog.
    pub const KANTO_LEN: u32 = 151;

    pub fn new(start: EntityId, end: EntityId) -> Result<Self, IdError> {
        if start > end {
            return Err(IdError::EmptyRange {
                start: start.get(),
                end: end.get(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> EntityId {
        self.start
    }

    pub fn end(&self) -> EntityId {
        self.end
    }

    pub fn len(&self) -> usize {
        (self.end.get() - self.start.get()) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + use<> {
        let raw: RangeInclusive<u32> = self.start.get()..=self.end.get();
        raw.filter_map(EntityId::new)
    }

    pub fn to_vec(&self) -> Vec<EntityId> {
        self.ids().collect()
    }
}

impl Default for EntityRange {
    fn default() -> Self {
        // Both bounds are non-zero constants.
        Self {
            start: EntityId(NonZeroU32::MIN),
            end: EntityId(NonZeroU32::MIN.saturating_add(Self::KANTO_LEN - 1)),
        }
    }
}

impl FromStr for EntityRange {
    type Err = IdError;

    /// Accepts `start-end` or a single id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once('-') {
            Some((start, end)) => {
                let start = start
                    .parse()
                    .map_err(|_| IdError::MalformedRange(s.to_string()))?;
                let end = end
                    .parse()
                    .map_err(|_| IdError::MalformedRange(s.to_string()))?;
                Self::new(start, end)
            }
            None => {
                let single: EntityId = trimmed.parse()?;
                Self::new(single, single)
            }
        }
    }
}
