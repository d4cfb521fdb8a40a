/// Which rest, if any, refills a pool.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ResetPolicy {
    ShortRest,
    LongRest,
    /// Reset by a specific game event, never by a rest.
    Special,
    /// Never reset.
    #[default]
    None,
}

impl ResetPolicy {
    /// A long rest refills long- and short-rest pools; a short rest refills
    /// short-rest pools only.
    pub const fn restored_by(self, rest: RestKind) -> bool {
        match (self, rest) {
            (ResetPolicy::ShortRest, _) => true,
            (ResetPolicy::LongRest, RestKind::Long) => true,
            _ => false,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RestKind {
    Short,
    Long,
}

/// A bounded counter: `0 <= current <= max`.
///
/// Fields are private so every constructor and mutation goes through the
/// clamp. Deserialized pools are not trusted; call [`ResourcePool::normalized`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ResourcePool {
    current: u32,
    max: u32,
    reset_on: ResetPolicy,
}

impl ResourcePool {
    /// Creates a pool, clamping `current` to `max`.
    pub const fn new(current: u32, max: u32, reset_on: ResetPolicy) -> Self {
        Self {
            current: if current > max { max } else { current },
            max,
            reset_on,
        }
    }

    /// A full pool.
    pub const fn full(max: u32, reset_on: ResetPolicy) -> Self {
        Self::new(max, max, reset_on)
    }

    #[inline]
    pub const fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Reset policy of this pool. Classification only; no reset happens here.
    #[inline]
    pub const fn classify_reset(&self) -> ResetPolicy {
        self.reset_on
    }

    /// Amount spent since the last refill.
    pub const fn used(&self) -> u32 {
        self.max.saturating_sub(self.current)
    }

    pub const fn is_full(&self) -> bool {
        self.current == self.max
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// `current = clamp(current + delta, 0, max)`.
    #[must_use]
    pub fn adjust(self, delta: i32) -> Self {
        self.set_current_wide(self.current as i64 + delta as i64)
    }

    /// Absolute set, clamped to `[0, max]`.
    #[must_use]
    pub fn set_current(self, value: i32) -> Self {
        self.set_current_wide(value as i64)
    }

    /// Changes the maximum, pulling `current` down if it no longer fits.
    #[must_use]
    pub fn set_max(self, max: u32) -> Self {
        Self::new(self.current, max, self.reset_on)
    }

    #[must_use]
    pub fn with_reset(self, reset_on: ResetPolicy) -> Self {
        Self { reset_on, ..self }
    }

    /// `current = max`.
    #[must_use]
    pub fn restore(self) -> Self {
        Self::full(self.max, self.reset_on)
    }

    /// Re-establishes the bound after deserialization or a raw patch.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::new(self.current, self.max, self.reset_on)
    }

    fn set_current_wide(self, value: i64) -> Self {
        let current = value.clamp(0, self.max as i64) as u32;
        Self { current, ..self }
    }
}
