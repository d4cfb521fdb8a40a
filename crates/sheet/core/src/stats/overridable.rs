/// A stored value paired with a manual-override flag.
///
/// When `manual` is false the stored `value` is ignored and the statistic is
/// recomputed from its inputs on every read. When `manual` is true, `value` is
/// returned unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overridable<T> {
    pub value: T,
    #[cfg_attr(feature = "serde", serde(default))]
    pub manual: bool,
}

impl<T> Overridable<T> {
    /// Automatic mode, keeping `value` as the last stored figure.
    pub const fn auto(value: T) -> Self {
        Self {
            value,
            manual: false,
        }
    }

    /// Manual mode: `value` is authoritative.
    pub const fn manual(value: T) -> Self {
        Self {
            value,
            manual: true,
        }
    }

    /// Returns the manual value, or evaluates `auto` when not overridden.
    #[inline]
    pub fn resolve(&self, auto: impl FnOnce() -> T) -> T
    where
        T: Copy,
    {
        if self.manual { self.value } else { auto() }
    }

    pub fn set_manual(&mut self, value: T) {
        self.value = value;
        self.manual = true;
    }

    /// Returns to automatic mode. The stored value is kept but no longer read.
    pub fn clear_manual(&mut self) {
        self.manual = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_value_wins() {
        let stat = Overridable::manual(7);
        assert_eq!(stat.resolve(|| 3), 7);
    }

    #[test]
    fn auto_mode_ignores_stored_value() {
        let stat = Overridable::auto(99);
        assert_eq!(stat.resolve(|| 3), 3);
    }

    #[test]
    fn clearing_manual_recomputes() {
        let mut stat = Overridable::auto(0);
        stat.set_manual(12);
        assert_eq!(stat.resolve(|| 1), 12);
        stat.clear_manual();
        assert_eq!(stat.resolve(|| 1), 1);
        assert_eq!(stat.value, 12);
    }
}
