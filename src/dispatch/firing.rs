//! Event-firing flag and its scoped override.

use serde::{Deserialize, Serialize};

/// Whether changes made while handling an update raise further update
/// notifications on the record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventFiring {
    #[default]
    Enabled,
    Disabled,
}

impl EventFiring {
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// `Enabled` when `enabled` is true.
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Overrides a record's firing flag until dropped.
///
/// The previous value is restored in `Drop`, so it comes back whether the
/// scope ends normally, through an early `?` return or through a panic.
///
/// # Example
///
/// ```rust
/// use statewarden::dispatch::{EventFiring, FiringScope};
///
/// let mut firing = EventFiring::Enabled;
/// {
///     let scope = FiringScope::enter(&mut firing, EventFiring::Disabled);
///     assert_eq!(scope.current(), EventFiring::Disabled);
/// }
/// assert_eq!(firing, EventFiring::Enabled);
/// ```
#[derive(Debug)]
pub struct FiringScope<'a> {
    flag: &'a mut EventFiring,
    saved: EventFiring,
}

impl<'a> FiringScope<'a> {
    pub fn enter(flag: &'a mut EventFiring, value: EventFiring) -> Self {
        let saved = std::mem::replace(flag, value);
        Self { flag, saved }
    }

    /// The value in effect inside the scope.
    pub fn current(&self) -> EventFiring {
        *self.flag
    }

    /// The value that will be restored.
    pub fn saved(&self) -> EventFiring {
        self.saved
    }
}

impl Drop for FiringScope<'_> {
    fn drop(&mut self) {
        *self.flag = self.saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn default_is_enabled() {
        assert!(EventFiring::default().is_enabled());
        assert!(!EventFiring::Disabled.is_enabled());
        assert_eq!(EventFiring::from_enabled(false), EventFiring::Disabled);
    }

    #[test]
    fn scope_overrides_and_restores() {
        let mut firing = EventFiring::Enabled;
        {
            let scope = FiringScope::enter(&mut firing, EventFiring::Disabled);
            assert_eq!(scope.current(), EventFiring::Disabled);
            assert_eq!(scope.saved(), EventFiring::Enabled);
        }
        assert_eq!(firing, EventFiring::Enabled);
    }

    #[test]
    fn scope_restores_previous_disabled_value() {
        let mut firing = EventFiring::Disabled;
        {
            let scope = FiringScope::enter(&mut firing, EventFiring::Enabled);
            assert!(scope.current().is_enabled());
        }
        assert_eq!(firing, EventFiring::Disabled);
    }

    #[test]
    fn scope_restores_on_panic() {
        let mut firing = EventFiring::Enabled;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _scope = FiringScope::enter(&mut firing, EventFiring::Disabled);
            panic!("handler blew up");
        }));

        assert!(result.is_err());
        assert_eq!(firing, EventFiring::Enabled);
    }
}
