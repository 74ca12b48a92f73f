use std::ops::BitOr;

use super::TriggerHandle;

/// What a reload should (re)do. Combine with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadFlags(u8);

impl ReloadFlags {
    /// First load: there is no previous trigger to release.
    pub const INIT: ReloadFlags = ReloadFlags(0b001);
    /// (Re)claim the trigger word and attach the message handler.
    pub const HANDLERS: ReloadFlags = ReloadFlags(0b010);
    /// (Re)register the engine's own help callback.
    pub const MEMBERS: ReloadFlags = ReloadFlags(0b100);
    pub const ALL: ReloadFlags = ReloadFlags(0b111);

    pub fn contains(self, other: ReloadFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ReloadFlags {
    type Output = ReloadFlags;

    fn bitor(self, rhs: ReloadFlags) -> ReloadFlags {
        ReloadFlags(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadState {
    Uninitialized,
    TriggerBound(TriggerHandle),
    Unbound,
}

impl ReloadState {
    pub fn handle(&self) -> Option<TriggerHandle> {
        match self {
            ReloadState::TriggerBound(handle) => Some(*handle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_contains() {
        let flags = ReloadFlags::HANDLERS | ReloadFlags::MEMBERS;
        assert!(flags.contains(ReloadFlags::HANDLERS));
        assert!(flags.contains(ReloadFlags::MEMBERS));
        assert!(!flags.contains(ReloadFlags::INIT));
        assert!(ReloadFlags::ALL.contains(flags));
    }

    #[test]
    fn test_state_handle() {
        assert_eq!(ReloadState::Uninitialized.handle(), None);
        assert_eq!(ReloadState::Unbound.handle(), None);
        assert_eq!(
            ReloadState::TriggerBound(TriggerHandle(3)).handle(),
            Some(TriggerHandle(3))
        );
    }
}
