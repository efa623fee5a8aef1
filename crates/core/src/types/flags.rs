use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Modifiers for an install request, any combination is allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InstallFlags(u8);

impl InstallFlags {
    pub const REINSTALL: Self = Self(1);
    pub const UPGRADE: Self = Self(1 << 1);
    pub const UPDATE_DEPENDENCIES: Self = Self(1 << 2);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(Self::REINSTALL.0 | Self::UPGRADE.0 | Self::UPDATE_DEPENDENCIES.0)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Build from raw bits, dropping unknown ones
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::all().0)
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// True when the request asks for anything beyond a plain install
    pub const fn wants_update(&self) -> bool {
        self.intersects(Self::all())
    }
}

impl BitOr for InstallFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for InstallFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for InstallFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = [
            (Self::REINSTALL, "reinstall"),
            (Self::UPGRADE, "upgrade"),
            (Self::UPDATE_DEPENDENCIES, "update-dependencies"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect();
        f.write_str(&names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_flags_do_not_update() {
        assert!(InstallFlags::empty().is_empty());
        assert!(!InstallFlags::empty().wants_update());
        assert_eq!(InstallFlags::default(), InstallFlags::empty());
    }

    #[test]
    fn test_every_non_empty_combination_updates() {
        for bits in 1..=InstallFlags::all().bits() {
            let flags = InstallFlags::from_bits_truncate(bits);
            assert!(flags.wants_update(), "bits {bits:#05b} should update");
        }
    }

    #[test]
    fn test_contains_and_display() {
        let flags = InstallFlags::UPGRADE | InstallFlags::REINSTALL;
        assert!(flags.contains(InstallFlags::UPGRADE));
        assert!(!flags.contains(InstallFlags::UPDATE_DEPENDENCIES));
        assert_eq!(flags.to_string(), "reinstall|upgrade");
        assert_eq!(InstallFlags::empty().to_string(), "none");
    }

    #[test]
    fn test_unknown_bits_are_dropped() {
        assert_eq!(InstallFlags::from_bits_truncate(0xF0), InstallFlags::empty());
    }
}
