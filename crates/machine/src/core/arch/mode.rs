//! Privilege Levels.
//!
//! This module defines the protection levels of the CPU. It implements the following:
//! 1. **Level Classification:** Supervisor (may mutate control state) and User (runs jobs).
//! 2. **Checks:** Whether a level is allowed to perform an operation requiring another.
//! 3. **Observability:** Human-readable naming and display formatting.

/// CPU privilege levels.
///
/// `Supervisor` is the more privileged level; the ordering places it above `User`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrivilegeLevel {
    /// User level.
    ///
    /// Job instructions execute here; control operations are refused.
    User = 0,

    /// Supervisor level.
    ///
    /// The CPU starts and halts here; interrupt handlers run here.
    Supervisor = 1,
}

impl PrivilegeLevel {
    /// Returns `true` if code running at `self` may perform an operation requiring `required`.
    pub fn permits(self, required: Self) -> bool {
        self >= required
    }

    /// Returns the human-readable name of the level.
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Supervisor => "Supervisor",
        }
    }
}

impl std::fmt::Display for PrivilegeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
