//! Closed role model.
//!
//! DESIGN
//! ======
//! The directory service reports roles as lowercase strings. They are parsed
//! once at the boundary into [`Role`] so every decision downstream is an
//! exhaustive `match` instead of string comparison.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Permission level assigned to a user by the directory service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Donor,
    Volunteer,
    Admin,
}

impl Role {
    /// Every role, in ascending privilege order.
    pub const ALL: [Role; 3] = [Role::Donor, Role::Volunteer, Role::Admin];

    /// Wire name as reported by the directory.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Volunteer => "volunteer",
            Self::Admin => "admin",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Donor => 0b001,
            Self::Volunteer => 0b010,
            Self::Admin => 0b100,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a directory role string is not one of the known roles.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    /// Parse a directory role string. Surrounding whitespace and ASCII case
    /// are ignored; anything else must match exactly.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RoleParseError(raw.to_owned()))
    }
}

/// A set of roles, used as the required set of a guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);
    pub const ALL: RoleSet = RoleSet(0b111);

    /// A set holding exactly one role.
    #[must_use]
    pub const fn only(role: Role) -> Self {
        Self(role.bit())
    }

    /// Build a set from a slice of roles.
    #[must_use]
    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        Self(bits)
    }

    #[must_use]
    pub const fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    #[must_use]
    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in ascending privilege order.
    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, RoleSet::with)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Role::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl Serialize for RoleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
