use std::fmt;
use std::str::FromStr;

/// Options of the role select on the waitlist form.
///
/// The server does not restrict roles to this set; any non-empty string is
/// forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Teacher,
    Administrator,
    Principal,
    DepartmentHead,
    Other,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role {0:?}, expected one of: teacher, administrator, principal, department-head, other")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Teacher,
        Role::Administrator,
        Role::Principal,
        Role::DepartmentHead,
        Role::Other,
    ];

    /// Value submitted with the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Administrator => "administrator",
            Role::Principal => "principal",
            Role::DepartmentHead => "department-head",
            Role::Other => "other",
        }
    }

    /// Text shown in the select.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Teacher => "Teacher",
            Role::Administrator => "Administrator",
            Role::Principal => "Principal",
            Role::DepartmentHead => "Department Head",
            Role::Other => "Other",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
