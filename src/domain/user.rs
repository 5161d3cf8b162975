use crate::domain::model::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Faculty,
    #[serde(rename = "Facility Manager", alias = "FacilityManager")]
    FacilityManager,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Student,
        Role::Faculty,
        Role::FacilityManager,
        Role::Admin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Faculty => "Faculty",
            Role::FacilityManager => "Facility Manager",
            Role::Admin => "Admin",
        }
    }

    /// Student and Faculty only see their assigned areas.
    pub fn is_area_scoped(&self) -> bool {
        matches!(self, Role::Student | Role::Faculty)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| {
                role.label().eq_ignore_ascii_case(s)
                    || format!("{:?}", role).eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| format!("unknown role: {}", s))
    }
}

/// The session object: one entry of `users.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub assigned_areas: Vec<EntityId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    /// Fields this crate does not model, carried through the session store.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("Active")
    }

    pub fn is_assigned_to(&self, area: &Value) -> bool {
        self.assigned_areas.iter().any(|id| id.matches(area))
    }
}
