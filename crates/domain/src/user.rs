use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Teacher,
    Manager,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Manager => "manager",
        }
    }

    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "admin" => Some(Self::Admin),
            "teacher" => Some(Self::Teacher),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }
}

/// A staff member of the tutoring operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub roles: Vec<UserRole>,
    /// Messaging bot address (chat id)
    pub address: Option<String>,
}

impl User {
    pub fn new(name: &str, roles: Vec<UserRole>) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            roles,
            address: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&UserRole::Admin)
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: ID,
    pub school_id: ID,
    pub class_group_id: Option<ID>,
    pub name: String,
    /// Registered messaging address. Parents are reached through it as well.
    pub address: Option<String>,
}

impl Student {
    pub fn new(school_id: &ID, class_group_id: Option<&ID>, name: &str) -> Self {
        Self {
            id: Default::default(),
            school_id: school_id.clone(),
            class_group_id: class_group_id.cloned(),
            name: name.to_string(),
            address: None,
        }
    }
}

impl Entity for Student {
    fn id(&self) -> &ID {
        &self.id
    }
}
