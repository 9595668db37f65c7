use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(u64);
impl MemberId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}
impl Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Someone assignable to projects and tasks. Deleting a member never
/// cascades; records referencing a deleted member keep the dangling id and
/// readers resolve it to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
}

/// Input for [`crate::ProjectStore::add_team_member`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeamMember {
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
}

/// Field-wise update for a team member; unset fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamMemberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
}

impl TeamMember {
    pub(crate) fn apply(&mut self, patch: TeamMemberPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
    }
}
