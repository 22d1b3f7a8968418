use entity::enums::TeamRole;
use serde::{Deserialize, Serialize};

use crate::types::ids::{Email, TeamId, UserId};

/// Who a user is within the team system, resolved from their email.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipInfo {
    pub user_id: UserId,
    pub team_id: TeamId,
    pub team_role: TeamRole,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub team_role: TeamRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveMemberOutcome {
    Removed,
    NotInTeam,
}

/// Derived per invite attempt, never persisted. Membership on any team takes
/// priority over the re-invite cooldown; the ordering is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invitability {
    TooManyInvites,
    Invitable(Email),
    AlreadyOnTeam(TeamId),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamCreate {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamRemoveUser {
    pub user_id: UserId,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RTeamInviteUser {
    pub invitee_email: String,
    pub team_role: TeamRole,
}
