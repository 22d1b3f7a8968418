use chrono::{DateTime, Utc};
use entity::enums::{InviteStatus, TeamRole};
use serde::Serialize;

use crate::types::ids::InviteId;

/// Row state handed back from a send, whether it inserted or upserted.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SentInvite {
    pub id: InviteId,
    pub status: InviteStatus,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::invite::Model> for SentInvite {
    fn from(row: entity::invite::Model) -> Self {
        SentInvite {
            id: InviteId::from(row.id),
            status: row.status,
            updated_at: row.updated_at,
        }
    }
}

/// An invite as seen by its recipient.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InboundInvite {
    pub id: InviteId,
    pub team_name: String,
    pub inviter_email: String,
}

/// An invite as seen by the team that sent it, any status.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OutboundInvite {
    pub id: InviteId,
    pub inviter_email: String,
    pub invitee_email: String,
    pub team_role: TeamRole,
    pub status: InviteStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptanceOutcome {
    Success,
    /// No active invite matched both the id and the caller's email. Also
    /// covers ids that never parsed as uuids.
    NoInvite,
    /// The membership insert hit the one-team-per-user constraint: the caller
    /// already joined a team, possibly in a concurrent request.
    Duplicate,
}

// One value only. A reject-failure case for a missing invite would describe
// the same end state as success: there is no invite for this user by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionOutcome {
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationOutcome {
    Success,
    /// Collapses "doesn't exist" and "already resolved" on purpose, so a
    /// caller can't probe which invites exist. The store layer logs the
    /// distinction before coarsening.
    Failure,
}
