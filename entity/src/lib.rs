pub mod api_key;
pub mod customer_account;
pub mod enums;
pub mod invite;
pub mod square_up;
pub mod subscription;
pub mod team;
pub mod user;
pub mod user_team;

/*
 Teams are the billing and access boundary. A user row on its own grants
 nothing; joining a team (by creating one, or by accepting an invite) is what
 unlocks the product. A user belongs to at most one team at a time, enforced
 by a unique index on user_teams.user_id.
 Invites are keyed by (team_id, invitee_email): re-inviting someone upserts
 onto the existing row instead of stacking duplicates.
 */
