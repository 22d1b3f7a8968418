mod common;

use actix_web::test;
use common::client::TestClient;
use common::TestContext;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use std::sync::Arc;

use entity::enums::{InviteStatus, TeamRole};
use scaffold_teams::types::ids::{Email, InviteId};
use scaffold_teams::types::invite::{AcceptanceOutcome, RejectionOutcome, RevocationOutcome};

#[tokio::test]
async fn resending_refreshes_the_existing_invite() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    let invitee = Email::parse("invitee@example.com").unwrap();

    let first = ctx
        .db
        .send_invite(team_id, owner_id, &invitee, TeamRole::Member)
        .await
        .unwrap();
    let second = ctx
        .db
        .send_invite(team_id, owner_id, &invitee, TeamRole::Owner)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.status, InviteStatus::Pending);

    let conn = ctx.db.connection();
    assert_eq!(entity::invite::Entity::find().count(conn).await.unwrap(), 1);
    let row = entity::invite::Entity::find()
        .one(conn)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.team_role, TeamRole::Owner);
}

#[tokio::test]
async fn accepting_an_invite_joins_the_team() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    let (_invitee_id, _) = client.create_test_user("invitee@example.com").await;
    let invitee = Email::parse("invitee@example.com").unwrap();

    let invite = ctx
        .db
        .send_invite(team_id, owner_id, &invitee, TeamRole::Member)
        .await
        .unwrap();

    let outcome = ctx.db.accept_invite(invite.id, &invitee).await.unwrap();
    assert_eq!(outcome, AcceptanceOutcome::Success);

    let membership = ctx
        .db
        .get_membership_info(&invitee)
        .await
        .unwrap()
        .expect("invitee should now be a member");
    assert_eq!(membership.team_id, team_id);
    assert_eq!(membership.team_role, TeamRole::Member);

    let row = entity::invite::Entity::find_by_id(invite.id.as_uuid())
        .one(ctx.db.connection())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, InviteStatus::Accepted);
}

#[tokio::test]
async fn accepting_with_another_email_matches_nothing() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    let (_other_id, _) = client.create_test_user("other@example.com").await;
    let invitee = Email::parse("invitee@example.com").unwrap();
    let other = Email::parse("other@example.com").unwrap();

    let invite = ctx
        .db
        .send_invite(team_id, owner_id, &invitee, TeamRole::Member)
        .await
        .unwrap();

    let outcome = ctx.db.accept_invite(invite.id, &other).await.unwrap();
    assert_eq!(outcome, AcceptanceOutcome::NoInvite);
    assert!(ctx.db.get_membership_info(&other).await.unwrap().is_none());
}

#[tokio::test]
async fn accepting_while_already_on_a_team_is_a_duplicate() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    // the invitee already owns a team of their own
    let (_, own_team, _) = client.create_team_owner("invitee@example.com", "Mine").await;
    let invitee = Email::parse("invitee@example.com").unwrap();

    let invite = ctx
        .db
        .send_invite(team_id, owner_id, &invitee, TeamRole::Member)
        .await
        .unwrap();

    let outcome = ctx.db.accept_invite(invite.id, &invitee).await.unwrap();
    assert_eq!(outcome, AcceptanceOutcome::Duplicate);

    let membership = ctx
        .db
        .get_membership_info(&invitee)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(membership.team_id, own_team);
}

#[tokio::test]
async fn accepting_a_resolved_invite_matches_nothing() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    let (_invitee_id, _) = client.create_test_user("invitee@example.com").await;
    let invitee = Email::parse("invitee@example.com").unwrap();

    let invite = ctx
        .db
        .send_invite(team_id, owner_id, &invitee, TeamRole::Member)
        .await
        .unwrap();
    ctx.db.reject_invite(invite.id, &invitee).await.unwrap();

    let outcome = ctx.db.accept_invite(invite.id, &invitee).await.unwrap();
    assert_eq!(outcome, AcceptanceOutcome::NoInvite);
    assert!(ctx.db.get_membership_info(&invitee).await.unwrap().is_none());
}

#[tokio::test]
async fn rejecting_is_unconditional() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    let invitee = Email::parse("invitee@example.com").unwrap();

    // rejecting an invite that was never sent still reports success
    let outcome = ctx
        .db
        .reject_invite(InviteId::new(), &invitee)
        .await
        .unwrap();
    assert_eq!(outcome, RejectionOutcome::Success);

    let invite = ctx
        .db
        .send_invite(team_id, owner_id, &invitee, TeamRole::Member)
        .await
        .unwrap();
    let outcome = ctx.db.reject_invite(invite.id, &invitee).await.unwrap();
    assert_eq!(outcome, RejectionOutcome::Success);

    let row = entity::invite::Entity::find_by_id(invite.id.as_uuid())
        .one(ctx.db.connection())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, InviteStatus::Rejected);
}

#[tokio::test]
async fn revoking_only_touches_active_invites() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    let invitee = Email::parse("invitee@example.com").unwrap();

    let invite = ctx
        .db
        .send_invite(team_id, owner_id, &invitee, TeamRole::Member)
        .await
        .unwrap();
    let outcome = ctx.db.revoke_invite(invite.id, team_id).await.unwrap();
    assert_eq!(outcome, RevocationOutcome::Success);

    let row = entity::invite::Entity::find_by_id(invite.id.as_uuid())
        .one(ctx.db.connection())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, InviteStatus::Revoked);

    // already revoked, so a second attempt fails the same way a bogus id does
    let outcome = ctx.db.revoke_invite(invite.id, team_id).await.unwrap();
    assert_eq!(outcome, RevocationOutcome::Failure);
    let outcome = ctx.db.revoke_invite(InviteId::new(), team_id).await.unwrap();
    assert_eq!(outcome, RevocationOutcome::Failure);
}

#[tokio::test]
async fn inbound_listing_shows_only_active_invites() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_a, team_a, _) = client.create_team_owner("a@example.com", "TeamA").await;
    let (owner_b, team_b, _) = client.create_team_owner("b@example.com", "TeamB").await;
    let invitee = Email::parse("invitee@example.com").unwrap();

    ctx.db
        .send_invite(team_a, owner_a, &invitee, TeamRole::Member)
        .await
        .unwrap();
    let rejected = ctx
        .db
        .send_invite(team_b, owner_b, &invitee, TeamRole::Member)
        .await
        .unwrap();
    ctx.db.reject_invite(rejected.id, &invitee).await.unwrap();

    let inbound = ctx.db.get_inbound_invites(&invitee).await.unwrap();
    assert_eq!(inbound.len(), 1);
    assert_eq!(inbound[0].team_name, "TeamA");
    assert_eq!(inbound[0].inviter_email, "a@example.com");
}

#[tokio::test]
async fn outbound_listing_keeps_every_status() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    let first = Email::parse("first@example.com").unwrap();
    let second = Email::parse("second@example.com").unwrap();

    ctx.db
        .send_invite(team_id, owner_id, &first, TeamRole::Member)
        .await
        .unwrap();
    let revoked = ctx
        .db
        .send_invite(team_id, owner_id, &second, TeamRole::Member)
        .await
        .unwrap();
    ctx.db.revoke_invite(revoked.id, team_id).await.unwrap();

    let outbound = ctx.db.get_outbound_invites(team_id).await.unwrap();
    assert_eq!(outbound.len(), 2);
    assert!(outbound
        .iter()
        .any(|invite| invite.status == InviteStatus::Revoked));
    assert!(outbound
        .iter()
        .all(|invite| invite.inviter_email == "owner@example.com"));
}

#[tokio::test]
async fn malformed_invite_id_reads_as_not_found() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (_user_id, bearer) = client.create_test_user("user@example.com").await;
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/team/invites/not-a-uuid/accept")
        .insert_header(("Authorization", format!("Bearer {}", bearer)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn only_owners_can_send_invites() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, owner_bearer) =
        client.create_team_owner("owner@example.com", "Acme").await;
    let (_member_id, member_bearer) = client.create_test_user("member@example.com").await;
    let member = Email::parse("member@example.com").unwrap();

    let invite = ctx
        .db
        .send_invite(team_id, owner_id, &member, TeamRole::Member)
        .await
        .unwrap();
    ctx.db.accept_invite(invite.id, &member).await.unwrap();

    let app = test::init_service(client.create_app()).await;
    let req = test::TestRequest::post()
        .uri("/team/invites")
        .insert_header(("Authorization", format!("Bearer {}", member_bearer)))
        .set_json(json!({ "invitee_email": "third@example.com", "team_role": "member" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let req = test::TestRequest::post()
        .uri("/team/invites")
        .insert_header(("Authorization", format!("Bearer {}", owner_bearer)))
        .set_json(json!({ "invitee_email": "third@example.com", "team_role": "member" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["id"].as_str().is_some());
}
