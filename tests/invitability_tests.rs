mod common;

use actix_web::test;
use common::client::TestClient;
use common::TestContext;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use std::sync::Arc;

use entity::enums::TeamRole;
use scaffold_teams::types::ids::Email;
use scaffold_teams::types::team::Invitability;

#[tokio::test]
async fn recent_invite_enforces_the_cooldown() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    let invitee = Email::parse("invitee@example.com").unwrap();

    ctx.db
        .send_invite(team_id, owner_id, &invitee, TeamRole::Member)
        .await
        .unwrap();

    let verdict = ctx
        .db
        .determine_invitability(team_id, &invitee)
        .await
        .unwrap();
    assert_eq!(verdict, Invitability::TooManyInvites);
}

#[tokio::test]
async fn aged_invite_can_be_sent_again() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    let invitee = Email::parse("invitee@example.com").unwrap();

    let invite = ctx
        .db
        .send_invite(team_id, owner_id, &invitee, TeamRole::Member)
        .await
        .unwrap();

    // push the invite past the one-hour window
    entity::invite::Entity::update_many()
        .col_expr(
            entity::invite::Column::UpdatedAt,
            Expr::value(chrono::Utc::now() - chrono::Duration::hours(2)),
        )
        .filter(entity::invite::Column::Id.eq(invite.id.as_uuid()))
        .exec(ctx.db.connection())
        .await
        .unwrap();

    let verdict = ctx
        .db
        .determine_invitability(team_id, &invitee)
        .await
        .unwrap();
    assert_eq!(verdict, Invitability::Invitable(invitee));
}

#[tokio::test]
async fn membership_takes_priority_over_the_cooldown() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (owner_id, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    // the target is already on a team of their own
    let (_, their_team, _) = client.create_team_owner("taken@example.com", "Theirs").await;
    let taken = Email::parse("taken@example.com").unwrap();

    // a fresh invite exists too; membership still wins
    ctx.db
        .send_invite(team_id, owner_id, &taken, TeamRole::Member)
        .await
        .unwrap();

    let verdict = ctx.db.determine_invitability(team_id, &taken).await.unwrap();
    assert_eq!(verdict, Invitability::AlreadyOnTeam(their_team));
}

#[tokio::test]
async fn unknown_email_is_invitable() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (_, team_id, _) = client.create_team_owner("owner@example.com", "Acme").await;
    let stranger = Email::parse("stranger@example.com").unwrap();

    let verdict = ctx
        .db
        .determine_invitability(team_id, &stranger)
        .await
        .unwrap();
    assert_eq!(verdict, Invitability::Invitable(stranger));
}

#[tokio::test]
async fn invite_routes_surface_the_gate() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(Arc::clone(&ctx.db));
    let (_, _, bearer) = client.create_team_owner("owner@example.com", "Acme").await;
    let app = test::init_service(client.create_app()).await;

    let fresh = || {
        test::TestRequest::post()
            .uri("/team/invites")
            .insert_header(("Authorization", format!("Bearer {}", bearer)))
            .set_json(json!({ "invitee_email": "invitee@example.com", "team_role": "member" }))
            .to_request()
    };

    let resp = test::call_service(&app, fresh()).await;
    assert_eq!(resp.status(), 200);

    // immediate resend trips the cooldown
    let resp = test::call_service(&app, fresh()).await;
    assert_eq!(resp.status(), 429);

    // inviting someone already on a team conflicts
    let req = test::TestRequest::post()
        .uri("/team/invites")
        .insert_header(("Authorization", format!("Bearer {}", bearer)))
        .set_json(json!({ "invitee_email": "owner@example.com", "team_role": "member" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}
