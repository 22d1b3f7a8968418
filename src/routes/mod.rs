use crate::utils::webutils::validate_token;
use actix_web::web;

pub mod health;
pub mod invite;
pub mod team;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let user_auth = actix_web_httpauth::middleware::HttpAuthentication::bearer(validate_token);

    cfg.service(web::scope("/health").service(health::health));
    cfg.service(
        web::scope("/team")
            .wrap(user_auth)
            .service(team::create::create_team)
            .service(team::name::team_name)
            .service(team::members::team_members)
            .service(team::membership::membership_info)
            .service(team::remove::remove_member)
            .service(
                web::scope("/invites")
                    .service(invite::send::send_invite)
                    .service(invite::inbound::inbound_invites)
                    .service(invite::outbound::outbound_invites)
                    .service(invite::accept::accept_invite)
                    .service(invite::reject::reject_invite)
                    .service(invite::revoke::revoke_invite),
            ),
    );
}
