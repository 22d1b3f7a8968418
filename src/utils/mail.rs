use reqwest::ClientBuilder;
use tracing::{debug, warn};

use crate::config::MailConfig;
use crate::types::ids::{Email, InviteId};
use crate::types::mail::SendEmail;

const RESEND_API: &str = "https://api.resend.com/emails";

/// Outbound mail through Resend. Every send here is best-effort: the
/// membership operations never fail because a notification didn't go out.
pub struct Mailer {
    config: MailConfig,
}

impl Mailer {
    pub fn new(config: MailConfig) -> Self {
        Mailer { config }
    }

    pub async fn send_team_invite(
        &self,
        to: &Email,
        team_name: &str,
        invite_id: &InviteId,
    ) -> Result<(), String> {
        let email = SendEmail {
            from: self.config.from_address.clone(),
            to: vec![to.as_str().to_string()],
            subject: format!("You've been invited to join {team_name}"),
            text: Some(format!(
                "You've been invited to join the team {team_name}.\n\
                 Accept or decline with invite code: {invite_id}"
            )),
            ..Default::default()
        };
        self.send_email(email).await
    }

    async fn send_email(&self, email: SendEmail) -> Result<(), String> {
        if self.config.api_key.is_empty() {
            debug!("mail disabled, skipping send to {:?}", email.to);
            return Ok(());
        }

        let client = ClientBuilder::new()
            .user_agent("scaffold-teams/1.0 (+reqwest)")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| format!("build client failed: {e}"))?;

        let res = client
            .post(RESEND_API)
            .bearer_auth(&self.config.api_key)
            .json(&email)
            .send()
            .await
            .map_err(|e| format!("send failed: {e}"))?;

        let status = res.status();
        if status.is_success() {
            debug!(%status, "mail accepted");
            Ok(())
        } else {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, body, "mail rejected");
            Err(format!("Resend API error: HTTP {status}"))
        }
    }
}
