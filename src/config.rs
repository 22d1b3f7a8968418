use std::env;

/// Built once in `main` and handed to constructors / app data explicitly.
/// Nothing reads the process environment after startup.
#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub mail: MailConfig,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_key: String,
    pub from_address: String,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        EnvConfig {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            db_url: Self::get_env("POSTGRES_URI"),
            mail: MailConfig {
                // empty key disables outbound mail entirely
                api_key: env::var("RESEND_KEY").unwrap_or_default(),
                from_address: env::var("MAIL_FROM")
                    .unwrap_or_else(|_| "noreply@scaffold.dev".to_string()),
            },
        }
    }
}
