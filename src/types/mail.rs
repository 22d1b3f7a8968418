use serde::Serialize;

#[derive(Serialize)]
pub struct SendEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
}

impl Default for SendEmail {
    fn default() -> Self {
        Self {
            from: "noreply@scaffold.dev".to_string(),
            to: vec![],
            subject: String::new(),
            html: None,
            text: None,
        }
    }
}
