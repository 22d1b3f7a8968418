use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct DBUserCreate {
    pub full_name: String,
    pub email: String,
    pub auth_hash: String,
    pub stripe_customer_id: Option<String>,
}
