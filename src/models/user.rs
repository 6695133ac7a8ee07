// src/models/user.rs

use serde::{Deserialize, Serialize};

/// Identity supplied by the external authentication provider.
/// The provider owns sign-in persistence; this is only the shape the core
/// reads back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl AuthUser {
    /// Name shown next to user-generated content.
    /// Falls back to the email address, then to "Anonymous".
    pub fn display_label(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Anonymous".to_string())
    }
}
