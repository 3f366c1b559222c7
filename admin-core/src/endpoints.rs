use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Resource URL set for one entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSet {
    pub list: String,
    pub create: String,
    pub update: String,
    pub delete: String,
    /// Attachment upload base, present only for record types with images.
    #[serde(default)]
    pub upload: Option<String>,
}

impl EndpointSet {
    pub fn update_url(&self, id: i64) -> String {
        format!("{}/{}", self.update, id)
    }

    pub fn delete_url(&self, id: i64) -> String {
        format!("{}/{}", self.delete, id)
    }
}

/// Deployment configuration: API base URL and bearer token. Read from the
/// environment at startup; the defaults reproduce the original deployment's
/// paths over a single configurable host.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub token: String,
}

pub const DEFAULT_BASE: &str = "https://maktoum.oummal.org";

impl AppConfig {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// `ADMIN_API_BASE` / `ADMIN_API_TOKEN`, with the stock host as fallback.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("ADMIN_API_BASE").unwrap_or_else(|_| DEFAULT_BASE.to_string()),
            std::env::var("ADMIN_API_TOKEN").unwrap_or_default(),
        )
    }

    pub fn session(&self) -> Session {
        Session::new(self.token.clone())
    }

    pub fn countries(&self) -> EndpointSet {
        EndpointSet {
            list: format!("{}/country/all-countries", self.api_base),
            create: format!("{}/country", self.api_base),
            update: format!("{}/country", self.api_base),
            delete: format!("{}/country", self.api_base),
            upload: None,
        }
    }

    pub fn organizations(&self) -> EndpointSet {
        EndpointSet {
            list: format!("{}/organization/all-organizations", self.api_base),
            create: format!("{}/admin/organization", self.api_base),
            update: format!("{}/admin/organization", self.api_base),
            delete: format!("{}/admin/organization", self.api_base),
            upload: Some(format!("{}/admin/image/upload", self.api_base)),
        }
    }

    pub fn situations(&self) -> EndpointSet {
        EndpointSet {
            list: format!("{}/admin/all-situations", self.api_base),
            create: format!("{}/admin/add-situation", self.api_base),
            update: format!("{}/admin/situation", self.api_base),
            delete: format!("{}/admin/situation", self.api_base),
            upload: None,
        }
    }

    /// Base URL image references are resolved against.
    pub fn image_base(&self) -> String {
        format!("{}/admin/image", self.api_base)
    }
}
