use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Schema hooks for the generic table+modal screen. One implementation per
/// entity type replaces the per-entity copies of the same CRUD view: the
/// screen gets its columns, search surface, validation rules, and merge
/// behavior from here.
pub trait Record:
    Clone + Default + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Singular display name, used in buttons and log lines.
    const KIND: &'static str;

    /// Plural screen title.
    const TITLE: &'static str;

    /// Whether the editor needs the Country reference list.
    const NEEDS_COUNTRIES: bool = false;

    /// Whether an image can be staged and uploaded after a save.
    const HAS_ATTACHMENT: bool = false;

    /// Server-assigned identifier; `None` until persisted.
    fn id(&self) -> Option<i64>;

    /// Every string-typed field, in declaration order. Search matches a
    /// case-insensitive substring against these; numeric and object-valued
    /// fields stay out.
    fn search_fields(&self) -> Vec<&str>;

    /// Presence checks only. A non-empty result blocks the save before any
    /// network call.
    fn validate(&self) -> Vec<String>;

    /// Merge server-echoed fields over this (the previous local copy).
    /// Fields the server does not echo back keep their local value.
    fn absorb(&mut self, server: Self);

    /// Body of the create POST. Most records post themselves.
    fn create_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    fn image_ref(&self) -> Option<&str> {
        None
    }

    fn set_image_ref(&mut self, _reference: String) {}

    /// Table projection for the generic view.
    fn column_titles() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Reference data: a country the caller can attach an organization to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    /// Two-letter code.
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Record for Country {
    const KIND: &'static str = "Country";
    const TITLE: &'static str = "Countries";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.country_code.as_str()];
        if let Some(description) = self.description.as_deref() {
            fields.push(description);
        }
        fields
    }

    fn validate(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("Name is required".to_string());
        }
        if self.country_code.trim().is_empty() {
            missing.push("Country code is required".to_string());
        }
        missing
    }

    fn absorb(&mut self, server: Self) {
        if server.id.is_some() {
            self.id = server.id;
        }
        take_text(&mut self.name, server.name);
        take_text(&mut self.country_code, server.country_code);
        take_opt(&mut self.description, server.description);
    }

    fn column_titles() -> &'static [&'static str] {
        &["Name", "Code", "Description"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.country_code.clone(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}

/// The richest entity: free-text contact fields, an owned Country reference,
/// an optional image, and server-assigned timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    /// Nullable before selection; required before save.
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub social_media: String,
    #[serde(default)]
    pub projects: String,
    /// Server-relative image reference, resolved against the image base URL.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

impl Record for Organization {
    const KIND: &'static str = "Organization";
    const TITLE: &'static str = "Organizations";
    const NEEDS_COUNTRIES: bool = true;
    const HAS_ATTACHMENT: bool = true;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        // The country object and the numeric id are not searched.
        let mut fields = vec![
            self.name.as_str(),
            self.email.as_str(),
            self.phone_number.as_str(),
            self.notes.as_str(),
            self.description.as_str(),
            self.website.as_str(),
            self.contact_person.as_str(),
            self.social_media.as_str(),
            self.projects.as_str(),
        ];
        for optional in [&self.image_url, &self.created_at, &self.modified_at] {
            if let Some(value) = optional.as_deref() {
                fields.push(value);
            }
        }
        fields
    }

    fn validate(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("Name is required".to_string());
        }
        if self.country.is_none() {
            missing.push("Country is required".to_string());
        }
        missing
    }

    fn absorb(&mut self, server: Self) {
        if server.id.is_some() {
            self.id = server.id;
        }
        take_text(&mut self.name, server.name);
        take_text(&mut self.email, server.email);
        take_text(&mut self.phone_number, server.phone_number);
        if server.country.is_some() {
            self.country = server.country;
        }
        take_text(&mut self.notes, server.notes);
        take_text(&mut self.description, server.description);
        take_text(&mut self.website, server.website);
        take_text(&mut self.contact_person, server.contact_person);
        take_text(&mut self.social_media, server.social_media);
        take_text(&mut self.projects, server.projects);
        take_opt(&mut self.image_url, server.image_url);
        take_opt(&mut self.created_at, server.created_at);
        take_opt(&mut self.modified_at, server.modified_at);
    }

    /// The create endpoint expects an envelope; update posts the bare record.
    fn create_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "organization": self,
            "situationId": serde_json::Value::Null,
        })
    }

    fn image_ref(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn set_image_ref(&mut self, reference: String) {
        self.image_url = Some(reference);
    }

    fn column_titles() -> &'static [&'static str] {
        &[
            "Name",
            "Contact person",
            "Phone",
            "Email",
            "Country",
            "Website",
            "Image",
            "Created",
            "Modified",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.contact_person.clone(),
            self.phone_number.clone(),
            self.email.clone(),
            self.country
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            self.website.clone(),
            self.image_url
                .clone()
                .unwrap_or_else(|| "No image".to_string()),
            self.created_at.clone().unwrap_or_default(),
            self.modified_at.clone().unwrap_or_default(),
        ]
    }
}

/// Same generic shape as the others; only a name is specified beyond the
/// free-text description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Situation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

impl Record for Situation {
    const KIND: &'static str = "Situation";
    const TITLE: &'static str = "Situations";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        for optional in [&self.description, &self.created_at, &self.modified_at] {
            if let Some(value) = optional.as_deref() {
                fields.push(value);
            }
        }
        fields
    }

    fn validate(&self) -> Vec<String> {
        if self.name.trim().is_empty() {
            vec!["Name is required".to_string()]
        } else {
            Vec::new()
        }
    }

    fn absorb(&mut self, server: Self) {
        if server.id.is_some() {
            self.id = server.id;
        }
        take_text(&mut self.name, server.name);
        take_opt(&mut self.description, server.description);
        take_opt(&mut self.created_at, server.created_at);
        take_opt(&mut self.modified_at, server.modified_at);
    }

    fn column_titles() -> &'static [&'static str] {
        &["Name", "Description", "Created", "Modified"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone().unwrap_or_default(),
            self.created_at.clone().unwrap_or_default(),
            self.modified_at.clone().unwrap_or_default(),
        ]
    }
}

fn take_text(local: &mut String, server: String) {
    if !server.is_empty() {
        *local = server;
    }
}

fn take_opt(local: &mut Option<String>, server: Option<String>) {
    if server.is_some() {
        *local = server;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn organization(name: &str) -> Organization {
        Organization {
            id: Some(4),
            name: name.to_string(),
            email: "contact@example.org".to_string(),
            phone_number: "+1 555 0100".to_string(),
            country: Some(Country {
                id: Some(1),
                name: "Atlantis".to_string(),
                country_code: "AT".to_string(),
                description: None,
            }),
            notes: "field notes".to_string(),
            ..Organization::default()
        }
    }

    #[test]
    fn organization_requires_name_and_country() {
        let mut org = organization("Relief Works");
        assert!(org.validate().is_empty());

        org.name = "  ".to_string();
        org.country = None;
        let missing = org.validate();
        assert_eq!(missing.len(), 2);
    }

    #[test]
    fn search_fields_exclude_the_country_object() {
        let org = organization("Relief Works");
        let fields = org.search_fields();
        assert!(fields.contains(&"Relief Works"));
        assert!(fields.contains(&"field notes"));
        assert!(!fields.contains(&"Atlantis"));
    }

    #[test]
    fn absorb_keeps_fields_the_server_does_not_echo() {
        let mut local = organization("Relief Works");
        let server = Organization {
            id: Some(4),
            name: "Relief Works Intl".to_string(),
            modified_at: Some("2025-01-01T00:00:00Z".to_string()),
            ..Organization::default()
        };
        local.absorb(server);

        assert_eq!(local.name, "Relief Works Intl");
        assert_eq!(local.email, "contact@example.org");
        assert_eq!(local.notes, "field notes");
        assert_eq!(local.modified_at.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert!(local.country.is_some());
    }

    #[test]
    fn organization_create_payload_is_enveloped() {
        let org = organization("Relief Works");
        let payload = org.create_payload();
        assert_eq!(payload["organization"]["name"], "Relief Works");
        assert!(payload["situationId"].is_null());
    }

    #[test]
    fn unpersisted_records_serialize_without_an_id() {
        let country = Country {
            name: "Chad".to_string(),
            country_code: "TD".to_string(),
            ..Country::default()
        };
        let json = serde_json::to_value(&country).expect("serialize");
        assert!(json.get("id").is_none());
        assert_eq!(json["countryCode"], "TD");
    }

    #[test]
    fn wire_format_tolerates_missing_optional_fields() {
        let org: Organization =
            serde_json::from_str(r#"{"id": 9, "name": "Shelter", "country": null}"#)
                .expect("deserialize");
        assert_eq!(org.id, Some(9));
        assert!(org.country.is_none());
        assert!(org.image_url.is_none());
    }
}
