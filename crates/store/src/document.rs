//! The application document: the single JSON aggregate holding all state.

use buildmatch_core::types::{EntityId, Timestamp};
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::request::ProjectRequest;
use crate::models::role::Role;
use crate::models::user::User;

/// Id of the bootstrap admin seeded into every fresh document. This user
/// can never be deleted.
pub const BOOTSTRAP_ADMIN_ID: EntityId = 1;

/// The whole persisted document. Every collection defaults to empty so a
/// partially-shaped blob still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppDocument {
    pub settings: SiteSettings,
    /// Bootstrap users (the seeded admin); separate from self-registered
    /// accounts.
    pub users: Vec<User>,
    pub registered_users: Vec<User>,
    /// The single global request collection; requests are never nested
    /// under a project or a user.
    pub project_requests: Vec<ProjectRequest>,
    pub content: ContentSection,
    pub forms: FormsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: String,
    pub version: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentSection {
    pub pages: Vec<Page>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub content: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormsSection {
    pub contact: ContactForm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
}

impl AppDocument {
    /// The embedded default document: the final fallback of the load
    /// pipeline. Always well-formed, always contains the bootstrap admin.
    pub fn seed() -> Self {
        let seeded_at = seed_timestamp();
        Self {
            settings: SiteSettings {
                site_name: "Building Web Project".to_string(),
                site_description: "A construction project marketplace".to_string(),
                version: "1.0.0".to_string(),
                last_updated: "2024-01-01".to_string(),
            },
            users: vec![User {
                id: BOOTSTRAP_ADMIN_ID,
                username: "admin".to_string(),
                email: "admin@example.com".to_string(),
                password: "admin123".to_string(),
                role: Role::Admin,
                created_at: seeded_at,
                experience: None,
                skills: None,
                bio: None,
                past_projects: None,
                photo: None,
                cv: None,
                projects: Vec::new(),
            }],
            registered_users: Vec::new(),
            project_requests: Vec::new(),
            content: ContentSection {
                pages: vec![
                    seed_page("home", "Home", "Welcome to our construction marketplace!"),
                    seed_page("about", "About", "Learn more about our project and mission."),
                    seed_page("contact", "Contact", "Get in touch with us."),
                ],
                posts: vec![Post {
                    id: 1,
                    title: "Getting Started".to_string(),
                    content: "How to find the right engineer for your building project."
                        .to_string(),
                    author: "admin".to_string(),
                    created_at: Some(seeded_at),
                    tags: vec!["getting-started".to_string(), "tutorial".to_string()],
                }],
            },
            forms: FormsSection {
                contact: ContactForm {
                    fields: vec![
                        seed_field("name", "Name", "text"),
                        seed_field("email", "Email", "email"),
                        seed_field("message", "Message", "textarea"),
                    ],
                },
            },
        }
    }

    /// Highest entity id present anywhere in the document. Used to seed
    /// the id allocator so new ids sort after existing ones.
    pub fn max_entity_id(&self) -> EntityId {
        let mut max = 0;
        for user in self.users.iter().chain(self.registered_users.iter()) {
            max = max.max(user.id);
            for project in &user.projects {
                max = max.max(project.id);
            }
        }
        for request in &self.project_requests {
            max = max.max(request.id);
            for step in &request.project_steps {
                max = max.max(step.id);
            }
        }
        max
    }

    /// The bootstrap admin, if present (it always is in seeded documents).
    pub fn bootstrap_admin(&self) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.id == BOOTSTRAP_ADMIN_ID && u.role == Role::Admin)
    }
}

fn seed_timestamp() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("seed timestamp is a valid calendar date")
}

fn seed_page(id: &str, title: &str, content: &str) -> Page {
    Page {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        active: true,
    }
}

fn seed_field(name: &str, label: &str, field_type: &str) -> FormField {
    FormField {
        name: name.to_string(),
        label: label.to_string(),
        field_type: field_type.to_string(),
        required: true,
    }
}
