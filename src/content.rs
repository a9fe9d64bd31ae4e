//! Static page content from `config/site.json` and the contact form.

use serde::Deserialize;

use crate::sections::{NavItem, NavigationModel};

const EMBEDDED_SITE_CONTENT: &str = include_str!("../config/site.json");

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub location: String,
    pub email: String,
    pub availability: String,
    #[serde(default)]
    pub cv_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Skill {
    pub name: String,
    pub level: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub link: String,
    #[serde(default)]
    pub github_link: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawSiteContent {
    owner: Owner,
    #[serde(default)]
    about: Vec<String>,
    nav: Vec<NavItem>,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteContent {
    pub owner: Owner,
    pub about: Vec<String>,
    pub navigation: NavigationModel,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
}

impl SiteContent {
    pub fn from_json(source: &str) -> Result<Self, &'static str> {
        let raw: RawSiteContent =
            serde_json::from_str(source).map_err(|_| "site content is not valid JSON")?;
        let navigation = NavigationModel::from_items(raw.nav)?;

        let skills = raw
            .skills
            .into_iter()
            .map(|skill| Skill {
                level: if skill.level.is_finite() {
                    skill.level.clamp(0.0, 100.0)
                } else {
                    0.0
                },
                ..skill
            })
            .collect();

        Ok(Self {
            owner: raw.owner,
            about: raw.about,
            navigation,
            skills,
            projects: raw.projects,
        })
    }

    pub fn embedded() -> Result<Self, &'static str> {
        Self::from_json(EMBEDDED_SITE_CONTENT)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Please tell me your name.");
        }
        if !looks_like_email(self.email.trim()) {
            return Err("Please enter a valid email address.");
        }
        if self.message.trim().is_empty() {
            return Err("Please write a message.");
        }
        Ok(())
    }

    /// A `mailto:` link that opens the visitor's mail client with the draft
    /// filled in. There is no server to post to.
    pub fn mailto_href(&self, recipient: &str) -> Result<String, &'static str> {
        self.validate()?;

        let subject = format!("Portfolio contact from {}", self.name.trim());
        let body = format!(
            "{}\n\n{} <{}>",
            self.message.trim(),
            self.name.trim(),
            self.email.trim()
        );
        Ok(format!(
            "mailto:{recipient}?subject={}&body={}",
            encode_component(&subject),
            encode_component(&body)
        ))
    }
}

/// Form status after handing a `mailto:` link to the browser. Success is only
/// reported when the navigation was accepted.
pub fn handoff_status(opened: bool, recipient: &str) -> Result<(), String> {
    if opened {
        Ok(())
    } else {
        Err(format!(
            "Could not open your mail app. Write to {recipient} directly."
        ))
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !value.contains(char::is_whitespace)
}

// Mail clients render `+` literally, so spaces must be `%20`.
fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
