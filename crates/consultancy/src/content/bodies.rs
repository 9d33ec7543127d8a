//! The seven public collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::ContentBody;
use crate::validation::{self, ValidationErrors};

fn title(errors: &mut ValidationErrors, field: &str, value: &str) {
    validation::required_text(errors, field, Some(value), 2, 200);
}

fn text(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    validation::required_text(errors, field, Some(value), 1, max);
}

fn url(errors: &mut ValidationErrors, field: &str, value: Option<&str>) {
    if let Some(value) = validation::optional_text(errors, field, value, 500) {
        if !(value.starts_with("https://") || value.starts_with("http://")) {
            errors.push(field, format!("{field} must be an http(s) URL"));
        }
    }
}

fn tags(errors: &mut ValidationErrors, field: &str, values: &[String]) {
    if values.len() > 20 {
        errors.push(field, format!("at most 20 {field} may be listed"));
    }
    if values.iter().any(|value| value.trim().is_empty()) {
        errors.push(field, format!("{field} may not contain blank entries"));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPost {
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub author: String,
    pub tags: Vec<String>,
}

impl ContentBody for BlogPost {
    const COLLECTION: &'static str = "blog";
    const PUBLIC_PATH: &'static str = "/api/content/blog";
    const ADMIN_PATH: &'static str = "/api/admin/blog";

    fn title(&self) -> &str {
        &self.title
    }

    fn validate(&self, errors: &mut ValidationErrors) {
        title(errors, "title", &self.title);
        text(errors, "excerpt", &self.excerpt, 500);
        text(errors, "body", &self.body, 50_000);
        text(errors, "author", &self.author, 100);
        tags(errors, "tags", &self.tags);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceOffering {
    pub title: String,
    pub summary: String,
    pub features: Vec<String>,
    pub order: u32,
}

impl ContentBody for ServiceOffering {
    const COLLECTION: &'static str = "services";
    const PUBLIC_PATH: &'static str = "/api/content/services";
    const ADMIN_PATH: &'static str = "/api/admin/services";

    fn title(&self) -> &str {
        &self.title
    }

    fn validate(&self, errors: &mut ValidationErrors) {
        title(errors, "title", &self.title);
        text(errors, "summary", &self.summary, 1000);
        tags(errors, "features", &self.features);
    }

    fn order(&self) -> Option<u32> {
        Some(self.order)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseStudy {
    pub title: String,
    pub client: String,
    pub industry: String,
    pub challenge: String,
    pub solution: String,
    pub results: Vec<String>,
}

impl ContentBody for CaseStudy {
    const COLLECTION: &'static str = "case-studies";
    const PUBLIC_PATH: &'static str = "/api/content/case-studies";
    const ADMIN_PATH: &'static str = "/api/admin/case-studies";

    fn title(&self) -> &str {
        &self.title
    }

    fn validate(&self, errors: &mut ValidationErrors) {
        title(errors, "title", &self.title);
        text(errors, "client", &self.client, 100);
        text(errors, "industry", &self.industry, 100);
        text(errors, "challenge", &self.challenge, 5000);
        text(errors, "solution", &self.solution, 5000);
        tags(errors, "results", &self.results);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub photo_url: Option<String>,
    pub order: u32,
}

impl ContentBody for TeamMember {
    const COLLECTION: &'static str = "team";
    const PUBLIC_PATH: &'static str = "/api/team";
    const ADMIN_PATH: &'static str = "/api/admin/team";

    fn title(&self) -> &str {
        &self.name
    }

    fn validate(&self, errors: &mut ValidationErrors) {
        title(errors, "name", &self.name);
        text(errors, "role", &self.role, 100);
        text(errors, "bio", &self.bio, 2000);
        url(errors, "photoUrl", self.photo_url.as_deref());
    }

    fn order(&self) -> Option<u32> {
        Some(self.order)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub registration_url: Option<String>,
}

impl ContentBody for Event {
    const COLLECTION: &'static str = "events";
    const PUBLIC_PATH: &'static str = "/api/events";
    const ADMIN_PATH: &'static str = "/api/admin/events";

    fn title(&self) -> &str {
        &self.title
    }

    fn validate(&self, errors: &mut ValidationErrors) {
        title(errors, "title", &self.title);
        text(errors, "description", &self.description, 5000);
        text(errors, "location", &self.location, 200);
        if self.starts_at.is_none() {
            errors.push("startsAt", "startsAt is required");
        }
        url(errors, "registrationUrl", self.registration_url.as_deref());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Investor {
    pub name: String,
    pub firm: String,
    pub bio: String,
    pub website: Option<String>,
}

impl ContentBody for Investor {
    const COLLECTION: &'static str = "investors";
    const PUBLIC_PATH: &'static str = "/api/investors";
    const ADMIN_PATH: &'static str = "/api/admin/investors";

    fn title(&self) -> &str {
        &self.name
    }

    fn validate(&self, errors: &mut ValidationErrors) {
        title(errors, "name", &self.name);
        text(errors, "firm", &self.firm, 100);
        text(errors, "bio", &self.bio, 2000);
        url(errors, "website", self.website.as_deref());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioProject {
    pub title: String,
    pub client: String,
    pub category: String,
    pub summary: String,
    pub technologies: Vec<String>,
    pub url: Option<String>,
}

impl ContentBody for PortfolioProject {
    const COLLECTION: &'static str = "portfolio";
    const PUBLIC_PATH: &'static str = "/api/portfolio";
    const ADMIN_PATH: &'static str = "/api/admin/portfolio";

    fn title(&self) -> &str {
        &self.title
    }

    fn validate(&self, errors: &mut ValidationErrors) {
        title(errors, "title", &self.title);
        text(errors, "client", &self.client, 100);
        text(errors, "category", &self.category, 100);
        text(errors, "summary", &self.summary, 2000);
        tags(errors, "technologies", &self.technologies);
        url(errors, "url", self.url.as_deref());
    }
}
