use serde::{Deserialize, Serialize};

/// About/contact content for the portfolio owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub greeting: String,
    pub headline: String,
    pub summary: String,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub skills_heading: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub footer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub desired_role: String,
    #[serde(default)]
    pub desired_industry: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub period: String,
    pub company: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}
