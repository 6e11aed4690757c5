use serde::{Deserialize, Serialize};

pub mod create;
pub mod get_own;
pub mod update;

/// Profile endpoints, per role.
pub(crate) const JOB_SEEKER_PROFILE_PATH: &str = "/profiles/job-seeker";
pub(crate) const EMPLOYER_PROFILE_PATH: &str = "/profiles/employer";
pub(crate) const OWN_PROFILE_PATH: &str = "/profiles/me";

/// A past or current position on a job seeker profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    /// Job title.
    pub title: String,
    /// Employer name.
    pub company: String,
    /// Start date, as entered.
    pub start_date: String,
    /// End date, as entered; `None` for the current position.
    pub end_date: Option<String>,
    /// What the position involved.
    pub description: String,
}

/// A degree or course on a job seeker profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    /// School or university.
    pub institution: String,
    /// Degree obtained or pursued.
    pub degree: String,
    /// Field of study.
    pub field_of_study: String,
    /// Graduation year, as entered.
    pub graduation_year: Option<String>,
}
