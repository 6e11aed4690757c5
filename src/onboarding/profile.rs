//! Profile completion: the form behind `/onboarding`.
//!
//! The route guard sends every logged in user without a profile here. On
//! submit the role-specific profile is created, the user is re-fetched so that
//! `has_profile` flips, and the form redirects to the role's dashboard.

use serde::Serialize;
use tracing::info;

use super::{inline_error, is_blank, looks_like_email, FlowError, Transition};
use crate::error::ApiError;
use crate::guard::dashboard_for;
use crate::profiles::{EducationEntry, ExperienceEntry};
use crate::scope::ViewScope;
use crate::session::{Role, User};
use crate::EmployMe;

/// Job seeker profile fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSeekerDraft {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number.
    pub phone: String,
    /// City or region.
    pub location: String,
    /// Short introduction.
    pub bio: String,
    /// Skills, deduplicated.
    pub skills: Vec<String>,
    /// Work history.
    pub experience: Vec<ExperienceEntry>,
    /// Education history.
    pub education: Vec<EducationEntry>,
}

impl JobSeekerDraft {
    /// Adds a skill. Blank and already present skills (ignoring case) are skipped.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty()
            || self
                .skills
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(skill))
        {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Removes a skill, ignoring case.
    pub fn remove_skill(&mut self, skill: &str) {
        let skill = skill.trim();
        self.skills
            .retain(|existing| !existing.eq_ignore_ascii_case(skill));
    }

    /// Adds every skill of a comma separated list.
    pub fn add_skills_from_list(&mut self, list: &str) {
        for skill in list.split(',') {
            self.add_skill(skill);
        }
    }

    fn validate(&self) -> Result<(), String> {
        if is_blank(&self.first_name) || is_blank(&self.last_name) {
            return Err("Please enter your first and last name.".to_string());
        }
        if is_blank(&self.location) {
            return Err("Please enter your location.".to_string());
        }
        Ok(())
    }
}

/// Employer profile fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerDraft {
    /// Company name.
    pub company_name: String,
    /// Industry.
    pub industry: String,
    /// Headcount bracket, e.g. `11-50`.
    pub company_size: String,
    /// Company website.
    pub website: String,
    /// Headquarters location.
    pub location: String,
    /// What the company does.
    pub description: String,
    /// Contact email for applicants.
    pub contact_email: String,
    /// Contact phone.
    pub contact_phone: String,
}

impl EmployerDraft {
    fn validate(&self) -> Result<(), String> {
        if is_blank(&self.company_name) {
            return Err("Please enter your company name.".to_string());
        }
        if is_blank(&self.industry) {
            return Err("Please select an industry.".to_string());
        }
        if !looks_like_email(&self.contact_email) {
            return Err("Please enter a valid contact email.".to_string());
        }
        Ok(())
    }
}

/// The role-specific draft being filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileDraft {
    /// Job seeker form.
    JobSeeker(JobSeekerDraft),
    /// Employer form.
    Employer(EmployerDraft),
}

impl ProfileDraft {
    fn blank_like(&self) -> Self {
        match self {
            Self::JobSeeker(_) => Self::JobSeeker(JobSeekerDraft::default()),
            Self::Employer(_) => Self::Employer(EmployerDraft::default()),
        }
    }

    /// Checks the draft before anything is sent; returns the message to show.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::JobSeeker(draft) => draft.validate(),
            Self::Employer(draft) => draft.validate(),
        }
    }
}

/// The profile completion form.
///
/// # Example
/// ```rust,ignore
/// let user = client.session().snapshot().user.expect("guarded route");
/// let mut form = ProfileCompletion::for_user(&user)?;
///
/// if let ProfileDraft::Employer(draft) = form.draft_mut() {
///     draft.company_name = "Acme".to_string();
///     draft.industry = "Manufacturing".to_string();
/// }
///
/// if let Transition::Redirect(to) = form.submit(&mut client).await {
///     navigate(to);
/// }
/// ```
#[derive(Debug)]
pub struct ProfileCompletion {
    role: Role,
    draft: ProfileDraft,
    error: Option<String>,
    scope: ViewScope,
}

impl ProfileCompletion {
    /// Creates the form matching the user's role, prefilled from the account.
    pub fn for_user(user: &User) -> Result<Self, FlowError> {
        let draft = match user.role {
            Role::JobSeeker => ProfileDraft::JobSeeker(JobSeekerDraft {
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                ..JobSeekerDraft::default()
            }),
            Role::Employer => ProfileDraft::Employer(EmployerDraft {
                contact_email: user.email.clone(),
                ..EmployerDraft::default()
            }),
            Role::Admin => return Err(FlowError::NoProfileForm),
        };

        Ok(Self {
            role: user.role,
            draft,
            error: None,
            scope: ViewScope::new(),
        })
    }

    /// Role the profile is for.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// The draft being filled in.
    #[must_use]
    pub const fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Mutable access to the draft, for input bindings.
    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    /// Inline error to display, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The scope of this form's calls. Cancel it when the view goes away.
    #[must_use]
    pub const fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Creates the profile, refreshes the user, and redirects to the dashboard.
    ///
    /// Validation and API failures keep the form open with an inline error. On
    /// success the draft is discarded.
    ///
    /// If the scope is cancelled after the profile was created but before the
    /// user was refreshed, this returns [`Transition::Cancelled`] even though
    /// the profile now exists server-side. The session still reports no
    /// profile until the next `check_session` or `refresh_user`; the draft is
    /// kept.
    pub async fn submit(&mut self, client: &mut EmployMe) -> Transition {
        self.error = None;

        if let Err(message) = self.draft.validate() {
            self.error = Some(message);
            return Transition::Stayed;
        }

        let created = match &self.draft {
            ProfileDraft::JobSeeker(draft) => {
                self.scope
                    .run(client.profiles().create_job_seeker(draft))
                    .await
            }
            ProfileDraft::Employer(draft) => {
                self.scope
                    .run(client.profiles().create_employer(draft))
                    .await
            }
        };

        if let Err(error) = created {
            return match inline_error(&error) {
                Some(message) => {
                    self.error = Some(message);
                    Transition::Stayed
                }
                None => Transition::Cancelled,
            };
        }

        info!(role = %self.role, "profile completed");

        let refreshed = self
            .scope
            .run(async { Ok::<_, ApiError>(client.auth().refresh_user().await) })
            .await;
        if refreshed.is_err() {
            return Transition::Cancelled;
        }

        self.draft = self.draft.blank_like();
        Transition::Redirect(dashboard_for(self.role))
    }
}
