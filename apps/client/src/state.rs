use std::sync::Arc;

use crate::admin::{AdminConsole, AdminState};
use crate::ai::Rephraser;
use crate::api_client::{ApiClient, ResourceApi};
use crate::config::Config;
use crate::errors::ClientError;
use crate::extraction::ResumeExtractor;
use crate::models::award::AwardRecord;
use crate::models::certification::CertificationRecord;
use crate::models::custom_resume::CustomResumeRecord;
use crate::models::education::EducationRecord;
use crate::models::experience::ExperienceRecord;
use crate::models::heading::HeadingRecord;
use crate::models::project::ProjectRecord;
use crate::models::skill::SkillRecord;
use crate::models::volunteer::VolunteerRecord;
use crate::sections::{
    Awards, Certifications, CustomResumes, Educations, Experiences, Headings, Projects, Section,
    SectionEditor, SectionState, Skills, Volunteers,
};

/// Root of all client-side state: one container per resume section, the
/// custom resumes built from them and the admin console, plus the single
/// API client they all share.
pub struct AppState {
    pub config: Config,
    pub client: ApiClient,
    pub headings: SectionState<HeadingRecord>,
    pub educations: SectionState<EducationRecord>,
    pub experiences: SectionState<ExperienceRecord>,
    pub projects: SectionState<ProjectRecord>,
    pub skills: SectionState<SkillRecord>,
    pub certifications: SectionState<CertificationRecord>,
    pub awards: SectionState<AwardRecord>,
    pub volunteers: SectionState<VolunteerRecord>,
    pub custom_resumes: SectionState<CustomResumeRecord>,
    pub admin: AdminState,
}

/// Locates a section's state container inside [`AppState`].
pub trait Slot: Section {
    fn slot(app: &mut AppState) -> &mut SectionState<Self::Record>;
}

macro_rules! slot {
    ($($section:ty => $field:ident),+ $(,)?) => {
        $(
            impl Slot for $section {
                fn slot(app: &mut AppState) -> &mut SectionState<Self::Record> {
                    &mut app.$field
                }
            }
        )+
    };
}

slot!(
    Headings => headings,
    Educations => educations,
    Experiences => experiences,
    Projects => projects,
    Skills => skills,
    Certifications => certifications,
    Awards => awards,
    Volunteers => volunteers,
    CustomResumes => custom_resumes,
);

impl AppState {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let client = ApiClient::new(&config)?;
        Ok(Self {
            config,
            client,
            headings: SectionState::new(),
            educations: SectionState::new(),
            experiences: SectionState::new(),
            projects: SectionState::new(),
            skills: SectionState::new(),
            certifications: SectionState::new(),
            awards: SectionState::new(),
            volunteers: SectionState::new(),
            custom_resumes: SectionState::new(),
            admin: AdminState::new(),
        })
    }

    pub fn editor<S: Section>(&self) -> SectionEditor<S> {
        let api: Arc<dyn ResourceApi> = Arc::new(self.client.clone());
        SectionEditor::new(api)
    }

    pub fn admin_console(&self) -> AdminConsole {
        AdminConsole::new(Arc::new(self.client.clone()))
    }

    pub fn extractor(&self) -> ResumeExtractor {
        ResumeExtractor::new(self.client.clone())
    }

    pub fn rephraser(&self) -> Rephraser {
        Rephraser::new(self.client.clone())
    }

    /// Moves a section's state out for an action; pair with [`AppState::put`].
    pub fn take<S: Slot>(&mut self) -> SectionState<S::Record> {
        std::mem::take(S::slot(self))
    }

    pub fn put<S: Slot>(&mut self, state: SectionState<S::Record>) {
        *S::slot(self) = state;
    }

    pub fn take_admin(&mut self) -> AdminState {
        std::mem::take(&mut self.admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_and_put_round_trip() {
        let mut app = AppState::new(Config::for_base_url("http://127.0.0.1:9")).unwrap();
        let (state, _) = app.take::<Awards>().begin_refresh();
        app.put::<Awards>(state);

        assert!(app.awards.loading);
        assert!(!app.skills.loading);

        let (state, _) = app.take::<CustomResumes>().begin_refresh();
        app.put::<CustomResumes>(state);
        assert!(app.custom_resumes.loading);
    }
}
