pub mod admin;
pub mod ai;
pub mod award;
pub mod certification;
pub mod custom_resume;
pub mod dashboard;
pub mod education;
pub mod experience;
pub mod heading;
pub mod project;
pub mod skill;
pub mod volunteer;

/// Anything the backend returns with a server-assigned identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

identified!(
    award::AwardRecord,
    certification::CertificationRecord,
    custom_resume::CustomResumeRecord,
    education::EducationRecord,
    experience::ExperienceRecord,
    heading::HeadingRecord,
    project::ProjectRecord,
    skill::SkillRecord,
    volunteer::VolunteerRecord,
);
