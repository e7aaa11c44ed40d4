//! Page Composition - Route to View Model
//!
//! The composer turns a resolved route into a fully populated page. It never
//! fails: an unknown project id yields the project-not-found view.

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{Profile, ProjectCatalog, ProjectRecord};
use crate::form::{ContactForm, SubmissionStatus};
use crate::routing::{project_path, Route, HOME_PATH};
use crate::validation::Field;

pub const RESUME_PATH: &str = "/resume.pdf";
pub const SUCCESS_MESSAGE: &str = "Thanks! Your message has been sent. I'll get back to you soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    About,
    Projects,
    Experience,
    Contact,
}

/// Home view order. Never reordered, never filtered.
pub const HOME_SECTIONS: [SectionKind; 5] = [
    SectionKind::Hero,
    SectionKind::About,
    SectionKind::Projects,
    SectionKind::Experience,
    SectionKind::Contact,
];

impl SectionKind {
    pub fn anchor(&self) -> &'static str {
        match self {
            SectionKind::Hero => "home",
            SectionKind::About => "about",
            SectionKind::Projects => "projects",
            SectionKind::Experience => "experience",
            SectionKind::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    /// Opens in a new viewing context.
    pub external: bool,
}

impl NavLink {
    fn internal(label: &str, href: impl Into<String>) -> Self {
        Self { label: label.to_string(), href: href.into(), external: false }
    }

    fn external(label: &str, href: impl Into<String>) -> Self {
        Self { label: label.to_string(), href: href.into(), external: true }
    }

    fn home(label: &str) -> Self {
        Self::internal(label, HOME_PATH)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub nav: Vec<NavLink>,
    pub resume: NavLink,
    pub social: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub layout: Layout,
    pub view: View,
}

impl Page {
    /// Both the 404 view and the missing-project fallback.
    pub fn is_not_found(&self) -> bool {
        matches!(self.view, View::NotFound { .. } | View::ProjectNotFound { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Home { sections: Vec<Section> },
    Project(ProjectView),
    ProjectNotFound { id: String, back: NavLink },
    NotFound { heading: String, message: String, back: NavLink },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum Section {
    Hero(HeroSection),
    About(AboutSection),
    Projects(ProjectsSection),
    Experience(ExperienceSection),
    Contact(ContactSection),
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Hero(_) => SectionKind::Hero,
            Section::About(_) => SectionKind::About,
            Section::Projects(_) => SectionKind::Projects,
            Section::Experience(_) => SectionKind::Experience,
            Section::Contact(_) => SectionKind::Contact,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroSection {
    pub greeting: String,
    pub name: String,
    pub tagline: String,
    pub summary: String,
    pub actions: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutSection {
    pub paragraphs: Vec<String>,
    pub skills: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsSection {
    pub heading: String,
    pub cards: Vec<ProjectCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image: String,
    pub href: String,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceSection {
    pub heading: String,
    pub entries: Vec<ExperienceItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceItem {
    pub company: String,
    pub title: String,
    pub duration: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactSection {
    pub heading: String,
    pub description: String,
    pub fields: Vec<FormFieldView>,
    pub submit_label: String,
    pub submit_enabled: bool,
    pub status: SubmissionStatus,
    /// Outcome line for `success` and `error`; `None` otherwise.
    pub status_message: Option<String>,
    /// The rendered form has no delivery endpoint; this is the way to write instead.
    pub direct: NavLink,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormFieldView {
    pub field: Field,
    pub label: String,
    pub value: String,
    pub multiline: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub links: Vec<NavLink>,
    pub image: String,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
    pub overview: String,
    pub challenges: String,
    pub learnings: String,
    pub back: NavLink,
}

/// Assembles pages from the catalog and profile content.
#[derive(Debug, Clone)]
pub struct PageComposer {
    catalog: Arc<ProjectCatalog>,
    profile: Arc<Profile>,
}

impl PageComposer {
    pub fn new(catalog: Arc<ProjectCatalog>, profile: Arc<Profile>) -> Self {
        Self { catalog, profile }
    }

    pub fn catalog(&self) -> &ProjectCatalog {
        &self.catalog
    }

    /// Compose with a fresh contact form.
    pub fn compose(&self, route: &Route) -> Page {
        self.compose_with_form(route, &ContactForm::new())
    }

    pub fn compose_with_form(&self, route: &Route, form: &ContactForm) -> Page {
        let (title, view) = match route {
            Route::Home => (self.profile.name.clone(), self.home(form)),
            Route::ProjectDetail(id) => match self.catalog.get(id) {
                Some(project) => (
                    format!("{} | {}", project.title, self.profile.name),
                    View::Project(project_view(project)),
                ),
                None => (
                    format!("Project not found | {}", self.profile.name),
                    View::ProjectNotFound {
                        id: id.clone(),
                        back: NavLink::home("Back to Home"),
                    },
                ),
            },
            Route::NotFound => (
                format!("404 | {}", self.profile.name),
                View::NotFound {
                    heading: "Page Not Found".to_string(),
                    message: "The page you're looking for doesn't exist or has been moved. Please check the URL or return to the home page.".to_string(),
                    back: NavLink::home("Return Home"),
                },
            ),
        };

        Page {
            title,
            layout: self.layout(),
            view,
        }
    }

    fn layout(&self) -> Layout {
        Layout {
            nav: [SectionKind::About, SectionKind::Experience, SectionKind::Projects, SectionKind::Contact]
                .iter()
                .map(|kind| NavLink::internal(nav_label(*kind), format!("/#{}", kind.anchor())))
                .collect(),
            resume: NavLink::external("Resume", RESUME_PATH),
            social: self.social_links(),
        }
    }

    fn social_links(&self) -> Vec<NavLink> {
        self.profile
            .social
            .iter()
            .map(|s| NavLink::external(&s.label, s.url.clone()))
            .collect()
    }

    fn home(&self, form: &ContactForm) -> View {
        let sections = HOME_SECTIONS
            .iter()
            .map(|kind| match kind {
                SectionKind::Hero => Section::Hero(self.hero()),
                SectionKind::About => Section::About(self.about()),
                SectionKind::Projects => Section::Projects(self.projects()),
                SectionKind::Experience => Section::Experience(self.experience()),
                SectionKind::Contact => Section::Contact(contact(form, &self.profile.email)),
            })
            .collect();
        View::Home { sections }
    }

    fn hero(&self) -> HeroSection {
        HeroSection {
            greeting: "Hi, my name is".to_string(),
            name: self.profile.name.clone(),
            tagline: self.profile.tagline.clone(),
            summary: self.profile.summary.clone(),
            actions: vec![
                NavLink::internal("Check out my work!", format!("/#{}", SectionKind::Projects.anchor())),
                NavLink::external("Get In Touch", format!("mailto:{}", self.profile.email)),
            ],
        }
    }

    fn about(&self) -> AboutSection {
        AboutSection {
            paragraphs: self.profile.about.clone(),
            skills: self
                .profile
                .skills
                .iter()
                .map(|s| (s.category.clone(), s.items.clone()))
                .collect(),
        }
    }

    fn projects(&self) -> ProjectsSection {
        ProjectsSection {
            heading: "Some Things I've Built".to_string(),
            cards: self
                .catalog
                .list()
                .into_iter()
                .map(|p| ProjectCard {
                    id: p.id.clone(),
                    title: p.title.clone(),
                    description: p.description.clone(),
                    tags: p.tags.clone(),
                    image: p.media.clone(),
                    href: project_path(&p.id),
                    links: external_links(p),
                })
                .collect(),
        }
    }

    fn experience(&self) -> ExperienceSection {
        ExperienceSection {
            heading: "Where I've Worked".to_string(),
            entries: self
                .profile
                .experience
                .iter()
                .map(|e| ExperienceItem {
                    company: e.company.clone(),
                    title: e.title.clone(),
                    duration: e.duration.clone(),
                    highlights: e.highlights.clone(),
                })
                .collect(),
        }
    }
}

impl Default for PageComposer {
    fn default() -> Self {
        Self::new(Arc::new(ProjectCatalog::builtin()), Arc::new(Profile::default()))
    }
}

fn nav_label(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Hero => "Home",
        SectionKind::About => "About",
        SectionKind::Projects => "Projects",
        SectionKind::Experience => "Experience",
        SectionKind::Contact => "Contact",
    }
}

fn external_links(project: &ProjectRecord) -> Vec<NavLink> {
    let mut links = vec![];
    if let Some(url) = &project.links.repository {
        links.push(NavLink::external("View Code", url.clone()));
    }
    if let Some(url) = &project.links.live_demo {
        links.push(NavLink::external("Live Demo", url.clone()));
    }
    links
}

fn project_view(project: &ProjectRecord) -> ProjectView {
    ProjectView {
        id: project.id.clone(),
        title: project.title.clone(),
        description: project.description.clone(),
        tags: project.tags.clone(),
        links: external_links(project),
        image: project.media.clone(),
        technologies: project.detail.technologies.clone(),
        features: project.detail.features.clone(),
        overview: project.detail.overview.clone(),
        challenges: project.detail.challenges.clone(),
        learnings: project.detail.learnings.clone(),
        back: NavLink::internal("Back to Projects", format!("/#{}", SectionKind::Projects.anchor())),
    }
}

fn status_message(form: &ContactForm) -> Option<String> {
    match form.status() {
        SubmissionStatus::Success => Some(SUCCESS_MESSAGE.to_string()),
        SubmissionStatus::Error => Some(match form.last_error() {
            Some(err) => format!("Something went wrong sending your message ({err}). Please try again."),
            None => "Something went wrong sending your message. Please try again.".to_string(),
        }),
        SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
    }
}

fn contact(form: &ContactForm, email: &str) -> ContactSection {
    let fields = Field::ALL
        .iter()
        .map(|field| FormFieldView {
            field: *field,
            label: field.label().to_string(),
            value: form.input().value(*field).to_string(),
            multiline: *field == Field::Message,
            error: form.errors().get(field).map(|e| e.message(*field)),
        })
        .collect();

    ContactSection {
        heading: "Get In Touch".to_string(),
        description: "I'm currently looking for new opportunities, my inbox is always open. Whether you have a question or just want to say hi, I'll try my best to get back to you!".to_string(),
        fields,
        submit_label: form.submit_label().to_string(),
        submit_enabled: form.submit_enabled(),
        status: form.status(),
        status_message: status_message(form),
        direct: NavLink::external(email, format!("mailto:{email}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::NetworkError;
    use crate::form::FormEvent;
    use crate::validation::ContactInput;

    #[test]
    fn test_home_has_five_sections_in_order() {
        let page = PageComposer::default().compose(&Route::Home);
        let View::Home { sections } = &page.view else {
            panic!("expected home view");
        };
        let kinds: Vec<_> = sections.iter().map(Section::kind).collect();
        assert_eq!(kinds, HOME_SECTIONS.to_vec());
        assert!(!page.is_not_found());
    }

    #[test]
    fn test_home_sections_present_with_empty_catalog() {
        let composer = PageComposer::new(Arc::new(ProjectCatalog::new()), Arc::new(Profile::default()));
        let View::Home { sections } = composer.compose(&Route::Home).view else {
            panic!("expected home view");
        };
        assert_eq!(sections.len(), 5);
        let Section::Projects(projects) = &sections[2] else {
            panic!("expected projects section");
        };
        assert!(projects.cards.is_empty());
    }

    #[test]
    fn test_project_cards_link_to_detail_routes() {
        let View::Home { sections } = PageComposer::default().compose(&Route::Home).view else {
            panic!("expected home view");
        };
        let Section::Projects(projects) = &sections[2] else {
            panic!("expected projects section");
        };
        let hrefs: Vec<_> = projects.cards.iter().map(|c| c.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec!["/projects/project-one", "/projects/project-two", "/projects/project-three"]
        );
    }

    #[test]
    fn test_unknown_project_falls_back() {
        let page = PageComposer::default().compose(&Route::ProjectDetail("does-not-exist".into()));
        match &page.view {
            View::ProjectNotFound { id, back } => {
                assert_eq!(id, "does-not-exist");
                assert_eq!(back.href, "/");
            }
            other => panic!("unexpected view {other:?}"),
        }
        assert!(page.is_not_found());
    }

    #[test]
    fn test_missing_links_are_omitted() {
        let mut record = ProjectCatalog::builtin().get("project-one").cloned().unwrap();
        record.links.live_demo = None;
        let view = project_view(&record);
        let labels: Vec<_> = view.links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["View Code"]);
        assert!(view.links.iter().all(|l| l.external));
    }

    #[test]
    fn test_contact_section_reflects_form_state() {
        let mut form = ContactForm::with_input(ContactInput::new("", "nope", "hi"));
        form.update(FormEvent::Submit);
        let View::Home { sections } = PageComposer::default().compose_with_form(&Route::Home, &form).view else {
            panic!("expected home view");
        };
        let Section::Contact(contact) = &sections[4] else {
            panic!("expected contact section");
        };
        let errors: Vec<_> = contact.fields.iter().map(|f| f.error.as_deref()).collect();
        assert_eq!(errors, vec![Some("Name is required"), Some("Email is invalid"), None]);
        assert!(contact.submit_enabled);
        assert_eq!(contact.submit_label, "Send Message");
    }

    fn contact_section(form: &ContactForm) -> ContactSection {
        let View::Home { mut sections } = PageComposer::default().compose_with_form(&Route::Home, form).view else {
            panic!("expected home view");
        };
        let Section::Contact(contact) = sections.remove(4) else {
            panic!("expected contact section");
        };
        contact
    }

    #[test]
    fn test_contact_section_reports_delivery_error() {
        let mut form = ContactForm::with_input(ContactInput::new("Jo", "jo@example.com", "Hello"));
        form.update(FormEvent::Submit);
        form.update(FormEvent::Failed(NetworkError::Status(503)));

        let contact = contact_section(&form);
        assert_eq!(contact.status, SubmissionStatus::Error);
        let message = contact.status_message.expect("error message");
        assert!(message.contains("503"), "{message}");
        assert!(message.contains("try again"));
        assert_eq!(contact.fields[0].value, "Jo");
    }

    #[test]
    fn test_contact_section_confirms_success() {
        let mut form = ContactForm::with_input(ContactInput::new("Jo", "jo@example.com", "Hello"));
        form.update(FormEvent::Submit);
        form.update(FormEvent::Delivered(Default::default()));

        let contact = contact_section(&form);
        assert_eq!(contact.status, SubmissionStatus::Success);
        assert_eq!(contact.status_message.as_deref(), Some(SUCCESS_MESSAGE));
        assert!(contact.fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_contact_section_quiet_while_idle_or_submitting() {
        let mut form = ContactForm::with_input(ContactInput::new("Jo", "jo@example.com", "Hello"));
        assert_eq!(contact_section(&form).status_message, None);
        form.update(FormEvent::Submit);
        let contact = contact_section(&form);
        assert_eq!(contact.status_message, None);
        assert!(!contact.submit_enabled);
        assert_eq!(contact.direct.href, format!("mailto:{}", Profile::default().email));
    }

    #[test]
    fn test_layout_links_resume_in_new_context() {
        let page = PageComposer::default().compose(&Route::NotFound);
        assert_eq!(page.layout.resume.href, RESUME_PATH);
        assert!(page.layout.resume.external);
        assert!(page.is_not_found());
    }
}
