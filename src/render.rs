//! HTML rendering of composed pages.

use std::fmt::Write;

use crate::compose::{
    AboutSection, ContactSection, ExperienceSection, HeroSection, Layout, NavLink, Page,
    ProjectView, ProjectsSection, Section, View,
};

/// Render a page as a complete HTML document.
pub fn render_page(page: &Page) -> String {
    let mut body = String::new();
    render_view(&mut body, &page.view);

    let mut out = String::with_capacity(body.len() + 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", html_escape(&page.title));
    out.push_str("</head>\n<body>\n");
    render_header(&mut out, &page.layout);
    out.push_str("<main>\n");
    out.push_str(&body);
    out.push_str("</main>\n");
    render_footer(&mut out, &page.layout);
    out.push_str("</body>\n</html>\n");
    out
}

fn render_view(out: &mut String, view: &View) {
    match view {
        View::Home { sections } => {
            for section in sections {
                render_section(out, section);
            }
        }
        View::Project(project) => render_project(out, project),
        View::ProjectNotFound { back, .. } => {
            out.push_str("<section class=\"project-not-found\">\n<h1>Project not found</h1>\n");
            link(out, back);
            out.push_str("</section>\n");
        }
        View::NotFound { heading, message, back } => {
            out.push_str("<section class=\"not-found\">\n<h1>404</h1>\n");
            let _ = writeln!(out, "<h2>{}</h2>", html_escape(heading));
            let _ = writeln!(out, "<p>{}</p>", html_escape(message));
            link(out, back);
            out.push_str("</section>\n");
        }
    }
}

fn render_section(out: &mut String, section: &Section) {
    let _ = writeln!(out, "<section id=\"{}\">", section.kind().anchor());
    match section {
        Section::Hero(hero) => render_hero(out, hero),
        Section::About(about) => render_about(out, about),
        Section::Projects(projects) => render_projects(out, projects),
        Section::Experience(experience) => render_experience(out, experience),
        Section::Contact(contact) => render_contact(out, contact),
    }
    out.push_str("</section>\n");
}

fn render_hero(out: &mut String, hero: &HeroSection) {
    let _ = writeln!(out, "<p>{}</p>", html_escape(&hero.greeting));
    let _ = writeln!(out, "<h1>{}.</h1>", html_escape(&hero.name));
    let _ = writeln!(out, "<h2>{}</h2>", html_escape(&hero.tagline));
    let _ = writeln!(out, "<p>{}</p>", html_escape(&hero.summary));
    for action in &hero.actions {
        link(out, action);
    }
}

fn render_about(out: &mut String, about: &AboutSection) {
    out.push_str("<h2>About Me</h2>\n");
    for paragraph in &about.paragraphs {
        let _ = writeln!(out, "<p>{}</p>", html_escape(paragraph));
    }
    for (category, items) in &about.skills {
        let _ = writeln!(out, "<h3>{}</h3>", html_escape(category));
        list(out, items);
    }
}

fn render_projects(out: &mut String, projects: &ProjectsSection) {
    let _ = writeln!(out, "<h2>{}</h2>", html_escape(&projects.heading));
    for card in &projects.cards {
        let _ = writeln!(out, "<article class=\"project-card\" data-id=\"{}\">", html_escape(&card.id));
        let _ = writeln!(
            out,
            "<a href=\"{}\"><img src=\"{}\" alt=\"{}\"><h3>{}</h3></a>",
            html_escape(&card.href),
            html_escape(&card.image),
            html_escape(&card.title),
            html_escape(&card.title)
        );
        let _ = writeln!(out, "<p>{}</p>", html_escape(&card.description));
        tags(out, &card.tags);
        for l in &card.links {
            link(out, l);
        }
        out.push_str("</article>\n");
    }
}

fn render_experience(out: &mut String, experience: &ExperienceSection) {
    let _ = writeln!(out, "<h2>{}</h2>", html_escape(&experience.heading));
    for entry in &experience.entries {
        let _ = writeln!(
            out,
            "<h3>{} <span>@ {}</span></h3>\n<p class=\"duration\">{}</p>",
            html_escape(&entry.title),
            html_escape(&entry.company),
            html_escape(&entry.duration)
        );
        list(out, &entry.highlights);
    }
}

fn render_contact(out: &mut String, contact: &ContactSection) {
    let _ = writeln!(out, "<h2>{}</h2>", html_escape(&contact.heading));
    let _ = writeln!(out, "<p>{}</p>", html_escape(&contact.description));
    // Server-rendered snapshot: no action, so the browser cannot post it anywhere.
    out.push_str("<form class=\"contact-form\" data-display-only novalidate onsubmit=\"return false\">\n");
    for field in &contact.fields {
        let name = field.label.to_lowercase();
        let _ = writeln!(out, "<label for=\"{name}\">{}</label>", html_escape(&field.label));
        if field.multiline {
            let _ = writeln!(
                out,
                "<textarea id=\"{name}\" name=\"{name}\" rows=\"6\" required>{}</textarea>",
                html_escape(&field.value)
            );
        } else {
            let _ = writeln!(
                out,
                "<input id=\"{name}\" name=\"{name}\" value=\"{}\" required>",
                html_escape(&field.value)
            );
        }
        if let Some(error) = &field.error {
            let _ = writeln!(out, "<p class=\"field-error\">{}</p>", html_escape(error));
        }
    }
    let disabled = if contact.submit_enabled { "" } else { " disabled" };
    let _ = writeln!(
        out,
        "<button type=\"submit\"{disabled}>{}</button>",
        html_escape(&contact.submit_label)
    );
    let _ = writeln!(
        out,
        "<p class=\"form-status\" data-status=\"{}\" role=\"status\">{}</p>",
        contact.status.as_str(),
        contact.status_message.as_deref().map(html_escape).unwrap_or_default()
    );
    out.push_str("</form>\n");
    out.push_str("<p class=\"form-note\">This page does not send messages. Write to ");
    link(out, &contact.direct);
    out.push_str("</p>\n");
}

fn render_project(out: &mut String, project: &ProjectView) {
    out.push_str("<article class=\"project-detail\">\n");
    link(out, &project.back);
    let _ = writeln!(out, "<h1>{}</h1>", html_escape(&project.title));
    let _ = writeln!(out, "<h2>{}</h2>", html_escape(&project.description));
    tags(out, &project.tags);
    for l in &project.links {
        link(out, l);
    }
    let _ = writeln!(
        out,
        "<img src=\"{}\" alt=\"{}\">",
        html_escape(&project.image),
        html_escape(&project.title)
    );
    out.push_str("<h3>Technologies</h3>\n");
    list(out, &project.technologies);
    out.push_str("<h3>Features</h3>\n");
    list(out, &project.features);
    let _ = writeln!(out, "<h3>Project Overview</h3>\n<p>{}</p>", html_escape(&project.overview));
    let _ = writeln!(out, "<h3>Challenges &amp; Solutions</h3>\n<p>{}</p>", html_escape(&project.challenges));
    let _ = writeln!(out, "<h3>Key Learnings</h3>\n<p>{}</p>", html_escape(&project.learnings));
    out.push_str("</article>\n");
}

fn render_header(out: &mut String, layout: &Layout) {
    out.push_str("<header>\n<nav>\n");
    for item in &layout.nav {
        link(out, item);
    }
    link(out, &layout.resume);
    out.push_str("</nav>\n</header>\n");
}

fn render_footer(out: &mut String, layout: &Layout) {
    out.push_str("<footer>\n");
    for item in &layout.social {
        link(out, item);
    }
    out.push_str("</footer>\n");
}

fn link(out: &mut String, l: &NavLink) {
    let target = if l.external {
        " target=\"_blank\" rel=\"noopener noreferrer\""
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "<a href=\"{}\"{}>{}</a>",
        html_escape(&l.href),
        target,
        html_escape(&l.label)
    );
}

fn list(out: &mut String, items: &[String]) {
    out.push_str("<ul>\n");
    for item in items {
        let _ = writeln!(out, "<li>{}</li>", html_escape(item));
    }
    out.push_str("</ul>\n");
}

fn tags(out: &mut String, items: &[String]) {
    out.push_str("<ul class=\"tags\">\n");
    for item in items {
        let _ = writeln!(out, "<li class=\"tag\">{}</li>", html_escape(item));
    }
    out.push_str("</ul>\n");
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::NetworkError;
    use crate::compose::PageComposer;
    use crate::form::{ContactForm, FormEvent};
    use crate::routing::Route;
    use crate::validation::ContactInput;

    fn render_home(form: &ContactForm) -> String {
        render_page(&PageComposer::default().compose_with_form(&Route::Home, form))
    }

    fn filled_form() -> ContactForm {
        ContactForm::with_input(ContactInput::new("Jo", "jo@example.com", "Hello"))
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_home_sections_rendered_in_order() {
        let html = render_page(&PageComposer::default().compose(&Route::Home));
        let positions: Vec<_> = ["home", "about", "projects", "experience", "contact"]
            .iter()
            .map(|id| html.find(&format!("<section id=\"{id}\">")).expect("section present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_project_detail_lists_in_stored_order() {
        let html = render_page(&PageComposer::default().compose(&Route::ProjectDetail("project-three".into())));
        let next = html.find("<li>Next.js</li>").unwrap();
        let prisma = html.find("<li>Prisma</li>").unwrap();
        assert!(next < prisma);
        assert!(html.contains("<h1>Project Three</h1>"));
        assert!(html.contains("Challenges &amp; Solutions"));
    }

    #[test]
    fn test_fallbacks_link_home() {
        let composer = PageComposer::default();
        for route in [Route::NotFound, Route::ProjectDetail("nope".into())] {
            let html = render_page(&composer.compose(&route));
            assert!(html.contains("<a href=\"/\">"), "{route:?}");
        }
    }

    #[test]
    fn test_resume_opens_new_context() {
        let html = render_page(&PageComposer::default().compose(&Route::Home));
        assert!(html.contains("<a href=\"/resume.pdf\" target=\"_blank\" rel=\"noopener noreferrer\">Resume</a>"));
    }

    #[test]
    fn test_delivery_error_is_visible() {
        let idle = render_home(&filled_form());

        let mut form = filled_form();
        form.update(FormEvent::Submit);
        form.update(FormEvent::Failed(NetworkError::Status(503)));
        let failed = render_home(&form);

        assert_ne!(idle, failed);
        assert!(idle.contains("data-status=\"idle\" role=\"status\"></p>"));
        assert!(failed.contains("data-status=\"error\""));
        assert!(failed.contains("Server responded with status 503"));
        assert!(failed.contains("value=\"Jo\""));
    }

    #[test]
    fn test_delivery_success_is_confirmed() {
        let mut form = filled_form();
        form.update(FormEvent::Submit);
        form.update(FormEvent::Delivered(Default::default()));
        let html = render_home(&form);

        assert!(html.contains("data-status=\"success\""));
        assert!(html.contains("Thanks! Your message has been sent."));
        assert!(html.contains("<input id=\"name\" name=\"name\" value=\"\" required>"));
    }

    #[test]
    fn test_contact_form_marked_display_only() {
        let html = render_home(&ContactForm::new());
        assert!(html.contains("<form class=\"contact-form\" data-display-only novalidate onsubmit=\"return false\">"));
        assert!(!html.contains("action="));
        assert!(html.contains("<p class=\"form-note\">This page does not send messages."));
        assert!(html.contains("href=\"mailto:"));
    }

    #[test]
    fn test_submitting_disables_button() {
        let mut form = filled_form();
        form.update(FormEvent::Submit);
        let html = render_home(&form);
        assert!(html.contains("<button type=\"submit\" disabled>Sending...</button>"));
        assert!(html.contains("data-status=\"submitting\""));
    }
}
