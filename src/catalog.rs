//! Project Catalog - Static, Immutable Content
//!
//! Built once at startup, read-only afterwards. Lookup is total:
//! an unknown id is `None`, never a failure.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub type ProjectId = String;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate project id: {0}")]
    DuplicateId(String),

    #[error("Invalid project id {0:?}: must be a single non-empty path segment")]
    InvalidId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub media: String,
    #[serde(default)]
    pub links: ProjectLinks,
    pub detail: ProjectDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLinks {
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub live_demo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub overview: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub challenges: String,
    pub learnings: String,
}

/// Project catalog. Preserves insertion order for display.
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    order: Vec<ProjectId>,
    projects: HashMap<ProjectId, ProjectRecord>,
}

impl ProjectCatalog {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            projects: HashMap::new(),
        }
    }

    /// Build a catalog, rejecting ids that no project path could resolve to.
    pub fn from_records(records: Vec<ProjectRecord>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for record in records {
            if record.id.is_empty() || record.id.contains('/') {
                return Err(CatalogError::InvalidId(record.id));
            }
            if catalog.projects.contains_key(&record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
            catalog.order.push(record.id.clone());
            catalog.projects.insert(record.id.clone(), record);
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of project records.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let records: Vec<ProjectRecord> = serde_json::from_str(&content)?;
        Self::from_records(records)
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.get(id)
    }

    pub fn list(&self) -> Vec<&ProjectRecord> {
        self.order
            .iter()
            .filter_map(|id| self.projects.get(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The three sample projects shipped with the site.
    pub fn builtin() -> Self {
        let records = vec![
            sample_project(
                "project-one",
                "Project One",
                "A comprehensive web application that solves real-world problems with modern technologies.",
                &["React", "Node.js", "MongoDB"],
                &["React", "Node.js", "MongoDB", "Express", "Mongoose"],
                "A comprehensive overview of Project One, including its purpose, features, and technologies used. This project was built to demonstrate modern web development practices and solve a specific problem in an innovative way.",
                "Challenges faced during development included implementing real-time updates, optimizing database queries, and ensuring cross-browser compatibility. These were overcome through careful planning, code reviews, and performance testing.",
                "Key takeaways from this project include improved state management skills, better understanding of RESTful APIs, and experience with deployment pipelines.",
            ),
            sample_project(
                "project-two",
                "Project Two",
                "A mobile-responsive website with modern design and smooth animations.",
                &["React", "Express", "PostgreSQL"],
                &["React", "Express", "PostgreSQL", "Sequelize", "JWT"],
                "A comprehensive overview of Project Two, including its purpose, features, and technologies used. This project focused on creating an exceptional user experience with smooth animations and responsive design.",
                "Challenges included implementing complex animations that perform well on mobile devices and ensuring the application was accessible to all users. These were addressed through performance optimization and accessibility testing.",
                "Gained deeper knowledge of CSS animations, performance optimization techniques, and accessibility best practices.",
            ),
            sample_project(
                "project-three",
                "Project Three",
                "A modern web application built with Next.js and TypeScript.",
                &["Next.js", "TypeScript", "Tailwind CSS"],
                &["Next.js", "TypeScript", "Tailwind CSS", "Prisma", "PostgreSQL"],
                "A comprehensive overview of Project Three, including its purpose, features, and technologies used. This project demonstrates the power of server-side rendering and static site generation with Next.js.",
                "The main challenges were implementing server-side rendering with TypeScript and optimizing the build process. These were overcome through careful configuration and code splitting.",
                "Learned advanced TypeScript patterns, Next.js data fetching methods, and performance optimization techniques for server-rendered applications.",
            ),
        ];

        // Built-in ids are fixed, unique single segments.
        Self::from_records(records).unwrap_or_else(|_| Self::new())
    }
}

impl Default for ProjectCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_project(
    id: &str,
    title: &str,
    description: &str,
    tags: &[&str],
    technologies: &[&str],
    overview: &str,
    challenges: &str,
    learnings: &str,
) -> ProjectRecord {
    ProjectRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        tags: strings(tags),
        media: format!(
            "https://via.placeholder.com/1200x600/0a192f/64ffda?text={}",
            title.replace(' ', "+")
        ),
        links: ProjectLinks {
            repository: Some("https://github.com".to_string()),
            live_demo: Some("https://example.com".to_string()),
        },
        detail: ProjectDetail {
            overview: overview.to_string(),
            features: vec![
                "Feature 1: Description of feature one and its benefits".to_string(),
                "Feature 2: Description of feature two and its benefits".to_string(),
                "Feature 3: Description of feature three and its benefits".to_string(),
            ],
            technologies: strings(technologies),
            challenges: challenges.to_string(),
            learnings: learnings.to_string(),
        },
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// --- Profile content for the home sections ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    pub summary: String,
    pub email: String,
    pub about: Vec<String>,
    pub skills: Vec<SkillCategory>,
    pub experience: Vec<ExperienceEntry>,
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: String,
    pub company: String,
    pub title: String,
    pub duration: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Saharsh Kumar".to_string(),
            tagline: "I build things for the web.".to_string(),
            summary: "I'm a software engineer specializing in building (and occasionally designing) exceptional digital experiences.".to_string(),
            email: "your.email@example.com".to_string(),
            about: vec![
                "Hello! I'm a passionate Full Stack Developer with a love for creating beautiful, functional, and user-friendly web applications.".to_string(),
                "I specialize in building exceptional digital experiences using modern web technologies.".to_string(),
                "When I'm not coding, you can find me exploring new technologies and contributing to open-source projects.".to_string(),
            ],
            skills: vec![
                SkillCategory {
                    category: "Frontend".to_string(),
                    items: strings(&["React", "Next.js", "TypeScript", "JavaScript (ES6+)", "HTML5", "CSS3"]),
                },
                SkillCategory {
                    category: "Backend".to_string(),
                    items: strings(&["Node.js", "Express", "Python", "Django", "RESTful APIs", "GraphQL"]),
                },
                SkillCategory {
                    category: "Database".to_string(),
                    items: strings(&["MongoDB", "PostgreSQL", "Firebase", "MySQL"]),
                },
                SkillCategory {
                    category: "Tools & Others".to_string(),
                    items: strings(&["Git & GitHub", "Docker", "AWS", "CI/CD", "Jest", "Cypress"]),
                },
            ],
            experience: vec![
                ExperienceEntry {
                    id: "company-1".to_string(),
                    company: "Tech Solutions Inc.".to_string(),
                    title: "Frontend Developer".to_string(),
                    duration: "Jan 2022 - Present".to_string(),
                    highlights: strings(&[
                        "Developed and maintained responsive web applications using React, Redux, and TypeScript.",
                        "Optimized application performance, resulting in a 40% improvement in page load times.",
                        "Mentored junior developers and conducted code reviews.",
                    ]),
                },
                ExperienceEntry {
                    id: "company-2".to_string(),
                    company: "Digital Innovations Ltd.".to_string(),
                    title: "Junior Web Developer".to_string(),
                    duration: "Jun 2020 - Dec 2021".to_string(),
                    highlights: strings(&[
                        "Built and maintained client websites using modern JavaScript frameworks and libraries.",
                        "Integrated RESTful APIs and third-party services into web applications.",
                    ]),
                },
            ],
            social: vec![
                SocialLink {
                    label: "GitHub".to_string(),
                    url: "https://github.com/saharshkmr".to_string(),
                },
                SocialLink {
                    label: "LinkedIn".to_string(),
                    url: "https://linkedin.com/in/saharsh-kumar-a57059259".to_string(),
                },
                SocialLink {
                    label: "Email".to_string(),
                    url: "mailto:your.email@example.com".to_string(),
                },
            ],
        }
    }
}
