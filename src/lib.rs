//! Portfolio Core - Routing, Composition and Contact Form
//!
//! # Ground Rules
//! 1. Every path resolves to exactly one route
//! 2. Catalog lookup is total; unknown ids render a fallback
//! 3. Scroll resets once per path change, before the view settles
//! 4. The home view is always the same five sections, in order
//! 5. Form state only changes through `ContactForm::update`

pub mod catalog;
pub mod routing;
pub mod scroll;
pub mod compose;
pub mod render;
pub mod validation;
pub mod form;
pub mod client;
pub mod config;
pub mod server;

pub use catalog::{ProjectCatalog, ProjectRecord, ProjectId, Profile, CatalogError};
pub use routing::Route;
pub use scroll::{Navigator, ScrollCoordinator, Viewport, RouteObserver, CountingViewport};
pub use compose::{PageComposer, Page, View, Section, SectionKind, HOME_SECTIONS};
pub use render::render_page;
pub use validation::{ContactInput, Field, FieldErrors, ValidationError, Validator};
pub use form::{ContactForm, ContactSubmitter, Delivery, FormEvent, SubmissionStatus};
pub use client::{ApiClient, Greeting, NetworkError};
pub use config::ServerConfig;
pub use server::{build_router, serve, AppState, ServerError};

pub const SITE_VERSION: &str = env!("CARGO_PKG_VERSION");
