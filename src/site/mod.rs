use std::path::{Path, PathBuf};

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::assets::AssetResolver;
use crate::data::PortfolioData;
use crate::listview::certificates::{self, CertificateList, Certificates};
use crate::listview::projects::{self, ProjectList, Projects};
use crate::listview::{derive_view, ListDomain, UiEvent, ViewState};
use crate::modal::{self, ModalController, ModalEvent};
use crate::render::templates::{self, search_input};
use crate::render::{escape_html, json_for_script_tag, Container, Document};
use crate::utils;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize data document: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    Projects,
    Certificates,
    Experience,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [
        PageKind::Home,
        PageKind::Projects,
        PageKind::Certificates,
        PageKind::Experience,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "home" | "index" => Some(Self::Home),
            "projects" => Some(Self::Projects),
            "certificates" | "certs" => Some(Self::Certificates),
            "experience" => Some(Self::Experience),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Projects => "projects",
            Self::Certificates => "certificates",
            Self::Experience => "experience",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Projects => "Projects",
            Self::Certificates => "Certificates",
            Self::Experience => "Experience",
        }
    }

    pub fn output_path(&self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Projects => "pages/projects.html",
            Self::Certificates => "pages/certificates.html",
            Self::Experience => "pages/experience.html",
        }
    }

    /// What `window.location.pathname` reads on this page.
    pub fn location(&self) -> String {
        format!("/{}", self.output_path())
    }

    pub fn containers(&self) -> &'static [&'static str] {
        match self {
            Self::Home => &[
                templates::HERO_NAME,
                templates::HERO_TITLE,
                templates::ABOUT_TEXT,
                templates::CONTACT,
                templates::ACADEMIC,
                templates::RECENT_EXPERIENCE,
                templates::FEATURED_PROJECTS,
            ],
            Self::Projects => &[projects::FILTER_CONTAINER, projects::CONTAINER],
            Self::Certificates => &[certificates::CONTAINER, modal::CONTAINER],
            Self::Experience => &[templates::EXPERIENCE],
        }
    }

    fn href_to(&self, other: PageKind) -> String {
        let in_pages = *self != PageKind::Home;
        match (in_pages, other) {
            (false, _) => other.output_path().to_string(),
            (true, PageKind::Home) => "../index.html".to_string(),
            (true, _) => other
                .output_path()
                .trim_start_matches("pages/")
                .to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewRequest {
    pub filter: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ViewRequest {
    fn events(&self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        if let Some(filter) = self.filter.clone() {
            events.push(UiEvent::FilterClicked(filter));
        }
        if let Some(search) = self.search.clone() {
            events.push(UiEvent::SearchInput(search));
        }
        if let Some(sort) = self.sort.clone() {
            events.push(UiEvent::SortChanged(sort));
        }
        events
    }
}

#[derive(Clone, Debug, Default)]
pub struct SiteOptions {
    pub projects: ViewRequest,
    pub certificates: ViewRequest,
    pub open_certificate: Option<u64>,
    pub home_project_limit: Option<usize>,
    pub home_experience_limit: Option<usize>,
    pub embed_data: bool,
}

pub struct Page {
    kind: PageKind,
    document: Document,
    assets: AssetResolver,
    projects: Option<ProjectList<Container>>,
    certificates: Option<CertificateList<Container>>,
    modal: Option<ModalController<Container>>,
}

impl Page {
    pub fn build(kind: PageKind, data: Option<&PortfolioData>, opts: &SiteOptions) -> Self {
        let document = Document::with_containers(kind.containers());
        let assets = AssetResolver::for_page(kind.location());
        let mut page = Self {
            kind,
            document,
            assets,
            projects: None,
            certificates: None,
            modal: None,
        };
        if let Some(data) = data {
            page.render_static(data, opts);
            page.mount_projects(data, opts);
            page.mount_certificates(data, opts);
        }
        page
    }

    fn render_static(&self, data: &PortfolioData, opts: &SiteOptions) {
        let doc = &self.document;
        if let Some(profile) = data.profile.as_ref() {
            templates::render_profile(doc, profile);
        }
        if doc.has(templates::ACADEMIC) {
            templates::render_academic(doc, &data.education, &data.awards, &self.assets);
        }
        if doc.has(templates::EXPERIENCE) {
            templates::render_experience_timeline(doc, &data.experience, &self.assets);
        }
        if doc.has(templates::RECENT_EXPERIENCE) {
            templates::render_recent_experience(
                doc,
                &data.experience,
                opts.home_experience_limit,
                &self.assets,
            );
        }
        if doc.has(templates::FEATURED_PROJECTS) {
            let state = ViewState::new(Projects::DEFAULT_SORT);
            let featured = derive_view(&data.projects, &state, Projects::SORT_KEYS);
            templates::render_featured_projects(
                doc,
                &featured,
                opts.home_project_limit,
                &self.assets,
            );
        }
    }

    fn mount_projects(&mut self, data: &PortfolioData, opts: &SiteOptions) {
        let Some(target) = self.document.container(projects::CONTAINER) else {
            return;
        };
        let mut list = ProjectList::new(Projects::new(self.assets.clone()), target);
        if let Some(buttons) = self.document.container(projects::FILTER_CONTAINER) {
            list = list.with_filter_target(buttons);
        }
        list.initialize(data.projects.clone());
        for event in opts.projects.events() {
            list.handle(event);
        }
        self.projects = Some(list);
    }

    fn mount_certificates(&mut self, data: &PortfolioData, opts: &SiteOptions) {
        let Some(target) = self.document.container(certificates::CONTAINER) else {
            return;
        };
        let mut list = CertificateList::new(Certificates::new(self.assets.clone()), target);
        list.initialize(data.certificates.clone());
        for event in opts.certificates.events() {
            list.handle(event);
        }

        if let Some(overlay) = self.document.container(modal::CONTAINER) {
            let mut lightbox = ModalController::new(overlay, self.assets.clone());
            if let Some(id) = opts.open_certificate {
                if !lightbox.handle(ModalEvent::CardClicked(id), list.collection()) {
                    utils::warn(format!("no certificate with id {id}; modal left closed"));
                }
            }
            self.modal = Some(lightbox);
        }
        self.certificates = Some(list);
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn projects(&self) -> Option<&ProjectList<Container>> {
        self.projects.as_ref()
    }

    pub fn projects_mut(&mut self) -> Option<&mut ProjectList<Container>> {
        self.projects.as_mut()
    }

    pub fn certificates(&self) -> Option<&CertificateList<Container>> {
        self.certificates.as_ref()
    }

    pub fn modal(&self) -> Option<&ModalController<Container>> {
        self.modal.as_ref()
    }

    fn slot(&self, tag: &str, id: &str, class: &str) -> String {
        let contents = self.document.contents(id).unwrap_or_default();
        format!(r#"<{tag} id="{id}" class="{class}">{contents}</{tag}>"#)
    }

    fn nav(&self) -> String {
        let links: String = PageKind::ALL
            .iter()
            .map(|target| {
                let active = if *target == self.kind { " active" } else { "" };
                format!(
                    r#"<a class="nav-link{active}" href="{}">{}</a>"#,
                    self.kind.href_to(*target),
                    target.title()
                )
            })
            .collect();
        format!(
            r#"<nav class="navbar"><button class="nav-toggle" type="button" aria-label="Menu"><i class="fas fa-bars"></i></button><div class="nav-links">{links}</div></nav>"#
        )
    }

    fn main_html(&self) -> String {
        match self.kind {
            PageKind::Home => format!(
                r#"<section class="hero">{}{}<p class="hero-about">{}</p>{}</section>
<section class="academic">{}</section>
<section class="recent-experience"><h2>Recent Experience</h2>{}</section>
<section class="featured-projects"><h2>Featured Projects</h2>{}<a class="see-all" href="{}">See all projects</a></section>"#,
                self.slot("h1", templates::HERO_NAME, "hero-name"),
                self.slot("h2", templates::HERO_TITLE, "hero-title"),
                self.slot("span", templates::ABOUT_TEXT, "about-text"),
                self.slot("div", templates::CONTACT, "contact"),
                self.slot("div", templates::ACADEMIC, "academic-grid"),
                self.slot("div", templates::RECENT_EXPERIENCE, "experience-grid"),
                self.slot("div", templates::FEATURED_PROJECTS, "project-grid"),
                self.kind.href_to(PageKind::Projects),
            ),
            PageKind::Projects => {
                let (search, sort) = match self.projects.as_ref() {
                    Some(list) => (
                        list.state().search.clone(),
                        list.sort_select_html(projects::SORT_SELECT),
                    ),
                    None => (
                        String::new(),
                        templates::sort_select(
                            projects::SORT_SELECT,
                            Projects::SORT_KEYS,
                            Projects::DEFAULT_SORT.as_str(),
                        ),
                    ),
                };
                format!(
                    r#"<section class="projects"><h1>Projects</h1><div class="list-controls">{}{sort}</div>{}
{}</section>"#,
                    search_input(projects::SEARCH_INPUT, "Search projects...", &search),
                    self.slot("div", projects::FILTER_CONTAINER, "filter-buttons"),
                    self.slot("div", projects::CONTAINER, "project-grid"),
                )
            }
            PageKind::Certificates => {
                let (search, sort) = match self.certificates.as_ref() {
                    Some(list) => (
                        list.state().search.clone(),
                        list.sort_select_html(certificates::SORT_SELECT),
                    ),
                    None => (
                        String::new(),
                        templates::sort_select(
                            certificates::SORT_SELECT,
                            Certificates::SORT_KEYS,
                            Certificates::DEFAULT_SORT.as_str(),
                        ),
                    ),
                };
                format!(
                    r#"<section class="certificates"><h1>Certificates</h1><div class="list-controls">{}{sort}</div>
{}</section>
{}"#,
                    search_input(certificates::SEARCH_INPUT, "Search certificates...", &search),
                    self.slot("div", certificates::CONTAINER, "certificate-grid"),
                    self.slot("div", modal::CONTAINER, "modal-host"),
                )
            }
            PageKind::Experience => format!(
                r#"<section class="experience"><h1>Experience</h1>{}</section>"#,
                self.slot("div", templates::EXPERIENCE, "timeline"),
            ),
        }
    }

    pub fn to_html(&self, embedded_data: Option<&str>) -> String {
        let stylesheet = self.assets.resolve("css/style.css");
        let data_script = embedded_data
            .map(|json| {
                format!(
                    r#"<script type="application/json" id="portfolio-data" data-src="{}">{}</script>"#,
                    self.assets.data_document(),
                    json_for_script_tag(json)
                )
            })
            .unwrap_or_default();
        format!(
            r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{title}</title>
  <link rel="stylesheet" href="{stylesheet}"/>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css"/>
</head>
<body data-page="{kind}">
{data_script}
{nav}
<main>
{main}
</main>
</body>
</html>
"####,
            title = escape_html(self.kind.title()),
            kind = self.kind.as_str(),
            nav = self.nav(),
            main = self.main_html(),
        )
    }
}

async fn ensure_parent(path: &Path) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| SiteError::CreateDir {
                path: parent.display().to_string(),
                source,
            })?;
    }
    Ok(())
}

pub async fn write_file(path: PathBuf, contents: Vec<u8>) -> Result<PathBuf, SiteError> {
    ensure_parent(&path).await?;
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .await
        .map_err(|source| SiteError::Write {
            path: path.display().to_string(),
            source,
        })?;
    file.write_all(&contents)
        .await
        .map_err(|source| SiteError::Write {
            path: path.display().to_string(),
            source,
        })?;
    Ok(path)
}

// One failed page does not stop the others.
pub async fn write_pages(
    out_dir: &Path,
    pages: Vec<(PageKind, String)>,
) -> Vec<(PageKind, Result<PathBuf, SiteError>)> {
    let mut writes = FuturesUnordered::new();
    for (kind, html) in pages {
        let path = out_dir.join(kind.output_path());
        writes.push(async move { (kind, write_file(path, html.into_bytes()).await) });
    }
    let mut out = Vec::new();
    while let Some(result) = writes.next().await {
        out.push(result);
    }
    out
}

pub async fn write_data_document(out_dir: &Path, data: &PortfolioData) -> Result<PathBuf, SiteError> {
    let json = serde_json::to_vec_pretty(data).map_err(|source| SiteError::Serialize { source })?;
    write_file(out_dir.join("data.json"), json).await
}
