use crate::assets::{normalize_external_url, AssetResolver};
use crate::data::{Award, Certificate, Education, Experience, Profile, Project};
use crate::listview::{CategoryCount, SortKey};
use crate::render::{escape_html, Document};
use crate::utils;

pub const HERO_NAME: &str = "hero-name";
pub const HERO_TITLE: &str = "hero-title";
pub const ABOUT_TEXT: &str = "about-text";
pub const CONTACT: &str = "contact-container";
pub const ACADEMIC: &str = "academic-container";
pub const EXPERIENCE: &str = "experience-container";
pub const RECENT_EXPERIENCE: &str = "recent-experience-container";
pub const FEATURED_PROJECTS: &str = "featured-projects-container";

pub fn empty_state(message: &str) -> String {
    format!(r#"<p class="empty-state">{}</p>"#, escape_html(message))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldSet {
    pub meta: bool,
    pub details: bool,
    pub logo: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entry {
    pub heading: String,
    pub subheading: String,
    pub meta: Option<String>,
    pub details: Option<String>,
    pub logo: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryTemplate {
    pub tag: &'static str,
    pub class: &'static str,
    pub toggle: bool,
    pub fields: FieldSet,
}

impl EntryTemplate {
    pub const TIMELINE: Self = Self {
        tag: "div",
        class: "timeline-item",
        toggle: true,
        fields: FieldSet {
            meta: true,
            details: true,
            logo: true,
        },
    };

    pub const RECENT_CARD: Self = Self {
        tag: "div",
        class: "experience-card",
        toggle: false,
        fields: FieldSet {
            meta: true,
            details: false,
            logo: true,
        },
    };

    pub const EDUCATION: Self = Self {
        tag: "div",
        class: "education-entry",
        toggle: false,
        fields: FieldSet {
            meta: true,
            details: true,
            logo: false,
        },
    };

    pub const AWARD: Self = Self {
        tag: "li",
        class: "award-entry",
        toggle: false,
        fields: FieldSet {
            meta: false,
            details: false,
            logo: false,
        },
    };

    pub fn render(&self, entry: &Entry, assets: &AssetResolver) -> String {
        let class = self.class;
        let mut out = String::new();
        if self.toggle {
            out.push_str(&format!(
                r#"<{} class="{class}" data-toggle="active" tabindex="0">"#,
                self.tag
            ));
        } else {
            out.push_str(&format!(r#"<{} class="{class}">"#, self.tag));
        }

        if self.fields.logo {
            if let Some(logo) = entry.logo.as_deref().filter(|l| !l.trim().is_empty()) {
                out.push_str(&format!(
                    r#"<img src="{}" alt="{} logo" class="{class}-logo">"#,
                    escape_html(&assets.resolve(logo)),
                    escape_html(&entry.subheading)
                ));
            }
        }
        if self.fields.meta {
            if let Some(meta) = entry.meta.as_deref().filter(|m| !m.is_empty()) {
                out.push_str(&format!(
                    r#"<div class="{class}-meta">{}</div>"#,
                    escape_html(meta)
                ));
            }
        }
        out.push_str(&format!(
            r#"<div class="{class}-heading">{}</div>"#,
            escape_html(&entry.heading)
        ));
        if !entry.subheading.is_empty() {
            out.push_str(&format!(
                r#"<div class="{class}-subheading">{}</div>"#,
                escape_html(&entry.subheading)
            ));
        }
        if self.fields.details {
            if let Some(details) = entry.details.as_deref().filter(|d| !d.is_empty()) {
                out.push_str(&format!(
                    r#"<div class="{class}-details"><p>{}</p></div>"#,
                    escape_html(details)
                ));
            }
        }
        out.push_str(&format!("</{}>", self.tag));
        out
    }
}

impl From<&Experience> for Entry {
    fn from(exp: &Experience) -> Self {
        Self {
            heading: exp.role.clone(),
            subheading: exp.company.clone(),
            meta: exp.period.clone(),
            details: exp.description.clone(),
            logo: exp.logo.clone(),
        }
    }
}

impl From<&Education> for Entry {
    fn from(edu: &Education) -> Self {
        let meta = match (edu.period.as_deref(), edu.gpa.as_deref()) {
            (Some(p), Some(g)) => Some(format!("{p} | GPA: {g}")),
            (Some(p), None) => Some(p.to_string()),
            (None, Some(g)) => Some(format!("GPA: {g}")),
            (None, None) => None,
        };
        Self {
            heading: edu.institution.clone(),
            subheading: edu.degree.clone(),
            meta,
            details: edu.details.clone(),
            logo: None,
        }
    }
}

impl From<&Award> for Entry {
    fn from(award: &Award) -> Self {
        let subheading = match award.year.as_deref() {
            Some(year) => format!("{} ({year})", award.organization),
            None => award.organization.clone(),
        };
        Self {
            heading: award.title.clone(),
            subheading,
            meta: None,
            details: None,
            logo: None,
        }
    }
}

pub fn contact_links(profile: &Profile) -> String {
    let mut out = String::from(r#"<div class="contact-links">"#);

    if let Some(email) = profile.email.as_deref().filter(|v| !v.is_empty()) {
        out.push_str(&contact_link(
            &format!("mailto:{email}"),
            "Email",
            "fas fa-envelope",
            email,
            false,
        ));
    }
    if let Some(phone) = profile.phone.as_deref().filter(|v| !v.is_empty()) {
        out.push_str(&contact_link(
            &format!("tel:{phone}"),
            "Phone",
            "fas fa-phone",
            phone,
            false,
        ));
    }
    let socials = [
        (profile.github.as_deref(), "GitHub", "fab fa-github"),
        (profile.linkedin.as_deref(), "LinkedIn", "fab fa-linkedin"),
        (profile.medium.as_deref(), "Medium", "fab fa-medium"),
    ];
    for (value, label, icon) in socials {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            out.push_str(&contact_link(
                &normalize_external_url(value),
                label,
                icon,
                label,
                true,
            ));
        }
    }

    out.push_str("</div>");
    out
}

fn contact_link(href: &str, title: &str, icon: &str, text: &str, external: bool) -> String {
    let target = if external { r#" target="_blank""# } else { "" };
    format!(
        r#"<a href="{}"{target} class="contact-link" title="{title}"><i class="{icon}"></i><span>{}</span></a>"#,
        escape_html(href),
        escape_html(text)
    )
}

pub fn render_profile(doc: &Document, profile: &Profile) {
    doc.render(HERO_NAME, &escape_html(&profile.name));
    doc.render(HERO_TITLE, &escape_html(&profile.title));
    doc.render(ABOUT_TEXT, &escape_html(&profile.about));
    doc.render(CONTACT, &contact_links(profile));
}

pub fn academic_cards(education: &[Education], awards: &[Award], assets: &AssetResolver) -> String {
    let mut out = String::new();
    if !education.is_empty() {
        out.push_str(r#"<div class="academic-card"><h3>Education</h3>"#);
        for edu in education {
            out.push_str(&EntryTemplate::EDUCATION.render(&Entry::from(edu), assets));
        }
        out.push_str("</div>");
    }
    if !awards.is_empty() {
        out.push_str(r#"<div class="academic-card"><h3>Achievements</h3><ul class="award-list">"#);
        for award in awards {
            out.push_str(&EntryTemplate::AWARD.render(&Entry::from(award), assets));
        }
        out.push_str("</ul></div>");
    }
    out
}

pub fn render_academic(doc: &Document, education: &[Education], awards: &[Award], assets: &AssetResolver) {
    doc.render(ACADEMIC, &academic_cards(education, awards, assets));
}

pub fn render_experience_timeline(doc: &Document, experience: &[Experience], assets: &AssetResolver) {
    let html: String = experience
        .iter()
        .map(|exp| EntryTemplate::TIMELINE.render(&Entry::from(exp), assets))
        .collect();
    doc.render(EXPERIENCE, &html);
}

pub fn recent_experience(experience: &[Experience], limit: Option<usize>, assets: &AssetResolver) -> String {
    let shown = match limit {
        Some(n) => &experience[..experience.len().min(n)],
        None => experience,
    };
    if shown.is_empty() {
        return empty_state("No experiences to display.");
    }
    shown
        .iter()
        .map(|exp| EntryTemplate::RECENT_CARD.render(&Entry::from(exp), assets))
        .collect()
}

pub fn render_recent_experience(
    doc: &Document,
    experience: &[Experience],
    limit: Option<usize>,
    assets: &AssetResolver,
) {
    doc.render(RECENT_EXPERIENCE, &recent_experience(experience, limit, assets));
}

pub fn project_card(project: &Project, assets: &AssetResolver) -> String {
    let mut links = String::from(r#"<div class="project-links">"#);
    if let Some(github) = project.github.as_deref().filter(|v| !v.is_empty()) {
        links.push_str(&format!(
            r#"<a href="{}" target="_blank" title="View on GitHub"><i class="fab fa-github"></i></a>"#,
            escape_html(github)
        ));
    }
    if let Some(more) = project.more_info.as_deref().filter(|v| !v.is_empty()) {
        links.push_str(&format!(
            r#"<a href="{}" target="_blank" title="View Demo"><i class="fas fa-video"></i></a>"#,
            escape_html(more)
        ));
    }
    links.push_str("</div>");

    let tech: String = project
        .tech_stack
        .iter()
        .map(|t| format!(r#"<span class="tech-tag">{}</span>"#, escape_html(t)))
        .collect();

    let category = escape_html(&project.category);
    let title = escape_html(&project.title);
    format!(
        r#"<div class="project-card" data-category="{category}"><img src="{}" alt="{title}" class="project-img"><div class="project-content"><div class="project-category">{category}</div><h3>{title}</h3><p class="project-description">{}</p><div class="project-tech">{tech}</div>{links}</div></div>"#,
        escape_html(&assets.resolve(&project.image)),
        escape_html(&project.description),
    )
}

pub fn certificate_card(cert: &Certificate, assets: &AssetResolver) -> String {
    let title = escape_html(&cert.title);
    let date = cert
        .date
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"<span class="certificate-date">{}</span>"#, escape_html(d)))
        .unwrap_or_default();
    format!(
        r#"<div class="certificate-card" data-id="{}" tabindex="0" role="button"><img src="{}" alt="{title}" class="certificate-img"><div class="certificate-content"><h3>{title}</h3><p class="certificate-issuer">{}</p>{date}</div></div>"#,
        cert.id,
        escape_html(&assets.resolve(&cert.image)),
        escape_html(&cert.issuer),
    )
}

pub fn render_featured_projects(doc: &Document, projects: &[&Project], limit: Option<usize>, assets: &AssetResolver) {
    let shown = match limit {
        Some(n) => &projects[..projects.len().min(n)],
        None => projects,
    };
    let html: String = if shown.is_empty() {
        empty_state("No projects to display.")
    } else {
        shown.iter().map(|p| project_card(p, assets)).collect()
    };
    doc.render(FEATURED_PROJECTS, &html);
}

pub fn filter_buttons(counts: &[CategoryCount], active: &str) -> String {
    counts
        .iter()
        .map(|c| {
            let class = if c.key == active {
                "filter-btn active"
            } else {
                "filter-btn"
            };
            format!(
                r#"<button class="{class}" data-filter="{}">{} <span class="category-count">{}</span></button>"#,
                escape_html(&c.key),
                escape_html(&utils::capitalize_first(&c.key)),
                c.count
            )
        })
        .collect()
}

pub fn sort_select(id: &str, keys: &[SortKey], selected: &str) -> String {
    let options: String = keys
        .iter()
        .map(|k| {
            let sel = if k.as_str() == selected { " selected" } else { "" };
            format!(r#"<option value="{}"{sel}>{}</option>"#, k.as_str(), k.label())
        })
        .collect();
    format!(r#"<select id="{id}" class="sort-select">{options}</select>"#)
}

pub fn search_input(id: &str, placeholder: &str, value: &str) -> String {
    format!(
        r#"<input id="{id}" class="search-input" type="text" placeholder="{}" value="{}">"#,
        escape_html(placeholder),
        escape_html(value)
    )
}
