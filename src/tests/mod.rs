use crate::assets::AssetResolver;
use crate::data::{Certificate, DataLocation, DataSource, PortfolioData, Project};
use crate::listview::certificates::{CertificateList, Certificates};
use crate::listview::projects::{ProjectList, Projects};
use crate::listview::{
    category_index, derive_view, ListDomain, ListRecord, SortKey, UiEvent, ViewState, ALL,
};
use crate::modal::ModalState;
use crate::render::Container;
use crate::site::{Page, PageKind, SiteOptions, ViewRequest};

fn project(title: &str, category: &str, rank: Option<f64>, date: Option<&str>) -> Project {
    Project {
        title: title.to_string(),
        description: format!("{title} description"),
        category: category.to_string(),
        date: date.map(str::to_string),
        rank,
        tech_stack: Vec::new(),
        image: format!("asset/img/{}.png", title.to_lowercase()),
        github: None,
        more_info: None,
    }
}

fn alpha_beta() -> Vec<Project> {
    vec![
        project("Alpha", "web", Some(2.0), Some("2023-01-01")),
        project("Beta", "ml", Some(1.0), Some("2024-01-01")),
    ]
}

fn sample_projects() -> Vec<Project> {
    let mut gamma = project("gamma", "web", Some(1.0), Some("2022-06"));
    gamma.tech_stack = vec!["Rust".to_string(), "WebAssembly".to_string()];
    let mut delta = project("Delta", "tools", None, None);
    delta.description = "A CLI for sorting photos".to_string();
    vec![
        project("Alpha", "web", Some(2.0), Some("2023-01-01")),
        project("Beta", "ml", Some(1.0), Some("2024-01-01")),
        gamma,
        delta,
        project("Epsilon", "ml", Some(3.0), Some("2021-03-15")),
    ]
}

fn sample_certificates() -> Vec<Certificate> {
    vec![
        Certificate {
            id: 1,
            title: "Cloud Practitioner".to_string(),
            issuer: "AWS".to_string(),
            date: Some("2023-04-01".to_string()),
            rank: Some(2.0),
            image: "asset/cert/aws.png".to_string(),
        },
        Certificate {
            id: 2,
            title: "Deep Learning".to_string(),
            issuer: "Coursera".to_string(),
            date: Some("2022-01-10".to_string()),
            rank: Some(1.0),
            image: "asset/cert/dl.png".to_string(),
        },
        Certificate {
            id: 3,
            title: "Rust Fundamentals".to_string(),
            issuer: "Linux Foundation".to_string(),
            date: None,
            rank: None,
            image: "https://cdn.example.com/rust.png".to_string(),
        },
    ]
}

fn titles<R: ListRecord>(view: &[&R]) -> Vec<String> {
    view.iter().map(|r| r.title().to_string()).collect()
}

fn project_list() -> ProjectList<String> {
    ProjectList::new(
        Projects::new(AssetResolver::for_page("/pages/projects.html")),
        String::new(),
    )
}

const SAMPLE_DOCUMENT: &str = r#"{
  "profile": {"name": "Ada", "title": "Engineer", "about": "Builds <things>", "email": "ada@x.dev", "github": "github.com/ada"},
  "education": [{"institution": "Uni", "degree": "BSc", "period": "2016 - 2020", "gpa": 3.9, "details": "Honours"}],
  "awards": [{"title": "Best Paper", "organization": "ACM", "year": 2021}],
  "experience": [
    {"role": "Engineer", "company": "Acme", "period": "2022 - now", "description": "Platform", "logo": "asset/logo/acme.png"},
    {"role": "Intern", "company": "Initech", "period": "2021"}
  ],
  "projects": [
    {"title": "Alpha", "description": "site", "category": "web", "date": "2023-01-01", "rank": 2, "tech_stack": ["Rust"], "image": "asset/a.png", "github": "https://github.com/ada/alpha"},
    {"title": "Beta", "description": "model", "category": "ml", "date": "2024-01-01", "rank": 1, "tech_stack": ["Python"], "image": "asset/b.png"},
    {"description": "no title here", "category": "web"}
  ],
  "certificates": [
    {"id": 5, "title": "Cloud", "issuer": "AWS", "date": "2023-04-01", "rank": 1, "image": "asset/cert/aws.png"},
    {"title": "No id", "issuer": "Nobody"}
  ]
}"#;

// ---- recompute ----

#[test]
fn scenario_rank_filter_search() {
    let mut list = project_list();
    list.initialize(alpha_beta());

    list.set_sort("rank");
    assert_eq!(titles(&list.derived_view()), vec!["Beta", "Alpha"]);

    list.set_filter("web");
    assert_eq!(titles(&list.derived_view()), vec!["Alpha"]);

    list.set_filter(ALL);
    list.set_search("beta");
    assert_eq!(titles(&list.derived_view()), vec!["Beta"]);
}

#[test]
fn default_sort_is_rank_for_both_domains() {
    let list = project_list();
    assert_eq!(list.state(), &ViewState::new(SortKey::Rank));
    let certs = CertificateList::new(
        Certificates::new(AssetResolver::for_page("/pages/certificates.html")),
        String::new(),
    );
    assert_eq!(certs.state().sort, "rank");
    assert_eq!(certs.state().filter, "all");
}

#[test]
fn rank_order_is_sorted_with_case_insensitive_title_ties() {
    let collection = sample_projects();
    let view = derive_view(&collection, &ViewState::new(SortKey::Rank), Projects::SORT_KEYS);
    assert_eq!(
        titles(&view),
        vec!["Delta", "Beta", "gamma", "Alpha", "Epsilon"]
    );
    for pair in view.windows(2) {
        let (x, y) = (pair[0], pair[1]);
        assert!(x.rank() <= y.rank());
        if x.rank() == y.rank() {
            assert!(x.title().to_lowercase() <= y.title().to_lowercase());
        }
    }
}

#[test]
fn recent_and_oldest_order_by_date_with_missing_as_epoch() {
    let collection = sample_projects();
    let mut state = ViewState::new(SortKey::Recent);
    let recent = derive_view(&collection, &state, Projects::SORT_KEYS);
    assert_eq!(
        titles(&recent),
        vec!["Beta", "Alpha", "gamma", "Epsilon", "Delta"]
    );

    state.sort = "oldest".to_string();
    let oldest = derive_view(&collection, &state, Projects::SORT_KEYS);
    assert_eq!(
        titles(&oldest),
        vec!["Delta", "Epsilon", "gamma", "Alpha", "Beta"]
    );
}

#[test]
fn category_sort_is_stable_within_a_category() {
    let collection = sample_projects();
    let mut state = ViewState::new(SortKey::Rank);
    state.sort = "category".to_string();
    let view = derive_view(&collection, &state, Projects::SORT_KEYS);
    assert_eq!(
        titles(&view),
        vec!["Beta", "Epsilon", "Delta", "Alpha", "gamma"]
    );
}

#[test]
fn unknown_or_unoffered_sort_keeps_collection_order() {
    let collection = sample_projects();
    let mut state = ViewState::new(SortKey::Rank);
    state.sort = "popularity".to_string();
    let view = derive_view(&collection, &state, Projects::SORT_KEYS);
    assert_eq!(
        titles(&view),
        vec!["Alpha", "Beta", "gamma", "Delta", "Epsilon"]
    );

    let certs = sample_certificates();
    state.sort = "category".to_string();
    let view = derive_view(&certs, &state, Certificates::SORT_KEYS);
    assert_eq!(
        titles(&view),
        vec!["Cloud Practitioner", "Deep Learning", "Rust Fundamentals"]
    );
}

#[test]
fn search_matches_exactly_the_records_containing_the_query() {
    let collection = sample_projects();
    for query in [
        "rust", "ML", "photos", "a", "zzz", "Web", " rust", "photos ", "a cli", " description",
    ] {
        let mut state = ViewState::new(SortKey::Rank);
        state.search = query.to_string();
        let view = derive_view(&collection, &state, Projects::SORT_KEYS);
        let needle = query.to_lowercase();
        for record in &collection {
            let hit = record
                .search_fields()
                .iter()
                .any(|f| f.to_lowercase().contains(&needle));
            let shown = view.iter().any(|r| std::ptr::eq(*r, record));
            assert_eq!(hit, shown, "query {query:?} record {}", record.title);
        }
    }
}

#[test]
fn whitespace_query_matches_everything() {
    let collection = sample_projects();
    let mut state = ViewState::new(SortKey::Rank);
    state.search = "   \t".to_string();
    assert_eq!(
        derive_view(&collection, &state, Projects::SORT_KEYS).len(),
        collection.len()
    );
}

#[test]
fn search_is_stored_verbatim() {
    let mut list = project_list();
    list.initialize(sample_projects());
    list.set_search("  RuSt ");
    assert_eq!(list.state().search, "  RuSt ");
    assert!(list.derived_view().is_empty());
    assert!(list.target().contains("No projects to display."));

    list.set_search("RuSt");
    assert_eq!(titles(&list.derived_view()), vec!["gamma"]);
}

#[test]
fn padded_query_matches_only_fields_containing_the_padding() {
    let collection = sample_projects();
    let mut state = ViewState::new(SortKey::Rank);
    state.search = " Description".to_string();
    assert_eq!(
        titles(&derive_view(&collection, &state, Projects::SORT_KEYS)),
        vec!["Beta", "gamma", "Alpha", "Epsilon"]
    );
}

#[test]
fn certificates_search_title_and_issuer_only() {
    let certs = sample_certificates();
    let mut state = ViewState::new(SortKey::Rank);
    state.search = "coursera".to_string();
    assert_eq!(
        titles(&derive_view(&certs, &state, Certificates::SORT_KEYS)),
        vec!["Deep Learning"]
    );
    state.search = "aws.png".to_string();
    assert!(derive_view(&certs, &state, Certificates::SORT_KEYS).is_empty());
}

#[test]
fn filter_is_case_sensitive_and_unknown_keys_give_empty_view() {
    let mut list = project_list();
    list.initialize(sample_projects());
    list.set_filter("Web");
    assert!(list.derived_view().is_empty());
    assert!(list.target().contains("No projects to display."));
    list.set_filter("nonexistent");
    assert!(list.derived_view().is_empty());
}

#[test]
fn filter_all_restores_full_collection_in_sort_order() {
    let mut list = project_list();
    list.initialize(sample_projects());
    list.set_sort("recent");
    let before = titles(&list.derived_view());
    list.set_filter("ml");
    assert_eq!(list.derived_view().len(), 2);
    list.set_filter(ALL);
    assert_eq!(titles(&list.derived_view()), before);
    assert_eq!(list.derived_view().len(), sample_projects().len());
}

#[test]
fn render_is_idempotent() {
    let mut list = project_list();
    list.initialize(sample_projects());
    list.set_filter("web");
    list.set_search("a");
    let first = list.target().clone();
    list.refresh();
    assert_eq!(list.target(), &first);
    list.set_search("a");
    assert_eq!(list.target(), &first);
}

#[test]
fn render_replaces_previous_contents() {
    let mut list = project_list();
    list.initialize(sample_projects());
    assert!(list.target().contains("Epsilon"));
    list.set_filter("tools");
    assert!(list.target().contains("Delta"));
    assert!(!list.target().contains("Epsilon"));
    assert_eq!(list.target().matches("project-card").count(), 1);
}

#[test]
fn empty_collection_renders_placeholder_for_both_domains() {
    let mut list = project_list();
    list.initialize(Vec::new());
    assert!(list.target().contains("No projects to display."));
    assert_eq!(list.categories().len(), 1);
    assert_eq!(list.categories()[0].count, 0);

    let mut certs = CertificateList::new(
        Certificates::new(AssetResolver::for_page("/pages/certificates.html")),
        String::new(),
    );
    certs.initialize(Vec::new());
    assert!(certs.target().contains("No certificates to display."));
}

#[test]
fn unbound_controller_renders_nothing() {
    let mut list = project_list();
    list.set_filter("web");
    list.set_sort("recent");
    assert!(!list.is_bound());
    assert!(list.target().is_empty());
}

#[test]
fn category_index_counts() {
    let index = category_index(&sample_projects());
    let pairs: Vec<(&str, usize)> = index.iter().map(|c| (c.key.as_str(), c.count)).collect();
    assert_eq!(pairs, vec![("all", 5), ("web", 2), ("ml", 2), ("tools", 1)]);
}

#[test]
fn uncategorized_projects_get_no_filter_button() {
    let mut collection = alpha_beta();
    collection.push(project("Loose", "", None, None));
    let index = category_index(&collection);
    let pairs: Vec<(&str, usize)> = index.iter().map(|c| (c.key.as_str(), c.count)).collect();
    assert_eq!(pairs, vec![("all", 3), ("web", 1), ("ml", 1)]);

    let html = crate::render::templates::filter_buttons(&index, ALL);
    assert!(!html.contains(r#"data-filter="""#));
    assert_eq!(html.matches("<button").count(), 3);
}

#[test]
fn filter_buttons_follow_the_active_filter() {
    let buttons = Container::new();
    let mut list = ProjectList::new(
        Projects::new(AssetResolver::for_page("/pages/projects.html")),
        Container::new(),
    )
    .with_filter_target(buttons.clone());
    list.initialize(sample_projects());
    let html = buttons.contents();
    assert!(html.contains(r#"<button class="filter-btn active" data-filter="all">All <span class="category-count">5</span></button>"#));
    assert!(html.contains(r#"data-filter="tools">Tools <span class="category-count">1</span>"#));

    list.handle(UiEvent::FilterClicked("ml".to_string()));
    let html = buttons.contents();
    assert!(html.contains(r#"<button class="filter-btn active" data-filter="ml">"#));
    assert!(html.contains(r#"<button class="filter-btn" data-filter="all">"#));
}

#[test]
fn ui_events_drive_the_same_operations() {
    let mut list = project_list();
    list.initialize(sample_projects());
    list.handle(UiEvent::SortChanged("oldest".to_string()));
    list.handle(UiEvent::SearchInput("ml".to_string()));
    assert_eq!(list.state().sort, "oldest");
    assert_eq!(titles(&list.derived_view()), vec!["Epsilon", "Beta"]);
}

#[test]
fn project_cards_resolve_images_for_subpages() {
    let mut list = project_list();
    list.initialize(alpha_beta());
    assert!(list.target().contains(r#"src="../asset/img/alpha.png""#));
}

// ---- data ----

#[test]
fn parses_document_and_skips_malformed_records() {
    let data = PortfolioData::from_json_str(SAMPLE_DOCUMENT).unwrap();
    assert_eq!(data.profile.as_ref().map(|p| p.name.as_str()), Some("Ada"));
    assert_eq!(data.education[0].gpa.as_deref(), Some("3.9"));
    assert_eq!(data.awards[0].year.as_deref(), Some("2021"));
    assert_eq!(data.experience.len(), 2);
    assert_eq!(data.experience[1].logo, None);
    assert_eq!(data.projects.len(), 2);
    assert_eq!(data.certificates.len(), 1);
    assert_eq!(data.certificates[0].id, 5);
    assert_eq!(data.certificates[0].issuer, "AWS");
}

#[test]
fn missing_sections_default_to_empty() {
    let data = PortfolioData::from_json_str(r#"{"projects": []}"#).unwrap();
    assert!(data.profile.is_none());
    assert!(data.certificates.is_empty());
    assert!(PortfolioData::from_json_str("[1, 2]").is_err());
    assert!(PortfolioData::from_json_str("{not json").is_err());
}

#[test]
fn loose_dates() {
    use crate::data::{date_or_epoch, parse_loose_date};
    use chrono::NaiveDate;

    assert_eq!(parse_loose_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
    assert_eq!(parse_loose_date("2023-05"), NaiveDate::from_ymd_opt(2023, 5, 1));
    assert_eq!(parse_loose_date("2021"), NaiveDate::from_ymd_opt(2021, 1, 1));
    assert_eq!(
        parse_loose_date("2020-03-04T10:00:00Z"),
        NaiveDate::from_ymd_opt(2020, 3, 4)
    );
    assert_eq!(parse_loose_date("soon"), None);
    assert_eq!(date_or_epoch(None), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
}

#[test]
fn data_location_detects_urls() {
    assert_eq!(
        DataLocation::parse("HTTPS://me.dev/data.json"),
        DataLocation::Url("HTTPS://me.dev/data.json".to_string())
    );
    assert!(matches!(DataLocation::parse("data.json"), DataLocation::File(_)));
}

#[tokio::test]
async fn data_source_reads_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, SAMPLE_DOCUMENT).unwrap();
    let source = DataSource::new(DataLocation::File(path), std::time::Duration::from_secs(1));
    let data = source.load().await.unwrap();
    assert_eq!(data.projects.len(), 2);
}

#[tokio::test]
async fn data_source_failure_is_an_absent_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let source = DataSource::new(
        DataLocation::File(dir.path().join("missing.json")),
        std::time::Duration::from_secs(1),
    );
    assert!(source.fetch().await.is_err());
    assert!(source.load().await.is_none());
}

// ---- pages ----

#[test]
fn home_page_renders_every_static_section() {
    let data = PortfolioData::from_json_str(SAMPLE_DOCUMENT).unwrap();
    let opts = SiteOptions {
        home_project_limit: Some(1),
        home_experience_limit: Some(1),
        ..SiteOptions::default()
    };
    let page = Page::build(PageKind::Home, Some(&data), &opts);
    let doc = page.document();
    assert_eq!(doc.contents("hero-name").as_deref(), Some("Ada"));
    assert_eq!(doc.contents("about-text").as_deref(), Some("Builds &lt;things&gt;"));
    assert!(doc.contents("contact-container").unwrap().contains("https://github.com/ada"));
    let academic = doc.contents("academic-container").unwrap();
    assert!(academic.contains("2016 - 2020 | GPA: 3.9"));
    assert!(academic.contains("ACM (2021)"));
    let recent = doc.contents("recent-experience-container").unwrap();
    assert!(recent.contains("Acme"));
    assert!(!recent.contains("Initech"));
    let featured = doc.contents("featured-projects-container").unwrap();
    assert!(featured.contains("Beta"));
    assert!(!featured.contains("Alpha"));
    assert!(page.projects().is_none());
    assert!(page.modal().is_none());
}

#[test]
fn projects_page_applies_requested_view() {
    let data = PortfolioData::from_json_str(SAMPLE_DOCUMENT).unwrap();
    let opts = SiteOptions {
        projects: ViewRequest {
            filter: Some("web".to_string()),
            search: None,
            sort: Some("recent".to_string()),
        },
        ..SiteOptions::default()
    };
    let mut page = Page::build(PageKind::Projects, Some(&data), &opts);
    let list = page.projects().unwrap();
    assert_eq!(titles(&list.derived_view()), vec!["Alpha"]);

    let html = page.to_html(None);
    assert!(html.contains(r#"<option value="recent" selected>"#));
    assert!(html.contains(r#"src="../asset/a.png""#));
    assert!(html.contains(r#"href="../index.html""#));

    if let Some(list) = page.projects_mut() {
        list.set_filter("all");
    }
    let contents = page.document().contents("all-projects-container").unwrap();
    assert!(contents.contains("Beta"));
}

#[test]
fn certificates_page_opens_modal_and_ignores_unknown_ids() {
    let data = PortfolioData::from_json_str(SAMPLE_DOCUMENT).unwrap();
    let opts = SiteOptions {
        open_certificate: Some(5),
        ..SiteOptions::default()
    };
    let page = Page::build(PageKind::Certificates, Some(&data), &opts);
    assert_eq!(page.modal().unwrap().state(), ModalState::Open(5));
    let overlay = page.document().contents("certificate-modal").unwrap();
    assert!(overlay.contains(r#"src="../asset/cert/aws.png""#));

    let opts = SiteOptions {
        open_certificate: Some(42),
        ..SiteOptions::default()
    };
    let page = Page::build(PageKind::Certificates, Some(&data), &opts);
    assert_eq!(page.modal().unwrap().state(), ModalState::Closed);
}

#[test]
fn pages_without_data_keep_empty_containers() {
    for kind in PageKind::ALL {
        let page = Page::build(kind, None, &SiteOptions::default());
        for id in kind.containers() {
            assert_eq!(page.document().contents(id).as_deref(), Some(""));
        }
        assert!(page.to_html(None).starts_with("<!DOCTYPE html>"));
    }
}

#[test]
fn embedded_data_is_script_safe() {
    let page = Page::build(PageKind::Home, None, &SiteOptions::default());
    let html = page.to_html(Some(r#"{"about":"</script><b>"}"#));
    assert!(html.contains(r#"data-src="data.json""#));
    assert!(html.contains(r#"<\/script><b>"#));
}

#[tokio::test]
async fn writes_pages_and_data_document() {
    let dir = tempfile::tempdir().unwrap();
    let data = PortfolioData::from_json_str(SAMPLE_DOCUMENT).unwrap();
    let pages: Vec<(PageKind, String)> = PageKind::ALL
        .iter()
        .map(|k| (*k, Page::build(*k, Some(&data), &SiteOptions::default()).to_html(None)))
        .collect();
    let results = crate::site::write_pages(dir.path(), pages).await;
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|(_, r)| r.is_ok()));
    assert!(dir.path().join("index.html").exists());
    assert!(dir.path().join("pages").join("certificates.html").exists());

    let written = crate::site::write_data_document(dir.path(), &data).await.unwrap();
    let raw = std::fs::read_to_string(written).unwrap();
    let reparsed = PortfolioData::from_json_str(&raw).unwrap();
    assert_eq!(reparsed, data);
}

#[test]
fn dump_formats() {
    use crate::output::{render_view, OutputFormat};
    let collection = alpha_beta();
    let view: Vec<&Project> = collection.iter().collect();
    let text = String::from_utf8(render_view(OutputFormat::Text, &view, "").unwrap()).unwrap();
    assert_eq!(text, "Alpha\nBeta\n");
    let json = String::from_utf8(render_view(OutputFormat::Json, &view, "").unwrap()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[1]["title"], "Beta");
    let html = render_view(OutputFormat::Html, &view, "<p>x</p>").unwrap();
    assert_eq!(html, b"<p>x</p>\n".to_vec());
}
