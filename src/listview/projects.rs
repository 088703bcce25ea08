use crate::assets::AssetResolver;
use crate::data::Project;
use crate::listview::{ListDomain, ListRecord, ListViewController, SortKey};
use crate::render::templates;

pub const CONTAINER: &str = "all-projects-container";
pub const FILTER_CONTAINER: &str = "filter-container";
pub const SEARCH_INPUT: &str = "search-input";
pub const SORT_SELECT: &str = "sort-select";

impl ListRecord for Project {
    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }

    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn rank(&self) -> f64 {
        self.rank.unwrap_or(0.0)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ];
        fields.extend(self.tech_stack.iter().map(String::as_str));
        fields
    }
}

#[derive(Clone, Debug)]
pub struct Projects {
    assets: AssetResolver,
}

impl Projects {
    pub fn new(assets: AssetResolver) -> Self {
        Self { assets }
    }
}

impl ListDomain for Projects {
    type Record = Project;

    const NAME: &'static str = "projects";
    const SORT_KEYS: &'static [SortKey] = &[
        SortKey::Recent,
        SortKey::Oldest,
        SortKey::Category,
        SortKey::Rank,
    ];
    const EMPTY_MESSAGE: &'static str = "No projects to display.";

    fn render_item(&self, record: &Project) -> String {
        templates::project_card(record, &self.assets)
    }
}

pub type ProjectList<T> = ListViewController<Projects, T>;
