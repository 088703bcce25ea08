pub mod certificates;
pub mod projects;

use std::cmp::Ordering;

use itertools::Itertools;
use serde::Serialize;

use crate::data::date_or_epoch;
use crate::render::templates;
use crate::render::RenderTarget;
use crate::utils;

pub const ALL: &str = "all";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Recent,
    Oldest,
    Category,
    Rank,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "recent" => Some(Self::Recent),
            "oldest" => Some(Self::Oldest),
            "category" => Some(Self::Category),
            "rank" => Some(Self::Rank),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Oldest => "oldest",
            Self::Category => "category",
            Self::Rank => "rank",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Recent => "Most Recent",
            Self::Oldest => "Oldest First",
            Self::Category => "Category",
            Self::Rank => "Rank",
        }
    }
}

pub trait ListRecord {
    fn title(&self) -> &str;

    fn category(&self) -> Option<&str> {
        None
    }

    fn date(&self) -> Option<&str>;

    /// Missing rank reads as 0.
    fn rank(&self) -> f64;

    fn search_fields(&self) -> Vec<&str>;

    fn matches_query(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

pub trait ListDomain {
    type Record: ListRecord;

    const NAME: &'static str;
    const SORT_KEYS: &'static [SortKey];
    const DEFAULT_SORT: SortKey = SortKey::Rank;
    const EMPTY_MESSAGE: &'static str;

    fn render_item(&self, record: &Self::Record) -> String;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub filter: String,
    pub search: String,
    pub sort: String,
}

impl ViewState {
    pub fn new(default_sort: SortKey) -> Self {
        Self {
            filter: ALL.to_string(),
            search: String::new(),
            sort: default_sort.as_str().to_string(),
        }
    }

    pub fn sort_key(&self, offered: &[SortKey]) -> Option<SortKey> {
        SortKey::parse(&self.sort).filter(|k| offered.contains(k))
    }
}

pub fn compare_records<R: ListRecord>(key: SortKey, a: &R, b: &R) -> Ordering {
    match key {
        SortKey::Recent => date_or_epoch(b.date()).cmp(&date_or_epoch(a.date())),
        SortKey::Oldest => date_or_epoch(a.date()).cmp(&date_or_epoch(b.date())),
        SortKey::Category => {
            let ca = a.category().unwrap_or_default();
            let cb = b.category().unwrap_or_default();
            ca.to_lowercase()
                .cmp(&cb.to_lowercase())
                .then_with(|| ca.cmp(cb))
        }
        SortKey::Rank => a
            .rank()
            .total_cmp(&b.rank())
            .then_with(|| a.title().to_lowercase().cmp(&b.title().to_lowercase())),
    }
}

pub fn derive_view<'a, R: ListRecord>(
    collection: &'a [R],
    state: &ViewState,
    offered: &[SortKey],
) -> Vec<&'a R> {
    // A blank query disables search; otherwise the query is matched as typed.
    let searching = !state.search.trim().is_empty();
    let needle = state.search.to_lowercase();
    let mut view: Vec<&R> = collection
        .iter()
        .filter(|r| state.filter == ALL || r.category() == Some(state.filter.as_str()))
        .filter(|r| !searching || r.matches_query(&needle))
        .collect();

    if let Some(key) = state.sort_key(offered) {
        view.sort_by(|a, b| compare_records(key, *a, *b));
    }
    view
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub key: String,
    pub count: usize,
}

/// `all` first with the collection size, then each distinct non-empty
/// category in first-seen order with its record count.
pub fn category_index<R: ListRecord>(collection: &[R]) -> Vec<CategoryCount> {
    let mut out = vec![CategoryCount {
        key: ALL.to_string(),
        count: collection.len(),
    }];
    let categories = collection
        .iter()
        .filter_map(|r| r.category())
        .filter(|c| !c.is_empty())
        .unique();
    for cat in categories {
        out.push(CategoryCount {
            key: cat.to_string(),
            count: collection
                .iter()
                .filter(|r| r.category() == Some(cat))
                .count(),
        });
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    FilterClicked(String),
    SearchInput(String),
    SortChanged(String),
}

pub struct ListViewController<D: ListDomain, T: RenderTarget> {
    domain: D,
    target: T,
    filter_target: Option<T>,
    collection: Vec<D::Record>,
    categories: Vec<CategoryCount>,
    state: ViewState,
    bound: bool,
}

impl<D: ListDomain, T: RenderTarget> ListViewController<D, T> {
    pub fn new(domain: D, target: T) -> Self {
        Self {
            domain,
            target,
            filter_target: None,
            collection: Vec::new(),
            categories: Vec::new(),
            state: ViewState::new(D::DEFAULT_SORT),
            bound: false,
        }
    }

    pub fn with_filter_target(mut self, target: T) -> Self {
        self.filter_target = Some(target);
        self
    }

    pub fn initialize(&mut self, collection: Vec<D::Record>) {
        self.categories = category_index(&collection);
        self.collection = collection;
        self.bound = true;
        utils::debug(format!(
            "{}: bound {} records across {} categories",
            D::NAME,
            self.collection.len(),
            self.categories.len().saturating_sub(1)
        ));
        self.refresh();
    }

    pub fn set_filter(&mut self, key: &str) {
        self.state.filter = key.to_string();
        self.refresh();
    }

    pub fn set_search(&mut self, query: &str) {
        self.state.search = query.to_string();
        self.refresh();
    }

    pub fn set_sort(&mut self, key: &str) {
        if SortKey::parse(key).filter(|k| D::SORT_KEYS.contains(k)).is_none() {
            utils::debug(format!("{}: sort key '{key}' not offered, keeping order", D::NAME));
        }
        self.state.sort = key.to_string();
        self.refresh();
    }

    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::FilterClicked(key) => self.set_filter(&key),
            UiEvent::SearchInput(query) => self.set_search(&query),
            UiEvent::SortChanged(key) => self.set_sort(&key),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn categories(&self) -> &[CategoryCount] {
        &self.categories
    }

    pub fn collection(&self) -> &[D::Record] {
        &self.collection
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn derived_view(&self) -> Vec<&D::Record> {
        derive_view(&self.collection, &self.state, D::SORT_KEYS)
    }

    pub fn render_html(&self) -> String {
        let view = self.derived_view();
        if view.is_empty() {
            return templates::empty_state(D::EMPTY_MESSAGE);
        }
        view.iter().map(|r| self.domain.render_item(r)).collect()
    }

    pub fn filter_buttons_html(&self) -> String {
        templates::filter_buttons(&self.categories, &self.state.filter)
    }

    pub fn sort_select_html(&self, id: &str) -> String {
        templates::sort_select(id, D::SORT_KEYS, &self.state.sort)
    }

    // Unbound controllers render nothing.
    pub fn refresh(&mut self) {
        if !self.bound {
            return;
        }
        let html = self.render_html();
        self.target.replace_contents(&html);
        if self.filter_target.is_some() {
            let buttons = self.filter_buttons_html();
            if let Some(target) = self.filter_target.as_mut() {
                target.replace_contents(&buttons);
            }
        }
    }
}
