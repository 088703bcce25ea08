use crate::assets::AssetResolver;
use crate::data::Certificate;
use crate::listview::{ListDomain, ListRecord, ListViewController, SortKey};
use crate::modal::ModalRecord;
use crate::render::templates;

pub const CONTAINER: &str = "certificates-container";
pub const SEARCH_INPUT: &str = "cert-search-input";
pub const SORT_SELECT: &str = "cert-sort-select";

impl ListRecord for Certificate {
    fn title(&self) -> &str {
        &self.title
    }

    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn rank(&self) -> f64 {
        self.rank.unwrap_or(0.0)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.issuer.as_str()]
    }
}

impl ModalRecord for Certificate {
    fn id(&self) -> u64 {
        self.id
    }

    fn image(&self) -> &str {
        &self.image
    }

    fn caption(&self) -> &str {
        &self.title
    }
}

#[derive(Clone, Debug)]
pub struct Certificates {
    assets: AssetResolver,
}

impl Certificates {
    pub fn new(assets: AssetResolver) -> Self {
        Self { assets }
    }
}

impl ListDomain for Certificates {
    type Record = Certificate;

    const NAME: &'static str = "certificates";
    const SORT_KEYS: &'static [SortKey] = &[SortKey::Recent, SortKey::Oldest, SortKey::Rank];
    const EMPTY_MESSAGE: &'static str = "No certificates to display.";

    fn render_item(&self, record: &Certificate) -> String {
        templates::certificate_card(record, &self.assets)
    }
}

pub type CertificateList<T> = ListViewController<Certificates, T>;
