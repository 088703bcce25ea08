use std::sync::OnceLock;

use regex::Regex;

static ABSOLUTE_URL: OnceLock<Option<Regex>> = OnceLock::new();

/// Matches `scheme://host` and protocol-relative `//host` forms.
pub fn is_absolute_url(path: &str) -> bool {
    ABSOLUTE_URL
        .get_or_init(|| Regex::new(r"(?i)^(?:[a-z]+:)?//").ok())
        .as_ref()
        .map_or(false, |re| re.is_match(path))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetResolver {
    page_path: String,
}

impl AssetResolver {
    pub fn for_page(page_path: impl Into<String>) -> Self {
        Self {
            page_path: page_path.into(),
        }
    }

    pub fn in_subdirectory(&self) -> bool {
        self.page_path.contains("/pages/")
    }

    pub fn resolve(&self, asset: &str) -> String {
        let needs_prefix = !asset.is_empty()
            && !is_absolute_url(asset)
            && !asset.starts_with('/')
            && !asset.starts_with("./")
            && !asset.starts_with("../")
            && self.in_subdirectory();
        if needs_prefix {
            format!("../{asset}")
        } else {
            asset.to_string()
        }
    }

    pub fn data_document(&self) -> &'static str {
        if self.in_subdirectory() {
            "../data.json"
        } else {
            "data.json"
        }
    }
}

/// Social links are often stored without a scheme.
pub fn normalize_external_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
