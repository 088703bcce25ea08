use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::utils;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read data document: {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch data document: {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("data document request returned status {status}: {url}")]
    Status { url: String, status: u16 },

    #[error("failed to parse data document: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("data document must be a JSON object at the top level")]
    NotAnObject,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub about: String,
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub medium: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(deserialize_with = "lenient_string")]
    pub period: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub gpa: Option<String>,
    pub details: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Award {
    pub title: String,
    pub organization: String,
    #[serde(deserialize_with = "lenient_string")]
    pub year: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Experience {
    pub role: String,
    pub company: String,
    #[serde(deserialize_with = "lenient_string")]
    pub period: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default)]
    pub rank: Option<f64>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Certificate {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default)]
    pub rank: Option<f64>,
    #[serde(default)]
    pub image: String,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct PortfolioData {
    pub profile: Option<Profile>,
    pub education: Vec<Education>,
    pub awards: Vec<Award>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
}

impl PortfolioData {
    pub fn from_json_str(raw: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(raw).map_err(|source| DataError::Parse { source })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DataError> {
        let doc = match value {
            Value::Object(map) => map,
            _ => return Err(DataError::NotAnObject),
        };

        let profile = match doc.get("profile") {
            None | Some(Value::Null) => None,
            Some(raw) => match serde_json::from_value::<Profile>(raw.clone()) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    utils::warn(format!("ignoring malformed profile: {e}"));
                    None
                }
            },
        };

        let certificates = dedupe_certificates(parse_list(&doc, "certificates"));

        Ok(Self {
            profile,
            education: parse_list(&doc, "education"),
            awards: parse_list(&doc, "awards"),
            experience: parse_list(&doc, "experience"),
            projects: parse_list(&doc, "projects"),
            certificates,
        })
    }
}

fn parse_list<T: DeserializeOwned>(doc: &Map<String, Value>, key: &str) -> Vec<T> {
    let items = match doc.get(key) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            utils::warn(format!("ignoring '{key}': expected a list"));
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(record) => out.push(record),
            Err(e) => utils::warn(format!("skipping malformed {key} record #{idx}: {e}")),
        }
    }
    out
}

fn dedupe_certificates(certificates: Vec<Certificate>) -> Vec<Certificate> {
    let mut seen: HashSet<u64> = HashSet::new();
    for cert in &certificates {
        if !seen.insert(cert.id) {
            utils::warn(format!(
                "duplicate certificate id {}; lookups resolve to the first record",
                cert.id
            ));
        }
    }
    certificates
}

pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d") {
        return Some(d);
    }
    if trimmed.len() == 4 {
        if let Ok(year) = trimmed.parse::<i32>() {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }
    None
}

/// Missing or unparseable dates sort as the Unix epoch.
pub fn date_or_epoch(raw: Option<&str>) -> NaiveDate {
    // NaiveDate's default is 1970-01-01.
    raw.and_then(parse_loose_date).unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataLocation {
    File(PathBuf),
    Url(String),
}

impl DataLocation {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(crate::config::expand_tilde(trimmed))
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DataSource {
    location: DataLocation,
    timeout: Duration,
}

impl DataSource {
    pub fn new(location: DataLocation, timeout: Duration) -> Self {
        Self { location, timeout }
    }

    pub fn location(&self) -> &DataLocation {
        &self.location
    }

    pub async fn fetch(&self) -> Result<PortfolioData, DataError> {
        let raw = match &self.location {
            DataLocation::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| DataError::Read {
                    path: path.display().to_string(),
                    source,
                })?,
            DataLocation::Url(url) => self.fetch_url(url).await?,
        };
        PortfolioData::from_json_str(&raw)
    }

    async fn fetch_url(&self, url: &str) -> Result<String, DataError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|source| DataError::HttpClientBuild { source })?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|source| DataError::Http {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|source| DataError::Http {
            url: url.to_string(),
            source,
        })
    }

    pub async fn load(&self) -> Option<PortfolioData> {
        match self.fetch().await {
            Ok(data) => {
                utils::debug(format!(
                    "loaded {} projects, {} certificates, {} experience entries from {}",
                    data.projects.len(),
                    data.certificates.len(),
                    data.experience.len(),
                    self.location.display()
                ));
                Some(data)
            }
            Err(e) => {
                utils::error(format!("Error loading data: {e}"));
                None
            }
        }
    }
}
