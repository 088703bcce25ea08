use serde::Serialize;

use crate::listview::ListRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

/// Which list view `--dump` prints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumpTarget {
    Projects,
    Certificates,
}

impl DumpTarget {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "projects" => Some(Self::Projects),
            "certificates" | "certs" => Some(Self::Certificates),
            _ => None,
        }
    }
}

pub fn render_text<R: ListRecord>(view: &[&R]) -> Vec<u8> {
    let mut out = String::new();
    for r in view {
        out.push_str(r.title());
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json<R: Serialize>(view: &[&R]) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = serde_json::to_vec_pretty(view)?;
    out.push(b'\n');
    Ok(out)
}

pub fn render_view<R: ListRecord + Serialize>(
    format: OutputFormat,
    view: &[&R],
    html: &str,
) -> Result<Vec<u8>, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(view)),
        OutputFormat::Json => render_json(view),
        OutputFormat::Html => {
            let mut out = html.as_bytes().to_vec();
            out.push(b'\n');
            Ok(out)
        }
    }
}
