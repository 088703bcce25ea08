use crate::cli::args::CliArgs;
use crate::output::{DumpTarget, OutputFormat};
use crate::site::PageKind;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.pages.as_deref() {
        parse_pages(raw).map_err(|e| format!("invalid --pages '{raw}': {e}"))?;
    }
    if let Some(raw) = args.dump.as_deref() {
        if DumpTarget::parse(raw).is_none() {
            return Err(format!(
                "invalid --dump '{raw}', expected projects or certificates"
            ));
        }
    }
    if let Some(raw) = args.format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid --format '{raw}', expected text, json, or html"));
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    Ok(())
}

pub fn parse_pages(raw: &str) -> Result<Vec<PageKind>, String> {
    let names = crate::utils::parse_names_csv(raw)?;
    names
        .iter()
        .map(|name| PageKind::parse(name).ok_or_else(|| format!("unknown page '{name}'")))
        .collect()
}
