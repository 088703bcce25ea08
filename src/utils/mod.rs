use std::collections::HashSet;
use std::sync::atomic::{AtomicU8, Ordering};

use colored::{ColoredString, Colorize};

static VERBOSITY: AtomicU8 = AtomicU8::new(0);

pub fn set_verbosity(level: u8) {
    VERBOSITY.store(level, Ordering::Relaxed);
}

pub fn verbosity() -> u8 {
    VERBOSITY.load(Ordering::Relaxed)
}

fn tag(label: ColoredString) -> String {
    format!("{}{}{}", "[".bold().white(), label, "]".bold().white())
}

pub fn info(msg: impl AsRef<str>) {
    println!("{} {}", tag("INF".bold().blue()), msg.as_ref());
}

pub fn success(msg: impl AsRef<str>) {
    println!("{} {}", tag("OK".bold().green()), msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    eprintln!("{} {}", tag("WRN".bold().yellow()), msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("{} {}", tag("ERR".bold().red()), msg.as_ref().bold().white());
}

pub fn debug(msg: impl AsRef<str>) {
    if verbosity() >= 1 {
        println!("{} {}", tag("DBG".bold().magenta()), msg.as_ref());
    }
}

/// Splits a comma-separated list into lower-cased, de-duplicated names.
pub fn parse_names_csv(value: &str) -> Result<Vec<String>, String> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err("list is empty".to_string());
    }
    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for part in raw.split(',') {
        let item = part.trim();
        if item.is_empty() {
            continue;
        }
        let canonical = item.to_ascii_lowercase();
        if seen.insert(canonical.clone()) {
            out.push(canonical);
        }
    }
    if out.is_empty() {
        return Err("list is empty".to_string());
    }
    Ok(out)
}

pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
