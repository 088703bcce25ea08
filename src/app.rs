use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::time::Instant;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::data::{DataLocation, DataSource, PortfolioData};
use crate::output::{self, DumpTarget, OutputFormat};
use crate::site::{self, Page, PageKind, SiteOptions, ViewRequest};
use crate::utils;

fn print_banner() {
    const BANNER: &str = r#"
                    __  ____      ___
    ____  ____  _____/ /_/ __/___  / (_)___
   / __ \/ __ \/ ___/ __/ /_/ __ \/ / / __ \
  / /_/ / /_/ / /  / /_/ __/ /_/ / / / /_/ /
 / .___/\____/_/   \__/_/  \____/_/_/\____/
/_/
       v0.1.0 - portfolio site renderer
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn format_opt_value(v: Option<&str>, default: &str) -> String {
    match v {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut out = String::new();

    out.push_str(cmd.get_name());
    if let Some(version) = cmd.get_version() {
        out.push(' ');
        out.push_str(version);
    }
    out.push('\n');

    if let Some(about) = cmd.get_about() {
        out.push_str(&about.to_string());
        out.push('\n');
    }

    if let Some(long_about) = cmd.get_long_about() {
        out.push('\n');
        out.push_str(&long_about.to_string());
        out.push('\n');
    }

    out.push('\n');
    out.push_str("Usage: ");
    out.push_str(cmd.get_name());
    out.push_str(" [OPTIONS]\n\n");

    let mut sections: Vec<(String, Vec<&clap::Arg>)> = Vec::new();
    let mut section_idx: HashMap<String, usize> = HashMap::new();

    for arg in cmd.get_arguments() {
        if arg.is_hide_set() {
            continue;
        }
        let heading = arg.get_help_heading().unwrap_or("Options").to_string();
        let idx = match section_idx.get(&heading).copied() {
            Some(i) => i,
            None => {
                sections.push((heading.clone(), Vec::new()));
                let i = sections.len() - 1;
                section_idx.insert(heading, i);
                i
            }
        };
        sections[idx].1.push(arg);
    }

    for (heading, args) in sections {
        out.push_str(&heading);
        out.push_str(":\n");

        for arg in args {
            let mut parts: Vec<String> = Vec::new();
            if let Some(short) = arg.get_short() {
                parts.push(format!("-{short}"));
            }
            if let Some(long) = arg.get_long() {
                parts.push(format!("--{long}"));
            }
            if let Some(aliases) = arg.get_visible_aliases() {
                for alias in aliases {
                    let rendered = format!("--{alias}");
                    if !parts.iter().any(|p| p == &rendered) {
                        parts.push(rendered);
                    }
                }
            }

            let mut flags = parts.join(", ");
            if arg.get_action().takes_values() {
                let value_name = arg
                    .get_value_names()
                    .and_then(|names| names.first())
                    .map(|name| name.as_str())
                    .unwrap_or("VALUE");
                flags.push_str(&format!(" <{value_name}>"));
            }

            out.push_str("  ");
            out.push_str(&flags);
            out.push('\n');

            if let Some(help) = arg.get_help() {
                let help = help.to_string();
                if !help.trim().is_empty() {
                    out.push_str("          ");
                    out.push_str(help.trim());
                    out.push('\n');
                }
            }
            out.push('\n');
        }
    }

    out
}

/// A `0` limit means "show everything".
fn limit_from(value: usize) -> Option<usize> {
    if value == 0 {
        None
    } else {
        Some(value)
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    data: DataLocation,
    out_dir: PathBuf,
    pages: Vec<PageKind>,
    dump: Option<DumpTarget>,
    format: OutputFormat,
    timeout: u64,
    no_color: bool,
    verbose: u8,
    site: SiteOptions,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }

    let data_raw = args
        .data
        .or(cfg.data)
        .unwrap_or_else(|| "./data.json".to_string());
    let data = DataLocation::parse(&data_raw);

    let out_dir = config::expand_tilde(
        args.out
            .or(cfg.out)
            .unwrap_or_else(|| "./site".to_string())
            .as_str(),
    );

    let pages = match args.pages.or(cfg.pages) {
        Some(raw) => validation::parse_pages(&raw).map_err(|e| format!("invalid --pages '{raw}': {e}"))?,
        None => PageKind::ALL.to_vec(),
    };

    let dump = match args.dump.as_deref() {
        Some(raw) => Some(
            DumpTarget::parse(raw)
                .ok_or_else(|| format!("invalid --dump '{raw}', expected projects or certificates"))?,
        ),
        None => None,
    };
    let format = match args.format.as_deref() {
        Some(raw) => OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid --format '{raw}', expected text, json, or html"))?,
        None => OutputFormat::Text,
    };

    let site = SiteOptions {
        projects: ViewRequest {
            filter: args.filter,
            search: args.search,
            sort: args.sort.or(cfg.project_sort),
        },
        certificates: ViewRequest {
            filter: None,
            search: args.cert_search,
            sort: args.cert_sort.or(cfg.certificate_sort),
        },
        open_certificate: args.open_certificate,
        home_project_limit: limit_from(args.home_projects.or(cfg.home_project_limit).unwrap_or(3)),
        home_experience_limit: limit_from(
            args.home_experience
                .or(cfg.home_experience_limit)
                .unwrap_or(3),
        ),
        embed_data: args.embed_data || cfg.embed_data.unwrap_or(false),
    };

    Ok(RunConfig {
        data,
        out_dir,
        pages,
        dump,
        format,
        timeout,
        no_color,
        verbose: args.verbose,
        site,
    })
}

async fn load_data(run: &RunConfig) -> Result<Option<PortfolioData>, String> {
    let source = DataSource::new(run.data.clone(), Duration::from_secs(run.timeout));

    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template(":: {spinner} {msg} [{elapsed_precise}]")
            .map_err(|e| format!("failed to build progress bar style: {e}"))?,
    );
    pb.set_message(format!("loading {}", source.location().display()));

    let data = source.load().await;
    pb.finish_and_clear();
    Ok(data)
}

fn dump_view(run: &RunConfig, target: DumpTarget, data: Option<&PortfolioData>) -> Result<(), String> {
    let kind = match target {
        DumpTarget::Projects => PageKind::Projects,
        DumpTarget::Certificates => PageKind::Certificates,
    };
    let page = Page::build(kind, data, &run.site);
    let rendered = match target {
        DumpTarget::Projects => page
            .projects()
            .map(|list| output::render_view(run.format, &list.derived_view(), &list.render_html())),
        DumpTarget::Certificates => page
            .certificates()
            .map(|list| output::render_view(run.format, &list.derived_view(), &list.render_html())),
    }
    .transpose()
    .map_err(|e| format!("failed to serialize view: {e}"))?
    .unwrap_or_default();

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(&rendered)
        .map_err(|e| format!("failed to write to stdout: {e}"))?;
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    utils::set_verbosity(run.verbose);

    let data = load_data(&run).await?;
    if let Some(target) = run.dump {
        return dump_view(&run, target, data.as_ref());
    }

    print_banner();
    format_kv_line("Data", &run.data.display());
    format_kv_line("Output", &run.out_dir.display().to_string());
    format_kv_line(
        "Pages",
        &run.pages
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );
    format_kv_line(
        "Projects",
        &format!(
            "filter={} search={} sort={}",
            format_opt_value(run.site.projects.filter.as_deref(), "all"),
            format_opt_value(run.site.projects.search.as_deref(), "none"),
            format_opt_value(run.site.projects.sort.as_deref(), "rank"),
        ),
    );
    format_kv_line("Embed", format_bool(run.site.embed_data));
    println!();

    let now = Instant::now();

    if data.is_none() {
        utils::warn("no data loaded; pages will be written with empty sections");
    }

    let embedded = match (run.site.embed_data, data.as_ref()) {
        (true, Some(d)) => Some(
            serde_json::to_string(d).map_err(|e| format!("failed to serialize data document: {e}"))?,
        ),
        _ => None,
    };

    let rendered: Vec<(PageKind, String)> = run
        .pages
        .iter()
        .map(|kind| {
            let page = Page::build(*kind, data.as_ref(), &run.site);
            (*kind, page.to_html(embedded.as_deref()))
        })
        .collect();

    let mut failed = 0usize;
    for (kind, result) in site::write_pages(&run.out_dir, rendered).await {
        match result {
            Ok(path) => utils::success(format!("{} -> {}", kind.as_str(), path.display())),
            Err(e) => {
                failed += 1;
                utils::error(format!("{}: {e}", kind.as_str()));
            }
        }
    }

    if let Some(d) = data.as_ref() {
        match site::write_data_document(&run.out_dir, d).await {
            Ok(path) => utils::debug(format!("data document -> {}", path.display())),
            Err(e) => {
                failed += 1;
                utils::error(e.to_string());
            }
        }
    }

    println!();
    println!(
        ":: Completed :: rendered {} page(s) in {}ms ::",
        run.pages.len(),
        now.elapsed().as_millis()
    );

    if failed > 0 {
        return Err(format!("{failed} file(s) failed to write"));
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    if args.init_config {
        let path = match args.config.as_deref() {
            Some(p) => config::expand_tilde(p),
            None => config::default_config_path()
                .ok_or_else(|| "could not determine home directory".to_string())?,
        };
        if config::ensure_default_config_file(&path)? {
            utils::success(format!("wrote default config to {}", path.display()));
        } else {
            utils::info(format!("config already exists at {}", path.display()));
        }
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(p) => config::load_config(&config::expand_tilde(p), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
