use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "portfolio",
    version,
    about = "personal portfolio site renderer",
    long_about = "Portfolio renders a personal portfolio site (profile, education, awards, experience, projects, certificates) from a single static data document.\n\nExamples:\n  portfolio -d data.json -o site/\n  portfolio -d https://me.dev/data.json --pages home,projects\n  portfolio -d data.json --dump projects --filter web --sort recent -F json\n\nTip: Use --config to persist settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'd',
        long = "dt",
        visible_alias = "data",
        value_name = "PATH|URL",
        help_heading = "Input",
        help = "Data document to render (local file or http(s) URL)."
    )]
    pub data: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.portfolio/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help_heading = "Output",
        help = "Directory to write the generated pages into."
    )]
    pub out: Option<String>,

    #[arg(
        short = 'p',
        long = "pg",
        visible_alias = "pages",
        value_name = "LIST",
        help_heading = "Output",
        help = "Pages to generate, comma-separated (home, projects, certificates, experience)."
    )]
    pub pages: Option<String>,

    #[arg(
        long = "ed",
        visible_alias = "embed-data",
        help_heading = "Output",
        help = "Embed the data document into every generated page."
    )]
    pub embed_data: bool,

    #[arg(
        short = 'D',
        long = "dump",
        value_name = "LIST",
        help_heading = "Output",
        help = "Print the derived view of a list page (projects or certificates) instead of writing pages."
    )]
    pub dump: Option<String>,

    #[arg(
        short = 'F',
        long = "fmt",
        visible_alias = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Format for --dump (text, json, html)."
    )]
    pub format: Option<String>,

    #[arg(
        short = 'f',
        long = "flt",
        visible_alias = "filter",
        value_name = "CATEGORY",
        help_heading = "View",
        help = "Initial project category filter (\"all\" for every category)."
    )]
    pub filter: Option<String>,

    #[arg(
        short = 's',
        long = "sq",
        visible_alias = "search",
        value_name = "QUERY",
        help_heading = "View",
        help = "Initial project search query."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'S',
        long = "srt",
        visible_alias = "sort",
        value_name = "KEY",
        help_heading = "View",
        help = "Initial project sort (recent, oldest, category, rank)."
    )]
    pub sort: Option<String>,

    #[arg(
        long = "csq",
        visible_alias = "cert-search",
        value_name = "QUERY",
        help_heading = "View",
        help = "Initial certificate search query."
    )]
    pub cert_search: Option<String>,

    #[arg(
        long = "csrt",
        visible_alias = "cert-sort",
        value_name = "KEY",
        help_heading = "View",
        help = "Initial certificate sort (recent, oldest, rank)."
    )]
    pub cert_sort: Option<String>,

    #[arg(
        long = "oc",
        visible_alias = "open-certificate",
        value_name = "ID",
        help_heading = "View",
        help = "Render the certificates page with this certificate open in the lightbox."
    )]
    pub open_certificate: Option<u64>,

    #[arg(
        long = "hp",
        visible_alias = "home-projects",
        value_name = "N",
        help_heading = "Limits",
        help = "Number of featured projects on the home page (0 = all)."
    )]
    pub home_projects: Option<usize>,

    #[arg(
        long = "he",
        visible_alias = "home-experience",
        value_name = "N",
        help_heading = "Limits",
        help = "Number of recent experience cards on the home page (0 = all)."
    )]
    pub home_experience: Option<usize>,

    #[arg(
        short = 't',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECS",
        help_heading = "Network",
        help = "Timeout in seconds when fetching the data document over HTTP."
    )]
    pub timeout: Option<u64>,
}
