use std::process::exit;

fn main() {
    if let Err(e) = portfolio::app::run_cli() {
        portfolio::utils::error(e);
        exit(1);
    }
}
