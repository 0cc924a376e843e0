use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tuku_tools::{check_site, ToolConfig};

/// Check the locale files and the attraction data of a Tuku GO site.
#[derive(Parser)]
#[command(name = "tuku-i18n-check")]
struct Cli {
    /// The tool config file
    #[arg(long, default_value = "Tuku.toml")]
    config: PathBuf,

    /// The directory the site is served from (overrides `site_root`)
    #[arg(long)]
    site_root: Option<PathBuf>,

    /// The locale file path, with `{lang}` (overrides `site.locale_path`)
    #[arg(long)]
    locale_path: Option<String>,

    /// The attraction data file (overrides `site.attractions_url`)
    #[arg(long)]
    attractions: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Cli::parse();
    let mut config = match ToolConfig::load(&args.config) {
        Ok(x) => x,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::from(2);
        }
    };
    if let Some(x) = args.site_root {
        config.site_root = x;
    }
    if let Some(x) = args.locale_path {
        config.site.locale_path = x;
    }
    if let Some(x) = args.attractions {
        config.site.attractions_url = x;
    }
    let problems = check_site(&config);
    for p in problems.iter() {
        println!("{}", p);
    }
    if problems.is_empty() {
        log::info!("No problems found");
        ExitCode::SUCCESS
    } else {
        eprintln!("{} problem(s) found", problems.len());
        ExitCode::FAILURE
    }
}
