use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use kdocs_nav::{FixedRootFontSize, LayoutMetrics, Presence, builtin_navigation, load_navigation};
use kdocs_types::{NavigationTree, Section, SectionStore};
use kdocs_util::{SidebarConfig, default_config_path, expand_tilde, to_origin_relative};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::fmt::format::{DefaultFields, Format};

mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let is_tui = matches!(matches.subcommand(), None | Some(("tui", _)));
    init_tracing(is_tui);

    let config_path = matches
        .get_one::<String>("config")
        .map(|path| expand_tilde(path))
        .unwrap_or_else(default_config_path);
    let config = SidebarConfig::load_from(&config_path).with_context(|| format!("reading {}", config_path.display()))?;
    let tree = load_tree(matches.get_one::<String>("nav-file").map(String::as_str), &config)?;

    match matches.subcommand() {
        None => kdocs_tui::run(tree, config, "/", SectionStore::default()).await,
        Some(("tui", sub)) => {
            let path = sub.get_one::<String>("path").map_or("/", String::as_str);
            kdocs_tui::run(tree, config, path, sections_arg(sub)).await
        }
        Some(("resolve", sub)) => print_json(&commands::resolve(&tree, &path_arg(sub))),
        Some(("rows", sub)) => {
            let rows = commands::rows(&tree, &path_arg(sub), &sections_arg(sub));
            if sub.get_flag("json") {
                print_json(&rows)
            } else {
                print!("{}", commands::render_rows(&rows));
                Ok(())
            }
        }
        Some(("geometry", sub)) => {
            let metrics = match sub.get_one::<f64>("root-font-size") {
                Some(px) => LayoutMetrics::from_rem(&config.metrics, &FixedRootFontSize(*px)),
                None => config.layout_metrics(),
            };
            let presence = if sub.get_flag("exiting") { Presence::Exiting } else { Presence::Present };
            print_json(&commands::geometry(&tree, &path_arg(sub), &sections_arg(sub), presence, &metrics))
        }
        Some(("leaves", _)) => {
            for path in kdocs_nav::tree::leaf_paths(&tree) {
                println!("{path}");
            }
            Ok(())
        }
        Some(("validate", _)) => {
            let issues = kdocs_nav::validate(&tree);
            for issue in &issues {
                println!("{issue}");
            }
            anyhow::ensure!(issues.is_empty(), "{} authoring issue(s) found", issues.len());
            println!("navigation is consistent");
            Ok(())
        }
        Some(("config", sub)) => run_config_cmd(&config, &config_path, sub),
        Some((other, _)) => anyhow::bail!("unknown command: {other}"),
    }
}

fn build_cli() -> Command {
    let path = Arg::new("path").required(true).help("Site path or full URL, e.g. /smart-contracts/data/ABI");
    let sections = Arg::new("sections")
        .long("sections")
        .value_delimiter(',')
        .action(ArgAction::Append)
        .help("In-page section ids, in document order");
    let visible = Arg::new("visible")
        .long("visible")
        .value_delimiter(',')
        .action(ArgAction::Append)
        .help("Section ids currently in view");

    Command::new("kdocs")
        .about("Resolve and render the Klever docs navigation sidebar")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(Arg::new("nav-file").long("nav-file").global(true).help("Navigation tree (JSON or YAML) to use instead of the built-in one"))
        .arg(Arg::new("config").long("config").global(true).help("Sidebar config file"))
        .subcommand(
            Command::new("tui")
                .about("Browse the sidebar interactively (default)")
                .arg(Arg::new("path").help("Initial path or URL"))
                .arg(sections.clone())
                .arg(visible.clone()),
        )
        .subcommand(Command::new("resolve").about("Print the active chain for a path").arg(path.clone()))
        .subcommand(
            Command::new("rows")
                .about("Print the sidebar as it renders for a path")
                .arg(path.clone())
                .arg(sections.clone())
                .arg(visible.clone())
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue).help("Emit rows as JSON")),
        )
        .subcommand(
            Command::new("geometry")
                .about("Print highlight and marker geometry for a path")
                .arg(path)
                .arg(sections)
                .arg(visible)
                .arg(
                    Arg::new("root-font-size")
                        .long("root-font-size")
                        .value_parser(clap::value_parser!(f64))
                        .help("Root font size in px (defaults to config or KDOCS_ROOT_FONT_SIZE)"),
                )
                .arg(Arg::new("exiting").long("exiting").action(ArgAction::SetTrue).help("Compute the exit-animation highlight")),
        )
        .subcommand(Command::new("leaves").about("List every page path in the navigation"))
        .subcommand(Command::new("validate").about("Check the navigation tree for authoring mistakes"))
        .subcommand(
            Command::new("config")
                .about("Show or write the sidebar config")
                .arg(Arg::new("write").long("write").action(ArgAction::SetTrue).help("Write the effective config to disk")),
        )
}

/// Logs go to stderr for one-shot commands and to a file next to the config
/// while the TUI owns the terminal.
fn init_tracing(is_tui: bool) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let builder = log_builder(&filter);
    if is_tui {
        let log_path = default_config_path().with_file_name("kdocs.log");
        let file = log_path
            .parent()
            .map_or(Ok(()), |parent| std::fs::create_dir_all(parent))
            .and_then(|_| OpenOptions::new().create(true).append(true).open(&log_path));
        if let Ok(file) = file {
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        return;
    }
    let _ = builder.with_writer(std::io::stderr).try_init();
}

fn log_builder(filter: &str) -> SubscriberBuilder<DefaultFields, Format, EnvFilter> {
    tracing_subscriber::fmt().with_env_filter(filter)
}

fn load_tree(nav_file: Option<&str>, config: &SidebarConfig) -> Result<NavigationTree> {
    let path = nav_file.map(expand_tilde).or_else(|| config.navigation_path.clone());
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading navigation file");
            Ok(load_navigation(&path)?)
        }
        None => Ok(builtin_navigation().clone()),
    }
}

fn path_arg(matches: &ArgMatches) -> String {
    matches.get_one::<String>("path").map_or_else(|| "/".to_string(), |path| to_origin_relative(path))
}

/// Builds a section store from `--sections` and `--visible`. Section ids
/// double as titles.
fn sections_arg(matches: &ArgMatches) -> SectionStore {
    let ids = |name: &str| -> Vec<String> {
        matches
            .get_many::<String>(name)
            .map(|values| values.map(|value| value.trim().to_string()).filter(|value| !value.is_empty()).collect())
            .unwrap_or_default()
    };
    let sections = ids("sections").into_iter().map(|id| Section::new(id.clone(), id)).collect();
    SectionStore::new(sections, ids("visible"))
}

fn run_config_cmd(config: &SidebarConfig, config_path: &Path, matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("write") {
        config.save_to(config_path)?;
        println!("wrote {}", config_path.display());
        return Ok(());
    }
    println!("# {}", config_path.display());
    print_json(config)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn rust_log_filter_controls_debug_output() {
        tracing::subscriber::with_default(log_builder("debug").finish(), || {
            assert!(tracing::enabled!(Level::DEBUG));
        });
        tracing::subscriber::with_default(log_builder("info").finish(), || {
            assert!(!tracing::enabled!(Level::DEBUG));
            assert!(tracing::enabled!(Level::INFO));
        });
        tracing::subscriber::with_default(log_builder("kdocs_nav=debug").finish(), || {
            assert!(tracing::enabled!(target: "kdocs_nav::resolve", Level::DEBUG));
        });
    }
}
