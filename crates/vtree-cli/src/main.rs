//! vtree CLI — preview the virtual browsing tree for a media directory.
//!
//! Commands:
//!   vtree scan <dir>                 Classify every media file under <dir>
//!   vtree classify <object.json> <root>
//!                                    Classify one host-style JSON object
//!   vtree tree <dir>                 Folder chains with item counts
//!
//! Flags:
//!   --json                           One JSON placement per line
//!   --config <file>                  Layout options (or $VTREE_CONFIG)

mod error;
mod scan;

use std::collections::BTreeMap;
use std::path::Path;

use vtree_core::{classify, LayoutOptions, MediaObject, Placement, PlacementLog};

use crate::error::{CliError, CliResult};

const CONFIG_ENV: &str = "VTREE_CONFIG";

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        return;
    }

    let args = match Args::parse(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            std::process::exit(2);
        }
    };

    let result = match args.command.as_str() {
        "scan" => cmd_scan(&args),
        "classify" => cmd_classify(&args),
        "tree" => cmd_tree(&args),
        other => {
            eprintln!("unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("vtree: {}", e);
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq)]
struct Args {
    command: String,
    positional: Vec<String>,
    json: bool,
    config: Option<String>,
}

impl Args {
    fn parse(raw: &[String]) -> CliResult<Self> {
        let mut args = Args::default();
        let mut iter = raw.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => args.json = true,
                "--config" => {
                    let file = iter
                        .next()
                        .ok_or_else(|| CliError::Usage("--config needs a file".into()))?;
                    args.config = Some(file.clone());
                }
                _ if args.command.is_empty() => args.command = arg.clone(),
                _ => args.positional.push(arg.clone()),
            }
        }
        Ok(args)
    }

    fn arg(&self, index: usize, usage: &str) -> CliResult<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CliError::Usage(format!("usage: {}", usage)))
    }

    /// `--config` wins over `$VTREE_CONFIG`; neither means defaults.
    fn options(&self) -> CliResult<LayoutOptions> {
        let path = self
            .config
            .clone()
            .or_else(|| std::env::var(CONFIG_ENV).ok());
        match path {
            Some(p) => load_options(Path::new(&p)),
            None => Ok(LayoutOptions::default()),
        }
    }
}

/// Recording host for the configured options.
fn host(args: &Args) -> CliResult<PlacementLog> {
    let log = PlacementLog::new(args.options()?);
    log.check_options();
    Ok(log)
}

fn load_options(path: &Path) -> CliResult<LayoutOptions> {
    let json = std::fs::read_to_string(path)?;
    let options = LayoutOptions::from_json(&json)?;
    log::debug!("vtree: layout options from {}: {:?}", path.display(), options);
    Ok(options)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_scan(args: &Args) -> CliResult<()> {
    let dir = Path::new(args.arg(0, "vtree scan <dir>")?);
    let log = host(args)?;

    for obj in scan::scan_directory(dir) {
        classify_one(&obj, dir, &log);
        for placement in log.take() {
            print_placement(&obj, &placement, args.json);
        }
    }
    Ok(())
}

fn cmd_classify(args: &Args) -> CliResult<()> {
    let usage = "vtree classify <object.json> <root>";
    let file = args.arg(0, usage)?;
    let root = args.arg(1, usage)?;

    let obj: MediaObject = serde_json::from_str(&std::fs::read_to_string(file)?)?;
    let log = host(args)?;
    let result = classify(&obj, Path::new(root), &log);

    // Placements made before a failure were registered; show them anyway.
    for placement in log.take() {
        print_placement(&obj, &placement, args.json);
    }
    result.map_err(CliError::from)
}

fn cmd_tree(args: &Args) -> CliResult<()> {
    let dir = Path::new(args.arg(0, "vtree tree <dir>")?);
    let log = host(args)?;

    let objects = scan::scan_directory(dir);
    for obj in &objects {
        classify_one(obj, dir, &log);
    }

    for (path, count) in folder_counts(&log.take()) {
        println!("{:>6}  {}", count, path);
    }
    Ok(())
}

/// Classify one scanned object; a failure skips just that object.
fn classify_one(obj: &MediaObject, root: &Path, log: &PlacementLog) {
    if let Err(e) = classify(obj, root, log) {
        log::warn!("vtree: skipping {}: {}", obj.location.display(), e);
    }
}

/// Distinct folder paths with the number of items placed in each.
fn folder_counts(placements: &[Placement]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for placement in placements {
        *counts.entry(placement.path()).or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_placement(obj: &MediaObject, placement: &Placement, json: bool) {
    if json {
        let row = serde_json::json!({
            "location": obj.location.display().to_string(),
            "path": placement.path(),
            "title": placement.title,
            "container": placement.container.map(|c| c.upnp_class()),
        });
        println!("{}", row);
    } else {
        println!("{}  <-  {}", placement.path(), placement.title);
    }
}

fn print_usage() {
    eprintln!("usage: vtree <command> [args] [--json] [--config <file>]");
    eprintln!();
    eprintln!("  scan <dir>                    classify every media file under <dir>");
    eprintln!("  classify <object.json> <root> classify one JSON-described object");
    eprintln!("  tree <dir>                    folder chains with item counts");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_flags_anywhere() {
        let args = Args::parse(&strings(&["scan", "--json", "/media", "--config", "c.json"])).unwrap();
        assert_eq!(args.command, "scan");
        assert_eq!(args.positional, vec!["/media"]);
        assert!(args.json);
        assert_eq!(args.config.as_deref(), Some("c.json"));
    }

    #[test]
    fn parse_config_without_file_fails() {
        assert!(matches!(
            Args::parse(&strings(&["scan", "--config"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn missing_positional_is_usage_error() {
        let args = Args::parse(&strings(&["classify", "obj.json"])).unwrap();
        assert!(args.arg(0, "x").is_ok());
        assert!(matches!(args.arg(1, "x"), Err(CliError::Usage(_))));
    }

    #[test]
    fn options_from_config_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("layout.json");
        std::fs::write(&path, r#"{"track_numbers": true}"#).unwrap();

        let args = Args {
            config: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let options = args.options().unwrap();
        assert!(options.track_numbers);
        assert!(!options.channel_tags);
    }

    #[test]
    fn bad_config_is_json_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("layout.json");
        std::fs::write(&path, "track_numbers = true").unwrap();
        assert!(matches!(load_options(&path), Err(CliError::Json(_))));
    }

    #[test]
    fn folder_counts_merge_identical_chains() {
        let placements = vec![
            Placement::new("a", ["Video", "All Video"]),
            Placement::new("b", ["Video", "All Video"]),
            Placement::new("b", ["Video", "Directories", "x"]),
        ];
        let counts = folder_counts(&placements);
        assert_eq!(counts.get("/Video/All Video"), Some(&2));
        assert_eq!(counts.get("/Video/Directories/x"), Some(&1));
    }

    #[test]
    fn scanned_tree_skips_failures() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("movies")).unwrap();
        std::fs::write(dir.path().join("movies/a.mkv"), b"").unwrap();
        std::fs::write(dir.path().join("list.m3u"), b"").unwrap();

        let log = PlacementLog::default();
        for obj in scan::scan_directory(dir.path()) {
            classify_one(&obj, dir.path(), &log);
        }
        let counts = folder_counts(&log.take());
        assert_eq!(
            counts.keys().cloned().collect::<Vec<_>>(),
            vec!["/Video/All Video", "/Video/Directories/movies"]
        );
    }
}
