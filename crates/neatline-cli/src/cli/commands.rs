//! # CLI Layer
//!
//! The only place that knows about stdout, stderr, process exit codes and where files
//! live on disk.
//!
//! 1. **Argument Parsing**: [`super::setup::Cli`]
//! 2. **Logging**: `tracing-subscriber` on stderr, `RUST_LOG` or `-v`
//! 3. **Configuration**: style defaults from `--config`, then the user config directory
//! 4. **Context Setup**: open the bundle directory and its catalog
//! 5. **Dispatch + Output**: call the API, print JSON

use super::render::{print_json, print_result};
use super::setup::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use neatline::api::NeatlineApi;
use neatline::catalog::StaticCatalog;
use neatline::commands::update::RecordUpdate;
use neatline::config::StyleDefaults;
use neatline::store::fs_backend::FsBackend;
use neatline::store::record_store::RecordStore;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const CATALOG_FILE: &str = "catalog.json";
pub const CONFIG_FILE: &str = "neatline.toml";

type BundleApi = NeatlineApi<RecordStore<FsBackend>, StaticCatalog>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let defaults = load_defaults(cli.config.as_deref())?;

    match cli.command {
        Commands::Defaults { template } => {
            if template {
                print!("{}", StyleDefaults::template());
                Ok(())
            } else {
                print_json(&defaults)
            }
        }
        Commands::Render { bundle, exhibit } => {
            let api = open_bundle(&bundle, defaults)?;
            match exhibit {
                Some(id) => {
                    let payload = api
                        .render(id)
                        .with_context(|| format!("Failed to render exhibit {}", id))?;
                    print_json(&payload)
                }
                None => {
                    let mut rendered = Vec::new();
                    for exhibit in api.exhibits()? {
                        let payload = api
                            .render(exhibit.id)
                            .with_context(|| format!("Failed to render exhibit {}", exhibit.id))?;
                        rendered.push(serde_json::json!({
                            "id": exhibit.id,
                            "slug": exhibit.slug,
                            "map": payload.map,
                            "timeline": payload.timeline,
                        }));
                    }
                    print_json(&rendered)
                }
            }
        }
        Commands::Form { bundle, record } => {
            let api = open_bundle(&bundle, defaults)?;
            let form = api
                .edit_form(record)
                .with_context(|| format!("Failed to build the form of record {}", record))?;
            print_json(&form)
        }
        Commands::NewForm {
            bundle,
            exhibit,
            item,
        } => {
            let api = open_bundle(&bundle, defaults)?;
            let form = api
                .new_record_form(exhibit, item)
                .with_context(|| format!("Failed to build a form for item {}", item))?;
            print_json(&form)
        }
        Commands::Create {
            bundle,
            exhibit,
            item,
        } => {
            let mut api = open_bundle(&bundle, defaults)?;
            let result = api
                .create_record(exhibit, item)
                .with_context(|| format!("Failed to create a record in exhibit {}", exhibit))?;
            print_result(&result)
        }
        Commands::Update {
            bundle,
            record,
            json,
        } => {
            let update: RecordUpdate =
                serde_json::from_str(&json).context("Update must be a JSON object")?;
            let mut api = open_bundle(&bundle, defaults)?;
            let result = api
                .update_record(record, &update)
                .with_context(|| format!("Failed to update record {}", record))?;
            print_result(&result)
        }
        Commands::Delete { bundle, record } => {
            let mut api = open_bundle(&bundle, defaults)?;
            let result = api
                .delete_record(record)
                .with_context(|| format!("Failed to delete record {}", record))?;
            print_result(&result)
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "neatline=debug" } else { "neatline=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into());
    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Config files in priority order: the explicit `--config`, then the user config dir.
fn config_files(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = explicit.map(Path::to_path_buf).into_iter().collect();
    if let Some(dirs) = ProjectDirs::from("org", "neatline", "neatline") {
        files.push(dirs.config_dir().join(CONFIG_FILE));
    }
    files
}

fn load_defaults(explicit: Option<&Path>) -> Result<StyleDefaults> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    }
    let files = config_files(explicit);
    debug!(?files, "Loading style defaults");
    StyleDefaults::load(&files).context("Failed to load style defaults")
}

fn open_bundle(bundle: &Path, defaults: StyleDefaults) -> Result<BundleApi> {
    if !bundle.is_dir() {
        anyhow::bail!("Bundle directory not found: {}", bundle.display());
    }
    let catalog = load_catalog(bundle)?;
    let store = RecordStore::with_backend(FsBackend::new(bundle));
    Ok(NeatlineApi::new(store, catalog, defaults))
}

fn load_catalog(bundle: &Path) -> Result<StaticCatalog> {
    let path = bundle.join(CATALOG_FILE);
    if !path.exists() {
        debug!(bundle = %bundle.display(), "No catalog in bundle");
        return Ok(StaticCatalog::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid catalog {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn explicit_config_comes_first() {
        let files = config_files(Some(Path::new("/tmp/explicit.toml")));
        assert_eq!(files[0], PathBuf::from("/tmp/explicit.toml"));
        assert!(files.iter().skip(1).all(|f| f.ends_with(CONFIG_FILE)));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_defaults(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn bundle_without_catalog_uses_empty_catalog() {
        let dir = tempdir().unwrap();
        let catalog = load_catalog(dir.path()).unwrap();
        assert!(catalog.items.is_empty());
        assert!(catalog.features.is_none());
    }

    #[test]
    fn invalid_catalog_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CATALOG_FILE), "{not json").unwrap();
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid catalog"));
    }

    #[test]
    fn open_bundle_requires_directory() {
        let dir = tempdir().unwrap();
        assert!(open_bundle(&dir.path().join("missing"), StyleDefaults::default()).is_err());
    }
}
