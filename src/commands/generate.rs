//! Build the static site

use anyhow::{Context, Result};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebouncedEvent};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::Generator;
use crate::graph::SiteGraph;
use crate::Site;

/// Recreate the output directory and render the whole site into it
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    if site.output_dir.exists() {
        fs::remove_dir_all(&site.output_dir)
            .with_context(|| format!("Failed to remove {:?}", site.output_dir))?;
    }
    fs::create_dir_all(&site.output_dir)
        .with_context(|| format!("Failed to create {:?}", site.output_dir))?;

    let graph = SiteGraph::load(site)?;
    Generator::new(site)?.generate(&graph)?;

    let duration = start.elapsed();
    tracing::info!(
        "Site generated in {:?} ({:.2}s)",
        site.output_dir,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Directories and files whose changes trigger a rebuild
fn watched_paths(site: &Site) -> Vec<(PathBuf, RecursiveMode)> {
    let mut paths: Vec<(PathBuf, RecursiveMode)> = [
        &site.content_dir,
        &site.template_dir,
        &site.static_dir,
    ]
    .into_iter()
    .filter(|dir| dir.exists())
    .map(|dir| (dir.clone(), RecursiveMode::Recursive))
    .collect();

    let config_path = site.config_path();
    if config_path.exists() {
        paths.push((config_path, RecursiveMode::NonRecursive));
    }
    paths
}

/// Editor droppings and VCS metadata never trigger a rebuild
fn is_relevant(event: &DebouncedEvent) -> bool {
    let path = event.path.to_string_lossy();
    !path.contains(".git") && !path.contains(".DS_Store") && !path.ends_with('~')
}

/// Rebuild after each batch of changes; re-reads `_config.yml` every time
fn rebuild(base_dir: &Path) -> Result<Site> {
    let site = Site::new(base_dir)?;
    run(&site)?;
    Ok(site)
}

/// Watch the site sources and regenerate on change until interrupted
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for (path, mode) in watched_paths(site) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<_> = events.iter().filter(|e| is_relevant(e)).collect();
                if changed.is_empty() {
                    continue;
                }
                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }
                if let Err(e) = rebuild(&site.base_dir) {
                    tracing::error!("Generation failed: {:#}", e);
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}
