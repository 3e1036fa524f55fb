//! Watch command implementation.
//!
//! Checks every cabinet once, then re-checks a cabinet whenever something
//! inside its folder changes. Results live in a [`DetailCache`]; a change
//! invalidates only the cabinet it touched.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use notify::{Event, RecursiveMode, Watcher};

use crate::discovery::{discover, load_cabinet, DESCRIPTION_FILENAME};
use crate::error::{CabError, Result};
use crate::output::{display_path, Printer};
use crate::overrides::OverrideStore;
use crate::registry::DetailCache;
use crate::validation::ReconcileOptions;

use super::check::print_detail;

/// Re-check cabinets whenever their folders change
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Collection directory (default: current directory)
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Milliseconds to wait for a burst of changes to settle
    #[arg(long, default_value = "250")]
    pub debounce: u64,
}

pub fn run(args: WatchArgs, overrides: Option<&Path>, printer: &Printer) -> Result<()> {
    let root = args
        .root
        .canonicalize()
        .map_err(|e| CabError::io(&args.root, e))?;
    let discovery = discover(&root)?;
    let options = discovery.reconcile_options()?;
    let store_path =
        resolve_store_path(&super::store_path(overrides, discovery.overrides_path()));

    let mut session = Session {
        cabinets: discovery.cabinets,
        cache: DetailCache::new(),
        store: OverrideStore::load(&store_path)?,
        store_path,
        options,
    };
    for cabinet in session.cabinets.clone() {
        session.check(&cabinet, printer);
    }

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(|e| CabError::io(&root, e))?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| CabError::io(&root, e))?;
    // A store outside the collection needs its own (shallow) watch.
    if let Some(parent) = session.store_path.parent() {
        if !parent.starts_with(&root) {
            if let Err(e) = watcher.watch(parent, RecursiveMode::NonRecursive) {
                log::warn!("not watching override store in {}: {}", parent.display(), e);
            }
        }
    }
    printer.info("Watching", &display_path(&root));

    let settle = Duration::from_millis(args.debounce);
    while let Ok(first) = rx.recv() {
        let mut changed: Vec<PathBuf> = Vec::new();
        collect_paths(first, &mut changed);
        while let Ok(next) = rx.recv_timeout(settle) {
            collect_paths(next, &mut changed);
        }

        if session.touches_store(&changed) {
            match session.reload_store() {
                Ok(()) => {
                    printer.info("Reloaded", &display_path(&session.store_path));
                    for cabinet in session.cabinets.clone() {
                        session.check(&cabinet, printer);
                    }
                    continue;
                }
                Err(e) => {
                    log::warn!("{}", e);
                    printer.warning("Keeping", "previous overrides (store failed to load)");
                }
            }
        }

        let mut dirty = Vec::new();
        for path in &changed {
            match session.owner(path) {
                Some(cabinet) => dirty.push(cabinet),
                None if path.file_name().is_some_and(|n| n == DESCRIPTION_FILENAME) => {
                    if let Some(parent) = path.parent() {
                        log::debug!("new cabinet at {}", parent.display());
                        session.cabinets.push(parent.to_path_buf());
                        session.cabinets.sort();
                        dirty.push(parent.to_path_buf());
                    }
                }
                None => log::trace!("ignoring change outside cabinets: {}", path.display()),
            }
        }
        dirty.sort();
        dirty.dedup();

        for cabinet in dirty {
            session.cache.invalidate(&cabinet);
            session.check(&cabinet, printer);
        }
    }

    Ok(())
}

struct Session {
    cabinets: Vec<PathBuf>,
    cache: DetailCache,
    store: OverrideStore,
    /// Absolute, so it compares equal to the paths `notify` reports.
    store_path: PathBuf,
    options: ReconcileOptions,
}

impl Session {
    fn check(&mut self, cabinet: &Path, printer: &Printer) {
        let (store, options) = (&self.store, &self.options);
        let detail = self
            .cache
            .get_or_load(cabinet, |p| load_cabinet(p, Some(store), options));
        printer.status("Checked", &format!("{} {}", display_path(cabinet), detail.summary()));
        print_detail(detail, printer);
    }

    fn touches_store(&self, changed: &[PathBuf]) -> bool {
        changed
            .iter()
            .any(|p| p == &self.store_path || resolve_store_path(p) == self.store_path)
    }

    /// Load the store again and drop every cached detail. On failure the
    /// previous store stays in use.
    fn reload_store(&mut self) -> Result<()> {
        self.store = OverrideStore::load(&self.store_path)?;
        self.cache.clear();
        Ok(())
    }

    /// The cabinet whose folder contains `path`, preferring the deepest.
    fn owner(&self, path: &Path) -> Option<PathBuf> {
        self.cabinets
            .iter()
            .filter(|c| path.starts_with(c))
            .max_by_key(|c| c.components().count())
            .cloned()
    }
}

/// Absolute form of a store path, which may not exist yet.
fn resolve_store_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return path.to_path_buf();
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    parent
        .canonicalize()
        .map(|p| p.join(name))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn collect_paths(event: notify::Result<Event>, into: &mut Vec<PathBuf>) {
    match event {
        Ok(event) if event.kind.is_access() => {}
        Ok(event) => into.extend(event.paths),
        Err(e) => log::warn!("watch error: {}", e),
    }
}
