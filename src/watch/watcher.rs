// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use notify::event::{CreateKind, MetadataKind, ModifyKind};
use notify::{Config, Event, EventKind, PollWatcher, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ResetConfiguration;
use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::WatchSource;
use crate::watch::backend::{Delivery, WatchBackend, WatchSubscription};
use crate::watch::path_utils::{glob_base, literal_path, resolve_pattern};
use crate::watch::patterns::{WatchMatcher, WatchTarget};

/// `notify`-backed [`WatchBackend`].
///
/// Must be used from inside a Tokio runtime: each subscription spawns a task
/// that filters raw notify events and forwards matching changes.
#[derive(Debug, Clone)]
pub struct NotifyBackend {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
    poll_interval: Option<Duration>,
}

impl NotifyBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fs: Arc::new(RealFileSystem),
            poll_interval: None,
        }
    }

    pub fn from_config(config: &ResetConfiguration) -> Self {
        let backend = Self::new(config.root());
        if config.use_polling() {
            backend.with_polling(config.poll_interval())
        } else {
            backend
        }
    }

    /// Poll the filesystem every `interval` instead of using OS notifications.
    pub fn with_polling(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    fn new_watcher(
        &self,
        raw_tx: mpsc::UnboundedSender<Event>,
    ) -> Result<Box<dyn Watcher + Send>> {
        // Closure called synchronously by notify whenever an event arrives.
        let handler = move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = raw_tx.send(event) {
                    // We can't log via tracing here easily, so fallback to stderr.
                    eprintln!("livereset: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("livereset: file watch error: {err}");
            }
        };

        let watcher: Box<dyn Watcher + Send> = match self.poll_interval {
            Some(interval) => Box::new(PollWatcher::new(
                handler,
                Config::default().with_poll_interval(interval),
            )?),
            None => Box::new(RecommendedWatcher::new(handler, Config::default())?),
        };
        Ok(watcher)
    }
}

impl WatchBackend for NotifyBackend {
    fn watch(
        &self,
        source: WatchSource,
        target: &WatchTarget,
        delivery: Delivery,
        events: mpsc::UnboundedSender<RuntimeEvent>,
    ) -> Result<Box<dyn WatchSubscription>> {
        let matcher = Arc::new(RwLock::new(WatchMatcher::compile(&self.root, target)?));

        // Channel from the blocking notify callback into the async world.
        let (raw_tx, raw_rx) = mpsc::unbounded_channel::<Event>();
        let watcher = self.new_watcher(raw_tx)?;

        let forwarder = tokio::spawn(forward_changes(
            source,
            delivery,
            Arc::clone(&matcher),
            raw_rx,
            events,
        ));

        let mut subscription = NotifySubscription {
            source,
            root: self.root.clone(),
            fs: Arc::clone(&self.fs),
            watcher: Some(watcher),
            matcher,
            forwarder: Some(forwarder),
            watched: Vec::new(),
        };
        subscription.watch_roots_of(target)?;

        info!(%source, patterns = ?target.patterns(), ?delivery, "watcher started");
        Ok(Box::new(subscription))
    }
}

/// Live notify subscription. Dropping it stops file watching.
pub struct NotifySubscription {
    source: WatchSource,
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
    watcher: Option<Box<dyn Watcher + Send>>,
    matcher: Arc<RwLock<WatchMatcher>>,
    forwarder: Option<JoinHandle<()>>,
    watched: Vec<(PathBuf, RecursiveMode)>,
}

impl std::fmt::Debug for NotifySubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifySubscription")
            .field("source", &self.source)
            .field("watched", &self.watched)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl NotifySubscription {
    fn watch_roots_of(&mut self, target: &WatchTarget) -> Result<()> {
        let Some(watcher) = self.watcher.as_mut() else {
            return Ok(());
        };

        for (path, mode) in watch_roots(self.fs.as_ref(), &self.root, target) {
            let existing = self.watched.iter().position(|(p, _)| *p == path);
            if let Some(i) = existing {
                if self.watched[i].1 == RecursiveMode::Recursive
                    || mode == RecursiveMode::NonRecursive
                {
                    continue;
                }
            }
            if !self.fs.exists(&path) {
                warn!(source = %self.source, path = ?path, "watch root does not exist; skipping");
                continue;
            }

            // notify keeps one mode per path, so a shallow watch is replaced.
            if existing.is_some() {
                watcher.unwatch(&path)?;
            }
            watcher.watch(&path, mode)?;
            debug!(source = %self.source, path = ?path, ?mode, "watching");
            match existing {
                Some(i) => self.watched[i].1 = mode,
                None => self.watched.push((path, mode)),
            }
        }
        Ok(())
    }
}

impl WatchSubscription for NotifySubscription {
    fn add(&mut self, target: &WatchTarget) -> Result<()> {
        self.matcher
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .widen(target)?;
        self.watch_roots_of(target)?;
        info!(source = %self.source, patterns = ?target.patterns(), "watcher widened");
        Ok(())
    }

    fn close(&mut self) {
        if self.watcher.take().is_some() {
            info!(source = %self.source, "watcher closed");
        }
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
        }
    }

    fn is_closed(&self) -> bool {
        self.watcher.is_none()
    }
}

impl Drop for NotifySubscription {
    fn drop(&mut self) {
        self.close();
    }
}

/// Consume raw notify events, keep content changes that match the target,
/// and forward them to the coordinator.
async fn forward_changes(
    source: WatchSource,
    delivery: Delivery,
    matcher: Arc<RwLock<WatchMatcher>>,
    mut raw_rx: mpsc::UnboundedReceiver<Event>,
    events: mpsc::UnboundedSender<RuntimeEvent>,
) {
    while let Some(event) = raw_rx.recv().await {
        if !is_content_change(&event.kind) {
            continue;
        }

        for path in event.paths {
            let matched = matcher
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .matches(&path);
            if !matched {
                continue;
            }

            debug!(%source, path = ?path, "watch match");
            if events.send(RuntimeEvent::FileChanged { source, path }).is_err() {
                // Coordinator is gone; nothing left to notify.
                return;
            }
            if delivery == Delivery::Once {
                debug!(%source, "one-shot watcher fired; retiring");
                return;
            }
        }
    }
    debug!(%source, "watcher event loop finished");
}

/// Only content changes count. Editors that save through a temporary file
/// and rename show up as creates or renames, so those count too.
///
/// The polling backend reports a changed mtime as a write-time metadata
/// change; that is the only metadata change kept.
pub fn is_content_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::WriteTime)) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        EventKind::Create(CreateKind::File | CreateKind::Any) => true,
        _ => false,
    }
}

/// Directories to hand to notify for `target`.
///
/// - a glob watches its literal base directory recursively
/// - a directory is watched recursively
/// - a file is watched through its parent, so replace-on-save is seen
///
/// A directory that is needed both ways is watched recursively.
pub fn watch_roots(
    fs: &dyn FileSystem,
    root: &Path,
    target: &WatchTarget,
) -> Vec<(PathBuf, RecursiveMode)> {
    let mut roots: Vec<(PathBuf, RecursiveMode)> = Vec::new();

    for pat in target.patterns() {
        let resolved = resolve_pattern(root, pat);
        let (path, mode) = match literal_path(&resolved) {
            None => (glob_base(&resolved), RecursiveMode::Recursive),
            Some(path) if fs.is_dir(&path) => (path, RecursiveMode::Recursive),
            Some(path) => {
                let parent = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                (parent, RecursiveMode::NonRecursive)
            }
        };

        match roots.iter_mut().find(|(p, _)| *p == path) {
            Some(existing) => {
                if mode == RecursiveMode::Recursive {
                    existing.1 = RecursiveMode::Recursive;
                }
            }
            None => roots.push((path, mode)),
        }
    }

    roots
}
