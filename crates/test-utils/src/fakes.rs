#![allow(dead_code)]

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use tokio::sync::mpsc;

use livereset::engine::RuntimeEvent;
use livereset::errors::{LiveResetError, Result};
use livereset::reset::ProcessSpawner;
use livereset::shell::{Application, CloseObserver, Window, WindowId};
use livereset::types::WatchSource;
use livereset::watch::{Delivery, WatchBackend, WatchMatcher, WatchSubscription, WatchTarget};

/// Shared, ordered record of side effects ("spawn", "quit", "exit").
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A window that counts reloads and lets the test close it.
pub struct FakeWindow {
    id: WindowId,
    reloads: AtomicUsize,
    fail_reload: bool,
    observer: Mutex<Option<CloseObserver>>,
}

impl fmt::Debug for FakeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeWindow")
            .field("id", &self.id)
            .field("reloads", &self.reloads())
            .finish()
    }
}

impl FakeWindow {
    pub fn new(id: u64) -> Arc<Self> {
        Arc::new(Self {
            id: WindowId(id),
            reloads: AtomicUsize::new(0),
            fail_reload: false,
            observer: Mutex::new(None),
        })
    }

    /// A window whose reloads always fail.
    pub fn failing(id: u64) -> Arc<Self> {
        Arc::new(Self {
            id: WindowId(id),
            reloads: AtomicUsize::new(0),
            fail_reload: true,
            observer: Mutex::new(None),
        })
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    pub fn has_close_observer(&self) -> bool {
        self.observer.lock().unwrap().is_some()
    }

    /// Simulate the shell closing this window.
    pub fn close(&self) {
        let observer = self.observer.lock().unwrap().take();
        if let Some(observer) = observer {
            observer();
        }
    }
}

impl Window for FakeWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn reload_ignoring_cache(&self) -> Result<()> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reload {
            return Err(LiveResetError::Other(anyhow!("renderer crashed")));
        }
        Ok(())
    }

    fn on_closed(&self, observer: CloseObserver) {
        *self.observer.lock().unwrap() = Some(observer);
    }
}

/// Records quit/exit calls.
#[derive(Debug, Clone)]
pub struct FakeApplication {
    log: CallLog,
}

impl FakeApplication {
    pub fn new(log: CallLog) -> Arc<Self> {
        Arc::new(Self { log })
    }
}

impl Application for FakeApplication {
    fn quit(&self) {
        self.log.lock().unwrap().push("quit".to_string());
    }

    fn exit(&self) {
        self.log.lock().unwrap().push("exit".to_string());
    }
}

/// Records spawn requests instead of starting processes.
#[derive(Debug)]
pub struct FakeSpawner {
    log: CallLog,
    fail: bool,
    spawned: Mutex<Vec<(PathBuf, Vec<OsString>)>>,
}

impl FakeSpawner {
    pub fn new(log: CallLog) -> Arc<Self> {
        Arc::new(Self {
            log,
            fail: false,
            spawned: Mutex::new(Vec::new()),
        })
    }

    /// A spawner whose every spawn fails.
    pub fn failing(log: CallLog) -> Arc<Self> {
        Arc::new(Self {
            log,
            fail: true,
            spawned: Mutex::new(Vec::new()),
        })
    }

    pub fn spawned(&self) -> Vec<(PathBuf, Vec<OsString>)> {
        self.spawned.lock().unwrap().clone()
    }
}

impl ProcessSpawner for FakeSpawner {
    fn spawn_detached(&self, program: &Path, args: &[OsString]) -> Result<()> {
        if self.fail {
            self.log.lock().unwrap().push("spawn-failed".to_string());
            return Err(LiveResetError::SpawnError {
                program: program.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }
        self.log.lock().unwrap().push("spawn".to_string());
        self.spawned
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));
        Ok(())
    }
}

/// Observable state of one fake subscription.
#[derive(Debug, Clone)]
pub struct FakeSubscriptionState {
    pub source: WatchSource,
    pub delivery: Delivery,
    pub target: WatchTarget,
    pub added: Vec<WatchTarget>,
    pub closed: bool,
    pub fired: usize,
}

struct FakeSubscriptionEntry {
    state: FakeSubscriptionState,
    matcher: WatchMatcher,
    events: mpsc::UnboundedSender<RuntimeEvent>,
}

/// A watch backend driven by the test.
///
/// It applies the same contract a real watcher has: only matching paths are
/// delivered, closed subscriptions deliver nothing, and one-shot
/// subscriptions deliver at most once.
#[derive(Clone)]
pub struct FakeWatchBackend {
    root: PathBuf,
    subs: Arc<Mutex<Vec<FakeSubscriptionEntry>>>,
}

impl FakeWatchBackend {
    pub fn new(root: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            root: root.into(),
            subs: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Snapshot of every subscription created so far.
    pub fn subscriptions(&self) -> Vec<FakeSubscriptionState> {
        self.subs
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.state.clone())
            .collect()
    }

    pub fn subscription(&self, source: WatchSource) -> Option<FakeSubscriptionState> {
        self.subscriptions().into_iter().find(|s| s.source == source)
    }

    /// Simulate a change to `path`. Returns the sources that delivered it.
    pub fn change(&self, path: impl AsRef<Path>) -> Vec<WatchSource> {
        let path = path.as_ref();
        let mut delivered = Vec::new();
        let mut subs = self.subs.lock().unwrap();

        for entry in subs.iter_mut() {
            if entry.state.closed || !entry.matcher.matches(path) {
                continue;
            }
            if entry.state.delivery == Delivery::Once && entry.state.fired > 0 {
                continue;
            }
            entry.state.fired += 1;
            let _ = entry.events.send(RuntimeEvent::FileChanged {
                source: entry.state.source,
                path: path.to_path_buf(),
            });
            delivered.push(entry.state.source);
        }
        delivered
    }
}

impl WatchBackend for FakeWatchBackend {
    fn watch(
        &self,
        source: WatchSource,
        target: &WatchTarget,
        delivery: Delivery,
        events: mpsc::UnboundedSender<RuntimeEvent>,
    ) -> Result<Box<dyn WatchSubscription>> {
        let matcher = WatchMatcher::compile(&self.root, target)?;
        let mut subs = self.subs.lock().unwrap();
        subs.push(FakeSubscriptionEntry {
            state: FakeSubscriptionState {
                source,
                delivery,
                target: target.clone(),
                added: Vec::new(),
                closed: false,
                fired: 0,
            },
            matcher,
            events,
        });

        Ok(Box::new(FakeSubscription {
            index: subs.len() - 1,
            subs: Arc::clone(&self.subs),
        }))
    }
}

struct FakeSubscription {
    index: usize,
    subs: Arc<Mutex<Vec<FakeSubscriptionEntry>>>,
}

impl WatchSubscription for FakeSubscription {
    fn add(&mut self, target: &WatchTarget) -> Result<()> {
        let mut subs = self.subs.lock().unwrap();
        let entry = &mut subs[self.index];
        entry.matcher.widen(target)?;
        entry.state.target = entry.state.target.widened(target);
        entry.state.added.push(target.clone());
        Ok(())
    }

    fn close(&mut self) {
        self.subs.lock().unwrap()[self.index].state.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.subs.lock().unwrap()[self.index].state.closed
    }
}
