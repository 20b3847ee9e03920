//! Shared utilities for integration testing.
//!
//! `TestLogger` captures tracing events through a single-owner coordinator
//! thread. Tests never touch the coordinator's state directly; every
//! interaction is a request-with-reply message, awaited with a timeout.

use std::fmt::Write as _;
use std::sync::mpsc;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::thread;
use std::time::Duration;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Returned when a log event does not show up within the timeout.
#[derive(Debug, PartialEq, Eq)]
pub struct WaitTimeout;

enum Msg {
    Record(String),
    Subscribe {
        exp: String,
        n: usize,
        notify: mpsc::Sender<()>,
    },
    Count {
        exp: String,
        reply: mpsc::Sender<usize>,
    },
    Reset {
        done: mpsc::Sender<()>,
    },
    Mute(bool),
}

struct Subscription {
    exp: String,
    n: usize,
    notify: mpsc::Sender<()>,
}

struct LogWatch {
    entries: Vec<String>,
    subs: Vec<Subscription>,
    muted: bool,
}

impl LogWatch {
    fn save(&mut self, entry: String) {
        if !self.muted {
            println!("{entry}");
        }
        for i in (0..self.subs.len()).rev() {
            if entry.contains(&self.subs[i].exp) {
                self.subs[i].n -= 1;
                if self.subs[i].n == 0 {
                    let sub = self.subs.swap_remove(i);
                    let _ = sub.notify.send(());
                }
            }
        }
        self.entries.push(entry);
    }

    fn subscribe(&mut self, exp: String, n: usize, notify: mpsc::Sender<()>) {
        let seen = self.count(&exp);
        if seen >= n {
            let _ = notify.send(());
        } else {
            self.subs.push(Subscription {
                exp,
                n: n - seen,
                notify,
            });
        }
    }

    fn count(&self, exp: &str) -> usize {
        self.entries.iter().filter(|e| e.contains(exp)).count()
    }
}

/// Handle to the capture coordinator.
#[derive(Clone)]
pub struct TestLogger {
    tx: mpsc::Sender<Msg>,
}

impl TestLogger {
    pub fn new() -> (Self, CaptureLayer) {
        let (tx, rx) = mpsc::channel::<Msg>();

        thread::spawn(move || {
            let mut watch = LogWatch {
                entries: Vec::new(),
                subs: Vec::new(),
                muted: true,
            };
            while let Ok(msg) = rx.recv() {
                match msg {
                    Msg::Record(entry) => watch.save(entry),
                    Msg::Subscribe { exp, n, notify } => watch.subscribe(exp, n, notify),
                    Msg::Count { exp, reply } => {
                        let _ = reply.send(watch.count(&exp));
                    }
                    Msg::Reset { done } => {
                        watch.entries.clear();
                        watch.subs.clear();
                        let _ = done.send(());
                    }
                    Msg::Mute(muted) => watch.muted = muted,
                }
            }
        });

        let layer = CaptureLayer { tx: tx.clone() };
        (Self { tx }, layer)
    }

    /// Wait until `n` events containing `exp` were recorded.
    pub fn wait_for_n(&self, exp: &str, n: usize, timeout: Duration) -> Result<(), WaitTimeout> {
        let (notify_tx, notify_rx) = mpsc::channel();
        let _ = self.tx.send(Msg::Subscribe {
            exp: exp.to_string(),
            n,
            notify: notify_tx,
        });
        notify_rx.recv_timeout(timeout).map_err(|_| WaitTimeout)
    }

    /// Wait until one event containing `exp` was recorded.
    pub fn wait_for(&self, exp: &str, timeout: Duration) -> Result<(), WaitTimeout> {
        self.wait_for_n(exp, 1, timeout)
    }

    /// Number of recorded events containing `exp`.
    pub fn count(&self, exp: &str) -> usize {
        let (reply_tx, reply_rx) = mpsc::channel();
        let _ = self.tx.send(Msg::Count {
            exp: exp.to_string(),
            reply: reply_tx,
        });
        reply_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("log coordinator did not reply")
    }

    /// Drop all recorded events and pending subscriptions.
    pub fn reset(&self) {
        let (done_tx, done_rx) = mpsc::channel();
        let _ = self.tx.send(Msg::Reset { done: done_tx });
        done_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("log coordinator did not reply");
    }

    #[allow(dead_code)]
    pub fn mute(&self) {
        let _ = self.tx.send(Msg::Mute(true));
    }

    #[allow(dead_code)]
    pub fn unmute(&self) {
        let _ = self.tx.send(Msg::Mute(false));
    }
}

/// Tracing layer forwarding formatted events to the coordinator.
pub struct CaptureLayer {
    tx: mpsc::Sender<Msg>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut line = String::new();
        event.record(&mut LineVisitor { line: &mut line });
        let _ = self.tx.send(Msg::Record(line));
    }
}

struct LineVisitor<'a> {
    line: &'a mut String,
}

impl Visit for LineVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.line, "{:?} ", value);
        } else {
            let _ = write!(self.line, "{}={:?} ", field.name(), value);
        }
    }
}

static CAPTURE: OnceLock<TestLogger> = OnceLock::new();
static LOCK: Mutex<()> = Mutex::new(());

/// Install the shared capture subscriber and serialize the calling test
/// against other log-observing tests. The returned logger starts with a
/// clean slate.
pub fn capture() -> (MutexGuard<'static, ()>, TestLogger) {
    let guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let logger = CAPTURE
        .get_or_init(|| {
            let (logger, layer) = TestLogger::new();
            let subscriber = tracing_subscriber::registry().with(layer);
            tracing::subscriber::set_global_default(subscriber)
                .expect("global subscriber already set");
            logger
        })
        .clone();

    logger.reset();
    (guard, logger)
}
