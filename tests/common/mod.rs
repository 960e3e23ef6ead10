// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use claude_server::bridge::{ChildProcess, ExitOutcome, LaunchSpec, Launcher, OutputStream};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a fake child does once launched.
#[derive(Clone, Debug)]
pub enum Behavior {
    Exit {
        code: Option<i32>,
        stdout: String,
        stderr: String,
        after: Duration,
    },
    Hang,
    FailToLaunch,
}

impl Behavior {
    pub fn exit(code: i32, stdout: &str, stderr: &str) -> Self {
        Behavior::Exit {
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            after: Duration::ZERO,
        }
    }

    pub fn exit_after(code: i32, stdout: &str, after: Duration) -> Self {
        Behavior::Exit {
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: String::new(),
            after,
        }
    }
}

/// Records every launch and hands out scripted children.
pub struct FakeLauncher {
    behavior: Behavior,
    pub launches: AtomicUsize,
    pub specs: Mutex<Vec<LaunchSpec>>,
    pub terminated: Arc<AtomicBool>,
    active: Arc<AtomicUsize>,
    pub max_active: Arc<AtomicUsize>,
}

impl FakeLauncher {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            launches: AtomicUsize::new(0),
            specs: Mutex::new(Vec::new()),
            terminated: Arc::new(AtomicBool::new(false)),
            active: Arc::new(AtomicUsize::new(0)),
            max_active: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn launch_count(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn was_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    pub fn peak_concurrency(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

impl Launcher for FakeLauncher {
    fn launch(&self, spec: &LaunchSpec) -> io::Result<Box<dyn ChildProcess>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        self.specs.lock().unwrap().push(spec.clone());

        if let Behavior::FailToLaunch = self.behavior {
            return Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory"));
        }

        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);

        let (stdout, stderr) = match &self.behavior {
            Behavior::Exit { stdout, stderr, .. } => (stdout.clone(), stderr.clone()),
            _ => (String::new(), String::new()),
        };

        Ok(Box::new(FakeChild {
            behavior: self.behavior.clone(),
            stdout: Some(stdout),
            stderr: Some(stderr),
            terminated: self.terminated.clone(),
            active: self.active.clone(),
        }))
    }
}

struct FakeChild {
    behavior: Behavior,
    stdout: Option<String>,
    stderr: Option<String>,
    terminated: Arc<AtomicBool>,
    active: Arc<AtomicUsize>,
}

fn stream(text: Option<String>) -> Option<OutputStream> {
    text.map(|t| Box::new(io::Cursor::new(t.into_bytes())) as OutputStream)
}

#[async_trait]
impl ChildProcess for FakeChild {
    fn take_stdout(&mut self) -> Option<OutputStream> {
        stream(self.stdout.take())
    }

    fn take_stderr(&mut self) -> Option<OutputStream> {
        stream(self.stderr.take())
    }

    async fn wait(&mut self) -> io::Result<ExitOutcome> {
        match &self.behavior {
            Behavior::Exit { code, after, .. } => {
                tokio::time::sleep(*after).await;
                self.active.fetch_sub(1, Ordering::SeqCst);
                Ok(ExitOutcome { code: *code })
            }
            _ => std::future::pending().await,
        }
    }

    async fn terminate(&mut self) -> io::Result<()> {
        self.terminated.store(true, Ordering::SeqCst);
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
