//! Common test utilities for favicon-dl integration tests

use favicon_dl::{BatchObserver, BatchResult, ProgressState, WorkItem};
use std::sync::Mutex;
use wiremock::MockServer;

/// Observer recording every progress snapshot and counting completions
#[derive(Default)]
pub struct Recorder {
    progress: Mutex<Vec<ProgressState>>,
    completions: Mutex<usize>,
}

impl Recorder {
    pub fn progress(&self) -> Vec<ProgressState> {
        self.progress.lock().unwrap().clone()
    }

    pub fn completions(&self) -> usize {
        *self.completions.lock().unwrap()
    }
}

impl BatchObserver for Recorder {
    fn on_progress(&self, progress: ProgressState) {
        self.progress.lock().unwrap().push(progress);
    }

    fn on_complete(&self, _result: &BatchResult) {
        *self.completions.lock().unwrap() += 1;
    }
}

/// Work item whose base URL is `<server>/<site>/`
pub fn site_item(server: &MockServer, id: u64, site: &str) -> WorkItem {
    WorkItem::new(id, format!("{}/{}/", server.uri(), site)).with_title(site)
}

/// Base URL on a local port with nothing listening
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}
