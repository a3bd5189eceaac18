//! In-memory port implementations shared by the use case tests

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::{PipelineSettings, RetryConfig};
use crate::domain::{ApiFailure, RemotePath, SharedLink};
use crate::ports::{
    ApiResult, IClipboard, ILocalFileSystem, INotificationService, IStorageClient, Notification,
};

pub fn settings(local: &str, remote: &str) -> PipelineSettings {
    PipelineSettings {
        local_folder: PathBuf::from(local),
        remote_folder: RemotePath::new(remote.to_string()).unwrap(),
        retry: RetryConfig::default(),
        notification_title: "Drosh".to_string(),
    }
}

/// Storage call, in the order the fake received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    Upload { path: String, data: Vec<u8> },
    List(String),
    Create(String),
}

/// Scripted storage backend
///
/// Responses are consumed front to back; once a queue is empty the fake
/// answers with its default (echo the path, no links, link from path).
#[derive(Default)]
pub struct FakeStorage {
    calls: Mutex<Vec<StorageCall>>,
    upload_responses: Mutex<VecDeque<ApiResult<RemotePath>>>,
    list_responses: Mutex<VecDeque<ApiResult<Vec<SharedLink>>>>,
    create_responses: Mutex<VecDeque<ApiResult<SharedLink>>>,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_upload(&self, response: ApiResult<RemotePath>) {
        self.upload_responses.lock().unwrap().push_back(response);
    }

    pub fn push_list(&self, response: ApiResult<Vec<SharedLink>>) {
        self.list_responses.lock().unwrap().push_back(response);
    }

    pub fn push_create(&self, response: ApiResult<SharedLink>) {
        self.create_responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn upload_calls(&self) -> Vec<(String, Vec<u8>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                StorageCall::Upload { path, data } => Some((path, data)),
                _ => None,
            })
            .collect()
    }

    pub fn create_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StorageCall::Create(_)))
            .count()
    }

    pub fn list_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StorageCall::List(_)))
            .count()
    }
}

#[async_trait]
impl IStorageClient for FakeStorage {
    async fn upload(&self, data: &[u8], remote_path: &RemotePath) -> ApiResult<RemotePath> {
        self.calls.lock().unwrap().push(StorageCall::Upload {
            path: remote_path.to_string(),
            data: data.to_vec(),
        });
        self.upload_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(remote_path.clone()))
    }

    async fn list_shared_links(&self, remote_path: &RemotePath) -> ApiResult<Vec<SharedLink>> {
        self.calls
            .lock()
            .unwrap()
            .push(StorageCall::List(remote_path.to_string()));
        self.list_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_shared_link(&self, remote_path: &RemotePath) -> ApiResult<SharedLink> {
        self.calls
            .lock()
            .unwrap()
            .push(StorageCall::Create(remote_path.to_string()));
        self.create_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SharedLink::new(format!("https://x{}", remote_path))))
    }
}

/// A storage backend whose every call fails
pub fn failing_storage(times: usize) -> FakeStorage {
    let storage = FakeStorage::new();
    for i in 0..times {
        storage.push_list(Err(ApiFailure::Other(format!("list failure {}", i))));
    }
    storage
}

/// Scripted local filesystem holding a single file
///
/// Each size probe pops the next scripted answer; the last answer repeats.
pub struct FakeFileSystem {
    probes: Mutex<VecDeque<Option<u64>>>,
    last_probe: Mutex<Option<u64>>,
    contents: Vec<u8>,
    fail_read: bool,
    probed_paths: Mutex<Vec<PathBuf>>,
    reads: Mutex<Vec<PathBuf>>,
}

impl FakeFileSystem {
    /// A file that is present with `contents` from the first probe
    pub fn ready(contents: &[u8]) -> Self {
        Self::scripted(vec![Some(contents.len() as u64)], contents)
    }

    /// A file that never appears
    pub fn absent() -> Self {
        Self::scripted(vec![None], b"")
    }

    /// A file whose size probes answer `probes` in order
    pub fn scripted(probes: Vec<Option<u64>>, contents: &[u8]) -> Self {
        Self {
            probes: Mutex::new(probes.into()),
            last_probe: Mutex::new(None),
            contents: contents.to_vec(),
            fail_read: false,
            probed_paths: Mutex::new(Vec::new()),
            reads: Mutex::new(Vec::new()),
        }
    }

    pub fn with_failing_read(mut self) -> Self {
        self.fail_read = true;
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probed_paths.lock().unwrap().len()
    }

    pub fn probed_paths(&self) -> Vec<PathBuf> {
        self.probed_paths.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.lock().unwrap().len()
    }
}

#[async_trait]
impl ILocalFileSystem for FakeFileSystem {
    async fn file_size(&self, path: &Path) -> anyhow::Result<Option<u64>> {
        self.probed_paths.lock().unwrap().push(path.to_path_buf());
        let mut last = self.last_probe.lock().unwrap();
        if let Some(next) = self.probes.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(*last)
    }

    async fn read_file(&self, path: &Path) -> anyhow::Result<Vec<u8>> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        if self.fail_read {
            anyhow::bail!("permission denied");
        }
        Ok(self.contents.clone())
    }
}

/// Notification sink that records everything it is asked to show
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl INotificationService for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(notification.clone());
        if self.fail {
            anyhow::bail!("no notification daemon");
        }
        Ok(())
    }
}

/// Clipboard that records copies, optionally failing every one
#[derive(Default)]
pub struct RecordingClipboard {
    copied: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            copied: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap().clone()
    }
}

impl IClipboard for RecordingClipboard {
    fn set_text(&self, text: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("clipboard unavailable");
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
