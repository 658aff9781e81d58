use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error, warn};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::LoadError;

/// Request to resolve the full-resolution resource of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub index: usize,
    /// Opaque source reference of the item
    pub source: String,
    /// Cache generation the request belongs to
    pub generation: u64,
}

/// Facts learned from a resolved resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    pub index: usize,
    pub generation: u64,
    pub outcome: Result<LoadedImage, LoadError>,
}

/// The image-loading primitive behind the preload cache.
///
/// `load` must not block. Results are delivered through the channel handed
/// out when the loader was created, in whatever order they complete.
pub trait ResourceLoader: Send {
    fn load(&self, request: LoadRequest);

    /// Abandon everything in flight. Results that still arrive are stale.
    fn cancel_all(&mut self);
}

/// Loader that resolves sources on a Tokio runtime.
///
/// Local paths are read with `tokio::fs`, `http(s)://` sources are fetched with
/// reqwest. The bytes are decoded on the blocking pool to make sure the image
/// actually resolves before it counts as loaded.
pub struct FileLoader {
    /// Sender for results
    result_tx: mpsc::UnboundedSender<LoadResult>,
    /// Current cancellation token
    cancel_token: CancellationToken,
    runtime: Arc<tokio::runtime::Runtime>,
    http: reqwest::Client,
}

impl FileLoader {
    /// Spawn a new loader.
    /// Returns the loader and the result receiver.
    pub fn spawn() -> std::io::Result<(Self, mpsc::UnboundedReceiver<LoadResult>)> {
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("gallery-loader")
            .worker_threads(2)
            .enable_all()
            .build()?;

        Ok((
            Self {
                result_tx,
                cancel_token: CancellationToken::new(),
                runtime: Arc::new(runtime),
                http: reqwest::Client::new(),
            },
            result_rx,
        ))
    }
}

impl ResourceLoader for FileLoader {
    fn load(&self, request: LoadRequest) {
        let result_tx = self.result_tx.clone();
        let cancel_token = self.cancel_token.child_token();
        let http = self.http.clone();

        debug!("[FileLoader] Spawning task for #{} {} (gen={})", request.index, request.source, request.generation);
        self.runtime.spawn(async move {
            if cancel_token.is_cancelled() {
                debug!("[FileLoader] Task cancelled before start: {}", request.source);
                return;
            }

            let data = tokio::select! {
                biased;
                _ = cancel_token.cancelled() => {
                    debug!("[FileLoader] Task cancelled during I/O: {}", request.source);
                    return;
                }
                result = fetch(&http, &request.source) => result
            };

            let outcome = match data {
                Ok(bytes) => {
                    let source = request.source.clone();
                    match tokio::task::spawn_blocking(move || decode(&source, &bytes)).await {
                        Ok(outcome) => outcome,
                        Err(err) => {
                            error!("[FileLoader] Decode task panicked for {}: {:?}", request.source, err);
                            Err(LoadError::Decode {
                                source_ref: request.source.clone(),
                                message: format!("decode panic: {err}"),
                            })
                        }
                    }
                }
                Err(err) => Err(err),
            };

            if cancel_token.is_cancelled() {
                debug!("[FileLoader] Discarding cancelled result: {}", request.source);
                return;
            }

            let result = LoadResult {
                index: request.index,
                generation: request.generation,
                outcome,
            };
            if let Err(err) = result_tx.send(result) {
                warn!("[FileLoader] Failed to send result: {}", err);
            }
        });
    }

    fn cancel_all(&mut self) {
        self.cancel_token.cancel();
        self.cancel_token = CancellationToken::new();
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch(http: &reqwest::Client, source: &str) -> Result<Vec<u8>, LoadError> {
    if is_remote(source) {
        let http_err = |err: reqwest::Error| LoadError::Http {
            source_ref: source.to_string(),
            message: err.to_string(),
        };
        let response = http.get(source).send().await.and_then(|r| r.error_for_status()).map_err(http_err)?;
        let bytes = response.bytes().await.map_err(http_err)?;
        return Ok(bytes.to_vec());
    }

    let path = PathBuf::from(source.strip_prefix("file://").unwrap_or(source));
    tokio::fs::read(&path).await.map_err(|err| LoadError::Io {
        source_ref: source.to_string(),
        message: err.to_string(),
    })
}

fn decode(source: &str, data: &[u8]) -> Result<LoadedImage, LoadError> {
    let img = image::load_from_memory(data).map_err(|err| LoadError::Decode {
        source_ref: source.to_string(),
        message: err.to_string(),
    })?;
    Ok(LoadedImage {
        width: img.width(),
        height: img.height(),
    })
}

/// Loader that only records requests. The owner decides when and how each one
/// completes, which makes load ordering fully deterministic.
#[derive(Clone)]
pub struct RecordingLoader {
    result_tx: mpsc::UnboundedSender<LoadResult>,
    history: Arc<Mutex<Vec<LoadRequest>>>,
    pending: Arc<Mutex<Vec<LoadRequest>>>,
}

impl RecordingLoader {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<LoadResult>) {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        (
            Self {
                result_tx,
                history: Arc::new(Mutex::new(Vec::new())),
                pending: Arc::new(Mutex::new(Vec::new())),
            },
            result_rx,
        )
    }

    /// Every request ever issued, in order
    pub fn requests(&self) -> Vec<LoadRequest> {
        self.history.lock().clone()
    }

    /// Requests that have not been completed yet
    pub fn pending(&self) -> Vec<LoadRequest> {
        self.pending.lock().clone()
    }

    /// How often `index` was requested
    pub fn request_count(&self, index: usize) -> usize {
        self.history.lock().iter().filter(|r| r.index == index).count()
    }

    /// Complete the oldest pending request for `index`.
    /// Returns false if nothing was pending for it.
    pub fn complete(&self, index: usize, outcome: Result<LoadedImage, LoadError>) -> bool {
        let request = {
            let mut pending = self.pending.lock();
            let Some(pos) = pending.iter().position(|r| r.index == index) else {
                return false;
            };
            pending.remove(pos)
        };
        self.send(request, outcome)
    }

    /// Complete every pending request successfully with the given size
    pub fn complete_all(&self, width: u32, height: u32) -> usize {
        let drained: Vec<LoadRequest> = self.pending.lock().drain(..).collect();
        let count = drained.len();
        for request in drained {
            self.send(request, Ok(LoadedImage { width, height }));
        }
        count
    }

    fn send(&self, request: LoadRequest, outcome: Result<LoadedImage, LoadError>) -> bool {
        let result = LoadResult {
            index: request.index,
            generation: request.generation,
            outcome,
        };
        self.result_tx.send(result).is_ok()
    }
}

impl ResourceLoader for RecordingLoader {
    fn load(&self, request: LoadRequest) {
        self.history.lock().push(request.clone());
        self.pending.lock().push(request);
    }

    // Pending requests may still be completed; the cache drops them by generation.
    fn cancel_all(&mut self) {}
}
