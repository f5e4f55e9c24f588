use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crate::error::ModelLoadError;
use crate::pipeline::Pipeline;

/// Lazily loaded, read-only [`Pipeline`].
///
/// The first `get` loads the artifact; concurrent first callers wait on
/// the same load and every later call reuses the outcome. A failed load
/// is kept as well: the artifact is read at most once per handle, and no
/// caller ever sees a half-built pipeline.
#[derive(Debug)]
pub struct SharedPipeline {
    path: PathBuf,
    state: OnceLock<Result<Pipeline, Arc<ModelLoadError>>>,
    attempts: AtomicUsize,
}

impl SharedPipeline {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: OnceLock::new(),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loaded pipeline, loading it on first use.
    ///
    /// A load error is returned to this caller and to every later one;
    /// the artifact is not read again.
    pub fn get(&self) -> Result<&Pipeline, Arc<ModelLoadError>> {
        self.state
            .get_or_init(|| {
                self.attempts.fetch_add(1, Ordering::Relaxed);
                Pipeline::load(&self.path).map_err(|err| {
                    tracing::error!(path = %self.path.display(), error = %err, "model load failed");
                    Arc::new(err)
                })
            })
            .as_ref()
            .map_err(Arc::clone)
    }

    /// Already loaded pipeline, never triggers a load
    pub fn get_loaded(&self) -> Option<&Pipeline> {
        self.state.get().and_then(|state| state.as_ref().ok())
    }

    pub fn is_loaded(&self) -> bool {
        self.get_loaded().is_some()
    }

    /// Error of the one load attempt, if it failed
    pub fn load_error(&self) -> Option<Arc<ModelLoadError>> {
        self.state.get().and_then(|state| state.as_ref().err().cloned())
    }

    /// load attempts so far, at most 1
    pub fn load_count(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }
}

static GLOBAL: OnceLock<SharedPipeline> = OnceLock::new();

/// Process-wide handle.
///
/// The first caller fixes the artifact path; later calls with another
/// path get the existing handle and a warning.
pub fn global(path: impl Into<PathBuf>) -> &'static SharedPipeline {
    let path = path.into();
    let shared = GLOBAL.get_or_init(|| SharedPipeline::new(path.clone()));
    if shared.path() != path {
        tracing::warn!(
            requested = %path.display(),
            loaded = %shared.path().display(),
            "global pipeline already bound to another artifact"
        );
    }
    shared
}
