/// Background file loading for loading screens
///
/// Worker threads read whole files; the render thread polls for results once
/// per frame without blocking and builds GPU objects from the bytes itself.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::error::{Error, Result};
use crate::{dx_debug, dx_warn};

/// Read a whole file synchronously
pub fn load_binary_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|e| {
        Error::InvalidResource(format!("cannot read '{}': {}", path.display(), e))
    })
}

struct LoadJob {
    path: PathBuf,
    reply: Sender<Result<Vec<u8>>>,
}

// ===== TASK =====

/// Pending result of one queued file read
pub struct LoadTask {
    path: PathBuf,
    reply: Receiver<Result<Vec<u8>>>,
    taken: bool,
}

impl LoadTask {
    /// Non-blocking poll
    ///
    /// `None` while the read is pending (and after the result was taken),
    /// `Some(result)` exactly once.
    pub fn try_take(&mut self) -> Option<Result<Vec<u8>>> {
        if self.taken {
            return None;
        }
        match self.reply.try_recv() {
            Ok(result) => {
                self.taken = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.taken = true;
                Some(Err(self.abandoned()))
            }
        }
    }

    /// Block until the result arrives
    pub fn wait(mut self) -> Result<Vec<u8>> {
        if self.taken {
            return Err(Error::InvalidResource(format!(
                "result for '{}' already taken",
                self.path.display()
            )));
        }
        self.taken = true;
        self.reply.recv().unwrap_or_else(|_| Err(self.abandoned()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn abandoned(&self) -> Error {
        Error::BackendError(format!("loader stopped before reading '{}'", self.path.display()))
    }
}

// ===== BATCH =====

/// A set of tasks joined together (e.g. all assets of a loading screen)
#[derive(Default)]
pub struct LoadBatch {
    tasks: Vec<LoadTask>,
    results: Vec<Option<Result<Vec<u8>>>>,
    finished: bool,
}

impl LoadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: LoadTask) {
        self.finished = false;
        self.tasks.push(task);
        self.results.push(None);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn poll(&mut self) -> usize {
        for (task, slot) in self.tasks.iter_mut().zip(self.results.iter_mut()) {
            if slot.is_none() {
                *slot = task.try_take();
            }
        }
        self.results.iter().filter(|r| r.is_some()).count()
    }

    /// Fraction of completed tasks in 0.0..=1.0 (1.0 for an empty batch)
    pub fn progress(&mut self) -> f32 {
        if self.tasks.is_empty() {
            return 1.0;
        }
        self.poll() as f32 / self.tasks.len() as f32
    }

    /// All results in submission order once every task is complete
    ///
    /// Yields the results once; later calls return `None` until more tasks
    /// are pushed.
    pub fn try_finish(&mut self) -> Option<Vec<Result<Vec<u8>>>> {
        if self.finished || self.poll() < self.tasks.len() {
            return None;
        }
        self.finished = true;
        self.tasks.clear();
        Some(self.results.drain(..).flatten().collect())
    }

    /// Block until every task is complete
    pub fn wait(self) -> Vec<Result<Vec<u8>>> {
        self.tasks
            .into_iter()
            .zip(self.results)
            .map(|(task, result)| match result {
                Some(result) => result,
                None => task.wait(),
            })
            .collect()
    }
}

// ===== LOADER =====

/// Fixed pool of file-reading worker threads
pub struct AssetLoader {
    jobs: Option<Sender<LoadJob>>,
    workers: Vec<JoinHandle<()>>,
}

impl AssetLoader {
    /// Spawn `workers` threads (at least one)
    pub fn new(workers: usize) -> Result<Self> {
        let (jobs, queue) = crossbeam_channel::unbounded::<LoadJob>();

        let mut handles = Vec::with_capacity(workers.max(1));
        for index in 0..workers.max(1) {
            let queue = queue.clone();
            let handle = thread::Builder::new()
                .name(format!("dx11-loader-{}", index))
                .spawn(move || worker_loop(queue))
                .map_err(|e| Error::InitializationFailed(format!("cannot spawn loader thread: {}", e)))?;
            handles.push(handle);
        }

        dx_debug!("dx11::AssetLoader", "Started {} loader threads", handles.len());
        Ok(Self { jobs: Some(jobs), workers: handles })
    }

    /// Queue a whole-file read of `path`
    pub fn load(&self, path: impl Into<PathBuf>) -> LoadTask {
        let path = path.into();
        let (reply, result) = crossbeam_channel::bounded(1);

        if let Some(jobs) = &self.jobs {
            // A send failure drops the job; the task then reports the loss
            let _ = jobs.send(LoadJob { path: path.clone(), reply });
        }

        LoadTask { path, reply: result, taken: false }
    }

    /// Queue every path and collect the tasks into one batch
    pub fn load_all<I, P>(&self, paths: I) -> LoadBatch
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut batch = LoadBatch::new();
        for path in paths {
            batch.push(self.load(path));
        }
        batch
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        // Closing the queue ends every worker loop
        self.jobs.take();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                dx_warn!("dx11::AssetLoader", "Loader thread panicked");
            }
        }
    }
}

fn worker_loop(queue: Receiver<LoadJob>) {
    // Ends once the loader drops the sender and the queue is empty
    for job in queue.iter() {
        let result = load_binary_file(&job.path);
        if let Err(e) = &result {
            dx_warn!("dx11::AssetLoader", "Load failed: {}", e);
        }
        // The task may have been dropped; nobody is waiting then
        let _ = job.reply.send(result);
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
