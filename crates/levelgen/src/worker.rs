//! Background job transport.
//!
//! Atlas builds and level generation take long enough to stall a frame loop, so callers submit
//! them here and collect the reply later. Every job runs on its own thread and replies on one
//! shared channel tagged with its [`JobId`]; replies that arrive for other jobs are held until
//! someone asks for them. All jobs share one [`AtlasCache`], so concurrent atlas requests wait on
//! a single build.
//!
//! A job counts as outstanding from submission until its reply is collected. Callers must collect
//! every reply; once [`MAX_OUTSTANDING`] jobs are outstanding, further submissions are refused.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};

use crate::atlas::{AtlasCache, MovementAtlas};
use crate::config::GeneratorSettings;
use crate::error::{GenerationError, WorkerError};
use crate::level::{Level, LevelGenerator};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub const MAX_OUTSTANDING: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(u64);

impl JobId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Job {
    SimulateMovements,
    CreateLevel { level_id: u32 },
}

#[derive(Debug)]
pub enum JobResponse {
    Movements(Arc<MovementAtlas>),
    Level(Box<Result<Level, GenerationError>>),
}

#[derive(Debug)]
pub struct JobReply {
    pub job_id: JobId,
    pub response: JobResponse,
}

pub struct Worker {
    atlas: Arc<AtlasCache>,
    settings: GeneratorSettings,
    next_id: u64,
    sender: Sender<JobReply>,
    receiver: Receiver<JobReply>,
    running: BTreeMap<JobId, JoinHandle<()>>,
    ready: BTreeMap<JobId, JobResponse>,
    max_outstanding: usize,
}

impl Default for Worker {
    fn default() -> Self {
        Self::new(Arc::new(AtlasCache::new()), GeneratorSettings::default())
    }
}

impl Worker {
    pub fn new(atlas: Arc<AtlasCache>, settings: GeneratorSettings) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            atlas,
            settings,
            next_id: 1,
            sender,
            receiver,
            running: BTreeMap::new(),
            ready: BTreeMap::new(),
            max_outstanding: MAX_OUTSTANDING,
        }
    }

    pub fn with_max_outstanding(mut self, max_outstanding: usize) -> Self {
        self.max_outstanding = max_outstanding;
        self
    }

    pub fn atlas_cache(&self) -> &Arc<AtlasCache> {
        &self.atlas
    }

    /// Starts `job` on its own thread. The reply stays outstanding until collected.
    pub fn submit(&mut self, job: Job) -> Result<JobId, WorkerError> {
        let atlas = Arc::clone(&self.atlas);
        let settings = self.settings.clone();
        let job_id = self.dispatch(move || run(job, &atlas, settings))?;
        debug!("job {job_id} submitted: {job:?}");
        Ok(job_id)
    }

    /// Blocks until the reply for `job_id` arrives. Each reply is handed out once.
    pub fn wait(&mut self, job_id: JobId) -> Result<JobResponse, WorkerError> {
        loop {
            if let Some(response) = self.ready.remove(&job_id) {
                return Ok(response);
            }
            let Some(handle) = self.running.get(&job_id) else {
                return Err(WorkerError::UnknownJob(job_id));
            };
            // A thread that finished before the receive below has already sent its reply, if any.
            let finished = handle.is_finished();
            match self.receiver.recv_timeout(POLL_INTERVAL) {
                Ok(reply) => self.accept(reply),
                Err(RecvTimeoutError::Timeout) if finished => {
                    self.running.remove(&job_id);
                    warn!("job {job_id} ended without replying");
                    return Err(WorkerError::JobPanicked(job_id));
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Err(WorkerError::Disconnected),
            }
        }
    }

    /// Non-blocking variant of [`Worker::wait`]: `Ok(None)` while the job is still running.
    pub fn try_take(&mut self, job_id: JobId) -> Result<Option<JobResponse>, WorkerError> {
        loop {
            match self.receiver.try_recv() {
                Ok(reply) => self.accept(reply),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(WorkerError::Disconnected),
            }
        }
        if let Some(response) = self.ready.remove(&job_id) {
            return Ok(Some(response));
        }
        match self.running.get(&job_id) {
            None => Err(WorkerError::UnknownJob(job_id)),
            Some(handle) if handle.is_finished() => {
                // Finished after the drain above; its reply may be queued now.
                if let Ok(reply) = self.receiver.try_recv() {
                    self.accept(reply);
                    return self.try_take(job_id);
                }
                self.running.remove(&job_id);
                warn!("job {job_id} ended without replying");
                Err(WorkerError::JobPanicked(job_id))
            }
            Some(_) => Ok(None),
        }
    }

    /// Jobs submitted and not yet handed out.
    pub fn pending(&self) -> usize {
        self.running.len() + self.ready.len()
    }

    fn dispatch(
        &mut self,
        work: impl FnOnce() -> JobResponse + Send + 'static,
    ) -> Result<JobId, WorkerError> {
        let outstanding = self.pending();
        if outstanding >= self.max_outstanding {
            warn!("refusing job: {outstanding} replies not collected");
            return Err(WorkerError::Saturated { outstanding });
        }
        let job_id = JobId(self.next_id);
        self.next_id += 1;
        let sender = self.sender.clone();
        let handle = thread::spawn(move || {
            let response = work();
            // The worker may have been dropped; nobody is left to read the reply.
            let _ = sender.send(JobReply { job_id, response });
        });
        self.running.insert(job_id, handle);
        Ok(job_id)
    }

    fn accept(&mut self, reply: JobReply) {
        debug!("job {} replied", reply.job_id);
        self.running.remove(&reply.job_id);
        self.ready.insert(reply.job_id, reply.response);
    }
}

fn run(job: Job, atlas: &AtlasCache, settings: GeneratorSettings) -> JobResponse {
    match job {
        Job::SimulateMovements => JobResponse::Movements(atlas.get()),
        Job::CreateLevel { level_id } => {
            let generator = LevelGenerator::with_settings(atlas.get(), settings);
            JobResponse::Level(Box::new(generator.generate(level_id)))
        }
    }
}
