use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use docfresh_fetch::{FetchOptions, Fetcher, HttpClient, Index, IndexLoader, Progress};
use docfresh_store::{CacheStore, Resolution, resolve};
use docfresh_verify::{Fingerprint, hash_reader_with_chunk_size};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::{
    AttemptId, DocumentHandle, Error, FlowConfig, FlowContext, FlowFailure, FlowState, Outcome,
    Result, Status, StatusSink, TransferIndicator,
};

type FlowResult = std::result::Result<Outcome, FlowFailure>;

enum Command {
    Open(Option<Arc<dyn DocumentHandle>>),
    Retry,
    Shutdown,
}

/// Result of one worker step, posted back to the controller.
enum Handoff {
    IndexLoaded(Index),
    Hashed {
        index:  Index,
        result: std::result::Result<Fingerprint, FlowFailure>,
    },
    Progress(u8),
    Downloaded(std::result::Result<PathBuf, FlowFailure>),
}

struct Tagged {
    attempt: AttemptId,
    handoff: Handoff,
}

enum Event {
    Command(Option<Command>),
    Handoff(Tagged),
}

/// Drives a document through index loading, hashing, resolution and
/// download.
///
/// All state lives on the controller task. Network, hashing and file
/// transfer run on separate workers that each post exactly one completion
/// [`Handoff`] tagged with their attempt; the controller drops any handoff
/// from an attempt other than the current one.
pub struct FlowController<C: HttpClient, S: StatusSink> {
    client:       Arc<C>,
    sink:         S,
    config:       Arc<FlowConfig>,
    cache:        CacheStore,
    state:        FlowState,
    context:      Option<Arc<FlowContext>>,
    last_attempt: Option<AttemptId>,
    last_percent: Option<u8>,
    handoff_tx:   mpsc::UnboundedSender<Tagged>,
    handoff_rx:   mpsc::UnboundedReceiver<Tagged>,
    outcome_tx:   watch::Sender<Option<FlowResult>>,
}

impl<C: HttpClient + 'static, S: StatusSink> FlowController<C, S> {
    pub fn new(client: C, sink: S, config: FlowConfig, storage_root: impl Into<PathBuf>) -> Self {
        let cache = CacheStore::new(storage_root)
            .with_prefix(config.cache_prefix.clone())
            .with_extension(config.cache_extension.clone());
        let (handoff_tx, handoff_rx) = mpsc::unbounded_channel();
        let (outcome_tx, _) = watch::channel(None);

        Self {
            client: Arc::new(client),
            sink,
            config: Arc::new(config),
            cache,
            state: FlowState::Idle,
            context: None,
            last_attempt: None,
            last_percent: None,
            handoff_tx,
            handoff_rx,
            outcome_tx,
        }
    }

    pub fn state(&self) -> &FlowState { &self.state }

    /// Run the controller on its own tokio task.
    pub fn spawn(self) -> FlowHandle {
        let (commands, rx) = mpsc::unbounded_channel();
        let outcome = self.outcome_tx.subscribe();
        let task = tokio::spawn(self.run(rx));
        FlowHandle {
            commands,
            outcome,
            task,
        }
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        loop {
            let event = tokio::select! {
                command = commands.recv() => Event::Command(command),
                Some(tagged) = self.handoff_rx.recv() => Event::Handoff(tagged),
            };

            match event {
                Event::Command(Some(Command::Open(document))) => self.open(document),
                Event::Command(Some(Command::Retry)) => self.retry(),
                Event::Command(Some(Command::Shutdown) | None) => break,
                Event::Handoff(tagged) => self.on_handoff(tagged),
            }
        }
        tracing::debug!("flow controller stopped");
    }

    fn open(&mut self, document: Option<Arc<dyn DocumentHandle>>) {
        if self.context.is_some() && !self.state.is_terminal() {
            tracing::info!(state = ?self.state, "new document supersedes running flow");
        }
        let attempt = self.next_attempt();
        self.start(FlowContext {
            attempt,
            document,
            config: Arc::clone(&self.config),
            cache: self.cache.clone(),
        });
    }

    fn retry(&mut self) {
        let retryable = matches!(&self.state, FlowState::Failed(f) if f.is_retryable());
        let Some(context) = self.context.clone().filter(|_| retryable) else {
            tracing::warn!(state = ?self.state, "retry ignored, nothing to retry");
            return;
        };
        let attempt = self.next_attempt();
        tracing::info!(%attempt, "retrying flow");
        self.start(context.restart(attempt));
    }

    fn next_attempt(&mut self) -> AttemptId {
        let attempt = self.last_attempt.map_or(AttemptId::FIRST, AttemptId::next);
        self.last_attempt = Some(attempt);
        attempt
    }

    fn start(&mut self, context: FlowContext) {
        let context = Arc::new(context);
        self.context = Some(Arc::clone(&context));
        self.last_percent = None;
        self.transition(FlowState::Loading, None);

        let loader = IndexLoader::new(Arc::clone(&self.client)).with_timeout(context.config.index_timeout);
        self.spawn_step(context.attempt, async move {
            Handoff::IndexLoaded(loader.load(&context.config.index_url).await)
        });
    }

    fn on_handoff(&mut self, Tagged { attempt, handoff }: Tagged) {
        let Some(context) = self.context.clone() else {
            return;
        };
        if attempt != context.attempt {
            tracing::debug!(%attempt, current = %context.attempt, "discarding stale handoff");
            return;
        }

        match (self.state.clone(), handoff) {
            (FlowState::Loading, Handoff::IndexLoaded(index)) => self.on_index(&context, index),
            (FlowState::Hashing, Handoff::Hashed { index, result }) => match result {
                Ok(fingerprint) => self.on_fingerprint(&context, &fingerprint, &index),
                Err(failure) => self.fail(failure),
            },
            (FlowState::Downloading, Handoff::Progress(percent)) => self.on_progress(percent),
            (FlowState::Downloading, Handoff::Downloaded(result)) => match result {
                Ok(path) => self.finish(Outcome::Downloaded(path)),
                Err(failure) => self.fail(failure),
            },
            (state, _) => tracing::warn!(%attempt, ?state, "unexpected handoff for current state"),
        }
    }

    fn on_index(&mut self, context: &Arc<FlowContext>, index: Index) {
        let Some(document) = context.document.clone() else {
            self.fail(FlowFailure::NoInput);
            return;
        };
        self.transition(FlowState::Hashing, None);

        let chunk_size = context.config.hash_chunk_size;
        let hashing = tokio::task::spawn_blocking(move || {
            let stream = document
                .open_read_stream()
                .map_err(|e| FlowFailure::Read(e.to_string()))?;
            hash_reader_with_chunk_size(stream, chunk_size).map_err(|e| FlowFailure::Read(e.to_string()))
        });
        self.spawn_step(context.attempt, async move {
            let result = hashing
                .await
                .unwrap_or_else(|e| Err(FlowFailure::Read(format!("hashing worker failed: {e}"))));
            Handoff::Hashed { index, result }
        });
    }

    fn on_fingerprint(&mut self, context: &Arc<FlowContext>, fingerprint: &Fingerprint, index: &Index) {
        tracing::info!(attempt = %context.attempt, %fingerprint, "document fingerprinted");
        self.transition(FlowState::Resolving, None);

        match resolve(fingerprint, index, &context.cache) {
            Resolution::UseOriginal => {
                self.transition(FlowState::PassThrough, None);
                let location = context
                    .document
                    .as_ref()
                    .map(|d| d.display_location())
                    .unwrap_or_default();
                self.finish(Outcome::Original(location));
            }
            Resolution::UseCache(path) => {
                self.transition(FlowState::CacheHit, None);
                self.finish(Outcome::Cached(path));
            }
            Resolution::NeedsDownload { url, destination } => {
                self.transition(FlowState::Downloading, Some(TransferIndicator::Indeterminate));
                self.download(context, url, destination);
            }
        }
    }

    fn download(&mut self, context: &Arc<FlowContext>, url: String, destination: PathBuf) {
        let attempt = context.attempt;
        let progress_tx = self.handoff_tx.clone();
        let options = FetchOptions::default()
            .connect_timeout(context.config.connect_timeout)
            .read_timeout(context.config.read_timeout)
            .on_progress(Arc::new(move |progress: &Progress| {
                let _ = progress_tx.send(Tagged {
                    attempt,
                    handoff: Handoff::Progress(progress.percentage()),
                });
            }));
        let fetcher = Fetcher::new(Arc::clone(&self.client));

        self.spawn_step(attempt, async move {
            let result = fetcher.fetch(&url, &destination, &options).await.map_err(|e| {
                tracing::warn!(%attempt, url, error = %e, "download failed");
                FlowFailure::Download(e.to_string())
            });
            Handoff::Downloaded(result)
        });
    }

    fn on_progress(&mut self, percent: u8) {
        // Only forward changes; chunks are far more frequent than whole percents.
        if self.last_percent.is_some_and(|last| percent <= last) {
            return;
        }
        self.last_percent = Some(percent);
        self.transition(FlowState::Downloading, Some(TransferIndicator::Percent(percent)));
    }

    fn finish(&mut self, outcome: Outcome) {
        tracing::info!(?outcome, "flow ready");
        self.transition(FlowState::Ready(outcome.clone()), None);
        self.outcome_tx.send_replace(Some(Ok(outcome)));
    }

    fn fail(&mut self, failure: FlowFailure) {
        if failure.is_error() {
            tracing::warn!(%failure, "flow failed");
        } else {
            tracing::info!(%failure, "flow stopped");
        }
        self.transition(FlowState::Failed(failure.clone()), None);
        self.outcome_tx.send_replace(Some(Err(failure)));
    }

    fn transition(&mut self, state: FlowState, progress: Option<TransferIndicator>) {
        let attempt = self
            .context
            .as_ref()
            .map_or(AttemptId::FIRST, |c| c.attempt);
        tracing::debug!(%attempt, from = ?self.state, to = ?state, ?progress, "flow transition");
        self.state = state.clone();
        self.sink.emit(Status::new(attempt, state, progress));
    }

    fn spawn_step<F>(&self, attempt: AttemptId, work: F)
    where
        F: Future<Output = Handoff> + Send + 'static,
    {
        let tx = self.handoff_tx.clone();
        tokio::spawn(async move {
            let handoff = work.await;
            if tx.send(Tagged { attempt, handoff }).is_err() {
                tracing::trace!(%attempt, "controller gone before handoff");
            }
        });
    }
}

/// Platform-facing control of a running [`FlowController`].
pub struct FlowHandle {
    commands: mpsc::UnboundedSender<Command>,
    outcome:  watch::Receiver<Option<FlowResult>>,
    task:     JoinHandle<()>,
}

impl FlowHandle {
    /// Start a flow for `document`; `None` means the platform received no
    /// document at all.
    pub fn open(&self, document: Option<Arc<dyn DocumentHandle>>) -> Result<()> {
        self.send(Command::Open(document))
    }

    /// Restart a flow whose download failed. Ignored in any other state.
    pub fn retry(&self) -> Result<()> { self.send(Command::Retry) }

    /// Wait for the next terminal result not yet observed through this handle.
    ///
    /// Returns `None` once the controller has stopped.
    pub async fn wait_outcome(&mut self) -> Option<FlowResult> {
        self.outcome.changed().await.ok()?;
        self.outcome.borrow_and_update().clone()
    }

    /// Stop the controller and wait for it to exit. Workers still in flight
    /// finish on their own; their results are dropped.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.commands.send(Command::Shutdown);
        self.task.await.map_err(|_| Error::ControllerStopped)
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands.send(command).map_err(|_| Error::ControllerStopped)
    }
}
