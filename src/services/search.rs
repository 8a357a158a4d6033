//! Debounced title search
//!
//! `SearchController` owns the live query text behind a command channel and
//! turns keystrokes into search passes: a 200 ms quiet period gates the
//! type-ahead path, while `submit` runs the same routine immediately. Each
//! pass looks up both content categories in parallel and hands the
//! normalized lists to a caller-supplied sink, one callback per category.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};

use crate::{
    models::{normalize_page, Category, Video},
    services::providers::MetadataProvider,
};

/// Quiet period a query must survive unchanged before a search fires
const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Callback pair for publishing normalized result lists
///
/// Invoked from the controller's lookup tasks as each category completes;
/// the two categories are delivered independently, in whichever order their
/// lookups finish.
pub trait ResultSink: Send + Sync {
    fn movie_results(&self, results: Vec<Video>);
    fn series_results(&self, results: Vec<Video>);
}

/// Commands accepted by the controller task
enum Command {
    QueryChanged(String),
    Submit,
}

/// Handle to a spawned search controller task
///
/// Dropping the handle closes the command channel and stops the task; lookup
/// tasks already dispatched still run to completion.
pub struct SearchController {
    commands: mpsc::UnboundedSender<Command>,
}

impl SearchController {
    /// Spawns the controller task
    pub fn spawn(provider: Arc<dyn MetadataProvider>, sink: Arc<dyn ResultSink>) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();

        let task = ControllerTask {
            provider,
            sink,
            generation: Arc::new(AtomicU64::new(0)),
        };
        tokio::spawn(task.run(command_rx));

        Self { commands }
    }

    /// Updates the live query text
    ///
    /// Cancels any pending timer and schedules a fresh one; every call is a
    /// scheduling event, whether or not the text differs from the last.
    pub fn set_query(&self, text: impl Into<String>) {
        if let Err(e) = self.commands.send(Command::QueryChanged(text.into())) {
            tracing::error!(error = %e, "Failed to send query change to search controller");
        }
    }

    /// Runs a search pass with the live query immediately, bypassing the
    /// debounce. A pending timer stays armed.
    pub fn submit(&self) {
        if let Err(e) = self.commands.send(Command::Submit) {
            tracing::error!(error = %e, "Failed to send submit to search controller");
        }
    }
}

/// State owned by the controller task
struct ControllerTask {
    provider: Arc<dyn MetadataProvider>,
    sink: Arc<dyn ResultSink>,
    /// Latest dispatched pass; lookups compare against it before delivering
    generation: Arc<AtomicU64>,
}

impl ControllerTask {
    /// Event loop multiplexing the command channel and the debounce timer
    ///
    /// `query` is re-captured on every change together with re-arming the
    /// timer, so the text used when the timer fires always equals the live
    /// text at the most recent scheduling.
    async fn run(self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let timer = sleep(Duration::ZERO);
        tokio::pin!(timer);
        let mut armed = false;
        let mut query = String::new();

        loop {
            tokio::select! {
                maybe_command = commands.recv() => {
                    match maybe_command {
                        Some(Command::QueryChanged(text)) => {
                            query = text;
                            armed = true;
                            timer.as_mut().reset(Instant::now() + QUIET_PERIOD);
                        }
                        Some(Command::Submit) => {
                            self.dispatch_pass(query.clone());
                        }
                        None => break,
                    }
                }
                () = &mut timer, if armed => {
                    armed = false;
                    self.dispatch_pass(query.clone());
                }
            }
        }
    }

    /// Dispatches one generation-tagged search pass
    ///
    /// Both category lookups run as their own tasks so the event loop never
    /// blocks on the network; each delivers to the sink on its own as soon
    /// as it normalizes, unless a newer pass has been dispatched meanwhile.
    fn dispatch_pass(&self, query: String) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(query = %query, generation, "Dispatching search pass");

        for category in [Category::Movie, Category::Series] {
            let provider = Arc::clone(&self.provider);
            let sink = Arc::clone(&self.sink);
            let latest = Arc::clone(&self.generation);
            let query = query.clone();

            tokio::spawn(async move {
                let titles = search_category(provider.as_ref(), &query, category).await;

                if latest.load(Ordering::SeqCst) != generation {
                    tracing::debug!(
                        query = %query,
                        category = %category,
                        generation,
                        "Discarding superseded search results"
                    );
                    return;
                }

                match category {
                    Category::Movie => sink.movie_results(titles),
                    Category::Series => sink.series_results(titles),
                }
            });
        }
    }
}

/// Searches one category and normalizes the result page
///
/// Provider failures degrade to an empty list: they are logged here and
/// never cross the sink boundary as errors, and a failure in one category
/// leaves the other untouched. Shared by the controller and the HTTP
/// facade's direct search path.
pub async fn search_category(
    provider: &dyn MetadataProvider,
    query: &str,
    category: Category,
) -> Vec<Video> {
    match provider.search(query, category).await {
        Ok(page) => {
            let titles = normalize_page(page, category);
            tracing::debug!(
                query = %query,
                category = %category,
                results = titles.len(),
                "Search results normalized"
            );
            titles
        }
        Err(error) => {
            tracing::error!(
                error = %error,
                query = %query,
                category = %category,
                "Metadata search failed, delivering empty result list"
            );
            Vec::new()
        }
    }
}
