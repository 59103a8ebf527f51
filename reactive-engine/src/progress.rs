use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, sleep, Duration},
};

/// One of the five named phases of the progress timeline. Order is fixed and
/// monotonic within a single generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Analyzing,
    Searching,
    Generating,
    Formatting,
    Complete,
}

/// The single live progress record the UI timeline reads. Stage tasks
/// overwrite it wholesale; there is no partial merging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationProgress {
    pub stage: Stage,
    pub progress: u8,
    pub message: String,
}

const STAGE_INTERVAL: Duration = Duration::from_secs(2);

const WAYPOINTS: [(Stage, u8, &str); 5] = [
    (Stage::Analyzing, 10, "Analyzing input and context..."),
    (Stage::Searching, 25, "Searching context engine..."),
    (Stage::Generating, 50, "Generating content with AI..."),
    (Stage::Formatting, 80, "Formatting for multiple outputs..."),
    (Stage::Complete, 100, "Content generation complete!"),
];

fn waypoint(index: usize) -> GenerationProgress {
    let (stage, progress, message) = WAYPOINTS[index];
    GenerationProgress {
        stage,
        progress,
        message: message.to_string(),
    }
}

/// Drives the cosmetic five-stage timeline during a generation, decoupled
/// from the real network call: the first waypoint is published immediately
/// and the remaining four on fixed offsets, whether or not the request has
/// completed. Also ticks a wall-clock elapsed-seconds counter once a second
/// while a generation is in flight.
pub struct ProgressSimulator {
    progress_tx: Arc<watch::Sender<Option<GenerationProgress>>>,
    elapsed_tx: Arc<watch::Sender<u64>>,
    stage_tasks: Mutex<Vec<JoinHandle<()>>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self {
            progress_tx: Arc::new(watch::Sender::new(None)),
            elapsed_tx: Arc::new(watch::Sender::new(0)),
            stage_tasks: Mutex::new(Vec::new()),
            ticker: Mutex::new(None),
        }
    }
}

impl ProgressSimulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The live progress record, `None` outside a generation.
    #[must_use]
    pub fn progress(&self) -> watch::Receiver<Option<GenerationProgress>> {
        self.progress_tx.subscribe()
    }

    /// Seconds elapsed since the current generation started.
    #[must_use]
    pub fn elapsed(&self) -> watch::Receiver<u64> {
        self.elapsed_tx.subscribe()
    }

    /// Begin a new timeline. Any stage tasks still pending from a previous
    /// generation are aborted first; the stage sequence must stay monotonic
    /// within one generation.
    pub fn start(&self) {
        self.abort_stage_tasks();
        self.abort_ticker();
        self.elapsed_tx.send_replace(0);
        self.progress_tx.send_replace(Some(waypoint(0)));

        let mut tasks = self.stage_tasks.lock().expect("stage tasks poisoned");
        for index in 1..WAYPOINTS.len() {
            let progress_tx = self.progress_tx.clone();
            tasks.push(tokio::spawn(async move {
                sleep(STAGE_INTERVAL * u32::try_from(index).unwrap_or(u32::MAX)).await;
                progress_tx.send_replace(Some(waypoint(index)));
            }));
        }
        drop(tasks);

        let elapsed_tx = self.elapsed_tx.clone();
        let ticker = tokio::spawn(async move {
            let mut tick = interval(Duration::from_secs(1));
            tick.tick().await;
            loop {
                tick.tick().await;
                elapsed_tx.send_modify(|elapsed| *elapsed += 1);
            }
        });
        *self.ticker.lock().expect("ticker poisoned") = Some(ticker);
    }

    /// Stop the elapsed ticker and discard the live progress record. Pending
    /// stage tasks are left to fire; their overwrites into a finished state
    /// are idempotent.
    pub fn finish(&self) {
        self.abort_ticker();
        self.progress_tx.send_replace(None);
    }

    /// Abort everything and return to the idle state (the reset path).
    pub fn clear(&self) {
        self.abort_stage_tasks();
        self.abort_ticker();
        self.progress_tx.send_replace(None);
        self.elapsed_tx.send_replace(0);
    }

    fn abort_stage_tasks(&self) {
        let mut tasks = self.stage_tasks.lock().expect("stage tasks poisoned");
        for task in tasks.drain(..) {
            task.abort();
        }
    }

    fn abort_ticker(&self) {
        if let Some(ticker) = self.ticker.lock().expect("ticker poisoned").take() {
            ticker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, Duration};

    async fn settle_timers() {
        // Let spawned timer tasks observe the advanced clock.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn timeline_walks_the_five_waypoints_in_order() {
        let simulator = ProgressSimulator::new();
        let progress = simulator.progress();
        simulator.start();

        let expected = [
            (Stage::Analyzing, 10),
            (Stage::Searching, 25),
            (Stage::Generating, 50),
            (Stage::Formatting, 80),
            (Stage::Complete, 100),
        ];

        for (index, (stage, percent)) in expected.into_iter().enumerate() {
            if index > 0 {
                advance(Duration::from_secs(2)).await;
            }
            settle_timers().await;
            let current = progress.borrow().clone().expect("live progress");
            assert_eq!(current.stage, stage);
            assert_eq!(current.progress, percent);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_counter_ticks_and_resets_per_generation() {
        let simulator = ProgressSimulator::new();
        let elapsed = simulator.elapsed();
        simulator.start();
        settle_timers().await;

        advance(Duration::from_secs(3)).await;
        settle_timers().await;
        assert_eq!(*elapsed.borrow(), 3);

        simulator.start();
        settle_timers().await;
        assert_eq!(*elapsed.borrow(), 0);

        advance(Duration::from_secs(1)).await;
        settle_timers().await;
        assert_eq!(*elapsed.borrow(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn finish_discards_progress_but_lets_stray_stage_tasks_fire() {
        let simulator = ProgressSimulator::new();
        let progress = simulator.progress();
        simulator.start();
        settle_timers().await;

        advance(Duration::from_secs(2)).await;
        settle_timers().await;
        simulator.finish();
        assert!(progress.borrow().is_none());

        // A stray stage task firing after the finish is an idempotent
        // overwrite, not a crash.
        advance(Duration::from_secs(2)).await;
        settle_timers().await;
        let current = progress.borrow().clone().expect("stray waypoint");
        assert_eq!(current.stage, Stage::Generating);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_aborts_the_whole_timeline() {
        let simulator = ProgressSimulator::new();
        let progress = simulator.progress();
        let elapsed = simulator.elapsed();
        simulator.start();

        advance(Duration::from_secs(2)).await;
        settle_timers().await;
        simulator.clear();

        advance(Duration::from_secs(10)).await;
        settle_timers().await;
        assert!(progress.borrow().is_none());
        assert_eq!(*elapsed.borrow(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_aborts_the_previous_generations_stage_tasks() {
        let simulator = ProgressSimulator::new();
        let progress = simulator.progress();
        simulator.start();

        advance(Duration::from_secs(1)).await;
        settle_timers().await;
        simulator.start();
        settle_timers().await;

        // The old +2s task would fire 1s after the restart; the new timeline
        // must still be on its first waypoint then.
        advance(Duration::from_secs(1)).await;
        settle_timers().await;
        let current = progress.borrow().clone().expect("live progress");
        assert_eq!(current.stage, Stage::Analyzing);
    }
}
