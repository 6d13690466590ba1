use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, sleep, sleep_until, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::buddy::{lock, SharedBuddy};
use crate::config::SchedulerConfig;
use crate::context::Context;
use crate::display::DisplayStyle;
use crate::recommendation::Recommendation;
use crate::selector::BuddyMessage;

/// Far enough out that an idle hide timer never fires.
const IDLE: Duration = Duration::from_secs(24 * 60 * 60);

fn deadline(from: Instant, after: Duration) -> Instant {
    from.checked_add(after)
        .or_else(|| from.checked_add(IDLE))
        .unwrap_or(from)
}

#[derive(Debug, Clone)]
pub enum BuddyEvent {
    /// A message to show until the matching `MessageExpired`.
    Message(BuddyMessage),
    MessageExpired(String),
    ContextUpdated(Context),
    Recommendations(Vec<Recommendation>),
    Optimized {
        notes: Vec<BuddyMessage>,
        style: DisplayStyle,
    },
}

pub struct BuddyScheduler {
    buddy: SharedBuddy,
    timings: SchedulerConfig,
}

/// Owner side of a running scheduler. Dropping it also stops the task.
pub struct SchedulerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.task).await;
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        if self.shutdown.is_some() {
            self.task.abort();
        }
    }
}

impl BuddyScheduler {
    pub fn new(buddy: SharedBuddy, timings: SchedulerConfig) -> Self {
        BuddyScheduler { buddy, timings }
    }

    pub fn spawn(self) -> (SchedulerHandle, mpsc::UnboundedReceiver<BuddyEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(events_tx, shutdown_rx));
        (
            SchedulerHandle {
                shutdown: Some(shutdown_tx),
                task,
            },
            events_rx,
        )
    }

    async fn run(
        self,
        events: mpsc::UnboundedSender<BuddyEvent>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        info!(timings = ?self.timings, "buddy scheduler started");

        let start = Instant::now();
        let mut evaluate = interval_at(deadline(start, self.timings.tick()), self.timings.tick());
        evaluate.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately: optimize on start.
        let mut optimize = interval(self.timings.optimize_interval());
        optimize.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let greeting = sleep(self.timings.greeting_delay());
        tokio::pin!(greeting);
        let mut greeted = false;

        let mut showing: Option<(Instant, String)> = None;

        loop {
            let hide_at = showing
                .as_ref()
                .map(|(at, _)| *at)
                .unwrap_or_else(|| deadline(Instant::now(), IDLE));

            let outgoing: Vec<BuddyEvent> = tokio::select! {
                _ = &mut shutdown => break,
                _ = &mut greeting, if !greeted => {
                    greeted = true;
                    let message = lock(&self.buddy).auto_message();
                    message.into_iter().map(BuddyEvent::Message).collect()
                }
                _ = evaluate.tick() => {
                    let mut buddy = lock(&self.buddy);
                    let context = buddy.snapshot();
                    let recommendations = buddy.recommendations();
                    let message = buddy.auto_message();
                    drop(buddy);

                    let mut out = vec![
                        BuddyEvent::ContextUpdated(context),
                        BuddyEvent::Recommendations(recommendations),
                    ];
                    out.extend(message.map(BuddyEvent::Message));
                    out
                }
                _ = optimize.tick() => {
                    let mut buddy = lock(&self.buddy);
                    let notes = buddy.auto_optimize();
                    let style = buddy.style();
                    drop(buddy);
                    vec![BuddyEvent::Optimized { notes, style }]
                }
                _ = sleep_until(hide_at), if showing.is_some() => {
                    showing
                        .take()
                        .map(|(_, id)| BuddyEvent::MessageExpired(id))
                        .into_iter()
                        .collect()
                }
            };

            for event in outgoing {
                if let BuddyEvent::Message(message) = &event {
                    let hide_at = deadline(Instant::now(), self.timings.message_display());
                    showing = Some((hide_at, message.id.clone()));
                }
                if events.send(event).is_err() {
                    debug!("event receiver gone, stopping scheduler");
                    return;
                }
            }
        }

        info!("buddy scheduler stopped");
    }
}
