use super::engine::{EngineSignalReceiver, SpeechEngine};
use super::error::PlaybackError;
use super::state::PlaybackSnapshot;
use super::synchronizer::PlaybackSynchronizer;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    Load { title: String, content: String },
    Play,
    Pause,
    Stop,
    Seek(i64),
    SkipForward,
    SkipBackward,
    SetRate(f64),
    SetVoice(String),
}

struct Envelope {
    command: PlaybackCommand,
    reply: oneshot::Sender<Result<PlaybackSnapshot, PlaybackError>>,
}

/// Handle to a synchronizer running on its own task.
///
/// Commands, engine signals and timer ticks are serialized through one
/// event loop, so the synchronizer never sees two events at once. Every
/// state change is published as a `PlaybackSnapshot` on a watch channel.
pub struct PlaybackSession {
    commands: mpsc::Sender<Envelope>,
    snapshots: watch::Receiver<PlaybackSnapshot>,
    task: JoinHandle<()>,
}

impl PlaybackSession {
    pub fn spawn<E>(sync: PlaybackSynchronizer<E>, signals: EngineSignalReceiver) -> Self
    where
        E: SpeechEngine + 'static,
    {
        let (commands_tx, commands_rx) = mpsc::channel(32);
        let (snapshots_tx, snapshots_rx) = watch::channel(sync.snapshot());

        let task = tokio::spawn(run(sync, commands_rx, signals, snapshots_tx));

        Self {
            commands: commands_tx,
            snapshots: snapshots_rx,
            task,
        }
    }

    /// Apply a command and wait for the resulting snapshot
    pub async fn send(&self, command: PlaybackCommand) -> Result<PlaybackSnapshot, PlaybackError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Envelope { command, reply })
            .await
            .map_err(|_| PlaybackError::SessionClosed)?;
        response.await.map_err(|_| PlaybackError::SessionClosed)?
    }

    pub async fn load(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<PlaybackSnapshot, PlaybackError> {
        self.send(PlaybackCommand::Load {
            title: title.into(),
            content: content.into(),
        })
        .await
    }

    pub async fn play(&self) -> Result<PlaybackSnapshot, PlaybackError> {
        self.send(PlaybackCommand::Play).await
    }

    pub async fn pause(&self) -> Result<PlaybackSnapshot, PlaybackError> {
        self.send(PlaybackCommand::Pause).await
    }

    pub async fn stop(&self) -> Result<PlaybackSnapshot, PlaybackError> {
        self.send(PlaybackCommand::Stop).await
    }

    pub async fn seek(&self, index: i64) -> Result<PlaybackSnapshot, PlaybackError> {
        self.send(PlaybackCommand::Seek(index)).await
    }

    pub async fn skip_forward(&self) -> Result<PlaybackSnapshot, PlaybackError> {
        self.send(PlaybackCommand::SkipForward).await
    }

    pub async fn skip_backward(&self) -> Result<PlaybackSnapshot, PlaybackError> {
        self.send(PlaybackCommand::SkipBackward).await
    }

    pub async fn set_rate(&self, rate: f64) -> Result<PlaybackSnapshot, PlaybackError> {
        self.send(PlaybackCommand::SetRate(rate)).await
    }

    pub async fn set_voice(
        &self,
        voice_id: impl Into<String>,
    ) -> Result<PlaybackSnapshot, PlaybackError> {
        self.send(PlaybackCommand::SetVoice(voice_id.into())).await
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshots.clone()
    }

    /// Close the command channel and wait for the loop to tear down
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        if let Err(e) = task.await {
            tracing::error!(error = %e, "Playback session task failed");
        }
    }
}

async fn run<E: SpeechEngine>(
    mut sync: PlaybackSynchronizer<E>,
    mut commands: mpsc::Receiver<Envelope>,
    mut signals: EngineSignalReceiver,
    snapshots: watch::Sender<PlaybackSnapshot>,
) {
    let mut ticker: Option<(u64, Interval)> = None;
    let mut signals_open = true;

    loop {
        tokio::select! {
            envelope = commands.recv() => {
                let Some(Envelope { command, reply }) = envelope else {
                    break;
                };
                let result = apply(&mut sync, command).map(|_| sync.snapshot());
                // The caller may have stopped waiting
                let _ = reply.send(result);
            }
            signal = signals.recv(), if signals_open => {
                match signal {
                    Some(signal) => {
                        sync.handle_signal(signal);
                    }
                    None => {
                        tracing::debug!("Speech engine signal channel closed");
                        signals_open = false;
                    }
                }
            }
            _ = next_tick(&mut ticker) => {
                sync.tick();
            }
        }

        resync_ticker(&sync, &mut ticker);
        publish(&snapshots, sync.snapshot());
    }

    sync.teardown();
    snapshots.send_replace(sync.snapshot());
    tracing::debug!("Playback session closed");
}

fn apply<E: SpeechEngine>(
    sync: &mut PlaybackSynchronizer<E>,
    command: PlaybackCommand,
) -> Result<(), PlaybackError> {
    match command {
        PlaybackCommand::Load { title, content } => {
            sync.load(&content, &title);
            Ok(())
        }
        PlaybackCommand::Play => sync.play(),
        PlaybackCommand::Pause => sync.pause(),
        PlaybackCommand::Stop => sync.stop(),
        PlaybackCommand::Seek(index) => {
            sync.seek(index);
            Ok(())
        }
        PlaybackCommand::SkipForward => {
            sync.skip_forward();
            Ok(())
        }
        PlaybackCommand::SkipBackward => {
            sync.skip_backward();
            Ok(())
        }
        PlaybackCommand::SetRate(rate) => sync.set_rate(rate),
        PlaybackCommand::SetVoice(voice_id) => sync.set_voice(&voice_id),
    }
}

fn publish(snapshots: &watch::Sender<PlaybackSnapshot>, next: PlaybackSnapshot) {
    snapshots.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        *current = next;
        true
    });
}

async fn next_tick(ticker: &mut Option<(u64, Interval)>) {
    match ticker {
        Some((_, interval)) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Keep the interval in line with the synchronizer's timer. A new epoch
/// means the timer was restarted and the first tick is one period away.
fn resync_ticker<E: SpeechEngine>(
    sync: &PlaybackSynchronizer<E>,
    ticker: &mut Option<(u64, Interval)>,
) {
    if !sync.timer_running() {
        *ticker = None;
        return;
    }

    let epoch = sync.timer_epoch();
    if matches!(ticker, Some((current, _)) if *current == epoch) {
        return;
    }

    let period = sync.timer_interval();
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    *ticker = Some((epoch, interval));
}
