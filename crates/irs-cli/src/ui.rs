use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use irsscreen::engine::progress::{Progress, ProgressCallback};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tracing::warn;

const UI_CHANNEL_CAPACITY: usize = 1024;
const SPINNER_TICK_MS: u64 = 80;

#[derive(Debug)]
pub enum UiEvent {
    Progress(Progress),
    Log(String),
}

/// Owns the terminal while a command runs: draws the phase spinner or evaluation bar and
/// prints log lines above it.
pub struct UiManager {
    mp: Arc<MultiProgress>,
    phase: PhaseState,
    event_receiver: mpsc::Receiver<UiEvent>,
    shutdown_receiver: watch::Receiver<bool>,
    _sentinel_bar: ProgressBar,
}

#[derive(Default)]
struct PhaseState {
    bar: Option<ProgressBar>,
    name: String,
    started: Option<Instant>,
}

impl UiManager {
    pub fn new() -> (Self, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (event_sender, event_receiver) = mpsc::channel(UI_CHANNEL_CAPACITY);
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);
        let mp = Arc::new(MultiProgress::new());
        mp.set_draw_target(ProgressDrawTarget::stderr_with_hz(12));
        let _sentinel_bar = mp.add(ProgressBar::hidden());
        let manager = Self {
            mp,
            phase: PhaseState::default(),
            event_receiver,
            shutdown_receiver,
            _sentinel_bar,
        };

        (manager, event_sender, shutdown_sender)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(event) = self.event_receiver.recv() => {
                    self.handle_event(event);
                }
                result = self.shutdown_receiver.changed() => {
                    if result.is_err() || *self.shutdown_receiver.borrow() {
                        break;
                    }
                }
            }
        }
        // Drain whatever was queued before shutdown so no log line is lost.
        while let Ok(event) = self.event_receiver.try_recv() {
            self.handle_event(event);
        }
        if let Some(bar) = self.phase.bar.take() {
            bar.finish_and_clear();
        }
        self._sentinel_bar.finish_and_clear();
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Log(msg) => {
                self.mp.println(msg).ok();
            }
            UiEvent::Progress(progress) => self.handle_progress(progress),
        }
    }

    fn handle_progress(&mut self, progress: Progress) {
        match progress {
            Progress::PhaseStart { name } => {
                if let Some(bar) = self.phase.bar.take() {
                    bar.finish_and_clear();
                }

                let pb = self.mp.add(ProgressBar::new_spinner());
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                pb.set_style(Self::spinner_style());
                pb.set_message(name);

                self.phase = PhaseState {
                    bar: Some(pb),
                    name: name.to_string(),
                    started: Some(Instant::now()),
                };
            }
            Progress::PhaseFinish => {
                if let Some(bar) = self.phase.bar.take() {
                    bar.finish_and_clear();
                }

                let elapsed = self
                    .phase
                    .started
                    .take()
                    .map(|t| t.elapsed().as_secs_f64())
                    .unwrap_or_default();
                self.mp
                    .println(format!("✓ {} ({:.2}s)", self.phase.name, elapsed))
                    .ok();

                self.phase.name.clear();
            }
            Progress::TaskStart { total } => {
                if let Some(bar) = self.phase.bar.as_ref() {
                    bar.disable_steady_tick();
                    bar.set_style(Self::bar_style());
                    bar.set_length(total);
                    bar.set_position(0);
                }
            }
            Progress::TaskIncrement { amount } => {
                if let Some(bar) = self.phase.bar.as_ref() {
                    bar.inc(amount);
                }
            }
            Progress::TaskFinish => {
                if let Some(bar) = self.phase.bar.as_ref() {
                    bar.finish();
                }
            }
            Progress::StatusUpdate { text } => {
                if let Some(bar) = self.phase.bar.as_ref() {
                    bar.set_message(format!("{} ({})", self.phase.name, text));
                }
            }
            Progress::Message(msg) => {
                self.mp.println(format!("  {}", msg)).ok();
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<45} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("━╸ ")
    }
}

/// Bridges the library's synchronous progress callback onto the UI channel.
#[derive(Clone)]
pub struct CliProgressHandler {
    sender: mpsc::Sender<UiEvent>,
}

impl CliProgressHandler {
    pub fn new(sender: mpsc::Sender<UiEvent>) -> Self {
        Self { sender }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let sender = self.sender.clone();
        Box::new(move |progress: Progress| {
            if let Err(e) = sender.try_send(UiEvent::Progress(progress)) {
                warn!("Failed to send progress update to UI channel: {}", e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_manager() -> (UiManager, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (manager, sender, shutdown) = UiManager::new();
        manager.mp.set_draw_target(ProgressDrawTarget::hidden());
        (manager, sender, shutdown)
    }

    fn start_phase(manager: &mut UiManager, name: &'static str) {
        manager.handle_event(UiEvent::Progress(Progress::PhaseStart { name }));
    }

    #[test]
    fn phase_start_creates_spinner_with_phase_name() {
        let (mut manager, _, _) = setup_manager();
        assert!(manager.phase.bar.is_none());

        start_phase(&mut manager, "Generating Candidates");

        let bar = manager.phase.bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Generating Candidates");
        assert_eq!(manager.phase.name, "Generating Candidates");
        assert!(manager.phase.started.is_some());
    }

    #[test]
    fn next_phase_replaces_previous_bar() {
        let (mut manager, _, _) = setup_manager();
        start_phase(&mut manager, "Generating Candidates");
        start_phase(&mut manager, "Evaluating Candidates");

        assert_eq!(
            manager.phase.bar.as_ref().unwrap().message(),
            "Evaluating Candidates"
        );
    }

    #[test]
    fn phase_finish_clears_state() {
        let (mut manager, _, _) = setup_manager();
        start_phase(&mut manager, "Ranking");

        manager.handle_event(UiEvent::Progress(Progress::PhaseFinish));

        assert!(manager.phase.bar.is_none());
        assert!(manager.phase.name.is_empty());
        assert!(manager.phase.started.is_none());
    }

    #[test]
    fn evaluation_task_drives_the_bar() {
        let (mut manager, _, _) = setup_manager();
        start_phase(&mut manager, "Evaluating Candidates");

        manager.handle_event(UiEvent::Progress(Progress::TaskStart { total: 45 }));
        {
            let bar = manager.phase.bar.as_ref().unwrap();
            assert_eq!(bar.length(), Some(45));
            assert_eq!(bar.position(), 0);
        }

        for _ in 0..3 {
            manager.handle_event(UiEvent::Progress(Progress::TaskIncrement { amount: 1 }));
        }
        manager.handle_event(UiEvent::Progress(Progress::StatusUpdate {
            text: "candidate 4/45".into(),
        }));
        {
            let bar = manager.phase.bar.as_ref().unwrap();
            assert_eq!(bar.position(), 3);
            assert_eq!(bar.message(), "Evaluating Candidates (candidate 4/45)");
        }

        manager.handle_event(UiEvent::Progress(Progress::TaskFinish));
        assert!(manager.phase.bar.as_ref().unwrap().is_finished());
    }

    #[test]
    fn task_events_without_a_phase_are_ignored() {
        let (mut manager, _, _) = setup_manager();
        manager.handle_event(UiEvent::Progress(Progress::TaskStart { total: 10 }));
        manager.handle_event(UiEvent::Progress(Progress::TaskIncrement { amount: 1 }));
        manager.handle_event(UiEvent::Progress(Progress::TaskFinish));
        assert!(manager.phase.bar.is_none());
    }

    #[test]
    fn log_and_message_events_print_without_panicking() {
        let (mut manager, _, _) = setup_manager();
        manager.handle_event(UiEvent::Log("WARN something".to_string()));
        manager.handle_event(UiEvent::Progress(Progress::Message(
            "45 inhibition-strand candidates generated".to_string(),
        )));
    }

    #[tokio::test]
    async fn progress_handler_forwards_events() {
        let (sender, mut receiver) = mpsc::channel(1);
        let handler = CliProgressHandler::new(sender);
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Ranking" });

        match receiver.recv().await {
            Some(UiEvent::Progress(Progress::PhaseStart { name })) => assert_eq!(name, "Ranking"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn run_exits_on_shutdown_signal() {
        let (manager, sender, shutdown) = setup_manager();
        let handle = tokio::spawn(manager.run());

        sender
            .send(UiEvent::Progress(Progress::PhaseStart { name: "Ranking" }))
            .await
            .unwrap();
        sender.send(UiEvent::Log("done".to_string())).await.unwrap();
        shutdown.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("UI manager did not stop")
            .unwrap();
    }
}
