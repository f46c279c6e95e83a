//! Top-level application state.
//!
//! `AppState` owns the `GestureSession` plus the bits of UI state the window
//! shows around it: a status line and a short event log.  `run` wires a
//! landmark source and the visualizer around it.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::time::Duration;

use anyhow::Context;
use gesture_edit::{GestureSession, SessionConfig, SessionEvent, SnapshotError};
use hand_gesture::{spawn_landmark_source, JsonLinesSource, LandmarkFrame};
use log::{info, warn};

use crate::source::{SimInput, SimLandmarkSource};
use crate::visualizer::Visualizer;

/// Lines kept in the on-screen event log.
pub const LOG_LINES: usize = 12;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Where landmark frames come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Keyboard-driven synthetic hand.
    Simulated,
    /// A JSON-lines recording, one frame per line.
    Replay(PathBuf),
    #[cfg(feature = "leap")]
    Leap,
}

pub struct AppConfig {
    pub session:        SessionConfig,
    pub source:         SourceKind,
    /// Snapshots are written here.
    pub export_dir:     PathBuf,
    /// Pacing of simulated and replayed frames.
    pub frame_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            session:        SessionConfig::default(),
            #[cfg(feature = "leap")]
            source:         SourceKind::Leap,
            #[cfg(not(feature = "leap"))]
            source:         SourceKind::Simulated,
            export_dir:     PathBuf::from("."),
            frame_interval: Duration::from_millis(33),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Command
// ════════════════════════════════════════════════════════════════════════════

/// Keyboard commands that act on the session directly, bypassing gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    NextLetter,
    PreviousLetter,
    Reset,
    Export,
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    session:     GestureSession,
    export_dir:  PathBuf,

    // ── display ───────────────────────────────────────────────────────────
    pub status:  String,
    log:         VecDeque<String>,
    source_live: bool,
}

impl AppState {
    pub fn new(session: SessionConfig, export_dir: PathBuf) -> Self {
        let session = GestureSession::new(session);
        let status  = format!("Ready: editing {}", session.glyph().letter());
        AppState {
            session,
            export_dir,
            status,
            log:         VecDeque::with_capacity(LOG_LINES),
            source_live: true,
        }
    }

    // ── input ─────────────────────────────────────────────────────────────

    pub fn handle_frame(&mut self, frame: Option<LandmarkFrame>) {
        for event in self.session.process_frame(frame.as_ref()) {
            self.record(&event);
        }
    }

    /// Returns false on `Quit`.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::NextLetter => {
                let e = self.session.next_letter();
                self.record(&e);
            }
            Command::PreviousLetter => {
                let e = self.session.previous_letter();
                self.record(&e);
            }
            Command::Reset => {
                let e = self.session.reset();
                self.record(&e);
                self.status = "Reset to rest pose".to_string();
                self.push_log("reset".to_string());
            }
            Command::Export => match self.export() {
                Ok(path) => {
                    self.status = format!("Saved {}", path.display());
                    self.push_log(format!("saved {}", self.session.glyph().letter()));
                }
                Err(e) => {
                    warn!("export failed: {}", e);
                    self.status = format!("Export failed: {}", e);
                }
            },
            Command::Quit => return false,
        }
        true
    }

    pub fn export(&self) -> Result<PathBuf, SnapshotError> {
        self.session.snapshot().save_to_dir(&self.export_dir)
    }

    /// Called once the landmark source has nothing more to send.
    pub fn source_finished(&mut self) {
        if self.source_live {
            info!("landmark source finished");
            self.source_live = false;
            self.status = "Input ended; keys still work".to_string();
        }
    }

    fn record(&mut self, event: &SessionEvent) {
        let line = describe(event);
        if !matches!(event, SessionEvent::EditStateChanged { .. }) {
            self.status = line.clone();
            self.push_log(line);
        }
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    // ── accessors for the render loop ─────────────────────────────────────

    pub fn session(&self)     -> &GestureSession   { &self.session }
    pub fn log(&self)         -> &VecDeque<String> { &self.log }
    pub fn source_live(&self) -> bool              { self.source_live }
}

/// One-line text for the event log.
pub fn describe(event: &SessionEvent) -> String {
    match event {
        SessionEvent::Gesture(g) => format!("gesture {} ({:.0}%)", g.kind, g.confidence * 100.0),
        SessionEvent::EditStateChanged { scale, rotation, distortion } => {
            format!("scale {:.2} rot {:.2} dist {:.0}", scale, rotation, distortion)
        }
        SessionEvent::LetterSelected { letter, .. } => format!("letter {}", letter),
        SessionEvent::PointSelected  { id }         => format!("point {}", id),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Starts the configured landmark source on its own thread, opens the window
/// and drives the input/process/render loop until the window closes or Q is
/// pressed.  The window stays open after a replay ends.
pub fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let (frames, sim_tx) = match &cfg.source {
        SourceKind::Simulated => {
            let (tx, rx) = mpsc::channel::<SimInput>();
            let frames = spawn_landmark_source(SimLandmarkSource::new(rx, cfg.frame_interval));
            (frames, Some(tx))
        }
        SourceKind::Replay(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open recording {}", path.display()))?;
            let source = JsonLinesSource::new(BufReader::new(file)).paced(cfg.frame_interval);
            (spawn_landmark_source(source), None)
        }
        #[cfg(feature = "leap")]
        SourceKind::Leap => (spawn_landmark_source(crate::source::LeapLandmarkSource), None),
    };

    let mut vis = Visualizer::new(sim_tx)?;
    let mut app = AppState::new(cfg.session, cfg.export_dir);

    while vis.is_open() {
        // 1. Window keys
        for command in vis.poll_input() {
            if !app.handle_command(command) {
                return Ok(());
            }
        }

        // 2. Drain landmark frames
        loop {
            match frames.try_recv() {
                Ok(frame) => app.handle_frame(frame),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => {
                    app.source_finished();
                    break;
                }
            }
        }

        // 3. Render
        vis.render(&app);
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::pose;

    fn make_app() -> AppState {
        AppState::new(SessionConfig::default(), std::env::temp_dir())
    }

    #[test]
    fn letter_commands_step_the_wheel() {
        let mut app = make_app();
        assert!(app.handle_command(Command::NextLetter));
        assert!(app.handle_command(Command::NextLetter));
        assert_eq!(app.session().glyph().letter(), 'C');
        app.handle_command(Command::PreviousLetter);
        assert_eq!(app.session().glyph().letter(), 'B');
        assert_eq!(app.log().back().map(String::as_str), Some("letter B"));
    }

    #[test]
    fn quit_stops_the_loop() {
        assert!(!make_app().handle_command(Command::Quit));
    }

    #[test_log::test]
    fn frames_drive_the_session() {
        let mut app = make_app();
        for _ in 0..3 {
            app.handle_frame(Some(pose::fist(0.12)));
        }
        assert!(app.session().edit_state().distortion() > 0.0);
        assert_eq!(app.status, "gesture fist (90%)");

        app.handle_frame(None);
        assert_eq!(app.status, "gesture none (0%)");
    }

    #[test]
    fn reset_command_clears_edits() {
        let mut app = make_app();
        for _ in 0..3 {
            app.handle_frame(Some(pose::two_fingers(0.06, 0.3)));
        }
        app.handle_command(Command::Reset);
        assert_eq!(app.session().edit_state().rotation(), 0.0);
    }

    #[test]
    fn log_is_bounded() {
        let mut app = make_app();
        for _ in 0..(LOG_LINES * 2) {
            app.handle_command(Command::NextLetter);
        }
        assert_eq!(app.log().len(), LOG_LINES);
    }

    #[test_log::test]
    fn export_writes_snapshot() {
        let dir = std::env::temp_dir().join(format!("glyph_studio_export_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut app = AppState::new(SessionConfig::default(), dir.clone());
        app.handle_command(Command::Export);
        let written = dir.join("custom-glyph-A.json");
        let exists = written.exists();
        let _ = std::fs::remove_dir_all(&dir);
        assert!(exists);
        assert!(app.status.starts_with("Saved"));
    }

    #[test]
    fn export_failure_is_reported() {
        let mut app = AppState::new(SessionConfig::default(), PathBuf::from("/definitely/not/here"));
        assert!(app.handle_command(Command::Export));
        assert!(app.status.starts_with("Export failed"));
    }

    #[test]
    fn source_end_is_reported_once() {
        let mut app = make_app();
        app.source_finished();
        assert!(!app.source_live());
        app.status.clear();
        app.source_finished();
        assert!(app.status.is_empty());
    }
}
