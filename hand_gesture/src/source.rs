//! Landmark sources: anything that produces one optional hand per tick.
//!
//! The public interface is `Option<LandmarkFrame>` delivered over an `mpsc`
//! channel, `None` meaning "no hand this frame".  Consumers don't need to know
//! whether frames came from a recording, a script or live hardware.
//!
//! ## Recording format
//!
//! One JSON document per line, as written by a MediaPipe helper process:
//!
//! ```text
//! {"landmarks": [[0.5, 0.8, 0.0], [0.45, 0.76, 0.0], ...]}   // 21 points
//! {"landmarks": [{"x": 0.5, "y": 0.8, "z": 0.0}, ...]}       // also accepted
//! {"landmarks": null}                                        // no hand
//! null                                                       // no hand
//! ```

use std::io::{BufRead, ErrorKind};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;

use crate::landmark::{FrameError, LandmarkFrame, Point3};

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver landmark frames over a channel.
pub trait LandmarkSource: Send + 'static {
    /// Produce frames until exhausted or until the receiver hangs up.
    fn run(self: Box<Self>, tx: Sender<Option<LandmarkFrame>>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<Option<LandmarkFrame>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedSource
// ════════════════════════════════════════════════════════════════════════════

/// Plays a fixed list of frames, optionally paced.
pub struct ScriptedSource {
    pub frames:   Vec<Option<LandmarkFrame>>,
    pub interval: Option<Duration>,
}

impl ScriptedSource {
    pub fn new(frames: Vec<Option<LandmarkFrame>>) -> Self {
        ScriptedSource { frames, interval: None }
    }
}

impl LandmarkSource for ScriptedSource {
    fn run(self: Box<Self>, tx: Sender<Option<LandmarkFrame>>) {
        for frame in self.frames {
            if tx.send(frame).is_err() { return; }
            if let Some(d) = self.interval {
                thread::sleep(d);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// JsonLinesSource
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Triple([f32; 3]),
    Pair([f32; 2]),
    Object(Point3),
}

impl From<RawPoint> for Point3 {
    fn from(raw: RawPoint) -> Self {
        match raw {
            RawPoint::Triple([x, y, z]) => Point3::new(x, y, z),
            RawPoint::Pair([x, y])      => Point3::new(x, y, 0.0),
            RawPoint::Object(p)         => p,
        }
    }
}

#[derive(Deserialize)]
struct RawDetection {
    #[serde(default)]
    landmarks: Option<Vec<RawPoint>>,
}

/// Parse one recording line.  `Ok(None)` means "no hand".
pub fn parse_frame_line(line: &str) -> Result<Option<LandmarkFrame>, FrameError> {
    let detection: Option<RawDetection> = serde_json::from_str(line)?;
    match detection.and_then(|d| d.landmarks) {
        None         => Ok(None),
        Some(points) => {
            let points: Vec<Point3> = points.into_iter().map(Point3::from).collect();
            LandmarkFrame::from_slice(&points).map(Some)
        }
    }
}

/// Streams a JSON-lines recording.  Blank lines are ignored; malformed lines
/// are logged and skipped so one bad frame doesn't end a session.
pub struct JsonLinesSource<R> {
    reader:   R,
    interval: Option<Duration>,
}

impl<R: BufRead + Send + 'static> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        JsonLinesSource { reader, interval: None }
    }

    /// Sleep this long after each frame, to replay at capture rate.
    pub fn paced(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }
}

impl<R: BufRead + Send + 'static> LandmarkSource for JsonLinesSource<R> {
    fn run(self: Box<Self>, tx: Sender<Option<LandmarkFrame>>) {
        let JsonLinesSource { reader, interval } = *self;
        let mut sent = 0usize;
        for (n, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(l)  => l,
                // The undecodable bytes are already consumed.
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    warn!("landmark recording: skipping line {}: {}", n + 1, e);
                    continue;
                }
                Err(e) => {
                    warn!("landmark recording: read failed at line {}: {}", n + 1, e);
                    break;
                }
            };
            if line.trim().is_empty() { continue; }

            let frame = match parse_frame_line(&line) {
                Ok(f)  => f,
                Err(e) => {
                    warn!("landmark recording: skipping line {}: {}", n + 1, e);
                    continue;
                }
            };
            if tx.send(frame).is_err() { return; }
            sent += 1;
            if let Some(d) = interval {
                thread::sleep(d);
            }
        }
        debug!("landmark recording: {} frames delivered", sent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::Joint;
    use std::io::Cursor;

    fn triple_line(x0: f32) -> String {
        let pts: Vec<String> = (0..21).map(|i| format!("[{}, {}, 0.0]", x0 + i as f32 * 0.01, 0.5)).collect();
        format!("{{\"landmarks\": [{}]}}", pts.join(", "))
    }

    #[test]
    fn parse_triples() {
        let f = parse_frame_line(&triple_line(0.1)).unwrap().unwrap();
        assert!((f[Joint::IndexTip].x - 0.18).abs() < 1e-6);
        assert_eq!(f[Joint::IndexTip].y, 0.5);
    }

    #[test]
    fn parse_objects_without_z() {
        let pts: Vec<String> = (0..21).map(|_| "{\"x\": 0.25, \"y\": 0.75}".to_string()).collect();
        let line = format!("{{\"landmarks\": [{}]}}", pts.join(","));
        let f = parse_frame_line(&line).unwrap().unwrap();
        assert_eq!(f[Joint::Wrist], Point3::new(0.25, 0.75, 0.0));
    }

    #[test]
    fn parse_no_hand() {
        assert_eq!(parse_frame_line("null").unwrap(), None);
        assert_eq!(parse_frame_line("{\"landmarks\": null}").unwrap(), None);
        assert_eq!(parse_frame_line("{}").unwrap(), None);
    }

    #[test]
    fn parse_rejects_short_frames_and_garbage() {
        let line = "{\"landmarks\": [[0.1, 0.2, 0.3]]}";
        assert!(matches!(parse_frame_line(line), Err(FrameError::WrongLength(1))));
        assert!(matches!(parse_frame_line("{not json"), Err(FrameError::Json(_))));
    }

    #[test_log::test]
    fn json_lines_skips_bad_lines() {
        let text = format!("{}\n\nnot json\nnull\n{}\n", triple_line(0.1), triple_line(0.2));
        let rx = spawn_landmark_source(JsonLinesSource::new(Cursor::new(text.into_bytes())));
        let frames: Vec<_> = rx.iter().collect();
        assert_eq!(frames.len(), 3);
        assert!(frames[0].is_some());
        assert!(frames[1].is_none());
        assert!(frames[2].is_some());
    }

    #[test_log::test]
    fn json_lines_skips_undecodable_lines() {
        let mut bytes = format!("{}\n", triple_line(0.1)).into_bytes();
        bytes.extend_from_slice(b"\xff\xfe garbage\n");
        bytes.extend_from_slice(format!("{}\nnull\n", triple_line(0.2)).as_bytes());
        let rx = spawn_landmark_source(JsonLinesSource::new(Cursor::new(bytes)));
        let frames: Vec<_> = rx.iter().collect();
        assert_eq!(frames.len(), 3);
        assert!(frames[0].is_some());
        assert!(frames[1].is_some());
        assert!(frames[2].is_none());
    }

    #[test]
    fn scripted_source_plays_in_order() {
        let a = crate::pose::open_hand();
        let rx = spawn_landmark_source(ScriptedSource::new(vec![Some(a), None]));
        let frames: Vec<_> = rx.iter().collect();
        assert_eq!(frames, vec![Some(a), None]);
    }
}
