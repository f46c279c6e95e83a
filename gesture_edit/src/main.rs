//! gesture_replay: run a landmark recording through a gesture session and
//! print every event as one JSON line.
//!
//! ```text
//! gesture_replay [FILE] [--config FILE]
//! ```
//!
//! Reads stdin when no file is given.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{bail, Context, Result};
use gesture_edit::{GestureSession, SessionConfig};
use hand_gesture::{spawn_landmark_source, JsonLinesSource};
use log::info;

struct Args {
    input:  Option<String>,
    config: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args { input: None, config: None };
    let mut it = std::env::args().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--config" => {
                args.config = Some(it.next().context("--config needs a file")?);
            }
            s if s.starts_with("--") => bail!("unknown option {}", s),
            _ if args.input.is_none() => args.input = Some(a),
            _ => bail!("more than one input file given"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None       => SessionConfig::default(),
    };

    let reader: Box<dyn BufRead + Send> = match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open {}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let rx = spawn_landmark_source(JsonLinesSource::new(reader));
    let mut session = GestureSession::new(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut frames = 0usize;
    let mut events = 0usize;
    for frame in rx {
        frames += 1;
        for event in session.process_frame(frame.as_ref()) {
            serde_json::to_writer(&mut out, &event)?;
            writeln!(out)?;
            events += 1;
        }
    }
    out.flush()?;

    let edit = session.edit_state();
    info!(
        "{} frames, {} events; final letter {} scale {:.2} rotation {:.2} distortion {:.1}",
        frames, events, session.glyph().letter(),
        edit.scale(), edit.rotation(), edit.distortion(),
    );
    Ok(())
}
