//! glyph_studio: interactive entry point.
//!
//! ```text
//! glyph_studio [--quick] [--config FILE] [--replay FILE] [--export-dir DIR]
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use gesture_edit::SessionConfig;
use glyph_studio::app::{run, AppConfig, SourceKind};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Glyph Studio: Gesture-Driven Glyph Editor           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut quick = false;
    let mut cfg = AppConfig::default();
    let mut it = std::env::args().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--quick"  => quick = true,
            "--config" => {
                let path = it.next().context("--config needs a file")?;
                cfg.session = SessionConfig::load(&path)?;
            }
            "--replay" => {
                let path = it.next().context("--replay needs a file")?;
                cfg.source = SourceKind::Replay(PathBuf::from(path));
            }
            "--export-dir" => {
                let dir = it.next().context("--export-dir needs a directory")?;
                cfg.export_dir = PathBuf::from(dir);
            }
            other => bail!("unknown argument {}", other),
        }
    }

    match &cfg.source {
        SourceKind::Replay(path) => println!("  Mode: Replay of {}", path.display()),
        SourceKind::Simulated    => println!("  Mode: Keyboard simulation  (use --features leap for hardware)"),
        #[cfg(feature = "leap")]
        SourceKind::Leap         => println!("  Mode: LeapMotion hardware"),
    }
    println!();

    if quick {
        println!("  Quick-start: history 5, pinch 0.05, glide 10%, export to {}\n",
                 cfg.export_dir.display());
    } else {
        configure_interactively(&mut cfg);
    }

    println!();
    println!("  Opening visualizer window…");
    println!();

    run(cfg)
}

fn configure_interactively(cfg: &mut AppConfig) {
    let c = &mut cfg.session.classifier;
    c.history_len = read_line(&format!("  Stabiliser history, frames (default {}): ", c.history_len))
        .trim().parse().unwrap_or(c.history_len).clamp(1, 60);
    c.pinch_threshold = read_line(&format!("  Pinch threshold (default {}): ", c.pinch_threshold))
        .trim().parse().unwrap_or(c.pinch_threshold).clamp(0.01, 0.2);

    let m = &mut cfg.session.mapper;
    m.glide_rate = read_line(&format!("  Reset glide per frame 0–1 (default {}): ", m.glide_rate))
        .trim().parse().unwrap_or(m.glide_rate).clamp(0.01, 1.0);

    let dir = read_line(&format!("  Export directory (default {}): ", cfg.export_dir.display()));
    if !dir.trim().is_empty() {
        cfg.export_dir = PathBuf::from(dir.trim());
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
