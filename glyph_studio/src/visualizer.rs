//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┬─────────────┐
//! │                                                      │  HAND       │
//! │      grid + faint letter                             │  [skeleton] │
//! │                                                      │  gesture    │
//! │           ┌──  glyph outline with                    │  scores     │
//! │           │    control points                        │  EDIT       │
//! │           └──                                        │  bars       │
//! │                                                      │  LETTERS    │
//! │                                                      │  LOG        │
//! ├──────────────────────────────────────────────────────┴─────────────┤
//! │  status bar / key legend                                           │
//! └────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;

use anyhow::anyhow;
use gesture_edit::{DISTORTION_MAX, LETTER_COUNT, SCALE_MAX, SCALE_MIN};
use glyph_outline::{GlyphModel, ALPHABET};
use hand_gesture::geometry::palm_center;
use hand_gesture::{GestureKind, Joint, LandmarkFrame, HAND_SKELETON};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::app::{AppState, Command};
use crate::source::{SimInput, SimKey, SimPose};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const CANVAS_W:    usize = 800;
pub const CANVAS_H:    usize = 600;
const PANEL_W:         usize = 260;
const STATUS_H:        usize = 40;
pub const WIN_W:       usize = CANVAS_W + PANEL_W;
pub const WIN_H:       usize = CANVAS_H + STATUS_H;
const PANEL_X:         usize = CANVAS_W;
const GRID_STEP:       usize = 40;
const HAND_BOX:        usize = 160;
const BAR_W:           usize = 150;
const CURVE_STEPS:     usize = 12;

const BG_COLOR:        u32   = 0xFF1A1A2E;
const GRID_COLOR:      u32   = 0xFF22223A;
const PANEL_BG:        u32   = 0xFF16213E;
const TEXT_BG:         u32   = 0xFF0F3460;
const OUTLINE_COLOR:   u32   = 0xFFEEEEEE;
const POINT_COLOR:     u32   = 0xFF3FA9F5;
const SELECTED_COLOR:  u32   = 0xFFFF5A5A;
const ACCENT:          u32   = 0xFFFFD700;  // gold
const DIM_TEXT:        u32   = 0xFF888888;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    /// Present only when the simulated hand is the landmark source.
    sim_tx: Option<Sender<SimInput>>,
}

impl Visualizer {
    pub fn new(sim_tx: Option<Sender<SimInput>>) -> anyhow::Result<Self> {
        let mut window = Window::new(
            "Glyph Studio: gesture glyph editor",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| anyhow!("cannot open window: {}", e))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll the keyboard.  Session commands are returned; hand keys go to
    /// the simulated source when there is one.
    pub fn poll_input(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if !self.window.is_open() {
            commands.push(Command::Quit);
            return commands;
        }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let held     = |k: Key| self.window.is_key_pressed(k, KeyRepeat::Yes);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            commands.push(Command::Quit);
        }
        if one_shot(Key::N)      { commands.push(Command::NextLetter); }
        if one_shot(Key::P)      { commands.push(Command::PreviousLetter); }
        if one_shot(Key::R)      { commands.push(Command::Reset); }
        if one_shot(Key::E)      { commands.push(Command::Export); }

        let mut keys = Vec::new();
        for (key, pose) in [
            (Key::Key0, SimPose::Away),
            (Key::Key9, SimPose::Relaxed),
            (Key::Key1, SimPose::Point),
            (Key::Key2, SimPose::Pinch),
            (Key::Key3, SimPose::Fist),
            (Key::Key4, SimPose::Open),
            (Key::Key5, SimPose::TwoFingers),
        ] {
            if one_shot(key) { keys.push(SimKey::Pose(pose)); }
        }
        for (key, sim) in [
            (Key::I, SimKey::Up),
            (Key::K, SimKey::Down),
            (Key::J, SimKey::Left),
            (Key::L, SimKey::Right),
            (Key::W, SimKey::Wider),
            (Key::S, SimKey::Narrower),
            (Key::A, SimKey::TurnLeft),
            (Key::D, SimKey::TurnRight),
        ] {
            if held(key) { keys.push(sim); }
        }
        if commands.contains(&Command::Quit) {
            keys.push(SimKey::Quit);
        }

        if let Some(tx) = &self.sim_tx {
            for key in keys {
                let _ = tx.send(SimInput::KeyDown(key));
            }
        }
        commands
    }

    /// Render one frame.
    pub fn render(&mut self, app: &AppState) {
        let session = app.session();
        self.buf.fill(BG_COLOR);

        // ── Canvas ────────────────────────────────────────────────────────
        self.draw_grid();
        self.draw_ghost_letter(session.glyph().letter());
        self.draw_glyph(session.glyph());
        if let Some(hand) = session.hand() {
            self.draw_gesture_overlay(session.stable_gesture(), hand);
        }

        // ── Side panel ────────────────────────────────────────────────────
        self.fill_rect(PANEL_X, 0, PANEL_W, CANVAS_H, PANEL_BG);
        let x = PANEL_X + 10;

        self.draw_label("HAND", x, 10, ACCENT);
        self.draw_hand(session.hand(), x, 22);

        let mut y = 22 + HAND_BOX + 10;
        self.draw_label(&format!("gesture: {}", session.stable_gesture()), x, y, OUTLINE_COLOR);
        y += 10;
        self.draw_label(&format!("raw: {}   mode: {}", session.raw_gesture(), session.mode()), x, y, DIM_TEXT);
        y += 12;
        for (kind, score) in session.scores().iter() {
            let color = if kind == session.stable_gesture() { ACCENT } else { POINT_COLOR };
            self.draw_label(kind.as_str(), x, y, DIM_TEXT);
            self.draw_bar(x + 90, y, score, color);
            y += 9;
        }

        y += 8;
        self.draw_label("EDIT", x, y, ACCENT);
        y += 12;
        let edit = session.edit_state();
        let rows = [
            ("scale",      edit.scale(),      (edit.scale() - SCALE_MIN) / (SCALE_MAX - SCALE_MIN)),
            ("rotation",   edit.rotation(),   0.5 + edit.rotation() / (2.0 * std::f32::consts::PI)),
            ("distortion", edit.distortion(), edit.distortion() / DISTORTION_MAX),
            ("smoothness", edit.smoothness(), edit.smoothness()),
        ];
        for (name, value, fill) in rows {
            self.draw_label(&format!("{} {:.2}", name, value), x, y, DIM_TEXT);
            self.draw_bar(x + 90, y, fill, POINT_COLOR);
            y += 9;
        }

        y += 8;
        self.draw_label("LETTERS", x, y, ACCENT);
        y += 12;
        self.draw_wheel(session.wheel().index(), x, y);
        y += 30;

        self.draw_label("LOG", x, y, ACCENT);
        y += 12;
        let log: Vec<String> = app.log().iter().rev().cloned().collect();
        for line in log {
            if y + 8 > CANVAS_H { break; }
            self.draw_label(&line, x, y, DIM_TEXT);
            y += 8;
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, CANVAS_H, WIN_W, STATUS_H, TEXT_BG);
        let live = if app.source_live() { "" } else { "  [input ended]" };
        self.draw_label(&format!("{}{}", app.status, live), 10, CANVAS_H + 8, 0xFFEEEEEE);

        // ── Key legend ────────────────────────────────────────────────────
        let legend = if self.sim_tx.is_some() {
            "0=away 9=relaxed 1=point 2=pinch 3=fist 4=open 5=two  IJKL=move WS=size AD=turn  N/P=letter R=reset E=export Q=quit"
        } else {
            "N/P=letter  R=reset  E=export  Q=quit"
        };
        self.draw_label(legend, 10, WIN_H - 14, DIM_TEXT);

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Canvas ────────────────────────────────────────────────────────────

    fn draw_grid(&mut self) {
        for gx in (0..CANVAS_W).step_by(GRID_STEP) {
            self.fill_rect(gx, 0, 1, CANVAS_H, GRID_COLOR);
        }
        for gy in (0..CANVAS_H).step_by(GRID_STEP) {
            self.fill_rect(0, gy, CANVAS_W, 1, GRID_COLOR);
        }
    }

    /// The plain letter, blown up behind the outline.
    fn draw_ghost_letter(&mut self, letter: char) {
        const CELL: usize = 40;
        let color = blend(BG_COLOR, OUTLINE_COLOR, 0.06);
        let x0 = CANVAS_W / 2 - 3 * CELL / 2;
        let y0 = CANVAS_H / 2 - 5 * CELL / 2;
        for (row, &bits) in char_glyph(letter).iter().enumerate() {
            for col in 0..3usize {
                if bits & (1 << (2 - col)) != 0 {
                    self.fill_rect(x0 + col * CELL, y0 + row * CELL, CELL, CELL, color);
                }
            }
        }
    }

    fn draw_glyph(&mut self, glyph: &GlyphModel) {
        let (cw, ch) = glyph.canvas_size();
        let sx = CANVAS_W as f32 / cw.max(1.0);
        let sy = CANVAS_H as f32 / ch.max(1.0);
        // Dragged points follow the finger, which may leave the canvas.
        let (lim_x, lim_y) = (2.0 * CANVAS_W as f32, 2.0 * CANVAS_H as f32);
        let to_px = |x: f32, y: f32| {
            ((x * sx).clamp(-lim_x, lim_x) as isize, (y * sy).clamp(-lim_y, lim_y) as isize)
        };

        let points = glyph.points();
        let Some(first) = points.first() else { return };

        let (mut px, mut py) = (first.current_x, first.current_y);
        for p in points.iter().skip(1) {
            match glyph.current_handle(p) {
                None => {
                    let (a, b) = (to_px(px, py), to_px(p.current_x, p.current_y));
                    self.draw_line(a, b, OUTLINE_COLOR);
                }
                Some((hx, hy)) => {
                    let mut prev = to_px(px, py);
                    for step in 1..=CURVE_STEPS {
                        let t = step as f32 / CURVE_STEPS as f32;
                        let u = 1.0 - t;
                        let qx = u * u * px + 2.0 * u * t * hx + t * t * p.current_x;
                        let qy = u * u * py + 2.0 * u * t * hy + t * t * p.current_y;
                        let next = to_px(qx, qy);
                        self.draw_line(prev, next, OUTLINE_COLOR);
                        prev = next;
                    }
                }
            }
            px = p.current_x;
            py = p.current_y;
        }
        self.draw_line(to_px(px, py), to_px(first.current_x, first.current_y), OUTLINE_COLOR);

        for p in points {
            let (x, y) = to_px(p.current_x, p.current_y);
            let (r, color) = if p.selected { (4, SELECTED_COLOR) } else { (2, POINT_COLOR) };
            if x >= r && y >= r {
                let side = (2 * r + 1) as usize;
                self.fill_rect((x - r) as usize, (y - r) as usize, side, side, color);
            }
        }
    }

    /// Marker for the stable gesture, drawn over the canvas.
    fn draw_gesture_overlay(&mut self, gesture: GestureKind, hand: &LandmarkFrame) {
        let at = |j: Joint| canvas_px(hand[j].x, hand[j].y);
        match gesture {
            GestureKind::Point => {
                let (x, y) = at(Joint::IndexTip);
                self.draw_line((x - 8, y), (x + 8, y), ACCENT);
                self.draw_line((x, y - 8), (x, y + 8), ACCENT);
                self.plot_all(&circle_points((x, y), 15, None), OUTLINE_COLOR);
            }
            GestureKind::Pinch => {
                self.draw_line(at(Joint::ThumbTip), at(Joint::IndexTip), OUTLINE_COLOR);
            }
            GestureKind::Fist => {
                self.plot_all(&circle_points(at(Joint::Wrist), 30, None), OUTLINE_COLOR);
            }
            GestureKind::Open => {
                let palm = palm_center(hand);
                let dashed = circle_points(canvas_px(palm.x, palm.y), 40, Some(5));
                self.plot_all(&dashed, OUTLINE_COLOR);
            }
            GestureKind::TwoFingers | GestureKind::None => {}
        }
    }

    fn plot_all(&mut self, points: &[(isize, isize)], color: u32) {
        for &(x, y) in points {
            self.set_pixel(x, y, color);
        }
    }

    // ── Side panel ────────────────────────────────────────────────────────

    fn draw_hand(&mut self, hand: Option<&LandmarkFrame>, x: usize, y: usize) {
        self.fill_rect(x, y, HAND_BOX, HAND_BOX, BG_COLOR);
        self.draw_border(x, y, HAND_BOX, HAND_BOX, GRID_COLOR);
        let Some(hand) = hand else {
            self.draw_label("no hand", x + HAND_BOX / 2 - 14, y + HAND_BOX / 2, DIM_TEXT);
            return;
        };

        let to_px = |j: Joint| {
            let p = hand[j];
            let px = x as f32 + p.x.clamp(0.0, 1.0) * (HAND_BOX - 1) as f32;
            let py = y as f32 + p.y.clamp(0.0, 1.0) * (HAND_BOX - 1) as f32;
            (px as isize, py as isize)
        };
        for &(a, b) in HAND_SKELETON.iter() {
            self.draw_line(to_px(a), to_px(b), POINT_COLOR);
        }
        for &j in Joint::ALL.iter() {
            let (px, py) = to_px(j);
            self.fill_rect(px.max(1) as usize - 1, py.max(1) as usize - 1, 3, 3, OUTLINE_COLOR);
        }
    }

    fn draw_bar(&mut self, x: usize, y: usize, fill: f32, color: u32) {
        let w = (fill.clamp(0.0, 1.0) * BAR_W as f32) as usize;
        self.fill_rect(x, y, BAR_W, 6, TEXT_BG);
        self.fill_rect(x, y, w, 6, color);
    }

    /// The alphabet in two rows of 13, current letter boxed.
    fn draw_wheel(&mut self, current: usize, x: usize, y: usize) {
        const CELL: usize = 18;
        for (i, &letter) in ALPHABET.iter().enumerate().take(LETTER_COUNT) {
            let cx = x + (i % 13) * CELL;
            let cy = y + (i / 13) * 12;
            if i == current {
                self.fill_rect(cx, cy, CELL - 4, 10, ACCENT);
                self.draw_label(&letter.to_string(), cx + 5, cy + 2, 0xFF000000);
            } else {
                self.draw_label(&letter.to_string(), cx + 5, cy + 2, DIM_TEXT);
            }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(WIN_H) {
            for col in x..(x+w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        for col in x..(x+w).min(WIN_W) {
            if y < WIN_H           { self.buf[y           * WIN_W + col] = color; }
            if y+h-1 < WIN_H       { self.buf[(y+h-1)     * WIN_W + col] = color; }
        }
        for row in y..(y+h).min(WIN_H) {
            if x < WIN_W           { self.buf[row * WIN_W + x    ] = color; }
            if x+w-1 < WIN_W       { self.buf[row * WIN_W + x+w-1] = color; }
        }
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    /// Bresenham; off-window pixels are dropped.
    fn draw_line(&mut self, from: (isize, isize), to: (isize, isize), color: u32) {
        let (mut x, mut y) = from;
        let dx =  (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x, y, color);
            if x == to.0 && y == to.1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Minimal bitmap font: 3×5 characters.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel((cx + col) as isize, (y + row) as isize, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '[' => [0b110, 0b100, 0b100, 0b100, 0b110],
        ']' => [0b011, 0b001, 0b001, 0b001, 0b011],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Normalised image coordinates to canvas pixels, clamped to the canvas.
fn canvas_px(x: f32, y: f32) -> (isize, isize) {
    let x = if x.is_finite() { x.clamp(0.0, 1.0) } else { 0.0 };
    let y = if y.is_finite() { y.clamp(0.0, 1.0) } else { 0.0 };
    ((x * CANVAS_W as f32) as isize, (y * CANVAS_H as f32) as isize)
}

/// Pixels of a circle outline, one per pixel of arc.  With `dash = Some(n)`
/// runs of `n` pixels alternate on and off.
fn circle_points(center: (isize, isize), r: usize, dash: Option<usize>) -> Vec<(isize, isize)> {
    let steps = ((2.0 * std::f32::consts::PI * r as f32).ceil() as usize).max(1);
    (0..steps)
        .filter(|i| dash.map_or(true, |n| (i / n.max(1)) % 2 == 0))
        .map(|i| {
            let a = i as f32 / steps as f32 * 2.0 * std::f32::consts::PI;
            let (sin, cos) = a.sin_cos();
            (center.0 + (cos * r as f32).round() as isize, center.1 + (sin * r as f32).round() as isize)
        })
        .collect()
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0-t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar,br) << 16) | (lerp(ag,bg) << 8) | lerp(ab,bb)
}
