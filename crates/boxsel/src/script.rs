// Author: Dustin Pilgrim
// License: MIT

//! Gesture scripts: one pointer or annotation command per line.
//!
//! ```text
//! # draw, then grow the bottom-right corner
//! down 10 10
//! move 110 60
//! up 110 60
//! down 110 60
//! up 130 80
//! zoom 1.5
//! border 5 outside
//! ```

use boxsel_core::{BorderPosition, Point, SelectionSession};
use eventline::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum GestureCmd {
    Down(Point),
    Move(Point),
    Up(Point),
    Zoom(f64),
    ZoomIn,
    ZoomOut,
    Border(u32, BorderPosition),
    Reset,
    Load(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub cmd: GestureCmd,
}

pub fn parse(src: &str) -> Result<Vec<ScriptLine>, String> {
    let mut out = Vec::new();

    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let cmd = parse_line(text).map_err(|e| format!("line {line}: {e}"))?;
        out.push(ScriptLine { line, cmd });
    }

    Ok(out)
}

fn parse_line(text: &str) -> Result<GestureCmd, String> {
    let (word, rest) = match text.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (text, ""),
    };

    let args: Vec<&str> = rest.split_whitespace().collect();

    match word {
        "down" => Ok(GestureCmd::Down(point(&args)?)),
        "move" => Ok(GestureCmd::Move(point(&args)?)),
        "up" => Ok(GestureCmd::Up(point(&args)?)),
        "zoom" => {
            let [f] = args[..] else {
                return Err("usage: zoom FACTOR".into());
            };
            Ok(GestureCmd::Zoom(number(f)?))
        }
        "zoom-in" => no_args(&args, GestureCmd::ZoomIn),
        "zoom-out" => no_args(&args, GestureCmd::ZoomOut),
        "reset" => no_args(&args, GestureCmd::Reset),
        "border" => {
            let (w, pos) = match args[..] {
                [w] => (w, BorderPosition::default()),
                [w, p] => (w, p.parse::<BorderPosition>().map_err(|e| e.to_string())?),
                _ => return Err("usage: border WIDTH [inside|outside]".into()),
            };
            let w = w
                .parse::<u32>()
                .map_err(|_| format!("border width must be a non-negative integer, got \"{w}\""))?;
            Ok(GestureCmd::Border(w, pos))
        }
        // The JSON payload is the rest of the line, spaces included.
        "load" if !rest.is_empty() => Ok(GestureCmd::Load(rest.to_string())),
        "load" => Err("usage: load JSON".into()),
        other => Err(format!("unknown command \"{other}\"")),
    }
}

fn point(args: &[&str]) -> Result<Point, String> {
    let [x, y] = args[..] else {
        return Err("expected X Y".into());
    };
    Ok(Point::new(number(x)?, number(y)?))
}

fn number(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("not a number: \"{s}\""))?;
    if !v.is_finite() {
        return Err(format!("not a finite number: \"{s}\""));
    }
    Ok(v)
}

fn no_args(args: &[&str], cmd: GestureCmd) -> Result<GestureCmd, String> {
    if args.is_empty() {
        Ok(cmd)
    } else {
        Err("takes no arguments".into())
    }
}

/// Replays `script` against `session`, stopping at the first failing line.
pub fn apply(session: &mut SelectionSession, script: &[ScriptLine]) -> Result<(), String> {
    for ScriptLine { line, cmd } in script {
        let rect = match cmd {
            GestureCmd::Down(p) => session.pointer_down(*p),
            GestureCmd::Move(p) => session.pointer_move(*p),
            GestureCmd::Up(p) => session.pointer_up(*p),
            GestureCmd::Zoom(f) => session.set_zoom(*f),
            GestureCmd::ZoomIn => session.zoom_in(),
            GestureCmd::ZoomOut => session.zoom_out(),
            GestureCmd::Border(w, pos) => session.set_border(*w, *pos),
            GestureCmd::Reset => {
                session.reset();
                None
            }
            GestureCmd::Load(json) => session
                .load_json(json)
                .map_err(|e| format!("line {line}: {e}"))?,
        };

        debug!("script line {}: {:?} -> phase={:?} rect={:?}", line, cmd, session.phase(), rect);
    }

    Ok(())
}
