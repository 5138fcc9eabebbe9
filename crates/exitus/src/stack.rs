//! Stack capture for `StackRequest::Capture`.
//!
//! A forced `std::backtrace::Backtrace` is rendered and the frames belonging
//! to the capture machinery and to construction itself are dropped, so the
//! first remaining frame is the code that asked for the error.

use std::backtrace::{Backtrace, BacktraceStatus};

/// Symbols that mark the construction path. Everything up to and including
/// the deepest match is stripped.
const CONSTRUCTION_FRAMES: &[&str] = &[
    "exitus::stack::capture",
    "exitus::error::construct",
    "exitus::error::NewError",
    "exitus::convert::",
];

/// Capture a trace starting at the caller of the construction call.
///
/// `None` when the platform cannot capture backtraces.
#[inline(never)]
pub(crate) fn capture() -> Option<String> {
    let bt = Backtrace::force_capture();
    if bt.status() != BacktraceStatus::Captured {
        return None;
    }
    let trimmed = strip_construction_frames(&bt.to_string());
    (!trimmed.is_empty()).then_some(trimmed)
}

pub(crate) fn strip_construction_frames(rendered: &str) -> String {
    let frames = split_frames(rendered);
    let skip = frames
        .iter()
        .rposition(|frame| is_construction_frame(frame))
        .map_or(0, |i| i + 1);
    frames[skip..].join("\n")
}

fn is_construction_frame(frame: &str) -> bool {
    let symbol = frame.lines().next().unwrap_or("");
    CONSTRUCTION_FRAMES.iter().any(|marker| symbol.contains(marker))
}

/// Split a rendered backtrace into frames. A frame starts at a line of the
/// form `  <n>: <symbol>` and runs until the next one.
fn split_frames(rendered: &str) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    for line in rendered.lines() {
        if is_frame_header(line) || frames.is_empty() {
            frames.push(line.to_string());
        } else if let Some(current) = frames.last_mut() {
            current.push('\n');
            current.push_str(line);
        }
    }
    frames
}

fn is_frame_header(line: &str) -> bool {
    match line.trim_start().split_once(':') {
        Some((index, _)) => !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
