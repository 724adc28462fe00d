//! Session journal: one JSON object per applied action.
//!
//! The journal is a diagnostics side channel. A failed write turns it off
//! with a warning and play continues.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};

use anyhow::Context;
use serde::Serialize;

use crate::core::Shape;
use crate::types::{ActionOutcome, GameAction};

/// What produced an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    Tilt,
    Timer,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeRecord {
    pub kind: &'static str,
    pub row: i8,
    pub col: i8,
}

impl From<Shape> for ShapeRecord {
    fn from(shape: Shape) -> Self {
        Self {
            kind: shape.kind.as_str(),
            row: shape.row,
            col: shape.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JournalRecord {
    pub seq: u64,
    pub cycle: u32,
    pub source: InputSource,
    pub action: &'static str,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "is_zero")]
    pub rows_cleared: u8,
    pub score: u32,
    pub game_over: bool,
    pub roll_deg: f32,
    pub shape: Option<ShapeRecord>,
}

fn is_zero(v: &u8) -> bool {
    *v == 0
}

/// Fields of a record the caller fills in; `seq` is assigned by the journal.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub cycle: u32,
    pub source: InputSource,
    pub action: GameAction,
    pub outcome: ActionOutcome,
    pub score: u32,
    pub game_over: bool,
    pub roll_deg: f32,
    pub shape: Option<Shape>,
}

/// JSONL writer for [`JournalRecord`]s
pub struct Journal {
    out: Option<Box<dyn Write + Send>>,
    buf: Vec<u8>,
    seq: u64,
}

impl Journal {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
            seq: 0,
        }
    }

    /// Open `path` for appending.
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open journal {path}"))?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }

    /// False once a write has failed.
    pub fn is_active(&self) -> bool {
        self.out.is_some()
    }

    /// Records written so far
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, entry: Entry) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        let rows_cleared = match entry.outcome {
            ActionOutcome::Locked { rows_cleared } => rows_cleared,
            _ => 0,
        };
        let record = JournalRecord {
            seq: self.seq,
            cycle: entry.cycle,
            source: entry.source,
            action: entry.action.as_str(),
            outcome: entry.outcome.as_str(),
            rows_cleared,
            score: entry.score,
            game_over: entry.game_over,
            roll_deg: entry.roll_deg,
            shape: entry.shape.map(ShapeRecord::from),
        };

        self.buf.clear();
        if let Err(e) = serde_json::to_writer(&mut self.buf, &record) {
            log::warn!("journal record {} not serialized: {}", self.seq, e);
            return;
        }
        self.buf.push(b'\n');

        let written = out.write_all(&self.buf).and_then(|_| out.flush());
        if let Err(e) = written {
            log::warn!("journal write failed, disabling journal: {}", e);
            self.out = None;
            return;
        }
        self.seq += 1;
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("active", &self.is_active())
            .field("seq", &self.seq)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, ShapeKind};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn entry(outcome: ActionOutcome) -> Entry {
        Entry {
            cycle: 1234,
            source: InputSource::Timer,
            action: GameAction::Down,
            outcome,
            score: 101,
            game_over: false,
            roll_deg: -1.5,
            shape: Some(Shape::spawn(ShapeKind::T, Color::Red, 3)),
        }
    }

    #[test]
    fn test_records_are_json_lines() {
        let buf = SharedBuf::default();
        let mut journal = Journal::new(Box::new(buf.clone()));
        journal.record(entry(ActionOutcome::Moved));
        journal.record(entry(ActionOutcome::Locked { rows_cleared: 1 }));

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["seq"], 0);
        assert_eq!(first["source"], "timer");
        assert_eq!(first["action"], "down");
        assert_eq!(first["outcome"], "moved");
        assert!(first.get("rows_cleared").is_none());
        assert_eq!(first["shape"]["kind"], "t");
        assert_eq!(first["shape"]["col"], 3);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["seq"], 1);
        assert_eq!(second["rows_cleared"], 1);
    }

    #[test]
    fn test_write_failure_disables_journal() {
        let mut journal = Journal::new(Box::new(Broken));
        journal.record(entry(ActionOutcome::Moved));
        assert!(!journal.is_active());
        journal.record(entry(ActionOutcome::Moved));
        assert_eq!(journal.seq(), 0);
    }
}
