//! Newline-delimited JSON event logs.

use crate::SimTick;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors raised while writing an event log.
#[derive(Debug, Error)]
pub enum EventLogError {
    /// Creating or writing the file failed.
    #[error("event log io error: {0}")]
    Io(#[from] io::Error),
    /// A record could not be encoded.
    #[error("failed to encode event record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One line of an event log.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, P: Serialize> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Event payload.
    pub payload: P,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    out: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, EventLogError> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    /// Append an event to the log.
    pub fn write<P: Serialize>(&mut self, event: &EventRecord<'_, P>) -> Result<(), EventLogError> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<(), EventLogError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_record() {
        let path = std::env::temp_dir().join(format!("gazekit-eventlog-{}.jsonl", std::process::id()));
        let mut sink = JsonlSink::create(&path).expect("sink create");
        for (tick, kind) in [(0, "enter"), (3, "exit")] {
            sink.write(&EventRecord {
                tick: SimTick(tick),
                kind,
                payload: tick * 10,
            })
            .expect("write succeeds");
        }
        sink.flush().expect("flush");

        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines, vec![
            r#"{"tick":0,"kind":"enter","payload":0}"#,
            r#"{"tick":3,"kind":"exit","payload":30}"#,
        ]);
        let _ = fs::remove_file(&path);
    }
}
