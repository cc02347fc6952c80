#![warn(missing_docs)]
//! Interaction traces for tests and headless runs.
//!
//! A [`FrameRecord`] captures what the pointer pipeline did in one frame.
//! Records can be streamed to disk as newline-delimited JSON with
//! [`JsonlSink`] or kept in memory with [`TransitionTrace`] for assertions.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use spatial_pointer_core::{FrameIndex, ObjectHandle, StateName};
use spatial_pointer_input::PointerSource;
use spatial_pointer_ui3d::{FrameReport, Transition};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// First line of every trace file.
#[derive(Debug, Serialize)]
pub struct TraceHeader<'a> {
    /// Record discriminator.
    pub kind: &'a str,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Free-form label (scene or script name).
    pub label: &'a str,
}

/// Serializable summary of one processed frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    /// Frame that was processed.
    pub frame: FrameIndex,
    /// Pointer that produced the ray.
    pub source: PointerSource,
    /// Interactive winner, if any.
    pub winner: Option<ObjectHandle>,
    /// Distance to the closest hit, if any.
    pub hit_distance: Option<f32>,
    /// Every state entry of the frame, winner first.
    pub transitions: Vec<Transition>,
}

impl From<&FrameReport> for FrameRecord {
    fn from(report: &FrameReport) -> Self {
        Self {
            frame: report.frame,
            source: report.source,
            winner: report.winner,
            hit_distance: report.hit.map(|hit| hit.distance),
            transitions: report.transitions.clone(),
        }
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create trace dir {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create trace file {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Create a sink and write a [`TraceHeader`] line.
    pub fn with_header<P: AsRef<Path>>(path: P, label: &str) -> Result<Self> {
        let mut sink = Self::create(path)?;
        sink.write(&TraceHeader {
            kind: "trace_header",
            started_at: Utc::now(),
            label,
        })?;
        Ok(sink)
    }

    /// Append one record to the log.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlSink {
    fn drop(&mut self) {
        if let Err(err) = self.writer.flush() {
            tracing::warn!(%err, "failed to flush trace on drop");
        }
    }
}

/// In-memory frame log for assertions.
#[derive(Debug, Default)]
pub struct TransitionTrace {
    frames: Vec<FrameRecord>,
}

impl TransitionTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame.
    pub fn record(&mut self, report: &FrameReport) {
        self.frames.push(FrameRecord::from(report));
    }

    /// All recorded frames.
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// Last recorded frame.
    pub fn last(&self) -> Option<&FrameRecord> {
        self.frames.last()
    }

    /// State entered by `object` in each frame it was driven.
    pub fn states_of(&self, object: ObjectHandle) -> Vec<StateName> {
        self.frames
            .iter()
            .flat_map(|frame| frame.transitions.iter())
            .filter(|t| t.handle == object)
            .map(|t| t.to.clone())
            .collect()
    }

    /// How many times `object` entered `state` (one callback run each).
    pub fn entries(&self, object: ObjectHandle, state: &StateName) -> usize {
        self.frames
            .iter()
            .flat_map(|frame| frame.transitions.iter())
            .filter(|t| t.handle == object && &t.to == state)
            .count()
    }

    /// Transitions that changed an object's state, in order.
    pub fn changes(&self) -> impl Iterator<Item = (FrameIndex, &Transition)> {
        self.frames.iter().flat_map(|frame| {
            frame
                .transitions
                .iter()
                .filter(|t| t.changed())
                .map(move |t| (frame.frame, t))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn transition(handle: u64, from: StateName, to: StateName) -> Transition {
        Transition {
            handle: ObjectHandle(handle),
            from,
            to,
        }
    }

    fn record(frame: u64, transitions: Vec<Transition>) -> FrameRecord {
        FrameRecord {
            frame: FrameIndex(frame),
            source: PointerSource::Device,
            winner: None,
            hit_distance: None,
            transitions,
        }
    }

    #[test]
    fn jsonl_sink_writes_lines() {
        let path = std::env::temp_dir().join(format!(
            "pointer-trace-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        {
            let mut sink = JsonlSink::with_header(&path, "unit").expect("sink create");
            let frame = record(0, vec![transition(1, StateName::IDLE, StateName::HOVERED)]);
            sink.write(&frame).expect("write succeeds");
        }
        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("trace_header"));
        assert!(lines[1].contains("\"hovered\""));
        assert!(lines[1].contains("\"device\""));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn trace_queries() {
        let mut trace = TransitionTrace::new();
        trace.frames.push(record(
            0,
            vec![transition(1, StateName::IDLE, StateName::HOVERED)],
        ));
        trace.frames.push(record(
            1,
            vec![transition(1, StateName::HOVERED, StateName::HOVERED)],
        ));

        assert_eq!(
            trace.states_of(ObjectHandle(1)),
            vec![StateName::HOVERED, StateName::HOVERED]
        );
        assert_eq!(trace.entries(ObjectHandle(1), &StateName::HOVERED), 2);
        let changes: Vec<_> = trace.changes().collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, FrameIndex(0));
    }
}
