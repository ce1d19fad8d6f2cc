//! Event Logger
//!
//! Append-only JSONL log of village events.

use bevy_ecs::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use village_events::{generate_event_id, VillageEvent};

/// Resource for logging events to a JSONL file
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    event_count: u64,
    next_event_id: u64,
}

impl EventLogger {
    /// Create a new event logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
            next_event_id: 1,
        })
    }

    /// Create a logger that counts events but writes nothing
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
            next_event_id: 1,
        }
    }

    pub fn next_id(&mut self) -> String {
        let id = generate_event_id(self.next_event_id);
        self.next_event_id += 1;
        id
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Assigns an id if the event has none, then writes it.
    pub fn log(&mut self, mut event: VillageEvent) -> std::io::Result<()> {
        if event.event_id.is_empty() {
            event.event_id = self.next_id();
        }
        self.event_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = event.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    pub fn log_batch(&mut self, events: impl IntoIterator<Item = VillageEvent>) -> std::io::Result<()> {
        for event in events {
            self.log(event)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush event logger: {}", e);
        }
    }
}

/// Events produced during the current tick, awaiting the logger
#[derive(Resource, Debug, Default)]
pub struct PendingEvents {
    events: Vec<VillageEvent>,
}

impl PendingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: VillageEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<VillageEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;
    use uuid::Uuid;
    use village_events::EventKind;

    fn sample(tick: u64) -> VillageEvent {
        VillageEvent::new(
            tick,
            Uuid::nil(),
            "Ada",
            EventKind::GoalStalled {
                goal: "work".to_string(),
            },
        )
    }

    #[test]
    fn test_event_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        {
            let mut logger = EventLogger::new(&path).unwrap();
            logger.log_batch(vec![sample(1), sample(2)]).unwrap();
            assert_eq!(logger.event_count(), 2);
        }

        let file = File::open(&path).unwrap();
        let lines: Vec<String> = std::io::BufReader::new(file)
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 2);

        let first = VillageEvent::from_jsonl(&lines[0]).unwrap();
        assert_eq!(first.event_id, "evt_00000001");
        assert_eq!(first.tick, 1);
        let second = VillageEvent::from_jsonl(&lines[1]).unwrap();
        assert_eq!(second.event_id, "evt_00000002");
    }

    #[test]
    fn test_existing_id_kept() {
        let mut logger = EventLogger::null();
        let mut event = sample(3);
        event.event_id = "evt_custom".to_string();
        logger.log(event).unwrap();
        assert_eq!(logger.event_count(), 1);
        assert_eq!(logger.next_id(), "evt_00000001");
    }

    #[test]
    fn test_pending_events() {
        let mut pending = PendingEvents::new();
        pending.push(sample(1));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending.drain().len(), 1);
        assert!(pending.is_empty());
    }
}
