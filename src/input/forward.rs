use std::io;

use evdev::{EventStream, EventType, InputEvent};
use thiserror::Error;

use crate::input::target::mirror::MirrorDevice;

/// A failed read on the physical device. This is the sole signal that the
/// device disconnected and ends the forwarding session.
#[derive(Debug, Error)]
#[error("Physical device read failed: {0}")]
pub struct PhysicalIOError(#[from] pub io::Error);

/// Groups incoming events into reports delimited by synchronization markers.
#[derive(Debug, Default)]
pub struct ReportBatcher {
    pending: Vec<InputEvent>,
}

impl ReportBatcher {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Feed one event. Returns the completed report when the event is a
    /// synchronization marker, otherwise buffers it in order.
    pub fn push(&mut self, event: InputEvent) -> Option<Vec<InputEvent>> {
        if event.event_type() == EventType::SYNCHRONIZATION {
            return Some(std::mem::take(&mut self.pending));
        }
        self.pending.push(event);
        None
    }
}

/// Pump events from the physical device into the virtual device until a read
/// fails. Reads suspend until the next event, and each report is written in
/// source order with its synchronization marker. Write failures on the
/// virtual side are logged and do not end the session; the returned error is
/// always the read failure that signalled disconnection.
pub async fn forward_events(stream: &mut EventStream, mirror: &mut MirrorDevice) -> PhysicalIOError {
    let mut batcher = ReportBatcher::new();
    loop {
        let event = match stream.next_event().await {
            Ok(event) => event,
            Err(err) => return PhysicalIOError(err),
        };
        log::trace!("Received event: {:?}", event);

        if let Some(report) = batcher.push(event) {
            if let Err(e) = mirror.write_report(&report) {
                log::warn!("Failed to write report to virtual device: {e}");
            }
        }
    }
}
