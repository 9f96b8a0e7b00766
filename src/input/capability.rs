use std::collections::HashMap;
use std::io;

use evdev::{AbsInfo, AbsoluteAxisCode, Device, EventType, InputId};
use thiserror::Error;

/// The capability query against the physical device failed. The supervisor
/// treats this like a disconnect and retries on the next discovery cycle.
#[derive(Debug, Error)]
pub enum DeviceQueryError {
    #[error("Failed to query device capabilities: {0}")]
    IoError(#[from] io::Error),
}

/// Capability payload for a single event type. Absolute axes always carry
/// their calibration record; a bare code list for EV_ABS is never produced
/// by [CapabilityDescriptor::from_device] and is rejected by
/// [CapabilityDescriptor::insert], so calibration cannot silently get lost
/// between extraction and virtual-device creation.
#[derive(Debug, Clone)]
pub enum CapabilityEntry {
    /// Supported event codes for types without per-code metadata
    /// (EV_KEY, EV_REL, EV_FF)
    PlainCodes(Vec<u16>),
    /// Supported absolute axes with the calibration captured from the
    /// physical device (min, max, fuzz, flat, resolution)
    CalibratedAxes(Vec<(AbsoluteAxisCode, AbsInfo)>),
}

/// The full capability set of a physical device, normalized into the shape
/// the virtual-device builder consumes. Captured once per process lifetime
/// and forwarded unchanged.
#[derive(Debug, Clone)]
pub struct CapabilityDescriptor {
    id: InputId,
    entries: HashMap<EventType, CapabilityEntry>,
}

impl CapabilityDescriptor {
    pub fn new(id: InputId) -> Self {
        Self {
            id,
            entries: HashMap::new(),
        }
    }

    /// Read the declared capabilities of the given open device.
    pub fn from_device(device: &Device) -> Result<Self, DeviceQueryError> {
        let mut descriptor = CapabilityDescriptor::new(device.input_id());

        let events = device.supported_events();
        for event in events.iter() {
            match event {
                EventType::KEY => {
                    let Some(keys) = device.supported_keys() else {
                        continue;
                    };
                    let codes = keys.iter().map(|key| key.0).collect();
                    descriptor.insert(EventType::KEY, CapabilityEntry::PlainCodes(codes));
                }
                EventType::RELATIVE => {
                    let Some(rel) = device.supported_relative_axes() else {
                        continue;
                    };
                    let codes = rel.iter().map(|axis| axis.0).collect();
                    descriptor.insert(EventType::RELATIVE, CapabilityEntry::PlainCodes(codes));
                }
                EventType::ABSOLUTE => {
                    // Query the absolute ranges explicitly. The supported
                    // axis bitmap alone carries no calibration, and an axis
                    // without its range is undefined on the virtual device.
                    let mut axes = Vec::new();
                    for (axis, info) in device.get_absinfo()? {
                        log::trace!("Found axis {:?} with info {:?}", axis, info);
                        axes.push((axis, info));
                    }
                    descriptor.insert(EventType::ABSOLUTE, CapabilityEntry::CalibratedAxes(axes));
                }
                EventType::FORCEFEEDBACK => {
                    let Some(ff) = device.supported_ff() else {
                        continue;
                    };
                    let codes = ff.iter().map(|effect| effect.0).collect();
                    descriptor.insert(
                        EventType::FORCEFEEDBACK,
                        CapabilityEntry::PlainCodes(codes),
                    );
                }
                _ => (),
            }
        }

        Ok(descriptor)
    }

    /// The identity (bustype, vendor, product, version) of the physical
    /// device, advertised unchanged on the virtual device.
    pub fn input_id(&self) -> InputId {
        self.id.clone()
    }

    /// Record the capability entry for one event type. EV_ABS entries must
    /// be [CapabilityEntry::CalibratedAxes] and every other event type must
    /// use plain codes.
    ///
    /// # Panics
    ///
    /// Panics on a mismatched pairing, e.g. EV_ABS with a bare code list.
    pub fn insert(&mut self, event_type: EventType, entry: CapabilityEntry) {
        let calibrated = matches!(entry, CapabilityEntry::CalibratedAxes(_));
        assert_eq!(
            event_type == EventType::ABSOLUTE,
            calibrated,
            "calibration is required for EV_ABS entries and only EV_ABS entries"
        );
        self.entries.insert(event_type, entry);
    }

    pub fn get(&self, event_type: EventType) -> Option<&CapabilityEntry> {
        self.entries.get(&event_type)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&EventType, &CapabilityEntry)> {
        self.entries.iter()
    }
}
