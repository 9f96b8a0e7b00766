use std::io;
use std::path::Path;

use evdev::{Device, EventStream};

use crate::input::capability::{CapabilityDescriptor, DeviceQueryError};

/// An open, exclusively-grabbed connection to the physical gamepad. Owned by
/// the current reconnection session; dropping it (or the stream it converts
/// into) closes the file descriptor and releases the grab.
pub struct PhysicalGamepad {
    device: Device,
}

impl PhysicalGamepad {
    /// Open the event device at the given path and grab it so its events are
    /// delivered exclusively to the mirror.
    pub fn open(path: &Path) -> io::Result<Self> {
        log::debug!("Opening device at: {}", path.display());
        let mut device = Device::open(path)?;
        device.grab()?;
        Ok(Self { device })
    }

    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    /// Capture the device's declared capability set, including the absolute
    /// axis calibration required to recreate it faithfully.
    pub fn descriptor(&self) -> Result<CapabilityDescriptor, DeviceQueryError> {
        CapabilityDescriptor::from_device(&self.device)
    }

    /// Convert this handle into the async event stream consumed by the
    /// forwarder. Reads suspend until an event is available.
    pub fn into_stream(self) -> io::Result<EventStream> {
        self.device.into_event_stream()
    }
}
