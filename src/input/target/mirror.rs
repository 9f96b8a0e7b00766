use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{
    AttributeSet, EventType, FFEffectCode, InputEvent, KeyCode, RelativeAxisCode,
    SynchronizationCode, SynchronizationEvent, UinputAbsSetup,
};
use thiserror::Error;

use crate::input::capability::{CapabilityDescriptor, CapabilityEntry};

/// The virtual device could not be created. There is nothing to publish or
/// forward to without it, so this aborts the process.
#[derive(Debug, Error)]
pub enum VirtualDeviceCreationError {
    #[error("Failed to create uinput device: {0}")]
    IoError(#[from] io::Error),
    #[error("Created uinput device exposes no event node")]
    MissingEventNode,
}

/// Kernel-assigned node paths backing the virtual device.
#[derive(Debug, Clone)]
pub struct DeviceNodes {
    pub event: PathBuf,
    /// Present only when the kernel's joydev driver bound a js node
    pub js: Option<PathBuf>,
}

/// The uinput device mirroring the physical gamepad. Created exactly once
/// per process lifetime; its nodes stay valid across physical reconnects.
pub struct MirrorDevice {
    device: VirtualDevice,
    nodes: DeviceNodes,
}

impl MirrorDevice {
    /// Create a uinput device advertising the given capability set under the
    /// given display name, and resolve the node paths the kernel assigned it.
    pub fn create(
        descriptor: &CapabilityDescriptor,
        name: &str,
    ) -> Result<Self, VirtualDeviceCreationError> {
        let mut builder = VirtualDeviceBuilder::new()?
            .name(name)
            .input_id(descriptor.input_id());

        for (event_type, entry) in descriptor.entries() {
            match (*event_type, entry) {
                (EventType::KEY, CapabilityEntry::PlainCodes(codes)) => {
                    let keys = AttributeSet::<KeyCode>::from_iter(
                        codes.iter().map(|code| KeyCode(*code)),
                    );
                    builder = builder.with_keys(&keys)?;
                }
                (EventType::RELATIVE, CapabilityEntry::PlainCodes(codes)) => {
                    let axes = AttributeSet::<RelativeAxisCode>::from_iter(
                        codes.iter().map(|code| RelativeAxisCode(*code)),
                    );
                    builder = builder.with_relative_axes(&axes)?;
                }
                (EventType::ABSOLUTE, CapabilityEntry::CalibratedAxes(axes)) => {
                    for (axis, info) in axes {
                        let setup = UinputAbsSetup::new(*axis, *info);
                        builder = builder.with_absolute_axis(&setup)?;
                    }
                }
                (EventType::FORCEFEEDBACK, CapabilityEntry::PlainCodes(codes)) => {
                    let effects = AttributeSet::<FFEffectCode>::from_iter(
                        codes.iter().map(|code| FFEffectCode(*code)),
                    );
                    builder = builder.with_ff(&effects)?;
                }
                (event_type, _) => {
                    log::debug!("Skipping unsupported capability entry: {:?}", event_type);
                }
            }
        }

        let mut device = builder.build()?;

        let mut event_node: Option<PathBuf> = None;
        for path in device.enumerate_dev_nodes_blocking()? {
            let path = path?;
            log::debug!("Virtual device available as {}", path.display());
            event_node = Some(path);
        }
        let event = event_node.ok_or(VirtualDeviceCreationError::MissingEventNode)?;
        let js = find_js_node(&event);
        if js.is_none() {
            log::debug!("No joystick node found for {}", event.display());
        }

        Ok(Self {
            device,
            nodes: DeviceNodes { event, js },
        })
    }

    pub fn nodes(&self) -> &DeviceNodes {
        &self.nodes
    }

    /// Emit one group of events followed by a synchronization marker, so
    /// event grouping seen on the physical device is preserved for consumers
    /// of the virtual one.
    pub fn write_report(&mut self, events: &[InputEvent]) -> io::Result<()> {
        self.device.emit(events)?;
        self.device
            .emit(&[SynchronizationEvent::new(SynchronizationCode::SYN_REPORT, 0).into()])?;
        Ok(())
    }
}

/// Look for a joydev node bound to the same input device as the given event
/// node by scanning its sysfs device directory for a `js*` child.
fn find_js_node(event_node: &Path) -> Option<PathBuf> {
    let name = event_node.file_name()?.to_str()?;
    let sysfs_dir = PathBuf::from("/sys/class/input").join(name).join("device");
    let entries = fs::read_dir(sysfs_dir).ok()?;
    for entry in entries.flatten() {
        let child = entry.file_name();
        let Some(child) = child.to_str() else {
            continue;
        };
        if child.starts_with("js") {
            return Some(PathBuf::from(format!("/dev/input/{child}")));
        }
    }
    None
}
