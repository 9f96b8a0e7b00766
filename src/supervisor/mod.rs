use std::path::{Path, PathBuf};

use tokio::time::sleep;

use crate::config::Config;
use crate::input::forward::forward_events;
use crate::input::source::gamepad::PhysicalGamepad;
use crate::input::target::mirror::{MirrorDevice, VirtualDeviceCreationError};
use crate::links::StableLinkSet;

/// Lifecycle state of the current reconnection session. Rebuilt every cycle;
/// only the virtual device and its links outlive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No physical handle; polling the discovery path
    Waiting,
    /// Physical handle open, not yet forwarding
    Connected,
    /// Actively pumping events into the virtual device
    Forwarding,
}

/// Guards a setup step that must succeed at most once across reconnect
/// cycles. The wrapped value exists exactly when the step has run.
#[derive(Debug, Default)]
pub struct OneShot<T> {
    value: Option<T>,
}

impl<T> OneShot<T> {
    pub fn new() -> Self {
        Self { value: None }
    }

    pub fn is_done(&self) -> bool {
        self.value.is_some()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Return the value, running `init` first unless an earlier cycle
    /// already succeeded.
    pub fn get_or_try_init<E>(&mut self, init: impl FnOnce() -> Result<T, E>) -> Result<&mut T, E> {
        match self.value {
            Some(ref mut value) => Ok(value),
            None => {
                let value = init()?;
                Ok(self.value.insert(value))
            }
        }
    }
}

/// Retries link publication on each connect cycle until every link has
/// succeeded once, then never republishes.
#[derive(Debug, Default)]
pub struct PublishOnce {
    published: bool,
}

impl PublishOnce {
    pub fn is_published(&self) -> bool {
        self.published
    }

    /// Run `publish` unless an earlier cycle already published every link.
    /// Returns whether the link set is now fully published.
    pub fn publish_with(&mut self, publish: impl FnOnce() -> bool) -> bool {
        if !self.published {
            self.published = publish();
        }
        self.published
    }
}

/// Drives the device lifecycle: wait for the physical gamepad, create the
/// virtual device and publish its links on first connect, forward events
/// until the device disappears, then loop back to waiting. The virtual
/// device and the published paths are never torn down between reconnects.
pub struct Supervisor {
    config: Config,
    state: SessionState,
    /// One-shot guard: holds the virtual device once it has been created
    mirror: OneShot<MirrorDevice>,
    links: Option<StableLinkSet>,
    publication: PublishOnce,
}

impl Supervisor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: SessionState::Waiting,
            mirror: OneShot::new(),
            links: None,
            publication: PublishOnce::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run the reconnection loop forever. The only error that escapes is a
    /// failed virtual-device creation; every per-session failure is absorbed
    /// and retried on the next cycle.
    pub async fn run(&mut self) -> Result<(), VirtualDeviceCreationError> {
        loop {
            self.set_state(SessionState::Waiting);
            let gamepad = self.wait_for_device().await;
            self.set_state(SessionState::Connected);
            log::info!(
                "Opened physical device: {}",
                gamepad.name().unwrap_or("unknown")
            );

            if !self.mirror.is_done() {
                let descriptor = match gamepad.descriptor() {
                    Ok(descriptor) => descriptor,
                    Err(e) => {
                        // Treated like a disconnect: release the handle and
                        // keep probing rather than give up.
                        log::warn!(
                            "Failed to read capabilities: {e}; \
                             no virtual device exists yet, retrying discovery"
                        );
                        drop(gamepad);
                        sleep(self.config.poll_interval()).await;
                        continue;
                    }
                };
                log::debug!("Extracted capabilities: {:?}", descriptor);

                let device_name = self.config.device_name.clone();
                let mirror = self
                    .mirror
                    .get_or_try_init(|| MirrorDevice::create(&descriptor, &device_name))?;
                let nodes = mirror.nodes().clone();
                log::info!("Virtual device created at {}", nodes.event.display());
                self.links = Some(StableLinkSet {
                    event_link: PathBuf::from(&self.config.event_link),
                    js_link: PathBuf::from(&self.config.js_link),
                    event_node: nodes.event,
                    js_node: nodes.js,
                });
            }

            // Publication is idempotent; only retried while some link has
            // never succeeded.
            if let Some(links) = &self.links {
                self.publication.publish_with(|| links.publish());
            }

            let mut stream = match gamepad.into_stream() {
                Ok(stream) => stream,
                Err(e) => {
                    log::warn!("Failed to start event stream: {e}");
                    sleep(self.config.poll_interval()).await;
                    continue;
                }
            };

            self.set_state(SessionState::Forwarding);
            log::info!("Forwarding events");
            let Some(mirror) = self.mirror.get_mut() else {
                continue;
            };
            let disconnect = forward_events(&mut stream, mirror).await;
            log::info!("{disconnect}, waiting for device");

            // Close the physical handle before waiting; the virtual device
            // and its links stay untouched.
            drop(stream);
            sleep(self.config.poll_interval()).await;
        }
    }

    /// Block until the discovery path exists and can be opened, probing at
    /// the configured interval.
    async fn wait_for_device(&self) -> PhysicalGamepad {
        let path = Path::new(&self.config.device_path);
        loop {
            if path.exists() {
                match PhysicalGamepad::open(path) {
                    Ok(gamepad) => return gamepad,
                    Err(e) => log::warn!("Could not open physical device: {e}"),
                }
            }
            sleep(self.config.poll_interval()).await;
        }
    }

    fn set_state(&mut self, state: SessionState) {
        if self.state != state {
            log::debug!("State transition: {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}
