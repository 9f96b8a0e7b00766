use std::error::Error;
use std::time::Duration;

use super::Config;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(
        config.device_path,
        "/dev/input/by-id/usb-1038_SteelSeries_Stratus_Duo-event-joystick"
    );
    assert_eq!(config.event_link, "/tmp/gamepad-event");
    assert_eq!(config.js_link, "/tmp/gamepad-js");
    assert_eq!(config.device_name, "VirtualGamepad");
    assert_eq!(config.poll_interval(), Duration::from_millis(1000));
}

#[test]
fn test_from_yaml() -> Result<(), Box<dyn Error>> {
    let content = r#"
device_path: /dev/input/event7
device_name: TestPad
poll_interval_ms: 250
"#;
    let config = Config::from_yaml(content)?;
    assert_eq!(config.device_path, "/dev/input/event7");
    assert_eq!(config.device_name, "TestPad");
    assert_eq!(config.poll_interval(), Duration::from_millis(250));

    // Unset fields fall back to defaults
    assert_eq!(config.event_link, "/tmp/gamepad-event");
    assert_eq!(config.js_link, "/tmp/gamepad-js");

    Ok(())
}

#[test]
fn test_cli_overrides() -> Result<(), Box<dyn Error>> {
    let args = crate::cli::Args {
        config: None,
        device: Some("/dev/input/event3".to_string()),
        event_link: None,
        js_link: Some("/run/pad-js".to_string()),
        name: None,
        poll_interval_ms: Some(50),
    };
    let config = args.into_config()?;
    assert_eq!(config.device_path, "/dev/input/event3");
    assert_eq!(config.js_link, "/run/pad-js");
    assert_eq!(config.poll_interval_ms, 50);
    assert_eq!(config.event_link, "/tmp/gamepad-event");
    assert_eq!(config.device_name, "VirtualGamepad");

    Ok(())
}
