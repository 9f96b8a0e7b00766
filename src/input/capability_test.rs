use evdev::{AbsInfo, AbsoluteAxisCode, BusType, EventType, InputId};

use crate::input::capability::{CapabilityDescriptor, CapabilityEntry};

fn test_descriptor() -> CapabilityDescriptor {
    let id = InputId::new(BusType(3), 0x1038, 0x1420, 0x0111);
    let mut descriptor = CapabilityDescriptor::new(id);

    // BTN_SOUTH, BTN_EAST
    descriptor.insert(EventType::KEY, CapabilityEntry::PlainCodes(vec![304, 305]));
    descriptor.insert(
        EventType::ABSOLUTE,
        CapabilityEntry::CalibratedAxes(vec![
            (AbsoluteAxisCode::ABS_X, AbsInfo::new(0, 0, 255, 0, 0, 0)),
            (
                AbsoluteAxisCode::ABS_Y,
                AbsInfo::new(0, -32768, 32767, 16, 128, 1),
            ),
        ]),
    );
    descriptor
}

#[test]
fn test_plain_codes_preserved() {
    let descriptor = test_descriptor();
    let Some(CapabilityEntry::PlainCodes(codes)) = descriptor.get(EventType::KEY) else {
        panic!("expected a plain code entry for EV_KEY");
    };
    assert_eq!(codes, &vec![304, 305]);
}

#[test]
fn test_axis_calibration_round_trip() {
    let descriptor = test_descriptor();
    let Some(CapabilityEntry::CalibratedAxes(axes)) = descriptor.get(EventType::ABSOLUTE) else {
        panic!("expected calibrated axes for EV_ABS");
    };
    assert_eq!(axes.len(), 2);

    let (axis, info) = &axes[0];
    assert_eq!(*axis, AbsoluteAxisCode::ABS_X);
    assert_eq!(info.minimum(), 0);
    assert_eq!(info.maximum(), 255);
    assert_eq!(info.fuzz(), 0);
    assert_eq!(info.flat(), 0);
    assert_eq!(info.resolution(), 0);

    let (axis, info) = &axes[1];
    assert_eq!(*axis, AbsoluteAxisCode::ABS_Y);
    assert_eq!(info.minimum(), -32768);
    assert_eq!(info.maximum(), 32767);
    assert_eq!(info.fuzz(), 16);
    assert_eq!(info.flat(), 128);
    assert_eq!(info.resolution(), 1);
}

#[test]
#[should_panic(expected = "calibration is required")]
fn test_uncalibrated_abs_entry_rejected() {
    let id = InputId::new(BusType(3), 0x1038, 0x1420, 0x0111);
    let mut descriptor = CapabilityDescriptor::new(id);
    // ABS_X as a bare code, without its calibration record
    descriptor.insert(EventType::ABSOLUTE, CapabilityEntry::PlainCodes(vec![0]));
}

#[test]
#[should_panic(expected = "calibration is required")]
fn test_calibration_on_plain_event_type_rejected() {
    let id = InputId::new(BusType(3), 0x1038, 0x1420, 0x0111);
    let mut descriptor = CapabilityDescriptor::new(id);
    descriptor.insert(
        EventType::KEY,
        CapabilityEntry::CalibratedAxes(vec![(
            AbsoluteAxisCode::ABS_X,
            AbsInfo::new(0, 0, 255, 0, 0, 0),
        )]),
    );
}

#[test]
fn test_input_id_preserved() {
    let descriptor = test_descriptor();
    let id = descriptor.input_id();
    assert_eq!(id.vendor(), 0x1038);
    assert_eq!(id.product(), 0x1420);
    assert_eq!(id.version(), 0x0111);
}
