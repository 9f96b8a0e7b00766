use evdev::{EventType, InputEvent};

use crate::input::forward::ReportBatcher;

fn key_event(code: u16, value: i32) -> InputEvent {
    InputEvent::new(EventType::KEY.0, code, value)
}

fn sync_event() -> InputEvent {
    InputEvent::new(EventType::SYNCHRONIZATION.0, 0, 0)
}

#[test]
fn test_report_grouping_preserved() {
    let mut batcher = ReportBatcher::new();

    // BTN_SOUTH press and ABS_X move buffer until the marker arrives
    assert!(batcher.push(key_event(304, 1)).is_none());
    assert!(batcher
        .push(InputEvent::new(EventType::ABSOLUTE.0, 0, 127))
        .is_none());

    let report = batcher.push(sync_event()).expect("marker completes report");
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].event_type(), EventType::KEY);
    assert_eq!(report[0].code(), 304);
    assert_eq!(report[0].value(), 1);
    assert_eq!(report[1].event_type(), EventType::ABSOLUTE);
    assert_eq!(report[1].code(), 0);
    assert_eq!(report[1].value(), 127);
}

#[test]
fn test_marker_flushes_buffer() {
    let mut batcher = ReportBatcher::new();
    assert!(batcher.push(key_event(305, 1)).is_none());
    let report = batcher.push(sync_event()).unwrap();
    assert_eq!(report.len(), 1);

    // The buffer starts fresh after a flush
    let report = batcher.push(sync_event()).unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_order_preserved_across_reports() {
    let mut batcher = ReportBatcher::new();
    let mut reports = Vec::new();
    for value in 0..3 {
        batcher.push(key_event(304, value));
        if let Some(report) = batcher.push(sync_event()) {
            reports.push(report);
        }
    }
    assert_eq!(reports.len(), 3);
    for (value, report) in reports.iter().enumerate() {
        assert_eq!(report[0].value(), value as i32);
    }
}
