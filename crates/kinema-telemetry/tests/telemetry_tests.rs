//! Integration tests for kinema-telemetry.

use kinema_telemetry::{EventBus, EventKind, EventSink, SimulationEvent, TracingSink, VecSink};

// ─── Bus Tests ────────────────────────────────────────────────

#[test]
fn emit_and_flush_reaches_sink() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    bus.emit(SimulationEvent::new(0, EventKind::StepBegin { sim_time: 0.0, dt: 1e-3 }));
    bus.emit(SimulationEvent::new(0, EventKind::StepEnd { wall_time: 1e-4, launches: 3 }));
    assert!(sink.is_empty());

    assert_eq!(bus.flush(), 2);
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].label(), "step_begin");
    assert_eq!(events[1].label(), "step_end");
    assert_eq!(bus.dispatched(), 2);
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));
    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    bus.emit(SimulationEvent::new(0, EventKind::StepBegin { sim_time: 0.0, dt: 1e-3 }));
    bus.emitter()
        .emit(SimulationEvent::new(1, EventKind::Momentum { linear: [0.0; 3] }));
    assert_eq!(bus.flush(), 0);
    assert!(sink.is_empty());
}

#[test]
fn every_sink_sees_every_event() {
    let mut bus = EventBus::new();
    let a = VecSink::new();
    let b = VecSink::new();
    bus.add_sink(Box::new(a.clone()));
    bus.add_sink(Box::new(b.clone()));
    bus.add_sink(Box::new(TracingSink::default()));
    assert_eq!(bus.sink_count(), 3);

    for step in 0..5 {
        bus.emit(SimulationEvent::new(step, EventKind::Momentum { linear: [0.0; 3] }));
    }
    bus.shutdown();
    assert_eq!(a.len(), 5);
    assert_eq!(b.events(), a.events());
}

#[test]
fn emitter_works_from_another_thread() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    let emitter = bus.emitter();
    std::thread::spawn(move || {
        for step in 0..10 {
            emitter.emit(SimulationEvent::new(step, EventKind::StepEnd { wall_time: 0.0, launches: 1 }));
        }
    })
    .join()
    .unwrap();

    bus.flush();
    let steps: Vec<u64> = sink.events().iter().map(|e| e.step).collect();
    assert_eq!(steps, (0..10).collect::<Vec<_>>());
}

// ─── Event Tests ──────────────────────────────────────────────

#[test]
fn event_json_roundtrip() {
    let event = SimulationEvent::new(
        5,
        EventKind::Contacts {
            rigid: 4,
            soft: 12,
            max_penetration: 0.002,
        },
    );
    let json = event.to_json().unwrap();
    assert!(json.contains("\"type\":\"contacts\""));
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn custom_event_uses_its_label() {
    let event = SimulationEvent::new(
        2,
        EventKind::Custom {
            label: "checkpoint".into(),
            payload: "{\"frame\":2}".into(),
        },
    );
    assert_eq!(event.label(), "checkpoint");
}

#[test]
fn sink_names() {
    assert_eq!(VecSink::new().name(), "vec_sink");
    assert_eq!(TracingSink::new(tracing::Level::INFO).name(), "tracing_sink");
}
