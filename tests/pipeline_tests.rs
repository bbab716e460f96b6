use serde_json::json;
use voxplay::kernel::intent::IntentResult;
use voxplay::kernel::pipeline::{dispatch, interpret};
use voxplay::kernel::resolve::TransportCommand;
use voxplay::kernel::transport::PlaybackState;
use voxplay::kernel::value::{Fields, TypedValue, ValueKind};

/// Build an IntentResult from a wire-shaped parameters object, the way
/// the NLU client does it.
fn wire_result(intent: &str, parameters: serde_json::Value) -> IntentResult {
    let fields = match TypedValue::from_wire(&parameters) {
        TypedValue::Struct(fields) => fields,
        other => panic!("wire parameters must convert to a struct, got {:?}", other),
    };
    IntentResult::new(intent, fields)
}

#[test]
fn test_wire_to_state_seek() {
    // "skip forward 10 minutes" as the oracle reports it
    let result = wire_result(
        "SeekVideo",
        json!({
            "PointInTime": "future",
            "duration": { "amount": 10, "unit": "min" }
        }),
    );

    let mut state = PlaybackState {
        position_seconds: 42.0,
        is_playing: true,
        duration_seconds: 3600.0,
    };

    let command = dispatch(&mut state, &result);
    assert_eq!(
        command,
        Some(TransportCommand::SeekRelative {
            delta_seconds: 600.0
        })
    );
    assert_eq!(state.position_seconds, 642.0);
}

#[test]
fn test_wire_to_state_stop() {
    let result = wire_result("PlayPauseStop", json!({ "PlayPauseStop": "stop" }));

    let mut state = PlaybackState {
        position_seconds: 42.0,
        is_playing: true,
        duration_seconds: 3600.0,
    };

    dispatch(&mut state, &result);
    assert_eq!(state.position_seconds, 0.0);
    assert!(!state.is_playing);
}

#[test]
fn test_unhandled_intent_leaves_state_untouched() {
    let result = wire_result("SmallTalk", json!({ "greeting": "hi there" }));

    let mut state = PlaybackState {
        position_seconds: 42.0,
        is_playing: true,
        duration_seconds: 3600.0,
    };
    let before = state.clone();

    let command = dispatch(&mut state, &result);
    assert_eq!(command, None);
    assert_eq!(state, before, "a no-op turn must not mutate playback state");
}

#[test]
fn test_malformed_seek_produces_no_command() {
    // duration arrived as a bare string instead of a struct
    let result = wire_result(
        "SeekVideo",
        json!({ "PointInTime": "future", "duration": "10 minutes" }),
    );

    assert_eq!(interpret(&result), None);
}

#[test]
fn test_wire_kinds() {
    let tree = TypedValue::from_wire(&json!({
        "text": "future",
        "count": 2.5,
        "nested": { "inner": null },
        "missing": null
    }));

    let fields = tree.as_struct().expect("object converts to struct");
    assert_eq!(fields.get("text").unwrap().kind(), ValueKind::String);
    assert_eq!(fields.get("count").unwrap().kind(), ValueKind::Number);
    assert_eq!(fields.get("nested").unwrap().kind(), ValueKind::Struct);
    assert_eq!(fields.get("missing").unwrap().kind(), ValueKind::Null);

    // Reading through the wrong accessor never coerces
    assert_eq!(fields.get("count").unwrap().as_str(), None);
    assert_eq!(fields.get("text").unwrap().as_number(), None);
}

#[test]
fn test_unmodeled_wire_kinds_flatten_to_null() {
    let tree = TypedValue::from_wire(&json!({ "flag": true, "list": [1, 2] }));
    let fields = tree.as_struct().unwrap();

    assert_eq!(fields.get("flag"), Some(&TypedValue::Null));
    assert_eq!(fields.get("list"), Some(&TypedValue::Null));
}

#[test]
fn test_parameter_order_is_preserved() {
    let mut fields = Fields::new();
    fields.insert("b", TypedValue::Number(1.0));
    fields.insert("a", TypedValue::Number(2.0));

    let names: Vec<&str> = fields.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["b", "a"]);
}
