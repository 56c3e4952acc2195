mod common;

use common::{harness, sample_model, Call, FakeProvider, HostCall};
use pretty_assertions::assert_eq;
use serde_json::json;
use tmstore_core::api::{Command, Outcome, ProviderKind, TrackerError};

fn command(value: serde_json::Value) -> Command {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_dispatch_session_flow() {
    let model = sample_model("Demo", Some("2.2.0"));
    let mut h = harness(
        FakeProvider::new(ProviderKind::Desktop)
            .with_listing(&["Demo"])
            .with_model("Demo", model.clone()),
    );

    let listing = h.tracker.dispatch(command(json!({"op": "fetch_all"}))).await.unwrap();
    assert!(matches!(listing, Outcome::Listing(ref l) if l.len() == 1));

    h.tracker
        .dispatch(command(json!({"op": "fetch", "name": "Demo"})))
        .await
        .unwrap();
    h.tracker
        .dispatch(command(json!({"op": "update", "update": {"fileName": "/tmp/demo.json"}})))
        .await
        .unwrap();

    let idx = h
        .tracker
        .dispatch(command(json!({
            "op": "mark_diagram_modified",
            "diagram": {"id": 1, "version": "2.2.0"}
        })))
        .await
        .unwrap();
    assert_eq!(idx, Outcome::DiagramIndex(Some(1)));
    assert_eq!(
        h.tracker.dispatch(Command::IsDirty).await.unwrap(),
        Outcome::Dirty(true)
    );

    h.tracker.dispatch(Command::Save).await.unwrap();
    assert_eq!(
        h.tracker.dispatch(Command::IsDirty).await.unwrap(),
        Outcome::Dirty(false)
    );
    assert_eq!(
        h.provider.calls().last(),
        Some(&Call::Update("/tmp/demo.json".to_string()))
    );
    assert_eq!(
        h.host.calls()[1..],
        [HostCall::Modified(true), HostCall::Modified(false)]
    );

    assert_eq!(
        h.tracker.dispatch(Command::Show).await.unwrap(),
        Outcome::Document(model)
    );
}

#[tokio::test]
async fn test_dispatch_queries_do_not_touch_state() {
    let mut h = harness(FakeProvider::new(ProviderKind::Local));
    h.tracker.select(sample_model("T", Some("1.0.0")));

    for cmd in [
        Command::Contributors,
        Command::IsDirty,
        Command::IsLegacyVersion,
        Command::Show,
    ] {
        assert!(cmd.is_query());
        h.tracker.dispatch(cmd).await.unwrap();
    }

    assert_eq!(
        h.tracker.dispatch(Command::IsLegacyVersion).await.unwrap(),
        Outcome::Legacy(true)
    );
    assert_eq!(
        h.tracker.dispatch(Command::Contributors).await.unwrap(),
        Outcome::Contributors(vec!["A".to_string(), "B".to_string()])
    );
    assert!(!h.tracker.is_dirty());
    assert!(h.host.calls().is_empty());
}

#[tokio::test]
async fn test_dispatch_surfaces_tracker_errors() {
    let mut h = harness(FakeProvider::new(ProviderKind::Local));

    let err = h.tracker.dispatch(Command::Restore).await.unwrap_err();
    assert!(matches!(err, TrackerError::NoStash));

    h.tracker.select(sample_model("T", None));
    let err = h
        .tracker
        .dispatch(command(json!({"op": "save_diagram", "diagram": {"id": "nope"}})))
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::DiagramNotFound { .. }));
}

#[tokio::test]
async fn test_dispatch_set_contributors_and_stash() {
    let mut h = harness(FakeProvider::new(ProviderKind::Local));
    h.tracker.select(sample_model("T", None));

    h.tracker
        .dispatch(command(json!({"op": "set_contributors", "names": ["Eve"]})))
        .await
        .unwrap();
    assert!(h.tracker.has_unsynced_changes());

    h.tracker.dispatch(Command::Stash).await.unwrap();
    assert!(!h.tracker.has_unsynced_changes());
    assert!(!h.tracker.is_dirty());
}
