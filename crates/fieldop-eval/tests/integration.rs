mod helpers;

use helpers::{apply, pipeline};
use fieldop_eval::PipelineOutcome;
use serde_json::json;

#[test]
fn uppercase_in_place_e2e() {
    let mut event = json!({"user": "Bob"});
    let outcome = apply(
        r#"
name: decoder/case/0
operations:
  - user: +s_up
"#,
        &mut event,
    );
    assert_eq!(outcome, PipelineOutcome::Continue);
    assert_eq!(event, json!({"user": "BOB"}));
}

#[test]
fn division_by_zero_surfaces_per_event() {
    let mut event = json!({"count": 10});
    let outcome = apply(
        r#"
name: decoder/calc/0
operations:
  - count: +i_calc/div/0
"#,
        &mut event,
    );
    match outcome {
        PipelineOutcome::Errored {
            expression,
            field,
            reason,
        } => {
            assert_eq!(expression, "i_calc");
            assert_eq!(field, "count");
            assert!(reason.contains("division by zero"), "reason: {reason}");
        }
        other => panic!("expected Errored, got {other:?}"),
    }
    // The failing expression left the target untouched
    assert_eq!(event["count"], json!(10));
}

#[test]
fn regex_extract_match_and_no_match() {
    let yaml = r#"
name: decoder/re/0
operations:
  - id: +re_extract/$msg/id=(\d+)
"#;

    let mut matching = json!({"msg": "id=42"});
    assert!(apply(yaml, &mut matching).is_continue());
    assert_eq!(matching["id"], json!("42"));

    // No match is a no-op, not an error, and adds no field
    let mut other = json!({"msg": "nothing here"});
    assert!(apply(yaml, &mut other).is_continue());
    assert_eq!(other, json!({"msg": "nothing here"}));
}

#[test]
fn split_then_join_round_trip() {
    let mut event = json!({"csv": "a,b,c"});
    let outcome = apply(
        r#"
name: decoder/roundtrip/0
operations:
  - parts: +a_append_split/$csv/,
  - rebuilt: +s_fromArray/$parts/,
"#,
        &mut event,
    );
    assert!(outcome.is_continue());
    assert_eq!(event["parts"], json!(["a", "b", "c"]));
    assert_eq!(event["rebuilt"], json!("a,b,c"));
}

#[test]
fn full_normalization_chain() {
    // A realistic decoder: gate on the event kind, then normalize fields
    // that later operations depend on.
    let yaml = r#"
name: decoder/sshd/0
operations:
  - event.kind: +s_eq/auth
  - user.name: +s_lo/$raw_user
  - source.ip_version: +ip_version/$source.ip
  - event.summary: +s_concat/$user.name/@/$source.ip
  - raw_user: +delete_field
"#;

    let mut event = json!({
        "event": {"kind": "auth"},
        "raw_user": "ROOT",
        "source": {"ip": "10.1.2.3"}
    });
    assert!(apply(yaml, &mut event).is_continue());
    assert_eq!(
        event,
        json!({
            "event": {"kind": "auth", "summary": "root@10.1.2.3"},
            "user": {"name": "root"},
            "source": {"ip": "10.1.2.3", "ip_version": 4}
        })
    );
}

#[test]
fn predicate_gate_drops_non_matching_events() {
    let yaml = r#"
name: decoder/gate/0
operations:
  - event.kind: +s_eq/auth
  - user: +s_up
"#;

    let mut auth = json!({"event": {"kind": "auth"}, "user": "bob"});
    assert!(apply(yaml, &mut auth).is_continue());
    assert_eq!(auth["user"], json!("BOB"));

    let mut other = json!({"event": {"kind": "network"}, "user": "bob"});
    assert!(apply(yaml, &mut other).is_dropped());
    // Dropped before any mutation
    assert_eq!(other["user"], json!("bob"));
}

#[test]
fn cidr_gate_with_escaped_slash() {
    let yaml = r#"
name: decoder/cidr/0
operations:
  - source.ip: +ip_cidr/10.0.0.0\/8
  - source.internal: +s_concat/true
"#;

    let mut internal = json!({"source": {"ip": "10.9.9.9"}});
    assert!(apply(yaml, &mut internal).is_continue());
    assert_eq!(internal["source"]["internal"], json!("true"));

    let mut external = json!({"source": {"ip": "8.8.8.8"}});
    assert!(apply(yaml, &mut external).is_dropped());
}

#[test]
fn exists_and_not_exists_gates() {
    let mut event = json!({"present": 1});
    assert!(
        apply(
            r#"
name: decoder/exists/0
operations:
  - present: +exists
  - absent: +not_exists
"#,
            &mut event,
        )
        .is_continue()
    );
}

#[test]
fn delete_field_is_idempotent() {
    let yaml = r#"
name: decoder/del/0
operations:
  - tmp: +delete_field
"#;
    let p = pipeline(yaml);

    let mut event = json!({"tmp": 1, "keep": 2});
    assert!(p.apply(&mut event).is_continue());
    let after_once = event.clone();
    assert!(p.apply(&mut event).is_continue());
    assert_eq!(event, after_once);
    assert_eq!(event, json!({"keep": 2}));
}

#[test]
fn trim_with_reference_separator() {
    let mut event = json!({"path": "///var/log///", "slash": "/"});
    assert!(
        apply(
            r#"
name: decoder/trim/0
operations:
  - path: +s_trim/both/$slash
"#,
            &mut event,
        )
        .is_continue()
    );
    assert_eq!(event["path"], json!("var/log"));
}

#[test]
fn one_pipeline_many_threads() {
    // One immutable pipeline instance shared by workers processing
    // independent events concurrently.
    let p = pipeline(
        r#"
name: decoder/mt/0
operations:
  - user: +s_up
  - tags: +a_append/$user
"#,
    );

    std::thread::scope(|scope| {
        for i in 0..8 {
            let p = &p;
            scope.spawn(move || {
                for j in 0..100 {
                    let mut event = json!({"user": format!("u{i}-{j}")});
                    assert!(p.apply(&mut event).is_continue());
                    assert_eq!(event["user"], json!(format!("U{i}-{j}")));
                }
            });
        }
    });
}
