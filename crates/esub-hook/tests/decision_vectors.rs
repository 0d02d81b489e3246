//! End-to-end decision vectors: raw payload in, reply out.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use esub_hook::config::HookConfig;
use esub_hook::Hook;

use vector_loader::load;

#[test]
fn decision_vectors() {
    let hook = Hook::new(&HookConfig::default()).unwrap();

    let files = [
        "scenario_a_mem_capped.json",
        "scenario_b_nastran_wrong_queue.json",
        "scenario_c_debug_constraint.json",
        "scenario_d_mem_below_cap.json",
        "default_queue_mem_capped.json",
        "nastran_in_nastran_queue.json",
        "huge_mem_capped.json",
        "null_mem_echoed.json",
        "bad_mem_quantity.json",
        "missing_user.json",
        "non_object_payload.json",
    ];

    for f in files {
        let v = load(f);
        let outcome = hook.handle(&v.input_bytes());
        let got = serde_json::to_value(&outcome.reply).unwrap();

        if let Some(err) = v.expect_error {
            assert_eq!(got["action"], "error", "vector={}", v.description);
            assert_eq!(got["code"], err.code.as_str(), "vector={}", v.description);
            assert_eq!(outcome.exit_status, 97, "vector={}", v.description);
            continue;
        }

        let ex = v.expect.expect("missing expect block");
        assert_eq!(got, ex, "vector={}", v.description);
        assert_eq!(outcome.exit_status, 0, "vector={}", v.description);
    }
}

#[test]
fn unparsable_payload_is_an_error_reply() {
    let hook = Hook::new(&HookConfig::default()).unwrap();

    let cases: [&[u8]; 5] = [b"", b"{", b"not json", br#"{"user": 42}"#, br#"{"user": "  "}"#];
    for raw in cases {
        let outcome = hook.handle(raw);
        let got = serde_json::to_value(&outcome.reply).unwrap();
        assert_eq!(got["action"], "error", "raw={:?}", String::from_utf8_lossy(raw));
        assert_eq!(got["code"], "MALFORMED_INPUT");
        assert_eq!(outcome.exit_status, 97);
    }
}
