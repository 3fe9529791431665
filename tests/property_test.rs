//! Property-based tests for decay and read-only commands.

use mnemon::formatter::numerals::integer_to_words;
use mnemon::Session;
use proptest::prelude::*;

extern crate mnemon;

/// Commands that never mention `v`.
fn unrelated_command() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..3usize, 0..100i64)
            .prop_map(|(i, k)| format!("remember w{} as {}.", i, integer_to_words(k))),
        (0..100i64).prop_map(|k| format!("tell me about {}.", integer_to_words(k))),
        Just("tell me about w0 plus one.".to_string()),
        Just("remind me about w1.".to_string()),
        Just("clear w2.".to_string()),
        Just("tell me about plus plus".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_fade_grows_by_one_per_unrelated_command(
        commands in prop::collection::vec(unrelated_command(), 0..=10)
    ) {
        let mut session = Session::default();
        session.respond("remember v as one.");
        for command in &commands {
            session.respond(command);
        }
        let fade = session.memory().get("v").map(|entry| entry.fade);
        prop_assert_eq!(fade, Some(1 + commands.len() as u32));
    }

    #[test]
    fn test_reset_is_idempotent(n in -1_000_000i64..1_000_000, times in 1..8usize) {
        let mut session = Session::default();
        let words = integer_to_words(n);
        session.respond(&format!("remember v as {}.", words));
        let before = session.memory().get("v").cloned();

        for _ in 0..times {
            prop_assert_eq!(session.respond("remind me about v."), format!("v is {}.", words));
        }
        prop_assert_eq!(session.memory().get("v").cloned(), before);
    }

    #[test]
    fn test_spelled_integers_read_back(n in -999_999_999_999i64..999_999_999_999) {
        let mut session = Session::default();
        let words = integer_to_words(n);
        prop_assert_eq!(
            session.respond(&format!("tell me about {}.", words)),
            format!("{}.", words)
        );
    }
}
