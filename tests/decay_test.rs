use mnemon::{config::SessionConfig, Expression, Session};
use pretty_assertions::assert_eq;

extern crate mnemon;

fn fade(session: &Session, name: &str) -> Option<u32> {
    session.memory().get(name).map(|entry| entry.fade)
}

#[test]
fn it_ages_unmentioned_entries() {
    let mut session = Session::default();
    session.respond("remember a as one.");
    session.respond("remember b as two.");
    assert_eq!(fade(&session, "a"), Some(2));
    assert_eq!(fade(&session, "b"), Some(1));

    session.respond("tell me about b.");
    assert_eq!(fade(&session, "a"), Some(3));
    assert_eq!(fade(&session, "b"), Some(1));

    session.respond("remember a as three.");
    assert_eq!(fade(&session, "a"), Some(1));
    assert_eq!(fade(&session, "b"), Some(2));
}

#[test]
fn it_forgets_after_eleven_unmentioned_commands() {
    let mut session = Session::default();
    session.respond("remember a as one.");
    for _ in 0..10 {
        session.respond("tell me about two.");
    }
    assert_eq!(fade(&session, "a"), Some(11));

    session.respond("tell me about two.");
    assert_eq!(fade(&session, "a"), None);
    assert_eq!(session.respond("tell me about a."), "I don't remember a.");
}

#[test]
fn it_keeps_dependent_values_through_decay() {
    let mut session = Session::default();
    session.respond("remember a as five.");
    session.respond("remember b as a plus ten.");
    for _ in 0..11 {
        assert_eq!(session.respond("tell me about b."), "fifteen.");
    }
    assert!(!session.memory().contains("a"));

    let b = session.memory().get("b").unwrap();
    assert!(b.deps.is_empty());
    assert_eq!(b.body, Expression::IntLiteral(15));
    assert_eq!(b.fade, 1);
    assert_eq!(session.respond("tell me about b."), "fifteen.");
}

#[test]
fn it_resolves_chains_one_link_at_a_time() {
    let mut session = Session::new(SessionConfig {
        fade_limit: 2,
        ..SessionConfig::default()
    });
    session.respond("remember a as one.");
    session.respond("remember b as a plus one.");
    session.respond("remember c as b plus one.");
    assert_eq!(fade(&session, "a"), Some(2));

    assert_eq!(session.respond("tell me about c."), "three.");
    assert!(!session.memory().contains("a"));
    let b = session.memory().get("b").unwrap();
    assert_eq!(b.body, Expression::IntLiteral(2));
    let c = session.memory().get("c").unwrap();
    assert_eq!(
        c.deps.iter().cloned().collect::<Vec<_>>(),
        vec!["b".to_string()]
    );

    assert_eq!(session.respond("tell me about c."), "three.");
    assert!(!session.memory().contains("b"));
    assert_eq!(
        session.memory().get("c").unwrap().body,
        Expression::IntLiteral(3)
    );
}

#[test]
fn it_inlines_faded_functions() {
    let mut session = Session::new(SessionConfig {
        fade_limit: 3,
        ..SessionConfig::default()
    });
    session.respond("remember double of n as n times two.");
    session.respond("remember result as double of three.");
    for _ in 0..3 {
        session.respond("tell me about result.");
    }
    assert!(!session.memory().contains("double"));
    assert_eq!(session.respond("tell me about result."), "six.");
}

#[test]
fn it_does_not_age_on_reset() {
    let mut session = Session::default();
    session.respond("remember a as one.");
    session.respond("remember b as two.");
    let before = session.memory().get("a").cloned();
    for _ in 0..5 {
        assert_eq!(session.respond("remind me about a."), "a is one.");
    }
    assert_eq!(session.memory().get("a").cloned(), before);
    assert_eq!(fade(&session, "b"), Some(6));
}

#[test]
fn it_keeps_loop_results_when_an_inlined_name_matches_the_iterator() {
    let mut session = Session::default();
    session.respond("remember n as five.");
    session.respond("remember a as n plus one.");
    session.respond("remember xs as for n in one to three, a.");
    assert_eq!(session.respond("tell me about xs."), "[six, six, six].");

    assert_eq!(session.respond("clear a."), "I've forgotten a.");
    assert_eq!(session.respond("tell me about xs."), "[six, six, six].");
    let xs = session.memory().get("xs").unwrap();
    assert_eq!(
        xs.deps.iter().cloned().collect::<Vec<_>>(),
        vec!["n".to_string()]
    );
}

#[test]
fn it_keeps_function_results_when_an_inlined_name_matches_the_parameter() {
    let mut session = Session::default();
    session.respond("remember n as five.");
    session.respond("remember a as n plus one.");
    session.respond("remember f of n as a times n.");
    assert_eq!(session.respond("tell me about f of two."), "twelve.");

    assert_eq!(session.respond("clear a."), "I've forgotten a.");
    assert_eq!(session.respond("tell me about f of two."), "twelve.");
    assert_eq!(
        session.respond("remind me about f."),
        "f of n2 is (n plus one) times n2."
    );
}
