use keycalc::calculator::{FoldPolicy, ResultFormatter, normalize_expression};
use keycalc::history::MemoryHistory;
use keycalc::session::parse_keys;
use keycalc::{Command, FendEvaluator, Session, SessionState};

fn run(session: &mut Session, keys: &str) -> (String, String) {
    let snapshot = session.apply_all(parse_keys(keys).unwrap());
    (snapshot.expression, snapshot.display)
}

#[test]
fn addition_shows_result_after_last_digit() {
    let mut session = Session::new(FendEvaluator::new());
    assert_eq!(run(&mut session, "12+"), ("12+".into(), "".into()));
    assert_eq!(run(&mut session, "3"), ("12+3".into(), "15".into()));
}

#[test]
fn repeated_operator_is_ignored() {
    let mut session = Session::new(FendEvaluator::new());
    assert_eq!(run(&mut session, "5++").0, "5+");
}

#[test]
fn sign_toggle_round_trips() {
    let mut session = Session::new(FendEvaluator::new());
    assert_eq!(run(&mut session, "7~").0, "-7");
    assert_eq!(run(&mut session, "~").0, "7");
}

#[test]
fn long_fraction_folds_for_display() {
    let formatter = ResultFormatter::new(FoldPolicy::default());
    assert_eq!(formatter.format("0.1234567891"), "0.1234e10^6");
    assert_eq!(formatter.format("0.123456"), "0.123456");
}

#[test]
fn delete_on_empty_buffer_does_nothing() {
    let mut session = Session::new(FendEvaluator::new());
    let snapshot = session.apply(Command::Delete);
    assert_eq!(snapshot.expression, "");
    assert_eq!(snapshot.display, "");
    assert_eq!(snapshot.state, SessionState::Empty);
}

#[test]
fn division_by_zero_clears_result() {
    assert_eq!(normalize_expression("9÷0"), "9/0");

    let mut session = Session::new(FendEvaluator::new());
    let (expression, display) = run(&mut session, "9÷0");
    assert_eq!(expression, "9÷0");
    assert_eq!(display, "");
}

#[test]
fn commit_chains_and_records_history() {
    let mut session = Session::new(FendEvaluator::new()).with_history(MemoryHistory::new());
    run(&mut session, "1÷8=");
    assert_eq!(session.expression(), "0.125");

    run(&mut session, "×8=");
    assert_eq!(session.expression(), "1");

    let entries = session.history().unwrap();
    let pairs: Vec<_> = entries
        .iter()
        .map(|entry| (entry.expression.as_str(), entry.result.as_str()))
        .collect();
    assert_eq!(pairs, vec![("1÷8", "0.125"), ("0.125×8", "1")]);
}

#[test]
fn remainder_follows_dividend_sign() {
    let mut session = Session::new(FendEvaluator::new());
    assert_eq!(run(&mut session, "7~%3"), ("-7%3".into(), "-1".into()));

    let mut session = Session::new(FendEvaluator::new());
    assert_eq!(run(&mut session, "5.5%2").1, "1.5");
}
