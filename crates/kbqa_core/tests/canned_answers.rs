use kbqa_core::demo::{canned_answer, GENERIC_FALLBACK};
use kbqa_core::intent::{classify, Intent, GREETING_REPLY, THANKS_REPLY};

#[test]
fn rebar_question_gets_rebar_answer() {
    let ans = canned_answer("what rebar sizes do you carry");
    assert!(ans.starts_with("Rebar #3"), "got {ans}");
}

#[test]
fn canned_answers_are_deterministic() {
    for q in [
        "what rebar sizes do you carry",
        "Do you galvanize?",
        "lead time on plate",
        "something unrelated entirely",
    ] {
        assert_eq!(canned_answer(q), canned_answer(q));
    }
}

#[test]
fn table_covers_products_and_services() {
    let cases = [
        ("Do you have wide flange?", "We supply I-Beams"),
        ("need some channels", "Angles (equal/unequal)"),
        ("checker plate thickness", "Plate & sheet"),
        ("schedule 40 pipe", "Square/rectangular tubing"),
        ("how fast is delivery", "Typical stock delivery"),
        ("can you do plasma work", "Shop services"),
        ("do you weld", "Holes via drilling"),
        ("traceability docs", "Yes—Mill Test Reports"),
        ("how to order", "For quotes"),
    ];
    for (q, prefix) in cases {
        let ans = canned_answer(q);
        assert!(ans.starts_with(prefix), "q={q:?} got={ans:?}");
    }
}

#[test]
fn unmatched_question_gets_generic_fallback() {
    assert_eq!(canned_answer("who founded the company"), GENERIC_FALLBACK);
    assert_eq!(canned_answer(""), GENERIC_FALLBACK);
}

#[test]
fn small_talk_short_circuits() {
    assert_eq!(classify("hi there"), Some(Intent::Greeting));
    assert_eq!(classify("hi there").map(Intent::reply), Some(GREETING_REPLY));
    assert_eq!(classify("thanks a lot!"), Some(Intent::Thanks));
    assert_eq!(classify("thanks a lot!").map(Intent::reply), Some(THANKS_REPLY));
    assert_eq!(classify("what rebar sizes do you carry"), None);
}
