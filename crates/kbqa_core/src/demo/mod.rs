use std::sync::LazyLock;

use regex::Regex;

pub const CONTACT_EMAIL: &str = "sales@titansteelworks.example";

pub const GENERIC_FALLBACK: &str = "I can share basics on products, fabrication, lead time, and MTRs. \
For a quote, provide sizes/grade, quantities, and delivery city.";

/// Ordered (pattern, answer) decision table for offline mode. First match wins.
const CANNED_TABLE: &[(&str, &str)] = &[
    (
        r"\b(beams?|i[- ]?beam|h[- ]?beam|wide\s*flange|w\d+)\b",
        "We supply I-Beams, H-Beams, and Wide Flange (W-series), typically in ASTM A36, A992, and A572 Gr 50. Sizes commonly run W6–W36.",
    ),
    (
        r"\b(angles?|channels?|mc\b)\b",
        "Angles (equal/unequal) and channels (C/MC) are stocked; details and cut lengths confirmed at quote.",
    ),
    (
        r"\b(plate|sheet|checker|a1011|a1018)\b",
        "Plate & sheet options include hot-rolled, cold-rolled, and checker. We confirm thickness, grade, and tolerances at quote.",
    ),
    (
        r"\b(rebar|#\d+|a615|a706)\b",
        "Rebar #3–#11 in common ASTM grades; MTRs available on request.",
    ),
    (
        r"\b(tub(e|ing)|pipe|sch(edu)?le?\s*(40|80))\b",
        "Square/rectangular tubing and pipe (Sch 40/80). End-prep and cut-to-length available.",
    ),
    (
        r"\b(delivery|ship|lead\s*time|turnaround)\b",
        "Typical stock delivery is 1–3 business days. Fabrication adds ~3–10 business days depending on scope.",
    ),
    (
        r"\b(cut|cutting|plasma|saw|waterjet|bend|roll|shear|bevel|cope|miter)\b",
        "Shop services: saw & plasma cutting, limited rolling/bending, shearing, bevels, coping, and miter cuts per drawing.",
    ),
    (
        r"\b(drill|punch|hole|weld|mig|tig|finish|coat|prime|galvan)\b",
        "Holes via drilling/punching, MIG/TIG per WPS, primer coating in-house; galvanization via partners.",
    ),
    (
        r"\b(mtr|mill test report|traceability|cert(ificate)?)\b",
        "Yes—Mill Test Reports (MTRs) are available upon request at order time.",
    ),
    (
        r"\b(quote|pricing|estimate|rfq|how to order)\b",
        "For quotes, share sizes/grade, lengths or cut list, quantity, and delivery city. We’ll confirm availability, lead time, and pricing.",
    ),
    (
        r"\b(hello|hi|hey|good (morning|afternoon|evening)|greetings)\b",
        crate::intent::GREETING_REPLY,
    ),
    (r"\b(thanks|thank you|thx|ty)\b", crate::intent::THANKS_REPLY),
];

struct CannedAnswer {
    pattern: Regex,
    answer: &'static str,
}

static CANNED_QA: LazyLock<Vec<CannedAnswer>> = LazyLock::new(|| {
    CANNED_TABLE
        .iter()
        .filter_map(|(pattern, answer)| {
            Regex::new(&format!("(?i){pattern}"))
                .ok()
                .map(|pattern| CannedAnswer {
                    pattern,
                    answer: *answer,
                })
        })
        .collect()
});

/// Offline answer: a pure function of the question text.
pub fn canned_answer(question: &str) -> &'static str {
    let q = question.trim();
    CANNED_QA
        .iter()
        .find(|entry| entry.pattern.is_match(q))
        .map(|entry| entry.answer)
        .unwrap_or(GENERIC_FALLBACK)
}
