//! The builtin rule table. Entries are grouped by category; categories
//! appear in evaluation order.

use crate::category::CategoryId;
use crate::fix::FixAction;
use crate::matcher::{
    CounterpartMatcher, PhraseMatcher, RegexMatcher, RepeatedWordMatcher, UnbalancedQuoteMatcher,
};
use crate::ruleset::{Category, PatternEntry, RuleSet};

/// Misspellings fixed by straight word replacement.
const MISSPELLINGS: &[(&str, &str)] = &[
    ("alot", "a lot"),
    ("definately", "definitely"),
    ("seperate", "separate"),
    ("recieve", "receive"),
    ("occured", "occurred"),
    ("untill", "until"),
    ("wich", "which"),
    ("teh", "the"),
    ("accomodate", "accommodate"),
    ("publically", "publicly"),
    ("tommorow", "tomorrow"),
    ("truely", "truly"),
    ("neccessary", "necessary"),
    ("goverment", "government"),
];

/// Contractions typed without their apostrophe.
const MISSING_APOSTROPHES: &[(&str, &str, f32)] = &[
    ("youre", "you're", 0.95),
    ("dont", "don't", 0.92),
    ("cant", "can't", 0.85),
    ("wont", "won't", 0.78),
];

fn phrase_fix(
    name: &'static str,
    phrase: &str,
    problem: &'static str,
    replacement: &str,
) -> PatternEntry {
    PatternEntry::new(
        name,
        PhraseMatcher::new(phrase),
        problem,
        FixAction::replace(replacement),
    )
}

fn regex_fix(
    name: &'static str,
    pattern: &str,
    problem: &'static str,
    template: &str,
) -> PatternEntry {
    PatternEntry::new(
        name,
        RegexMatcher::new(pattern),
        problem,
        FixAction::replace(template),
    )
}

fn regex_hint(
    name: &'static str,
    pattern: &str,
    problem: &'static str,
    hint: &str,
) -> PatternEntry {
    PatternEntry::new(
        name,
        RegexMatcher::new(pattern),
        problem,
        FixAction::hint(hint),
    )
}

fn grammar() -> Category {
    let entries = vec![
        regex_fix(
            "modal_of",
            r"(?i)\b(could|would|should|might) of\b",
            "Nonstandard modal construction",
            "$1 have",
        )
        .with_confidence(0.92),
        regex_fix(
            "modal_have_went",
            r"(?i)\b(should|would|could) have went\b",
            "Wrong past participle after a modal",
            "$1 have gone",
        )
        .with_confidence(0.93),
        regex_fix(
            "their_verb",
            r"(?i)\btheir (is|are|was|were)\b",
            "Confused homophone",
            "there $1",
        ),
        regex_fix(
            "their_gerund",
            r"(?i)\btheir (going|coming|getting|trying|doing)\b",
            "Confused homophone",
            "they're $1",
        )
        .with_confidence(0.88),
        regex_fix(
            "too_article",
            r"(?i)\btoo (the|a|an)\b",
            "Confused homophone",
            "to $1",
        )
        .with_confidence(0.88),
        phrase_fix("its_been", "its been", "Missing apostrophe", "it's been")
            .with_confidence(0.94),
        regex_fix(
            "its_article",
            r"(?i)\bits (a|an|the)\b",
            "Missing apostrophe",
            "it's $1",
        )
        .with_confidence(0.88),
        PatternEntry::new(
            "repeated_word",
            RepeatedWordMatcher,
            "Repeated word",
            FixAction::replace(""),
        )
        .with_confidence(0.85),
        regex_hint(
            "me_as_subject",
            r"(?i)^me and\b",
            "Object pronoun as sentence subject",
            "Use \"X and I\" when it is the subject",
        )
        .with_confidence(0.85),
        regex_hint(
            "double_negative",
            r"(?i)\b(don't|doesn't|didn't|can't|won't|couldn't|wouldn't) (never|nothing|nobody|nowhere)\b",
            "Double negative",
            "Drop one of the negatives",
        )
        .with_confidence(0.85),
        phrase_fix(
            "could_care_less",
            "could care less",
            "Inverted idiom",
            "couldn't care less",
        )
        .with_confidence(0.8),
    ];
    Category::new(CategoryId::Grammar, 0.9, entries)
}

fn spelling() -> Category {
    let mut entries: Vec<PatternEntry> = MISSPELLINGS
        .iter()
        .map(|(typo, correction)| {
            phrase_fix(typo, typo, "Misspelled word", correction)
        })
        .collect();
    for (typo, correction, confidence) in MISSING_APOSTROPHES {
        entries.push(
            phrase_fix(typo, typo, "Missing apostrophe", correction)
                .with_confidence(*confidence),
        );
    }
    entries.push(
        phrase_fix("alright", "alright", "Nonstandard spelling", "all right")
            .with_confidence(0.7),
    );
    Category::new(CategoryId::Spelling, 0.93, entries)
}

fn punctuation() -> Category {
    let entries = vec![
        regex_fix(
            "double_space",
            r" {2,}",
            "Multiple consecutive spaces",
            " ",
        ),
        regex_fix(
            "space_before_comma",
            r"\s+,",
            "Space before comma",
            ",",
        )
        .with_confidence(0.92),
        regex_fix(
            "space_before_colon",
            r"\s+([;:])",
            "Space before punctuation",
            "$1",
        ),
        regex_fix(
            "comma_without_space",
            r#",([^\s\d"')\]}])"#,
            "Missing space after comma",
            ", $1",
        )
        .with_confidence(0.85),
        regex_fix("doubled_comma", r",,+", "Doubled comma", ",").with_confidence(0.95),
        regex_hint(
            "stacked_exclamations",
            r"!{2,}",
            "Stacked exclamation marks",
            "One exclamation mark is enough",
        )
        .with_confidence(0.7),
        regex_hint(
            "trailing_comma",
            r",$",
            "Text ends with a comma",
            "Finish the sentence or use a period",
        )
        .with_confidence(0.75),
    ];
    Category::new(CategoryId::Punctuation, 0.88, entries)
}

fn agreement() -> Category {
    let entries = vec![
        regex_fix(
            "they_was",
            r"(?i)\bthey was\b",
            "Subject-verb disagreement",
            "they were",
        )
        .with_confidence(0.93),
        regex_fix(
            "plural_pronoun_is",
            r"(?i)\b(we|you|they) is\b",
            "Subject-verb disagreement",
            "$1 are",
        ),
        regex_fix(
            "singular_pronoun_dont",
            r"(?i)\b(he|she|it) don't\b",
            "Subject-verb disagreement",
            "$1 doesn't",
        ),
        regex_fix(
            "singular_pronoun_were",
            r"(?i)\b(he|she|it) were\b",
            "Subject-verb disagreement",
            "$1 was",
        )
        .with_confidence(0.7),
        regex_hint(
            "there_is_plural",
            r"(?i)\bthere (is|was) (many|several|numerous|a few|lots)\b",
            "Singular verb with a plural quantity",
            "Use \"there are\" / \"there were\"",
        )
        .with_confidence(0.82),
        regex_fix(
            "a_before_vowel",
            r"(?i)\ba (apple|orange|idea|hour|honest|error|example|island|umbrella|elephant|engineer|artist|author)\b",
            "Article disagreement",
            "an $1",
        )
        .with_confidence(0.92),
        regex_fix(
            "an_before_consonant",
            r"(?i)\ban (dog|cat|book|house|man|woman|day|year|person|story|table)\b",
            "Article disagreement",
            "a $1",
        )
        .with_confidence(0.92),
    ];
    Category::new(CategoryId::Agreement, 0.85, entries)
}

fn capitalization() -> Category {
    let entries = vec![
        regex_hint(
            "lowercase_start",
            r"^[a-z]",
            "Sentence starts in lowercase",
            "Capitalize the first word",
        ),
        regex_fix("standalone_i", r"\bi\b", "Lowercase pronoun", "I").with_confidence(0.95),
        regex_fix(
            "i_contraction",
            r"\bi'(m|ve|ll|d)\b",
            "Lowercase pronoun",
            "I'$1",
        )
        .with_confidence(0.95),
        regex_hint(
            "day_name",
            r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
            "Lowercase day name",
            "Day names are capitalized",
        )
        .with_confidence(0.88),
        regex_hint(
            "month_name",
            r"\b(january|february|march|april|june|july|august|september|october|november|december)\b",
            "Lowercase month name",
            "Month names are capitalized",
        )
        .with_confidence(0.85),
    ];
    Category::new(CategoryId::Capitalization, 0.9, entries)
}

fn wordiness() -> Category {
    let entries = vec![
        phrase_fix("in_order_to", "in order to", "Wordy phrase", "to").with_confidence(0.78),
        phrase_fix(
            "due_to_the_fact",
            "due to the fact that",
            "Wordy phrase",
            "because",
        )
        .with_confidence(0.82),
        phrase_fix(
            "at_this_point_in_time",
            "at this point in time",
            "Wordy phrase",
            "now",
        )
        .with_confidence(0.82),
        phrase_fix("each_and_every", "each and every", "Wordy phrase", "every")
            .with_confidence(0.78),
        phrase_fix(
            "first_and_foremost",
            "first and foremost",
            "Wordy phrase",
            "first",
        )
        .with_confidence(0.72),
        phrase_fix(
            "in_the_event_that",
            "in the event that",
            "Wordy phrase",
            "if",
        )
        .with_confidence(0.8),
        PatternEntry::new(
            "filler_word",
            RegexMatcher::new(r"(?i)\b(basically|essentially|literally)\b"),
            "Filler word",
            FixAction::Remove,
        )
        .with_confidence(0.6),
        regex_fix(
            "doubled_intensifier",
            r"(?i)\b(really|very) (really|very)\b",
            "Doubled intensifier",
            "$2",
        ),
    ];
    Category::new(CategoryId::Wordiness, 0.75, entries)
}

fn awkward_phrasing() -> Category {
    let entries = vec![
        regex_fix(
            "reason_is_because",
            r"(?i)\bthe reason (?:why )?is because\b",
            "Awkward construction",
            "the reason is that",
        )
        .with_confidence(0.82),
        regex_fix(
            "qualified_unique",
            r"(?i)\b(?:very|most|quite|somewhat) unique\b",
            "Qualified absolute",
            "unique",
        )
        .with_confidence(0.84),
        phrase_fix("try_and", "try and", "Awkward construction", "try to"),
        phrase_fix("off_of", "off of", "Awkward construction", "off").with_confidence(0.78),
        phrase_fix(
            "where_its_at",
            "where it's at",
            "Awkward construction",
            "where it is",
        )
        .with_confidence(0.7),
        regex_fix(
            "being_that",
            r"(?i)^being that\b",
            "Awkward construction",
            "because",
        ),
        phrase_fix(
            "irregardless",
            "irregardless",
            "Nonstandard word",
            "regardless",
        )
        .with_confidence(0.9),
        phrase_fix(
            "intensive_purposes",
            "for all intensive purposes",
            "Mangled idiom",
            "for all intents and purposes",
        )
        .with_confidence(0.93),
        phrase_fix("on_accident", "on accident", "Nonstandard idiom", "by accident")
            .with_confidence(0.8),
    ];
    Category::new(CategoryId::AwkwardPhrasing, 0.72, entries)
}

fn tense_consistency() -> Category {
    let entries = vec![
        regex_fix(
            "have_went",
            r"(?i)\b(has|have|had) went\b",
            "Wrong past participle",
            "$1 gone",
        )
        .with_confidence(0.92),
        regex_fix(
            "have_ran",
            r"(?i)\b(has|have|had) ran\b",
            "Wrong past participle",
            "$1 run",
        )
        .with_confidence(0.9),
        regex_fix(
            "have_came",
            r"(?i)\b(has|have|had) came\b",
            "Wrong past participle",
            "$1 come",
        )
        .with_confidence(0.9),
        regex_fix(
            "have_saw",
            r"(?i)\b(has|have|had) saw\b",
            "Wrong past participle",
            "$1 seen",
        )
        .with_confidence(0.9),
        regex_hint(
            "did_with_past",
            r"(?i)\bdid (went|ran|came|saw|took|made|wrote|said)\b",
            "Double past tense",
            "\"did\" takes the base verb form",
        )
        .with_confidence(0.88),
        regex_hint(
            "will_with_past",
            r"(?i)\bwill (walked|ran|went|said|told|came|took|saw|made|got|wrote|thought)\b",
            "Future auxiliary with a past tense verb",
            "Use the base verb form after \"will\"",
        )
        .with_confidence(0.85),
        regex_hint(
            "yesterday_present",
            r"(?i)\byesterday\b.*\b(is|are|am|go|goes|come|comes)\b",
            "Past time marker with a present tense verb",
            "Check the verb tense against \"yesterday\"",
        )
        .with_confidence(0.65),
    ];
    Category::new(CategoryId::TenseConsistency, 0.72, entries)
}

fn parallelism() -> Category {
    let entries = vec![
        PatternEntry::new(
            "not_only_without_but",
            CounterpartMatcher::new(r"(?i)\bnot only\b", r"(?i)\bbut\b"),
            "Incomplete correlative pair",
            FixAction::hint("\"not only\" expects a matching \"but (also)\""),
        )
        .with_confidence(0.8),
        PatternEntry::new(
            "neither_without_nor",
            CounterpartMatcher::new(r"(?i)\bneither\b", r"(?i)\bnor\b"),
            "Incomplete correlative pair",
            FixAction::hint("\"neither\" expects a matching \"nor\""),
        )
        .with_confidence(0.7),
        PatternEntry::new(
            "either_without_or",
            CounterpartMatcher::new(r"(?i)\beither\b", r"(?i)\bor\b"),
            "Incomplete correlative pair",
            FixAction::hint("\"either\" expects a matching \"or\""),
        )
        .with_confidence(0.65),
        regex_hint(
            "gerund_list_shift",
            r"(?i)\b\w+ing, \w+ing,? and (?:to )?\w+ed\b",
            "List items shift verb form",
            "Keep list items in the same verb form",
        )
        .with_confidence(0.7),
        regex_hint(
            "infinitive_gerund_mix",
            r"(?i)\bto \w+, \w+ing, and\b",
            "Mixed infinitive and gerund in a list",
            "Keep list items in the same verb form",
        )
        .with_confidence(0.68),
        regex_hint(
            "rather_than_mix",
            r"(?i)\bto (\w+) rather than (\w+ing)\b",
            "Unparallel comparison",
            "Match the verb forms around \"rather than\"",
        )
        .with_confidence(0.7),
    ];
    Category::new(CategoryId::Parallelism, 0.68, entries)
}

fn dialogue() -> Category {
    let entries = vec![
        PatternEntry::new(
            "unclosed_quote",
            UnbalancedQuoteMatcher,
            "Unclosed quotation mark",
            FixAction::hint("Close the quotation"),
        )
        .with_confidence(0.75),
        regex_hint(
            "tag_missing_comma",
            r#"([a-z])" (he|she|they|I|we) (said|asked|replied|shouted|whispered|muttered)\b"#,
            "Dialogue tag punctuation",
            "Put a comma inside the closing quote before the tag",
        )
        .with_confidence(0.82),
        regex_hint(
            "mixed_quote_styles",
            r#""[^"]*[“”]|[“”][^“”]*""#,
            "Mixed quotation mark styles",
            "Use one quotation style throughout",
        )
        .with_confidence(0.84),
        regex_hint(
            "comma_outside_quote",
            r#"", (he|she|they|I|we) (said|asked|replied)"#,
            "Dialogue tag punctuation",
            "The comma belongs inside the closing quote",
        )
        .with_confidence(0.8),
    ];
    Category::new(CategoryId::Dialogue, 0.7, entries)
}

pub(crate) fn build() -> RuleSet {
    RuleSet::new(vec![
        grammar(),
        spelling(),
        punctuation(),
        agreement(),
        capitalization(),
        wordiness(),
        awkward_phrasing(),
        tense_consistency(),
        parallelism(),
        dialogue(),
    ])
}
