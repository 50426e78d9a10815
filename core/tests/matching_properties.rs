//! Property tests for the rhyme queries.
//!
//! Each trie-backed query is checked against a brute-force scan of the word
//! array over randomly generated lexicons and queries:
//!
//! 1. **Exact**: same length, vowels compatible at every position
//! 2. **Prefix**: strictly longer, vowels compatible at the head
//! 3. **Suffix**: strictly longer, vowels compatible at the tail
//! 4. **Interior**: ordered subsequence, never an end-rhyme
//! 5. **Ranking**: distances non-decreasing, ties in reading order

use proptest::prelude::*;
use rhymefinder_core::{kana, CategoryMask, Consonant, Hit, Lexicon, Mora, Vowel, Word};

const KANA: &[&str] = &[
    "か", "き", "く", "け", "こ", "さ", "し", "す", "た", "つ", "な", "ま", "み", "ら", "ろ",
    "が", "ば", "ぽ", "や", "ん", "っ", "きゃ", "しゅ", "ちょ", "ふぁ",
];

const PATTERN: &[&str] = &["a", "i", "u", "e", "o", ".", "k", "s", "m", "か'", "さ^", "た-"];

fn arb_reading() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(KANA), 1..6).prop_map(|parts| parts.concat())
}

fn arb_query() -> impl Strategy<Value = String> {
    let unit = prop_oneof![
        prop::sample::select(KANA),
        prop::sample::select(PATTERN),
    ];
    prop::collection::vec(unit, 1..4).prop_map(|parts| parts.concat())
}

fn arb_lexicon() -> impl Strategy<Value = Lexicon> {
    prop::collection::vec((arb_reading(), 0usize..3), 0..40).prop_map(|entries| {
        let mut builder = Lexicon::builder();
        for (reading, bit) in entries {
            let category = CategoryMask::single(bit).unwrap_or(CategoryMask::USER);
            builder.add(category, reading.clone(), [reading]);
        }
        builder.build()
    })
}

fn arb_mora() -> impl Strategy<Value = Mora> {
    let consonant = prop::sample::select(Consonant::ALL.to_vec());
    let vowel = prop::sample::select(vec![
        Vowel::A,
        Vowel::I,
        Vowel::U,
        Vowel::E,
        Vowel::O,
        Vowel::None,
        Vowel::Any,
    ]);
    (consonant, vowel, 0u32..3).prop_map(|(c, v, s)| Mora::with_stress(c, v, s))
}

fn vowels_match(query: &[Mora], word: &[Mora]) -> bool {
    query
        .iter()
        .zip(word)
        .all(|(q, w)| q.vowel().matches(w.vowel()))
}

fn keys(hits: &[Hit<'_>]) -> Vec<(String, CategoryMask)> {
    let mut keys: Vec<_> = hits
        .iter()
        .map(|h| (h.word.reading().to_string(), h.word.category()))
        .collect();
    keys.sort();
    keys
}

fn brute<F>(lexicon: &Lexicon, keep: F) -> Vec<(String, CategoryMask)>
where
    F: Fn(&Word) -> bool,
{
    let mut keys: Vec<_> = lexicon
        .words()
        .iter()
        .filter(|w| keep(w))
        .map(|w| (w.reading().to_string(), w.category()))
        .collect();
    keys.sort();
    keys
}

fn assert_ranked(hits: &[Hit<'_>]) -> Result<(), TestCaseError> {
    for pair in hits.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        prop_assert!(a.distance <= b.distance, "distances must be non-decreasing");
        if a.distance == b.distance {
            prop_assert!(
                a.word.lexicon_cmp(b.word).is_le(),
                "ties must keep lexicon order: {} before {}",
                a.word.reading(),
                b.word.reading()
            );
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn reading_tokenizes_to_word_mora(reading in arb_reading()) {
        let word = Word::new(CategoryMask::NOUN, &reading, [reading.as_str()]);
        let tokens = kana::tokenize(&reading).unwrap();
        prop_assert_eq!(word.mora(), tokens.as_slice());
        prop_assert!(!word.mora().is_empty());
    }

    #[test]
    fn exact_equals_brute_force(lexicon in arb_lexicon(), query in arb_query()) {
        let q = kana::tokenize_query(&query).unwrap();
        let hits = lexicon.exact_match_mora(&q, None);
        let expected = brute(&lexicon, |w| w.mora().len() == q.len() && vowels_match(&q, w.mora()));
        prop_assert_eq!(keys(&hits), expected);
        assert_ranked(&hits)?;
        for hit in &hits {
            prop_assert_eq!(hit.distance, hit.word.distance_exact(&q));
        }
    }

    #[test]
    fn prefix_equals_brute_force(lexicon in arb_lexicon(), query in arb_query()) {
        let q = kana::tokenize_query(&query).unwrap();
        let hits = lexicon.prefix_match_mora(&q, None);
        let expected = brute(&lexicon, |w| w.mora().len() > q.len() && vowels_match(&q, w.mora()));
        prop_assert_eq!(keys(&hits), expected);
        assert_ranked(&hits)?;
    }

    #[test]
    fn suffix_equals_brute_force(lexicon in arb_lexicon(), query in arb_query()) {
        let q = kana::tokenize_query(&query).unwrap();
        let hits = lexicon.suffix_match_mora(&q, None);
        let expected = brute(&lexicon, |w| {
            let m = w.mora();
            m.len() > q.len() && vowels_match(&q, &m[m.len() - q.len()..])
        });
        prop_assert_eq!(keys(&hits), expected);
        assert_ranked(&hits)?;
    }

    #[test]
    fn interior_is_disjoint_from_suffix(lexicon in arb_lexicon(), query in arb_query()) {
        let q = kana::tokenize_query(&query).unwrap();
        let interior = lexicon.interior_match_mora(&q, None);
        let suffix = keys(&lexicon.suffix_match_mora(&q, None));
        for hit in &interior {
            prop_assert!(hit.word.mora().len() > q.len());
            prop_assert!(hit.distance.is_none());
            let key = (hit.word.reading().to_string(), hit.word.category());
            prop_assert!(!suffix.contains(&key), "{} is both interior and suffix", key.0);
        }
        prop_assert_eq!(keys(&interior), brute(&lexicon, |w| w.matches_interior(&q)));
        // interior hits come back in lexicon order
        for pair in interior.windows(2) {
            prop_assert!(pair[0].word.lexicon_cmp(pair[1].word).is_lt());
        }
    }

    #[test]
    fn vowel_queries_match_by_full_equality(lexicon in arb_lexicon(), vowels in "[aiueo]{1,3}") {
        let q = kana::tokenize_query(&vowels).unwrap();
        prop_assert_eq!(
            keys(&lexicon.exact_match_mora(&q, None)),
            brute(&lexicon, |w| w.matches_exact(&q))
        );
        prop_assert_eq!(
            keys(&lexicon.prefix_match_mora(&q, None)),
            brute(&lexicon, |w| w.matches_prefix(&q))
        );
        prop_assert_eq!(
            keys(&lexicon.suffix_match_mora(&q, None)),
            brute(&lexicon, |w| w.matches_suffix(&q))
        );
    }

    #[test]
    fn mora_distance_is_symmetric(a in arb_mora(), b in arb_mora()) {
        prop_assert_eq!(a.distance(&b), b.distance(&a));
        prop_assert_eq!(a.matches(&b), b.matches(&a));
    }

    #[test]
    fn highlight_follows_category(lexicon in arb_lexicon(), query in arb_query()) {
        let mask = CategoryMask::single(1).unwrap();
        for hit in lexicon.prefix_match(&query, Some(mask)).unwrap() {
            prop_assert_eq!(hit.highlighted, hit.word.category().intersects(mask));
        }
    }
}

#[test]
fn equal_distances_keep_reading_order() {
    let mut builder = Lexicon::builder();
    // inserted out of order; every reading has distance 0 against "a"
    for reading in ["わ", "な", "あ", "か", "さ", "た"] {
        builder.add(CategoryMask::NOUN, reading, [reading]);
    }
    let lexicon = builder.build();
    let hits = lexicon.exact_match("a", None).unwrap();
    let readings: Vec<&str> = hits.iter().map(|h| h.word.reading()).collect();
    assert_eq!(readings, vec!["あ", "か", "さ", "た", "な", "わ"]);
    assert!(hits.iter().all(|h| h.distance == Some(0)));
}

#[test]
fn reading_order_survives_a_distance_sort() {
    let mut builder = Lexicon::builder();
    for reading in ["まか", "たか", "さか", "かか", "ぱか"] {
        builder.add(CategoryMask::NOUN, reading, [reading]);
    }
    let lexicon = builder.build();
    let hits = lexicon.exact_match("かか", None).unwrap();
    let ranked: Vec<(&str, Option<u32>)> = hits
        .iter()
        .map(|h| (h.word.reading(), h.distance))
        .collect();
    // k/t and k/p share a cluster (1); k/s is 2; k/m is 3
    assert_eq!(
        ranked,
        vec![
            ("かか", Some(0)),
            ("たか", Some(1)),
            ("ぱか", Some(1)),
            ("さか", Some(2)),
            ("まか", Some(3)),
        ]
    );
}

#[test]
fn hits_serialize_with_word_details() {
    let mut builder = Lexicon::builder();
    builder.add(CategoryMask::VERB, "かく", ["書く", "描く"]);
    let lexicon = builder.build();
    let hits = lexicon.exact_match("かく", Some(CategoryMask::VERB)).unwrap();
    let json = serde_json::to_value(&hits).unwrap();
    assert_eq!(json[0]["word"]["reading"], "かく");
    assert_eq!(json[0]["word"]["forms"][0], "描く");
    assert_eq!(json[0]["distance"], 0);
    assert_eq!(json[0]["highlighted"], true);
}
