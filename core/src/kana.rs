//! Kana → mora tokenizer and the pattern query mini-language.
//!
//! Readings are written in hiragana or katakana. Queries may additionally use:
//!
//! | symbol            | meaning                                      |
//! |-------------------|----------------------------------------------|
//! | `a i u e o`       | any consonant, fixed vowel                   |
//! | `k g s t ...`     | fixed consonant, any vowel                   |
//! | `.`               | any mora                                     |
//! | `'`               | add stress to the previous mora              |
//! | `^`               | wildcard the previous mora's consonant       |
//! | `-`               | wildcard the previous mora's vowel           |
//!
//! Two-character contracted syllables (きゃ, ティ, ...) are tried before the
//! single-character table. Anything else aborts the whole call.

use crate::error::TokenizeError;
use crate::mora::{Consonant, Mora, Vowel};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

use Consonant as C;
use Vowel as V;

/// Contracted syllables, hiragana spelling. Katakana spellings are derived.
const DIGRAPHS: &[(&str, Consonant, Vowel)] = &[
    ("きゃ", C::Ky, V::A),
    ("きゅ", C::Ky, V::U),
    ("きぇ", C::Ky, V::E),
    ("きょ", C::Ky, V::O),
    ("ぎゃ", C::Gy, V::A),
    ("ぎゅ", C::Gy, V::U),
    ("ぎぇ", C::Gy, V::E),
    ("ぎょ", C::Gy, V::O),
    ("しゃ", C::Sh, V::A),
    ("しゅ", C::Sh, V::U),
    ("しぇ", C::Sh, V::E),
    ("しょ", C::Sh, V::O),
    ("じゃ", C::J, V::A),
    ("じゅ", C::J, V::U),
    ("じぇ", C::J, V::E),
    ("じょ", C::J, V::O),
    ("ぢゃ", C::J, V::A),
    ("ぢゅ", C::J, V::U),
    ("ぢぇ", C::J, V::E),
    ("ぢょ", C::J, V::O),
    ("つぁ", C::Ts, V::A),
    ("つぃ", C::Ts, V::I),
    ("つぇ", C::Ts, V::E),
    ("つぉ", C::Ts, V::O),
    ("ちゃ", C::Ch, V::A),
    ("ちゅ", C::Ch, V::U),
    ("ちぇ", C::Ch, V::E),
    ("ちょ", C::Ch, V::O),
    ("にゃ", C::Ny, V::A),
    ("にゅ", C::Ny, V::U),
    ("にぇ", C::Ny, V::E),
    ("にょ", C::Ny, V::O),
    ("ひゃ", C::Hy, V::A),
    ("ひゅ", C::Hy, V::U),
    ("ひぇ", C::Hy, V::E),
    ("ひょ", C::Hy, V::O),
    ("びゃ", C::By, V::A),
    ("びゅ", C::By, V::U),
    ("びぇ", C::By, V::E),
    ("びょ", C::By, V::O),
    ("ぴゃ", C::Py, V::A),
    ("ぴゅ", C::Py, V::U),
    ("ぴぇ", C::Py, V::E),
    ("ぴょ", C::Py, V::O),
    ("みゃ", C::My, V::A),
    ("みゅ", C::My, V::U),
    ("みぇ", C::My, V::E),
    ("みょ", C::My, V::O),
    ("りゃ", C::Ry, V::A),
    ("りゅ", C::Ry, V::U),
    ("りぇ", C::Ry, V::E),
    ("りょ", C::Ry, V::O),
    ("ふぁ", C::F, V::A),
    ("ふぃ", C::Fy, V::I),
    ("ふゅ", C::Fy, V::U),
    ("ふぇ", C::F, V::E),
    ("ふぉ", C::F, V::O),
    ("すぃ", C::S, V::I),
    ("ずぃ", C::Dz, V::I),
    ("てぃ", C::Ty, V::I),
    ("てゅ", C::Ty, V::U),
    ("とぅ", C::T, V::U),
    ("でぃ", C::Dy, V::I),
    ("でゅ", C::Dy, V::U),
    ("どぅ", C::D, V::U),
    ("うぁ", C::W, V::A),
    ("うぃ", C::W, V::I),
    ("うぇ", C::W, V::E),
    ("うぉ", C::W, V::O),
    ("ゔぁ", C::V, V::A),
    ("ゔぃ", C::V, V::I),
    ("ゔぇ", C::V, V::E),
    ("ゔぉ", C::V, V::O),
    ("くぁ", C::Kw, V::A),
    ("くぃ", C::Kw, V::I),
    ("くぇ", C::Kw, V::E),
    ("くぉ", C::Kw, V::O),
    ("ぐぁ", C::Gw, V::A),
    ("ぐぃ", C::Gw, V::I),
    ("ぐぇ", C::Gw, V::E),
    ("ぐぉ", C::Gw, V::O),
    ("いぇ", C::Y, V::E),
];

/// Plain syllables, hiragana spelling. Katakana spellings are derived.
const SYLLABLES: &[(char, Consonant, Vowel)] = &[
    ('あ', C::None, V::A),
    ('い', C::None, V::I),
    ('う', C::None, V::U),
    ('え', C::None, V::E),
    ('お', C::None, V::O),
    ('か', C::K, V::A),
    ('き', C::Ky, V::I),
    ('く', C::K, V::U),
    ('け', C::K, V::E),
    ('こ', C::K, V::O),
    ('が', C::G, V::A),
    ('ぎ', C::Gy, V::I),
    ('ぐ', C::G, V::U),
    ('げ', C::G, V::E),
    ('ご', C::G, V::O),
    ('さ', C::S, V::A),
    ('し', C::Sh, V::I),
    ('す', C::S, V::U),
    ('せ', C::S, V::E),
    ('そ', C::S, V::O),
    ('ざ', C::Dz, V::A),
    ('じ', C::J, V::I),
    ('ず', C::Dz, V::U),
    ('ぜ', C::Dz, V::E),
    ('ぞ', C::Dz, V::O),
    ('た', C::T, V::A),
    ('ち', C::Ch, V::I),
    ('つ', C::Ts, V::U),
    ('て', C::T, V::E),
    ('と', C::T, V::O),
    ('だ', C::D, V::A),
    ('ぢ', C::J, V::I),
    ('づ', C::Dz, V::U),
    ('で', C::D, V::E),
    ('ど', C::D, V::O),
    ('な', C::N, V::A),
    ('に', C::Ny, V::I),
    ('ぬ', C::N, V::U),
    ('ね', C::N, V::E),
    ('の', C::N, V::O),
    ('は', C::H, V::A),
    ('ひ', C::Hy, V::I),
    ('ふ', C::F, V::U),
    ('へ', C::H, V::E),
    ('ほ', C::H, V::O),
    ('ば', C::B, V::A),
    ('び', C::By, V::I),
    ('ぶ', C::B, V::U),
    ('べ', C::B, V::E),
    ('ぼ', C::B, V::O),
    ('ぱ', C::P, V::A),
    ('ぴ', C::Py, V::I),
    ('ぷ', C::P, V::U),
    ('ぺ', C::P, V::E),
    ('ぽ', C::P, V::O),
    ('ま', C::M, V::A),
    ('み', C::My, V::I),
    ('む', C::M, V::U),
    ('め', C::M, V::E),
    ('も', C::M, V::O),
    ('や', C::Y, V::A),
    ('ゆ', C::Y, V::U),
    ('よ', C::Y, V::O),
    ('ら', C::R, V::A),
    ('り', C::Ry, V::I),
    ('る', C::R, V::U),
    ('れ', C::R, V::E),
    ('ろ', C::R, V::O),
    ('わ', C::W, V::A),
    ('を', C::None, V::O),
    // moraic nasal and geminate marker
    ('ん', C::None, V::None),
    ('っ', C::None, V::None),
];

/// ASCII pattern letters.
const PATTERN_LETTERS: &[(char, Consonant, Vowel)] = &[
    ('a', C::Any, V::A),
    ('i', C::Any, V::I),
    ('u', C::Any, V::U),
    ('e', C::Any, V::E),
    ('o', C::Any, V::O),
    ('.', C::Any, V::Any),
    ('k', C::K, V::Any),
    ('K', C::Ky, V::Any),
    ('q', C::Kw, V::Any),
    ('g', C::G, V::Any),
    ('G', C::Gy, V::Any),
    ('Q', C::Gw, V::Any),
    ('t', C::T, V::Any),
    ('T', C::Ty, V::Any),
    ('d', C::D, V::Any),
    ('D', C::Dy, V::Any),
    ('p', C::P, V::Any),
    ('P', C::Py, V::Any),
    ('b', C::B, V::Any),
    ('B', C::By, V::Any),
    ('m', C::M, V::Any),
    ('M', C::My, V::Any),
    ('r', C::R, V::Any),
    ('R', C::Ry, V::Any),
    ('s', C::S, V::Any),
    ('S', C::Sh, V::Any),
    ('n', C::N, V::Any),
    ('N', C::Ny, V::Any),
    ('h', C::H, V::Any),
    ('H', C::Hy, V::Any),
    ('y', C::Y, V::Any),
    ('w', C::W, V::Any),
    ('v', C::V, V::Any),
    ('z', C::Dz, V::Any),
    ('Z', C::J, V::Any),
    ('c', C::Ts, V::Any),
    ('C', C::Ch, V::Any),
    ('f', C::F, V::Any),
    ('F', C::Fy, V::Any),
];

const LONG_VOWEL_MARK: char = 'ー';
const STRESS_MARK: char = '\'';
const DROP_CONSONANT_MARK: char = '^';
const DROP_VOWEL_MARK: char = '-';

/// Map a hiragana character to its katakana counterpart.
fn to_katakana(ch: char) -> char {
    match ch {
        'ぁ'..='ゖ' => char::from_u32(ch as u32 + 0x60).unwrap_or(ch),
        _ => ch,
    }
}

static DIGRAPH_TABLE: Lazy<HashMap<(char, char), Mora>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for &(kana, c, v) in DIGRAPHS {
        let mut chars = kana.chars();
        if let (Some(first), Some(second)) = (chars.next(), chars.next()) {
            let mora = Mora::new(c, v);
            m.insert((first, second), mora);
            m.insert((to_katakana(first), to_katakana(second)), mora);
            // ヴ has no common hiragana spelling; accept it before either small vowel.
            if first == 'ゔ' {
                m.insert(('ヴ', second), mora);
            }
        }
    }
    m
});

static SYLLABLE_TABLE: Lazy<HashMap<char, Mora>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for &(kana, c, v) in SYLLABLES {
        let mora = Mora::new(c, v);
        m.insert(kana, mora);
        m.insert(to_katakana(kana), mora);
    }
    for &(letter, c, v) in PATTERN_LETTERS {
        m.insert(letter, Mora::new(c, v));
    }
    m
});

/// Trim surrounding whitespace and apply NFKC, folding half-width katakana,
/// full-width ASCII and decomposed voicing marks onto the tokenizer tables.
pub fn normalize(text: &str) -> String {
    text.trim().nfkc().collect()
}

/// Tokenize already-normalized text into morae.
///
/// The result is all-or-nothing: an unsupported character yields an error
/// and no morae.
pub fn tokenize(text: &str) -> Result<Vec<Mora>, TokenizeError> {
    let chars: Vec<char> = text.chars().collect();
    let mut out: Vec<Mora> = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if let Some(&next) = chars.get(i + 1) {
            if let Some(mora) = DIGRAPH_TABLE.get(&(ch, next)) {
                out.push(*mora);
                i += 2;
                continue;
            }
        }
        match ch {
            LONG_VOWEL_MARK => {
                if let Some(last) = out.last() {
                    let long = last.long_vowel();
                    out.push(long);
                }
            }
            STRESS_MARK => rewrite_last(&mut out, Mora::stressed),
            DROP_CONSONANT_MARK => rewrite_last(&mut out, Mora::ignore_consonant),
            DROP_VOWEL_MARK => rewrite_last(&mut out, Mora::ignore_vowel),
            _ => match SYLLABLE_TABLE.get(&ch) {
                Some(mora) => out.push(*mora),
                None => {
                    return Err(TokenizeError::UnsupportedSymbol {
                        symbol: ch,
                        position: i,
                    })
                }
            },
        }
        i += 1;
    }
    Ok(out)
}

/// Normalize then tokenize a user query.
pub fn tokenize_query(text: &str) -> Result<Vec<Mora>, TokenizeError> {
    tokenize(&normalize(text))
}

/// Postfix modifiers act on the last emitted mora; a modifier with nothing
/// before it is ignored.
fn rewrite_last(out: &mut [Mora], rewrite: fn(Mora) -> Mora) {
    if let Some(last) = out.last_mut() {
        *last = rewrite(*last);
    }
}
