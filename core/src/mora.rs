//! Mora model: the atomic phonetic unit and its distance metric.
//!
//! A [`Mora`] is a (consonant, vowel, stress) triple. Consonant labels follow
//! X-SAMPA loosely (`k_j` for a palatalized k, `4` for the alveolar tap, ...).
//!
//! Two kinds of equality exist:
//! - structural `==`, which compares the triple field by field;
//! - [`Mora::matches`], the wildcard equality used for retrieval. `Any` on
//!   either side matches everything, so it is not transitive: `ka` matches
//!   `*a` and `*a` matches `ma`, but `ka` does not match `ma`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Consonant class of a mora.
///
/// Variants are grouped into ten clusters by place and manner of
/// articulation; see [`Consonant::cluster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Consonant {
    P,
    T,
    K,
    Kw,
    S,
    H,
    Ts,
    /// Bilabial fricative, as in ふ.
    F,
    B,
    G,
    Gw,
    D,
    V,
    Dz,
    W,
    /// Alveolar tap, as in ら.
    R,
    M,
    N,
    Py,
    Ty,
    Ky,
    /// Palato-alveolar fricative, as in し.
    Sh,
    /// Palatal fricative, as in ひ.
    Hy,
    /// Palato-alveolar affricate, as in ち.
    Ch,
    Fy,
    By,
    Gy,
    Dy,
    /// Voiced palato-alveolar affricate, as in じ.
    J,
    /// Palatal approximant, as in や.
    Y,
    Ry,
    My,
    /// Palatal nasal, as in に.
    Ny,
    /// No consonant: bare vowels, the moraic nasal and the geminate marker.
    None,
    /// Query wildcard; matches every consonant including `None`.
    Any,
}

impl Consonant {
    /// Number of concrete consonant classes (every variant except `Any`).
    pub const COUNT: usize = 34;

    /// All concrete consonant classes in declaration order.
    pub const ALL: [Consonant; Consonant::COUNT] = [
        Consonant::P,
        Consonant::T,
        Consonant::K,
        Consonant::Kw,
        Consonant::S,
        Consonant::H,
        Consonant::Ts,
        Consonant::F,
        Consonant::B,
        Consonant::G,
        Consonant::Gw,
        Consonant::D,
        Consonant::V,
        Consonant::Dz,
        Consonant::W,
        Consonant::R,
        Consonant::M,
        Consonant::N,
        Consonant::Py,
        Consonant::Ty,
        Consonant::Ky,
        Consonant::Sh,
        Consonant::Hy,
        Consonant::Ch,
        Consonant::Fy,
        Consonant::By,
        Consonant::Gy,
        Consonant::Dy,
        Consonant::J,
        Consonant::Y,
        Consonant::Ry,
        Consonant::My,
        Consonant::Ny,
        Consonant::None,
    ];

    /// Articulation cluster (0..10) of a concrete consonant; `None` for `Any`.
    pub const fn cluster(self) -> Option<usize> {
        use Consonant::*;
        match self {
            P | T | K | Kw => Some(0),
            S | H | Ts | F => Some(1),
            B | G | Gw | D | V => Some(2),
            Dz | W | R | None => Some(3),
            M | N => Some(4),
            Py | Ty | Ky => Some(5),
            Sh | Hy | Ch | Fy => Some(6),
            By | Gy | Dy => Some(7),
            J | Y | Ry => Some(8),
            My | Ny => Some(9),
            Any => Option::None,
        }
    }

    /// Distance between two consonants: 0 when identical or either side is
    /// `Any`, otherwise the cluster-to-cluster cost.
    pub fn distance(self, other: Consonant) -> u32 {
        match (self.table_index(), other.table_index()) {
            (Some(a), Some(b)) => u32::from(CONSONANT_DISTANCE[a][b]),
            _ => 0,
        }
    }

    pub fn is_wildcard(self) -> bool {
        self == Consonant::Any
    }

    /// X-SAMPA-like label; empty for `None`, `*` for `Any`.
    pub fn label(self) -> &'static str {
        use Consonant::*;
        match self {
            P => "p",
            T => "t",
            K => "k",
            Kw => "k_w",
            S => "s",
            H => "h",
            Ts => "ts",
            F => "p\\",
            B => "b",
            G => "g",
            Gw => "g_w",
            D => "d",
            V => "v",
            Dz => "dz",
            W => "w",
            R => "4",
            M => "m",
            N => "n",
            Py => "p_j",
            Ty => "t_j",
            Ky => "k_j",
            Sh => "S",
            Hy => "C",
            Ch => "tS",
            Fy => "p\\_j",
            By => "b_j",
            Gy => "g_j",
            Dy => "d_j",
            J => "dZ",
            Y => "j",
            Ry => "4_j",
            My => "m_j",
            Ny => "J",
            None => "",
            Any => "*",
        }
    }

    const fn table_index(self) -> Option<usize> {
        match self {
            Consonant::Any => Option::None,
            other => Some(other as usize),
        }
    }
}

/// Vowel class of a mora.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Vowel {
    A,
    I,
    U,
    E,
    O,
    /// No vowel: the moraic nasal and the geminate marker.
    None,
    /// Query wildcard; never stored in a trie.
    Any,
}

impl Vowel {
    /// Number of vowel classes a trie node can branch on.
    pub const SLOTS: usize = 6;

    /// Trie child slot for this vowel, `None` for the wildcard.
    pub const fn slot(self) -> Option<usize> {
        match self {
            Vowel::Any => Option::None,
            other => Some(other as usize),
        }
    }

    pub fn is_wildcard(self) -> bool {
        self == Vowel::Any
    }

    /// Wildcard-aware vowel equality.
    pub fn matches(self, other: Vowel) -> bool {
        self == other || self.is_wildcard() || other.is_wildcard()
    }

    pub fn label(self) -> &'static str {
        match self {
            Vowel::A => "a",
            Vowel::I => "i",
            Vowel::U => "M",
            Vowel::E => "e",
            Vowel::O => "o",
            Vowel::None => "N",
            Vowel::Any => "*",
        }
    }
}

// Cluster order: {p t k k_w} {s h ts p\} {b g g_w d v} {dz w 4 none} {m n}
// {p_j t_j k_j} {S C tS p\_j} {b_j g_j d_j} {dZ j 4_j} {m_j J}
const CLUSTER_DISTANCE: [[u8; 10]; 10] = [
    [1, 2, 2, 3, 3, 4, 5, 5, 6, 6],
    [2, 1, 3, 2, 4, 5, 4, 6, 5, 7],
    [2, 3, 1, 2, 2, 5, 6, 4, 5, 5],
    [3, 2, 2, 1, 3, 6, 5, 5, 4, 6],
    [3, 4, 2, 3, 1, 6, 7, 5, 6, 4],
    [4, 5, 5, 6, 6, 1, 2, 2, 3, 3],
    [5, 4, 6, 5, 7, 2, 2, 2, 3, 3],
    [5, 6, 4, 5, 5, 2, 2, 1, 2, 2],
    [6, 5, 5, 4, 6, 3, 3, 2, 1, 3],
    [6, 7, 5, 6, 4, 3, 3, 2, 3, 1],
];

/// Consonant-by-consonant distance, expanded from the cluster matrix at
/// compile time. The diagonal is zero.
static CONSONANT_DISTANCE: [[u8; Consonant::COUNT]; Consonant::COUNT] = build_distance_table();

const fn build_distance_table() -> [[u8; Consonant::COUNT]; Consonant::COUNT] {
    let mut table = [[0u8; Consonant::COUNT]; Consonant::COUNT];
    let mut a = 0;
    while a < Consonant::COUNT {
        let mut b = 0;
        while b < Consonant::COUNT {
            if a != b {
                let ca = match Consonant::ALL[a].cluster() {
                    Some(c) => c,
                    Option::None => 0,
                };
                let cb = match Consonant::ALL[b].cluster() {
                    Some(c) => c,
                    Option::None => 0,
                };
                table[a][b] = CLUSTER_DISTANCE[ca][cb];
            }
            b += 1;
        }
        a += 1;
    }
    table
}

/// A single phonetic unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mora {
    consonant: Consonant,
    vowel: Vowel,
    stress: u32,
}

impl Mora {
    pub const fn new(consonant: Consonant, vowel: Vowel) -> Self {
        Self {
            consonant,
            vowel,
            stress: 0,
        }
    }

    pub const fn with_stress(consonant: Consonant, vowel: Vowel, stress: u32) -> Self {
        Self {
            consonant,
            vowel,
            stress,
        }
    }

    /// Full wildcard, `.` in the query language.
    pub const fn any() -> Self {
        Self::new(Consonant::Any, Vowel::Any)
    }

    pub fn consonant(&self) -> Consonant {
        self.consonant
    }

    pub fn vowel(&self) -> Vowel {
        self.vowel
    }

    pub fn stress(&self) -> u32 {
        self.stress
    }

    /// Same mora with one more unit of stress.
    pub fn stressed(self) -> Self {
        Self {
            stress: self.stress.saturating_add(1),
            ..self
        }
    }

    /// Same vowel and stress, consonant forced to the wildcard.
    pub fn ignore_consonant(self) -> Self {
        Self {
            consonant: Consonant::Any,
            ..self
        }
    }

    /// Same consonant and stress, vowel forced to the wildcard.
    pub fn ignore_vowel(self) -> Self {
        Self {
            vowel: Vowel::Any,
            ..self
        }
    }

    /// The bare vowel of this mora, as produced by the elongation mark.
    pub fn long_vowel(self) -> Self {
        Self::new(Consonant::None, self.vowel)
    }

    /// True when either component is a wildcard or stress is set; such morae
    /// only come from queries.
    pub fn is_pattern(&self) -> bool {
        self.consonant.is_wildcard() || self.vowel.is_wildcard() || self.stress > 0
    }

    /// Wildcard equality.
    pub fn matches(&self, other: &Mora) -> bool {
        (self.consonant == other.consonant
            || self.consonant.is_wildcard()
            || other.consonant.is_wildcard())
            && self.vowel.matches(other.vowel)
    }

    /// Mismatch cost between two morae with compatible vowels. Stress on
    /// either side amplifies the consonant distance. Saturates at `u32::MAX`.
    pub fn distance(&self, other: &Mora) -> u32 {
        1u32.saturating_add(self.stress)
            .saturating_add(other.stress)
            .saturating_mul(self.consonant.distance(other.consonant))
    }
}

impl fmt::Display for Mora {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.consonant.label(), self.vowel.label())?;
        for _ in 0..self.stress {
            f.write_str("'")?;
        }
        Ok(())
    }
}
