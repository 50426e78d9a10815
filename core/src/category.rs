//! Vocabulary categories as a fixed 32-bit set.
//!
//! Bit *i* belongs to `CATEGORY_NAMES[i]`. The order is significant: category
//! source files are named after these entries and loaded in this order. The
//! last bit is reserved for user-defined entries.

use crate::error::CategoryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Part-of-speech categories, in bit order.
pub const CATEGORY_NAMES: [&str; 32] = [
    "名詞・一般",
    "名詞・サ変接続",
    "名詞・ナイ形容詞語幹",
    "名詞・形容動詞語幹",
    "動詞・自立・サ変・－スル",
    "動詞・自立・サ変・－ズル",
    "動詞・自立・一段",
    "動詞・自立・五段・カ行イ音便",
    "動詞・自立・五段・カ行促音便",
    "動詞・自立・五段・カ行促音便ユク",
    "動詞・自立・五段・ガ行",
    "動詞・自立・五段・サ行",
    "動詞・自立・五段・タ行",
    "動詞・自立・五段・ナ行",
    "動詞・自立・五段・バ行",
    "動詞・自立・五段・マ行",
    "動詞・自立・五段・ラ行",
    "動詞・自立・五段・ワ行ウ音便",
    "動詞・自立・五段・ワ行促音便",
    "動詞・非自立・一段",
    "動詞・非自立・五段・カ行イ音便",
    "動詞・非自立・五段・サ行",
    "動詞・非自立・五段・マ行",
    "動詞・非自立・五段・ラ行",
    "動詞・非自立・五段・ラ行特殊",
    "動詞・非自立・五段・ワ行促音便",
    "形容詞・アウオ段",
    "形容詞・イ段",
    "副詞・一般",
    "副詞・助詞類接続",
    "連体詞",
    "ユーザー定義",
];

/// Index of the reserved user-defined category.
pub const USER_CATEGORY: usize = 31;

/// A set of vocabulary categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CategoryMask(u32);

impl CategoryMask {
    pub const EMPTY: CategoryMask = CategoryMask(0);

    pub const NOUN: CategoryMask = CategoryMask(0x0000_000F);
    pub const VERB_INDEPENDENT: CategoryMask = CategoryMask(0x0007_FFF0);
    pub const VERB_DEPENDENT: CategoryMask = CategoryMask(0x03F8_0000);
    pub const VERB: CategoryMask = CategoryMask(0x03FF_FFF0);
    pub const ADJECTIVE: CategoryMask = CategoryMask(0x0C00_0000);
    pub const ADVERB: CategoryMask = CategoryMask(0x3000_0000);
    pub const ADNOMINAL: CategoryMask = CategoryMask(0x4000_0000);
    pub const USER: CategoryMask = CategoryMask(0x8000_0000);
    pub const ALL: CategoryMask = CategoryMask(u32::MAX);

    pub const fn from_bits(bits: u32) -> Self {
        CategoryMask(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Mask holding only category `index`; `None` past bit 31.
    pub fn single(index: usize) -> Option<Self> {
        (index < CATEGORY_NAMES.len()).then(|| CategoryMask(1 << index))
    }

    /// Mask of a category looked up by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        CATEGORY_NAMES
            .iter()
            .position(|n| *n == name.trim())
            .and_then(Self::single)
    }

    /// Union of several named categories. Group aliases (`noun`, `verb`,
    /// `adjective`, `adverb`, `adnominal`, `user`, `all`) are accepted too.
    /// Fails on the first unknown name.
    pub fn from_names<I, S>(names: I) -> Result<Self, CategoryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = CategoryMask::EMPTY;
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let part = Self::from_group(name)
                .or_else(|| Self::from_name(name))
                .ok_or_else(|| CategoryError::UnknownCategory(name.to_string()))?;
            mask |= part;
        }
        Ok(mask)
    }

    fn from_group(alias: &str) -> Option<Self> {
        match alias.to_ascii_lowercase().as_str() {
            "noun" => Some(Self::NOUN),
            "verb" => Some(Self::VERB),
            "adjective" => Some(Self::ADJECTIVE),
            "adverb" => Some(Self::ADVERB),
            "adnominal" => Some(Self::ADNOMINAL),
            "user" => Some(Self::USER),
            "all" => Some(Self::ALL),
            _ => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: CategoryMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: CategoryMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Names of every category in this set, in bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        CATEGORY_NAMES
            .iter()
            .enumerate()
            .filter(move |(i, _)| self.0 & (1 << i) != 0)
            .map(|(_, n)| *n)
    }
}

impl BitOr for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: Self) -> Self {
        CategoryMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for CategoryMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CategoryMask {
    type Output = CategoryMask;

    fn bitand(self, rhs: Self) -> Self {
        CategoryMask(self.0 & rhs.0)
    }
}

impl fmt::Display for CategoryMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
