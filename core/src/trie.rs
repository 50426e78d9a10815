/// Vowel-keyed tries for exact, prefix and suffix retrieval.
use crate::mora::{Mora, Vowel};
use crate::word::Word;

/// One trie level. Children are indexed by [`Vowel::slot`]; `bucket` holds
/// the indices of words whose mora path ends exactly here.
#[derive(Debug, Default)]
struct TrieNode {
    bucket: Vec<usize>,
    children: [Option<Box<TrieNode>>; Vowel::SLOTS],
}

impl TrieNode {
    fn new() -> Self {
        Self::default()
    }

    /// Walk (creating as needed) along `vowels` and drop `index` into the
    /// final node's bucket.
    fn insert<I: Iterator<Item = Vowel>>(&mut self, vowels: I, index: usize) -> usize {
        let mut created = 0;
        let mut node = self;
        for vowel in vowels {
            // Word readings never carry the wildcard vowel; `Word::new` clears
            // such sequences, so the fallback slot is unreachable in practice.
            let slot = vowel.slot().unwrap_or(Vowel::None as usize);
            node = node.children[slot].get_or_insert_with(|| {
                created += 1;
                Box::new(TrieNode::new())
            });
        }
        node.bucket.push(index);
        created
    }

    fn children(&self) -> impl Iterator<Item = &TrieNode> {
        self.children.iter().filter_map(|c| c.as_deref())
    }

    /// Descend by the vowel at each step of `path`, fanning out over every
    /// child when the vowel is the wildcard, and call `visit` on each node
    /// reached at the end of the path.
    fn walk<'a, F>(&'a self, path: &[Vowel], visit: &mut F)
    where
        F: FnMut(&'a TrieNode),
    {
        let Some((vowel, rest)) = path.split_first() else {
            visit(self);
            return;
        };
        match vowel.slot() {
            Some(slot) => {
                if let Some(child) = self.children[slot].as_deref() {
                    child.walk(rest, visit);
                }
            }
            None => {
                for child in self.children() {
                    child.walk(rest, visit);
                }
            }
        }
    }

    /// Every bucket in this subtree, this node included.
    fn collect_all(&self, out: &mut Vec<usize>) {
        out.extend_from_slice(&self.bucket);
        for child in self.children() {
            child.collect_all(out);
        }
    }

    /// Every bucket strictly below this node.
    fn collect_below(&self, out: &mut Vec<usize>) {
        for child in self.children() {
            child.collect_all(out);
        }
    }
}

/// Forward and reverse tries over one word array.
///
/// Both tries branch only on vowel class: consonants never restrict
/// retrieval, they only affect ranking. Results are indices into the slice
/// the index was built from, in traversal order.
///
/// # Example
/// ```
/// use rhymefinder_core::{kana, CategoryMask, MoraIndex, Word};
///
/// let words = vec![
///     Word::new(CategoryMask::NOUN, "かさ", ["傘"]),
///     Word::new(CategoryMask::NOUN, "はな", ["花"]),
///     Word::new(CategoryMask::NOUN, "たまご", ["卵"]),
/// ];
/// let index = MoraIndex::build(&words);
///
/// let query = kana::tokenize("まま").unwrap();
/// assert_eq!(index.exact(&query), vec![0, 1]);
/// assert_eq!(index.prefix(&query), vec![2]);
/// ```
#[derive(Debug, Default)]
pub struct MoraIndex {
    forward: TrieNode,
    reverse: TrieNode,
    nodes: usize,
}

impl MoraIndex {
    /// Build both tries in one pass, inserting every word twice.
    pub fn build(words: &[Word]) -> Self {
        let mut index = MoraIndex::default();
        for (i, word) in words.iter().enumerate() {
            let mora = word.mora();
            index.nodes += index.forward.insert(mora.iter().map(Mora::vowel), i);
            index.nodes += index.reverse.insert(mora.iter().rev().map(Mora::vowel), i);
        }
        index
    }

    /// Number of non-root nodes across both tries.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Words whose vowel path has exactly the query's length and matches it.
    pub fn exact(&self, query: &[Mora]) -> Vec<usize> {
        let path: Vec<Vowel> = query.iter().map(Mora::vowel).collect();
        let mut out = Vec::new();
        self.forward
            .walk(&path, &mut |node: &TrieNode| out.extend_from_slice(&node.bucket));
        out
    }

    /// Words strictly longer than the query whose leading vowels match it.
    pub fn prefix(&self, query: &[Mora]) -> Vec<usize> {
        let path: Vec<Vowel> = query.iter().map(Mora::vowel).collect();
        let mut out = Vec::new();
        self.forward
            .walk(&path, &mut |node: &TrieNode| node.collect_below(&mut out));
        out
    }

    /// Words strictly longer than the query whose trailing vowels match it.
    pub fn suffix(&self, query: &[Mora]) -> Vec<usize> {
        let path: Vec<Vowel> = query.iter().rev().map(Mora::vowel).collect();
        let mut out = Vec::new();
        self.reverse
            .walk(&path, &mut |node: &TrieNode| node.collect_below(&mut out));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryMask;
    use crate::kana;

    fn words(readings: &[&str]) -> Vec<Word> {
        readings
            .iter()
            .map(|r| Word::new(CategoryMask::NOUN, r, [*r]))
            .collect()
    }

    fn q(text: &str) -> Vec<Mora> {
        kana::tokenize(text).unwrap()
    }

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort_unstable();
        v
    }

    #[test]
    fn exact_ignores_consonants() {
        let ws = words(&["かさ", "はな", "たまご", "いか"]);
        let index = MoraIndex::build(&ws);
        assert_eq!(sorted(index.exact(&q("さか"))), vec![0, 1]);
        assert_eq!(index.exact(&q("いあ")), vec![3]);
        assert!(index.exact(&q("お")).is_empty());
    }

    #[test]
    fn wildcard_vowel_fans_out() {
        let ws = words(&["かさ", "かす", "かん", "か"]);
        let index = MoraIndex::build(&ws);
        assert_eq!(sorted(index.exact(&q("a."))), vec![0, 1, 2]);
        assert_eq!(sorted(index.exact(&q("k-"))), vec![3]);
        assert_eq!(sorted(index.prefix(&q("."))), vec![0, 1, 2]);
    }

    #[test]
    fn prefix_is_strictly_longer() {
        let ws = words(&["か", "かく", "かくご", "さくら"]);
        let index = MoraIndex::build(&ws);
        assert_eq!(sorted(index.prefix(&q("か"))), vec![1, 2, 3]);
        assert_eq!(sorted(index.prefix(&q("かく"))), vec![2, 3]);
        assert!(index.prefix(&q("かくご")).is_empty());
    }

    #[test]
    fn suffix_reads_the_query_backwards() {
        let ws = words(&["く", "かく", "まく", "かくご", "あさひ"]);
        let index = MoraIndex::build(&ws);
        assert_eq!(sorted(index.suffix(&q("u"))), vec![1, 2]);
        assert_eq!(sorted(index.suffix(&q("あく"))), vec![]);
        assert_eq!(sorted(index.suffix(&q("さひ"))), vec![4]);
        assert_eq!(sorted(index.suffix(&q("ひ"))), vec![4]);
        assert_eq!(sorted(index.suffix(&q("o"))), vec![3]);
    }

    #[test]
    fn every_word_lands_in_one_bucket_per_trie() {
        let ws = words(&["かさ", "はな", "たまご", "いか", "ラーメン", "がっこう"]);
        let index = MoraIndex::build(&ws);
        let mut forward = Vec::new();
        index.forward.collect_all(&mut forward);
        let mut reverse = Vec::new();
        index.reverse.collect_all(&mut reverse);
        assert_eq!(sorted(forward), (0..ws.len()).collect::<Vec<_>>());
        assert_eq!(sorted(reverse), (0..ws.len()).collect::<Vec<_>>());
        assert!(index.node_count() > 0);
    }

    #[test]
    fn empty_query_reaches_the_root() {
        let ws = words(&["か"]);
        let index = MoraIndex::build(&ws);
        assert!(index.exact(&[]).is_empty());
        assert_eq!(index.prefix(&[]), vec![0]);
    }
}
