// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, error};

// Fast insecure non-cryptographic hash, good enough for short tile strings.
pub struct WordHasher(u64);

impl std::hash::Hasher for WordHasher {
    fn finish(&self) -> u64 {
        self.0
    }
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (std::num::Wrapping(self.0) * std::num::Wrapping(3467)).0 ^ (!b as u64);
        }
    }
}

impl Default for WordHasher {
    fn default() -> WordHasher {
        WordHasher(0)
    }
}

type WordHasherDefault = std::hash::BuildHasherDefault<WordHasher>;
pub type WordSet = std::collections::HashSet<Box<[u8]>, WordHasherDefault>;

const ACCEPTS: u32 = 0x800000;
const IS_END: u32 = 0x400000;
const ARC_MASK: u32 = 0x3fffff;

// tile in the top byte, then accepts, is_end, and 22 bits of arc index.
// siblings are contiguous and the last one has is_end.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Node(u32);

impl Node {
    #[inline(always)]
    fn new(tile: u8, accepts: bool, is_end: bool, arc_index: u32) -> Self {
        let mut x = (tile as u32) << 24 | arc_index;
        if accepts {
            x |= ACCEPTS;
        }
        if is_end {
            x |= IS_END;
        }
        Self(x)
    }

    #[inline(always)]
    pub fn tile(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline(always)]
    pub fn accepts(&self) -> bool {
        self.0 & ACCEPTS != 0
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.0 & IS_END != 0
    }

    #[inline(always)]
    pub fn arc_index(&self) -> u32 {
        self.0 & ARC_MASK
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node(tile={}, accepts={}, is_end={}, arc={})",
            self.tile(),
            self.accepts(),
            self.is_end(),
            self.arc_index()
        )
    }
}

// node 0 is the root. an arc index of 0 means no children.
pub struct Trie(Box<[Node]>);

impl std::ops::Index<u32> for Trie {
    type Output = Node;

    #[inline(always)]
    fn index(&self, i: u32) -> &Node {
        &self.0[i as usize]
    }
}

pub struct Children<'a> {
    trie: &'a Trie,
    p: u32,
}

impl Iterator for Children<'_> {
    type Item = (u8, u32);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.p == 0 {
            return None;
        }
        let node = self.trie[self.p];
        let item = (node.tile(), self.p);
        self.p = if node.is_end() { 0 } else { self.p + 1 };
        Some(item)
    }
}

impl Trie {
    // words must be sorted and deduplicated.
    fn build(words: &[Box<[u8]>]) -> error::Returns<Trie> {
        fn build_block(
            nodes: &mut Vec<Node>,
            words: &[Box<[u8]>],
            depth: usize,
        ) -> error::Returns<u32> {
            let mut groups = Vec::new();
            let mut i = 0;
            while i < words.len() {
                let tile = words[i][depth];
                let mut j = i + 1;
                while j < words.len() && words[j][depth] == tile {
                    j += 1;
                }
                groups.push((tile, i, j));
                i = j;
            }
            let block_start = nodes.len();
            if block_start + groups.len() > ARC_MASK as usize {
                return_error!(format!("too many trie nodes (over {})", ARC_MASK));
            }
            nodes.resize(block_start + groups.len(), Node(0));
            for (k, &(tile, start, end)) in groups.iter().enumerate() {
                let group = &words[start..end];
                // the word ending here, if any, sorts first.
                let accepts = group[0].len() == depth + 1;
                let rest = if accepts { &group[1..] } else { group };
                let arc_index = if rest.is_empty() {
                    0
                } else {
                    build_block(nodes, rest, depth + 1)?
                };
                nodes[block_start + k] = Node::new(tile, accepts, k + 1 == groups.len(), arc_index);
            }
            Ok(block_start as u32)
        }

        let mut nodes = vec![Node::new(0, false, true, 0)];
        if !words.is_empty() {
            let arc_index = build_block(&mut nodes, words, 0)?;
            nodes[0] = Node::new(0, false, true, arc_index);
        }
        Ok(Trie(nodes.into_boxed_slice()))
    }

    #[inline(always)]
    pub fn root(&self) -> u32 {
        0
    }

    #[inline(always)]
    pub fn children(&self, p: u32) -> Children<'_> {
        Children {
            trie: self,
            p: self[p].arc_index(),
        }
    }

    #[inline(always)]
    pub fn seek(&self, p: u32, tile: u8) -> Option<u32> {
        self.children(p)
            .find(|&(t, _)| t == tile)
            .map(|(_, child)| child)
    }

    pub fn lookup_prefix_node(&self, prefix: &[u8]) -> Option<u32> {
        prefix
            .iter()
            .try_fold(self.root(), |p, &tile| self.seek(p, tile))
    }

    pub fn is_complete_word(&self, word: &[u8]) -> bool {
        !word.is_empty()
            && self
                .lookup_prefix_node(word)
                .is_some_and(|p| self[p].accepts())
    }
}

// the trie drives search, the set answers final membership.
pub struct Dictionary {
    trie: Trie,
    words: WordSet,
}

impl Dictionary {
    pub fn from_words<I, S>(alphabet: &alphabet::Alphabet, words: I) -> error::Returns<Dictionary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut machine_words = Vec::new();
        for word in words {
            let s = word.as_ref().trim();
            if s.is_empty() {
                continue;
            }
            let mut v = Vec::with_capacity(s.len());
            for c in s.chars() {
                match alphabet.letter_of_char(c) {
                    Some(tile) => v.push(tile),
                    None => {
                        return_error!(format!("invalid letter {:?} in {:?}", c, s));
                    }
                }
            }
            machine_words.push(v.into_boxed_slice());
        }
        machine_words.sort_unstable();
        machine_words.dedup();
        let trie = Trie::build(&machine_words)?;
        let words = machine_words.into_iter().collect::<WordSet>();
        Ok(Dictionary { trie, words })
    }

    // first column of each record, no header.
    pub fn from_reader<R: std::io::Read>(
        alphabet: &alphabet::Alphabet,
        reader: R,
    ) -> error::Returns<Dictionary> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut words = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            if let Some(word) = record.get(0) {
                words.push(word.to_string());
            }
        }
        Self::from_words(alphabet, &words)
    }

    pub fn from_file(alphabet: &alphabet::Alphabet, path: &str) -> error::Returns<Dictionary> {
        Self::from_reader(alphabet, std::fs::File::open(path)?)
    }

    #[inline(always)]
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    pub fn lookup_prefix_node(&self, prefix: &[u8]) -> Option<u32> {
        self.trie.lookup_prefix_node(prefix)
    }

    #[inline(always)]
    pub fn is_complete_word(&self, word: &[u8]) -> bool {
        self.trie.is_complete_word(word)
    }

    // plain tiles, no blank flag.
    #[inline(always)]
    pub fn contains(&self, word: &[u8]) -> bool {
        self.words.contains(word)
    }
}
