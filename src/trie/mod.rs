//! 26-ary prefix trie over uppercase `A-Z` words.
//!
//! Nodes live in an arena owned by the trie and refer to their children by
//! index. Nodes are created lazily on insertion and never removed, so a
//! [`NodeId`] stays valid for the lifetime of the trie.

mod anagram;
mod node;
mod sampling;
mod template;

pub use node::{Difficulty, NodeId, TrieNode, ROOT};
pub use template::WILDCARD;

use crate::utils::letters::{alphabetize, char_index, letter_index};

#[derive(Debug, Clone)]
pub struct PrefixTrie {
    nodes: Vec<TrieNode>,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTrie {
    /// Create a trie holding only the root (empty prefix).
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    pub fn root(&self) -> &TrieNode {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes.get(id)
    }

    /// Number of distinct stored words.
    pub fn len(&self) -> usize {
        self.root().subtree_word_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn child_of(&self, id: NodeId, letter: u8) -> Option<NodeId> {
        letter_index(letter).and_then(|index| self.nodes[id].child(index))
    }

    fn ensure_child(&mut self, id: NodeId, index: usize) -> NodeId {
        if let Some(child) = self.nodes[id].children[index] {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(TrieNode::default());
        self.nodes[id].children[index] = Some(child);
        child
    }

    /// Insert a word and return its end node.
    ///
    /// Characters outside `A-Z` are logged and skipped: the walk stays on the
    /// current node and carries on with the next character. A word with no
    /// usable letter at all stores nothing and yields `None`.
    ///
    /// Subtree counts only grow when a new word end is marked, so inserting
    /// the same word twice leaves the counts untouched.
    pub fn insert(&mut self, word: &str) -> Option<NodeId> {
        let mut path = Vec::with_capacity(word.len() + 1);
        path.push(ROOT);
        let mut current = ROOT;

        for (position, letter) in word.chars().enumerate() {
            let Some(index) = char_index(letter) else {
                tracing::warn!(
                    "Skipping character {:?} at position {} of {:?}",
                    letter,
                    position,
                    word
                );
                continue;
            };
            current = self.ensure_child(current, index);
            path.push(current);
        }

        if current == ROOT {
            return None;
        }

        if !self.nodes[current].is_word_end {
            self.nodes[current].is_word_end = true;
            for id in path {
                self.nodes[id].subtree_word_count += 1;
            }
        }

        Some(current)
    }

    /// Insert a word tagged with a raw difficulty weight (1 = easy,
    /// 2 = medium, 3 = hard). Re-inserting a word overwrites its weight.
    pub fn insert_with_difficulty(&mut self, word: &str, difficulty: u8) -> Option<NodeId> {
        let id = self.insert(word)?;
        self.nodes[id].difficulty_value = difficulty;
        Some(id)
    }

    /// Insert a word under its alphabetized key, remembering the original
    /// spelling on the end node.
    pub fn insert_canonical(&mut self, word: &str) -> Option<NodeId> {
        let id = self.insert(&alphabetize(word))?;
        let spellings = &mut self.nodes[id].alternate_spellings;
        if !spellings.iter().any(|s| s == word) {
            spellings.push(word.to_string());
        }
        Some(id)
    }

    /// Walk the path spelled by `word`. Fails on the first character that is
    /// not `A-Z` or has no child.
    pub fn find_node(&self, word: &str) -> Option<NodeId> {
        word.bytes()
            .try_fold(ROOT, |current, letter| self.child_of(current, letter))
    }

    pub fn is_word(&self, word: &str) -> bool {
        self.find_node(word)
            .is_some_and(|id| self.nodes[id].is_word_end)
    }

    /// True unless the word is stored with a weight above 1. Absent words and
    /// bare prefixes count as common.
    pub fn is_common_word(&self, word: &str) -> bool {
        match self.find_node(word) {
            Some(id) => {
                let node = &self.nodes[id];
                !node.is_word_end || node.is_common()
            }
            None => true,
        }
    }

    /// True if some stored word starts with `prefix`.
    pub fn is_start_of_word(&self, prefix: &str) -> bool {
        self.find_node(prefix).is_some()
    }

    /// Tier of a stored word, `None` if the word is not stored.
    pub fn word_difficulty(&self, word: &str) -> Option<Difficulty> {
        self.find_node(word)
            .map(|id| &self.nodes[id])
            .filter(|node| node.is_word_end)
            .map(TrieNode::difficulty)
    }

    /// Original spellings stored under the alphabetized form of `letters`.
    pub fn spellings_of(&self, letters: &str) -> &[String] {
        match self.find_node(&alphabetize(letters)) {
            Some(id) if self.nodes[id].is_word_end => self.nodes[id].alternate_spellings.as_slice(),
            _ => &[],
        }
    }
}
