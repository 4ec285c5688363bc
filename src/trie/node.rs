use serde::{Deserialize, Serialize};

use crate::utils::letters::ALPHABET_SIZE;

/// Index of a node inside its trie's arena.
pub type NodeId = usize;

/// The root node always lives at slot 0.
pub const ROOT: NodeId = 0;

/// Rarity tier of a stored word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Derive the tier from a raw weight (1 = easy, 2 = medium, 3 = hard).
    /// Untagged words carry a weight of 0 and count as easy.
    pub fn from_value(value: u8) -> Self {
        match value {
            0 | 1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    /// Zero-based tier index, i.e. `value - 1` for tagged words.
    pub fn tier(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    pub(super) children: [Option<NodeId>; ALPHABET_SIZE],
    pub(super) is_word_end: bool,
    pub(super) difficulty_value: u8,
    pub(super) subtree_word_count: usize,
    pub(super) alternate_spellings: Vec<String>,
}

impl TrieNode {
    pub fn child(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied().flatten()
    }

    /// Existing children in letter order, as `(letter index, node)`.
    pub fn children(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(index, child)| child.map(|id| (index, id)))
    }

    /// True if the path from the root to this node spells a stored word.
    pub fn is_word_end(&self) -> bool {
        self.is_word_end
    }

    pub fn difficulty_value(&self) -> u8 {
        self.difficulty_value
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_value(self.difficulty_value)
    }

    pub fn is_common(&self) -> bool {
        self.difficulty_value <= 1
    }

    /// Number of stored words at or below this node.
    pub fn subtree_word_count(&self) -> usize {
        self.subtree_word_count
    }

    /// Original spellings stored under this (canonical) path.
    pub fn alternate_spellings(&self) -> &[String] {
        &self.alternate_spellings
    }
}
