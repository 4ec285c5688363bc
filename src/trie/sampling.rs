use rand::Rng;

use super::{PrefixTrie, ROOT};
use crate::utils::letters::index_letter;

impl PrefixTrie {
    /// Count word ends by walking every node.
    pub fn total_words(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.is_word_end {
                total += 1;
            }
            stack.extend(node.children().map(|(_, child)| child));
        }
        total
    }

    /// Word of rank `index` in depth-first, `A`-to-`Z` order.
    ///
    /// A node's own word ranks before anything below it, and each child
    /// covers a block of ranks as wide as its subtree count. Ranks
    /// `0..len()` map one-to-one onto the stored words.
    pub fn word_at(&self, index: usize) -> Option<String> {
        if index >= self.len() {
            return None;
        }

        let mut remaining = index;
        let mut current = ROOT;
        let mut word = String::new();

        loop {
            let node = &self.nodes[current];
            if node.is_word_end {
                if remaining == 0 {
                    return Some(word);
                }
                remaining -= 1;
            }

            let mut next = None;
            for (letter, child) in node.children() {
                let count = self.nodes[child].subtree_word_count;
                if remaining < count {
                    next = Some((letter, child));
                    break;
                }
                remaining -= count;
            }

            let (letter, child) = next?;
            word.push(index_letter(letter));
            current = child;
        }
    }

    /// Uniformly random stored word, `None` for an empty trie.
    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        self.word_at(rng.random_range(0..self.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn trie_of(words: &[&str]) -> PrefixTrie {
        let mut trie = PrefixTrie::new();
        for word in words {
            trie.insert(word);
        }
        trie
    }

    #[test]
    fn test_total_words_matches_reference_list() {
        let words = ["CAT", "CATS", "CAR", "DOG", "DO", "ZEBRA", "CAT"];
        let trie = trie_of(&words);

        let reference: HashSet<&str> = words.iter().copied().collect();
        assert_eq!(trie.total_words(), reference.len());
        assert_eq!(trie.total_words(), trie.len());
    }

    #[test]
    fn test_word_at_is_a_bijection() {
        let words = ["BAT", "BATS", "CAT", "CATS", "CAR", "A", "AN", "ANT", "ZOO"];
        let trie = trie_of(&words);

        let ranked: Vec<String> = (0..trie.total_words())
            .map(|rank| trie.word_at(rank).unwrap())
            .collect();

        let unique: HashSet<&String> = ranked.iter().collect();
        assert_eq!(unique.len(), words.len(), "every rank should yield a distinct word");
        for word in words {
            assert!(ranked.iter().any(|w| w == word), "{} should have a rank", word);
        }
    }

    #[test]
    fn test_word_at_order_is_depth_first() {
        let trie = trie_of(&["CATS", "CAT", "BAT", "A", "CAR"]);
        let ranked: Vec<String> = (0..trie.len()).map(|r| trie.word_at(r).unwrap()).collect();

        // prefixes rank before their extensions, siblings in letter order
        assert_eq!(ranked, ["A", "BAT", "CAR", "CAT", "CATS"]);
    }

    #[test]
    fn test_word_at_out_of_range() {
        let trie = trie_of(&["ONE", "TWO"]);
        assert_eq!(trie.word_at(2), None);
        assert_eq!(PrefixTrie::new().word_at(0), None);
    }

    #[test]
    fn test_random_word_is_stored() {
        let trie = trie_of(&["RED", "GREEN", "BLUE"]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let word = trie.random_word(&mut rng).unwrap();
            assert!(trie.is_word(&word));
        }
        assert_eq!(PrefixTrie::new().random_word(&mut rng), None);
    }

    #[test]
    fn test_random_word_reaches_every_word() {
        let trie = trie_of(&["AAA", "BBB", "CCC", "CCCC"]);
        let mut rng = StdRng::seed_from_u64(42);

        let seen: HashSet<String> = (0..400).filter_map(|_| trie.random_word(&mut rng)).collect();
        assert_eq!(seen.len(), 4);
    }
}
