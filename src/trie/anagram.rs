use std::ops::ControlFlow;

use super::{NodeId, PrefixTrie, ROOT};

impl PrefixTrie {
    /// Enumerate the swap-based permutations of `letters` and hand every one
    /// that spells a stored word to `visit`.
    ///
    /// Position `depth` is filled by swapping each of `letters[depth..]` into
    /// it in turn, exactly like the recursive generator, but the recursion is
    /// kept on explicit per-depth stacks. A branch is abandoned as soon as the
    /// fixed prefix leaves the trie, which drops only permutations that could
    /// never be words. Repeated letters yield repeated permutations.
    fn walk_permutations<F>(&self, letters: &str, mut visit: F)
    where
        F: FnMut(&[u8]) -> ControlFlow<()>,
    {
        let mut buffer = letters.as_bytes().to_vec();
        let len = buffer.len();
        if len == 0 {
            return;
        }

        // nodes[d] is the node spelled by buffer[..d]
        let mut nodes: Vec<NodeId> = vec![ROOT; len + 1];
        // cursor[d] is the next index to swap into position d
        let mut cursor: Vec<usize> = vec![0; len];
        let mut depth = 0;

        loop {
            if depth == len {
                if self.nodes[nodes[len]].is_word_end && visit(&buffer).is_break() {
                    return;
                }
                depth -= 1;
                buffer.swap(depth, cursor[depth] - 1);
                continue;
            }

            if cursor[depth] < len {
                let pick = cursor[depth];
                cursor[depth] += 1;
                buffer.swap(depth, pick);

                match self.child_of(nodes[depth], buffer[depth]) {
                    Some(child) => {
                        depth += 1;
                        nodes[depth] = child;
                        if depth < len {
                            cursor[depth] = depth;
                        }
                    }
                    None => buffer.swap(depth, pick),
                }
            } else {
                if depth == 0 {
                    return;
                }
                depth -= 1;
                buffer.swap(depth, cursor[depth] - 1);
            }
        }
    }

    /// Every stored word that is a rearrangement of all of `letters`,
    /// without duplicates, in discovery order.
    pub fn anagrams(&self, letters: &str) -> Vec<String> {
        self.anagrams_excluding::<&str>(letters, &[])
    }

    /// Like [`anagrams`](Self::anagrams), skipping any word in `excluded`.
    pub fn anagrams_excluding<S: AsRef<str>>(&self, letters: &str, excluded: &[S]) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        self.walk_permutations(letters, |permutation| {
            let word = String::from_utf8_lossy(permutation);
            let is_excluded = excluded.iter().any(|e| e.as_ref() == word);
            if !is_excluded && !found.iter().any(|w| *w == word) {
                found.push(word.into_owned());
            }
            ControlFlow::Continue(())
        });
        found
    }

    /// True if at least one arrangement of `letters` is a stored word.
    pub fn has_anagrams(&self, letters: &str) -> bool {
        let mut found = false;
        self.walk_permutations(letters, |_| {
            found = true;
            ControlFlow::Break(())
        });
        found
    }
}
