//! The pool of posts not yet dealt.

use crate::Post;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// Posts remaining in the current session.
///
/// Duplicates collapse on insertion and a dealt post is gone for good, so a
/// session never shows the same `(text, author)` pair twice.
#[derive(Debug, Clone, Default)]
pub struct PostPool {
    posts: Vec<Post>,
    initial_size: usize,
}

impl PostPool {
    /// Builds a pool, keeping the first occurrence of each distinct post.
    #[instrument(skip(posts))]
    pub fn new(posts: impl IntoIterator<Item = Post>) -> Self {
        let mut seen = HashSet::new();
        let posts: Vec<Post> = posts
            .into_iter()
            .filter(|post| seen.insert(post.clone()))
            .collect();

        debug!(pool_size = posts.len(), "Built post pool");
        Self {
            initial_size: posts.len(),
            posts,
        }
    }

    /// Removes a uniformly random post and returns it, or `None` when empty.
    #[instrument(skip_all, fields(pool_size = self.posts.len()))]
    pub fn deal<R: Rng>(&mut self, rng: &mut R) -> Option<Post> {
        if self.posts.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..self.posts.len());
        trace!(index, "Dealing post");
        Some(self.posts.swap_remove(index))
    }

    /// Number of posts still to be dealt.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Returns true once every post has been dealt.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Number of posts the pool started with.
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// Posts still in the pool, in storage order.
    pub fn remaining(&self) -> &[Post] {
        &self.posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccountHandle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn post(text: &str, author: &str) -> Post {
        Post::new(text, AccountHandle::from(author))
    }

    #[test]
    fn test_duplicates_collapse() {
        let pool = PostPool::new(vec![post("hi", "A"), post("hi", "A"), post("hi", "B")]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.initial_size(), 2);
    }

    #[test]
    fn test_deal_drains_without_repeats() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut pool = PostPool::new((0..20).map(|i| post(&format!("post {i}"), "A")));
        let mut dealt = HashSet::new();

        for expected_len in (0..20).rev() {
            let next = pool.deal(&mut rng).unwrap();
            assert!(dealt.insert(next), "post dealt twice");
            assert_eq!(pool.len(), expected_len);
        }

        assert!(pool.deal(&mut rng).is_none());
        assert_eq!(pool.initial_size(), 20);
    }

    #[test]
    fn test_empty_pool_deals_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pool = PostPool::default();
        assert!(pool.is_empty());
        assert!(pool.deal(&mut rng).is_none());
    }
}
