//! Posts and the give-away filter applied before they enter the pool.

use crate::AccountHandle;
use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, instrument};

/// Mention marker: posts naming another account give away their author.
pub const MENTION_MARKER: &str = "@";

/// Link-shortener prefix: shared links give away their author.
pub const LINK_MARKER: &str = "https://t.co/";

/// One unit of game content: a text and its true author.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Post {
    /// Post body as returned by the content source.
    text: String,
    /// Account that wrote the post.
    author: AccountHandle,
}

impl Post {
    /// Creates a post.
    pub fn new(text: impl Into<String>, author: AccountHandle) -> Self {
        Self {
            text: text.into(),
            author,
        }
    }
}

/// Substring filter rejecting texts that make authorship too easy to guess.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct PostFilter {
    /// Texts containing any of these substrings are rejected.
    markers: Vec<String>,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self::new(vec![MENTION_MARKER.to_string(), LINK_MARKER.to_string()])
    }
}

impl PostFilter {
    /// Returns true if `text` may become a post.
    ///
    /// Blank texts are rejected along with anything carrying a marker.
    pub fn admits(&self, text: &str) -> bool {
        !text.trim().is_empty() && !self.markers.iter().any(|m| text.contains(m.as_str()))
    }

    /// Turns raw texts from one account into posts, dropping rejected ones.
    #[instrument(skip(self, raw), fields(account = %author, raw_count = raw.len()))]
    pub fn apply(&self, author: &AccountHandle, raw: Vec<String>) -> Vec<Post> {
        let posts: Vec<Post> = raw
            .into_iter()
            .filter(|text| self.admits(text))
            .map(|text| Post::new(text, author.clone()))
            .collect();

        debug!(kept = posts.len(), "Filtered raw texts");
        posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_rejects_mentions_and_links() {
        let filter = PostFilter::default();
        assert!(!filter.admits("thanks @someone"));
        assert!(!filter.admits("look https://t.co/abc123"));
        assert!(filter.admits("just a plain thought"));
    }

    #[test]
    fn test_filter_rejects_blank_text() {
        let filter = PostFilter::default();
        assert!(!filter.admits(""));
        assert!(!filter.admits("   \n"));
    }

    #[test]
    fn test_other_links_pass() {
        // Only the shortener prefix is a marker.
        assert!(PostFilter::default().admits("see https://example.com"));
    }

    #[test]
    fn test_apply_tags_author() {
        let author = AccountHandle::from("A");
        let posts = PostFilter::default().apply(
            &author,
            vec!["one".to_string(), "@two".to_string(), "three".to_string()],
        );
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.author() == &author));
        assert_eq!(posts[0].text(), "one");
        assert_eq!(posts[1].text(), "three");
    }
}
