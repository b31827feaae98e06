//! Post matching - exact identity lookup with a fuzzy fallback
//!
//! The route identity either names a post exactly (its `safeName` or `name`,
//! case-sensitive) or ranks every post name by fuzzy similarity so the view
//! can suggest near misses.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher};

use crate::catalog::{AssetCatalog, PostDescriptor};

/// One fuzzy match, best matches first in a [`MatchResult`]
#[derive(Debug, Clone)]
pub struct SimilarPost {
    pub descriptor: PostDescriptor,
    /// Similarity score in the matcher library's native orientation
    /// (higher means more similar)
    pub score: u32,
}

/// Ranked similar posts, best match first
pub type MatchResult = Vec<SimilarPost>;

/// Matches route identities against the catalog
pub struct PostMatcher {
    max_results: usize,
}

impl PostMatcher {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    /// Find the post whose identity equals `identity` exactly
    pub fn find_exact<'a>(
        &self,
        catalog: &'a AssetCatalog,
        identity: &str,
    ) -> Option<&'a PostDescriptor> {
        catalog.find(identity)
    }

    /// Rank post names by fuzzy similarity to `identity`.
    ///
    /// Scoring and tie-breaks follow the matcher library's default ordering;
    /// an empty catalog or an empty identity gives an empty result.
    pub fn find_similar(&self, catalog: &AssetCatalog, identity: &str) -> MatchResult {
        if identity.is_empty() || catalog.posts.is_empty() {
            return Vec::new();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::parse(identity, CaseMatching::Ignore, Normalization::Smart);

        // Carry the catalog index through the ranking so posts sharing a
        // name each resolve to their own descriptor
        let candidates: Vec<Candidate> = catalog
            .posts
            .iter()
            .enumerate()
            .map(|(index, p)| Candidate {
                index,
                name: &p.name,
            })
            .collect();
        let ranked = pattern.match_list(candidates, &mut matcher);

        ranked
            .into_iter()
            .take(self.max_results)
            .map(|(candidate, score)| SimilarPost {
                descriptor: catalog.posts[candidate.index].clone(),
                score,
            })
            .collect()
    }
}

/// A post name tagged with its catalog position
struct Candidate<'a> {
    index: usize,
    name: &'a str,
}

impl AsRef<str> for Candidate<'_> {
    fn as_ref(&self) -> &str {
        self.name
    }
}
