//! View controller - drives the per-navigation state machine
//!
//! Each navigation moves through `Idle -> Loading -> (Found | NotFound)`.
//! Navigations are numbered by a monotonic generation counter; a result is
//! committed only while its generation is still the newest, so a slow lookup
//! for an old route can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use percent_encoding::percent_decode_str;

use crate::catalog::{AssetCatalog, PostDescriptor};
use crate::content::{MarkdownRenderer, PostStore};
use crate::matcher::{MatchResult, PostMatcher};

/// Title shown when no post matches the route
pub const NOT_FOUND_TITLE: &str = "Could not find blog post :(";

/// Side-effect function the controller calls with every title change
pub type TitleSink = Arc<dyn Fn(&str) + Send + Sync>;

/// What the view should display
#[derive(Debug, Clone)]
pub enum ViewState {
    Idle,
    /// Post fetches are still settling
    Loading,
    Found {
        post: PostDescriptor,
        html: String,
    },
    NotFound {
        identity: String,
        suggestions: MatchResult,
    },
}

/// An in-flight navigation, valid until a newer one begins
#[derive(Debug)]
pub struct NavigationTicket {
    generation: u64,
    identity: String,
}

impl NavigationTicket {
    pub fn identity(&self) -> &str {
        &self.identity
    }
}

/// Orchestrates catalog, store, matcher and renderer per navigation
pub struct ViewController {
    catalog: Arc<AssetCatalog>,
    store: PostStore,
    matcher: PostMatcher,
    renderer: MarkdownRenderer,
    title_sink: TitleSink,
    generation: AtomicU64,
    state: RwLock<ViewState>,
}

impl ViewController {
    pub fn new(
        catalog: Arc<AssetCatalog>,
        store: PostStore,
        matcher: PostMatcher,
        renderer: MarkdownRenderer,
        title_sink: TitleSink,
    ) -> Self {
        Self {
            catalog,
            store,
            matcher,
            renderer,
            title_sink,
            generation: AtomicU64::new(0),
            state: RwLock::new(ViewState::Idle),
        }
    }

    /// The state most recently committed by a live navigation
    pub fn state(&self) -> ViewState {
        self.state.read().unwrap().clone()
    }

    /// Start a navigation for a raw URL path.
    ///
    /// Supersedes every earlier navigation and shows the loading state until
    /// the ticket is resolved.
    pub fn begin_navigation(&self, raw_path: &str) -> NavigationTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let identity = route_identity(raw_path);
        self.commit(generation, ViewState::Loading);
        NavigationTicket {
            generation,
            identity,
        }
    }

    /// Resolve a navigation against the catalog and store.
    ///
    /// The computed state is returned either way, but committed (and the
    /// title sink called) only if the ticket is still the newest navigation.
    pub fn resolve(&self, ticket: &NavigationTicket) -> ViewState {
        let resolved = self.lookup(ticket.identity());

        if self.commit(ticket.generation, resolved.clone()) {
            let title = match &resolved {
                ViewState::Found { post, .. } => post.name.as_str(),
                ViewState::NotFound { .. } => NOT_FOUND_TITLE,
                // Keep the title aligned with the exact lookup while loading
                ViewState::Idle | ViewState::Loading => self
                    .matcher
                    .find_exact(&self.catalog, ticket.identity())
                    .map(|p| p.name.as_str())
                    .unwrap_or(NOT_FOUND_TITLE),
            };
            (self.title_sink)(title);
        }

        resolved
    }

    /// Begin and resolve in one step
    pub fn navigate(&self, raw_path: &str) -> ViewState {
        let ticket = self.begin_navigation(raw_path);
        self.resolve(&ticket)
    }

    fn lookup(&self, identity: &str) -> ViewState {
        // Suggestions are computed on every navigation, found or not
        let suggestions = self.matcher.find_similar(&self.catalog, identity);

        if self.store.is_loading() {
            return ViewState::Loading;
        }

        let exact = self.matcher.find_exact(&self.catalog, identity);
        match exact {
            Some(post) if self.store.contains(post.identity()) => {
                let text = self.store.text(post.identity()).unwrap_or_default();
                let html = self.renderer.render(&text).unwrap_or_else(|e| {
                    tracing::warn!("Rendering {:?} failed: {}", post.name, e);
                    format!(
                        "<pre>{}</pre>",
                        crate::content::markdown::html_escape(&text)
                    )
                });
                ViewState::Found {
                    post: post.clone(),
                    html,
                }
            }
            _ => ViewState::NotFound {
                identity: identity.to_string(),
                suggestions,
            },
        }
    }

    /// Commit `state` if `generation` is still the newest navigation
    fn commit(&self, generation: u64, state: ViewState) -> bool {
        if self.generation.load(Ordering::SeqCst) == generation {
            *self.state.write().unwrap() = state;
            true
        } else {
            false
        }
    }
}

/// Derive the post identity from a raw URL path
fn route_identity(raw_path: &str) -> String {
    let trimmed = raw_path.trim_start_matches('/');
    percent_decode_str(trimmed).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AssetCatalog;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn descriptor(name: &str, safe_name: Option<&str>) -> PostDescriptor {
        PostDescriptor {
            name: name.to_string(),
            safe_name: safe_name.map(|s| s.to_string()),
            local_path: format!("{}.md", name),
            date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
        }
    }

    fn controller_with_titles() -> (ViewController, Arc<Mutex<Vec<String>>>, PostStore) {
        let catalog = Arc::new(AssetCatalog {
            posts: vec![
                descriptor("first post", Some("first-post")),
                descriptor("second post", Some("second-post")),
            ],
        });
        let store = PostStore::new();
        let titles = Arc::new(Mutex::new(Vec::new()));
        let sink_titles = titles.clone();
        let controller = ViewController::new(
            catalog,
            store.clone(),
            PostMatcher::new(5),
            MarkdownRenderer::new(),
            Arc::new(move |t: &str| sink_titles.lock().unwrap().push(t.to_string())),
        );
        (controller, titles, store)
    }

    fn settle(store: &PostStore) {
        store.begin(2);
        store.insert("first-post", "# first\n\nhello");
        store.insert("second-post", "# second");
    }

    #[test]
    fn test_loading_then_found() {
        let (controller, titles, store) = controller_with_titles();

        let state = controller.navigate("/first-post");
        assert!(matches!(state, ViewState::Loading));

        settle(&store);
        let state = controller.navigate("/first-post");
        match state {
            ViewState::Found { post, html } => {
                assert_eq!(post.name, "first post");
                assert!(html.contains("<h1>first</h1>"));
            }
            other => panic!("expected Found, got {:?}", other),
        }
        assert_eq!(titles.lock().unwrap().last().unwrap(), "first post");
    }

    #[test]
    fn test_not_found_with_suggestions() {
        let (controller, titles, store) = controller_with_titles();
        settle(&store);

        let state = controller.navigate("/first");
        match state {
            ViewState::NotFound {
                identity,
                suggestions,
            } => {
                assert_eq!(identity, "first");
                assert!(!suggestions.is_empty());
                assert_eq!(suggestions[0].descriptor.name, "first post");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert_eq!(titles.lock().unwrap().last().unwrap(), NOT_FOUND_TITLE);
    }

    #[test]
    fn test_descriptor_without_text_is_not_found_after_settle() {
        let (controller, _titles, store) = controller_with_titles();
        store.begin(2);
        store.insert("second-post", "# second");
        store.record_error("read failed");

        let state = controller.navigate("/first-post");
        assert!(matches!(state, ViewState::NotFound { .. }));
    }

    #[test]
    fn test_stale_navigation_never_overwrites_newer() {
        let (controller, titles, store) = controller_with_titles();
        settle(&store);

        let ticket_a = controller.begin_navigation("/first-post");
        let ticket_b = controller.begin_navigation("/second-post");

        // B resolves first, then A's result arrives late
        controller.resolve(&ticket_b);
        controller.resolve(&ticket_a);

        match controller.state() {
            ViewState::Found { post, .. } => assert_eq!(post.name, "second post"),
            other => panic!("expected Found second post, got {:?}", other),
        }
        // The stale navigation must not have touched the title either
        assert_eq!(titles.lock().unwrap().last().unwrap(), "second post");
    }

    #[test]
    fn test_route_identity_decoding() {
        assert_eq!(route_identity("/hello-world"), "hello-world");
        assert_eq!(route_identity("/hello%20world"), "hello world");
        assert_eq!(route_identity("plain"), "plain");
    }
}
