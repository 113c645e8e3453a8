// src/crawl/queue.rs
// =============================================================================
// This module implements the profile crawl, breadth-first.
//
// How it works:
// 1. Fetch the root profile (level 0) and ask it for profiles to visit next
// 2. Everything the current level asked for forms the next level's queue
// 3. Fetch each queued profile we have not visited yet, in order
// 4. Repeat level by level until the queue runs dry or we reach max_depth
//
// Levels:
// - max_depth counts stored levels, root included: max_depth = 3 stores the
//   root, its related profiles, and theirs
// - The last level is a leaf level: its profiles are fetched and stored, but
//   we never ask them for more profiles, so nothing deeper is ever queued
//
// Failures:
// - A page we cannot fetch still gets a (mostly empty) record, it just does
//   not add anything to the queue
// - Nothing here aborts the crawl; only logging in can fail, and that
//   happens before the crawl starts
//
// Rust concepts:
// - Generics: Scheduler<F: PageFetcher> works with any page source
// - Ownership: the scheduler owns the CrawlState and hands back a read-only
//   ProfileStore when it is done
// =============================================================================

use crate::crawl::{CrawlState, ProfileStore};
use crate::fetch::{ExpansionRequest, PageFetcher, MAX_RELATED_PROFILES};
use crate::profile::ProfileRecord;
use tracing::{debug, info, warn};

/// Crawl limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    /// Number of levels to store, root included (at least 1)
    pub max_depth: usize,
    /// Related profiles to follow per page (at most MAX_RELATED_PROFILES)
    pub max_fanout: usize,
}

impl CrawlLimits {
    /// Clamps the requested limits to what the crawl can honour
    pub fn new(max_depth: usize, max_fanout: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
            max_fanout: max_fanout.min(MAX_RELATED_PROFILES),
        }
    }

    /// Whether profiles fetched at `level` may queue more profiles
    fn expands(&self, level: usize) -> bool {
        level + 1 < self.max_depth
    }
}

// Profiles one page asked us to visit
#[derive(Debug)]
struct WorkItem {
    source_id: String,
    candidates: Vec<String>,
}

/// Breadth-first crawl controller
pub struct Scheduler<F> {
    fetcher: F,
    limits: CrawlLimits,
    state: CrawlState,
    show_progress: bool,
}

impl<F: PageFetcher> Scheduler<F> {
    pub fn new(fetcher: F, limits: CrawlLimits) -> Self {
        Self {
            fetcher,
            limits,
            state: CrawlState::new(),
            show_progress: true,
        }
    }

    /// Turns the per-profile progress lines on or off
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress(&self, line: String) {
        if self.show_progress {
            println!("{}", line);
        }
    }

    // Runs the crawl from `root_id`
    //
    // Returns: every visited profile, root first, in the order they were
    // fetched
    pub async fn run(mut self, root_id: &str) -> ProfileStore {
        info!(
            "Crawling from {} (max depth {}, max fanout {})",
            root_id, self.limits.max_depth, self.limits.max_fanout
        );
        self.progress(format!("  Crawling [depth 0]: {}", root_id));

        let mut current_level: Vec<WorkItem> = Vec::new();
        if let Some(item) = self.visit(root_id, None, 0).await {
            current_level.push(item);
        }

        let mut depth = 1;
        while !current_level.is_empty() && depth < self.limits.max_depth {
            let mut next_level = Vec::new();

            for item in current_level {
                if item.candidates.is_empty() {
                    self.progress(format!("  {} has no related profiles", item.source_id));
                    continue;
                }

                for candidate in item.candidates {
                    // The same profile can be suggested by several pages
                    if self.state.visited().contains(&candidate) {
                        debug!("Skipping {} (already visited)", candidate);
                        continue;
                    }

                    self.progress(format!(
                        "  Crawling [depth {}]: {} (linked from {})",
                        depth, candidate, item.source_id
                    ));
                    if let Some(next) = self.visit(&candidate, Some(&item.source_id), depth).await {
                        next_level.push(next);
                    }
                }
            }

            current_level = next_level;
            depth += 1;
        }

        info!("Crawl finished with {} profile(s)", self.state.visited().len());
        self.state.finish()
    }

    // Fetches one profile, stores its record, and returns what it wants
    // visited next (if anything)
    async fn visit(&mut self, id: &str, source_id: Option<&str>, level: usize) -> Option<WorkItem> {
        let expansion = if self.limits.expands(level) {
            Some(ExpansionRequest {
                cap: self.limits.max_fanout,
                visited: self.state.visited(),
            })
        } else {
            None
        };

        let (record, candidates) = match self.fetcher.fetch(id, expansion).await {
            Ok(page) => {
                let record = ProfileRecord {
                    source_id: source_id.map(str::to_string),
                    dest_id: id.to_string(),
                    details: page.details,
                    dest_childs: page.references,
                    tree_degree: level,
                };
                (record, page.expansion)
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", id, e);
                self.progress(format!("  Warning: Failed to fetch {}: {}", id, e));
                let record = ProfileRecord::unreadable(source_id.map(str::to_string), id.to_string(), level);
                (record, None)
            }
        };

        self.state.record(record);

        candidates.map(|candidates| WorkItem {
            source_id: id.to_string(),
            candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::FetchedPage;
    use crate::profile::ProfileDetails;
    use std::collections::{BTreeSet, HashMap};

    // In-memory site: each profile lists the profiles it links to, in order
    // ("root" -> "a b" means root's page links to a, then b)
    struct ScriptedSite {
        links: HashMap<String, Vec<String>>,
        premium: BTreeSet<String>,
        broken: BTreeSet<String>,
        fetch_log: Vec<(String, bool)>,
    }

    impl ScriptedSite {
        fn new(links: &[(&str, &str)]) -> Self {
            Self {
                links: links
                    .iter()
                    .map(|(id, to)| (id.to_string(), to.split_whitespace().map(str::to_string).collect()))
                    .collect(),
                premium: BTreeSet::new(),
                broken: BTreeSet::new(),
                fetch_log: Vec::new(),
            }
        }
    }

    impl PageFetcher for &mut ScriptedSite {
        async fn fetch(
            &mut self,
            id: &str,
            expansion: Option<ExpansionRequest<'_>>,
        ) -> Result<FetchedPage, FetchError> {
            self.fetch_log.push((id.to_string(), expansion.is_some()));
            if self.broken.contains(id) {
                return Err(FetchError::Status {
                    url: id.to_string(),
                    status: 500,
                });
            }

            let links = self.links.get(id).cloned().unwrap_or_default();
            let expansion = expansion.map(|request| {
                links
                    .iter()
                    .filter(|l| !self.premium.contains(*l) && !request.visited.contains(l))
                    .take(request.cap)
                    .cloned()
                    .collect()
            });

            Ok(FetchedPage {
                details: ProfileDetails {
                    name: Some(id.to_uppercase()),
                    ..Default::default()
                },
                references: links.into_iter().collect(),
                expansion,
            })
        }
    }

    fn chain_site() -> ScriptedSite {
        ScriptedSite::new(&[
            ("root", "a b"),
            ("a", "root c"),
            ("b", "root c"),
            ("c", "a d"),
            ("d", "c"),
        ])
    }

    fn degree_of(store: &ProfileStore, id: &str) -> Option<usize> {
        store.get(id).map(|r| r.tree_degree)
    }

    #[tokio::test]
    async fn test_crawl_levels_and_dedup() {
        let mut site = chain_site();
        let store = Scheduler::new(&mut site, CrawlLimits::new(3, 3)).run("root").await;

        let ids: Vec<&str> = store.records().iter().map(|r| r.dest_id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "b", "c"]);
        assert_eq!(degree_of(&store, "root"), Some(0));
        assert_eq!(degree_of(&store, "a"), Some(1));
        assert_eq!(degree_of(&store, "c"), Some(2));
        // d is three hops away: beyond the last stored level
        assert!(store.get("d").is_none());

        assert_eq!(store.get("c").and_then(|r| r.source_id.as_deref()), Some("a"));
        assert_eq!(store.get("c").map(|r| r.details.name.clone()), Some(Some("C".to_string())));
    }

    #[tokio::test]
    async fn test_tree_degree_exceeds_source_degree() {
        let mut site = chain_site();
        let store = Scheduler::new(&mut site, CrawlLimits::new(5, 3)).run("root").await;

        for record in store.records().iter().filter(|r| !r.is_root()) {
            let source = store.get(record.source_id.as_deref().unwrap()).unwrap();
            assert!(record.tree_degree >= source.tree_degree + 1);
        }
        assert_eq!(degree_of(&store, "d"), Some(3));
    }

    #[tokio::test]
    async fn test_last_level_is_fetched_without_expansion() {
        let mut site = chain_site();
        let store = Scheduler::new(&mut site, CrawlLimits::new(3, 3)).run("root").await;

        // c sits on the leaf level: stored, but never asked for more profiles
        assert_eq!(degree_of(&store, "c"), Some(2));
        assert!(site.fetch_log.contains(&("c".to_string(), false)));
        assert!(site.fetch_log.contains(&("root".to_string(), true)));
        assert!(site.fetch_log.contains(&("a".to_string(), true)));
    }

    #[tokio::test]
    async fn test_depth_one_only_stores_root() {
        let mut site = chain_site();
        let store = Scheduler::new(&mut site, CrawlLimits::new(1, 3)).run("root").await;

        assert_eq!(store.len(), 1);
        assert_eq!(site.fetch_log, vec![("root".to_string(), false)]);
        // References are still recorded for the post-crawl passes
        assert_eq!(store.records()[0].dest_childs.len(), 2);
    }

    #[test]
    fn test_fanout_is_clamped() {
        let limits = CrawlLimits::new(3, 15);
        assert_eq!(limits.max_fanout, MAX_RELATED_PROFILES);
        assert_eq!(CrawlLimits::new(0, 3).max_depth, 1);
    }

    #[tokio::test]
    async fn test_fanout_limits_children() {
        let mut site = ScriptedSite::new(&[("root", "a b c d")]);
        let store = Scheduler::new(&mut site, CrawlLimits::new(2, 2)).run("root").await;

        let ids: Vec<&str> = store.records().iter().map(|r| r.dest_id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "b"]);
    }

    #[tokio::test]
    async fn test_premium_profiles_are_referenced_but_not_visited() {
        let mut site = ScriptedSite::new(&[("root", "vip a")]);
        site.premium.insert("vip".to_string());
        let store = Scheduler::new(&mut site, CrawlLimits::new(2, 3)).run("root").await;

        assert!(store.get("vip").is_none());
        assert!(store.get("a").is_some());
        assert!(store.records()[0].dest_childs.contains("vip"));
    }

    #[tokio::test]
    async fn test_failed_fetch_still_produces_record() {
        let mut site = chain_site();
        site.broken.insert("a".to_string());
        let store = Scheduler::new(&mut site, CrawlLimits::new(3, 3)).run("root").await;

        let a = store.get("a").unwrap();
        assert_eq!(a.tree_degree, 1);
        assert_eq!(a.details, ProfileDetails::default());
        assert!(a.dest_childs.is_empty());
        // c is still reached through b
        assert_eq!(store.get("c").and_then(|r| r.source_id.as_deref()), Some("b"));
    }

    #[tokio::test]
    async fn test_no_profile_is_fetched_twice() {
        let mut site = ScriptedSite::new(&[
            ("root", "a b"),
            ("a", "b c"),
            ("b", "a c"),
            ("c", "a b"),
        ]);
        let store = Scheduler::new(&mut site, CrawlLimits::new(4, 10)).run("root").await;

        let mut fetched: Vec<&str> = site.fetch_log.iter().map(|(id, _)| id.as_str()).collect();
        let total = fetched.len();
        fetched.sort_unstable();
        fetched.dedup();
        assert_eq!(fetched.len(), total);
        assert_eq!(store.len(), 4);
    }
}
