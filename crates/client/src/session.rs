//! Session engine
//!
//! A `Session` owns the account, the game library, the achievement cache,
//! and the view state for the expanded row. User actions spawn fetch tasks;
//! each task settles by sending exactly one `SessionEvent` back over the
//! session channel, and only the event-applying flow mutates state. Library
//! completions carry a generation and are dropped when superseded;
//! achievement completions carry the key captured at fetch start, so a
//! result for a game the user has navigated away from still lands in the
//! cache without touching the view.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use steamtrack_core::{
    classify, sort, AchievementRecord, Game, GameAchievementSummary, SortMode, SteamProvider,
};

use crate::cache::{AchievementCache, CacheEntry};

/// Completion notice from a spawned fetch task
#[derive(Debug)]
pub enum SessionEvent {
    LibraryLoaded {
        generation: u64,
        games: Vec<Game>,
    },
    LibraryFailed {
        generation: u64,
        error: String,
    },
    AchievementsLoaded {
        account_id: String,
        appid: u64,
        summary: GameAchievementSummary,
    },
    AchievementsFailed {
        account_id: String,
        appid: u64,
        error: String,
    },
    NameResolved {
        personaname: Option<String>,
    },
    NameFailed {
        error: String,
    },
    GuideResolved {
        url: String,
    },
    GuideFailed {
        game_title: String,
        error: String,
    },
}

/// Presentation state of a single game row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Collapsed,
    /// Expanded with the achievement fetch still outstanding
    Loading,
    Expanded,
}

/// Toggle and sort selections for the expanded row
///
/// Kept for the last-expanded game only: reset when a different game is
/// expanded, retained across collapse/re-expand of the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowControls {
    pub showing_completed: bool,
    pub completed_sort: SortMode,
    pub incomplete_sort: SortMode,
}

impl Default for RowControls {
    fn default() -> Self {
        Self {
            showing_completed: true,
            completed_sort: SortMode::Recent,
            incomplete_sort: SortMode::Common,
        }
    }
}

impl RowControls {
    /// Sort mode of the branch the toggle is currently showing
    pub fn active_sort(&self) -> SortMode {
        if self.showing_completed {
            self.completed_sort
        } else {
            self.incomplete_sort
        }
    }
}

pub struct Session {
    provider: Arc<dyn SteamProvider>,
    tx: UnboundedSender<SessionEvent>,
    rx: UnboundedReceiver<SessionEvent>,

    account_id: Option<String>,
    authenticated: bool,
    display_name: Option<String>,

    games: Vec<Game>,
    library_loading: bool,
    library_generation: u64,

    cache: AchievementCache,

    expanded: Option<u64>,
    controls: RowControls,
    controls_for: Option<u64>,

    pending_navigation: Option<String>,
}

impl Session {
    pub fn new(provider: Arc<dyn SteamProvider>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            provider,
            tx,
            rx,
            account_id: None,
            authenticated: false,
            display_name: None,
            games: Vec::new(),
            library_loading: false,
            library_generation: 0,
            cache: AchievementCache::new(),
            expanded: None,
            controls: RowControls::default(),
            controls_for: None,
            pending_navigation: None,
        }
    }

    /// Adopt an account for the rest of the session. Empty identifiers are
    /// ignored.
    pub fn set_account(&mut self, account_id: impl Into<String>) {
        let account_id = account_id.into();
        if account_id.trim().is_empty() {
            return;
        }
        self.account_id = Some(account_id);
    }

    pub fn mark_authenticated(&mut self) {
        self.authenticated = true;
    }

    // --- observable surface ---------------------------------------------

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn library_loading(&self) -> bool {
        self.library_loading
    }

    /// Resolved persona name, or the raw identifier until one arrives
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.account_id.as_deref())
    }

    pub fn cache(&self) -> &AchievementCache {
        &self.cache
    }

    pub fn expanded_game(&self) -> Option<u64> {
        self.expanded
    }

    pub fn controls(&self) -> &RowControls {
        &self.controls
    }

    /// Guide URL waiting to be navigated to, consumed once
    pub fn take_navigation(&mut self) -> Option<String> {
        self.pending_navigation.take()
    }

    pub fn row_state(&self, appid: u64) -> RowState {
        if self.expanded != Some(appid) {
            return RowState::Collapsed;
        }
        let account_id = match self.account_id.as_deref() {
            Some(id) => id,
            None => return RowState::Collapsed,
        };
        if self.cache.is_settled(account_id, appid) {
            RowState::Expanded
        } else {
            RowState::Loading
        }
    }

    /// Settled summary for the expanded row; None while loading or when the
    /// fetch failed (the no-data state)
    pub fn expanded_achievement_summary(&self) -> Option<&GameAchievementSummary> {
        let appid = self.expanded?;
        self.cache.summary(self.account_id.as_deref()?, appid)
    }

    /// (completed, total) over the expanded row's full record set,
    /// independent of the toggle
    pub fn expanded_counts(&self) -> Option<(usize, usize)> {
        let summary = self.expanded_achievement_summary()?;
        Some(classify::completion_counts(&summary.achievements))
    }

    /// Achievement list for the expanded row: the full cached record set
    /// filtered by the toggle, then sorted by the active mode. Derived fresh
    /// on every call so switching toggle or sort is order-independent.
    pub fn visible_achievements(&self) -> Vec<AchievementRecord> {
        let summary = match self.expanded_achievement_summary() {
            Some(s) => s,
            None => return Vec::new(),
        };
        let filtered =
            classify::filter_by_completion(&summary.achievements, self.controls.showing_completed);
        sort::sort_achievements(&filtered, self.controls.active_sort())
    }

    // --- user actions ----------------------------------------------------

    /// Start (or restart) the library fetch. No-op without an account. When
    /// completions arrive out of order the latest invocation wins.
    pub fn load_library(&mut self) {
        let account_id = match self.account_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => return,
        };

        self.library_generation += 1;
        let generation = self.library_generation;
        self.library_loading = true;

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match provider.fetch_owned_games(&account_id).await {
                Ok(games) => SessionEvent::LibraryLoaded { generation, games },
                Err(e) => SessionEvent::LibraryFailed {
                    generation,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });
    }

    /// Resolve the account's persona name; independent of the library fetch
    pub fn resolve_display_name(&mut self) {
        let account_id = match self.account_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => return,
        };

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match provider.fetch_player_summary(&account_id).await {
                Ok(summary) => SessionEvent::NameResolved {
                    personaname: summary.personaname,
                },
                Err(e) => SessionEvent::NameFailed {
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });
    }

    /// Expand a game row, or collapse it when it is already expanded.
    /// Expanding another game collapses the current one; its cache entry is
    /// retained so re-expansion is instant. At most one achievement fetch is
    /// ever issued per (account, game) key.
    pub fn toggle_game(&mut self, appid: u64) {
        if self.expanded == Some(appid) {
            self.expanded = None;
            return;
        }

        let account_id = match self.account_id.clone() {
            Some(id) => id,
            None => return,
        };

        if self.controls_for != Some(appid) {
            self.controls = RowControls::default();
            self.controls_for = Some(appid);
        }
        self.expanded = Some(appid);

        if self.cache.begin(&account_id, appid) {
            let provider = Arc::clone(&self.provider);
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let event = match provider.fetch_achievements(&account_id, appid).await {
                    Ok(summary) => SessionEvent::AchievementsLoaded {
                        account_id,
                        appid,
                        summary,
                    },
                    Err(e) => SessionEvent::AchievementsFailed {
                        account_id,
                        appid,
                        error: e.to_string(),
                    },
                };
                let _ = tx.send(event);
            });
        }
    }

    /// Switch the expanded row between completed and incomplete
    pub fn set_showing_completed(&mut self, showing: bool) {
        if self.expanded.is_some() {
            self.controls.showing_completed = showing;
        }
    }

    /// Set the sort mode of the branch the toggle is currently showing
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        if self.expanded.is_none() {
            return;
        }
        if self.controls.showing_completed {
            self.controls.completed_sort = mode;
        } else {
            self.controls.incomplete_sort = mode;
        }
    }

    /// Fetch the community guide link for a game. On success the URL lands
    /// in `take_navigation`; on failure there is no navigation action and no
    /// other state changes.
    pub fn request_guide(&mut self, appid: u64) {
        let title = match self.games.iter().find(|g| g.appid == appid) {
            Some(game) => game.name.clone(),
            None => return,
        };

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match provider.fetch_guide_link(&title).await {
                Ok(link) => SessionEvent::GuideResolved {
                    url: link.guide_url,
                },
                Err(e) => SessionEvent::GuideFailed {
                    game_title: title,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });
    }

    // --- event handling --------------------------------------------------

    /// Drain and apply every event that has already arrived
    pub fn pump(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
        }
    }

    /// Await the next event and apply it. Returns false once every sender is
    /// gone.
    pub async fn wait_event(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::LibraryLoaded { generation, games } => {
                if generation != self.library_generation {
                    debug!(generation, "discarding superseded library result");
                    return;
                }
                debug!(count = games.len(), "library loaded");
                self.games = games;
                self.library_loading = false;
            }
            SessionEvent::LibraryFailed { generation, error } => {
                if generation != self.library_generation {
                    debug!(generation, "discarding superseded library failure");
                    return;
                }
                warn!(%error, "library fetch failed, resetting to empty");
                self.games = Vec::new();
                self.library_loading = false;
            }
            SessionEvent::AchievementsLoaded {
                account_id,
                appid,
                summary,
            } => {
                // Cached even when the user has moved on; the view only ever
                // reads through the currently expanded key
                self.cache.resolve(&account_id, appid, summary);
            }
            SessionEvent::AchievementsFailed {
                account_id,
                appid,
                error,
            } => {
                warn!(appid, %error, "achievement fetch failed, caching no-data state");
                self.cache.fail(&account_id, appid);
            }
            SessionEvent::NameResolved { personaname } => {
                // Written once; later resolutions keep the first value
                if self.display_name.is_none() {
                    self.display_name = personaname;
                }
            }
            SessionEvent::NameFailed { error } => {
                warn!(%error, "display name fetch failed, falling back to account id");
            }
            SessionEvent::GuideResolved { url } => {
                self.pending_navigation = Some(url);
            }
            SessionEvent::GuideFailed { game_title, error } => {
                warn!(%game_title, %error, "guide link fetch failed, no navigation");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use steamtrack_core::{GuideLink, PlayerSummary, ProviderError};

    #[derive(Default)]
    struct StubProvider {
        libraries: Vec<Vec<Game>>,
        fail_library: bool,
        summary: Option<GameAchievementSummary>,
        fail_achievements: bool,
        personaname: Option<String>,
        guide_url: Option<String>,
        library_calls: AtomicUsize,
        achievement_calls: AtomicUsize,
        name_calls: AtomicUsize,
        guide_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl SteamProvider for StubProvider {
        async fn fetch_owned_games(&self, _account_id: &str) -> Result<Vec<Game>, ProviderError> {
            let call = self.library_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_library {
                return Err(ProviderError::Status(500));
            }
            let index = call.min(self.libraries.len().saturating_sub(1));
            Ok(self.libraries.get(index).cloned().unwrap_or_default())
        }

        async fn fetch_achievements(
            &self,
            _account_id: &str,
            _appid: u64,
        ) -> Result<GameAchievementSummary, ProviderError> {
            self.achievement_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_achievements {
                return Err(ProviderError::Transport("connection refused".to_string()));
            }
            Ok(self.summary.clone().unwrap_or_default())
        }

        async fn fetch_player_summary(
            &self,
            _account_id: &str,
        ) -> Result<PlayerSummary, ProviderError> {
            self.name_calls.fetch_add(1, Ordering::SeqCst);
            Ok(PlayerSummary {
                personaname: self.personaname.clone(),
            })
        }

        async fn fetch_guide_link(&self, _game_title: &str) -> Result<GuideLink, ProviderError> {
            self.guide_calls.fetch_add(1, Ordering::SeqCst);
            match &self.guide_url {
                Some(url) => Ok(GuideLink {
                    guide_url: url.clone(),
                }),
                None => Err(ProviderError::Status(404)),
            }
        }
    }

    fn game(appid: u64, name: &str, playtime: u32) -> Game {
        Game {
            appid,
            name: name.to_string(),
            img_icon_url: String::new(),
            playtime_forever: playtime,
        }
    }

    fn record(name: &str, achieved: bool, unlocktime: Option<i64>, rarity: Option<f32>) -> AchievementRecord {
        AchievementRecord {
            name: name.to_string(),
            description: None,
            icon: None,
            achieved,
            unlocktime,
            rarity,
        }
    }

    fn cs_summary() -> GameAchievementSummary {
        GameAchievementSummary {
            completed: Some(3),
            total: Some(10),
            achievements: vec![
                record("A", true, Some(1000), Some(5.0)),
                record("B", false, None, Some(50.0)),
            ],
        }
    }

    fn session_with(stub: StubProvider) -> (Session, Arc<StubProvider>) {
        let provider = Arc::new(stub);
        let session = Session::new(provider.clone());
        (session, provider)
    }

    #[tokio::test]
    async fn load_library_without_account_is_a_no_op() {
        let (mut session, provider) = session_with(StubProvider::default());

        session.load_library();
        session.pump();

        assert!(!session.library_loading());
        assert!(session.games().is_empty());
        assert_eq!(provider.library_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_account_identifier_is_rejected() {
        let (mut session, provider) = session_with(StubProvider::default());

        session.set_account("   ");
        session.load_library();

        assert!(session.account_id().is_none());
        assert_eq!(provider.library_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn library_success_replaces_prior_state() {
        let (mut session, _provider) = session_with(StubProvider {
            libraries: vec![vec![game(10, "CS", 120)]],
            ..Default::default()
        });

        session.set_account("76561198006785284");
        session.load_library();
        assert!(session.library_loading());

        assert!(session.wait_event().await);
        assert!(!session.library_loading());
        assert_eq!(session.games().len(), 1);
        assert_eq!(session.games()[0].playtime_display(), "2.0 hrs");
    }

    #[tokio::test]
    async fn library_failure_resets_to_empty_and_clears_loading() {
        let (mut session, _provider) = session_with(StubProvider {
            fail_library: true,
            ..Default::default()
        });
        session.set_account("123");
        session.games = vec![game(10, "CS", 120)];

        session.load_library();
        assert!(session.library_loading());
        assert!(session.wait_event().await);

        assert!(session.games().is_empty());
        assert!(!session.library_loading());
    }

    #[tokio::test]
    async fn latest_library_invocation_wins() {
        let (mut session, _provider) = session_with(StubProvider::default());
        session.set_account("123");

        session.load_library();
        session.load_library();
        assert!(session.library_loading());

        // The first invocation settles after the second superseded it:
        // its result is discarded for state and for the loading flag
        session.apply(SessionEvent::LibraryLoaded {
            generation: 1,
            games: vec![game(10, "CS", 120)],
        });
        assert!(session.games().is_empty());
        assert!(session.library_loading());

        session.apply(SessionEvent::LibraryLoaded {
            generation: 2,
            games: vec![game(20, "Portal 2", 60)],
        });
        assert_eq!(session.games().len(), 1);
        assert_eq!(session.games()[0].appid, 20);
        assert!(!session.library_loading());

        // A stale failure is discarded the same way
        session.apply(SessionEvent::LibraryFailed {
            generation: 1,
            error: "late timeout".to_string(),
        });
        assert_eq!(session.games().len(), 1);
    }

    #[tokio::test]
    async fn achievements_fetched_at_most_once_per_key() {
        let (mut session, provider) = session_with(StubProvider {
            summary: Some(cs_summary()),
            ..Default::default()
        });
        session.set_account("123");

        session.toggle_game(10);
        assert_eq!(session.row_state(10), RowState::Loading);
        assert!(session.wait_event().await);
        assert_eq!(session.row_state(10), RowState::Expanded);

        // Collapse and re-expand: served from cache, no second call
        session.toggle_game(10);
        assert_eq!(session.row_state(10), RowState::Collapsed);
        session.toggle_game(10);
        assert_eq!(session.row_state(10), RowState::Expanded);
        session.pump();

        assert_eq!(provider.achievement_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rapid_toggling_attaches_to_the_pending_fetch() {
        let (mut session, provider) = session_with(StubProvider {
            summary: Some(cs_summary()),
            ..Default::default()
        });
        session.set_account("123");

        // Expand, collapse, expand again before the fetch settles
        session.toggle_game(10);
        session.toggle_game(10);
        session.toggle_game(10);
        assert_eq!(session.row_state(10), RowState::Loading);

        assert!(session.wait_event().await);
        assert_eq!(session.row_state(10), RowState::Expanded);
        assert_eq!(provider.achievement_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expanding_second_game_collapses_first() {
        let (mut session, _provider) = session_with(StubProvider {
            summary: Some(cs_summary()),
            ..Default::default()
        });
        session.set_account("123");

        session.toggle_game(10);
        session.toggle_game(20);

        assert_eq!(session.expanded_game(), Some(20));
        assert_eq!(session.row_state(10), RowState::Collapsed);
        assert_eq!(session.row_state(20), RowState::Loading);

        // Both fetches settle; the collapsed game is cached, not displayed
        assert!(session.wait_event().await);
        assert!(session.wait_event().await);
        assert_eq!(session.row_state(10), RowState::Collapsed);
        assert_eq!(session.row_state(20), RowState::Expanded);
        assert!(session.cache().is_settled("123", 10));
    }

    #[tokio::test]
    async fn stale_achievement_result_caches_without_touching_view() {
        let (mut session, provider) = session_with(StubProvider {
            summary: Some(cs_summary()),
            ..Default::default()
        });
        session.set_account("123");

        session.toggle_game(10);
        session.toggle_game(20);
        session.set_showing_completed(false);

        // Game 10's result arrives while 20 is expanded
        assert!(session.wait_event().await);
        assert!(session.wait_event().await);

        assert_eq!(session.expanded_game(), Some(20));
        assert!(!session.controls().showing_completed);
        assert!(session.cache().summary("123", 10).is_some());
        assert_eq!(provider.achievement_calls.load(Ordering::SeqCst), 2);

        // Re-expanding 10 is instant and resets the controls for it
        session.toggle_game(10);
        assert_eq!(session.row_state(10), RowState::Expanded);
        assert!(session.controls().showing_completed);
        session.pump();
        assert_eq!(provider.achievement_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_achievement_fetch_settles_to_no_data() {
        let (mut session, provider) = session_with(StubProvider {
            fail_achievements: true,
            ..Default::default()
        });
        session.set_account("123");

        session.toggle_game(10);
        assert!(session.wait_event().await);

        assert_eq!(session.row_state(10), RowState::Expanded);
        assert!(session.expanded_counts().is_none());
        assert!(session.visible_achievements().is_empty());

        // Failure is terminal for the session: no retry on re-expand
        session.toggle_game(10);
        session.toggle_game(10);
        session.pump();
        assert_eq!(provider.achievement_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expanded_view_classifies_and_sorts() {
        let (mut session, _provider) = session_with(StubProvider {
            libraries: vec![vec![game(10, "CS", 120)]],
            summary: Some(cs_summary()),
            ..Default::default()
        });
        session.set_account("76561198006785284");
        session.load_library();
        assert!(session.wait_event().await);

        session.toggle_game(10);
        assert!(session.wait_event().await);

        // Defaults: completed branch, recent sort
        assert!(session.controls().showing_completed);
        assert_eq!(session.controls().active_sort(), SortMode::Recent);
        let visible = session.visible_achievements();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "A");

        // Counts come from the full record set, not the visible branch
        assert_eq!(session.expanded_counts(), Some((1, 2)));
        assert_eq!(
            session.expanded_achievement_summary().unwrap().counts_display(),
            "3 / 10"
        );

        // Incomplete branch defaults to common sort
        session.set_showing_completed(false);
        assert_eq!(session.controls().active_sort(), SortMode::Common);
        let visible = session.visible_achievements();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "B");
        assert_eq!(session.expanded_counts(), Some((1, 2)));
    }

    #[tokio::test]
    async fn controls_persist_for_same_game_reset_for_another() {
        let (mut session, _provider) = session_with(StubProvider {
            summary: Some(cs_summary()),
            ..Default::default()
        });
        session.set_account("123");

        session.toggle_game(10);
        assert!(session.wait_event().await);
        session.set_showing_completed(false);
        session.set_sort_mode(SortMode::Rare);

        // Collapse and re-expand the same game: selections survive
        session.toggle_game(10);
        session.toggle_game(10);
        assert!(!session.controls().showing_completed);
        assert_eq!(session.controls().incomplete_sort, SortMode::Rare);

        // A different game gets the defaults back
        session.toggle_game(20);
        assert!(session.controls().showing_completed);
        assert_eq!(session.controls().completed_sort, SortMode::Recent);
        assert_eq!(session.controls().incomplete_sort, SortMode::Common);
        session.pump();
    }

    #[tokio::test]
    async fn guide_failure_yields_no_navigation_and_no_other_changes() {
        let (mut session, provider) = session_with(StubProvider {
            libraries: vec![vec![game(10, "CS", 120)]],
            summary: Some(cs_summary()),
            guide_url: None,
            ..Default::default()
        });
        session.set_account("123");
        session.load_library();
        assert!(session.wait_event().await);
        session.toggle_game(10);
        assert!(session.wait_event().await);

        let games_before = session.games().to_vec();
        session.request_guide(10);
        assert!(session.wait_event().await);

        assert_eq!(provider.guide_calls.load(Ordering::SeqCst), 1);
        assert!(session.take_navigation().is_none());
        assert_eq!(session.games(), games_before.as_slice());
        assert_eq!(session.expanded_game(), Some(10));
        assert_eq!(session.row_state(10), RowState::Expanded);
    }

    #[tokio::test]
    async fn guide_success_is_consumed_once() {
        let (mut session, _provider) = session_with(StubProvider {
            libraries: vec![vec![game(10, "CS", 120)]],
            guide_url: Some("https://steamcommunity.com/guides/cs".to_string()),
            ..Default::default()
        });
        session.set_account("123");
        session.load_library();
        assert!(session.wait_event().await);

        session.request_guide(10);
        assert!(session.wait_event().await);

        assert_eq!(
            session.take_navigation().as_deref(),
            Some("https://steamcommunity.com/guides/cs")
        );
        assert!(session.take_navigation().is_none());
    }

    #[tokio::test]
    async fn display_name_falls_back_to_account_id() {
        let (mut session, _provider) = session_with(StubProvider::default());
        session.set_account("123");
        assert_eq!(session.display_name(), Some("123"));

        session.resolve_display_name();
        assert!(session.wait_event().await);
        // Collaborator had no personaname; identifier still shown
        assert_eq!(session.display_name(), Some("123"));
    }

    #[tokio::test]
    async fn display_name_is_written_once() {
        let (mut session, _provider) = session_with(StubProvider {
            personaname: Some("Gordon".to_string()),
            ..Default::default()
        });
        session.set_account("123");

        session.resolve_display_name();
        assert!(session.wait_event().await);
        assert_eq!(session.display_name(), Some("Gordon"));

        // A second resolution cannot overwrite the first
        session.apply(SessionEvent::NameResolved {
            personaname: Some("Someone Else".to_string()),
        });
        assert_eq!(session.display_name(), Some("Gordon"));
    }
}
