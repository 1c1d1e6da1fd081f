use std::collections::BTreeMap;

use layers::GeoPin;

use crate::query::PinQuery;
use crate::request::Request;
use crate::residency::FetchState;

pub const DEFAULT_MAX_ENTRIES: usize = 16;

#[derive(Debug, Clone)]
struct Entry {
    state: FetchState,
    pins: Option<Vec<GeoPin>>,
    last_used_tick: u64,
}

/// Latest-request-wins bookkeeping for pin fetches, with a small result cache.
///
/// Only the most recent request is ever accepted. An older response that
/// resolves late is dropped, so the map never shows pins for a filter the
/// user has already left.
///
/// Notes on determinism:
/// - Entries are keyed in a `BTreeMap` for stable traversal order.
/// - Eviction is LRU by `last_used_tick`, with a tie-break by query ordering.
#[derive(Debug)]
pub struct FetchTracker {
    max_entries: usize,
    tick: u64,
    next_request: u64,
    current: Option<PinQuery>,
    /// The one request whose response is still wanted.
    latest: Option<(Request, PinQuery)>,
    entries: BTreeMap<PinQuery, Entry>,
}

impl Default for FetchTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl FetchTracker {
    /// `max_entries` bounds the result cache; the current query is never evicted.
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            tick: 0,
            next_request: 1,
            current: None,
            latest: None,
            entries: BTreeMap::new(),
        }
    }

    pub fn current(&self) -> Option<&PinQuery> {
        self.current.as_ref()
    }

    /// The outstanding request, until it completes or fails.
    pub fn latest(&self) -> Option<Request> {
        self.latest.as_ref().map(|(req, _)| *req)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self, query: &PinQuery) -> Option<FetchState> {
        self.entries.get(query).map(|e| e.state)
    }

    pub fn is_loading(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|q| self.state(q) == Some(FetchState::InFlight))
    }

    /// Pins from the last accepted response for `query`.
    pub fn cached(&self, query: &PinQuery) -> Option<&[GeoPin]> {
        self.entries.get(query)?.pins.as_deref()
    }

    /// Starts a fetch for `query`, superseding every earlier request.
    pub fn begin(&mut self, query: PinQuery) -> Request {
        self.tick += 1;
        let req = Request(self.next_request);
        self.next_request += 1;

        self.latest = Some((req, query.clone()));

        let entry = self.entries.entry(query.clone()).or_insert_with(|| Entry {
            state: FetchState::InFlight,
            pins: None,
            last_used_tick: self.tick,
        });
        entry.state = FetchState::InFlight;
        entry.last_used_tick = self.tick;

        self.current = Some(query);
        self.evict_as_needed();
        req
    }

    /// Accepts `pins` if `req` is the latest request. Stale responses return `None`.
    pub fn complete(&mut self, req: Request, pins: Vec<GeoPin>) -> Option<&[GeoPin]> {
        let query = self.take_latest(req)?;
        self.tick += 1;
        let entry = self.entries.get_mut(&query)?;
        entry.state = FetchState::Ready;
        entry.pins = Some(pins);
        entry.last_used_tick = self.tick;
        entry.pins.as_deref()
    }

    /// Records a failure for the latest request; earlier pins stay cached.
    /// Returns `false` for stale requests.
    pub fn fail(&mut self, req: Request) -> bool {
        let Some(query) = self.take_latest(req) else {
            return false;
        };
        if let Some(e) = self.entries.get_mut(&query) {
            e.state = FetchState::Failed;
        }
        true
    }

    fn take_latest(&mut self, req: Request) -> Option<PinQuery> {
        match self.latest.take() {
            Some((latest, query)) if latest == req => Some(query),
            other => {
                tracing::debug!(
                    request = req.0,
                    latest = ?other.as_ref().map(|(r, _)| r.0),
                    "dropping stale pin response"
                );
                self.latest = other;
                None
            }
        }
    }

    fn evict_as_needed(&mut self) {
        while self.entries.len() > self.max_entries {
            let victim = self
                .entries
                .iter()
                .filter(|(q, _)| self.current.as_ref() != Some(*q))
                .min_by(|(qa, ea), (qb, eb)| {
                    ea.last_used_tick
                        .cmp(&eb.last_used_tick)
                        .then_with(|| qa.cmp(qb))
                })
                .map(|(q, _)| q.clone());
            let Some(q) = victim else {
                return;
            };
            self.entries.remove(&q);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FetchTracker;
    use crate::query::PinQuery;
    use crate::residency::FetchState;
    use layers::{GeoPin, PinKind};

    fn query(region: &str) -> PinQuery {
        PinQuery {
            region: Some(region.to_string()),
            ..PinQuery::default()
        }
    }

    fn pins(id: &str) -> Vec<GeoPin> {
        vec![GeoPin::new(id, PinKind::Artist, Some(50.0), Some(30.0), id)]
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut t = FetchTracker::default();
        let a = t.begin(query("KYIV"));
        let b = t.begin(query("LVIV"));

        assert!(t.complete(a, pins("a")).is_none());
        assert_eq!(t.latest(), Some(b));
        assert!(t.cached(&query("KYIV")).is_none());

        let accepted = t.complete(b, pins("b")).unwrap();
        assert_eq!(accepted[0].id, "b");
        assert_eq!(t.state(&query("LVIV")), Some(FetchState::Ready));
        assert!(!t.is_loading());
    }

    #[test]
    fn refetch_keeps_previous_pins_until_answered() {
        let mut t = FetchTracker::default();
        let first = t.begin(query("KYIV"));
        t.complete(first, pins("old"));

        let second = t.begin(query("KYIV"));
        assert!(t.is_loading());
        assert_eq!(t.cached(&query("KYIV")).map(|p| p[0].id.as_str()), Some("old"));

        assert!(t.fail(second));
        assert_eq!(t.state(&query("KYIV")), Some(FetchState::Failed));
        assert_eq!(t.cached(&query("KYIV")).map(|p| p.len()), Some(1));
        assert!(!t.fail(first));
    }

    #[test]
    fn lru_eviction_spares_current_query() {
        let mut t = FetchTracker::new(2);
        for r in ["A", "B", "C"] {
            let req = t.begin(query(r));
            t.complete(req, pins(r));
        }
        assert_eq!(t.len(), 2);
        assert!(t.cached(&query("A")).is_none());
        assert!(t.cached(&query("C")).is_some());
    }

    #[test]
    fn completing_twice_is_rejected() {
        let mut t = FetchTracker::default();
        let req = t.begin(PinQuery::default());
        assert_eq!(t.latest(), Some(req));
        assert!(t.complete(req, pins("x")).is_some());
        assert_eq!(t.latest(), None);
        assert!(t.complete(req, pins("y")).is_none());
        assert_eq!(t.cached(&PinQuery::default()).map(|p| p[0].id.as_str()), Some("x"));
    }
}
