//! Screen-reader announcements through transient live-region nodes.
//!
//! Each announcement creates its own node and schedules it for removal after
//! a fixed time to live. Removal is best effort: the host calls
//! [`Announcer::flush_expired`] from whatever tick it already has, and a
//! second announcement made before the first is cleaned up just creates a
//! second node.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// How long a live-region node stays in the tree.
pub const DEFAULT_ANNOUNCEMENT_TTL: Duration = Duration::from_secs(1);

/// Live region politeness, as in `aria-live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Politeness {
    /// Announced when the user is idle
    #[default]
    Polite,
    /// Announced immediately
    Assertive,
}

impl Politeness {
    /// Attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// What the announcer needs from the UI tree.
pub trait LiveRegionHost {
    /// Handle of a created node.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Insert a live-region node carrying `message`.
    fn create_live_node(&mut self, message: &str, politeness: Politeness) -> Self::Node;

    /// Remove a node created by [`LiveRegionHost::create_live_node`].
    fn remove_node(&mut self, node: &Self::Node);
}

/// Creates transient live-region nodes and removes them once expired.
#[derive(Debug, Clone)]
pub struct Announcer<N> {
    ttl: Duration,
    /// Removal deadline per node; `None` when `now + ttl` is past what
    /// `Instant` can represent, so the node never expires.
    pending: Vec<(Option<Instant>, N)>,
}

impl<N> Default for Announcer<N> {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_ANNOUNCEMENT_TTL,
            pending: Vec::new(),
        }
    }
}

impl<N: Clone + PartialEq + fmt::Debug> Announcer<N> {
    /// Announcer with the default one-second time to live.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Announcer with a custom time to live.
    ///
    /// A TTL too large to add to the clock (such as [`Duration::MAX`]) means
    /// nodes are only removed by [`Announcer::clear`].
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: Vec::new(),
        }
    }

    /// Time to live of each node.
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Nodes created but not yet removed.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Announce `message`, returning the node that carries it.
    ///
    /// Blank messages create nothing and return `None`.
    pub fn announce<H>(
        &mut self,
        host: &mut H,
        message: &str,
        politeness: Politeness,
        now: Instant,
    ) -> Option<N>
    where
        H: LiveRegionHost<Node = N>,
    {
        if message.trim().is_empty() {
            return None;
        }

        let node = host.create_live_node(message, politeness);
        tracing::debug!(?node, politeness = politeness.as_str(), "live region created");
        self.pending.push((now.checked_add(self.ttl), node.clone()));
        Some(node)
    }

    /// Remove every node whose time to live has elapsed at `now`.
    ///
    /// Returns how many nodes were removed.
    pub fn flush_expired<H>(&mut self, host: &mut H, now: Instant) -> usize
    where
        H: LiveRegionHost<Node = N>,
    {
        let before = self.pending.len();
        self.pending.retain(|(deadline, node)| {
            if deadline.is_some_and(|d| d <= now) {
                host.remove_node(node);
                false
            } else {
                true
            }
        });
        let removed = before - self.pending.len();
        if removed > 0 {
            tracing::trace!(removed, "live regions removed");
        }
        removed
    }

    /// Remove all pending nodes regardless of age.
    pub fn clear<H>(&mut self, host: &mut H)
    where
        H: LiveRegionHost<Node = N>,
    {
        for (_, node) in self.pending.drain(..) {
            host.remove_node(&node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Regions {
        next: u32,
        live: Vec<(u32, String, Politeness)>,
    }

    impl LiveRegionHost for Regions {
        type Node = u32;

        fn create_live_node(&mut self, message: &str, politeness: Politeness) -> u32 {
            self.next += 1;
            self.live.push((self.next, message.to_string(), politeness));
            self.next
        }

        fn remove_node(&mut self, node: &u32) {
            self.live.retain(|(id, _, _)| id != node);
        }
    }

    #[test]
    fn test_announce_creates_node() {
        let mut host = Regions::default();
        let mut announcer = Announcer::new();
        let now = Instant::now();

        let node = announcer.announce(&mut host, "Saved", Politeness::Polite, now);
        assert_eq!(node, Some(1));
        assert_eq!(host.live, vec![(1, "Saved".to_string(), Politeness::Polite)]);
        assert_eq!(announcer.pending_count(), 1);
    }

    #[test]
    fn test_node_removed_after_ttl() {
        let mut host = Regions::default();
        let mut announcer = Announcer::new();
        let now = Instant::now();
        announcer.announce(&mut host, "Saved", Politeness::Polite, now);

        assert_eq!(announcer.flush_expired(&mut host, now + Duration::from_millis(999)), 0);
        assert_eq!(host.live.len(), 1);
        assert_eq!(announcer.flush_expired(&mut host, now + DEFAULT_ANNOUNCEMENT_TTL), 1);
        assert!(host.live.is_empty());
        assert_eq!(announcer.pending_count(), 0);
    }

    #[test]
    fn test_overlapping_announcements_create_separate_nodes() {
        let mut host = Regions::default();
        let mut announcer = Announcer::new();
        let t0 = Instant::now();

        announcer.announce(&mut host, "One", Politeness::Polite, t0);
        announcer.announce(
            &mut host,
            "Two",
            Politeness::Assertive,
            t0 + Duration::from_millis(500),
        );
        assert_eq!(host.live.len(), 2);

        announcer.flush_expired(&mut host, t0 + Duration::from_millis(1200));
        assert_eq!(host.live, vec![(2, "Two".to_string(), Politeness::Assertive)]);
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let mut host = Regions::default();
        let mut announcer = Announcer::new();
        assert_eq!(
            announcer.announce(&mut host, "  ", Politeness::Polite, Instant::now()),
            None
        );
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_custom_ttl_and_clear() {
        let mut host = Regions::default();
        let mut announcer = Announcer::with_ttl(Duration::from_secs(5));
        assert_eq!(announcer.ttl(), Duration::from_secs(5));

        let now = Instant::now();
        announcer.announce(&mut host, "A", Politeness::Polite, now);
        announcer.announce(&mut host, "B", Politeness::Polite, now);
        assert_eq!(announcer.flush_expired(&mut host, now + Duration::from_secs(2)), 0);

        announcer.clear(&mut host);
        assert!(host.live.is_empty());
        assert_eq!(announcer.pending_count(), 0);
    }

    #[test]
    fn test_unrepresentable_deadline_never_expires() {
        let mut host = Regions::default();
        let mut announcer = Announcer::with_ttl(Duration::MAX);
        let now = Instant::now();

        assert_eq!(announcer.announce(&mut host, "Pinned", Politeness::Polite, now), Some(1));
        assert_eq!(announcer.flush_expired(&mut host, now + Duration::from_secs(86_400)), 0);
        assert_eq!(host.live.len(), 1);

        announcer.clear(&mut host);
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_politeness_as_str() {
        assert_eq!(Politeness::Polite.as_str(), "polite");
        assert_eq!(Politeness::Assertive.as_str(), "assertive");
        assert_eq!(Politeness::default(), Politeness::Polite);
    }
}
