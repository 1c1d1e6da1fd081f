//! Document-level pointer listeners with scoped lifetimes.
//!
//! Components that need to react to pointer interactions *outside* their own
//! subtree (popover dismissal) register here. Registration returns an
//! [`OutsideListener`] guard; dropping the guard detaches the listener, so a
//! listener can never outlive the component state that acquired it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use foundation::ids::NodeId;
use foundation::time::Timestamp;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// A primary-pointer press, as seen by the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerDown {
    /// The target node followed by its ancestors, innermost first.
    pub path: Vec<NodeId>,
    pub time: Timestamp,
}

impl PointerDown {
    pub fn new(path: Vec<NodeId>, time: Timestamp) -> Self {
        Self { path, time }
    }

    /// A press on the map background (no component node in the path).
    pub fn on_background(time: Timestamp) -> Self {
        Self::new(Vec::new(), time)
    }

    pub fn is_within(&self, node: NodeId) -> bool {
        self.path.contains(&node)
    }
}

#[derive(Debug)]
struct Listener {
    inside: Vec<NodeId>,
    armed_at: Timestamp,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<ListenerId, Listener>,
}

/// Shared handle to the document listener table.
///
/// Single-threaded by construction (UI event loop); clones share one table.
#[derive(Debug, Clone, Default)]
pub struct PointerRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl PointerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener that fires for presses outside every node in
    /// `inside`, ignoring presses earlier than `now + grace`.
    pub fn listen_outside(
        &self,
        inside: Vec<NodeId>,
        now: Timestamp,
        grace: Duration,
    ) -> OutsideListener {
        let mut reg = self.inner.borrow_mut();
        let id = ListenerId(reg.next_id);
        reg.next_id += 1;
        reg.listeners.insert(
            id,
            Listener {
                inside,
                armed_at: now.saturating_add(grace),
            },
        );
        OutsideListener {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the listeners this press fires, in ascending id order.
    pub fn dispatch(&self, ev: &PointerDown) -> Vec<ListenerId> {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, l)| ev.time >= l.armed_at)
            .filter(|(_, l)| !l.inside.iter().any(|n| ev.is_within(*n)))
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Attached listener; detached on drop.
#[derive(Debug)]
pub struct OutsideListener {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl OutsideListener {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for OutsideListener {
    fn drop(&mut self) {
        if let Some(reg) = self.registry.upgrade() {
            reg.borrow_mut().listeners.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PointerDown, PointerRegistry};
    use foundation::ids::NodeId;
    use foundation::time::Timestamp;
    use std::time::Duration;

    const GRACE: Duration = Duration::from_millis(100);

    #[test]
    fn guard_drop_detaches_listener() {
        let reg = PointerRegistry::new();
        let guard = reg.listen_outside(vec![NodeId::new(1)], Timestamp(0), GRACE);
        assert_eq!(reg.len(), 1);
        drop(guard);
        assert!(reg.is_empty());
    }

    #[test]
    fn presses_inside_never_fire() {
        let reg = PointerRegistry::new();
        let inside_nodes = vec![NodeId::new(1), NodeId::new(2)];
        let guard = reg.listen_outside(inside_nodes, Timestamp(0), GRACE);

        let inside = PointerDown::new(vec![NodeId::new(7), NodeId::new(2)], Timestamp(500));
        assert!(reg.dispatch(&inside).is_empty());

        let outside = PointerDown::new(vec![NodeId::new(7)], Timestamp(500));
        assert_eq!(reg.dispatch(&outside), vec![guard.id()]);
    }

    #[test]
    fn presses_during_grace_are_ignored() {
        let reg = PointerRegistry::new();
        let guard = reg.listen_outside(vec![NodeId::new(1)], Timestamp(1_000), GRACE);

        assert!(reg.dispatch(&PointerDown::on_background(Timestamp(1_050))).is_empty());
        assert_eq!(
            reg.dispatch(&PointerDown::on_background(Timestamp(1_100))),
            vec![guard.id()]
        );
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let reg = PointerRegistry::new();
        let guard = reg.listen_outside(Vec::new(), Timestamp(0), GRACE);
        drop(reg);
        drop(guard);
    }
}
