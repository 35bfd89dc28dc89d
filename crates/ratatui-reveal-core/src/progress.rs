//! Progress sources.
//!
//! The reveal effect only needs "a scalar in [0, 1] that changes over time". [`ProgressSource`]
//! is that contract. [`ProgressValue`] is an observable cell implementing it, and
//! [`ScrollTracker`] keeps one up to date from a region's position inside a scrolled viewport.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::rc::Weak;
use std::str::FromStr;

use crate::error::OffsetParseError;
use crate::opacity::sanitize_progress;

pub trait ProgressSource {
    /// Current progress, always within [0, 1].
    fn progress(&self) -> f64;
}

impl ProgressSource for f64 {
    fn progress(&self) -> f64 {
        sanitize_progress(*self)
    }
}

impl<T: ProgressSource + ?Sized> ProgressSource for &T {
    fn progress(&self) -> f64 {
        (**self).progress()
    }
}

type Listener = Box<dyn FnMut(f64)>;

#[derive(Default)]
struct Shared {
    value: f64,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    // Ids dropped while their listener was checked out for notification.
    removed: Vec<u64>,
    notifying: bool,
    // A nested `set` changed the value; the running notification goes round again.
    pending: bool,
}

/// A single-threaded observable progress cell.
///
/// Clones share the same value and listeners. Listeners registered with
/// [`ProgressValue::on_change`] stay alive exactly as long as the returned [`Subscription`].
#[derive(Clone, Default)]
pub struct ProgressValue {
    inner: Rc<RefCell<Shared>>,
}

impl ProgressValue {
    pub fn new(value: f64) -> Self {
        let this = Self::default();
        this.inner.borrow_mut().value = sanitize_progress(value);
        this
    }

    pub fn get(&self) -> f64 {
        self.inner.borrow().value
    }

    /// Stores a new reading and notifies listeners if it changed.
    ///
    /// Returns `true` when the stored value changed. Intermediate readings are not queued: each
    /// call overwrites the previous one. A `set` from inside a listener only stores the value;
    /// the outermost `set` then notifies every listener once more with the latest reading.
    pub fn set(&self, value: f64) -> bool {
        let value = sanitize_progress(value);
        let mut listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            if inner.notifying {
                inner.pending = true;
                return true;
            }
            inner.notifying = true;
            std::mem::take(&mut inner.listeners)
        };

        loop {
            let current = self.get();
            for (id, listener) in listeners.iter_mut() {
                if self.inner.borrow().removed.contains(id) {
                    continue;
                }
                listener(current);
            }

            let mut inner = self.inner.borrow_mut();
            // Listeners added during notification go after the existing ones.
            listeners.append(&mut inner.listeners);
            if !std::mem::take(&mut inner.pending) {
                let removed = std::mem::take(&mut inner.removed);
                listeners.retain(|(id, _)| !removed.contains(id));
                inner.listeners = listeners;
                inner.notifying = false;
                return true;
            }
        }
    }

    #[must_use = "the listener is removed when the subscription is dropped"]
    pub fn on_change(&self, listener: impl FnMut(f64) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl fmt::Debug for ProgressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ProgressValue")
            .field("value", &inner.value)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl ProgressSource for ProgressValue {
    fn progress(&self) -> f64 {
        self.get()
    }
}

/// Keeps a [`ProgressValue`] listener registered until dropped.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    inner: Weak<RefCell<Shared>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let Ok(mut inner) = inner.try_borrow_mut() else {
            return;
        };
        let before = inner.listeners.len();
        inner.listeners.retain(|(id, _)| *id != self.id);
        if inner.listeners.len() == before && inner.notifying {
            inner.removed.push(self.id);
        }
    }
}

/// A point along the target region or the viewport, as a fraction of its height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Start,
    Center,
    End,
    Fraction(f64),
}

impl Edge {
    pub fn fraction(self) -> f64 {
        match self {
            Edge::Start => 0.0,
            Edge::Center => 0.5,
            Edge::End => 1.0,
            Edge::Fraction(f) => f,
        }
    }
}

impl FromStr for Edge {
    type Err = OffsetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => Err(OffsetParseError::Empty),
            "start" => Ok(Edge::Start),
            "center" => Ok(Edge::Center),
            "end" => Ok(Edge::End),
            _ => {
                let (number, scale) = match s.strip_suffix('%') {
                    Some(pct) => (pct, 100.0),
                    None => (s, 1.0),
                };
                match number.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(Edge::Fraction(v / scale)),
                    _ => Err(OffsetParseError::InvalidEdge(s.to_string())),
                }
            }
        }
    }
}

/// "When this edge of the target meets this edge of the viewport".
///
/// Parsed from `"<target> <viewport>"`, e.g. `"start 0.9"`: the target's top edge sits 90% of the
/// way down the viewport. A single edge applies to both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOffset {
    pub target: Edge,
    pub container: Edge,
}

impl ScrollOffset {
    pub fn new(target: Edge, container: Edge) -> Self {
        Self { target, container }
    }
}

impl FromStr for ScrollOffset {
    type Err = OffsetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let target: Edge = parts.next().ok_or(OffsetParseError::Empty)?.parse()?;
        let container = match parts.next() {
            Some(p) => p.parse()?,
            None => target,
        };
        if parts.next().is_some() {
            return Err(OffsetParseError::TooManyEdges(s.trim().to_string()));
        }
        Ok(Self { target, container })
    }
}

/// The offsets at which progress reads 0 (`from`) and 1 (`to`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOffsets {
    pub from: ScrollOffset,
    pub to: ScrollOffset,
}

impl ScrollOffsets {
    pub fn parse(from: &str, to: &str) -> Result<Self, OffsetParseError> {
        Ok(Self {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

impl Default for ScrollOffsets {
    fn default() -> Self {
        Self {
            from: ScrollOffset::new(Edge::Start, Edge::Fraction(0.9)),
            to: ScrollOffset::new(Edge::Start, Edge::Fraction(0.5)),
        }
    }
}

/// The rows a tracked element occupies on the scrolled page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region {
    pub top: u32,
    pub height: u32,
}

impl Region {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }
}

/// Maps the scroll position of a page onto progress for one region of it.
#[derive(Clone, Debug, Default)]
pub struct ScrollTracker {
    region: Region,
    offsets: ScrollOffsets,
    value: ProgressValue,
}

impl ScrollTracker {
    pub fn new(region: Region, offsets: ScrollOffsets) -> Self {
        Self {
            region,
            offsets,
            value: ProgressValue::default(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    pub fn offsets(&self) -> ScrollOffsets {
        self.offsets
    }

    pub fn set_offsets(&mut self, offsets: ScrollOffsets) {
        self.offsets = offsets;
    }

    /// The observable progress this tracker writes to.
    pub fn value(&self) -> ProgressValue {
        self.value.clone()
    }

    /// Progress for a page scrolled to `scroll_y` inside a viewport `viewport_h` rows tall.
    pub fn progress_at(&self, scroll_y: u32, viewport_h: u16) -> f64 {
        let from = self.scroll_where(self.offsets.from, viewport_h);
        let to = self.scroll_where(self.offsets.to, viewport_h);
        let scroll_y = scroll_y as f64;
        if from == to {
            return if scroll_y < from { 0.0 } else { 1.0 };
        }
        sanitize_progress((scroll_y - from) / (to - from))
    }

    /// Recomputes progress and publishes it to listeners. Returns the new progress.
    pub fn update(&self, scroll_y: u32, viewport_h: u16) -> f64 {
        let progress = self.progress_at(scroll_y, viewport_h);
        if self.value.set(progress) {
            log::trace!("scroll_y={scroll_y} viewport_h={viewport_h} progress={progress:.3}");
        }
        progress
    }

    // Scroll position at which `offset` is satisfied.
    fn scroll_where(&self, offset: ScrollOffset, viewport_h: u16) -> f64 {
        self.region.top as f64 + offset.target.fraction() * self.region.height as f64
            - offset.container.fraction() * viewport_h as f64
    }
}

impl ProgressSource for ScrollTracker {
    fn progress(&self) -> f64 {
        self.value.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[test]
    fn set_notifies_only_on_change() {
        let value = ProgressValue::new(0.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = value.on_change(move |v| sink.borrow_mut().push(v));

        assert!(value.set(0.25));
        assert!(!value.set(0.25));
        assert!(value.set(0.1));
        assert_eq!(*seen.borrow(), vec![0.25, 0.1]);
    }

    #[test]
    fn set_sanitizes_readings() {
        let value = ProgressValue::new(0.5);
        value.set(f64::NAN);
        assert_eq!(value.get(), 0.0);
        value.set(3.0);
        assert_eq!(value.progress(), 1.0);
    }

    #[test]
    fn dropping_subscription_releases_listener() {
        let value = ProgressValue::default();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let sub = value.on_change(move |_| counter.set(counter.get() + 1));
        assert_eq!(value.listener_count(), 1);

        value.set(0.5);
        drop(sub);
        assert_eq!(value.listener_count(), 0);
        value.set(0.6);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn subscription_outliving_value_is_harmless() {
        let value = ProgressValue::default();
        let sub = value.on_change(|_| {});
        drop(value);
        drop(sub);
    }

    #[test]
    fn listener_may_subscribe_during_notification() {
        let value = ProgressValue::default();
        let handle = value.clone();
        let late = Rc::new(RefCell::new(Vec::new()));
        let late_subs = late.clone();
        let _sub = value.on_change(move |_| {
            if late_subs.borrow().is_empty() {
                late_subs.borrow_mut().push(handle.on_change(|_| {}));
            }
        });
        value.set(0.3);
        assert_eq!(value.listener_count(), 2);
        late.borrow_mut().clear();
        assert_eq!(value.listener_count(), 1);
    }

    #[test]
    fn subscription_dropped_mid_notification_never_fires_again() {
        let value = ProgressValue::default();
        let b_hits = Rc::new(Cell::new(0));
        let b_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let handle = value.clone();
        let slot = b_slot.clone();
        let _a = value.on_change(move |_| {
            if let Some(b) = slot.borrow_mut().take() {
                drop(b);
                handle.set(0.6);
            }
        });
        let counter = b_hits.clone();
        *b_slot.borrow_mut() = Some(value.on_change(move |_| counter.set(counter.get() + 1)));

        value.set(0.5);
        assert_eq!(b_hits.get(), 0);
        assert_eq!(value.get(), 0.6);
        assert_eq!(value.listener_count(), 1);

        value.set(0.9);
        assert_eq!(b_hits.get(), 0);
        assert_eq!(value.listener_count(), 1);
    }

    #[test]
    fn nested_set_reaches_every_listener_with_latest_value() {
        let value = ProgressValue::default();
        let handle = value.clone();
        let _a = value.on_change(move |v| {
            if v == 0.5 {
                handle.set(0.9);
            }
        });
        let b_seen = Rc::new(RefCell::new(Vec::new()));
        let sink = b_seen.clone();
        let _b = value.on_change(move |v| sink.borrow_mut().push(v));

        assert!(value.set(0.5));
        assert_eq!(value.get(), 0.9);
        assert_eq!(b_seen.borrow().last(), Some(&0.9));
        assert_eq!(value.listener_count(), 2);
    }

    #[rstest]
    #[case("start", Edge::Start)]
    #[case("center", Edge::Center)]
    #[case("end", Edge::End)]
    #[case("0.9", Edge::Fraction(0.9))]
    #[case("50%", Edge::Fraction(0.5))]
    fn parses_edges(#[case] input: &str, #[case] expected: Edge) {
        assert_eq!(input.parse::<Edge>(), Ok(expected));
    }

    #[test]
    fn parses_offsets() {
        assert_eq!(
            "start 0.9".parse::<ScrollOffset>(),
            Ok(ScrollOffset::new(Edge::Start, Edge::Fraction(0.9)))
        );
        assert_eq!(
            "end".parse::<ScrollOffset>(),
            Ok(ScrollOffset::new(Edge::End, Edge::End))
        );
        assert_eq!(
            ScrollOffsets::parse("start 0.9", "start 0.5"),
            Ok(ScrollOffsets::default())
        );
    }

    #[test]
    fn rejects_bad_offsets() {
        assert_eq!("".parse::<ScrollOffset>(), Err(OffsetParseError::Empty));
        assert_eq!(
            "top 0.5".parse::<ScrollOffset>(),
            Err(OffsetParseError::InvalidEdge("top".to_string()))
        );
        assert_eq!(
            "start 0.5 end".parse::<ScrollOffset>(),
            Err(OffsetParseError::TooManyEdges("start 0.5 end".to_string()))
        );
        assert!("nan".parse::<Edge>().is_err());
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(82, 0.0)]
    #[case(86, 0.5)]
    #[case(90, 1.0)]
    #[case(500, 1.0)]
    fn default_offsets_track_region_top(#[case] scroll_y: u32, #[case] expected: f64) {
        // Region top meets 90% of a 20-row viewport at scroll 82, and 50% at scroll 90.
        let tracker = ScrollTracker::new(Region::new(100, 4), ScrollOffsets::default());
        assert!((tracker.progress_at(scroll_y, 20) - expected).abs() < 1e-9);
    }

    #[test]
    fn update_publishes_and_reverses() {
        let tracker = ScrollTracker::new(Region::new(100, 4), ScrollOffsets::default());
        let value = tracker.value();
        assert_eq!(tracker.update(90, 20), 1.0);
        assert_eq!(value.get(), 1.0);
        tracker.update(84, 20);
        assert!((tracker.progress() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn coincident_offsets_step() {
        let offsets = ScrollOffsets::parse("start 0.5", "start 0.5").expect("valid offsets");
        let tracker = ScrollTracker::new(Region::new(30, 2), offsets);
        assert_eq!(tracker.progress_at(19, 20), 0.0);
        assert_eq!(tracker.progress_at(20, 20), 1.0);
    }
}
