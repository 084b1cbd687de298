use crate::geometry::{is_geometrically_visible, measure};
use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    /// Uniform-ish float in `[start, end)`.
    fn gen_f64(&mut self, start: f64, end: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        start + (end - start) * unit
    }
}

/// A probe that counts how often each accessor runs.
struct CountingProbe {
    sample: Cell<Sample>,
    rect_reads: Cell<usize>,
    style_reads: Cell<usize>,
}

impl CountingProbe {
    fn new(sample: Sample) -> Self {
        Self {
            sample: Cell::new(sample),
            rect_reads: Cell::new(0),
            style_reads: Cell::new(0),
        }
    }

    fn set_rect(&self, rect: Rect) {
        let mut s = self.sample.get();
        s.rect = rect;
        self.sample.set(s);
    }
}

impl Probe for CountingProbe {
    fn bounding_rect(&self) -> Rect {
        self.rect_reads.set(self.rect_reads.get() + 1);
        self.sample.get().rect
    }

    fn viewport(&self) -> Viewport {
        self.sample.get().viewport
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style_reads.set(self.style_reads.get() + 1);
        self.sample.get().style
    }

    fn document_hidden(&self) -> bool {
        self.sample.get().document_hidden
    }
}

const VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

fn on_screen() -> Sample {
    Sample::new(Rect::from_origin_size(100.0, 100.0, 50.0, 50.0), VIEWPORT)
}

fn tracker_with_window(ms: u64) -> VisibilityTracker {
    VisibilityTracker::new(VisibilityOptions::new().with_rate_limit_ms(Some(ms)))
}

#[test]
fn initial_state_is_invisible_with_undefined_buckets() {
    let t = VisibilityTracker::default();
    let s = t.state();
    assert!(!s.visible);
    assert_eq!(s.vertical, None);
    assert_eq!(s.horizontal, None);
    assert!(!s.top_half() && !s.bottom_half());
    assert!(!s.top_third() && !s.middle_third() && !s.bottom_third());
    assert!(!s.left_half() && !s.right_half());
}

#[test]
fn property_random_geometry_buckets_are_exclusive() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..2_000 {
        let viewport = Viewport::new(rng.gen_f64(0.0, 2_000.0), rng.gen_f64(0.0, 2_000.0));
        let x = rng.gen_f64(-3_000.0, 3_000.0);
        let y = rng.gen_f64(-3_000.0, 3_000.0);
        let (w, h) = (rng.gen_f64(0.0, 1_500.0), rng.gen_f64(0.0, 1_500.0));
        let rect = Rect::from_origin_size(x, y, w, h);

        let s = measure(&Sample::new(rect, viewport), true);

        let thirds = [s.top_third(), s.middle_third(), s.bottom_third()]
            .iter()
            .filter(|b| **b)
            .count();
        assert_eq!(thirds, 1, "rect={rect:?} viewport={viewport:?}");
        assert!(s.top_half() ^ s.bottom_half(), "rect={rect:?} viewport={viewport:?}");
        assert!(s.left_half() ^ s.right_half(), "rect={rect:?} viewport={viewport:?}");
    }
}

#[test]
fn property_rect_outside_either_axis_is_not_visible() {
    let mut rng = Lcg::new(42);
    for _ in 0..2_000 {
        let w = rng.gen_f64(1.0, 2_000.0);
        let h = rng.gen_f64(1.0, 2_000.0);
        let viewport = Viewport::new(w, h);
        let size_w = rng.gen_f64(0.0, 500.0);
        let size_h = rng.gen_f64(0.0, 500.0);

        // Entirely above or below the viewport; x anywhere.
        let x = rng.gen_f64(-500.0, w + 500.0);
        let y = if rng.next_u64() & 1 == 0 {
            -size_h - rng.gen_f64(0.0, 500.0)
        } else {
            h + rng.gen_f64(0.0, 500.0)
        };
        let above_or_below = Rect::from_origin_size(x, y, size_w, size_h);
        assert!(!measure(&Sample::new(above_or_below, viewport), true).visible);

        // Entirely left or right of the viewport; y anywhere.
        let y = rng.gen_f64(-500.0, h + 500.0);
        let x = if rng.next_u64() & 1 == 0 {
            -size_w - rng.gen_f64(0.0, 500.0)
        } else {
            w + rng.gen_f64(0.0, 500.0)
        };
        let beside = Rect::from_origin_size(x, y, size_w, size_h);
        assert!(!measure(&Sample::new(beside, viewport), true).visible);
    }
}

#[test]
fn edges_must_be_strictly_inside_the_viewport() {
    // Exactly filling the viewport: no edge is strictly inside.
    let exact = Rect::new(0.0, 600.0, 0.0, 800.0);
    assert!(!is_geometrically_visible(&exact, &VIEWPORT));

    // Overflowing both ends of an axis is not visible either.
    let tall = Rect::new(-100.0, 700.0, 10.0, 20.0);
    assert!(!is_geometrically_visible(&tall, &VIEWPORT));

    // One edge inside per axis is enough.
    let peeking = Rect::new(-100.0, 1.0, 799.0, 900.0);
    assert!(is_geometrically_visible(&peeking, &VIEWPORT));
}

#[test]
fn zero_opacity_hides_geometrically_visible_element() {
    let sample = on_screen().with_style(ComputedStyle::default().with_opacity(0.0));
    assert!(!measure(&sample, true).visible);

    let mut t = VisibilityTracker::default();
    t.check_visibility(&sample);
    assert!(!t.is_visible());
}

#[test]
fn zero_opacity_can_be_ignored() {
    let sample = on_screen().with_style(ComputedStyle::default().with_opacity(0.0));
    let mut t = VisibilityTracker::new(VisibilityOptions::new().with_zero_opacity_hides(false));
    t.check_visibility(&sample);
    assert!(t.is_visible());
}

#[test]
fn css_and_document_state_negate_visibility() {
    assert!(measure(&on_screen(), true).visible);

    let display_none = on_screen().with_style(ComputedStyle::default().with_display(Display::None));
    assert!(!measure(&display_none, true).visible);

    let hidden =
        on_screen().with_style(ComputedStyle::default().with_visibility(CssVisibility::Hidden));
    assert!(!measure(&hidden, true).visible);

    let doc_hidden = on_screen().with_document_hidden(true);
    assert!(!measure(&doc_hidden, true).visible);

    // Only `hidden` counts; `collapse` is left alone.
    let collapse =
        on_screen().with_style(ComputedStyle::default().with_visibility(CssVisibility::Collapse));
    assert!(measure(&collapse, true).visible);
}

#[test]
fn style_is_not_read_for_offscreen_elements() {
    let probe = CountingProbe::new(Sample::new(
        Rect::from_origin_size(100.0, 2_000.0, 50.0, 50.0),
        VIEWPORT,
    ));
    let mut t = VisibilityTracker::default();
    t.check_visibility(&probe);
    assert_eq!(probe.style_reads.get(), 0);

    probe.set_rect(Rect::from_origin_size(100.0, 100.0, 50.0, 50.0));
    t.check_visibility(&probe);
    assert_eq!(probe.style_reads.get(), 1);
}

#[test]
fn buckets_follow_the_element_center() {
    let at = |cx: f64, cy: f64| {
        let rect = Rect::from_origin_size(cx - 5.0, cy - 5.0, 10.0, 10.0);
        measure(&Sample::new(rect, VIEWPORT), true)
    };

    let s = at(100.0, 100.0);
    assert!(s.top_third() && s.top_half() && s.left_half());

    // 1/3 boundary belongs to the middle third.
    let s = at(100.0, 200.0);
    assert!(s.middle_third() && s.top_half());

    // Middle third below the midpoint.
    let s = at(100.0, 350.0);
    assert!(s.middle_third() && s.bottom_half());

    // 2/3 boundary belongs to the bottom third.
    let s = at(400.0, 400.0);
    assert!(s.bottom_third() && s.bottom_half() && s.right_half());

    // Buckets are computed even when the element is off screen.
    let s = at(-1_000.0, -1_000.0);
    assert!(!s.visible && s.top_third() && s.top_half() && s.left_half());
}

#[test]
fn from_css_parses_computed_values() {
    let style = ComputedStyle::from_css("none", "0", "hidden");
    assert_eq!(style.display, Display::None);
    assert_eq!(style.opacity, 0.0);
    assert_eq!(style.visibility, CssVisibility::Hidden);

    let style = ComputedStyle::from_css("block", " 0.5 ", "Collapse");
    assert_eq!(style.display, Display::Other);
    assert_eq!(style.opacity, 0.5);
    assert_eq!(style.visibility, CssVisibility::Collapse);

    let style = ComputedStyle::from_css("", "", "");
    assert_eq!(style, ComputedStyle::default());
}

#[test]
fn first_check_reports_both_bucket_axes() {
    let mut t = VisibilityTracker::default();
    let change = t.check_visibility(&on_screen()).unwrap();
    assert_eq!(
        change,
        VisibilityChange {
            visibility: true,
            vertical: true,
            horizontal: true,
        }
    );

    // Off screen: visibility stays false but the buckets are new.
    let mut t = VisibilityTracker::default();
    let offscreen = Sample::new(Rect::from_origin_size(0.0, 5_000.0, 10.0, 10.0), VIEWPORT);
    let change = t.check_visibility(&offscreen).unwrap();
    assert!(!change.visibility && change.vertical && change.horizontal);
}

#[test]
fn on_change_fires_only_when_state_differs() {
    let calls = Arc::new(Mutex::new(Vec::<(VisibilityChange, VisibilityState)>::new()));
    let mut t = VisibilityTracker::new(VisibilityOptions::new().with_on_change(Some({
        let calls = Arc::clone(&calls);
        move |change: VisibilityChange, state: &VisibilityState| {
            calls.lock().unwrap().push((change, *state));
        }
    })));

    assert!(t.check_visibility(&on_screen()).is_some());
    assert!(t.check_visibility(&on_screen()).is_none());
    assert!(t.check_visibility(&on_screen()).is_none());
    assert_eq!(calls.lock().unwrap().len(), 1);

    // Move right: only the horizontal axis changes.
    let moved = Sample::new(Rect::from_origin_size(600.0, 100.0, 50.0, 50.0), VIEWPORT);
    let change = t.check_visibility(&moved).unwrap();
    assert_eq!(
        change,
        VisibilityChange {
            visibility: false,
            vertical: false,
            horizontal: true,
        }
    );

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    // The callback observes the already-updated state.
    assert!(calls[1].1.right_half());
    assert_eq!(calls[1].1, t.state());
}

#[test]
fn vertical_change_includes_half_within_same_third() {
    let mut t = VisibilityTracker::default();
    // Center at 250: middle third, top half.
    t.check_visibility(&Sample::new(Rect::from_origin_size(10.0, 245.0, 10.0, 10.0), VIEWPORT));
    // Center at 350: middle third, bottom half.
    let change = t
        .check_visibility(&Sample::new(Rect::from_origin_size(10.0, 345.0, 10.0, 10.0), VIEWPORT))
        .unwrap();
    assert!(change.vertical && !change.horizontal && !change.visibility);
    assert!(t.state().middle_third());
}

#[test]
fn burst_within_one_window_runs_leading_and_trailing_check() {
    let probe = CountingProbe::new(on_screen());
    let mut t = tracker_with_window(25);

    for i in 0..50u64 {
        t.trigger(&probe, 100 + (i % 20));
    }
    assert_eq!(t.check_count(), 1);
    assert_eq!(t.deadline_ms(), Some(125));
    assert!(t.rate_limiter().is_pending());

    // Not yet due.
    assert!(t.tick(&probe, 124).is_none());
    assert_eq!(t.check_count(), 1);

    t.tick(&probe, 125);
    assert_eq!(t.check_count(), 2);
    assert_eq!(probe.rect_reads.get(), 2);
    assert!(!t.rate_limiter().is_locked());
    assert_eq!(t.deadline_ms(), None);

    // Nothing pending anymore: further ticks are no-ops.
    t.tick(&probe, 500);
    assert_eq!(t.check_count(), 2);
}

#[test]
fn trailing_check_captures_final_state_of_burst() {
    let probe = CountingProbe::new(on_screen());
    let mut t = tracker_with_window(25);

    assert!(t.trigger(&probe, 0).is_some());
    assert!(t.is_visible());

    // Scrolled away during the window.
    probe.set_rect(Rect::from_origin_size(100.0, -500.0, 50.0, 50.0));
    assert!(t.trigger(&probe, 10).is_none());
    assert!(t.is_visible());

    let change = t.tick(&probe, 30).unwrap();
    assert!(change.visibility);
    assert!(!t.is_visible());
}

#[test]
fn single_trigger_has_no_trailing_check() {
    let probe = CountingProbe::new(on_screen());
    let mut t = tracker_with_window(25);
    t.trigger(&probe, 0);
    t.tick(&probe, 25);
    assert_eq!(t.check_count(), 1);

    // The window closed, so the next trigger is a new leading check.
    t.trigger(&probe, 26);
    assert_eq!(t.check_count(), 2);
}

#[test]
fn trigger_after_unticked_deadline_opens_new_window() {
    let probe = CountingProbe::new(on_screen());
    let mut t = tracker_with_window(25);
    t.trigger(&probe, 0);
    t.trigger(&probe, 5);
    assert!(t.rate_limiter().is_pending());

    // The adapter never ticked; the late trigger checks immediately and the stale pending flag
    // is dropped.
    t.trigger(&probe, 40);
    assert_eq!(t.check_count(), 2);
    assert!(!t.rate_limiter().is_pending());
    assert_eq!(t.deadline_ms(), Some(65));
    t.tick(&probe, 65);
    assert_eq!(t.check_count(), 2);
}

#[test]
fn cancel_pending_suppresses_trailing_check() {
    let probe = CountingProbe::new(on_screen());
    let mut t = tracker_with_window(25);
    t.trigger(&probe, 0);
    t.trigger(&probe, 1);
    t.cancel_pending();
    t.tick(&probe, 1_000);
    assert_eq!(t.check_count(), 1);
}

#[test]
fn reset_forgets_state() {
    let mut t = tracker_with_window(25);
    t.trigger(&on_screen(), 0);
    t.trigger(&on_screen(), 1);
    assert!(t.is_visible());

    t.reset();
    assert_eq!(t.state(), VisibilityState::INITIAL);
    assert_eq!(t.check_count(), 0);
    assert_eq!(t.deadline_ms(), None);
    // Starting over reports both axes again.
    let change = t.trigger(&on_screen(), 2).unwrap();
    assert!(change.vertical && change.horizontal);
}

#[test]
fn zero_window_coalesces_same_millisecond_burst() {
    let mut t = tracker_with_window(0);
    for _ in 0..10 {
        t.trigger(&on_screen(), 5);
    }
    assert_eq!(t.check_count(), 1);
    assert_eq!(t.deadline_ms(), Some(5));
    assert!(t.rate_limiter().is_pending());

    t.tick(&on_screen(), 6);
    assert_eq!(t.check_count(), 2);
    assert!(!t.rate_limiter().is_locked());
}

#[test]
fn zero_window_checks_once_per_millisecond() {
    let mut t = tracker_with_window(0);
    for now in 0..5 {
        t.trigger(&on_screen(), now);
    }
    assert_eq!(t.check_count(), 5);
    assert_eq!(t.deadline_ms(), Some(4));
}

#[test]
fn trigger_on_the_deadline_waits_for_expire() {
    let mut rl = RateLimiter::new();
    assert!(rl.trigger(0, 10));
    assert!(!rl.trigger(10, 10));
    assert!(rl.is_pending());
    assert!(rl.expire(10));
    assert!(rl.trigger(11, 10));
}

#[test]
fn global_rate_limit_applies_to_windows_opened_later() {
    assert_eq!(DEFAULT_RATE_LIMIT_MS, 25);

    // Other tests pin their window with an override, so changing the global is safe here.
    let prev = rate_limit_ms();
    set_rate_limit_ms(100);
    let mut t = VisibilityTracker::default();
    t.trigger(&on_screen(), 0);
    assert_eq!(t.deadline_ms(), Some(100));

    // An override wins over the global value.
    t.set_rate_limit_ms(Some(10));
    t.tick(&on_screen(), 100);
    t.trigger(&on_screen(), 200);
    assert_eq!(t.deadline_ms(), Some(210));

    set_rate_limit_ms(prev);
}

#[test]
fn rate_limiter_state_machine() {
    let mut rl = RateLimiter::new();
    assert!(rl.trigger(0, 10));
    assert!(!rl.trigger(3, 10));
    assert!(!rl.trigger(4, 10));
    assert!(rl.is_locked() && rl.is_pending());
    assert!(!rl.expire(9));
    assert!(rl.expire(10));
    assert!(!rl.is_locked() && !rl.is_pending());
    assert!(!rl.expire(20));
}

#[test]
fn visibility_change_merge_and_any() {
    let a = VisibilityChange {
        visibility: true,
        ..VisibilityChange::default()
    };
    let b = VisibilityChange {
        horizontal: true,
        ..VisibilityChange::default()
    };
    assert!(!VisibilityChange::default().any());
    let m = a.merge(b);
    assert!(m.visibility && m.horizontal && !m.vertical);
}

#[test]
fn options_debug_hides_callback() {
    let counter = Arc::new(AtomicUsize::new(0));
    let opts = VisibilityOptions::new().with_on_change(Some({
        let counter = Arc::clone(&counter);
        move |_: VisibilityChange, _: &VisibilityState| {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }));
    let s = std::format!("{opts:?}");
    assert!(s.contains("on_change: Some(\"..\")"), "{s}");
    assert!(s.ends_with(", .. }"), "{s}");

    let mut t = VisibilityTracker::new(opts);
    t.check_visibility(&on_screen());
    assert_eq!(counter.load(Ordering::Relaxed), 1);
}

#[test]
fn example_basic_smoke() {
    let seen = Arc::new(AtomicUsize::new(0));
    let mut t = VisibilityTracker::new(
        VisibilityOptions::new()
            .with_rate_limit_ms(Some(25))
            .with_on_change(Some({
                let seen = Arc::clone(&seen);
                move |_: VisibilityChange, _: &VisibilityState| {
                    seen.fetch_add(1, Ordering::Relaxed);
                }
            })),
    );

    // Scroll a 100px tall element from below the fold to above it, one event per 5ms.
    let mut now = 0u64;
    let mut y = 900.0;
    while y > -200.0 {
        let sample = Sample::new(Rect::from_origin_size(50.0, y, 200.0, 100.0), VIEWPORT);
        t.tick(&sample, now);
        t.trigger(&sample, now);
        y -= 20.0;
        now += 5;
    }
    let last = Sample::new(Rect::from_origin_size(50.0, y, 200.0, 100.0), VIEWPORT);
    t.tick(&last, now + 25);

    assert!(!t.is_visible());
    assert!(t.state().top_third());
    // 55 events, one leading check per 25ms window plus trailing checks.
    assert!(t.check_count() < 55);
    assert!(seen.load(Ordering::Relaxed) >= 3);
}
