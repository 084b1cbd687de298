use visibility_tracker::{
    Rect, Sample, Viewport, VisibilityChange, VisibilityOptions, VisibilityState, VisibilityTracker,
};

fn main() {
    let viewport = Viewport::new(1280.0, 720.0);
    let on_change = |change: VisibilityChange, state: &VisibilityState| {
        println!(
            "changed {change:?}: visible={} top_third={} middle_third={} bottom_third={} left_half={}",
            state.visible,
            state.top_third(),
            state.middle_third(),
            state.bottom_third(),
            state.left_half(),
        );
    };
    let mut tracker =
        VisibilityTracker::new(VisibilityOptions::new().with_on_change(Some(on_change)));

    // Simulate a page scrolling a card from below the fold past the top, one scroll event
    // every 4ms. The adapter ticks before delivering each event, like a timer firing first.
    let mut now_ms = 0u64;
    let mut y = 1000.0;
    while y > -300.0 {
        let sample = Sample::new(Rect::from_origin_size(200.0, y, 300.0, 200.0), viewport);
        tracker.tick(&sample, now_ms);
        tracker.trigger(&sample, now_ms);
        y -= 25.0;
        now_ms += 4;
    }

    // Let the last window close so the trailing check sees the final position.
    let last = Sample::new(Rect::from_origin_size(200.0, y, 300.0, 200.0), viewport);
    if let Some(deadline) = tracker.deadline_ms() {
        tracker.tick(&last, deadline);
    }

    println!(
        "checks={}, final visible={}",
        tracker.check_count(),
        tracker.is_visible()
    );
}
