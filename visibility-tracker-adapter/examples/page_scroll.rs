use visibility_tracker::{ComputedStyle, Rect, Viewport, VisibilityChange, VisibilityState};
use visibility_tracker_adapter::{
    Environment, EventKind, EventTarget, VisibilityAware, VisibilityController,
};

/// A single scrolling document: `body > article`, where the article is 300px tall and starts
/// `article_top` pixels below the top of the document.
struct Page {
    scroll_y: f64,
    article_top: f64,
    viewport: Viewport,
    listeners: Vec<Option<(EventTarget<u32>, EventKind)>>,
}

const BODY: u32 = 0;
const ARTICLE: u32 = 1;

impl Environment for Page {
    type Node = u32;
    type Listener = usize;

    fn has_window(&self) -> bool {
        true
    }

    fn has_document(&self) -> bool {
        true
    }

    fn parent(&self, node: &u32) -> Option<u32> {
        (*node == ARTICLE).then_some(BODY)
    }

    fn is_body(&self, node: &u32) -> bool {
        *node == BODY
    }

    fn add_listener(&mut self, target: EventTarget<u32>, kind: EventKind) -> usize {
        println!("addEventListener({:?}, {})", target, kind.as_str());
        self.listeners.push(Some((target, kind)));
        self.listeners.len() - 1
    }

    fn remove_listener(&mut self, listener: usize) {
        if let Some((target, kind)) = self.listeners[listener].take() {
            println!("removeEventListener({:?}, {})", target, kind.as_str());
        }
    }

    fn bounding_rect(&self, _node: &u32) -> Rect {
        Rect::from_origin_size(40.0, self.article_top - self.scroll_y, 600.0, 300.0)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn computed_style(&self, _node: &u32) -> ComputedStyle {
        ComputedStyle::default()
    }

    fn document_hidden(&self) -> bool {
        false
    }
}

struct Article {
    visibility: VisibilityController<Page>,
    impressions: u32,
}

impl VisibilityAware for Article {
    type Env = Page;

    fn root_node(&self) -> u32 {
        ARTICLE
    }

    fn visibility(&self) -> &VisibilityController<Page> {
        &self.visibility
    }

    fn visibility_mut(&mut self) -> &mut VisibilityController<Page> {
        &mut self.visibility
    }

    fn visibility_changed(&mut self, change: VisibilityChange, state: &VisibilityState) {
        if change.visibility && state.visible {
            self.impressions += 1;
        }
        println!(
            "visibility_changed({}, {}, {}): visible={} thirds=[{}, {}, {}]",
            change.visibility,
            change.vertical,
            change.horizontal,
            state.visible,
            state.top_third(),
            state.middle_third(),
            state.bottom_third(),
        );
    }
}

fn main() {
    let mut page = Page {
        scroll_y: 0.0,
        article_top: 1500.0,
        viewport: Viewport::new(1024.0, 768.0),
        listeners: Vec::new(),
    };
    let mut article = Article {
        visibility: VisibilityController::default(),
        impressions: 0,
    };

    let mut now_ms = 0u64;
    article.did_mount(&mut page, now_ms);

    // Scroll down 3000px in 30px steps, one scroll event every 8ms. A real adapter would arm a
    // timeout for `deadline_ms()`; here the loop polls it before each event.
    while page.scroll_y < 3000.0 {
        if article
            .visibility()
            .deadline_ms()
            .is_some_and(|deadline| deadline <= now_ms)
        {
            article.on_visibility_tick(&page, now_ms);
        }
        page.scroll_y += 30.0;
        article.on_visibility_event(&page, now_ms);
        now_ms += 8;
    }
    if let Some(deadline) = article.visibility().deadline_ms() {
        article.on_visibility_tick(&page, deadline);
    }

    println!(
        "impressions={}, checks={}",
        article.impressions,
        article.visibility().tracker().check_count()
    );
    article.will_unmount(&mut page);
}
