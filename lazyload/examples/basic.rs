// Example: minimal host implementation and a session driven by hand.
use lazyload::{
    BoundingBox, CandidateId, ClientSize, Document, EventKind, EventSource, LazyLoadOptions,
    SessionSummary, create_session,
};

struct Image {
    top: f64,
    data_src: Option<String>,
    src: Option<String>,
}

struct Page {
    scroll_y: f64,
    images: Vec<Image>,
}

impl Document for Page {
    type Candidate = usize;

    fn client_size(&self) -> ClientSize {
        ClientSize::new(1280.0, 720.0)
    }

    fn bounding_box(&self, candidate: &usize) -> Option<BoundingBox> {
        let img = self.images.get(*candidate)?;
        Some(BoundingBox::new(img.top - self.scroll_y, 0.0, 400.0, 1280.0))
    }

    fn deferred_source(&self, candidate: &usize) -> Option<String> {
        self.images[*candidate].data_src.clone()
    }

    fn clear_deferred_source(&mut self, candidate: &usize) {
        self.images[*candidate].data_src = None;
    }

    fn assign_source(&mut self, candidate: &usize, source: &str) {
        println!("loading {source}");
        self.images[*candidate].src = Some(source.to_string());
    }

    fn observe_failure(&mut self, _candidate: &usize, id: CandidateId) {
        println!("watching {id} for load errors");
    }
}

impl EventSource for Page {
    type Subscription = EventKind;

    fn subscribe(&mut self, event: EventKind) -> EventKind {
        println!("subscribe {}", event.name());
        event
    }

    fn unsubscribe(&mut self, event: EventKind) {
        println!("unsubscribe {}", event.name());
    }
}

fn main() {
    let mut page = Page {
        scroll_y: 0.0,
        images: (0..6)
            .map(|i| Image {
                top: i as f64 * 900.0,
                data_src: Some(format!("https://example.com/{i}.webp")),
                src: None,
            })
            .collect(),
    };

    let options = LazyLoadOptions::new()
        .with_margin_v(100.0)
        .with_on_complete(Some(|s: &SessionSummary| println!("complete: {s:?}")));
    let mut session = create_session(options, 0..page.images.len(), &mut page)
        .expect("page reports geometry");
    println!("pending after first pass: {:?}", session.pending());

    // A user scrolling down 100px every 50ms; each burst is evaluated 100ms after it ends.
    let mut now_ms = 0u64;
    while !session.is_settled() {
        now_ms += 50;
        page.scroll_y += 100.0;
        session.handle_event(EventKind::Scroll, now_ms);
        if now_ms % 500 == 0 {
            // Pause long enough for the debounce window to elapse.
            now_ms += 100;
        }
        if let Some(eval) = session.tick(&mut page, now_ms).expect("page reports geometry") {
            println!("t={now_ms}ms loaded {:?}", eval.transitioned);
        }
    }

    let loaded = page.images.iter().filter(|img| img.src.is_some()).count();
    println!("loaded {loaded}/{} images", page.images.len());
}
