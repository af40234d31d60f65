use lazyload::LazyLoadOptions;
use lazyload_adapter::{Controller, DocumentRect, SimulatedPage};

fn main() {
    // Example: a long photo gallery scrolled by the user, driven at 60fps.
    //
    // The adapter flow is typically:
    // 1) enumerate candidates (here: the `lazyload-img` class) and start a controller
    // 2) forward scroll/resize events with a timestamp
    // 3) tick the controller from a timer/frame loop; it evaluates once each burst settles
    let mut page = SimulatedPage::new(1024.0, 768.0);
    for i in 0..20 {
        let y = i as f64 * 400.0;
        page.add_image(DocumentRect::new(0.0, y, 1024.0, 360.0), &format!("photos/{i:02}.jpg"));
    }
    let candidates = page.candidates();

    let options = LazyLoadOptions::new()
        .with_margins(0.0, 200.0)
        .with_on_complete(Some(|summary: &lazyload::SessionSummary| {
            println!("all images settled: {summary:?}");
        }));
    let mut c = Controller::new(options, candidates, page).expect("simulated page has geometry");
    println!(
        "after first pass: pending={}",
        c.session().map_or(0, |s| s.pending().len())
    );

    let mut now_ms = 0u64;
    let mut y = 0.0;
    while !c.is_settled() && now_ms < 20_000 {
        now_ms += 16;
        // Scroll in bursts: 600ms of scrolling, then 400ms of rest.
        if now_ms % 1000 < 600 {
            y += 40.0;
            c.scroll_to(0.0, y, now_ms);
        }
        if let Some(eval) = c.tick(now_ms).expect("geometry stays available") {
            println!(
                "t={now_ms}ms y={y} loaded={:?} remaining={}",
                eval.transitioned, eval.remaining
            );
        }
    }

    println!(
        "done: t={now_ms}ms settled={} listeners={}",
        c.is_settled(),
        c.host().active_listeners()
    );
}
