use lazyload::LazyLoadOptions;
use lazyload_adapter::{Controller, DocumentRect, SimulatedPage, Startup};

fn main() {
    // Example: a runtime without geometry support. Instead of leaving images unloaded, the
    // controller falls back to loading every candidate up front.
    let mut page = SimulatedPage::new(800.0, 600.0).with_geometry_support(false);
    for i in 0..5 {
        page.add_image(
            DocumentRect::new(0.0, i as f64 * 1000.0, 800.0, 300.0),
            &format!("img/{i}.png"),
        );
    }
    let candidates = page.candidates();

    let c = Controller::new_or_eager(LazyLoadOptions::new(), candidates.clone(), page)
        .expect("options are valid");
    assert_eq!(c.startup(), Startup::Eager { loaded: 5 });

    for id in candidates {
        println!("{id:?}: src={:?}", c.host().src(id));
    }
}
