use crate::*;

use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use lazyload::{
    CandidateId, EventKind, FailureReason, LazyLoadOptions, SessionState, SessionSummary,
};

fn gallery(count: usize, spacing: f64) -> SimulatedPage {
    let mut page = SimulatedPage::new(800.0, 600.0);
    for i in 0..count {
        page.add_image(
            DocumentRect::new(0.0, i as f64 * spacing, 800.0, 300.0),
            &format!("img/{i}.jpg"),
        );
    }
    page
}

#[test]
fn candidates_follow_class_convention_in_document_order() {
    let mut page = SimulatedPage::new(800.0, 600.0);
    let a = page.add_image(DocumentRect::new(0.0, 0.0, 10.0, 10.0), "a.jpg");
    let _plain = page.add_element(
        PageElement::new(DocumentRect::new(0.0, 20.0, 10.0, 10.0))
            .with_attribute(DEFERRED_SOURCE_ATTR, "not-a-candidate.jpg"),
    );
    let b = page.add_element(
        PageElement::new(DocumentRect::new(0.0, 40.0, 10.0, 10.0))
            .with_class("hero")
            .with_class(CANDIDATE_CLASS)
            .with_attribute(DEFERRED_SOURCE_ATTR, "b.jpg"),
    );
    assert_eq!(page.candidates(), [a, b]);
    assert_eq!(page.attribute(b, DEFERRED_SOURCE_ATTR), Some("b.jpg"));
}

#[test]
fn simulated_page_reports_viewport_relative_geometry() {
    let mut page = SimulatedPage::new(800.0, 600.0);
    let id = page.add_image(DocumentRect::new(30.0, 1000.0, 200.0, 100.0), "x.jpg");
    page.scroll_to(10.0, 700.0);

    let rect = lazyload::Document::bounding_box(&page, &id).unwrap();
    assert_eq!(rect, lazyload::BoundingBox::new(300.0, 20.0, 100.0, 200.0));
    assert!(lazyload::is_in_viewport(&page, &id, CandidateId(0), Default::default()).unwrap());

    let page = page.with_geometry_support(false);
    assert_eq!(lazyload::Document::bounding_box(&page, &id), None);
}

#[test]
fn controller_loads_visible_images_and_listens_for_the_rest() {
    let page = gallery(4, 1000.0);
    let candidates = page.candidates();
    let c = Controller::new(LazyLoadOptions::new(), candidates.clone(), page).unwrap();

    assert_eq!(c.startup(), Startup::Lazy);
    assert_eq!(c.state(), SessionState::Active);
    assert_eq!(c.host().src(candidates[0]), Some("img/0.jpg"));
    assert_eq!(c.host().attribute(candidates[0], DEFERRED_SOURCE_ATTR), None);
    for &id in &candidates[1..] {
        assert!(!c.host().is_loaded(id));
        assert!(c.host().attribute(id, DEFERRED_SOURCE_ATTR).is_some());
    }
    assert!(c.host().has_listener(EventKind::Scroll));
    assert!(c.host().has_listener(EventKind::Resize));
    assert_eq!(c.host().active_listeners(), 2);
}

#[test]
fn scrolling_through_the_page_settles_and_releases_listeners() {
    let completed = Arc::new(AtomicUsize::new(0));
    let completed2 = Arc::clone(&completed);
    let options = LazyLoadOptions::new().with_on_complete(Some(move |s: &SessionSummary| {
        assert_eq!(s.total, 4);
        completed2.fetch_add(1, Ordering::SeqCst);
    }));

    let page = gallery(4, 1000.0);
    let candidates = page.candidates();
    let mut c = Controller::new(options, candidates.clone(), page).unwrap();

    // Scroll past images 1 and 2 quickly: only the final position is evaluated.
    assert!(c.scroll_to(0.0, 900.0, 0));
    assert!(c.scroll_to(0.0, 1900.0, 30));
    assert_eq!(c.next_deadline(), Some(130));
    assert_eq!(c.tick(129).unwrap(), None);
    let eval = c.tick(130).unwrap().unwrap();
    assert_eq!(eval.transitioned, [CandidateId(2)]);
    assert!(!c.host().is_loaded(candidates[1]));

    assert!(c.scroll_to(0.0, 2900.0, 500));
    c.tick(600).unwrap();
    assert!(c.host().is_loaded(candidates[3]));
    assert_eq!(c.session().unwrap().pending(), [CandidateId(1)]);

    // A resize that brings candidate 1 back into view.
    c.host_mut().scroll_to(0.0, 800.0);
    assert!(c.resize(800.0, 600.0, 700));
    c.tick(800).unwrap();
    assert!(c.is_settled());
    assert_eq!(completed.load(Ordering::SeqCst), 1);
    assert_eq!(c.host().active_listeners(), 0);

    // Events after teardown are not delivered at all.
    assert!(!c.scroll_to(0.0, 0.0, 900));
    assert!(!c.resize(100.0, 100.0, 900));
    assert_eq!(c.tick(10_000).unwrap(), None);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[test]
fn resource_failures_are_reported_back_to_the_session() {
    let mut page = gallery(2, 1000.0);
    let broken = page.add_image(DocumentRect::new(0.0, 100.0, 50.0, 50.0), "img/0.jpg");
    let candidates = page.candidates();
    let mut c = Controller::new(LazyLoadOptions::new(), candidates, page).unwrap();
    assert!(c.host().is_loaded(broken));
    assert!(!c.host().is_failed(broken));

    // Both elements showing img/0.jpg fail.
    assert_eq!(c.fail_resource("img/0.jpg"), 2);
    assert!(c.host().is_failed(broken));
    assert!(c.host().is_failed(ElementId(0)));
    assert!(!c.host().is_failed(ElementId(1)));
    let session = c.session().unwrap();
    let failed: Vec<_> = session.failed().iter().map(|f| (f.id, f.reason)).collect();
    assert_eq!(
        failed,
        [
            (CandidateId(0), FailureReason::LoadError),
            (CandidateId(2), FailureReason::LoadError),
        ]
    );
    assert_eq!(session.pending(), [CandidateId(1)]);

    // Reporting again is a no-op.
    assert_eq!(c.fail_resource("img/0.jpg"), 0);

    c.scroll_to(0.0, 1000.0, 0);
    c.tick(100).unwrap();
    assert!(c.is_settled());
    assert_eq!(c.session().unwrap().summary().failed, 2);
}

#[test]
fn missing_geometry_falls_back_to_eager_loading() {
    let page = gallery(3, 1000.0).with_geometry_support(false);
    let candidates = page.candidates();

    let err = Controller::new(LazyLoadOptions::new(), candidates.clone(), page.clone())
        .unwrap_err();
    assert!(err.is_capability());

    let mut c =
        Controller::new_or_eager(LazyLoadOptions::new(), candidates.clone(), page).unwrap();
    assert_eq!(c.startup(), Startup::Eager { loaded: 3 });
    assert!(c.is_settled());
    assert!(c.session().is_none());
    for &id in &candidates {
        assert!(c.host().is_loaded(id));
        assert_eq!(c.host().attribute(id, DEFERRED_SOURCE_ATTR), None);
    }
    assert_eq!(c.host().active_listeners(), 0);
    assert!(!c.on_scroll(0));
    assert_eq!(c.tick(1000).unwrap(), None);
}

#[test]
fn eager_fallback_runs_on_complete_once() {
    let mut page = gallery(3, 1000.0).with_geometry_support(false);
    page.add_element(
        PageElement::new(DocumentRect::new(0.0, 0.0, 10.0, 10.0)).with_class(CANDIDATE_CLASS),
    );
    let candidates = page.candidates();

    let calls = Arc::new(AtomicUsize::new(0));
    let calls2 = Arc::clone(&calls);
    let options = LazyLoadOptions::new().with_on_complete(Some(move |s: &SessionSummary| {
        assert_eq!(
            *s,
            SessionSummary {
                total: 4,
                transitioned: 3,
                failed: 1,
            }
        );
        calls2.fetch_add(1, Ordering::SeqCst);
    }));

    let mut c = Controller::new_or_eager(options, candidates, page).unwrap();
    assert_eq!(c.startup(), Startup::Eager { loaded: 3 });
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    c.on_scroll(0);
    c.tick(1000).unwrap();
    c.evaluate().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_element_settles_without_eager_fallback() {
    let page = gallery(1, 1000.0);
    let real = page.candidates()[0];
    let c = Controller::new_or_eager(LazyLoadOptions::new(), [real, ElementId(99)], page).unwrap();

    assert_eq!(c.startup(), Startup::Lazy);
    assert!(c.is_settled());
    let session = c.session().unwrap();
    assert_eq!(session.summary().transitioned, 1);
    let failed: Vec<_> = session.failed().iter().map(|f| (f.id, f.reason)).collect();
    assert_eq!(failed, [(CandidateId(1), FailureReason::MissingSource)]);
}

#[test]
fn eager_fallback_still_reports_configuration_errors() {
    let page = gallery(1, 1000.0).with_geometry_support(false);
    let candidates = page.candidates();
    let err = Controller::new_or_eager(
        LazyLoadOptions::new().with_margin_h(-5.0),
        candidates,
        page,
    )
    .unwrap_err();
    assert!(matches!(err, lazyload::LazyLoadError::Configuration(_)));
}

#[test]
fn load_all_eagerly_skips_candidates_without_placeholder() {
    let mut page = SimulatedPage::new(800.0, 600.0);
    let a = page.add_image(DocumentRect::new(0.0, 5000.0, 10.0, 10.0), "a.jpg");
    let b = page.add_element(PageElement::new(DocumentRect::new(0.0, 0.0, 10.0, 10.0)));
    assert_eq!(load_all_eagerly(&mut page, [a, b]), 1);
    assert_eq!(page.src(a), Some("a.jpg"));
    assert_eq!(page.src(b), None);
}

#[test]
fn example_gallery_scroll_smoke() {
    let mut page = SimulatedPage::new(1024.0, 768.0);
    for i in 0..20 {
        let y = i as f64 * 400.0;
        page.add_image(
            DocumentRect::new(0.0, y, 1024.0, 360.0),
            &format!("photos/{i:02}.jpg"),
        );
    }
    let candidates = page.candidates();
    let options = LazyLoadOptions::new().with_margins(0.0, 200.0);
    let mut c = Controller::new(options, candidates.clone(), page).unwrap();
    assert_eq!(c.session().unwrap().pending().len(), 17);

    let mut now_ms = 0u64;
    let mut y = 0.0;
    let mut evaluations = 0;
    while !c.is_settled() && now_ms < 20_000 {
        now_ms += 16;
        if now_ms % 1000 < 600 {
            y += 40.0;
            c.scroll_to(0.0, y, now_ms);
        }
        if c.tick(now_ms).unwrap().is_some() {
            evaluations += 1;
        }
    }

    assert!(c.is_settled());
    assert!(evaluations >= 1);
    assert!(candidates.iter().all(|&id| c.host().is_loaded(id)));
    assert_eq!(c.host().active_listeners(), 0);
}
