// Example: how a burst of scroll signals collapses into a single evaluation.
use lazyload::ScrollDebouncer;

fn main() {
    let mut debouncer = ScrollDebouncer::new(100);

    // Signals every 30ms for 300ms, then silence.
    let signals: Vec<u64> = (0..=300).step_by(30).collect();

    let mut fired = Vec::new();
    for now_ms in 0..=600u64 {
        if signals.contains(&now_ms) {
            debouncer.signal(now_ms);
        }
        if debouncer.poll(now_ms) {
            fired.push(now_ms);
        }
    }

    println!("signals={signals:?}");
    println!("evaluations={fired:?}");
    assert_eq!(fired, [400]);
}
