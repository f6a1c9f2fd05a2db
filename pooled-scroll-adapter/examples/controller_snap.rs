use pooled_scroll::{Extent, ListScroll, ObjectSource, ScrollOptions};
use pooled_scroll_adapter::{Controller, Easing, SnapOptions};

struct Cards;

impl ObjectSource for Cards {
    type Object = String;

    fn create(&mut self) -> String {
        String::new()
    }

    fn bind(&mut self, index: usize, card: &mut String) {
        *card = format!("card {index}");
    }
}

fn main() {
    // Example: a drag released slowly settles on the nearest card.
    //
    // An adapter would:
    // - call begin_drag / end_drag(velocity) around pointer drags
    // - call tick(dt, velocity) in a frame loop
    // - apply the returned position to the real scroll container
    let options = ScrollOptions::new(120.0)
        .with_spacing(16.0)
        .with_viewport(Extent::new(400.0, 300.0));
    let mut list = ListScroll::new(options, Cards);
    if let Err(err) = list.initialize(200, 0) {
        eprintln!("initialize failed: {err}");
        return;
    }

    let mut c = Controller::new(list)
        .with_easing(Easing::SmoothStep)
        .with_snapper(
            SnapOptions::default(),
            Some(|e| println!("snap event: {e:?}")),
        );

    // The user drags to 1000 and lets go slowly.
    c.begin_drag();
    c.on_scroll(1_000.0);
    let snapping = c.end_drag(80.0);
    println!("snapping={snapping} target={:?}", c.mover().target());

    let dt = 1.0 / 60.0;
    while let Some(position) = c.tick(dt, 0.0) {
        println!(
            "position={position:.1} visible={:?}",
            c.surface().visible_range()
        );
    }

    println!(
        "settled: position={} range={:?}",
        c.surface().position(),
        c.surface().visible_range()
    );
}
