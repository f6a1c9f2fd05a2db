// Example: a 100k-row list driven by raw scroll positions.
use pooled_scroll::{Extent, ListScroll, ObjectSource, ScrollOptions};

#[derive(Default)]
struct Rows {
    created: usize,
}

struct Row {
    text: String,
}

impl ObjectSource for Rows {
    type Object = Row;

    fn create(&mut self) -> Row {
        self.created += 1;
        Row {
            text: String::new(),
        }
    }

    fn bind(&mut self, index: usize, row: &mut Row) {
        row.text = format!("row #{index}");
    }
}

fn main() {
    let options = ScrollOptions::new(24.0)
        .with_spacing(2.0)
        .with_padding(8.0, 8.0)
        .with_viewport(Extent::new(480.0, 320.0))
        .with_on_event(Some(|e| println!("event: {e:?}")));

    let mut list = ListScroll::new(options, Rows::default());
    if let Err(err) = list.initialize(100_000, 0) {
        eprintln!("initialize failed: {err}");
        return;
    }

    for position in [0.0, 13.0, 1_000.0, 1_250_000.0] {
        let changed = list.set_position(position);
        println!(
            "position={position} changed={changed} range={:?} placeholders={:?}",
            list.visible_range(),
            list.placeholders()
        );
    }

    let mut first = None;
    list.for_each_active(|index, row| {
        first.get_or_insert((index, row.text.clone()));
    });
    println!("first materialized row: {first:?}");
    println!(
        "instances created={} content_extent={}",
        list.source().created,
        list.content_extent()
    );
}
