use pooled_scroll::{CellLayout, CellSource, Extent, GridScroll, ObjectSource, ScrollOptions};
use pooled_scroll_adapter::{Controller, NavigatorOptions};

struct Tiles;

impl ObjectSource for Tiles {
    type Object = usize;

    fn create(&mut self) -> usize {
        0
    }

    fn bind(&mut self, index: usize, tile: &mut usize) {
        *tile = index;
    }
}

struct Rows;

impl CellSource<usize> for Rows {
    type Cell = Vec<usize>;

    fn create_cell(&mut self, layout: CellLayout) -> Vec<usize> {
        Vec::with_capacity(layout.capacity)
    }

    fn attach(&mut self, row: &mut Vec<usize>, tile: &mut usize) {
        row.push(*tile);
    }

    fn deactivate_cell(&mut self, row: &mut Vec<usize>) {
        row.clear();
    }
}

fn main() {
    // Example: page-wise "next"/"back" buttons over a grid, plus an immediate jump.
    let options = ScrollOptions::new(80.0)
        .with_spacing(8.0)
        .with_cell(80.0, 8.0)
        .with_viewport(Extent::new(360.0, 360.0));
    let mut grid = GridScroll::new(options, Tiles, Rows);
    if let Err(err) = grid.initialize(500, 0) {
        eprintln!("initialize failed: {err}");
        return;
    }
    println!(
        "tiles per row={} rows={}",
        grid.objects_in_cell(),
        grid.cell_count()
    );

    let mut c = Controller::new(grid).with_navigator(NavigatorOptions::default());
    let dt = 1.0 / 60.0;
    for step in 0..3 {
        if !c.scroll_next() {
            break;
        }
        while c.tick(dt, 0.0).is_some() {}
        println!(
            "next #{step}: rows={:?} tiles={:?}",
            c.surface().visible_range(),
            c.surface().element_range()
        );
    }

    if c.scroll_back() {
        while c.tick(dt, 0.0).is_some() {}
    }
    println!("back: rows={:?}", c.surface().visible_range());

    c.scroll_to(100, true);
    println!(
        "jump to row 100: position={} rows={:?}",
        c.surface().position(),
        c.surface().visible_range()
    );
}
