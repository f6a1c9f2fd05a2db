// Example: a photo grid whose rows are pooled cells.
use pooled_scroll::{CellLayout, CellSource, Extent, GridScroll, ObjectSource, ScrollOptions};

struct Thumbs;

#[derive(Debug)]
struct Thumb {
    index: usize,
}

impl ObjectSource for Thumbs {
    type Object = Thumb;

    fn create(&mut self) -> Thumb {
        Thumb { index: 0 }
    }

    fn bind(&mut self, index: usize, thumb: &mut Thumb) {
        thumb.index = index;
    }
}

struct RowFactory;

#[derive(Debug)]
struct RowView {
    layout: CellLayout,
    children: Vec<usize>,
}

impl CellSource<Thumb> for RowFactory {
    type Cell = RowView;

    fn create_cell(&mut self, layout: CellLayout) -> RowView {
        RowView {
            layout,
            children: Vec::with_capacity(layout.capacity),
        }
    }

    fn attach(&mut self, cell: &mut RowView, child: &mut Thumb) {
        cell.children.push(child.index);
    }

    fn deactivate_cell(&mut self, cell: &mut RowView) {
        cell.children.clear();
    }
}

fn main() {
    let options = ScrollOptions::new(120.0)
        .with_spacing(8.0)
        .with_viewport(Extent::new(720.0, 1024.0))
        .with_cell(120.0, 8.0);

    let mut grid = GridScroll::new(options, Thumbs, RowFactory);
    if let Err(err) = grid.initialize(1_003, 0) {
        eprintln!("initialize failed: {err}");
        return;
    }
    println!(
        "objects_in_cell={} cells={} layout={:?}",
        grid.objects_in_cell(),
        grid.cell_count(),
        grid.cell_layout()
    );

    grid.set_normalized_position(0.0);
    println!("elements={:?}", grid.element_range());
    for (index, cell) in grid.cells() {
        println!("cell {index}: {:?} ({} wide)", cell.visual().children, cell.visual().layout.size.cross);
    }

    // narrower window: fewer thumbnails per row
    grid.set_viewport(Extent::new(720.0, 600.0));
    println!(
        "after resize: objects_in_cell={} elements={:?}",
        grid.objects_in_cell(),
        grid.element_range()
    );
}
