use crate::*;

use pooled_scroll::{
    CellLayout, CellSource, Extent, GridScroll, ListScroll, ObjectSource, ScrollOptions,
    ScrollSurface, VisibleRange,
};
use std::sync::{Arc, Mutex};

struct Labels;

impl ObjectSource for Labels {
    type Object = usize;

    fn create(&mut self) -> usize {
        0
    }

    fn bind(&mut self, index: usize, label: &mut usize) {
        *label = index;
    }
}

struct Rows;

impl CellSource<usize> for Rows {
    type Cell = Vec<usize>;

    fn create_cell(&mut self, layout: CellLayout) -> Vec<usize> {
        Vec::with_capacity(layout.capacity)
    }

    fn attach(&mut self, cell: &mut Vec<usize>, child: &mut usize) {
        cell.push(*child);
    }

    fn deactivate_cell(&mut self, cell: &mut Vec<usize>) {
        cell.clear();
    }
}

fn options() -> ScrollOptions {
    ScrollOptions::new(50.0)
        .with_spacing(10.0)
        .with_viewport(Extent::new(600.0, 330.0))
}

// offsets are 50 + 60 * i
fn list(count: usize) -> ListScroll<Labels> {
    let mut list = ListScroll::new(options(), Labels);
    list.initialize(count, 0).unwrap();
    list
}

fn run_to_rest<S: ScrollSurface>(c: &mut Controller<S>) {
    for _ in 0..1000 {
        if !c.is_animating() {
            return;
        }
        c.tick(0.1, 0.0);
    }
    panic!("move did not finish");
}

#[test]
fn easing_curves_hit_both_ends() {
    for easing in [Easing::Linear, Easing::SmoothStep, Easing::EaseInOutCubic] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
        assert!(easing.sample(0.25) <= easing.sample(0.75));
    }
}

#[test]
fn tween_samples_between_endpoints() {
    let tween = Tween::new(100.0, 300.0, 2.0, Easing::Linear);
    assert_eq!(tween.sample(0.0), 100.0);
    assert_eq!(tween.sample(1.0), 200.0);
    assert_eq!(tween.sample(5.0), 300.0);
    assert!(tween.is_done(2.0));

    let instant = Tween::new(0.0, 42.0, -1.0, Easing::SmoothStep);
    assert!(instant.is_done(0.0));
    assert_eq!(instant.sample(0.0), 42.0);
}

#[test]
fn mover_interpolates_then_lands_exactly_on_target() {
    let mut list = list(1000);
    let mut mover = Mover::new();
    mover.move_to(&list, 1000.0, 1.0, CancelToken::none());

    let mut positions = Vec::new();
    let mut status = MoveStatus::Running;
    while status == MoveStatus::Running {
        status = mover.tick(&mut list, 0.25);
        positions.push(list.axis_position());
    }
    assert_eq!(status, MoveStatus::Completed);
    assert_eq!(positions, vec![0.0, 250.0, 500.0, 750.0, 1000.0]);
    assert_eq!(mover.tick(&mut list, 0.25), MoveStatus::Idle);
    assert!(!mover.is_moving());
}

#[test]
fn zero_duration_move_completes_on_first_tick() {
    let mut list = list(1000);
    let mut mover = Mover::new();
    mover.move_to(&list, 480.0, 0.0, CancelToken::none());
    assert_eq!(mover.tick(&mut list, 0.016), MoveStatus::Completed);
    assert_eq!(list.axis_position(), 480.0);
}

#[test]
fn stopped_move_never_writes_again() {
    let mut list = list(1000);
    let mut mover = Mover::new();
    mover.move_to(&list, 1000.0, 1.0, CancelToken::none());
    mover.tick(&mut list, 0.25);
    mover.tick(&mut list, 0.25);
    mover.stop_move();

    assert_eq!(mover.tick(&mut list, 0.25), MoveStatus::Stopped);
    assert_eq!(mover.tick(&mut list, 0.25), MoveStatus::Idle);
    assert_eq!(list.axis_position(), 250.0);
}

#[test]
fn cancelled_move_never_writes_again() {
    let mut list = list(1000);
    let mut mover = Mover::new();
    let token = CancelToken::new();
    mover.move_to(&list, 1000.0, 1.0, token.clone());
    mover.tick(&mut list, 0.25);
    mover.tick(&mut list, 0.25);
    token.cancel();

    assert_eq!(mover.tick(&mut list, 0.25), MoveStatus::Cancelled);
    assert_eq!(list.axis_position(), 250.0);
    assert!(!mover.is_moving());

    // a `none` token can't be cancelled
    let none = CancelToken::none();
    none.cancel();
    assert!(!none.is_cancelled());
}

#[test]
fn last_move_wins() {
    let mut list = list(1000);
    let mut mover = Mover::new();
    mover.move_to(&list, 1000.0, 1.0, CancelToken::none());
    mover.tick(&mut list, 0.25);
    mover.tick(&mut list, 0.25);

    mover.move_to(&list, 200.0, 1.0, CancelToken::none());
    assert_eq!(mover.target(), Some(200.0));
    let mut last = list.axis_position();
    loop {
        let status = mover.tick(&mut list, 0.25);
        assert!(list.axis_position() <= last);
        last = list.axis_position();
        if status != MoveStatus::Running {
            assert_eq!(status, MoveStatus::Completed);
            break;
        }
    }
    assert_eq!(list.axis_position(), 200.0);
}

#[test]
fn navigator_steps_past_the_viewport_edges() {
    let mut list = list(1000);
    let nav = Navigator::default();
    assert_eq!(nav.options().stride, 2);
    assert_eq!(nav.next_index(&list), Some(12));
    assert_eq!(nav.back_index(&list), None);

    list.set_position(3000.0);
    assert_eq!(nav.next_index(&list), Some(62));
    assert_eq!(nav.back_index(&list), Some(48));
}

#[test]
fn navigator_is_a_no_op_at_the_bounds() {
    let mut list = list(1000);
    let mut mover = Mover::new();
    let nav = Navigator::default();

    assert!(!nav.back(&list, &mut mover, CancelToken::none()));
    assert!(!mover.is_moving());
    assert_eq!(list.visible_range(), Some(VisibleRange::new(0, 10)));

    list.set_position(list.scrollable_extent());
    let range = list.visible_range();
    assert!(!nav.next(&list, &mut mover, CancelToken::none()));
    assert!(!mover.is_moving());
    assert_eq!(list.visible_range(), range);
}

#[test]
fn navigator_works_on_grid_cells() {
    let mut grid = GridScroll::new(options().with_cell(100.0, 10.0), Labels, Rows);
    grid.initialize(100, 0).unwrap();
    assert_eq!(ScrollSurface::len(&grid), 34);
    assert_eq!(Navigator::default().next_index(&grid), Some(12));
}

#[test]
fn controller_navigates_through_the_mover() {
    let mut c = Controller::new(list(1000)).with_navigator(NavigatorOptions::default());
    assert!(c.scroll_next());
    assert!(c.is_animating());
    run_to_rest(&mut c);
    // element 12 starts at 720; centered in a 600 viewport
    assert_eq!(c.surface().axis_position(), 445.0);

    assert!(c.scroll_to(50, true));
    assert_eq!(c.surface().axis_position(), 2725.0);
    assert!(!c.is_animating());
    assert!(!c.scroll_to(5000, false));

    assert!(c.scroll_back());
    run_to_rest(&mut c);
    assert!(c.surface().axis_position() < 2725.0);
}

#[test]
fn controller_without_capabilities_is_inert() {
    let mut c = Controller::new(list(1000));
    assert!(!c.scroll_next());
    assert!(!c.scroll_back());
    assert!(!c.scroll_to(3, true));
    assert!(!c.end_drag(10.0));
    assert_eq!(c.tick(0.1, 0.0), None);
    assert_eq!(c.surface().axis_position(), 0.0);
}

#[test]
fn cancel_animation_ends_the_move() {
    let mut c = Controller::new(list(1000)).with_navigator(NavigatorOptions::default());
    c.scroll_next();
    assert!(c.tick(0.1, 0.0).is_some());
    c.cancel_animation();
    assert_eq!(c.tick(0.1, 0.0), None);
    assert!(!c.is_animating());
    assert!(!c.cancel_token().is_cancelled());
}

fn snap_options() -> SnapOptions {
    SnapOptions {
        velocity_threshold: 200.0,
        snapping_time: 1.0,
        min_offset_for_next_step: 0.0,
    }
}

type SnapEvents = Arc<Mutex<Vec<SnapEvent>>>;

fn snapping_controller(events: &SnapEvents) -> Controller<ListScroll<Labels>> {
    let events = Arc::clone(events);
    Controller::new(list(1000))
        .with_snapper(snap_options(), Some(move |e| events.lock().unwrap().push(e)))
}

#[test]
fn snap_target_leans_toward_the_velocity() {
    let mut list = list(1000);
    let snapper = Snapper::new(snap_options());

    // midpoint 1300 falls in element 21, centered at 985
    list.set_position(1000.0);
    assert_eq!(snapper.target(&list, 50.0), Some(1045.0));
    assert_eq!(snapper.target(&list, -50.0), Some(985.0));

    list.set_position(970.0);
    assert_eq!(snapper.target(&list, 50.0), Some(985.0));
    assert_eq!(snapper.target(&list, -50.0), Some(925.0));
}

#[test]
fn snapping_requires_a_slow_release() {
    let events = SnapEvents::default();
    let mut c = snapping_controller(&events);
    c.on_scroll(1000.0);

    c.begin_drag();
    assert!(!c.snap_to_nearest(50.0));
    assert!(!c.end_drag(500.0));
    assert!(!c.snap_to_nearest(0.0));
    assert!(events.lock().unwrap().is_empty());
    assert!(!c.is_animating());
}

#[test]
fn snap_settles_and_reports_both_events() {
    let events = SnapEvents::default();
    let mut c = snapping_controller(&events);
    c.on_scroll(1000.0);
    c.begin_drag();
    assert!(c.end_drag(50.0));
    assert!(c.snapper().unwrap().is_snapping());
    assert!(!c.snap_to_nearest(50.0));

    run_to_rest(&mut c);
    assert_eq!(c.surface().axis_position(), 1045.0);
    assert!(!c.snapper().unwrap().is_snapping());
    assert_eq!(
        *events.lock().unwrap(),
        vec![SnapEvent::BeforeSnapping, SnapEvent::AfterSnapping]
    );
}

#[test]
fn drag_mid_snap_stops_the_move_at_once() {
    let events = SnapEvents::default();
    let mut c = snapping_controller(&events);
    c.on_scroll(1000.0);
    c.begin_drag();
    assert!(c.end_drag(50.0));
    c.tick(0.25, 0.0);
    c.tick(0.25, 0.0);
    let position = c.surface().axis_position();
    assert!(position > 1000.0 && position < 1045.0);

    c.begin_drag();
    assert_eq!(
        *events.lock().unwrap(),
        vec![SnapEvent::BeforeSnapping, SnapEvent::AfterSnapping]
    );
    assert_eq!(c.tick(0.25, 0.0), None);
    assert_eq!(c.tick(0.25, 0.0), None);
    assert_eq!(c.surface().axis_position(), position);
    assert_eq!(events.lock().unwrap().len(), 2);
}

#[test]
fn coasting_below_the_threshold_snaps() {
    let events = SnapEvents::default();
    let mut c = snapping_controller(&events);
    c.on_scroll(1000.0);
    c.begin_drag();
    assert!(!c.end_drag(800.0));

    // host inertia, still too fast to snap
    for (position, velocity) in [(1000.0, 600.0), (1005.0, 400.0)] {
        c.on_scroll(position);
        assert_eq!(c.tick(0.016, velocity), None);
        assert!(!c.is_animating());
    }
    assert!(events.lock().unwrap().is_empty());

    c.on_scroll(1010.0);
    assert_eq!(c.tick(0.016, 150.0), Some(1010.0));
    assert!(c.snapper().unwrap().is_snapping());
    assert_eq!(c.mover().target(), Some(1045.0));
    assert_eq!(*events.lock().unwrap(), vec![SnapEvent::BeforeSnapping]);

    for velocity in [80.0, 30.0] {
        assert!(c.tick(0.016, velocity).is_some());
    }
    assert_eq!(c.mover().target(), Some(1045.0));
    run_to_rest(&mut c);
    assert_eq!(c.surface().axis_position(), 1045.0);
    assert_eq!(
        *events.lock().unwrap(),
        vec![SnapEvent::BeforeSnapping, SnapEvent::AfterSnapping]
    );
    assert_eq!(c.tick(0.016, 0.0), None);
}
