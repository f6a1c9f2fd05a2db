// Example: onboarding pages with host-driven transitions.
use pooled_scroll::{ObjectSource, ScreenCallbacks, ScreenScroll, ScreenStep, Transition};

struct Pages;

struct Page {
    title: String,
}

impl ObjectSource for Pages {
    type Object = Page;

    fn create(&mut self) -> Page {
        Page {
            title: String::new(),
        }
    }

    fn bind(&mut self, index: usize, page: &mut Page) {
        page.title = format!("page {}", index + 1);
    }
}

struct Slide;

impl ScreenCallbacks<Page> for Slide {
    fn on_open(&mut self, active: &mut Page) {
        println!("open {}", active.title);
    }

    fn on_move(&mut self, to_next: bool, active: &mut Page, next: &mut Page) -> Transition {
        let dir = if to_next { "->" } else { "<-" };
        println!("slide {} {dir} {}", active.title, next.title);
        Transition::Running
    }

    fn on_cant_move(&mut self, to_next: bool, active: &mut Page) {
        println!("bounce on {} (to_next={to_next})", active.title);
    }
}

fn main() {
    let mut pages = ScreenScroll::new(Pages, Some(Slide)).with_max_pool_size(Some(2));
    if let Err(err) = pages.initialize(3, 0) {
        eprintln!("initialize failed: {err}");
        return;
    }
    pages.show();

    for _ in 0..4 {
        match pages.scroll_next() {
            ScreenStep::Pending => {
                // the host would run its animation here
                assert_eq!(pages.scroll_next(), ScreenStep::Busy);
                pages.finish_transition();
            }
            step => println!("step: {step:?}"),
        }
        println!("current page: {}", pages.current_start_index() + 1);
    }
    pages.dispose();
}
