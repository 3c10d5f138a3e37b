use super::*;

fn markup(slides: usize) -> CarouselMarkup {
    CarouselMarkup {
        slides,
        indicators: slides,
        prev_button: true,
        next_button: true,
        container: true,
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn carousel(slides: usize, scheduler: &mut Scheduler) -> Carousel {
    Carousel::init(Some(&markup(slides)), ms(5000), scheduler).expect("carousel")
}

#[test]
fn missing_or_empty_carousel_is_unavailable() {
    let mut scheduler = Scheduler::new();
    assert!(Carousel::init(None, ms(5000), &mut scheduler).is_err());
    assert!(Carousel::init(Some(&markup(0)), ms(5000), &mut scheduler).is_err());
    assert!(scheduler.next_due().is_none());
}

#[test]
fn init_shows_first_slide_and_arms_autoplay() {
    let mut scheduler = Scheduler::new();
    let carousel = carousel(3, &mut scheduler);

    assert_eq!(carousel.current(), 0);
    assert!(carousel.is_slide_active(0));
    assert!(carousel.is_indicator_active(0));
    assert!(!carousel.is_slide_active(1));
    assert_eq!(scheduler.next_due(), Some(ms(5000)));
}

#[test]
fn next_n_times_is_a_full_cycle() {
    for slides in 1..=8 {
        let mut scheduler = Scheduler::new();
        let mut carousel = carousel(slides, &mut scheduler);
        for _ in 0..slides {
            carousel.next(&mut scheduler);
        }
        assert_eq!(carousel.current(), 0, "cycle of {slides} slides");
    }
}

#[test]
fn prev_undoes_next_from_any_start() {
    for start in 0..4 {
        let mut scheduler = Scheduler::new();
        let mut carousel = carousel(4, &mut scheduler);
        carousel.go_to(start, &mut scheduler);
        carousel.next(&mut scheduler);
        carousel.prev(&mut scheduler);
        assert_eq!(carousel.current(), start);
    }
}

#[test]
fn prev_wraps_from_first_to_last() {
    let mut scheduler = Scheduler::new();
    let mut carousel = carousel(3, &mut scheduler);
    carousel.prev(&mut scheduler);
    assert_eq!(carousel.current(), 2);
    assert!(carousel.is_indicator_active(2));
}

#[test]
fn manual_navigation_grants_a_fresh_interval() {
    let mut scheduler = Scheduler::new();
    let mut carousel = carousel(3, &mut scheduler);

    scheduler.settle(ms(4900));
    carousel.on_next_click(&mut scheduler);

    assert_eq!(scheduler.live_count(TimerTask::CarouselAdvance), 1);
    assert_eq!(scheduler.next_due(), Some(ms(9900)));
}

#[test]
fn hover_pauses_and_leave_restarts_autoplay() {
    let mut scheduler = Scheduler::new();
    let mut carousel = carousel(3, &mut scheduler);

    carousel.on_pointer_enter(&mut scheduler);
    assert!(carousel.autoplay_timer().is_none());
    assert!(scheduler.next_due().is_none());

    scheduler.settle(ms(12_000));
    carousel.on_pointer_leave(&mut scheduler);
    assert_eq!(scheduler.next_due(), Some(ms(17_000)));

    carousel.on_pointer_leave(&mut scheduler);
    assert_eq!(scheduler.live_count(TimerTask::CarouselAdvance), 1);
}

#[test]
fn missing_buttons_and_container_leave_clicks_unwired() {
    let mut scheduler = Scheduler::new();
    let bare = CarouselMarkup {
        slides: 2,
        indicators: 2,
        ..CarouselMarkup::default()
    };
    let mut carousel = Carousel::init(Some(&bare), ms(5000), &mut scheduler).expect("carousel");

    carousel.on_next_click(&mut scheduler);
    carousel.on_prev_click(&mut scheduler);
    carousel.on_pointer_enter(&mut scheduler);

    assert_eq!(carousel.current(), 0);
    assert!(carousel.autoplay_timer().is_some());
}

#[test]
fn indicator_out_of_range_is_ignored() {
    let mut scheduler = Scheduler::new();
    let mut carousel = carousel(3, &mut scheduler);
    carousel.on_indicator_click(7, &mut scheduler);
    assert_eq!(carousel.current(), 0);
    carousel.on_indicator_click(2, &mut scheduler);
    assert_eq!(carousel.current(), 2);
}
