//! Integration tests for LifeClockDriver

mod common;
use common::*;

use core::time::Duration;
use life_clock::{
    DEFAULT_TICK_INTERVAL, DeadlineInput, DriverError, DriverOptions, DriverState, Easing,
    EntranceAnimation, LifeClock, LifeClockDriver, ServiceTiming, TimeInterval, Timestamp,
};

/// A 100-year lifespan from 2000-01-01.
fn century() -> LifeClock {
    LifeClock::new(
        TimeInterval::resolve(ymd(2000, 1, 1), DeadlineInput::Age { years: 100 }).unwrap(),
    )
}

/// A one-day lifespan, so one synthetic hour is one real hour.
fn one_day() -> LifeClock {
    LifeClock::new(
        TimeInterval::new(
            Timestamp::from_date(ymd(2000, 1, 1)),
            Timestamp::from_date(ymd(2000, 1, 2)),
        )
        .unwrap(),
    )
}

#[test]
fn mount_renders_immediately() {
    let timer = MockTimeSource::at_date(ymd(2050, 1, 1));
    let mut driver = LifeClockDriver::new(MockDisplay::new(), &timer, century());

    assert_eq!(driver.display().render_count(), 0);
    let timing = driver.mount().unwrap();

    assert_eq!(timing, ServiceTiming::Delay(DEFAULT_TICK_INTERVAL));
    assert_eq!(driver.state(), DriverState::Running);
    assert_eq!(driver.display().last_line().as_deref(), Some("12:00"));
}

#[test]
fn tick_requires_mount() {
    let timer = MockTimeSource::at_date(ymd(2050, 1, 1));
    let mut driver = LifeClockDriver::new(MockDisplay::new(), &timer, century());

    let result = driver.tick();
    assert!(matches!(
        result,
        Err(DriverError::InvalidState {
            actual: DriverState::Unmounted,
            ..
        })
    ));
    assert_eq!(driver.display().render_count(), 0);
}

#[test]
fn separator_blinks_every_tick() {
    let timer = MockTimeSource::at_date(ymd(2050, 1, 1));
    let mut driver = LifeClockDriver::new(MockDisplay::new(), &timer, century());

    driver.mount().unwrap();
    for _ in 0..3 {
        timer.advance(1000);
        driver.tick().unwrap();
    }

    assert_eq!(driver.display().lines(), ["12:00", "12 00", "12:00", "12 00"]);
}

#[test]
fn clock_follows_wall_time() {
    let timer = MockTimeSource::at_date(ymd(2000, 1, 1));
    let mut driver = LifeClockDriver::new(MockDisplay::new(), &timer, one_day());

    driver.mount().unwrap();
    assert_eq!(driver.display().last_line().as_deref(), Some("00:00"));

    // 13h 45m into the one-day lifespan.
    timer.advance((13 * 60 + 45) * 60_000);
    driver.tick().unwrap();
    assert_eq!(driver.display().last_line().as_deref(), Some("13 45"));
}

#[test]
fn unmount_stops_rendering() {
    let timer = MockTimeSource::at_date(ymd(2050, 1, 1));
    let mut driver = LifeClockDriver::new(MockDisplay::new(), &timer, century());

    driver.mount().unwrap();
    driver.unmount();
    assert!(!driver.is_mounted());

    timer.advance(1000);
    assert!(driver.tick().is_err());
    assert_eq!(driver.display().render_count(), 1);

    // Can be mounted again and renders straight away.
    driver.mount().unwrap();
    assert_eq!(driver.display().render_count(), 2);
}

#[test]
fn update_clock_rerenders_with_new_inputs() {
    let timer = MockTimeSource::at_date(ymd(2050, 1, 1));
    let mut driver = LifeClockDriver::new(MockDisplay::new(), &timer, century());

    driver.mount().unwrap();
    let quarter = LifeClock::new(
        TimeInterval::resolve(ymd(2000, 1, 1), DeadlineInput::Date { end: ymd(2200, 1, 1) })
            .unwrap(),
    );
    let timing = driver.update_clock(quarter);

    assert_eq!(timing, Some(ServiceTiming::Delay(DEFAULT_TICK_INTERVAL)));
    assert_eq!(driver.display().render_count(), 2);
    assert_eq!(driver.display().last_line().as_deref(), Some("06:00"));
}

#[test]
fn update_clock_while_unmounted_does_not_render() {
    let timer = MockTimeSource::at_date(ymd(2050, 1, 1));
    let mut driver = LifeClockDriver::new(MockDisplay::new(), &timer, century());

    assert_eq!(driver.update_clock(one_day()), None);
    assert_eq!(driver.display().render_count(), 0);
}

#[test]
fn seconds_and_age_are_optional() {
    let timer = MockTimeSource::at_date(ymd(2050, 1, 1));
    let options = DriverOptions {
        show_seconds: true,
        show_age: true,
        ..DriverOptions::default()
    };
    let clock = century().with_mean_end_age(100);
    let mut driver = LifeClockDriver::with_options(MockDisplay::new(), &timer, clock, options);

    driver.mount().unwrap();
    let face = driver.face().unwrap();
    assert_eq!(face.hours.as_str(), "12");
    assert!(face.seconds.is_some());
    assert_eq!(face.age, Some(50));
}

#[test]
fn age_needs_a_mean_lifespan() {
    let timer = MockTimeSource::at_date(ymd(2050, 1, 1));
    let options = DriverOptions {
        show_age: true,
        ..DriverOptions::default()
    };
    let mut driver = LifeClockDriver::with_options(MockDisplay::new(), &timer, century(), options);

    driver.mount().unwrap();
    assert_eq!(driver.face().unwrap().age, None);
}

#[test]
fn entrance_animation_climbs_from_midnight() {
    let timer = MockTimeSource::at_date(ymd(2050, 1, 1));
    let options = DriverOptions {
        animation: Some(EntranceAnimation::new(
            Duration::from_millis(1000),
            Easing::Linear,
        )),
        ..DriverOptions::default()
    };
    let mut driver = LifeClockDriver::with_options(MockDisplay::new(), &timer, century(), options);

    assert_eq!(driver.mount().unwrap(), ServiceTiming::Continuous);
    assert_eq!(driver.state(), DriverState::Animating);
    assert_eq!(driver.display().last_line().as_deref(), Some("00:00"));

    timer.advance(500);
    assert_eq!(driver.tick().unwrap(), ServiceTiming::Continuous);
    assert_eq!(driver.display().last_line().as_deref(), Some("06:00"));

    // Separator stays lit while animating.
    timer.advance(500);
    driver.tick().unwrap();
    assert_eq!(driver.display().last_line().as_deref(), Some("12:00"));

    timer.advance(1);
    assert_eq!(
        driver.tick().unwrap(),
        ServiceTiming::Delay(DEFAULT_TICK_INTERVAL)
    );
    assert_eq!(driver.state(), DriverState::Running);
}

#[test]
fn custom_tick_interval_is_reported() {
    let timer = MockTimeSource::at_date(ymd(2050, 1, 1));
    let options = DriverOptions {
        tick_interval: Duration::from_millis(250),
        ..DriverOptions::default()
    };
    let mut driver = LifeClockDriver::with_options(MockDisplay::new(), &timer, century(), options);

    assert_eq!(
        driver.mount().unwrap(),
        ServiceTiming::Delay(Duration::from_millis(250))
    );
}
