use std::time::{Duration, Instant};

use floem_led::{GlassStyle, LedConfig, LedState, LightColor, SavedState};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn red_led() -> LedState {
    LedState::new(
        LedConfig::default()
            .with_color(LightColor::RED)
            .with_glass(GlassStyle::Gradient),
    )
}

/// Tick until the animation settles, returning the time it settled at.
fn settle(state: &mut LedState, mut now: Instant) -> Instant {
    for _ in 0..1000 {
        if !state.is_animating() {
            break;
        }
        now += ms(16);
        state.tick(now).unwrap();
    }
    assert!(!state.is_animating());
    now
}

#[test]
fn fixed_size_lays_out_once() {
    let mut led = red_led();
    assert!(led.resize(100.0, 100.0, 1.0).unwrap());
    for _ in 0..5 {
        assert!(!led.resize(100.0, 100.0, 1.0).unwrap());
    }
    assert_eq!(led.background().generation(), 1);
}

#[test]
fn double_toggle_returns_to_the_start() {
    let t0 = Instant::now();
    let mut led = red_led();
    led.resize(100.0, 100.0, 1.0).unwrap();
    led.toggle(t0).unwrap();
    led.toggle(t0).unwrap();
    assert!(!led.is_checked());
    settle(&mut led, t0);
    assert_eq!(led.light_intensity(), 0.0);
}

#[test]
fn quick_on_off_settles_dark_without_relayout() {
    let t0 = Instant::now();
    let mut led = red_led();
    led.resize(100.0, 100.0, 1.0).unwrap();

    led.set_checked(true, t0).unwrap();
    led.tick(t0 + ms(40)).unwrap();
    let partway = led.light_intensity();
    assert!(partway > 0.0 && partway < 1.0);

    led.set_checked(false, t0 + ms(60)).unwrap();
    assert!(!led.is_checked());
    assert_eq!(led.animation_target(), Some(0.0));

    settle(&mut led, t0 + ms(60));
    assert_eq!(led.light_intensity(), 0.0);
    assert_eq!(led.background().generation(), 1);
}

#[test]
fn dark_and_lit_glow_cores() {
    let mut led = red_led();
    assert_eq!(led.glow_stops()[0].alpha, 0);
    led.set_light_intensity(1.0);
    let core = led.glow_stops()[0];
    assert_eq!(core.alpha, 255);
    assert_eq!(core.color, LightColor::RED);
}

#[test]
fn repeated_intensity_is_stable() {
    let mut led = red_led();
    led.set_light_intensity(0.42);
    let first = *led.glow_stops();
    led.set_light_intensity(0.42);
    assert_eq!(*led.glow_stops(), first);
}

#[test]
fn saved_state_survives_recreation() {
    let t0 = Instant::now();
    let mut led = red_led();
    led.resize(64.0, 64.0, 1.0).unwrap();
    led.set_checked(true, t0).unwrap();
    let saved = led.detach(t0 + ms(30));
    assert_eq!(saved, SavedState { checked: true });

    let text = toml::to_string(&saved).unwrap();
    let restored: SavedState = toml::from_str(&text).unwrap();

    let mut again = red_led();
    again.resize(64.0, 64.0, 1.0).unwrap();
    again.restore_state(restored, t0).unwrap();
    assert!(again.is_animating());
    assert_eq!(again.light_intensity(), 0.0);
    settle(&mut again, t0);
    assert_eq!(again.light_intensity(), 1.0);
    assert!(again.is_checked());
}

#[test]
fn many_resizes_keep_a_single_background() {
    let mut led = red_led();
    for side in [40.0, 80.0, 120.0, 80.0] {
        assert!(led.resize(side, side, 1.0).unwrap());
        let (img, _) = led.background().image().unwrap();
        assert_eq!(img.width, side as u32);
    }
    assert_eq!(led.background().generation(), 4);
}

#[test]
fn configured_duration_sets_the_sweep_length() {
    let t0 = Instant::now();
    let mut led = LedState::new(
        LedConfig::default()
            .with_glass(GlassStyle::Gradient)
            .with_animation_ms(100),
    );
    assert_eq!(led.config().animation_ms, 100);
    led.set_checked(true, t0).unwrap();
    assert!(led.tick(t0 + ms(60)).unwrap());
    assert!(!led.tick(t0 + ms(100)).unwrap());
    assert_eq!(led.light_intensity(), 1.0);
}

#[test]
fn glass_never_darkens_a_lit_led() {
    let mut led = red_led();
    led.resize(64.0, 64.0, 1.0).unwrap();
    led.set_light_intensity(1.0);
    assert!(led.refresh_light().unwrap());
    let (img, _) = led.light_image().unwrap();
    let pixels = img.data.data();
    let mid = (30 * img.width as usize + 30) * 4;
    assert_eq!(&pixels[mid..mid + 4], &[255, 0, 0, 255]);
}
