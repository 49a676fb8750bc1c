//! Standalone demo: a row of LEDs and a button that toggles them all.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_led::{led_light, LedConfig, LightColor};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let colors = [
        LightColor::RED,
        LightColor::GREEN,
        LightColor::BLUE,
        LightColor::YELLOW,
        LightColor::from_rgb8(0xff, 0x80, 0x00),
        LightColor::from_rgb8(0x00, 0xff, 0xff),
        LightColor::WHITE,
    ];

    floem::Application::new()
        .window(
            move |_| {
                let leds: Vec<_> = colors
                    .iter()
                    .enumerate()
                    .map(|(i, color)| {
                        // Every second LED starts lit.
                        led_light(
                            RwSignal::new(i % 2 == 1),
                            LedConfig::default().with_color(*color),
                        )
                        .style(|s| s.width(64.0).height(64.0))
                    })
                    .collect();
                let handles: Vec<_> = leds.iter().map(|led| led.handle()).collect();

                v_stack((
                    h_stack_from_iter(leds).style(|s| s.gap(4.0)),
                    button("Toggle").on_click_stop(move |_| {
                        for handle in &handles {
                            handle.toggle();
                        }
                    }),
                ))
                .style(|s| {
                    s.size_full()
                        .items_center()
                        .justify_center()
                        .gap(16.0)
                        .background(Color::rgb8(32, 32, 32))
                })
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((520.0, 200.0))
                    .title("floem-led"),
            ),
        )
        .run();
}
