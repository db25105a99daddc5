use std::time::Duration;

use clap::Parser;
use tracing::info;

use overlay_menu::app::{self, AppState, HELP};
use overlay_menu::input_system::poll_events;
use overlay_menu::{AppConfig, Args, EventRouter, MenuInput, Surface, logging};

fn main() -> Result<(), String> {
    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_args(&args);
    logging::init(&config.log_level);

    for line in HELP {
        println!("{line}");
    }

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window = video_subsystem
        .window(&config.window.title, config.window.width, config.window.height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas
        .set_logical_size(config.window.width, config.window.height)
        .map_err(|e| e.to_string())?;

    let mut event_pump = sdl_context.event_pump()?;

    let mut controller = app::build_menus(&config)?;
    let mut router = EventRouter::new().with_key_repeat(config.key_repeat);
    let mut state = AppState::new();

    let frame_time = config.frame_time();
    info!(fps = config.fps, "starting main loop");

    'running: loop {
        if !controller.pauses_host() {
            state.timer.tick(frame_time);
        }
        canvas.fill(state.background)?;

        let inputs = router.route_all(poll_events(&mut event_pump));
        let outcome = controller.handle_batch(inputs, &mut state);
        if outcome.exit || outcome.passed_through.contains(&MenuInput::Quit) {
            break 'running;
        }
        // Escape while the overlay is hidden shows it again
        if outcome.passed_through.contains(&MenuInput::Close) {
            controller.enable();
        }

        app::render_clock(&mut canvas, &state)?;
        controller.render(&mut canvas)?;
        canvas.present();

        std::thread::sleep(Duration::from_secs_f64(frame_time));
    }

    info!("bye");
    Ok(())
}
