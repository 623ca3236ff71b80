use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use raycaster::{
    Config, GameState, LoopState, Renderer, World,
    consts::CONFIG_PATH,
    input::Keyboard,
    text::Readout,
    timing::{Clock, SystemClock},
};

#[derive(Parser)]
#[command(name = "raycaster", about = "First-person raycaster over a tile grid")]
struct Cli {
    /// TOML map file; the built-in map is used when absent
    #[arg(short, long)]
    map: Option<String>,

    /// Settings file
    #[arg(short, long, default_value = CONFIG_PATH)]
    config: String,

    /// Draw frame rate and position over the view
    #[arg(short, long)]
    readout: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_world(cli: &Cli, config: &Config) -> Result<World> {
    match cli.map.as_deref().or(config.map.as_deref()) {
        Some(path) => Ok(World::parse_from_file(path)?),
        None => {
            info!("using built-in map");
            Ok(World::default())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = Config::load(&cli.config)?;
    let render = config.render_params()?;
    let movement = config.movement_params()?;
    let world = load_world(&cli, &config)?;

    // Refuses to start inside a wall before any window exists.
    let mut game = GameState::spawn(world, render, movement)?;
    info!(
        x = game.player.x,
        y = game.player.y,
        angle = game.player.angle,
        "player spawned"
    );

    let readout = if cli.readout || config.readout.unwrap_or(false) {
        match Readout::load(config.font_path()) {
            Ok(readout) => Some(readout),
            Err(e) => {
                warn!("on-screen readout disabled: {e}");
                None
            }
        }
    } else {
        None
    };

    let event_loop = EventLoop::new()?;
    let mut input = WinitInputHelper::new();
    let window = Arc::new({
        let size = LogicalSize::new(render.width as f64, render.height as f64);
        WindowBuilder::new()
            .with_title("Raycaster")
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?
    });

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &*window);
        Pixels::new(render.width as u32, render.height as u32, surface_texture)?
    };

    let window_clone = window.clone();
    let mut renderer = Renderer::new(render.width, render.height);
    let mut clock = SystemClock::new();
    // The first tick should not see the time spent opening the window.
    clock.elapsed_secs();
    let mut shown_fps = 0.0;

    Ok(event_loop.run(move |event, elwt| {
        if let Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } = &event
        {
            renderer.draw_to_buffer(pixels.frame_mut());
            if let Some(readout) = &readout {
                readout.draw(
                    pixels.frame_mut(),
                    render.width,
                    render.height,
                    game.fps.fps(),
                    &game.player,
                );
            }

            if let Err(err) = pixels.render() {
                error!("pixels.render() failed: {}", err);
                elwt.exit();
                return;
            }
        }

        if input.update(&event) {
            if let Some(size) = input.window_resized() {
                if let Err(err) = pixels.resize_surface(size.width, size.height) {
                    error!("pixels.resize_surface() failed: {}", err);
                    elwt.exit();
                    return;
                }
            }

            renderer.clear(render.background_color);
            let keyboard = Keyboard::new(&input);
            if game.tick(&mut clock, &keyboard, &mut renderer) == LoopState::Terminated {
                info!(frames = game.frames(), "shutting down");
                elwt.exit();
                return;
            }

            let fps = game.fps.fps();
            if fps != shown_fps {
                shown_fps = fps;
                window_clone.set_title(&format!("Raycaster - {:.0} FPS", fps));
            }

            window_clone.request_redraw();
        }
    })?)
}
