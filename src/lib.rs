pub mod canvas;
pub mod content;
pub mod game_app;
pub mod gameplay;
pub mod images;
pub mod input;
pub mod math_utils;
pub mod platform;
pub mod renderer;
pub mod rotator;
pub mod settings;
pub mod shapes;
pub mod sprite;
pub mod viewport;

use std::time::Instant;

use anyhow::Context;
use tracing::info;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use canvas::Canvas;
use game_app::{orbit_demo::OrbitDemo, GameAppHost};
use platform::FrameClock;
use renderer::Renderer;
use settings::DemoSettings;

/// Opens the demo window and runs the frame loop until the window is closed.
pub fn orbit_main(settings: DemoSettings) -> anyhow::Result<()> {
    // Create main window for rendering.
    info!("creating main window for rendering");

    let event_loop = EventLoop::new().context("failed to create main window event loop")?;
    let window = WindowBuilder::new()
        .with_title(settings.window_title.as_str())
        .with_inner_size(LogicalSize::new(
            settings.canvas_width,
            settings.canvas_height,
        ))
        .build(&event_loop)
        .context("failed to create main window")?;
    let main_window = &window;

    let renderer = pollster::block_on(Renderer::new(
        main_window,
        settings.canvas_width,
        settings.canvas_height,
    ))?;

    let canvas = Canvas::new(settings.canvas_width, settings.canvas_height);
    let clear_color = settings.clear_color;
    let mut frame_clock = FrameClock::new(settings.frames_per_second);

    let mut host = GameAppHost::new(
        renderer,
        canvas,
        clear_color,
        Box::new(OrbitDemo::new(settings)),
    );
    host.load_content()?;

    // Main window event loop. One simulation tick happens per rendered frame,
    // and the loop sleeps until the next frame is due.
    info!("starting main window event loop");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == main_window.id() => {
                if host.input(&event) {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key: Key::Named(NamedKey::Escape),
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    } => elwt.exit(),
                    WindowEvent::CursorMoved { position, .. } => host.cursor_moved(position),
                    WindowEvent::CursorLeft { .. } => host.cursor_left(),
                    WindowEvent::Resized(new_size) => {
                        host.window_resized(new_size.width, new_size.height)
                    }
                    WindowEvent::ScaleFactorChanged { .. } => host.scale_factor_changed(),
                    // Redraws requested by the system outside the frame
                    // schedule present the scene without advancing it.
                    WindowEvent::RedrawRequested => {
                        if frame_clock.is_due(Instant::now()) {
                            let delta = frame_clock.tick();
                            host.update_sim(delta);
                        }
                        host.render();
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                if frame_clock.is_due(Instant::now()) {
                    main_window.request_redraw();
                } else {
                    elwt.set_control_flow(ControlFlow::WaitUntil(frame_clock.next_deadline()));
                }
            }
            _ => {}
        })
        .context("main window event loop processing failed")?;

    Ok(())
}
