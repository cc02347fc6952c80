//! Interactive mode: a winit window feeding the pointer pipeline.
//!
//! Nothing is drawn. Pointer transitions and carousel changes are logged and
//! the current primitive is shown in the window title.

use crate::config::ShowcaseConfig;
use crate::showcase::{Primitive, Showcase};
use anyhow::Result;
use spatial_pointer_core::InteractionError;
use spatial_pointer_input::InputState;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

pub fn run(config: &ShowcaseConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = winit::window::WindowBuilder::new()
        .with_title(window_title("sphere"))
        .with_inner_size(winit::dpi::PhysicalSize::new(
            config.viewport.width,
            config.viewport.height,
        ))
        .build(&event_loop)?;

    let size = window.inner_size();
    let mut camera = config.camera.build(&config.viewport);
    camera.set_aspect(size.width, size.height);
    let mut input = InputState::new(size.width, size.height);
    let mut showcase = Showcase::build(&config.interaction);
    input
        .xr_mut()
        .session_unavailable("no XR runtime is attached to the windowed showcase");

    let failure: Rc<RefCell<Option<InteractionError>>> = Rc::new(RefCell::new(None));
    let loop_failure = Rc::clone(&failure);
    let mut shown = showcase.current_primitive();

    info!(width = size.width, height = size.height, "Window opened");
    info!(
        room = %showcase.room,
        next = %showcase.next,
        previous = %showcase.previous,
        "Scene handles"
    );

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, window_id } if window_id == window.id() => {
            input.handle_event(&event);
            match event {
                WindowEvent::CloseRequested => {
                    info!("Window closed");
                    elwt.exit();
                }
                WindowEvent::Resized(new_size) => {
                    camera.set_aspect(new_size.width, new_size.height);
                }
                WindowEvent::RedrawRequested => {
                    let report = match showcase.manager.update(&input.snapshot(), &camera) {
                        Ok(report) => report,
                        Err(err) => {
                            error!(%err, "Interaction update failed, closing window");
                            *loop_failure.borrow_mut() = Some(err);
                            elwt.exit();
                            return;
                        }
                    };
                    for change in report.changes() {
                        debug!(object = %change.handle, from = %change.from, to = %change.to, "transition");
                    }

                    let primitive = showcase.current_primitive();
                    if primitive != shown {
                        let carousel = showcase.carousel.borrow();
                        for (index, candidate) in Primitive::ALL.iter().enumerate() {
                            debug!(primitive = candidate.name(), visible = carousel.is_visible(index));
                        }
                        info!(primitive = primitive.name(), "Showing primitive");
                        window.set_title(&window_title(primitive.name()));
                        shown = primitive;
                    }
                }
                _ => {}
            }
        }
        Event::AboutToWait => {
            window.request_redraw();
        }
        _ => {}
    })?;

    if let Some(err) = failure.borrow_mut().take() {
        return Err(err.into());
    }
    Ok(())
}

fn window_title(primitive: &str) -> String {
    format!("spatial-pointer: {primitive}")
}
