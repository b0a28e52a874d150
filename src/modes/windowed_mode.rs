use softbuffer::{Context, SoftBufferError, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Fullscreen, Theme, Window, WindowId},
};

use std::{num::NonZeroU32, sync::Arc, thread};

use crate::{
    bubbles::frame_loop::{FrameLoop, Teardown, TimerScheduler},
    data::*,
};

type WindowSurface = Surface<Arc<Window>, Arc<Window>>;

struct WindowState {
    prog: Program,
    window: Option<Arc<Window>>,
    surface: Option<WindowSurface>,
    teardown: Option<Teardown>,
    final_buffer_size: PhysicalSize<u32>,
    presented: bool,
    error: Option<Error>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Resumed again after a suspend, the window is still there.
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                tracing::debug!(width = size.width, height = size.height, "window resized");

                self.final_buffer_size = size;

                if let Err(e) = Self::resize_surface(surface, size) {
                    tracing::warn!("unable to resize the window buffer: {e}");
                }

                // Bubbles keep the size they were seeded with, the rest
                // of the window is backdrop.
                self.presented = false;
                if let Some(w) = self.window.as_ref() {
                    w.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                let cmd = command_for_key(event.logical_key.as_ref());

                if cmd.is_close_requested() {
                    event_loop.exit();
                } else {
                    self.prog.eval_command(&cmd);
                }
            }

            WindowEvent::RedrawRequested => {
                // Stopped frames leave the last picture up. The first
                // frame always goes out so the window gets mapped.
                if !self.prog.render() && self.presented {
                    return;
                }

                self.present();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _: &ActiveEventLoop) {
        if let Some(teardown) = self.teardown.take() {
            teardown.request();
        }
    }
}

impl WindowState {
    fn create(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());

        let viewport = monitor.as_ref().map(|m| {
            let s = m.size();
            (s.width, s.height)
        });

        let size = self.prog.canvas_size_for(viewport);
        self.prog.update_size(size);
        self.prog.init_bubbles()?;

        let scale = self.prog.scale() as u32;
        let win_size = PhysicalSize::<u32>::new(size.0 as u32 * scale, size.1 as u32 * scale);

        let mut window_attributes = Window::default_attributes()
            .with_title("bubblevis")
            .with_inner_size(win_size)
            .with_resizable(false)
            .with_theme(Some(Theme::Dark));

        if self.prog.requested_size().is_none() {
            window_attributes =
                window_attributes.with_fullscreen(Some(Fullscreen::Borderless(monitor)));
        }

        #[cfg(target_os = "linux")]
        {
            use winit::platform::wayland::WindowAttributesExtWayland;
            window_attributes = window_attributes.with_name("bubblevis", "bubblevis");
        }

        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let size = window.inner_size();
        self.final_buffer_size = size;

        let context = Context::new(window.clone())?;
        let mut surface = Surface::new(&context, window.clone())?;
        Self::resize_surface(&mut surface, size)?;
        self.surface = Some(surface);

        if self.prog.rr_mode() != RefreshRateMode::Specified {
            Self::check_refresh_rate(&window, &mut self.prog);
        }

        self.prog.print_startup_info();

        let mut redraw_loop = FrameLoop::new(TimerScheduler::from_milli_hz(self.prog.milli_hz()));
        self.teardown = Some(redraw_loop.teardown());

        let redraw_window = window.clone();

        // Thread to control requesting redraws.
        thread::Builder::new()
            .name("redraw".to_string())
            .spawn(move || {
                redraw_loop.run(|| {
                    if !redraw_window.is_minimized().unwrap_or(false) {
                        redraw_window.request_redraw();
                    }
                });
            })?;

        self.window = Some(window);

        Ok(())
    }

    fn present(&mut self) {
        let (Some(window), Some(surface)) = (self.window.as_ref(), self.surface.as_mut()) else {
            return;
        };

        let mut buffer = match surface.buffer_mut() {
            Ok(buffer) => buffer,
            Err(e) => {
                tracing::warn!("unable to get the window buffer: {e}");
                return;
            }
        };

        let scale = self.prog.scale() as usize;
        let (w, h) = self.prog.pix.sizeu();
        let PhysicalSize { width, height } = self.final_buffer_size;

        if (width as usize, height as usize) != (w * scale, h * scale) {
            buffer.fill(self.prog.pix.background() & 0x00_FF_FF_FF);
        }

        self.prog
            .pix
            .scale_to(scale, &mut buffer, Some(width as usize));

        window.pre_present_notify();

        match buffer.present() {
            Ok(()) => self.presented = true,
            Err(e) => tracing::warn!("failed to present the frame: {e}"),
        }
    }

    fn resize_surface(
        surface: &mut WindowSurface,
        size: PhysicalSize<u32>,
    ) -> std::result::Result<(), SoftBufferError> {
        // Zero while minimized on some platforms, keep the old buffer.
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(());
        };

        surface.resize(w, h)
    }

    fn check_refresh_rate(window: &Window, prog: &mut Program) {
        let Some(milli_hz) = window
            .current_monitor()
            .and_then(|m| m.refresh_rate_millihertz())
        else {
            tracing::info!(
                "unable to query the monitor's refresh rate, using {}hz",
                prog.milli_hz() as f32 / 1000.0
            );
            return;
        };

        if milli_hz == prog.milli_hz() {
            return;
        }

        if milli_hz > CAP_MILLI_HZ {
            tracing::info!(
                "detected {}hz, capped to {}hz",
                milli_hz as f32 / 1000.0,
                CAP_MILLI_HZ as f32 / 1000.0
            );
        } else {
            tracing::info!(
                "detected {}hz, pass --fps to lock the rate",
                milli_hz as f32 / 1000.0
            );
        }

        prog.change_fps_frac(milli_hz);
    }
}

fn command_for_key(key: Key<&str>) -> Command {
    match key {
        Key::Named(NamedKey::Escape) => Command::Close,
        Key::Named(NamedKey::Space) => Command::TogglePlayback,
        Key::Character(s) => s.chars().next().map_or(Command::Blank, Command::from_char),
        _ => Command::Blank,
    }
}

pub fn winit_main(prog: Program) -> Result<()> {
    let event_loop = EventLoop::new()?;

    let mut state = WindowState {
        prog,
        window: None,
        surface: None,
        teardown: None,
        final_buffer_size: PhysicalSize::<u32>::new(0, 0),
        presented: false,
        error: None,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut state)?;

    if let Some(teardown) = state.teardown.take() {
        teardown.request();
    }

    state.error.map_or(Ok(()), Err)
}
