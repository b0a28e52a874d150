use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::{
    bubbles::frame_loop::{FrameLoop, TimerScheduler},
    data::*,
};

fn command_for_key(key: Key) -> Command {
    match key {
        Key::Escape | Key::Q => Command::Close,
        Key::Space => Command::TogglePlayback,
        Key::S => Command::Start,
        Key::P => Command::Stop,
        _ => Command::Blank,
    }
}

/// minifb has no refresh callback and can't tell the screen size, so
/// frames are paced by a timer and the canvas uses the default size
/// unless `--size` is given.
pub fn minifb_main(mut prog: Program) -> Result<()> {
    let size = prog.canvas_size_for(None);
    prog.update_size(size);
    prog.init_bubbles()?;
    prog.print_startup_info();

    let scale = prog.scale() as usize;
    let (w, h) = prog.pix.sizeu();
    let (win_w, win_h) = (w * scale, h * scale);

    let mut win = Window::new(
        "bubblevis",
        win_w,
        win_h,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )?;

    let mut buffer = vec![0u32; win_w * win_h];
    let mut cmds = Vec::new();
    let mut presented = false;

    let mut frame_loop = FrameLoop::new(TimerScheduler::from_milli_hz(prog.milli_hz()));
    let teardown = frame_loop.teardown();

    frame_loop.run(|| {
        if !win.is_open() {
            teardown.request();
            return;
        }

        cmds.extend(
            win.get_keys_pressed(KeyRepeat::No)
                .into_iter()
                .map(command_for_key),
        );

        if prog.eval_commands(&mut cmds) {
            teardown.request();
            return;
        }

        if !prog.render() && presented {
            win.update();
            return;
        }

        prog.pix.scale_to(scale, &mut buffer, None);

        match win.update_with_buffer(&buffer, win_w, win_h) {
            Ok(()) => presented = true,
            Err(e) => tracing::warn!("failed to present the frame: {e}"),
        }
    });

    Ok(())
}
