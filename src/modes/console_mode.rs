use crossterm::{
    cursor::{self, Hide, Show},
    event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, DisableLineWrap,
        EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
    },
};

use std::{
    io::{self, stdout, Write},
    time::Duration,
};

use crate::{
    bubbles::frame_loop::{FrameLoop, TimerScheduler},
    data::*,
    graphics::{
        blend::{Argb, Blend},
        Canvas, P2,
    },
    modes::Mode,
};

/// Writes a whole frame of terminal output for the canvas.
pub type Flusher = fn(&Canvas, &mut Vec<u8>) -> io::Result<()>;

const CHARSET_OPAC_EXP: &[u8] = b" `.-':_,^=;><+!rc*/z?sLTv)J7(|Fi{C}fI31tlu[neoZ\
    5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@";

/// Raw mode and the alternate screen, undone on drop so an early
/// return doesn't leave the terminal in a mess.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        enable_raw_mode()?;
        queue!(out, EnterAlternateScreen, Hide, DisableLineWrap, Clear(ClearType::All))?;
        out.flush()?;

        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        let _ = queue!(out, ResetColor, Show, EnableLineWrap, LeaveAlternateScreen);
        let _ = out.flush();
        let _ = disable_raw_mode();
    }
}

impl Mode {
    pub fn get_flusher(&self) -> Flusher {
        match *self {
            Mode::ConAscii => print_ascii,
            _ => print_block,
        }
    }
}

fn grayb(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 + g as u16 + 2 * b as u16) / 4) as u8
}

fn to_ascii_art(table: &[u8], x: usize) -> char {
    table[(x * table.len()) >> 8] as char
}

fn rgb_of(c: Argb) -> Color {
    let [_, r, g, b] = c.decompose();
    Color::Rgb { r, g, b }
}

/// One character per two rows. Density follows how much of the cell
/// is covered, color follows the bubbles.
pub fn print_ascii(pix: &Canvas, out: &mut Vec<u8>) -> io::Result<()> {
    let (w, h) = pix.sizeu();
    let mut last_fg = None;

    for (row, y) in (0..h).step_by(2).enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16))?;

        for x in 0..w {
            // Ink only, without the backdrop.
            let ink = |y: usize| {
                pix.pixel_xy(P2::new(x, y))
                    .map_or(Argb::black(), |c| Argb::black().mix(c))
            };

            let [_, r1, g1, b1] = ink(y).decompose();
            let [_, r2, g2, b2] = ink(y + 1).decompose();
            let (r, g, b) = (r1.max(r2), g1.max(g2), b1.max(b2));

            let fg = Argb::compose([0xFF, r, g, b]);

            if last_fg != Some(fg) {
                queue!(out, SetForegroundColor(rgb_of(fg)))?;
                last_fg = Some(fg);
            }

            let ch = to_ascii_art(CHARSET_OPAC_EXP, grayb(r, g, b) as usize);
            queue!(out, Print(ch))?;
        }
    }

    queue!(out, ResetColor)
}

/// Upper half blocks, top pixel as foreground and bottom pixel as
/// background, both flattened onto the backdrop.
pub fn print_block(pix: &Canvas, out: &mut Vec<u8>) -> io::Result<()> {
    let (w, h) = pix.sizeu();
    let background = pix.background();

    let (mut last_fg, mut last_bg) = (None, None);

    for (row, y) in (0..h).step_by(2).enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16))?;

        for x in 0..w {
            let fg = pix.presented_xy(P2::new(x, y)).unwrap_or(background);
            let bg = pix.presented_xy(P2::new(x, y + 1)).unwrap_or(background);

            if last_fg != Some(fg) {
                queue!(out, SetForegroundColor(rgb_of(fg)))?;
                last_fg = Some(fg);
            }

            if last_bg != Some(bg) {
                queue!(out, SetBackgroundColor(rgb_of(bg)))?;
                last_bg = Some(bg);
            }

            queue!(out, Print('▀'))?;
        }
    }

    queue!(out, ResetColor)
}

fn command_for_key(event: KeyEvent) -> Command {
    if event.kind == KeyEventKind::Release {
        return Command::Blank;
    }

    match event.code {
        KeyCode::Esc => Command::Close,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Command::Close,
        KeyCode::Char(c) => Command::from_char(c),
        _ => Command::Blank,
    }
}

/// Queues the command for `event`. Returns whether the screen was
/// invalidated and has to be drawn again.
fn handle_event(event: Event, cmds: &mut Vec<Command>) -> bool {
    match event {
        Event::Key(event) => {
            cmds.push(command_for_key(event));
            false
        }

        // The bubbles keep the size they were seeded with.
        Event::Resize(..) => true,

        _ => false,
    }
}

fn poll_commands(cmds: &mut Vec<Command>) -> io::Result<bool> {
    let mut invalidated = false;

    while poll(Duration::ZERO)? {
        invalidated |= handle_event(read()?, cmds);
    }

    Ok(invalidated)
}

fn queue_frame(
    out: &mut Vec<u8>,
    pix: &Canvas,
    flusher: Flusher,
    clear_first: bool,
) -> io::Result<()> {
    if clear_first {
        queue!(out, Clear(ClearType::All))?;
    }

    flusher(pix, out)
}

pub fn con_main(mut prog: Program) -> Result<()> {
    let (cols, rows) = terminal::size()?;

    let size = prog.canvas_size_for(Some((cols as u32, rows as u32 * 2)));
    prog.update_size(size);
    prog.init_bubbles()?;
    prog.print_startup_info();

    let flusher = prog.mode().get_flusher();

    let mut out = stdout();
    let _guard = TerminalGuard::enter(&mut out)?;

    let mut frame = Vec::new();
    let mut cmds = Vec::new();
    let mut presented = false;
    let mut invalidated = false;
    let mut result = Ok(());

    let mut frame_loop = FrameLoop::new(TimerScheduler::from_milli_hz(prog.milli_hz()));
    let teardown = frame_loop.teardown();

    frame_loop.run(|| {
        match poll_commands(&mut cmds) {
            Ok(true) => invalidated = true,
            Ok(false) => {}
            Err(e) => {
                result = Err(e);
                teardown.request();
                return;
            }
        }

        if prog.eval_commands(&mut cmds) {
            teardown.request();
            return;
        }

        // Stopped frames leave the last picture up, unless a resize
        // wiped it.
        if !prog.render() && presented && !invalidated {
            return;
        }

        frame.clear();

        let written = queue_frame(&mut frame, &prog.pix, flusher, invalidated).and_then(|()| {
            out.write_all(&frame)?;
            out.flush()
        });

        // A terminal that can't be written to is gone.
        match written {
            Ok(()) => {
                presented = true;
                invalidated = false;
            }
            Err(e) => {
                result = Err(e);
                teardown.request();
            }
        }
    });

    Ok(result?)
}
