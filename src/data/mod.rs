pub mod config;
mod error;
pub mod log;

pub use error::*;

use crate::{bubbles::Bubbles, graphics::Canvas, modes::Mode};
use config::BubbleConfig;

pub const DEFAULT_MILLI_HZ: u32 = 60 * 1000;
pub const CAP_MILLI_HZ: u32 = 240 * 1000;

/// Used when neither `--size` nor the screen size is known.
pub const DEFAULT_SIZE_WIN: (u16, u16) = (480, 270);
pub const MAX_CANVAS_SIDE: u16 = 4096;
pub const MAX_SCALE_FACTOR: u8 = 16;
pub const MAX_BUBBLE_COUNT: usize = 100_000;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RefreshRateMode {
    /// Follow the monitor.
    Sync,
    /// Locked with `--fps`.
    Specified,
}

/// Main program struct
///
/// Holds the canvas every mode draws into, the settings it was
/// started with, and the animation once it has been set up.
pub struct Program {
    pub pix: Canvas,
    pub mode: Mode,

    scale: u8,
    /// Requested canvas size, `None` fills the viewport.
    size: Option<(u16, u16)>,

    milli_hz: u32,
    refresh_rate_mode: RefreshRateMode,

    config: BubbleConfig,
    seed: Option<u64>,
    autostart: bool,

    bubbles: Option<Bubbles>,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Command {
    TogglePlayback,
    Start,
    Stop,
    Blank,
    Close,
}

impl Command {
    pub fn is_close_requested(&self) -> bool {
        *self == Command::Close
    }

    /// Key bindings shared by every mode.
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            ' ' => Command::TogglePlayback,
            's' => Command::Start,
            'p' => Command::Stop,
            'q' => Command::Close,
            _ => Command::Blank,
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    pub fn new() -> Self {
        let (w, h) = DEFAULT_SIZE_WIN;

        Self {
            pix: Canvas::new(w as usize, h as usize),
            mode: Mode::Win,

            scale: 1,
            size: None,

            milli_hz: DEFAULT_MILLI_HZ,
            refresh_rate_mode: RefreshRateMode::Sync,

            config: BubbleConfig::default(),
            seed: None,
            autostart: true,

            bubbles: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn milli_hz(&self) -> u32 {
        self.milli_hz
    }

    pub fn requested_size(&self) -> Option<(u16, u16)> {
        self.size
    }

    pub fn rr_mode(&self) -> RefreshRateMode {
        self.refresh_rate_mode
    }

    pub fn change_fps_frac(&mut self, milli_hz: u32) {
        self.milli_hz = milli_hz.clamp(1, CAP_MILLI_HZ);
    }

    /// Canvas size for a viewport of `viewport` pixels.
    ///
    /// An explicit `--size` always wins. Windowed modes divide the
    /// viewport by the pixel scale.
    pub fn canvas_size_for(&self, viewport: Option<(u32, u32)>) -> (u16, u16) {
        if let Some(size) = self.size {
            return size;
        }

        let Some((w, h)) = viewport else {
            return DEFAULT_SIZE_WIN;
        };

        let scale = if self.mode.is_con() {
            1
        } else {
            self.scale as u32
        };

        let fit = |v: u32| (v / scale).clamp(1, MAX_CANVAS_SIDE as u32) as u16;

        (fit(w), fit(h))
    }

    pub fn update_size(&mut self, (w, h): (u16, u16)) {
        self.pix.resize(w as usize, h as usize);
    }

    /// Seeds the animation for the current canvas. Must be called
    /// after the canvas has its final size.
    pub fn init_bubbles(&mut self) -> Result<()> {
        let bubbles = Bubbles::initialize(&mut self.pix, &self.config, self.seed)?;

        if self.autostart {
            bubbles.start();
        }

        self.bubbles = Some(bubbles);

        Ok(())
    }

    #[cfg(test)]
    pub fn bubbles(&self) -> Option<&Bubbles> {
        self.bubbles.as_ref()
    }

    /// Runs one frame. Returns whether the canvas changed and needs
    /// to be presented.
    pub fn render(&mut self) -> bool {
        match self.bubbles.as_mut() {
            Some(bubbles) => bubbles.frame(&mut self.pix),
            None => false,
        }
    }

    pub fn eval_command(&mut self, cmd: &Command) {
        let Some(bubbles) = self.bubbles.as_ref() else {
            return;
        };

        match cmd {
            Command::TogglePlayback => {
                bubbles.toggle();
            }
            Command::Start => bubbles.start(),
            Command::Stop => bubbles.stop(),
            Command::Blank | Command::Close => {}
        }
    }

    /// Evaluates and drains `cmds`. Returns whether one of them asked
    /// to close.
    pub fn eval_commands(&mut self, cmds: &mut Vec<Command>) -> bool {
        let mut close = false;

        for cmd in cmds.drain(..) {
            close |= cmd.is_close_requested();
            self.eval_command(&cmd);
        }

        close
    }
}
