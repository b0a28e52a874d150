use clap::{ArgGroup, Parser};

use crate::{
    data::{
        ConfigError, Program, RefreshRateMode, CAP_MILLI_HZ, MAX_BUBBLE_COUNT, MAX_CANVAS_SIDE,
        MAX_SCALE_FACTOR,
    },
    graphics::blend::rgb,
    modes::Mode,
};

/// Parameters of the animation itself.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleConfig {
    pub bubble_count: usize,
    pub min_diam: f32,
    pub max_diam: f32,
    /// Accepted for compatibility, does nothing.
    pub blur: bool,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            bubble_count: 20,
            min_diam: 6.0,
            max_diam: 40.0,
            blur: false,
        }
    }
}

impl BubbleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bubble_count > MAX_BUBBLE_COUNT {
            return Err(ConfigError::TooManyBubbles {
                count: self.bubble_count,
                max: MAX_BUBBLE_COUNT,
            });
        }

        let (min, max) = (self.min_diam, self.max_diam);

        if !min.is_finite() || min <= 0.0 {
            return Err(ConfigError::InvalidMinDiameter(min));
        }

        if !max.is_finite() {
            return Err(ConfigError::InvalidMaxDiameter(max));
        }

        if max < min {
            return Err(ConfigError::DiameterOrder { min, max });
        }

        Ok(())
    }
}

/// Rising bubbles, drawn on the CPU.
#[derive(Parser, Debug)]
#[command(name = "bubblevis", version, about)]
#[command(group(ArgGroup::new("mode").args(["win", "minifb", "ascii", "block"])))]
pub struct Options {
    /// Number of bubbles
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    pub count: i64,

    /// Smallest bubble diameter in pixels
    #[arg(long, default_value_t = 6.0, allow_negative_numbers = true)]
    pub min_diam: f32,

    /// Largest bubble diameter in pixels
    #[arg(long, default_value_t = 40.0, allow_negative_numbers = true)]
    pub max_diam: f32,

    /// Accepted but has no effect
    #[arg(long)]
    pub blur: bool,

    /// Canvas size, e.g. 640x360. Defaults to the whole screen or terminal
    #[arg(long, value_name = "WxH")]
    pub size: Option<String>,

    /// Pixel scale in windowed modes
    #[arg(long, default_value_t = 1)]
    pub scale: u8,

    /// Lock the refresh rate instead of following the monitor
    #[arg(long)]
    pub fps: Option<f32>,

    /// Backdrop color
    #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
    pub background: Option<Vec<u8>>,

    /// Seed for the bubble layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start stopped, press space to play
    #[arg(long)]
    pub paused: bool,

    /// Turn logging off
    #[arg(long)]
    pub quiet: bool,

    /// Log filter, e.g. `debug` or `bubblevis=trace`. Overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Draw in a window (default)
    #[arg(long)]
    pub win: bool,

    /// Draw in a minifb window
    #[arg(long)]
    pub minifb: bool,

    /// Draw in the terminal with characters
    #[arg(long)]
    pub ascii: bool,

    /// Draw in the terminal with colored half blocks
    #[arg(long)]
    pub block: bool,
}

impl Options {
    pub fn mode(&self) -> Result<Mode, ConfigError> {
        let disabled = |flag, feature| ConfigError::FeatureDisabled { flag, feature };

        if self.minifb {
            return if cfg!(feature = "minifb") {
                Ok(Mode::WinLegacy)
            } else {
                Err(disabled("--minifb", "minifb"))
            };
        }

        if self.ascii || self.block {
            if !cfg!(feature = "terminal") {
                let flag = if self.ascii { "--ascii" } else { "--block" };
                return Err(disabled(flag, "terminal"));
            }

            return Ok(if self.ascii {
                Mode::ConAscii
            } else {
                Mode::ConBlock
            });
        }

        Ok(Mode::Win)
    }

    pub fn bubble_config(&self) -> Result<BubbleConfig, ConfigError> {
        let bubble_count =
            usize::try_from(self.count).map_err(|_| ConfigError::NegativeCount(self.count))?;

        let config = BubbleConfig {
            bubble_count,
            min_diam: self.min_diam,
            max_diam: self.max_diam,
            blur: self.blur,
        };

        config.validate()?;

        Ok(config)
    }

    /// Whether anything should be logged at all. Terminal modes draw
    /// over the whole screen, so log lines would only tear it up.
    pub fn logging_enabled(&self) -> bool {
        !self.quiet && !self.ascii && !self.block
    }
}

/// Parses `WIDTHxHEIGHT`.
pub fn parse_size(s: &str) -> Result<(u16, u16), ConfigError> {
    let malformed = || ConfigError::MalformedSize(s.to_string());

    let (w, h) = s.split_once(['x', 'X']).ok_or_else(malformed)?;

    let width = w.trim().parse::<u32>().map_err(|_| malformed())?;
    let height = h.trim().parse::<u32>().map_err(|_| malformed())?;

    let in_range = |v: u32| (1..=MAX_CANVAS_SIDE as u32).contains(&v);

    if !in_range(width) || !in_range(height) {
        return Err(ConfigError::SizeOutOfRange {
            width,
            height,
            max: MAX_CANVAS_SIDE as u32,
        });
    }

    Ok((width as u16, height as u16))
}

impl Program {
    pub fn from_options(opts: &Options) -> Result<Self, ConfigError> {
        let mut prog = Program::new();

        prog.mode = opts.mode()?;
        prog.config = opts.bubble_config()?;
        prog.seed = opts.seed;
        prog.autostart = !opts.paused;

        if let Some(s) = &opts.size {
            prog.size = Some(parse_size(s)?);
        }

        if opts.scale == 0 || opts.scale > MAX_SCALE_FACTOR {
            return Err(ConfigError::ScaleOutOfRange {
                scale: opts.scale,
                max: MAX_SCALE_FACTOR,
            });
        }
        prog.scale = opts.scale;

        if let Some(fps) = opts.fps {
            if !fps.is_finite() || fps <= 0.0 {
                return Err(ConfigError::InvalidFps(fps));
            }

            let milli_hz = ((fps * 1000.0).round() as u32).clamp(1, CAP_MILLI_HZ);
            prog.change_fps_frac(milli_hz);
            prog.refresh_rate_mode = RefreshRateMode::Specified;
        }

        let background = opts
            .background
            .as_deref()
            .and_then(|c| <[u8; 3]>::try_from(c).ok());

        if let Some([r, g, b]) = background {
            prog.pix.set_background(rgb(r, g, b));
        }

        Ok(prog)
    }

    pub fn print_startup_info(&self) {
        let (w, h) = self.pix.sizeu();

        tracing::info!(
            mode = self.mode.name(),
            width = w,
            height = h,
            scale = self.scale,
            refresh_hz = self.milli_hz as f32 / 1000.0,
            bubbles = self.config.bubble_count,
            min_diam = self.config.min_diam,
            max_diam = self.config.max_diam,
            playing = self.autostart,
            "starting bubblevis"
        );

        if self.config.blur {
            tracing::info!("--blur is accepted but has no effect");
        }

        if w * h * (self.scale as usize).pow(2) > 4_000_000 {
            tracing::warn!("bubblevis draws on the CPU, large sizes may run slowly");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        Options::try_parse_from(std::iter::once("bubblevis").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn defaults() {
        let opts = parse(&[]);
        assert_eq!(opts.bubble_config(), Ok(BubbleConfig::default()));
        assert_eq!(opts.mode(), Ok(Mode::Win));
        assert!(opts.logging_enabled());

        let prog = Program::from_options(&opts).expect("valid program");
        assert!(prog.autostart);
        assert_eq!(prog.scale, 1);
        assert_eq!(prog.size, None);
        assert_eq!(prog.refresh_rate_mode, RefreshRateMode::Sync);
    }

    #[test]
    fn negative_count_is_rejected() {
        let opts = parse(&["--count", "-3"]);
        assert_eq!(opts.bubble_config(), Err(ConfigError::NegativeCount(-3)));
    }

    #[test]
    fn huge_count_is_rejected() {
        let opts = parse(&["--count", "9223372036854775807"]);
        assert!(matches!(
            opts.bubble_config(),
            Err(ConfigError::TooManyBubbles {
                max: MAX_BUBBLE_COUNT,
                ..
            })
        ));

        let limit = MAX_BUBBLE_COUNT.to_string();
        assert!(parse(&["--count", limit.as_str()]).bubble_config().is_ok());
    }

    #[test]
    fn diameters_are_validated() {
        let bad = |min: f32, max: f32| {
            BubbleConfig {
                min_diam: min,
                max_diam: max,
                ..BubbleConfig::default()
            }
            .validate()
        };

        assert_eq!(bad(0.0, 10.0), Err(ConfigError::InvalidMinDiameter(0.0)));
        assert_eq!(bad(-2.0, 10.0), Err(ConfigError::InvalidMinDiameter(-2.0)));
        assert!(matches!(bad(f32::NAN, 10.0), Err(ConfigError::InvalidMinDiameter(_))));
        assert_eq!(
            bad(5.0, f32::INFINITY),
            Err(ConfigError::InvalidMaxDiameter(f32::INFINITY))
        );
        assert_eq!(
            bad(10.0, 5.0),
            Err(ConfigError::DiameterOrder { min: 10.0, max: 5.0 })
        );
        assert_eq!(bad(10.0, 10.0), Ok(()));
    }

    #[test]
    fn sizes() {
        assert_eq!(parse_size("640x360"), Ok((640, 360)));
        assert_eq!(parse_size("32X8"), Ok((32, 8)));
        assert_eq!(
            parse_size("640"),
            Err(ConfigError::MalformedSize("640".to_string()))
        );
        assert_eq!(
            parse_size("ax3"),
            Err(ConfigError::MalformedSize("ax3".to_string()))
        );
        assert!(matches!(
            parse_size("0x10"),
            Err(ConfigError::SizeOutOfRange { width: 0, .. })
        ));
        assert!(matches!(
            parse_size("99999x10"),
            Err(ConfigError::SizeOutOfRange { .. })
        ));
    }

    #[test]
    fn scale_is_bounded() {
        for scale in ["0", "17"] {
            let opts = parse(&["--scale", scale]);
            assert!(matches!(
                Program::from_options(&opts),
                Err(ConfigError::ScaleOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn fps_locks_the_rate() {
        let prog = Program::from_options(&parse(&["--fps", "30"])).expect("valid program");
        assert_eq!(prog.milli_hz(), 30_000);
        assert_eq!(prog.refresh_rate_mode, RefreshRateMode::Specified);

        assert!(matches!(
            Program::from_options(&parse(&["--fps", "0"])),
            Err(ConfigError::InvalidFps(_))
        ));
    }

    #[test]
    fn other_flags() {
        let opts = parse(&[
            "--paused",
            "--seed",
            "7",
            "--size",
            "100x50",
            "--background",
            "1",
            "2",
            "3",
        ]);
        let prog = Program::from_options(&opts).expect("valid program");

        assert!(!prog.autostart);
        assert_eq!(prog.seed, Some(7));
        assert_eq!(prog.size, Some((100, 50)));
        assert_eq!(prog.pix.background(), rgb(1, 2, 3));
    }

    #[test]
    fn mode_flags_are_exclusive() {
        let err = Options::try_parse_from(["bubblevis", "--win", "--ascii"]);
        assert!(err.is_err());
    }

    #[cfg(not(feature = "terminal"))]
    #[test]
    fn terminal_needs_its_feature() {
        assert_eq!(
            parse(&["--block"]).mode(),
            Err(ConfigError::FeatureDisabled {
                flag: "--block",
                feature: "terminal"
            })
        );
    }

    #[cfg(feature = "terminal")]
    #[test]
    fn terminal_modes_silence_logging() {
        let opts = parse(&["--ascii"]);
        assert_eq!(opts.mode(), Ok(Mode::ConAscii));
        assert!(!opts.logging_enabled());
    }
}
