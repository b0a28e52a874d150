#[cfg(feature = "terminal")]
pub mod console_mode;

#[cfg(feature = "minifb")]
pub mod minifb_mode;

pub mod windowed_mode;

use crate::data::{Program, Result};

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Mode {
    /// winit + softbuffer.
    Win,
    /// minifb.
    WinLegacy,
    ConAscii,
    ConBlock,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Win => "window",
            Mode::WinLegacy => "minifb",
            Mode::ConAscii => "ascii",
            Mode::ConBlock => "block",
        }
    }

    pub fn is_con(&self) -> bool {
        matches!(self, Mode::ConAscii | Mode::ConBlock)
    }
}

/// Hands the program to the host for its mode and runs until closed.
pub fn run(prog: Program) -> Result<()> {
    match prog.mode() {
        Mode::Win => windowed_mode::winit_main(prog),

        #[cfg(feature = "minifb")]
        Mode::WinLegacy => minifb_mode::minifb_main(prog),

        #[cfg(not(feature = "minifb"))]
        Mode::WinLegacy => Err(crate::data::ConfigError::FeatureDisabled {
            flag: "--minifb",
            feature: "minifb",
        }
        .into()),

        #[cfg(feature = "terminal")]
        Mode::ConAscii | Mode::ConBlock => console_mode::con_main(prog),

        #[cfg(not(feature = "terminal"))]
        Mode::ConAscii | Mode::ConBlock => Err(crate::data::ConfigError::FeatureDisabled {
            flag: "--ascii/--block",
            feature: "terminal",
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_modes() {
        assert!(Mode::ConAscii.is_con());
        assert!(Mode::ConBlock.is_con());
        assert!(!Mode::Win.is_con());
        assert!(!Mode::WinLegacy.is_con());
    }
}
