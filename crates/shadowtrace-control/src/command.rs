//! Outbound device commands and their wire tokens.

use crate::error::ControlError;
use std::fmt;
use std::str::FromStr;

/// Lowest speed preset.
pub const MIN_SPEED: u8 = 1;
/// Highest speed preset.
pub const MAX_SPEED: u8 = 6;

/// One command understood by the rig firmware.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceCommand {
    /// Speed preset `1`..=`6`; also starts the motor.
    Speed(u8),
    /// `p`
    Pause,
    /// `c`
    Continue,
    /// `r`: stop and zero the step counter.
    Release,
    /// `>`
    Clockwise,
    /// `<`
    CounterClockwise,
    /// `h`: advance one half step in the current direction.
    HalfStep,
    /// `=<deg>`: declare the current position.
    SetPosition(f64),
    /// `g<deg>`: rotate to an absolute angle.
    GoTo(f64),
}

impl DeviceCommand {
    /// Speed preset, or `None` outside `1..=6`.
    pub fn speed(preset: u8) -> Option<Self> {
        (MIN_SPEED..=MAX_SPEED)
            .contains(&preset)
            .then_some(Self::Speed(preset))
    }

    /// Newline-terminated wire form.
    pub fn to_wire(&self) -> String {
        format!("{}\n", self)
    }

    /// One half step clockwise, leaving the direction counter-clockwise afterwards.
    pub fn clockwise_half_step() -> [Self; 3] {
        [Self::Clockwise, Self::HalfStep, Self::CounterClockwise]
    }

    /// One half step counter-clockwise.
    pub fn counter_clockwise_half_step() -> [Self; 2] {
        [Self::CounterClockwise, Self::HalfStep]
    }

    /// Go to 180 adjusted by the mechanical calibration offset.
    pub fn goto_180(calibration_offset: f64) -> Self {
        Self::GoTo(180.0 + calibration_offset)
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Speed(n) => write!(f, "{}", n),
            Self::Pause => f.write_str("p"),
            Self::Continue => f.write_str("c"),
            Self::Release => f.write_str("r"),
            Self::Clockwise => f.write_str(">"),
            Self::CounterClockwise => f.write_str("<"),
            Self::HalfStep => f.write_str("h"),
            Self::SetPosition(deg) => write!(f, "={}", deg),
            Self::GoTo(deg) => write!(f, "g{}", deg),
        }
    }
}

impl FromStr for DeviceCommand {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || ControlError::InvalidCommand(token.to_string());
        let number = |rest: &str| rest.trim().parse::<f64>().map_err(|_| invalid());

        match token {
            "p" => Ok(Self::Pause),
            "c" => Ok(Self::Continue),
            "r" => Ok(Self::Release),
            ">" => Ok(Self::Clockwise),
            "<" => Ok(Self::CounterClockwise),
            "h" => Ok(Self::HalfStep),
            _ => {
                if let Some(rest) = token.strip_prefix('=') {
                    number(rest).map(Self::SetPosition)
                } else if let Some(rest) = token.strip_prefix('g') {
                    number(rest).map(Self::GoTo)
                } else {
                    token
                        .parse::<u8>()
                        .ok()
                        .and_then(Self::speed)
                        .ok_or_else(&invalid)
                }
            }
        }
    }
}
