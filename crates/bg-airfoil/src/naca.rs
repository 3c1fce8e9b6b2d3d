//! NACA 4-digit airfoil code.

use bg_core::Real;
use core::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NacaError {
    #[error("NACA code must be exactly 4 digits, got '{code}'")]
    BadLength { code: String },

    #[error("NACA code contains a non-digit character: '{code}'")]
    NonDigit { code: String },

    #[error("NACA component out of range: {what} = {value}")]
    OutOfRange { what: &'static str, value: u32 },
}

/// Immutable NACA 4-digit section designation.
///
/// `m` is the maximum camber (first digit, % chord), `p` the camber
/// position (second digit, tenths of chord), `t` the thickness
/// (last two digits, % chord).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Naca4 {
    m: u8,
    p: u8,
    t: u8,
}

impl Naca4 {
    /// Parse a 4-character digit string such as `"2412"`.
    pub fn parse(code: &str) -> Result<Self, NacaError> {
        if code.len() != 4 {
            return Err(NacaError::BadLength {
                code: code.to_string(),
            });
        }
        let digits: Vec<u8> = code
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(|| NacaError::NonDigit {
                code: code.to_string(),
            })?;
        Ok(Self {
            m: digits[0],
            p: digits[1],
            t: digits[2] * 10 + digits[3],
        })
    }

    /// Build from an integer designation (`2412` is the same section as `"2412"`).
    pub fn from_code(code: u32) -> Result<Self, NacaError> {
        if code > 9999 {
            return Err(NacaError::OutOfRange {
                what: "code",
                value: code,
            });
        }
        Self::parse(&format!("{code:04}"))
    }

    /// Build directly from components.
    pub fn from_components(m: u8, p: u8, t: u8) -> Result<Self, NacaError> {
        if m > 9 {
            return Err(NacaError::OutOfRange {
                what: "m",
                value: m as u32,
            });
        }
        if p > 9 {
            return Err(NacaError::OutOfRange {
                what: "p",
                value: p as u32,
            });
        }
        if t > 99 {
            return Err(NacaError::OutOfRange {
                what: "t",
                value: t as u32,
            });
        }
        Ok(Self { m, p, t })
    }

    /// Maximum camber digit.
    pub fn m(&self) -> u8 {
        self.m
    }

    /// Camber position digit.
    pub fn p(&self) -> u8 {
        self.p
    }

    /// Thickness digits.
    pub fn t(&self) -> u8 {
        self.t
    }

    /// Re-derive the 4-digit designation string.
    pub fn code(&self) -> String {
        format!("{}{}{:02}", self.m, self.p, self.t)
    }

    /// Component-wise linear interpolation at `t_param` in [0, 1],
    /// truncated back to integer digits.
    pub fn interpolate(&self, other: &Naca4, t_param: Real) -> Naca4 {
        let lerp_digit = |a: u8, b: u8| -> u8 {
            (a as Real + t_param * (b as Real - a as Real)) as u8
        };
        Naca4 {
            m: lerp_digit(self.m, other.m),
            p: lerp_digit(self.p, other.p),
            t: lerp_digit(self.t, other.t),
        }
    }
}

impl fmt::Debug for Naca4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Naca4({})", self.code())
    }
}

impl fmt::Display for Naca4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NACA {}", self.code())
    }
}

impl core::str::FromStr for Naca4 {
    type Err = NacaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
