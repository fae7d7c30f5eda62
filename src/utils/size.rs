use std::num::ParseIntError;
use std::str::FromStr;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

#[derive(Debug, thiserror::Error)]
pub enum SizeError {
    #[error("empty size")]
    Empty,
    #[error("invalid unit '{unit}' in size '{input}'")]
    InvalidUnit { unit: char, input: String },
    #[error("size '{input}' must not carry a sign")]
    Signed { input: String },
    #[error("invalid size '{input}'")]
    InvalidNumber {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Size {
    Bytes(u64),
    Kilobytes(u64),
    Megabytes(u64),
    Gigabytes(u64),
}

impl Size {
    /// Total byte count, or `None` if it doesn't fit in a `u64`.
    pub fn bytes(self) -> Option<u64> {
        match self {
            Size::Bytes(count) => Some(count),
            Size::Kilobytes(count) => count.checked_mul(KIB),
            Size::Megabytes(count) => count.checked_mul(MIB),
            Size::Gigabytes(count) => count.checked_mul(GIB),
        }
    }
}

impl FromStr for Size {
    type Err = SizeError;

    fn from_str(input: &str) -> Result<Size, SizeError> {
        let last = input.chars().last().ok_or(SizeError::Empty)?;

        if last.is_ascii_digit() {
            return Ok(Size::Bytes(parse_count(input, input)?));
        }

        let count = &input[..input.len() - last.len_utf8()];
        match last {
            'b' | 'B' => Ok(Size::Bytes(parse_count(count, input)?)),
            'k' | 'K' => Ok(Size::Kilobytes(parse_count(count, input)?)),
            'm' | 'M' => Ok(Size::Megabytes(parse_count(count, input)?)),
            'g' | 'G' => Ok(Size::Gigabytes(parse_count(count, input)?)),
            unit => Err(SizeError::InvalidUnit {
                unit,
                input: input.to_string(),
            }),
        }
    }
}

fn parse_count(count: &str, input: &str) -> Result<u64, SizeError> {
    // u64::from_str accepts a leading '+', the size grammar doesn't.
    if count.starts_with('+') {
        return Err(SizeError::Signed {
            input: input.to_string(),
        });
    }
    count.parse().map_err(|source| SizeError::InvalidNumber {
        input: input.to_string(),
        source,
    })
}
