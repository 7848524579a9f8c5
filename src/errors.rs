//! Error types

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// A byte oriented header is shorter than required.
    TooShort {
        required: usize,
        available: usize,
        data: String,
    },
    /// The PER bit reader ran out of bits.
    BufferUnderflow { needed: usize, available: usize },
    /// A value lies outside its PER constraint.
    ConstraintViolation { value: i64, min: i64, max: i64 },
    ParseError(String),
    RegisterError(String),
    EncodeError(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TooShort {
                required,
                available,
                data,
            } => write!(
                f,
                "too short: required {} bytes, available {} ({})",
                required, available, data
            ),
            Error::BufferUnderflow { needed, available } => write!(
                f,
                "buffer underflow: need {} bits, have {}",
                needed, available
            ),
            Error::ConstraintViolation { value, min, max } => {
                write!(f, "value {} not in range {}..={}", value, min, max)
            }
            Error::ParseError(s) => write!(f, "parse error: {}", s),
            Error::RegisterError(s) => write!(f, "register error: {}", s),
            Error::EncodeError(s) => write!(f, "encode error: {}", s),
        }
    }
}
