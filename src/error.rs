use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    NegativeValue,
    InvalidLimbWidth(u32),
    LimbOutOfRange { index: usize, limb: u64, width: u32 },
    InvalidHex(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModulusError {
    NonPositiveModulus,
    EvenModulus,
    UnsupportedLimbWidth(u32),
    NotCanonical,
    LimbCountMismatch { expected: usize, actual: usize },
    TruncationUnavailable { e2: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    CostOverflow { size: usize },
    MalformedStrategy(&'static str),
    TreeTooLarge { n: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Codec(CodecError),
    Modulus(ModulusError),
    Strategy(StrategyError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Codec(CodecError::NegativeValue) => write!(f, "cannot encode a negative integer"),
            Error::Codec(CodecError::InvalidLimbWidth(w)) => {
                write!(f, "limb width must be between 1 and 64 bits, got {}", w)
            }
            Error::Codec(CodecError::LimbOutOfRange { index, limb, width }) => {
                write!(f, "limb {} ({:#x}) does not fit in {} bits", index, limb, width)
            }
            Error::Codec(CodecError::InvalidHex(s)) => write!(f, "invalid hex string: {}", s),
            Error::Modulus(ModulusError::NonPositiveModulus) => write!(f, "modulus must be greater than one"),
            Error::Modulus(ModulusError::EvenModulus) => write!(f, "modulus must be odd"),
            Error::Modulus(ModulusError::UnsupportedLimbWidth(w)) => {
                write!(f, "montgomery kernel requires 64-bit limbs, got {}", w)
            }
            Error::Modulus(ModulusError::NotCanonical) => write!(f, "value is not reduced below the modulus"),
            Error::Modulus(ModulusError::LimbCountMismatch { expected, actual }) => {
                write!(f, "expected {} limbs, got {}", expected, actual)
            }
            Error::Modulus(ModulusError::TruncationUnavailable { e2 }) => {
                write!(f, "truncated-modulus reduction needs e2 >= 64, got e2 = {}", e2)
            }
            Error::Strategy(StrategyError::TreeTooLarge { n }) => {
                write!(f, "cannot plan a strategy for {} + 1 leaves", n)
            }
            Error::Strategy(StrategyError::CostOverflow { size }) => {
                write!(f, "strategy cost overflows u64 at subtree size {}", size)
            }
            Error::Strategy(StrategyError::MalformedStrategy(reason)) => {
                write!(f, "malformed strategy: {}", reason)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self { Error::Codec(e) }
}

impl From<ModulusError> for Error {
    fn from(e: ModulusError) -> Self { Error::Modulus(e) }
}

impl From<StrategyError> for Error {
    fn from(e: StrategyError) -> Self { Error::Strategy(e) }
}

pub type Result<T> = std::result::Result<T, Error>;
