use std::fmt;
use std::result::Result as stdResult;
use thiserror::Error;

pub type Result<T> = stdResult<T, Error>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("shard error: {0}")]
    Shard(ShardError),
    #[error("suggest error: {0}")]
    Suggest(SuggestError),
    #[error("sampler error: {0}")]
    Sampler(SamplerError),
    #[error("catalog error: {0}")]
    Catalog(CatalogError),
}

/// The four structural invariants of a shard set, named for error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    StartsAtNegInf,
    EndsAtPosInf,
    Contiguity,
    ShardCount,
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Invariant::StartsAtNegInf => "first range must start at -inf",
            Invariant::EndsAtPosInf => "last range must end at +inf",
            Invariant::Contiguity => "ranges must be contiguous",
            Invariant::ShardCount => "shard count out of bounds",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShardError {
    #[error("{which} (at index {index})")]
    InvariantViolation { which: Invariant, index: usize },
    #[error("empty range [{start}, {end})")]
    EmptyRange { start: String, end: String },
    #[error("split point {point} not inside range {index}")]
    InvalidSplitPoint { index: usize, point: String },
    #[error("index {index} out of range for {len} shards")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<ShardError> for Error {
    fn from(e: ShardError) -> Error {
        Error::Shard(e)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SuggestError {
    #[error("desired shard count {desired} outside 1..={bound}")]
    InvalidDesiredCount { desired: usize, bound: usize },
    #[error("not enough data to suggest shards")]
    InsufficientSample,
    #[error("only {achieved} shards could be suggested")]
    PartialSuggestion { achieved: usize },
}

impl From<SuggestError> for Error {
    fn from(e: SuggestError) -> Error {
        Error::Suggest(e)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SamplerError {
    #[error("sample keys not strictly increasing at entry {index}")]
    OutOfOrder { index: usize },
    #[error("no sample for table {0}")]
    NoSample(String),
}

impl From<SamplerError> for Error {
    fn from(e: SamplerError) -> Error {
        Error::Sampler(e)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no such table {0}")]
    NoSuchTable(String),
    #[error("key type error: {0}")]
    KeyType(String),
    #[error("malformed shard payload: {0}")]
    MalformedPayload(String),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("commit rejected: {0}")]
    Rejected(String),
}

impl From<CatalogError> for Error {
    fn from(e: CatalogError) -> Error {
        Error::Catalog(e)
    }
}
