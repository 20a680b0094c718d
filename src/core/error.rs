//! # Rejections
//!
//! Every store, generator and submission operation is total: it either
//! succeeds or hands back a `Rejection`. Nothing here is fatal. The caller
//! shows the message inline and the state stays as it was.
//!
//! `Display` renders the user-facing message shown by the web client.

use std::fmt;

/// Which cap a `LimitExceeded` rejection hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// The include set already holds its maximum.
    Include(usize),
    /// The targeted combination is full.
    Combination(usize),
    /// The combination list is at `max_combinations`.
    CombinationList(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Tap target outside 1..=45.
    InvalidNumber(i64),
    LimitExceeded(Limit),
    /// The number is already in the include set.
    ConflictsWithInclude(u8),
    /// The number is already in the exclude set.
    ConflictsWithExclude(u8),
    /// More forced numbers than the target combination size.
    OverconstrainedSelection { forced: usize, size: usize },
    /// A manual combination has the wrong count at submission time.
    /// `index` is zero-based.
    IncompleteCombination { index: usize, count: usize, required: usize },
    /// Manual combinations were requested but none exist.
    MissingManualCombinations,
    /// No combination at the given (zero-based) index.
    NoSuchCombination(usize),
    /// The same number appeared twice in externally supplied input.
    DuplicateNumber(u8),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InvalidNumber(n) => write!(f, "유효하지 않은 번호입니다: {n}"),
            Rejection::LimitExceeded(Limit::Include(max)) => {
                write!(f, "포함할 번호는 최대 {max}개까지 가능합니다.")
            }
            Rejection::LimitExceeded(Limit::Combination(max)) => {
                write!(f, "각 조합당 최대 {max}개까지만 선택할 수 있습니다.")
            }
            Rejection::LimitExceeded(Limit::CombinationList(max)) => {
                write!(f, "최대 {max}개 조합까지만 만들 수 있습니다.")
            }
            Rejection::ConflictsWithInclude(_) => write!(f, "포함할 번호와 중복됩니다."),
            Rejection::ConflictsWithExclude(_) => write!(f, "제외할 번호와 중복됩니다."),
            Rejection::OverconstrainedSelection { forced, size } => write!(
                f,
                "포함할 번호({forced}개)가 조합 크기({size}개)보다 많습니다."
            ),
            Rejection::IncompleteCombination { index, required, .. } => {
                write!(f, "조합 {}에 정확히 {required}개의 번호를 선택해주세요.", index + 1)
            }
            Rejection::MissingManualCombinations => write!(f, "수동 조합을 추가해주세요."),
            Rejection::NoSuchCombination(index) => {
                write!(f, "조합 {}이(가) 존재하지 않습니다.", index + 1)
            }
            Rejection::DuplicateNumber(n) => write!(f, "번호 {n}이(가) 중복되었습니다."),
        }
    }
}

impl std::error::Error for Rejection {}
