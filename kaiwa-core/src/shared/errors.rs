use thiserror::Error;

/// 领域错误类型
///
/// 所有聚合操作的失败都归入四类：实体缺失、实体重复、
/// 参数非法、业务规则被破坏。失败不产生任何可观察的副作用。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Business rule violated: {0}")]
    RuleViolation(String),
}

impl DomainError {
    /// 构造实体缺失错误
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// 构造实体重复错误
    pub fn duplicate(entity: &'static str, id: impl ToString) -> Self {
        Self::Duplicate {
            entity,
            id: id.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
