// ==========================================
// 库存可视化看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository错误为调用方可区分的错误
// 四类业务错误: 参数校验 / 未找到 / 库存不足 / 事务失败
// 存储层自身的连接/查询故障原样透传，不做掩盖
// ==========================================

use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务错误
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("库存不足: product_id={product_id}, warehouse={warehouse}, available={available}, requested={requested}")]
    InsufficientStock {
        product_id: String,
        warehouse: String,
        available: i64,
        requested: i64,
    },

    /// 原子事务未能完成（整体未生效，可整体重试）
    #[error("数据库事务失败: {0}")]
    TransactionError(String),

    // ==========================================
    // 数据访问错误（透传）
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

/// 错误种类标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorKind {
    Validation,
    NotFound,
    InsufficientStock,
    Transaction,
    Store,
    Internal,
}

impl ApiError {
    /// 错误种类
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::ValidationError(_) => ApiErrorKind::Validation,
            ApiError::NotFound(_) => ApiErrorKind::NotFound,
            ApiError::InsufficientStock { .. } => ApiErrorKind::InsufficientStock,
            ApiError::TransactionError(_) => ApiErrorKind::Transaction,
            ApiError::DatabaseError(_) | ApiError::DatabaseConnectionError(_) => ApiErrorKind::Store,
            ApiError::InternalError(_) => ApiErrorKind::Internal,
        }
    }

    /// 是否可整体重试
    ///
    /// 只有事务失败可重试: 事务未部分生效
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::TransactionError(_))
    }

    /// 错误代码（前端展示/埋点用）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            ApiError::TransactionError(_) => "TRANSACTION_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// 将事务体内的存储故障归类为事务失败
    ///
    /// 业务错误（未找到/库存不足/校验）保持原类别
    pub fn from_transaction(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::LockError(msg)
            | RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::ForeignKeyViolation(msg)
            | RepositoryError::CheckConstraintViolation(msg)
            | RepositoryError::InternalError(msg) => ApiError::TransactionError(msg),
            RepositoryError::Other(err) => ApiError::TransactionError(err.to_string()),
            other => ApiError::from(other),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::InsufficientStock {
                product_id,
                warehouse_code,
                available,
                requested,
            } => ApiError::InsufficientStock {
                product_id,
                warehouse: warehouse_code,
                available,
                requested,
            },
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::ValidationError(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::DatabaseTransactionError(msg) => ApiError::TransactionError(msg),
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::DatabaseError(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::DatabaseError(format!("外键约束违反: {}", msg))
            }
            RepositoryError::CheckConstraintViolation(msg) => {
                ApiError::DatabaseError(format!("检查约束违反: {}", msg))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::InternalError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 错误响应（返回给展示层）
// ==========================================

/// 错误响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 是否可重试
    pub retryable: bool,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            retryable: err.is_retryable(),
            details: match err {
                ApiError::InsufficientStock {
                    product_id,
                    warehouse,
                    available,
                    requested,
                } => Some(serde_json::json!({
                    "product_id": product_id,
                    "warehouse": warehouse,
                    "available": available,
                    "requested": requested,
                })),
                _ => None,
            },
        }
    }
}
