// ==========================================
// PLG 线索评分门户 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository/Config错误为用户可读的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置无效: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// 是否为调用方输入问题（HTTP 400）
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::InvalidInput(_))
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
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DatabaseError(format!("字段{}错误: {}", field, message))
            }
        }
    }
}

// ==========================================
// 从 ConfigError 转换
// ==========================================
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Storage(e) => ApiError::DatabaseError(e.to_string()),
            ConfigError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            other => ApiError::InvalidConfig(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_mapping() {
        let err: ApiError = RepositoryError::DatabaseQueryError("no such table".into()).into();
        assert!(matches!(err, ApiError::DatabaseError(_)));

        let err: ApiError = RepositoryError::LockError("poisoned".into()).into();
        match err {
            ApiError::DatabaseConnectionError(msg) => assert!(msg.contains("poisoned")),
            other => panic!("Expected DatabaseConnectionError, got {:?}", other),
        }
    }

    #[test]
    fn test_config_error_mapping() {
        let err: ApiError = ConfigError::WeightSumMismatch { total_bp: 9_000 }.into();
        match err {
            ApiError::InvalidConfig(msg) => assert!(msg.contains("9000")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_only_invalid_input_is_client_error() {
        assert!(ApiError::InvalidInput("users".into()).is_client_error());
        assert!(!ApiError::DatabaseError("db".into()).is_client_error());
    }
}
