//! 操作服务错误定义

use crate::entity::EntityKind;
use firecad_core::error::GeometryError;
use thiserror::Error;

/// 操作服务错误
///
/// 所有失败都是全有或全无的：返回错误的操作不会改动仓库。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// 引用无法解析到仓库中的实体
    #[error("entity not found: {0}")]
    NotFound(u64),

    /// 实体类型不符合操作要求（如对圆做修剪）
    #[error("entity {id} is not a {expected:?}")]
    KindMismatch { id: u64, expected: EntityKind },

    /// 内核几何错误
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
