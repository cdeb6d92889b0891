//! FireCAD 会话层
//!
//! 在 `firecad-core` 几何内核之上提供：
//! - `Repository`: 单会话的内存实体仓库（稳定 id、按值替换）
//! - `OpsService`: 面向外部调用方的编排边界
//!
//! 层内单线程、同步、无 I/O；并发共享由调用方负责串行化。

pub mod entity;
pub mod error;
pub mod repository;
pub mod service;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::entity::{EntityKind, EntityRef};
    pub use crate::error::OpsError;
    pub use crate::repository::Repository;
    pub use crate::service::OpsService;
}
