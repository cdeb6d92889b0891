//! 实体标识
//!
//! `EntityRef` 是仓库对外发放的不透明句柄：
//! id 由仓库内的单调递增计数器分配，删除后不复用，
//! 在仓库的生命周期内保持唯一。

use firecad_core::geometry::Geometry;
use serde::{Deserialize, Serialize};

/// 实体类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Point,
    Segment,
    Circle,
    Arc,
}

impl EntityKind {
    /// 获取类型名称
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Point => "Point",
            EntityKind::Segment => "Segment",
            EntityKind::Circle => "Circle",
            EntityKind::Arc => "Arc",
        }
    }
}

impl From<&Geometry> for EntityKind {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(_) => EntityKind::Point,
            Geometry::Segment(_) => EntityKind::Segment,
            Geometry::Circle(_) => EntityKind::Circle,
            Geometry::Arc(_) => EntityKind::Arc,
        }
    }
}

/// 实体引用：稳定 id 加类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: u64,
    pub kind: EntityKind,
}

impl EntityRef {
    pub fn new(id: u64, kind: EntityKind) -> Self {
        Self { id, kind }
    }
}
