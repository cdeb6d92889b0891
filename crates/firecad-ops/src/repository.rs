//! 实体仓库
//!
//! 单个编辑会话的内存实体存储：
//! - id 由单调递增计数器分配，删除后不复用
//! - 实体是不可变值，"修改"即按 id 整体替换
//! - 保留插入顺序，保证列举结果确定
//!
//! 仓库没有全局实例，由调用方显式构造并持有；
//! 多线程共享一个仓库时需要调用方自行串行化访问。

use crate::entity::{EntityKind, EntityRef};
use crate::error::OpsError;
use firecad_core::geometry::Geometry;
use std::collections::HashMap;

/// 实体仓库
#[derive(Debug, Clone, Default)]
pub struct Repository {
    /// 下一个待分配的 id
    next_id: u64,
    /// 创建顺序（按 id 递增）
    order: Vec<u64>,
    /// id -> 实体值
    entities: HashMap<u64, Geometry>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 存入新实体并分配引用
    pub fn create(&mut self, geometry: Geometry) -> EntityRef {
        let id = self.next_id;
        self.next_id += 1;

        let kind = EntityKind::from(&geometry);
        self.entities.insert(id, geometry);
        self.order.push(id);
        EntityRef::new(id, kind)
    }

    /// 按引用取实体
    pub fn get(&self, entity_ref: &EntityRef) -> Result<&Geometry, OpsError> {
        self.entities
            .get(&entity_ref.id)
            .ok_or(OpsError::NotFound(entity_ref.id))
    }

    /// 按 id 整体替换实体值
    ///
    /// id 不变；返回的引用带上替换后的类型标签。
    pub fn update(
        &mut self,
        entity_ref: &EntityRef,
        geometry: Geometry,
    ) -> Result<EntityRef, OpsError> {
        let slot = self
            .entities
            .get_mut(&entity_ref.id)
            .ok_or(OpsError::NotFound(entity_ref.id))?;
        let kind = EntityKind::from(&geometry);
        *slot = geometry;
        Ok(EntityRef::new(entity_ref.id, kind))
    }

    /// 删除实体；其 id 永不复用
    pub fn delete(&mut self, entity_ref: &EntityRef) -> Result<Geometry, OpsError> {
        let removed = self
            .entities
            .remove(&entity_ref.id)
            .ok_or(OpsError::NotFound(entity_ref.id))?;
        self.order.retain(|id| *id != entity_ref.id);
        Ok(removed)
    }

    /// 按创建顺序列举实体，可按类型过滤
    pub fn list(&self, kind_filter: Option<EntityKind>) -> Vec<(EntityRef, &Geometry)> {
        self.order
            .iter()
            .filter_map(|id| {
                let geometry = self.entities.get(id)?;
                let kind = EntityKind::from(geometry);
                if let Some(filter) = kind_filter {
                    if kind != filter {
                        return None;
                    }
                }
                Some((EntityRef::new(*id, kind), geometry))
            })
            .collect()
    }

    /// 实体数量
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// 检查仓库是否为空
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
