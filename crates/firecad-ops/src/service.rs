//! 操作服务
//!
//! 内核之上的薄编排层，也是外部调用方（UI/CLI/后端）唯一的入口：
//! 入参都是平面几何值，出参是平面值或实体引用。
//!
//! 约定：
//! - 每个操作先解析全部引用，再做几何计算，最后才写仓库，
//!   任何一步失败都不会留下半成品（全有或全无）；
//! - 服务不重试、不记录错误，错误种类原样返回给调用方。

use crate::entity::{EntityKind, EntityRef};
use crate::error::OpsError;
use crate::repository::Repository;
use firecad_core::fillet::fillet_corner;
use firecad_core::geometry::{Circle, Geometry, Point, Segment};
use firecad_core::intersect::geometry_geometry;
use firecad_core::math::{BoundingBox2, Point2, Vector2};
use firecad_core::modify::{extend, trim, Cutter};
use firecad_core::transform;
use tracing::debug;

/// 操作服务
///
/// 持有一个仓库实例，对应一个编辑会话/文档；
/// 没有进程级单例，由调用方构造和拥有。
#[derive(Debug, Default)]
pub struct OpsService {
    repo: Repository,
}

impl OpsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接管一个已有仓库（如从持久化层重建的会话）
    pub fn with_repository(repo: Repository) -> Self {
        Self { repo }
    }

    /// 只读访问仓库
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// 取出仓库，结束会话
    pub fn into_repository(self) -> Repository {
        self.repo
    }

    // ========== 创建 ==========

    /// 创建点实体
    pub fn create_point(&mut self, x: f64, y: f64) -> EntityRef {
        let entity_ref = self.repo.create(Geometry::Point(Point::new(x, y)));
        debug!(id = entity_ref.id, "created point");
        entity_ref
    }

    /// 创建线段实体
    pub fn create_segment(&mut self, start: Point2, end: Point2) -> Result<EntityRef, OpsError> {
        let segment = Segment::new(start, end)?;
        let entity_ref = self.repo.create(Geometry::Segment(segment));
        debug!(id = entity_ref.id, "created segment");
        Ok(entity_ref)
    }

    /// 创建圆实体
    pub fn create_circle(&mut self, center: Point2, radius: f64) -> Result<EntityRef, OpsError> {
        let circle = Circle::new(center, radius)?;
        let entity_ref = self.repo.create(Geometry::Circle(circle));
        debug!(id = entity_ref.id, "created circle");
        Ok(entity_ref)
    }

    /// 删除实体
    pub fn delete(&mut self, entity_ref: &EntityRef) -> Result<(), OpsError> {
        self.repo.delete(entity_ref)?;
        debug!(id = entity_ref.id, "deleted entity");
        Ok(())
    }

    /// 按创建顺序列举实体
    pub fn list(&self, kind_filter: Option<EntityKind>) -> Vec<(EntityRef, &Geometry)> {
        self.repo.list(kind_filter)
    }

    // ========== 修改 ==========

    /// 修剪线段实体
    ///
    /// 解析切割体引用后调用内核 `trim`，按 id 替换仓库中的值，
    /// 返回同一个引用。切割体按 id 升序参与，实现"平局取最小 id"。
    pub fn trim(
        &mut self,
        entity_ref: &EntityRef,
        cutter_refs: &[EntityRef],
        anchor: Point2,
    ) -> Result<EntityRef, OpsError> {
        let segment = self.resolve_segment(entity_ref)?;
        let cutters = self.resolve_cutters(cutter_refs)?;

        let trimmed = trim(&segment, &cutters, &anchor)?;
        let updated = self.repo.update(entity_ref, Geometry::Segment(trimmed))?;
        debug!(id = updated.id, "trimmed segment");
        Ok(updated)
    }

    /// 延伸线段实体
    pub fn extend(
        &mut self,
        entity_ref: &EntityRef,
        boundary_refs: &[EntityRef],
        anchor_end: Point2,
    ) -> Result<EntityRef, OpsError> {
        let segment = self.resolve_segment(entity_ref)?;
        let boundaries = self.resolve_cutters(boundary_refs)?;

        let extended = extend(&segment, &boundaries, &anchor_end)?;
        let updated = self.repo.update(entity_ref, Geometry::Segment(extended))?;
        debug!(id = updated.id, "extended segment");
        Ok(updated)
    }

    /// 两条线段实体之间的圆角
    ///
    /// 成功时创建圆弧实体并替换两条线段，
    /// 返回 (圆弧引用, 线段1引用, 线段2引用)。
    pub fn fillet_corner(
        &mut self,
        ref1: &EntityRef,
        ref2: &EntityRef,
        radius: f64,
    ) -> Result<(EntityRef, EntityRef, EntityRef), OpsError> {
        let seg1 = self.resolve_segment(ref1)?;
        let seg2 = self.resolve_segment(ref2)?;

        let result = fillet_corner(&seg1, &seg2, radius)?;

        let arc_ref = self.repo.create(Geometry::Arc(result.arc));
        let ref1 = self.repo.update(ref1, Geometry::Segment(result.seg1))?;
        let ref2 = self.repo.update(ref2, Geometry::Segment(result.seg2))?;
        debug!(
            arc = arc_ref.id,
            seg1 = ref1.id,
            seg2 = ref2.id,
            "filleted corner"
        );
        Ok((arc_ref, ref1, ref2))
    }

    // ========== 变换 ==========

    /// 平移实体
    pub fn translate(
        &mut self,
        entity_ref: &EntityRef,
        delta: Vector2,
    ) -> Result<EntityRef, OpsError> {
        let moved = transform::translate(self.repo.get(entity_ref)?, &delta);
        let updated = self.repo.update(entity_ref, moved)?;
        debug!(id = updated.id, "translated entity");
        Ok(updated)
    }

    /// 绕指定点旋转实体
    pub fn rotate(
        &mut self,
        entity_ref: &EntityRef,
        angle: f64,
        about: Point2,
    ) -> Result<EntityRef, OpsError> {
        let rotated = transform::rotate(self.repo.get(entity_ref)?, angle, &about);
        let updated = self.repo.update(entity_ref, rotated)?;
        debug!(id = updated.id, "rotated entity");
        Ok(updated)
    }

    /// 以指定点为中心缩放实体
    pub fn scale(
        &mut self,
        entity_ref: &EntityRef,
        factor: f64,
        about: Point2,
    ) -> Result<EntityRef, OpsError> {
        let scaled = transform::scale(self.repo.get(entity_ref)?, factor, &about)?;
        let updated = self.repo.update(entity_ref, scaled)?;
        debug!(id = updated.id, "scaled entity");
        Ok(updated)
    }

    /// 以线段为轴镜像实体
    pub fn mirror(
        &mut self,
        entity_ref: &EntityRef,
        axis: Segment,
    ) -> Result<EntityRef, OpsError> {
        let mirrored = transform::mirror(self.repo.get(entity_ref)?, &axis);
        let updated = self.repo.update(entity_ref, mirrored)?;
        debug!(id = updated.id, "mirrored entity");
        Ok(updated)
    }

    // ========== 查询（无仓库写入） ==========

    /// 两个实体的交点
    pub fn intersections(
        &self,
        ref1: &EntityRef,
        ref2: &EntityRef,
    ) -> Result<Vec<Point2>, OpsError> {
        let g1 = self.repo.get(ref1)?;
        let g2 = self.repo.get(ref2)?;
        Ok(geometry_geometry(g1, g2))
    }

    /// 一组实体的总包围盒（空集合为 None）
    pub fn bounding_box(
        &self,
        refs: &[EntityRef],
    ) -> Result<Option<BoundingBox2>, OpsError> {
        let entities = refs
            .iter()
            .map(|r| self.repo.get(r).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(transform::bounding_box(&entities))
    }

    // ========== 引用解析 ==========

    fn resolve_segment(&self, entity_ref: &EntityRef) -> Result<Segment, OpsError> {
        match self.repo.get(entity_ref)? {
            Geometry::Segment(s) => Ok(*s),
            _ => Err(OpsError::KindMismatch {
                id: entity_ref.id,
                expected: EntityKind::Segment,
            }),
        }
    }

    /// 解析切割体引用，按 id 升序排列（平局裁决用）
    fn resolve_cutters(&self, refs: &[EntityRef]) -> Result<Vec<Cutter>, OpsError> {
        let mut sorted: Vec<EntityRef> = refs.to_vec();
        sorted.sort_by_key(|r| r.id);

        sorted
            .iter()
            .map(|r| match self.repo.get(r)? {
                Geometry::Segment(s) => Ok(Cutter::Segment(*s)),
                Geometry::Circle(c) => Ok(Cutter::Circle(*c)),
                _ => Err(OpsError::KindMismatch {
                    id: r.id,
                    expected: EntityKind::Segment,
                }),
            })
            .collect()
    }
}
