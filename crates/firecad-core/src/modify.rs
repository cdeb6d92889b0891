//! 修剪与延伸
//!
//! 对线段的两个修改操作：
//! - `trim`: 把远离锚点的端点收缩到最近的有效切割交点
//! - `extend`: 把指定端点沿线段方向推进到最近的边界交点
//!
//! 两者都是纯函数，输入输出均为值；候选交点的平局
//! 按切割体在输入列表中的下标（最小优先）打破，保证确定性。

use crate::error::GeometryError;
use crate::geometry::{Circle, Segment};
use crate::intersect::{line_circle, line_line_params};
use crate::math::{distance, Point2, EPSILON};
use serde::{Deserialize, Serialize};

/// 切割/边界对象：修剪和延伸接受的两类几何
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cutter {
    Segment(Segment),
    Circle(Circle),
}

impl From<Segment> for Cutter {
    fn from(s: Segment) -> Self {
        Cutter::Segment(s)
    }
}

impl From<Circle> for Cutter {
    fn from(c: Circle) -> Self {
        Cutter::Circle(c)
    }
}

/// 锚点吸附：返回 (锚定端点, 另一端点, 锚点是否为 start)
fn resolve_anchor(segment: &Segment, anchor: &Point2) -> (Point2, Point2, bool) {
    if distance(anchor, &segment.start) <= distance(anchor, &segment.end) {
        (segment.start, segment.end, true)
    } else {
        (segment.end, segment.start, false)
    }
}

/// 收集线段所在直线与单个切割体的交点
///
/// 切割线段按其有界范围参与（超出切割体的"交点"不是切割点）；
/// 圆始终按完整圆参与。
fn cutter_intersections(subject: &Segment, cutter: &Cutter) -> Vec<Point2> {
    match cutter {
        Cutter::Segment(c) => match line_line_params(subject, c) {
            Some((t1, t2)) if t2 >= -EPSILON && t2 <= 1.0 + EPSILON => {
                vec![subject.start + (subject.end - subject.start) * t1]
            }
            _ => vec![],
        },
        Cutter::Circle(c) => line_circle(subject, c),
    }
}

/// 修剪线段
///
/// 在线段所在直线与 `cutters` 的所有交点中，只保留严格位于
/// 锚点与远端点之间（或恰在远端点上）的候选，选出离远端点最近的
/// 一个，用它替换远端点。容差内的平局取列表中下标最小的切割体。
///
/// 没有任何有效交点时返回 `NoIntersection`。
pub fn trim(
    segment: &Segment,
    cutters: &[Cutter],
    anchor: &Point2,
) -> Result<Segment, GeometryError> {
    let (anchor_pt, far_pt, anchor_is_start) = resolve_anchor(segment, anchor);
    let reach = distance(&anchor_pt, &far_pt);
    let dir = (far_pt - anchor_pt) / reach;

    // 离远端点最近 == 沿锚点方向的弧长参数最大
    let mut best: Option<(f64, Point2)> = None;
    for cutter in cutters {
        for p in cutter_intersections(segment, cutter) {
            let s = (p - anchor_pt).dot(&dir);
            if s <= EPSILON || s > reach + EPSILON {
                continue;
            }
            let better = match &best {
                Some((best_s, _)) => s > best_s + EPSILON,
                None => true,
            };
            if better {
                best = Some((s, p));
            }
        }
    }

    let (_, cut) = best.ok_or_else(|| {
        GeometryError::NoIntersection("no cutter intersects the segment".to_string())
    })?;

    if anchor_is_start {
        Segment::new(segment.start, cut)
    } else {
        Segment::new(cut, segment.end)
    }
}

/// 延伸线段
///
/// 沿线段方向越过 `anchor_end` 搜索与任一边界的最近交点
/// （边界线段按无限直线参与，圆按圆本身参与），用它替换
/// `anchor_end`。搜索距离不设上限，由调用方给定的有限边界列表约束。
///
/// 方向上没有任何交点时返回 `NoIntersection`。
pub fn extend(
    segment: &Segment,
    boundaries: &[Cutter],
    anchor_end: &Point2,
) -> Result<Segment, GeometryError> {
    // 这里的锚定端点是被移动的一端，另一端保持不动
    let (moving_pt, fixed_pt, moving_is_start) = resolve_anchor(segment, anchor_end);
    let len = distance(&fixed_pt, &moving_pt);
    let dir = (moving_pt - fixed_pt) / len;

    let mut best: Option<(f64, Point2)> = None;
    for boundary in boundaries {
        let candidates = match boundary {
            // 延伸目标按无限直线对待
            Cutter::Segment(b) => match line_line_params(segment, b) {
                Some((t1, _)) => vec![segment.start + (segment.end - segment.start) * t1],
                None => vec![],
            },
            Cutter::Circle(c) => line_circle(segment, c),
        };

        for p in candidates {
            let s = (p - fixed_pt).dot(&dir);
            // 只接受越过被移动端点的交点
            if s <= len + EPSILON {
                continue;
            }
            let better = match &best {
                Some((best_s, _)) => s < best_s - EPSILON,
                None => true,
            };
            if better {
                best = Some((s, p));
            }
        }
    }

    let (_, target) = best.ok_or_else(|| {
        GeometryError::NoIntersection("no boundary ahead of the extended end".to_string())
    })?;

    if moving_is_start {
        Segment::new(target, segment.end)
    } else {
        Segment::new(segment.start, target)
    }
}
