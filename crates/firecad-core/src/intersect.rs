//! 求交运算
//!
//! 线段/直线、直线-圆、圆-圆的纯求交函数。
//! 所有"无交点"的情形都是合法输出（返回 None / 空集），不是错误。
//!
//! 约定：以 Segment 的 start→end 参数化其所在直线，
//! t=0 在 start，t=1 在 end；"直线"变体忽略 [0,1] 的范围检查。

use crate::geometry::{Arc, Circle, Geometry, Segment};
use crate::math::{cross, Point2, EPSILON};

/// 两线段所在直线的交点参数 (t1, t2)
///
/// 行列式（方向叉积）的绝对值小于 EPSILON 视为平行/共线，返回 None。
pub(crate) fn line_line_params(s1: &Segment, s2: &Segment) -> Option<(f64, f64)> {
    let d1 = s1.end - s1.start;
    let d2 = s2.end - s2.start;

    let det = cross(&d1, &d2);
    if det.abs() < EPSILON {
        return None;
    }

    let w = s2.start - s1.start;
    let t1 = cross(&w, &d2) / det;
    let t2 = cross(&w, &d1) / det;
    Some((t1, t2))
}

/// 两线段所在无限直线的交点
///
/// 平行/共线返回 None；供修剪/延伸使用。
pub fn line_line(s1: &Segment, s2: &Segment) -> Option<Point2> {
    let (t1, _) = line_line_params(s1, s2)?;
    Some(s1.start + (s1.end - s1.start) * t1)
}

/// 两线段的交点（有界）
///
/// - 一般情形：交点参数 t1, t2 都落在 [0-EPS, 1+EPS] 内才算相交；
/// - 平行不共线：None；
/// - 共线重叠：重叠长度 > EPSILON 时返回重叠区间的中点，否则 None。
///   （单点语义是本内核的既定选择，调用方若需要完整重叠区间需另行扩展。）
pub fn segment_segment(s1: &Segment, s2: &Segment) -> Option<Point2> {
    match line_line_params(s1, s2) {
        Some((t1, t2)) => {
            if t1 >= -EPSILON && t1 <= 1.0 + EPSILON && t2 >= -EPSILON && t2 <= 1.0 + EPSILON {
                Some(s1.start + (s1.end - s1.start) * t1)
            } else {
                None
            }
        }
        None => collinear_overlap_midpoint(s1, s2),
    }
}

/// 共线重叠区间的中点
fn collinear_overlap_midpoint(s1: &Segment, s2: &Segment) -> Option<Point2> {
    let dir = s1.direction();
    let len1 = s1.length();

    // 平行但不共线：s2.start 到 s1 所在直线的距离超出容差
    let w = s2.start - s1.start;
    if cross(&dir, &w).abs() > EPSILON {
        return None;
    }

    // 把 s2 的端点投影到 s1 的弧长参数上
    let ta = w.dot(&dir);
    let tb = (s2.end - s1.start).dot(&dir);
    let (lo2, hi2) = if ta <= tb { (ta, tb) } else { (tb, ta) };

    let lo = lo2.max(0.0);
    let hi = hi2.min(len1);
    if hi - lo <= EPSILON {
        return None;
    }

    Some(s1.start + dir * ((lo + hi) / 2.0))
}

/// 线段所在直线与圆的交点（0、1 或 2 个）
///
/// 标准的参数化二次方程求解：
/// - 判别式 < -EPSILON：无交点；
/// - |判别式| <= EPSILON：相切，单交点；
/// - 否则两个交点，按直线参数递增排序。
pub fn line_circle(seg: &Segment, circle: &Circle) -> Vec<Point2> {
    let d = seg.end - seg.start;
    let f = seg.start - circle.center;

    let a = d.dot(&d);
    let b = 2.0 * f.dot(&d);
    let c = f.dot(&f) - circle.radius * circle.radius;

    let discriminant = b * b - 4.0 * a * c;

    if discriminant < -EPSILON {
        return vec![];
    }

    if discriminant.abs() <= EPSILON {
        // 相切
        let t = -b / (2.0 * a);
        return vec![seg.start + d * t];
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    vec![seg.start + d * t1, seg.start + d * t2]
}

/// 圆-圆交点（0、1 或 2 个）
///
/// 根轴构造。圆心距 d 的判定都带 EPSILON 容差：
/// - 同心（d < EPSILON，含半径相等的无穷解情形）：空集；
/// - 相离（d > r1 + r2 + EPSILON）：空集；
/// - 内含（d < |r1 - r2| - EPSILON）：空集。
pub fn circle_circle(c1: &Circle, c2: &Circle) -> Vec<Point2> {
    let delta = c2.center - c1.center;
    let d = delta.norm();

    if d < EPSILON
        || d > c1.radius + c2.radius + EPSILON
        || d < (c1.radius - c2.radius).abs() - EPSILON
    {
        return vec![];
    }

    let a = (c1.radius * c1.radius - c2.radius * c2.radius + d * d) / (2.0 * d);
    // 切点附近 h² 可能因舍入略小于零
    let h2 = (c1.radius * c1.radius - a * a).max(0.0);
    let h = h2.sqrt();

    let dir = delta / d;
    let p = c1.center + dir * a;

    if h < EPSILON {
        // 相切
        return vec![p];
    }

    let perp = crate::math::perpendicular(&dir);
    vec![p + perp * h, p - perp * h]
}

/// 两个图元实体的交点
///
/// 以实体自身的有界范围计算（线段取 [0,1] 参数段，弧取扫掠范围）。
/// 点参与的组合恒为空集。
pub fn geometry_geometry(g1: &Geometry, g2: &Geometry) -> Vec<Point2> {
    match (g1, g2) {
        (Geometry::Segment(s1), Geometry::Segment(s2)) => {
            segment_segment(s1, s2).into_iter().collect()
        }
        (Geometry::Segment(seg), Geometry::Circle(circle))
        | (Geometry::Circle(circle), Geometry::Segment(seg)) => {
            segment_circle(seg, circle)
        }
        (Geometry::Circle(c1), Geometry::Circle(c2)) => circle_circle(c1, c2),
        (Geometry::Segment(seg), Geometry::Arc(arc))
        | (Geometry::Arc(arc), Geometry::Segment(seg)) => {
            let circle = Circle {
                center: arc.center,
                radius: arc.radius,
            };
            segment_circle(seg, &circle)
                .into_iter()
                .filter(|p| arc_contains_point(arc, p))
                .collect()
        }
        (Geometry::Circle(circle), Geometry::Arc(arc))
        | (Geometry::Arc(arc), Geometry::Circle(circle)) => {
            let full = Circle {
                center: arc.center,
                radius: arc.radius,
            };
            circle_circle(circle, &full)
                .into_iter()
                .filter(|p| arc_contains_point(arc, p))
                .collect()
        }
        (Geometry::Arc(a1), Geometry::Arc(a2)) => {
            let f1 = Circle {
                center: a1.center,
                radius: a1.radius,
            };
            let f2 = Circle {
                center: a2.center,
                radius: a2.radius,
            };
            circle_circle(&f1, &f2)
                .into_iter()
                .filter(|p| arc_contains_point(a1, p) && arc_contains_point(a2, p))
                .collect()
        }
        _ => vec![],
    }
}

/// 线段（有界）与圆的交点
fn segment_circle(seg: &Segment, circle: &Circle) -> Vec<Point2> {
    let len = seg.length();
    let dir = seg.direction();
    line_circle(seg, circle)
        .into_iter()
        .filter(|p| {
            let t = (p - seg.start).dot(&dir) / len;
            t >= -EPSILON && t <= 1.0 + EPSILON
        })
        .collect()
}

/// 检查交点是否落在弧的扫掠范围内
fn arc_contains_point(arc: &Arc, point: &Point2) -> bool {
    let angle = (point.y - arc.center.y).atan2(point.x - arc.center.x);
    arc.contains_angle(angle)
}
