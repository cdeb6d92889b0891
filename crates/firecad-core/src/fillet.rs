//! 圆角
//!
//! 用给定半径的切圆弧替换两条线段的尖角：
//! 沿两条线确定与内角一致的圆心（角平分线方向），把圆心垂直投影回
//! 两条原线得到切点，再把两条线段修剪到各自的切点。

use crate::error::GeometryError;
use crate::geometry::{Arc, Segment};
use crate::intersect::line_line_params;
use crate::math::{distance, try_normalize, Point2, Vector2, EPSILON};

/// 圆角结果：圆弧和两条被修剪的线段
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilletResult {
    pub arc: Arc,
    pub seg1: Segment,
    pub seg2: Segment,
}

/// 单条线段相对角点的姿态：远离角点的单位方向与可用长度
struct CornerLeg {
    away: Vector2,
    /// 角点到远端点的可用长度
    available: f64,
}

fn corner_leg(segment: &Segment, corner: &Point2) -> Result<CornerLeg, GeometryError> {
    let far_pt = if distance(corner, &segment.start) <= distance(corner, &segment.end) {
        segment.end
    } else {
        segment.start
    };
    let away = try_normalize(&(far_pt - corner))?;
    Ok(CornerLeg {
        away,
        available: distance(corner, &far_pt),
    })
}

/// 两条线段之间的圆角
///
/// 失败情形：
/// - `InvalidRadius`: 半径 <= EPSILON，或切点落到任一线段的
///   远端点之外（可用长度不足）；
/// - `AmbiguousFillet`: 两条输入线平行/共线，角点不唯一。
pub fn fillet_corner(
    seg1: &Segment,
    seg2: &Segment,
    radius: f64,
) -> Result<FilletResult, GeometryError> {
    if radius <= EPSILON {
        return Err(GeometryError::InvalidRadius(format!(
            "fillet radius {} is not positive",
            radius
        )));
    }

    // 角点：两条线所在直线的交点
    let (t1, _) = line_line_params(seg1, seg2).ok_or_else(|| {
        GeometryError::AmbiguousFillet("input segments are parallel or collinear".to_string())
    })?;
    let corner = seg1.start + (seg1.end - seg1.start) * t1;

    let leg1 = corner_leg(seg1, &corner)?;
    let leg2 = corner_leg(seg2, &corner)?;

    // 角平分线方向与半角余弦
    let bisector = try_normalize(&(leg1.away + leg2.away)).map_err(|_| {
        GeometryError::AmbiguousFillet("segments meet at a straight angle".to_string())
    })?;
    let cos_half = leg1.away.dot(&bisector);
    let sin_half = (1.0 - cos_half * cos_half).max(0.0).sqrt();
    if sin_half < EPSILON {
        return Err(GeometryError::AmbiguousFillet(
            "segments are nearly parallel at the corner".to_string(),
        ));
    }

    // 圆心在角平分线上，距角点 radius / sin(半角)；
    // 切点沿各自的线退回 radius / tan(半角)
    let center_dist = radius / sin_half;
    let tangent_dist = center_dist * cos_half;

    if tangent_dist >= leg1.available - EPSILON || tangent_dist >= leg2.available - EPSILON {
        return Err(GeometryError::InvalidRadius(format!(
            "fillet radius {} does not fit on the segments",
            radius
        )));
    }

    let center = corner + bisector * center_dist;
    let tangent1 = corner + leg1.away * tangent_dist;
    let tangent2 = corner + leg2.away * tangent_dist;

    // 圆弧取经过内角一侧的短弧，保持逆时针表示
    let a1 = (tangent1.y - center.y).atan2(tangent1.x - center.x);
    let a2 = (tangent2.y - center.y).atan2(tangent2.x - center.x);
    let two_pi = 2.0 * std::f64::consts::PI;
    let mut sweep = a2 - a1;
    while sweep < 0.0 {
        sweep += two_pi;
    }
    let (start_angle, end_angle) = if sweep <= std::f64::consts::PI {
        (a1, a2)
    } else {
        (a2, a1)
    };
    let arc = Arc::new(center, radius, start_angle, end_angle)?;

    // 把靠近角点的端点替换为切点，保留另一端
    let seg1_new = replace_corner_end(seg1, &corner, tangent1)?;
    let seg2_new = replace_corner_end(seg2, &corner, tangent2)?;

    Ok(FilletResult {
        arc,
        seg1: seg1_new,
        seg2: seg2_new,
    })
}

fn replace_corner_end(
    segment: &Segment,
    corner: &Point2,
    tangent: Point2,
) -> Result<Segment, GeometryError> {
    if distance(corner, &segment.start) <= distance(corner, &segment.end) {
        Segment::new(tangent, segment.end)
    } else {
        Segment::new(segment.start, tangent)
    }
}
