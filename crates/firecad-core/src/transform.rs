//! 几何变换与包围盒
//!
//! 平移、旋转、缩放、镜像的纯函数实现，点级和图元级各一套。
//! 图元级变换返回新值，从不原地修改。

use crate::error::GeometryError;
use crate::geometry::{Arc, Circle, Geometry, Point, Segment};
use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};

/// 平移点
#[inline]
pub fn translate_point(p: &Point2, delta: &Vector2) -> Point2 {
    p + delta
}

/// 绕 about 旋转点（弧度，逆时针）
pub fn rotate_point(p: &Point2, angle: f64, about: &Point2) -> Point2 {
    let (sin, cos) = angle.sin_cos();
    let v = p - about;
    Point2::new(
        about.x + v.x * cos - v.y * sin,
        about.y + v.x * sin + v.y * cos,
    )
}

/// 以 about 为中心缩放点
#[inline]
pub fn scale_point(p: &Point2, factor: f64, about: &Point2) -> Point2 {
    about + (p - about) * factor
}

/// 以线段所在直线为轴镜像点
pub fn mirror_point(p: &Point2, axis: &Segment) -> Point2 {
    let d = axis.direction();
    let w = p - axis.start;
    let foot = axis.start + d * w.dot(&d);
    foot + (foot - p)
}

/// 平移图元
pub fn translate(geometry: &Geometry, delta: &Vector2) -> Geometry {
    match geometry {
        Geometry::Point(p) => Geometry::Point(Point::from_point2(p.position + delta)),
        Geometry::Segment(s) => Geometry::Segment(Segment {
            start: s.start + delta,
            end: s.end + delta,
        }),
        Geometry::Circle(c) => Geometry::Circle(Circle {
            center: c.center + delta,
            radius: c.radius,
        }),
        Geometry::Arc(a) => Geometry::Arc(Arc {
            center: a.center + delta,
            ..*a
        }),
    }
}

/// 绕 about 旋转图元
pub fn rotate(geometry: &Geometry, angle: f64, about: &Point2) -> Geometry {
    match geometry {
        Geometry::Point(p) => {
            Geometry::Point(Point::from_point2(rotate_point(&p.position, angle, about)))
        }
        Geometry::Segment(s) => Geometry::Segment(Segment {
            start: rotate_point(&s.start, angle, about),
            end: rotate_point(&s.end, angle, about),
        }),
        Geometry::Circle(c) => Geometry::Circle(Circle {
            center: rotate_point(&c.center, angle, about),
            radius: c.radius,
        }),
        Geometry::Arc(a) => Geometry::Arc(Arc {
            center: rotate_point(&a.center, angle, about),
            radius: a.radius,
            start_angle: a.start_angle + angle,
            end_angle: a.end_angle + angle,
        }),
    }
}

/// 以 about 为中心缩放图元
///
/// 结果经校验构造函数重建：因子本身合法但把线段长度或圆/弧半径
/// 压到容差以下时，同样返回 `DegenerateGeometry`，不会产出退化值。
/// 负因子等价于缩放加点对称（圆弧角度偏移 π）。
pub fn scale(geometry: &Geometry, factor: f64, about: &Point2) -> Result<Geometry, GeometryError> {
    if factor.abs() <= EPSILON {
        return Err(GeometryError::DegenerateGeometry(format!(
            "scale factor {} collapses geometry",
            factor
        )));
    }

    Ok(match geometry {
        Geometry::Point(p) => {
            Geometry::Point(Point::from_point2(scale_point(&p.position, factor, about)))
        }
        Geometry::Segment(s) => Geometry::Segment(Segment::new(
            scale_point(&s.start, factor, about),
            scale_point(&s.end, factor, about),
        )?),
        Geometry::Circle(c) => Geometry::Circle(Circle::new(
            scale_point(&c.center, factor, about),
            c.radius * factor.abs(),
        )?),
        Geometry::Arc(a) => {
            let offset = if factor < 0.0 { std::f64::consts::PI } else { 0.0 };
            Geometry::Arc(Arc::new(
                scale_point(&a.center, factor, about),
                a.radius * factor.abs(),
                a.start_angle + offset,
                a.end_angle + offset,
            )?)
        }
    })
}

/// 以线段所在直线为轴镜像图元
///
/// 镜像反转圆弧方向，交换起止角以维持逆时针扫掠的表示约定。
pub fn mirror(geometry: &Geometry, axis: &Segment) -> Geometry {
    match geometry {
        Geometry::Point(p) => {
            Geometry::Point(Point::from_point2(mirror_point(&p.position, axis)))
        }
        Geometry::Segment(s) => Geometry::Segment(Segment {
            start: mirror_point(&s.start, axis),
            end: mirror_point(&s.end, axis),
        }),
        Geometry::Circle(c) => Geometry::Circle(Circle {
            center: mirror_point(&c.center, axis),
            radius: c.radius,
        }),
        Geometry::Arc(a) => {
            let d = axis.direction();
            let axis_angle = d.y.atan2(d.x);
            Geometry::Arc(Arc {
                center: mirror_point(&a.center, axis),
                radius: a.radius,
                start_angle: 2.0 * axis_angle - a.end_angle,
                end_angle: 2.0 * axis_angle - a.start_angle,
            })
        }
    }
}

/// 实体集合的总包围盒
///
/// 空集合返回 None。弧的包围盒包含象限极值点（见 Arc::bounding_box）。
pub fn bounding_box(entities: &[Geometry]) -> Option<BoundingBox2> {
    let mut iter = entities.iter();
    let first = iter.next()?.bounding_box();
    Some(iter.fold(first, |acc, g| acc.union(&g.bounding_box())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{almost_equal_eps, distance};

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point2::new(x1, y1), Point2::new(x2, y2)).unwrap()
    }

    #[test]
    fn test_rotate_point_quarter_turn() {
        let p = rotate_point(
            &Point2::new(1.0, 0.0),
            std::f64::consts::FRAC_PI_2,
            &Point2::origin(),
        );
        assert!(almost_equal_eps(p.x, 0.0));
        assert!(almost_equal_eps(p.y, 1.0));
    }

    #[test]
    fn test_rotate_about_offset_center() {
        let p = rotate_point(
            &Point2::new(2.0, 1.0),
            std::f64::consts::PI,
            &Point2::new(1.0, 1.0),
        );
        assert!(almost_equal_eps(p.x, 0.0));
        assert!(almost_equal_eps(p.y, 1.0));
    }

    #[test]
    fn test_scale_point() {
        let p = scale_point(&Point2::new(3.0, 0.0), 2.0, &Point2::new(1.0, 0.0));
        assert!(almost_equal_eps(p.x, 5.0));
    }

    #[test]
    fn test_mirror_point_across_x_axis() {
        let axis = seg(0.0, 0.0, 10.0, 0.0);
        let p = mirror_point(&Point2::new(3.0, 4.0), &axis);
        assert!(almost_equal_eps(p.x, 3.0));
        assert!(almost_equal_eps(p.y, -4.0));
    }

    #[test]
    fn test_mirror_point_diagonal_axis() {
        // 以 y=x 为轴，(a,b) -> (b,a)
        let axis = seg(0.0, 0.0, 1.0, 1.0);
        let p = mirror_point(&Point2::new(5.0, 2.0), &axis);
        assert!(almost_equal_eps(p.x, 2.0));
        assert!(almost_equal_eps(p.y, 5.0));
    }

    #[test]
    fn test_scale_rejects_zero_factor() {
        let g = Geometry::Segment(seg(0.0, 0.0, 1.0, 0.0));
        assert!(scale(&g, 0.0, &Point2::origin()).is_err());
    }

    #[test]
    fn test_scale_rejects_collapsing_result() {
        // 因子合法，但结果跌破非退化不变量
        let g = Geometry::Segment(seg(0.0, 0.0, 1e-3, 0.0));
        let result = scale(&g, 1e-4, &Point2::origin());
        assert!(matches!(result, Err(GeometryError::DegenerateGeometry(_))));

        let c = Geometry::Circle(Circle::new(Point2::origin(), 1e-3).unwrap());
        assert!(scale(&c, 1e-4, &Point2::origin()).is_err());
    }

    #[test]
    fn test_scale_circle() {
        let g = Geometry::Circle(Circle::new(Point2::new(2.0, 0.0), 1.0).unwrap());
        let scaled = scale(&g, 3.0, &Point2::origin()).unwrap();
        match scaled {
            Geometry::Circle(c) => {
                assert!(almost_equal_eps(c.center.x, 6.0));
                assert!(almost_equal_eps(c.radius, 3.0));
            }
            _ => panic!("expected circle"),
        }
    }

    #[test]
    fn test_mirror_arc_keeps_ccw_geometry() {
        // 右半圆绕 y 轴镜像成左半圆，端点集合对应镜像
        let arc = Arc::new(
            Point2::origin(),
            1.0,
            -std::f64::consts::FRAC_PI_2,
            std::f64::consts::FRAC_PI_2,
        )
        .unwrap();
        let axis = seg(0.0, -1.0, 0.0, 1.0);
        let mirrored = match mirror(&Geometry::Arc(arc), &axis) {
            Geometry::Arc(a) => a,
            _ => panic!("expected arc"),
        };

        // 镜像后仍是半圆，且经过 (-1, 0)
        assert!(almost_equal_eps(mirrored.sweep_angle(), std::f64::consts::PI));
        assert!(mirrored.contains_angle(std::f64::consts::PI));
        let expected_start = mirror_point(&arc.end_point(), &axis);
        assert!(distance(&mirrored.start_point(), &expected_start) < EPSILON);
    }

    #[test]
    fn test_rotate_arc_moves_angles() {
        let arc = Arc::new(Point2::origin(), 2.0, 0.0, std::f64::consts::FRAC_PI_2).unwrap();
        let rotated = match rotate(
            &Geometry::Arc(arc),
            std::f64::consts::FRAC_PI_2,
            &Point2::origin(),
        ) {
            Geometry::Arc(a) => a,
            _ => panic!("expected arc"),
        };
        assert!(almost_equal_eps(rotated.sweep_angle(), std::f64::consts::FRAC_PI_2));
        assert!(distance(&rotated.start_point(), &Point2::new(0.0, 2.0)) < EPSILON);
    }

    #[test]
    fn test_bounding_box_of_entities() {
        let entities = vec![
            Geometry::Segment(seg(0.0, 0.0, 4.0, 1.0)),
            Geometry::Circle(Circle::new(Point2::new(10.0, 0.0), 2.0).unwrap()),
            Geometry::Point(Point::new(-3.0, -3.0)),
        ];
        let bbox = bounding_box(&entities).unwrap();
        assert!(almost_equal_eps(bbox.min.x, -3.0));
        assert!(almost_equal_eps(bbox.min.y, -3.0));
        assert!(almost_equal_eps(bbox.max.x, 12.0));
        assert!(almost_equal_eps(bbox.max.y, 2.0));
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(bounding_box(&[]).is_none());
    }
}
