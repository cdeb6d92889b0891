//! 操作服务端到端测试
//!
//! 覆盖典型绘图场景：求交、修剪、延伸、圆角，
//! 以及实体序列化往返和会话不变量。

use firecad_core::error::GeometryError;
use firecad_core::geometry::Geometry;
use firecad_core::math::{distance, Point2, EPSILON};
use firecad_ops::prelude::*;

fn almost(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

#[test]
fn intersect_scenario() {
    // (0,0)-(10,0) 与 (5,-5)-(5,5) 交于 (5,0)
    let mut svc = OpsService::new();
    let a = svc
        .create_segment(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
        .unwrap();
    let b = svc
        .create_segment(Point2::new(5.0, -5.0), Point2::new(5.0, 5.0))
        .unwrap();

    let pts = svc.intersections(&a, &b).unwrap();
    assert_eq!(pts.len(), 1);
    assert!(almost(pts[0].x, 5.0));
    assert!(almost(pts[0].y, 0.0));

    // 对称性
    let rev = svc.intersections(&b, &a).unwrap();
    assert!(distance(&pts[0], &rev[0]) < EPSILON);
}

#[test]
fn trim_scenario() {
    // 在 (10,0) 端修剪，锚定 (0,0)，结果 (0,0)-(5,0)
    let mut svc = OpsService::new();
    let subject = svc
        .create_segment(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
        .unwrap();
    let cutter = svc
        .create_segment(Point2::new(5.0, -5.0), Point2::new(5.0, 5.0))
        .unwrap();

    let updated = svc.trim(&subject, &[cutter], Point2::new(0.0, 0.0)).unwrap();
    assert_eq!(updated.id, subject.id);

    match svc.repository().get(&updated).unwrap() {
        Geometry::Segment(s) => {
            assert!(almost(s.start.x, 0.0));
            assert!(almost(s.end.x, 5.0));
            assert!(almost(s.end.y, 0.0));
        }
        other => panic!("expected segment, got {}", other.type_name()),
    }
}

#[test]
fn extend_scenario() {
    // (0,0)-(3,0) 的 (3,0) 端延伸到半径 5 的圆，结果 (0,0)-(5,0)
    let mut svc = OpsService::new();
    let subject = svc
        .create_segment(Point2::new(0.0, 0.0), Point2::new(3.0, 0.0))
        .unwrap();
    let boundary = svc.create_circle(Point2::new(0.0, 0.0), 5.0).unwrap();

    svc.extend(&subject, &[boundary], Point2::new(3.0, 0.0))
        .unwrap();

    match svc.repository().get(&subject).unwrap() {
        Geometry::Segment(s) => {
            assert!(almost(s.end.x, 5.0));
            assert!(almost(s.end.y, 0.0));
        }
        other => panic!("expected segment, got {}", other.type_name()),
    }
}

#[test]
fn trim_then_extend_restores_endpoint() {
    // 沿同一切割体修剪再延伸，端点在容差内复原
    let mut svc = OpsService::new();
    let subject = svc
        .create_segment(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
        .unwrap();
    let cutter = svc
        .create_segment(Point2::new(6.0, -5.0), Point2::new(6.0, 5.0))
        .unwrap();
    let original_end_boundary = svc
        .create_segment(Point2::new(10.0, -5.0), Point2::new(10.0, 5.0))
        .unwrap();

    svc.trim(&subject, &[cutter], Point2::new(0.0, 0.0)).unwrap();
    svc.extend(&subject, &[original_end_boundary], Point2::new(6.0, 0.0))
        .unwrap();

    match svc.repository().get(&subject).unwrap() {
        Geometry::Segment(s) => {
            assert!(distance(&s.end, &Point2::new(10.0, 0.0)) < EPSILON);
        }
        other => panic!("expected segment, got {}", other.type_name()),
    }
}

#[test]
fn fillet_scenario() {
    // 直角圆角：圆心 (8,2)，切点 (8,0) 与 (10,2)
    let mut svc = OpsService::new();
    let s1 = svc
        .create_segment(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
        .unwrap();
    let s2 = svc
        .create_segment(Point2::new(10.0, 0.0), Point2::new(10.0, 10.0))
        .unwrap();

    let (arc_ref, r1, r2) = svc.fillet_corner(&s1, &s2, 2.0).unwrap();
    assert_eq!(r1.id, s1.id);
    assert_eq!(r2.id, s2.id);
    assert_eq!(arc_ref.kind, EntityKind::Arc);

    match svc.repository().get(&arc_ref).unwrap() {
        Geometry::Arc(a) => {
            assert!(almost(a.center.x, 8.0));
            assert!(almost(a.center.y, 2.0));
            assert!(almost(a.radius, 2.0));
        }
        other => panic!("expected arc, got {}", other.type_name()),
    }
    match svc.repository().get(&r1).unwrap() {
        Geometry::Segment(s) => assert!(almost(s.end.x, 8.0)),
        other => panic!("expected segment, got {}", other.type_name()),
    }
    match svc.repository().get(&r2).unwrap() {
        Geometry::Segment(s) => assert!(almost(s.start.y, 2.0)),
        other => panic!("expected segment, got {}", other.type_name()),
    }
}

#[test]
fn fillet_collinear_fails_atomically() {
    let mut svc = OpsService::new();
    let s1 = svc
        .create_segment(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
        .unwrap();
    let s2 = svc
        .create_segment(Point2::new(12.0, 0.0), Point2::new(20.0, 0.0))
        .unwrap();

    let before = svc.repository().len();
    let result = svc.fillet_corner(&s1, &s2, 2.0);
    assert!(matches!(
        result,
        Err(OpsError::Geometry(GeometryError::AmbiguousFillet(_)))
    ));
    // 失败的操作不产生圆弧实体，也不改动线段
    assert_eq!(svc.repository().len(), before);
    match svc.repository().get(&s1).unwrap() {
        Geometry::Segment(s) => assert!(almost(s.end.x, 10.0)),
        other => panic!("expected segment, got {}", other.type_name()),
    }
}

#[test]
fn scale_below_tolerance_fails_atomically() {
    // 因子通过符号检查，但会把 1e-3 长的线段压到容差以下；
    // 仓库里不允许出现校验构造函数会拒绝的值
    let mut svc = OpsService::new();
    let subject = svc
        .create_segment(Point2::new(0.0, 0.0), Point2::new(1e-3, 0.0))
        .unwrap();

    let result = svc.scale(&subject, 1e-4, Point2::origin());
    assert!(matches!(
        result,
        Err(OpsError::Geometry(GeometryError::DegenerateGeometry(_)))
    ));

    match svc.repository().get(&subject).unwrap() {
        Geometry::Segment(s) => {
            assert!(s.length() > EPSILON);
            assert!(almost(s.end.x, 1e-3));
        }
        other => panic!("expected segment, got {}", other.type_name()),
    }
}

#[test]
fn session_ids_are_stable_and_increasing() {
    let mut svc = OpsService::new();
    let refs: Vec<EntityRef> = (0..16)
        .map(|i| svc.create_point(i as f64, 0.0))
        .collect();

    let mut seen = std::collections::HashSet::new();
    for pair in refs.windows(2) {
        assert!(pair[0].id < pair[1].id);
    }
    for r in &refs {
        assert!(seen.insert(r.id));
    }

    // 列举顺序与创建顺序一致
    let listed: Vec<u64> = svc.list(None).iter().map(|(r, _)| r.id).collect();
    let created: Vec<u64> = refs.iter().map(|r| r.id).collect();
    assert_eq!(listed, created);
}

#[test]
fn entities_roundtrip_through_serialization() {
    // 仓库里的每类实体都要求 serialize/deserialize 位级一致
    let mut svc = OpsService::new();
    svc.create_point(0.1, -0.2);
    let s1 = svc
        .create_segment(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
        .unwrap();
    let s2 = svc
        .create_segment(Point2::new(10.0, 0.0), Point2::new(10.0, 10.0))
        .unwrap();
    svc.create_circle(Point2::new(1.0 / 3.0, 2.0 / 7.0), 5.5).unwrap();
    svc.fillet_corner(&s1, &s2, 2.0).unwrap();

    for (_, entity) in svc.list(None) {
        let json = serde_json::to_string(entity).unwrap();
        let back: Geometry = serde_json::from_str(&json).unwrap();
        assert_eq!(*entity, back);

        let bin = rmp_serde::to_vec(entity).unwrap();
        let back: Geometry = rmp_serde::from_slice(&bin).unwrap();
        assert_eq!(*entity, back);
    }
}
