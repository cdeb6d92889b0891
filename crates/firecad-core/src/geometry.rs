//! 几何图元定义
//!
//! 内核支持的基本图元：
//! - 点 (Point)
//! - 线段 (Segment)
//! - 圆 (Circle)
//! - 圆弧 (Arc)
//!
//! 图元都是不可变值类型，彼此之间不持有引用；
//! 带不变量的图元（线段、圆）通过校验构造函数创建。

use crate::error::GeometryError;
use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};

/// 几何类型枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    Segment(Segment),
    Circle(Circle),
    Arc(Arc),
}

impl Geometry {
    /// 获取几何的包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        match self {
            Geometry::Point(p) => p.bounding_box(),
            Geometry::Segment(s) => s.bounding_box(),
            Geometry::Circle(c) => c.bounding_box(),
            Geometry::Arc(a) => a.bounding_box(),
        }
    }

    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Segment(_) => "Segment",
            Geometry::Circle(_) => "Circle",
            Geometry::Arc(_) => "Arc",
        }
    }
}

/// 点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub position: Point2,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
        }
    }

    pub fn from_point2(position: Point2) -> Self {
        Self { position }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(self.position, self.position)
    }
}

/// 线段
///
/// 不变量：长度 > EPSILON。几何上无方向，
/// 但 start→end 定义了修剪/延伸时的锚定方向。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    /// 创建线段，拒绝零长度输入
    pub fn new(start: Point2, end: Point2) -> Result<Self, GeometryError> {
        if (end - start).norm() <= EPSILON {
            return Err(GeometryError::DegenerateGeometry(format!(
                "zero-length segment at ({}, {})",
                start.x, start.y
            )));
        }
        Ok(Self { start, end })
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// 计算线段方向向量（单位向量）
    ///
    /// 构造时已保证非退化，这里不会除零。
    pub fn direction(&self) -> Vector2 {
        (self.end - self.start) / self.length()
    }

    /// 计算线段中点
    pub fn midpoint(&self) -> Point2 {
        Point2::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.start, self.end])
    }
}

/// 圆
///
/// 不变量：半径 > EPSILON。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    /// 创建圆，拒绝零/负半径
    pub fn new(center: Point2, radius: f64) -> Result<Self, GeometryError> {
        if radius <= EPSILON {
            return Err(GeometryError::DegenerateGeometry(format!(
                "circle radius {} is not positive",
                radius
            )));
        }
        Ok(Self { center, radius })
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(
            Point2::new(self.center.x - self.radius, self.center.y - self.radius),
            Point2::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }
}

/// 圆弧
///
/// 从 start_angle 逆时针扫到 end_angle（弧度）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    /// 起始角度（弧度）
    pub start_angle: f64,
    /// 终止角度（弧度）
    pub end_angle: f64,
}

impl Arc {
    /// 创建圆弧，拒绝零/负半径
    pub fn new(
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self, GeometryError> {
        if radius <= EPSILON {
            return Err(GeometryError::DegenerateGeometry(format!(
                "arc radius {} is not positive",
                radius
            )));
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// 计算弧长
    pub fn length(&self) -> f64 {
        self.sweep_angle() * self.radius
    }

    /// 计算逆时针扫过的角度，归一化到 [0, 2π)
    pub fn sweep_angle(&self) -> f64 {
        let two_pi = 2.0 * std::f64::consts::PI;
        let mut sweep = self.end_angle - self.start_angle;
        while sweep < 0.0 {
            sweep += two_pi;
        }
        while sweep >= two_pi {
            sweep -= two_pi;
        }
        sweep
    }

    /// 获取起点
    pub fn start_point(&self) -> Point2 {
        Point2::new(
            self.center.x + self.radius * self.start_angle.cos(),
            self.center.y + self.radius * self.start_angle.sin(),
        )
    }

    /// 获取终点
    pub fn end_point(&self) -> Point2 {
        Point2::new(
            self.center.x + self.radius * self.end_angle.cos(),
            self.center.y + self.radius * self.end_angle.sin(),
        )
    }

    /// 检查角度是否在弧的扫掠范围内
    pub fn contains_angle(&self, angle: f64) -> bool {
        let two_pi = 2.0 * std::f64::consts::PI;
        let mut a = angle;
        let mut start = self.start_angle;
        let mut end = self.end_angle;

        // 归一化到 [0, 2π)
        while a < 0.0 {
            a += two_pi;
        }
        while start < 0.0 {
            start += two_pi;
        }
        while end < 0.0 {
            end += two_pi;
        }
        a %= two_pi;
        start %= two_pi;
        end %= two_pi;

        if start <= end {
            a >= start && a <= end
        } else {
            a >= start || a <= end
        }
    }

    /// 包围盒必须包含弧上切线与坐标轴平行处的真实极值点，
    /// 而不仅仅是两个端点。
    pub fn bounding_box(&self) -> BoundingBox2 {
        let mut bbox = BoundingBox2::from_points([self.start_point(), self.end_point()]);

        // 检查象限点
        let pi = std::f64::consts::PI;
        for angle in [0.0, pi / 2.0, pi, 3.0 * pi / 2.0] {
            if self.contains_angle(angle) {
                bbox.expand_to_include(&Point2::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                ));
            }
        }

        bbox
    }
}
