//! 数学基础
//!
//! 提供内核统一的容差常量、比较原语和二维向量代数：
//! - 固定容差 EPSILON 及其比较函数
//! - Point2 / Vector2 类型别名（基于 nalgebra）
//! - 包围盒 BoundingBox2
//!
//! 内核中所有的相等/零值判断都必须经过这里的容差函数，
//! 禁止在其他模块使用独立的字面量容差。

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// 二维点（工作长度单位）
pub type Point2 = nalgebra::Point2<f64>;

/// 二维向量（位移）
pub type Vector2 = nalgebra::Vector2<f64>;

/// 内核统一容差
///
/// "同一点"、"平行"、"零长度"、"零半径"等判断的唯一依据。
pub const EPSILON: f64 = 1e-6;

/// 容差相等比较：|a - b| <= tol
#[inline]
pub fn almost_equal(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// 使用默认容差的相等比较
#[inline]
pub fn almost_equal_eps(a: f64, b: f64) -> bool {
    almost_equal(a, b, EPSILON)
}

/// 将 x 限制在 [lo, hi] 范围内
#[inline]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

/// 带容差零区间的符号函数
///
/// |x| <= EPSILON 时返回 0，否则返回 -1 / 1。
#[inline]
pub fn sgn(x: f64) -> i32 {
    if x.abs() <= EPSILON {
        0
    } else if x > 0.0 {
        1
    } else {
        -1
    }
}

/// 按容差取整：四舍五入到 tol 的最近整数倍
///
/// 采用"远离零的半数进位"（round-half-away-from-zero），
/// 在商上取整再乘回，避免二进制浮点的累积偏移。
/// 满足幂等性：`round_tol(round_tol(x, tol), tol) == round_tol(x, tol)`。
pub fn round_tol(x: f64, tol: f64) -> f64 {
    if tol <= 0.0 {
        return x;
    }
    let steps = (x.abs() / tol + 0.5).floor();
    if x < 0.0 {
        -steps * tol
    } else {
        steps * tol
    }
}

/// 两点间距离
#[inline]
pub fn distance(p: &Point2, q: &Point2) -> f64 {
    (q - p).norm()
}

/// 向量单位化
///
/// 长度小于 EPSILON 时返回 `DegenerateGeometry` 错误。
pub fn try_normalize(v: &Vector2) -> Result<Vector2, GeometryError> {
    let len = v.norm();
    if len < EPSILON {
        return Err(GeometryError::DegenerateGeometry(
            "cannot normalize a zero-length vector".to_string(),
        ));
    }
    Ok(v / len)
}

/// 逆时针旋转90°的垂直向量
#[inline]
pub fn perpendicular(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// 二维叉积（z分量）
#[inline]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 由点集创建包围盒
    ///
    /// 点集为空时返回一个反转的空盒（min = +∞, max = -∞）。
    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to_include(&p);
        }
        bbox
    }

    /// 空包围盒（反转区间）
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// 扩展包围盒以包含指定点
    pub fn expand_to_include(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// 合并两个包围盒
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// 检查点是否在包围盒内
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

}
