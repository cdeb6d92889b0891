//! FireCAD 核心几何内核
//!
//! 火灾报警平面图绘制的2D几何基础：容差感知的图元库
//! （点、线段、圆、圆弧）和修改操作（求交、修剪、延伸、圆角）。
//!
//! # 架构设计
//!
//! 自底向上分层，单向依赖：
//! - `math`: 容差与向量代数
//! - `geometry`: 不可变图元值类型
//! - `intersect` / `modify` / `fillet` / `transform`: 纯几何运算
//!
//! 内核不做任何 I/O，不持有会话状态；实体仓库与编排层在
//! `firecad-ops` 中。
//!
//! # 示例
//!
//! ```rust
//! use firecad_core::prelude::*;
//!
//! // 创建一条线段
//! let seg = Segment::new(Point2::origin(), Point2::new(100.0, 50.0)).unwrap();
//!
//! // 计算长度
//! println!("Length: {}", seg.length());
//! ```

pub mod error;
pub mod fillet;
pub mod geometry;
pub mod intersect;
pub mod math;
pub mod modify;
pub mod transform;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::error::GeometryError;
    pub use crate::fillet::{fillet_corner, FilletResult};
    pub use crate::geometry::{Arc, Circle, Geometry, Point, Segment};
    pub use crate::math::{
        almost_equal, clamp, distance, round_tol, sgn, BoundingBox2, Point2, Vector2, EPSILON,
    };
    pub use crate::modify::{extend, trim, Cutter};
}
