//! 几何内核错误定义

use thiserror::Error;

/// 几何计算错误
///
/// 注意：有合法"无结果"输出的纯几何查询（如两平行线求交）
/// 返回空集/None，而不是错误；只有真正无效的请求才会走到这里。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// 退化几何：零长度向量/线段、零半径圆
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// 修剪/延伸找不到有效的交点
    #[error("no intersection found: {0}")]
    NoIntersection(String),

    /// 圆角半径无效（<= EPSILON 或超过线段可用长度）
    #[error("invalid fillet radius: {0}")]
    InvalidRadius(String),

    /// 圆角输入平行/共线，角点不唯一
    #[error("ambiguous fillet: {0}")]
    AmbiguousFillet(String),
}
