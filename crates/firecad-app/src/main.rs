//! FireCAD 批处理入口程序
//!
//! 从文件或标准输入逐行读取 JSON 操作记录，驱动操作服务，
//! 每条记录输出一行 JSON 结果。记录格式示例：
//!
//! ```text
//! {"op":"create_segment","start":{"x":0,"y":0},"end":{"x":10,"y":10}}
//! {"op":"trim","id":0,"cutters":[1],"anchor":{"x":0,"y":0}}
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use firecad_core::geometry::Segment;
use firecad_core::math::{Point2, Vector2};
use firecad_ops::prelude::*;

/// 平面坐标记录
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Coord {
    x: f64,
    y: f64,
}

impl From<Coord> for Point2 {
    fn from(c: Coord) -> Self {
        Point2::new(c.x, c.y)
    }
}

impl From<Point2> for Coord {
    fn from(p: Point2) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

/// 操作记录
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Request {
    CreatePoint { x: f64, y: f64 },
    CreateSegment { start: Coord, end: Coord },
    CreateCircle { center: Coord, radius: f64 },
    Trim { id: u64, cutters: Vec<u64>, anchor: Coord },
    Extend { id: u64, boundaries: Vec<u64>, anchor: Coord },
    FilletCorner { id1: u64, id2: u64, radius: f64 },
    Intersections { id1: u64, id2: u64 },
    Translate { id: u64, dx: f64, dy: f64 },
    Rotate { id: u64, angle: f64, about: Coord },
    Scale { id: u64, factor: f64, about: Coord },
    Mirror { id: u64, axis_start: Coord, axis_end: Coord },
    BoundingBox { ids: Vec<u64> },
    Delete { id: u64 },
    List,
}

/// 单条记录的执行结果
#[derive(Debug, Default, Serialize)]
struct Response {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    points: Option<Vec<Coord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entities: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// 包围盒输出
#[derive(Debug, Serialize)]
struct Bounds {
    min: Coord,
    max: Coord,
}

impl Response {
    fn done() -> Self {
        Self {
            ok: true,
            ..Self::default()
        }
    }

    fn with_id(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Self::done()
        }
    }

    fn with_ids(ids: Vec<u64>) -> Self {
        Self {
            ids: Some(ids),
            ..Self::done()
        }
    }

    fn with_points(points: Vec<Coord>) -> Self {
        Self {
            points: Some(points),
            ..Self::done()
        }
    }

    fn with_entities(entities: Vec<serde_json::Value>) -> Self {
        Self {
            entities: Some(entities),
            ..Self::done()
        }
    }

    fn with_bounds(bounds: Bounds) -> Self {
        Self {
            bounds: Some(bounds),
            ..Self::done()
        }
    }

    fn error(e: impl std::fmt::Display) -> Self {
        Self {
            error: Some(e.to_string()),
            ..Self::default()
        }
    }
}

/// 批处理会话：操作服务加 id -> 引用的映射
struct Session {
    svc: OpsService,
    refs: HashMap<u64, EntityRef>,
}

impl Session {
    fn new() -> Self {
        Self {
            svc: OpsService::new(),
            refs: HashMap::new(),
        }
    }

    fn remember(&mut self, entity_ref: EntityRef) -> u64 {
        self.refs.insert(entity_ref.id, entity_ref);
        entity_ref.id
    }

    fn lookup(&self, id: u64) -> Result<EntityRef, OpsError> {
        self.refs.get(&id).copied().ok_or(OpsError::NotFound(id))
    }

    fn lookup_many(&self, ids: &[u64]) -> Result<Vec<EntityRef>, OpsError> {
        ids.iter().map(|id| self.lookup(*id)).collect()
    }

    fn apply(&mut self, request: Request) -> Response {
        match self.try_apply(request) {
            Ok(response) => response,
            Err(e) => Response::error(e),
        }
    }

    fn try_apply(&mut self, request: Request) -> Result<Response, OpsError> {
        Ok(match request {
            Request::CreatePoint { x, y } => {
                let r = self.svc.create_point(x, y);
                Response::with_id(self.remember(r))
            }
            Request::CreateSegment { start, end } => {
                let r = self.svc.create_segment(start.into(), end.into())?;
                Response::with_id(self.remember(r))
            }
            Request::CreateCircle { center, radius } => {
                let r = self.svc.create_circle(center.into(), radius)?;
                Response::with_id(self.remember(r))
            }
            Request::Trim { id, cutters, anchor } => {
                let subject = self.lookup(id)?;
                let cutter_refs = self.lookup_many(&cutters)?;
                let r = self.svc.trim(&subject, &cutter_refs, anchor.into())?;
                Response::with_id(self.remember(r))
            }
            Request::Extend { id, boundaries, anchor } => {
                let subject = self.lookup(id)?;
                let boundary_refs = self.lookup_many(&boundaries)?;
                let r = self.svc.extend(&subject, &boundary_refs, anchor.into())?;
                Response::with_id(self.remember(r))
            }
            Request::FilletCorner { id1, id2, radius } => {
                let r1 = self.lookup(id1)?;
                let r2 = self.lookup(id2)?;
                let (arc, s1, s2) = self.svc.fillet_corner(&r1, &r2, radius)?;
                Response::with_ids(vec![
                    self.remember(arc),
                    self.remember(s1),
                    self.remember(s2),
                ])
            }
            Request::Intersections { id1, id2 } => {
                let r1 = self.lookup(id1)?;
                let r2 = self.lookup(id2)?;
                let points = self
                    .svc
                    .intersections(&r1, &r2)?
                    .into_iter()
                    .map(Coord::from)
                    .collect();
                Response::with_points(points)
            }
            Request::Translate { id, dx, dy } => {
                let r = self.lookup(id)?;
                let updated = self.svc.translate(&r, Vector2::new(dx, dy))?;
                Response::with_id(self.remember(updated))
            }
            Request::Rotate { id, angle, about } => {
                let r = self.lookup(id)?;
                let updated = self.svc.rotate(&r, angle, about.into())?;
                Response::with_id(self.remember(updated))
            }
            Request::Scale { id, factor, about } => {
                let r = self.lookup(id)?;
                let updated = self.svc.scale(&r, factor, about.into())?;
                Response::with_id(self.remember(updated))
            }
            Request::Mirror { id, axis_start, axis_end } => {
                let r = self.lookup(id)?;
                let axis = Segment::new(axis_start.into(), axis_end.into())?;
                let updated = self.svc.mirror(&r, axis)?;
                Response::with_id(self.remember(updated))
            }
            Request::BoundingBox { ids } => {
                let refs = self.lookup_many(&ids)?;
                match self.svc.bounding_box(&refs)? {
                    Some(bbox) => Response::with_bounds(Bounds {
                        min: bbox.min.into(),
                        max: bbox.max.into(),
                    }),
                    None => Response::done(),
                }
            }
            Request::Delete { id } => {
                let r = self.lookup(id)?;
                self.svc.delete(&r)?;
                self.refs.remove(&id);
                Response::done()
            }
            Request::List => {
                let entities = self
                    .svc
                    .list(None)
                    .into_iter()
                    .map(|(r, g)| {
                        serde_json::json!({
                            "id": r.id,
                            "kind": r.kind.name(),
                            "geometry": g,
                        })
                    })
                    .collect();
                Response::with_entities(entities)
            }
        })
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(flag) if flag == "--input" => Some(
            args.next()
                .context("--input requires a file path")?,
        ),
        Some(other) => anyhow::bail!("unknown argument {} (expected --input <file>)", other),
        None => None,
    };

    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("cannot open {}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut session = Session::new();
    let mut processed = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let request: Request = serde_json::from_str(&line)
            .with_context(|| format!("malformed record on line {}", line_no + 1))?;
        let response = session.apply(request);
        println!("{}", serde_json::to_string(&response)?);
        processed += 1;
    }

    info!(
        "Processed {} operations, {} entities in session",
        processed,
        session.svc.repository().len()
    );

    Ok(())
}
