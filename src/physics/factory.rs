//! 剛体ファクトリ
//!
//! 長方形、円、多角形、台形、任意頂点から剛体を作成します。
//! 形状記述子（JSON可）からの作成もここで行います。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MatterError, Result};
use crate::physics::body::{Body, BodyShape, CollisionFilter};
use crate::physics::vertices;
use crate::utils::math::Vec2;

/// 剛体作成時のオプション
///
/// 省略したフィールドは剛体の既定値のままになります。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BodyOptions {
    pub label: Option<String>,
    pub is_static: Option<bool>,
    pub is_sensor: Option<bool>,
    pub angle: Option<f64>,
    pub density: Option<f64>,
    /// 指定した場合は密度より優先
    pub mass: Option<f64>,
    pub inertia: Option<f64>,
    pub restitution: Option<f64>,
    pub friction: Option<f64>,
    pub friction_static: Option<f64>,
    pub friction_air: Option<f64>,
    pub collision_filter: Option<CollisionFilter>,
    pub ignore_gravity: Option<bool>,
    pub gravity_scale: Option<Vec2>,
    pub sleep_threshold: Option<u32>,
}

impl BodyOptions {
    /// 剛体にオプションを適用
    pub fn apply(&self, body: &mut Body) {
        if let Some(label) = &self.label {
            body.label = label.clone();
        }
        if let Some(angle) = self.angle {
            body.set_angle(angle);
        }
        if let Some(filter) = self.collision_filter {
            body.collision_filter = filter;
        }
        if let Some(restitution) = self.restitution {
            body.restitution = restitution;
        }
        if let Some(friction) = self.friction {
            body.friction = friction;
        }
        if let Some(friction_static) = self.friction_static {
            body.friction_static = friction_static;
        }
        if let Some(friction_air) = self.friction_air {
            body.friction_air = friction_air;
        }
        if let Some(is_sensor) = self.is_sensor {
            body.is_sensor = is_sensor;
        }
        if let Some(ignore_gravity) = self.ignore_gravity {
            body.ignore_gravity = ignore_gravity;
        }
        if let Some(gravity_scale) = self.gravity_scale {
            body.gravity_scale = gravity_scale;
        }
        if let Some(sleep_threshold) = self.sleep_threshold {
            body.sleep_threshold = sleep_threshold;
        }

        if let Some(density) = self.density {
            body.set_density(density);
        }
        if let Some(mass) = self.mass {
            body.set_mass(mass);
        }
        if let Some(inertia) = self.inertia {
            body.set_inertia(inertia);
        }

        // 静的化は質量の設定後（元の値を保存するため）
        if self.is_static == Some(true) {
            body.set_static(true);
        }
    }
}

/// 形状記述子
///
/// `{"type": "circle", "radius": 10}` のようなJSONから読み込めます。
/// 省略した値は [`ShapeDefaults`] から補われます。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ShapeDescriptor {
    Rectangle {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
    },
    Circle {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        radius: Option<f64>,
        #[serde(default, rename = "maxSides")]
        max_sides: Option<u32>,
    },
    Polygon {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        sides: Option<u32>,
        #[serde(default)]
        radius: Option<f64>,
    },
    Trapezoid {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
        #[serde(default)]
        slope: Option<f64>,
    },
    #[serde(rename = "fromVerts", alias = "fromVertices")]
    FromVertices {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        verts: Vec<Vec2>,
    },
}

impl ShapeDescriptor {
    /// JSONから読み込む（文字列のみの場合は種類名として扱う）
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| MatterError::InvalidShapeDescriptor(e.to_string()))?;
        Self::from_value(value)
    }

    /// 種類名だけの記述子（値はすべて既定値）
    pub fn named(shape_type: &str) -> Result<Self> {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(shape_type.to_string()));
        Self::from_value(Value::Object(object))
    }

    /// オプション全体から形状を取り出す
    ///
    /// `shape` が種類名だけの文字列なら、同じ階層にある形状のキー
    /// （`radius` など）を記述子にまとめます。取り出したキーは `options` から消えます。
    pub(crate) fn from_options(shape: Value, options: &mut Map<String, Value>) -> Result<Self> {
        match shape {
            Value::String(name) => {
                let mut object = Map::new();
                object.insert("type".to_string(), Value::String(name));
                for key in SHAPE_KEYS {
                    if let Some(value) = options.remove(*key) {
                        object.insert(key.to_string(), value);
                    }
                }
                Self::from_value(Value::Object(object))
            }
            shape => Self::from_value(shape),
        }
    }

    pub(crate) fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(name) => Self::named(&name),
            value => serde_json::from_value(value)
                .map_err(|e| MatterError::InvalidShapeDescriptor(e.to_string())),
        }
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        ShapeDescriptor::Rectangle {
            x: None,
            y: None,
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn circle(radius: f64) -> Self {
        ShapeDescriptor::Circle {
            x: None,
            y: None,
            radius: Some(radius),
            max_sides: None,
        }
    }

    pub fn polygon(sides: u32, radius: f64) -> Self {
        ShapeDescriptor::Polygon {
            x: None,
            y: None,
            sides: Some(sides),
            radius: Some(radius),
        }
    }

    pub fn trapezoid(width: f64, height: f64, slope: f64) -> Self {
        ShapeDescriptor::Trapezoid {
            x: None,
            y: None,
            width: Some(width),
            height: Some(height),
            slope: Some(slope),
        }
    }

    pub fn from_vertices(verts: Vec<Vec2>) -> Self {
        ShapeDescriptor::FromVertices {
            x: None,
            y: None,
            verts,
        }
    }

    /// 剛体の位置を指定
    pub fn at(mut self, position: Vec2) -> Self {
        match &mut self {
            ShapeDescriptor::Rectangle { x, y, .. }
            | ShapeDescriptor::Circle { x, y, .. }
            | ShapeDescriptor::Polygon { x, y, .. }
            | ShapeDescriptor::Trapezoid { x, y, .. }
            | ShapeDescriptor::FromVertices { x, y, .. } => {
                *x = Some(position.0);
                *y = Some(position.1);
            }
        }
        self
    }

    /// 種類名
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeDescriptor::Rectangle { .. } => "rectangle",
            ShapeDescriptor::Circle { .. } => "circle",
            ShapeDescriptor::Polygon { .. } => "polygon",
            ShapeDescriptor::Trapezoid { .. } => "trapezoid",
            ShapeDescriptor::FromVertices { .. } => "fromVerts",
        }
    }
}

/// 形状記述子で省略された値の既定値
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDefaults {
    /// 剛体の位置
    pub position: Vec2,
    /// 幅（通常は描画サイズ）
    pub width: f64,
    /// 高さ（通常は描画サイズ）
    pub height: f64,
}

impl ShapeDefaults {
    /// 円と多角形の既定半径
    pub fn radius(&self) -> f64 {
        self.width.max(self.height) / 2.0
    }
}

/// 種類名と同じ階層に書ける形状のキー
const SHAPE_KEYS: &[&str] = &[
    "x", "y", "width", "height", "radius", "maxSides", "sides", "slope", "verts",
];

/// 円の最大辺数の既定値
pub const DEFAULT_MAX_SIDES: u32 = 25;
/// 多角形の辺数の既定値
pub const DEFAULT_POLYGON_SIDES: u32 = 5;
/// 台形の傾きの既定値
pub const DEFAULT_TRAPEZOID_SLOPE: f64 = 0.5;

/// 剛体ファクトリ
pub struct Bodies;

impl Bodies {
    /// 中心 `(x, y)` に長方形の剛体を作成
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64, options: &BodyOptions) -> Body {
        let mut body = Body::new(
            BodyShape::Rectangle { width, height },
            vertices::rectangle(width, height),
            (x, y),
        );
        body.label = "Rectangle Body".to_string();
        options.apply(&mut body);
        body
    }

    /// 中心 `(x, y)` に円（正多角形近似）の剛体を作成
    pub fn circle(x: f64, y: f64, radius: f64, max_sides: u32, options: &BodyOptions) -> Result<Body> {
        ensure_positive("radius", radius)?;

        let mut sides = (max_sides as f64).min(radius).max(10.0).ceil() as u32;
        if sides % 2 == 1 {
            sides += 1;
        }

        let mut body = Body::new(
            BodyShape::Circle { radius, max_sides },
            vertices::regular_polygon(sides, radius),
            (x, y),
        );
        body.label = "Circle Body".to_string();
        options.apply(&mut body);
        Ok(body)
    }

    /// 中心 `(x, y)` に正多角形の剛体を作成（3辺未満は円）
    pub fn polygon(x: f64, y: f64, sides: u32, radius: f64, options: &BodyOptions) -> Result<Body> {
        if sides < 3 {
            return Self::circle(x, y, radius, DEFAULT_MAX_SIDES, options);
        }
        ensure_positive("radius", radius)?;

        let mut body = Body::new(
            BodyShape::Polygon { sides, radius },
            vertices::regular_polygon(sides, radius),
            (x, y),
        );
        body.label = "Polygon Body".to_string();
        options.apply(&mut body);
        Ok(body)
    }

    /// 中心 `(x, y)` に台形の剛体を作成
    pub fn trapezoid(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        slope: f64,
        options: &BodyOptions,
    ) -> Result<Body> {
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        if !slope.is_finite() || slope < 0.0 {
            return Err(MatterError::InvalidShapeDescriptor(format!(
                "trapezoid slope must be a non-negative number, got {}",
                slope
            )));
        }

        let mut body = Body::new(
            BodyShape::Trapezoid { width, height, slope },
            vertices::trapezoid(width, height, slope),
            (x, y),
        );
        body.label = "Trapezoid Body".to_string();
        options.apply(&mut body);
        Ok(body)
    }

    /// 重心が `(x, y)` に来るよう任意の頂点列から剛体を作成
    pub fn from_vertices(x: f64, y: f64, verts: &[Vec2], options: &BodyOptions) -> Result<Body> {
        if verts.len() < 3 {
            return Err(MatterError::InvalidShapeDescriptor(format!(
                "fromVerts needs at least 3 vertices, got {}",
                verts.len()
            )));
        }
        if verts.iter().any(|v| !v.0.is_finite() || !v.1.is_finite()) {
            return Err(MatterError::InvalidShapeDescriptor(
                "fromVerts contains a non-finite vertex".to_string(),
            ));
        }
        if vertices::area(verts) <= f64::EPSILON {
            return Err(MatterError::InvalidShapeDescriptor(
                "fromVerts vertices enclose no area".to_string(),
            ));
        }

        let mut body = Body::new(BodyShape::Vertices, verts.to_vec(), (x, y));
        options.apply(&mut body);
        Ok(body)
    }

    /// 形状記述子から剛体を作成
    pub fn from_descriptor(
        descriptor: &ShapeDescriptor,
        defaults: &ShapeDefaults,
        options: &BodyOptions,
    ) -> Result<Body> {
        let position = |x: &Option<f64>, y: &Option<f64>| {
            (
                x.unwrap_or(defaults.position.0),
                y.unwrap_or(defaults.position.1),
            )
        };

        match descriptor {
            ShapeDescriptor::Rectangle { x, y, width, height } => {
                let (x, y) = position(x, y);
                let width = width.unwrap_or(defaults.width);
                let height = height.unwrap_or(defaults.height);
                ensure_positive("width", width)?;
                ensure_positive("height", height)?;
                Ok(Self::rectangle(x, y, width, height, options))
            }
            ShapeDescriptor::Circle { x, y, radius, max_sides } => {
                let (x, y) = position(x, y);
                Self::circle(
                    x,
                    y,
                    radius.unwrap_or_else(|| defaults.radius()),
                    max_sides.unwrap_or(DEFAULT_MAX_SIDES),
                    options,
                )
            }
            ShapeDescriptor::Polygon { x, y, sides, radius } => {
                let (x, y) = position(x, y);
                Self::polygon(
                    x,
                    y,
                    sides.unwrap_or(DEFAULT_POLYGON_SIDES),
                    radius.unwrap_or_else(|| defaults.radius()),
                    options,
                )
            }
            ShapeDescriptor::Trapezoid { x, y, width, height, slope } => {
                let (x, y) = position(x, y);
                Self::trapezoid(
                    x,
                    y,
                    width.unwrap_or(defaults.width),
                    height.unwrap_or(defaults.height),
                    slope.unwrap_or(DEFAULT_TRAPEZOID_SLOPE),
                    options,
                )
            }
            ShapeDescriptor::FromVertices { x, y, verts } => {
                let (x, y) = position(x, y);
                Self::from_vertices(x, y, verts, options)
            }
        }
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MatterError::InvalidShapeDescriptor(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}
