//! 剛体
//!
//! 物理ワールドが所有する剛体のレコードです。
//! ゲームオブジェクトはハンドルで参照し、剛体はゲームオブジェクトのIDを逆参照として保持します。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ecs::EntityId;
use crate::physics::vertices;
use crate::utils::math::{self, Vec2};

/// 剛体ハンドル
///
/// ワールド内の剛体を指す所有権のない参照です。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u64);

impl BodyHandle {
    /// 生の値を取得
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// 剛体がどの形状から作られたか
#[derive(Debug, Clone, PartialEq)]
pub enum BodyShape {
    /// 長方形
    Rectangle { width: f64, height: f64 },
    /// 円（正多角形で近似）
    Circle { radius: f64, max_sides: u32 },
    /// 正多角形
    Polygon { sides: u32, radius: f64 },
    /// 台形
    Trapezoid { width: f64, height: f64, slope: f64 },
    /// 任意の頂点列
    Vertices,
}

/// 衝突フィルター
///
/// カテゴリとマスクを使用して、特定の剛体間の衝突を有効/無効にできます。
/// グループが同じ（0以外）の剛体同士は、正なら常に衝突し、負なら衝突しません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionFilter {
    /// カテゴリビット
    pub category: u32,
    /// 衝突対象のカテゴリマスク
    pub mask: u32,
    /// 衝突グループ
    pub group: i32,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            category: 0x0001,
            mask: 0xFFFF_FFFF,
            group: 0,
        }
    }
}

impl CollisionFilter {
    /// 2つのフィルター間で衝突が可能かどうかを判定
    pub fn can_collide(&self, other: &CollisionFilter) -> bool {
        if self.group == other.group && self.group != 0 {
            return self.group > 0;
        }

        (self.mask & other.category) != 0 && (other.mask & self.category) != 0
    }
}

/// 静的化する前の動的プロパティ
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DynamicProperties {
    restitution: f64,
    friction: f64,
    mass: f64,
    inertia: f64,
    density: f64,
    inverse_mass: f64,
    inverse_inertia: f64,
}

/// 剛体
#[derive(Debug, Clone)]
pub struct Body {
    /// ワールドが割り当てたハンドル（挿入前は `None`）
    pub(crate) handle: Option<BodyHandle>,
    /// ラベル
    pub label: String,
    /// 作成元の形状
    pub(crate) shape: BodyShape,
    /// 重心を原点とするローカル頂点（回転前）
    pub(crate) vertices: Vec<Vec2>,

    /// 位置（重心）
    pub(crate) position: Vec2,
    /// 回転角（ラジアン）
    pub(crate) angle: f64,
    /// 速度（ステップあたりの移動量）
    pub(crate) velocity: Vec2,
    /// 角速度
    pub(crate) angular_velocity: f64,
    /// 蓄積された力
    pub(crate) force: Vec2,
    /// 蓄積されたトルク
    pub(crate) torque: f64,
    /// 現在のスケール
    pub(crate) scale: Vec2,

    /// 面積
    pub(crate) area: f64,
    /// 質量
    pub(crate) mass: f64,
    /// 質量の逆数
    pub(crate) inverse_mass: f64,
    /// 慣性モーメント
    pub(crate) inertia: f64,
    /// 慣性モーメントの逆数
    pub(crate) inverse_inertia: f64,
    /// 密度
    pub(crate) density: f64,

    /// 反発係数
    pub restitution: f64,
    /// 摩擦係数
    pub friction: f64,
    /// 静止摩擦係数
    pub friction_static: f64,
    /// 空気抵抗
    pub friction_air: f64,
    /// 衝突フィルター
    pub collision_filter: CollisionFilter,
    /// センサー（衝突を検出するが応答しない）
    pub is_sensor: bool,
    /// 重力を無視するか
    pub ignore_gravity: bool,
    /// 重力のスケール
    pub gravity_scale: Vec2,

    /// 静的剛体か
    pub(crate) is_static: bool,
    /// 静的化前のプロパティ
    pub(crate) original: Option<DynamicProperties>,

    /// スリープ中か
    pub(crate) is_sleeping: bool,
    /// スリープに入るまでのステップ数
    pub sleep_threshold: u32,
    pub(crate) sleep_counter: u32,
    pub(crate) motion: f64,
    /// スリープ開始イベントを発行するか
    pub emit_sleep_start: bool,
    /// スリープ終了イベントを発行するか
    pub emit_sleep_end: bool,

    /// この剛体を所有するゲームオブジェクト（逆参照）
    pub(crate) game_object: Option<EntityId>,
}

impl Body {
    /// ローカル頂点から剛体を作成（Matterの既定値）
    pub(crate) fn new(shape: BodyShape, local_vertices: Vec<Vec2>, position: Vec2) -> Self {
        let mut body = Self {
            handle: None,
            label: "Body".to_string(),
            shape,
            vertices: Vec::new(),
            position,
            angle: 0.0,
            velocity: (0.0, 0.0),
            angular_velocity: 0.0,
            force: (0.0, 0.0),
            torque: 0.0,
            scale: (1.0, 1.0),
            area: 0.0,
            mass: 0.0,
            inverse_mass: 0.0,
            inertia: 0.0,
            inverse_inertia: 0.0,
            density: 0.001,
            restitution: 0.0,
            friction: 0.1,
            friction_static: 0.5,
            friction_air: 0.01,
            collision_filter: CollisionFilter::default(),
            is_sensor: false,
            ignore_gravity: false,
            gravity_scale: (1.0, 1.0),
            is_static: false,
            original: None,
            is_sleeping: false,
            sleep_threshold: 60,
            sleep_counter: 0,
            motion: 0.0,
            emit_sleep_start: false,
            emit_sleep_end: false,
            game_object: None,
        };
        body.set_vertices(local_vertices);
        body
    }

    /// 頂点を差し替え、面積・質量・慣性を再計算
    pub fn set_vertices(&mut self, local_vertices: Vec<Vec2>) {
        self.vertices = vertices::recentre(&local_vertices);
        self.area = vertices::area(&self.vertices);
        let density = self.density;
        self.set_mass(density * self.area);
        self.density = density;
        self.set_inertia(4.0 * vertices::inertia(&self.vertices, self.mass));
    }

    /// ワールドが割り当てたハンドル
    pub fn handle(&self) -> Option<BodyHandle> {
        self.handle
    }

    /// 作成元の形状
    pub fn shape(&self) -> &BodyShape {
        &self.shape
    }

    /// ローカル頂点
    pub fn local_vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// 回転と位置を適用したワールド頂点
    pub fn world_vertices(&self) -> Vec<Vec2> {
        self.vertices
            .iter()
            .map(|v| math::add(math::rotate(*v, self.angle), self.position))
            .collect()
    }

    /// 回転を含まないローカル頂点の幅と高さ
    pub fn size(&self) -> (f64, f64) {
        let (min_x, min_y, max_x, max_y) = vertices::bounds(&self.vertices);
        (max_x - min_x, max_y - min_y)
    }

    /// ゲームオブジェクトへの逆参照
    pub fn game_object(&self) -> Option<EntityId> {
        self.game_object
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// 位置を設定
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// 回転角を設定（ラジアン）
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// 速度を設定
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// 角速度を設定
    pub fn set_angular_velocity(&mut self, velocity: f64) {
        self.angular_velocity = velocity;
    }

    /// 速さ
    pub fn speed(&self) -> f64 {
        math::length(self.velocity)
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn torque(&self) -> f64 {
        self.torque
    }

    /// ワールド座標 `position` に力を加える（トルクも生成）
    pub fn apply_force(&mut self, position: Vec2, force: Vec2) {
        self.force = math::add(self.force, force);
        let offset = math::sub(position, self.position);
        self.torque += math::cross(offset, force);
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// 現在のスケールに対して `factor` 倍する
    pub fn scale_by(&mut self, factor: Vec2) {
        let scaled: Vec<Vec2> = self
            .vertices
            .iter()
            .map(|v| (v.0 * factor.0, v.1 * factor.1))
            .collect();
        self.scale = (self.scale.0 * factor.0, self.scale.1 * factor.1);

        if self.is_static {
            self.vertices = vertices::recentre(&scaled);
            self.area = vertices::area(&self.vertices);
        } else {
            self.set_vertices(scaled);
        }
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inverse_inertia(&self) -> f64 {
        self.inverse_inertia
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// 質量を設定（慣性は質量に比例して更新、密度は面積から再計算）
    pub fn set_mass(&mut self, mass: f64) {
        if self.mass > 0.0 && self.mass.is_finite() {
            let moment = self.inertia / (self.mass / 6.0);
            self.inertia = moment * (mass / 6.0);
        } else {
            self.inertia = 4.0 * vertices::inertia(&self.vertices, mass);
        }
        self.inverse_inertia = inverse(self.inertia);
        self.mass = mass;
        self.inverse_mass = inverse(mass);
        self.density = if self.area > 0.0 { mass / self.area } else { 0.0 };
    }

    /// 密度を設定（質量は面積から再計算）
    pub fn set_density(&mut self, density: f64) {
        self.set_mass(density * self.area);
        self.density = density;
    }

    /// 慣性モーメントを設定
    pub fn set_inertia(&mut self, inertia: f64) {
        self.inertia = inertia;
        self.inverse_inertia = inverse(inertia);
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// 静的/動的を切り替える
    ///
    /// 静的にすると質量と慣性は無限大になり、元の値は動的に戻すときに復元されます。
    pub fn set_static(&mut self, is_static: bool) {
        if is_static {
            if self.original.is_none() {
                self.original = Some(DynamicProperties {
                    restitution: self.restitution,
                    friction: self.friction,
                    mass: self.mass,
                    inertia: self.inertia,
                    density: self.density,
                    inverse_mass: self.inverse_mass,
                    inverse_inertia: self.inverse_inertia,
                });
            }

            self.restitution = 0.0;
            self.friction = 1.0;
            self.mass = f64::INFINITY;
            self.inertia = f64::INFINITY;
            self.density = f64::INFINITY;
            self.inverse_mass = 0.0;
            self.inverse_inertia = 0.0;
            self.velocity = (0.0, 0.0);
            self.angular_velocity = 0.0;
            self.motion = 0.0;
        } else if let Some(original) = self.original.take() {
            self.restitution = original.restitution;
            self.friction = original.friction;
            self.mass = original.mass;
            self.inertia = original.inertia;
            self.density = original.density;
            self.inverse_mass = original.inverse_mass;
            self.inverse_inertia = original.inverse_inertia;
        }

        self.is_static = is_static;
    }

    pub fn is_sleeping(&self) -> bool {
        self.is_sleeping
    }

    /// スリープ状態を設定し、状態が変化したかを返す
    pub(crate) fn set_sleeping(&mut self, is_sleeping: bool) -> bool {
        let was_sleeping = self.is_sleeping;

        if is_sleeping {
            self.is_sleeping = true;
            self.sleep_counter = self.sleep_threshold;
            self.velocity = (0.0, 0.0);
            self.angular_velocity = 0.0;
            self.motion = 0.0;
        } else {
            self.is_sleeping = false;
            self.sleep_counter = 0;
        }

        was_sleeping != is_sleeping
    }
}

fn inverse(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        0.0
    } else {
        1.0 / value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::vertices;

    fn square(size: f64) -> Body {
        Body::new(
            BodyShape::Rectangle { width: size, height: size },
            vertices::rectangle(size, size),
            (0.0, 0.0),
        )
    }

    #[test]
    fn test_mass_from_density() {
        let body = square(10.0);
        assert_eq!(body.area(), 100.0);
        assert!((body.mass() - 0.1).abs() < 1e-12);
        assert!((body.inverse_mass() - 10.0).abs() < 1e-9);
        assert!(body.inertia() > 0.0);
    }

    #[test]
    fn test_set_mass_updates_density() {
        let mut body = square(10.0);
        let inertia = body.inertia();
        body.set_mass(2.0);

        assert_eq!(body.mass(), 2.0);
        assert!((body.density() - 0.02).abs() < 1e-12);
        assert!((body.inertia() - inertia * 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_static_round_trip_restores_properties() {
        let mut body = square(10.0);
        body.restitution = 0.7;
        body.set_velocity((3.0, 4.0));
        let mass = body.mass();

        body.set_static(true);
        assert!(body.is_static());
        assert!(body.mass().is_infinite());
        assert_eq!(body.inverse_mass(), 0.0);
        assert_eq!(body.velocity(), (0.0, 0.0));

        // 二度目の静的化で元の値を上書きしない
        body.set_static(true);

        body.set_static(false);
        assert!(!body.is_static());
        assert_eq!(body.mass(), mass);
        assert_eq!(body.restitution, 0.7);
    }

    #[test]
    fn test_apply_force_off_centre_creates_torque() {
        let mut body = square(10.0);
        body.apply_force((0.0, 5.0), (1.0, 0.0));

        assert_eq!(body.force(), (1.0, 0.0));
        assert_eq!(body.torque(), -5.0);
    }

    #[test]
    fn test_collision_filter() {
        let a = CollisionFilter::default();
        let mut b = CollisionFilter::default();
        assert!(a.can_collide(&b));

        b.category = 0x0002;
        b.mask = 0x0002;
        assert!(!a.can_collide(&b));

        // 同じ正のグループは常に衝突
        let mut c = b;
        c.group = 3;
        let mut d = a;
        d.group = 3;
        assert!(c.can_collide(&d));

        // 同じ負のグループは衝突しない
        c.group = -1;
        d.group = -1;
        assert!(!c.can_collide(&d));
    }

    #[test]
    fn test_scale_by() {
        let mut body = square(10.0);
        body.scale_by((2.0, 1.0));

        assert_eq!(body.scale(), (2.0, 1.0));
        assert_eq!(body.size(), (20.0, 10.0));
        assert_eq!(body.area(), 200.0);
    }
}
