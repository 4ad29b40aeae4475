//! 物理ワールド
//!
//! すべての剛体を所有し、シミュレーション対象（登録済み）の集合を管理します。
//! 剛体を解放できるのはワールドだけです。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::config::WorldConfig;
use crate::ecs::EntityId;
use crate::error::{MatterError, Result};
use crate::physics::body::{Body, BodyHandle};
use crate::utils::math::{self, Vec2};

/// 共有された物理ワールド
///
/// シングルスレッド前提です。ゲームオブジェクトはこのハンドル経由で剛体にアクセスします。
pub type SharedWorld = Rc<RefCell<MatterWorld>>;

/// これ未満の動きが続くとスリープする
const MOTION_SLEEP_THRESHOLD: f64 = 0.08;

/// 最後に割り当てる衝突カテゴリ
const LAST_CATEGORY: u32 = 0x8000_0000;

/// ワールドイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    /// 剛体がスリープした
    SleepStart {
        body: BodyHandle,
        game_object: Option<EntityId>,
    },
    /// 剛体がスリープから復帰した
    SleepEnd {
        body: BodyHandle,
        game_object: Option<EntityId>,
    },
}

/// 物理ワールド
pub struct MatterWorld {
    /// 設定
    config: WorldConfig,
    /// 所有している剛体（キー: ハンドル）
    bodies: HashMap<BodyHandle, Body>,
    /// 登録済み（シミュレーション対象）の剛体（登録順）
    registered: Vec<BodyHandle>,
    /// 次のハンドル番号
    next_handle: u64,
    /// 最後に割り当てた衝突カテゴリ
    last_category: u32,
    /// 未処理のイベント
    events: Vec<WorldEvent>,
}

impl MatterWorld {
    /// 新しい物理ワールドを作成
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            bodies: HashMap::new(),
            registered: Vec::new(),
            next_handle: 1,
            last_category: 0x0001,
            events: Vec::new(),
        }
    }

    /// 共有ハンドルとして作成
    pub fn new_shared(config: WorldConfig) -> SharedWorld {
        Rc::new(RefCell::new(Self::new(config)))
    }

    /// 設定を取得
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// 剛体の所有権をワールドに移す（登録はしない）
    pub fn insert(&mut self, mut body: Body) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;

        body.handle = Some(handle);
        debug!("{} ({}) inserted", handle, body.label);
        self.bodies.insert(handle, body);
        handle
    }

    /// 剛体をシミュレーション対象に登録
    ///
    /// 存在しない、または登録済みの場合は `false` を返します。
    pub fn add(&mut self, handle: BodyHandle) -> bool {
        if !self.bodies.contains_key(&handle) || self.is_registered(handle) {
            return false;
        }

        self.registered.push(handle);
        debug!("{} added to world", handle);
        true
    }

    /// 剛体の登録を解除（剛体は解放しない）
    pub fn remove(&mut self, handle: BodyHandle) -> bool {
        match self.registered.iter().position(|h| *h == handle) {
            Some(index) => {
                self.registered.remove(index);
                debug!("{} removed from world", handle);
                true
            }
            None => false,
        }
    }

    /// 剛体を解放
    ///
    /// 登録中、またはゲームオブジェクトに紐付いている剛体は解放できません。
    pub fn dispose(&mut self, handle: BodyHandle) -> Result<()> {
        let body = self
            .bodies
            .get(&handle)
            .ok_or(MatterError::BodyNotFound(handle))?;

        if self.is_registered(handle) || body.game_object.is_some() {
            return Err(MatterError::BodyInUse(handle));
        }

        self.bodies.remove(&handle);
        debug!("{} disposed", handle);
        Ok(())
    }

    /// 登録済みか
    pub fn is_registered(&self, handle: BodyHandle) -> bool {
        self.registered.contains(&handle)
    }

    /// ワールドが所有しているか
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(&handle)
    }

    /// 剛体を取得
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(&handle)
    }

    /// 剛体を可変で取得
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(&handle)
    }

    /// 登録済みの剛体
    pub fn registered_bodies(&self) -> &[BodyHandle] {
        &self.registered
    }

    /// 登録済みの剛体数
    pub fn body_count(&self) -> usize {
        self.registered.len()
    }

    /// 所有している剛体数（未登録を含む）
    pub fn stored_count(&self) -> usize {
        self.bodies.len()
    }

    /// 剛体を所有するゲームオブジェクト
    pub fn game_object_of(&self, handle: BodyHandle) -> Option<EntityId> {
        self.bodies.get(&handle).and_then(|body| body.game_object)
    }

    /// 剛体の逆参照を設定
    pub fn set_game_object(&mut self, handle: BodyHandle, game_object: Option<EntityId>) -> Result<()> {
        let body = self
            .bodies
            .get_mut(&handle)
            .ok_or(MatterError::BodyNotFound(handle))?;
        body.game_object = game_object;
        Ok(())
    }

    /// ゲームオブジェクトを逆参照している剛体（ハンドル順）
    pub fn bodies_of(&self, entity: EntityId) -> Vec<BodyHandle> {
        let mut handles: Vec<BodyHandle> = self
            .bodies
            .iter()
            .filter(|(_, body)| body.game_object == Some(entity))
            .map(|(handle, _)| *handle)
            .collect();
        handles.sort();
        handles
    }

    /// 重力を設定
    pub fn set_gravity(&mut self, gravity: Vec2) -> &mut Self {
        self.config.gravity = gravity;
        self
    }

    /// 重力を取得
    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    /// 新しい衝突カテゴリを割り当てる（32個を使い切ると `None`）
    pub fn next_category(&mut self) -> Option<u32> {
        if self.last_category >= LAST_CATEGORY {
            return None;
        }
        self.last_category <<= 1;
        Some(self.last_category)
    }

    /// スリープ状態を設定
    pub fn set_sleeping(&mut self, handle: BodyHandle, is_sleeping: bool) -> Result<()> {
        let body = self
            .bodies
            .get_mut(&handle)
            .ok_or(MatterError::BodyNotFound(handle))?;

        if body.set_sleeping(is_sleeping) {
            if let Some(event) = sleep_event(body, is_sleeping) {
                self.events.push(event);
            }
        }
        Ok(())
    }

    /// シミュレーションを1ステップ進める（`delta` はミリ秒）
    pub fn step(&mut self, delta: f64) {
        if self.config.enable_sleeping {
            self.update_sleeping();
        }

        let gravity = self.config.gravity;
        let gravity_scale = self.config.gravity_scale;
        let delta_squared = delta * delta;

        for handle in &self.registered {
            let body = match self.bodies.get_mut(handle) {
                Some(body) => body,
                None => continue,
            };

            if body.is_static || body.is_sleeping {
                body.force = (0.0, 0.0);
                body.torque = 0.0;
                continue;
            }

            // 重力
            if !body.ignore_gravity {
                body.force.0 += body.mass * gravity.0 * gravity_scale * body.gravity_scale.0;
                body.force.1 += body.mass * gravity.1 * gravity_scale * body.gravity_scale.1;
            }

            // 積分
            let friction_air = 1.0 - body.friction_air;
            let acceleration = math::scale(body.force, body.inverse_mass * delta_squared);
            body.velocity = math::add(math::scale(body.velocity, friction_air), acceleration);
            body.position = math::add(body.position, body.velocity);

            body.angular_velocity = body.angular_velocity * friction_air
                + body.torque * body.inverse_inertia * delta_squared;
            body.angle += body.angular_velocity;

            body.force = (0.0, 0.0);
            body.torque = 0.0;
        }
    }

    /// 動きの小さい剛体をスリープさせ、力を受けた剛体を起こす
    fn update_sleeping(&mut self) {
        for handle in &self.registered {
            let body = match self.bodies.get_mut(handle) {
                Some(body) => body,
                None => continue,
            };
            if body.is_static {
                continue;
            }

            let changed_to = if body.force != (0.0, 0.0) {
                if body.set_sleeping(false) {
                    Some(false)
                } else {
                    None
                }
            } else {
                let motion = math::length_squared(body.velocity)
                    + body.angular_velocity * body.angular_velocity;
                let min_motion = body.motion.min(motion);
                let max_motion = body.motion.max(motion);
                body.motion = 0.9 * min_motion + 0.1 * max_motion;

                if body.sleep_threshold > 0 && body.motion < MOTION_SLEEP_THRESHOLD {
                    body.sleep_counter += 1;
                    if body.sleep_counter >= body.sleep_threshold && body.set_sleeping(true) {
                        Some(true)
                    } else {
                        None
                    }
                } else {
                    body.sleep_counter = body.sleep_counter.saturating_sub(1);
                    None
                }
            };

            if let Some(is_sleeping) = changed_to {
                if let Some(event) = sleep_event(body, is_sleeping) {
                    self.events.push(event);
                }
            }
        }
    }

    /// 未処理のイベントを取り出す
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for MatterWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

fn sleep_event(body: &Body, is_sleeping: bool) -> Option<WorldEvent> {
    let handle = body.handle?;
    if is_sleeping && body.emit_sleep_start {
        Some(WorldEvent::SleepStart {
            body: handle,
            game_object: body.game_object,
        })
    } else if !is_sleeping && body.emit_sleep_end {
        Some(WorldEvent::SleepEnd {
            body: handle,
            game_object: body.game_object,
        })
    } else {
        None
    }
}
