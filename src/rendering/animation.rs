//! アニメーションシステムモジュール
//!
//! アニメーション定義はシーンの [`AnimationManager`] が共有し、
//! 再生位置はゲームオブジェクトごとの [`AnimationState`] が持ちます。
//! 再生状態は剛体の差し替えの影響を受けません。

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::error::{MatterError, Result};
use crate::rendering::texture::FrameKey;

/// アニメーションフレーム構造体
///
/// 個々のアニメーションフレームの情報を保持します。
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    /// テクスチャキー
    pub texture: String,
    /// フレーム
    pub frame: FrameKey,
    /// 表示時間
    pub duration: Duration,
}

impl AnimationFrame {
    /// 新しいアニメーションフレームを作成
    pub fn new(texture: &str, frame: impl Into<FrameKey>, duration: Duration) -> Self {
        Self {
            texture: texture.to_string(),
            frame: frame.into(),
            duration,
        }
    }
}

/// アニメーション定義
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    key: String,
    frames: Vec<AnimationFrame>,
    looping: bool,
}

impl Animation {
    /// 新しいアニメーションを作成
    pub fn new(key: &str, frames: Vec<AnimationFrame>, looping: bool) -> Self {
        Self {
            key: key.to_string(),
            frames,
            looping,
        }
    }

    /// スプライトシートの連番フレームからアニメーションを作成
    pub fn from_sheet(key: &str, texture: &str, frames: std::ops::Range<usize>, frame_duration: Duration, looping: bool) -> Self {
        let frames = frames
            .map(|index| AnimationFrame::new(texture, index, frame_duration))
            .collect();
        Self::new(key, frames, looping)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

/// アニメーションマネージャー構造体
///
/// 複数のアニメーション定義を管理します。
#[derive(Debug, Default)]
pub struct AnimationManager {
    animations: HashMap<String, Rc<Animation>>,
}

impl AnimationManager {
    /// 新しいアニメーションマネージャーを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// アニメーションを追加
    pub fn add(&mut self, animation: Animation) {
        self.animations
            .insert(animation.key.clone(), Rc::new(animation));
    }

    /// アニメーションを取得
    pub fn get(&self, key: &str) -> Result<Rc<Animation>> {
        self.animations
            .get(key)
            .cloned()
            .ok_or_else(|| MatterError::AnimationNotFound(key.to_string()))
    }

    /// アニメーションが存在するか
    pub fn exists(&self, key: &str) -> bool {
        self.animations.contains_key(key)
    }

    /// アニメーションを削除
    pub fn remove(&mut self, key: &str) -> bool {
        self.animations.remove(key).is_some()
    }
}

/// ゲームオブジェクトごとのアニメーション再生状態
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    current: Option<Rc<Animation>>,
    current_frame: usize,
    elapsed_time: Duration,
    playing: bool,
}

impl AnimationState {
    /// 新しい再生状態を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// アニメーションを最初から再生し、最初のフレームを返す
    pub fn play(&mut self, animation: Rc<Animation>) -> Option<&AnimationFrame> {
        self.current = Some(animation);
        self.current_frame = 0;
        self.elapsed_time = Duration::from_secs(0);
        self.playing = true;
        self.current_frame()
    }

    /// 一時停止
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// 再開
    pub fn resume(&mut self) {
        if self.current.is_some() {
            self.playing = true;
        }
    }

    /// 停止（現在のフレームは維持）
    pub fn stop(&mut self) {
        self.playing = false;
        self.elapsed_time = Duration::from_secs(0);
    }

    /// 再生位置を進め、フレームが変わった場合は新しいフレームを返す
    pub fn update(&mut self, delta_time: Duration) -> Option<&AnimationFrame> {
        let animation = match &self.current {
            Some(animation) if self.playing && !animation.frames.is_empty() => Rc::clone(animation),
            _ => return None,
        };

        self.elapsed_time += delta_time;
        let start_frame = self.current_frame;

        while self.playing && self.elapsed_time >= animation.frames[self.current_frame].duration {
            let duration = animation.frames[self.current_frame].duration;
            if duration.is_zero() {
                break;
            }
            self.elapsed_time -= duration;

            if self.current_frame + 1 < animation.frames.len() {
                self.current_frame += 1;
            } else if animation.looping {
                self.current_frame = 0;
            } else {
                self.playing = false;
                self.elapsed_time = Duration::from_secs(0);
            }
        }

        if self.current_frame != start_frame {
            self.current_frame()
        } else {
            None
        }
    }

    /// 再生中か
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// 現在のアニメーションキー
    pub fn current_key(&self) -> Option<&str> {
        self.current.as_ref().map(|animation| animation.key())
    }

    /// 現在のフレーム
    pub fn current_frame(&self) -> Option<&AnimationFrame> {
        self.current
            .as_ref()
            .and_then(|animation| animation.frames.get(self.current_frame))
    }

    /// 現在のフレーム番号
    pub fn frame_index(&self) -> usize {
        self.current_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(looping: bool) -> Rc<Animation> {
        Rc::new(Animation::from_sheet(
            "walk",
            "hero",
            0..2,
            Duration::from_millis(100),
            looping,
        ))
    }

    #[test]
    fn test_animation_manager() {
        let mut manager = AnimationManager::new();
        manager.add(Animation::from_sheet("walk", "hero", 0..4, Duration::from_millis(100), true));

        assert!(manager.exists("walk"));
        assert_eq!(manager.get("walk").unwrap().frames().len(), 4);
        assert_eq!(
            manager.get("run").unwrap_err(),
            MatterError::AnimationNotFound("run".to_string())
        );
    }

    #[test]
    fn test_animation_playback() {
        let mut state = AnimationState::new();

        let first = state.play(walk(true)).cloned();
        assert_eq!(first.unwrap().frame, FrameKey::Index(0));
        assert!(state.is_playing());

        assert!(state.update(Duration::from_millis(50)).is_none());

        let frame = state.update(Duration::from_millis(60)).cloned();
        assert_eq!(frame.unwrap().frame, FrameKey::Index(1));

        // ループして最初のフレームに戻る
        let frame = state.update(Duration::from_millis(100)).cloned();
        assert_eq!(frame.unwrap().frame, FrameKey::Index(0));
    }

    #[test]
    fn test_animation_without_loop_stops_on_last_frame() {
        let mut state = AnimationState::new();
        state.play(walk(false));

        state.update(Duration::from_millis(500));
        assert!(!state.is_playing());
        assert_eq!(state.frame_index(), 1);
        assert_eq!(state.current_key(), Some("walk"));
    }

    #[test]
    fn test_stop_and_resume() {
        let mut state = AnimationState::new();
        state.resume();
        assert!(!state.is_playing());

        state.play(walk(true));
        state.stop();
        assert!(!state.is_playing());
        assert!(state.update(Duration::from_millis(500)).is_none());

        state.resume();
        assert!(state.is_playing());
    }
}
