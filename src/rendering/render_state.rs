//! 描画状態
//!
//! ゲームオブジェクトが所有する描画用の状態です。
//! 剛体とは独立しており、剛体を差し替えても変わりません。

use serde::{Deserialize, Serialize};

use crate::rendering::texture::Frame;

/// ブレンドモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlendMode {
    #[default]
    Normal,
    Add,
    Multiply,
    Screen,
}

/// 描画状態
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// テクスチャキー
    pub texture: String,
    /// 現在のフレーム
    pub frame: Frame,
    /// 幅
    pub width: f64,
    /// 高さ
    pub height: f64,
    /// 原点（0.0〜1.0）
    pub origin: (f64, f64),
    /// 色合い（0xRRGGBB）
    pub tint: u32,
    /// 透明度（0.0〜1.0）
    pub alpha: f64,
    /// 可視性
    pub visible: bool,
    /// 描画順
    pub depth: f64,
    /// ブレンドモード
    pub blend_mode: BlendMode,
    /// 水平反転
    pub flip_x: bool,
    /// 垂直反転
    pub flip_y: bool,
}

impl RenderState {
    /// フレームから描画状態を作成（大きさはフレームと同じ）
    pub fn new(frame: Frame) -> Self {
        Self {
            texture: frame.texture.clone(),
            width: frame.width,
            height: frame.height,
            frame,
            origin: (0.5, 0.5),
            tint: 0xFF_FFFF,
            alpha: 1.0,
            visible: true,
            depth: 0.0,
            blend_mode: BlendMode::Normal,
            flip_x: false,
            flip_y: false,
        }
    }

    /// フレームを設定
    ///
    /// `update_size` が真ならフレームの大きさに合わせます。
    pub fn set_frame(&mut self, frame: Frame, update_size: bool) {
        self.texture = frame.texture.clone();
        self.frame = frame;
        if update_size {
            self.set_size_to_frame();
        }
    }

    /// 大きさをフレームに合わせる
    pub fn set_size_to_frame(&mut self) {
        self.width = self.frame.width;
        self.height = self.frame.height;
    }

    /// 原点を設定
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.origin = (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
    }

    /// 原点のピクセル位置
    pub fn display_origin(&self) -> (f64, f64) {
        (self.origin.0 * self.width, self.origin.1 * self.height)
    }

    /// 透明度を設定
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// 反転を設定
    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
    }
}

/// 描画用の変形
///
/// 剛体から同期した位置、回転、スケールです。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    pub x: f64,
    pub y: f64,
    /// 回転角度（ラジアン）
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for RenderTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: f64, height: f64) -> Frame {
        Frame {
            texture: "crate".to_string(),
            name: "__BASE".to_string(),
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    #[test]
    fn test_render_state_creation() {
        let state = RenderState::new(frame(32.0, 48.0));

        assert_eq!(state.texture, "crate");
        assert_eq!((state.width, state.height), (32.0, 48.0));
        assert_eq!(state.display_origin(), (16.0, 24.0));
        assert!(state.visible);
        assert_eq!(state.alpha, 1.0);
        assert_eq!(state.blend_mode, BlendMode::Normal);
    }

    #[test]
    fn test_render_state_properties() {
        let mut state = RenderState::new(frame(32.0, 48.0));

        state.set_origin(0.0, 2.0);
        assert_eq!(state.origin, (0.0, 1.0));

        state.set_alpha(-1.0);
        assert_eq!(state.alpha, 0.0);
        state.set_alpha(2.0);
        assert_eq!(state.alpha, 1.0);

        state.set_flip(true, false);
        assert!(state.flip_x && !state.flip_y);
    }

    #[test]
    fn test_set_frame() {
        let mut state = RenderState::new(frame(32.0, 48.0));

        state.set_frame(frame(16.0, 16.0), false);
        assert_eq!((state.width, state.height), (32.0, 48.0));

        state.set_size_to_frame();
        assert_eq!((state.width, state.height), (16.0, 16.0));
    }
}
