//! レンダリングモジュール
//!
//! テクスチャとフレームの解決、描画状態、アニメーション、パイプラインの関連付けを提供します。

pub mod animation;
pub mod pipeline;
pub mod render_state;
pub mod texture;

pub use animation::{Animation, AnimationFrame, AnimationManager, AnimationState};
pub use pipeline::{PipelineRegistry, TEXTURE_TINT_PIPELINE};
pub use render_state::{BlendMode, RenderState, RenderTransform};
pub use texture::{Frame, FrameKey, Texture, TextureManager, BASE_FRAME};
