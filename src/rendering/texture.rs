//! テクスチャとフレーム
//!
//! 画像そのものは扱わず、テクスチャキーとフレームの切り出し範囲だけを管理します。

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MatterError, Result};

/// テクスチャ全体を表すフレーム名
pub const BASE_FRAME: &str = "__BASE";

/// フレームの指定方法
///
/// スプライトシートのフレームは `"0"`, `"1"`, ... の名前を持つため、
/// 番号指定はその名前で引き当てます。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameKey {
    Name(String),
    Index(usize),
}

impl FrameKey {
    /// フレーム名
    pub fn name(&self) -> String {
        match self {
            FrameKey::Name(name) => name.clone(),
            FrameKey::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKey::Name(name) => write!(f, "{}", name),
            FrameKey::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for FrameKey {
    fn from(name: &str) -> Self {
        FrameKey::Name(name.to_string())
    }
}

impl From<String> for FrameKey {
    fn from(name: String) -> Self {
        FrameKey::Name(name)
    }
}

impl From<usize> for FrameKey {
    fn from(index: usize) -> Self {
        FrameKey::Index(index)
    }
}

/// フレーム（テクスチャの切り出し範囲）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// テクスチャキー
    pub texture: String,
    /// フレーム名
    pub name: String,
    /// ソースX座標
    pub x: f64,
    /// ソースY座標
    pub y: f64,
    /// 幅
    pub width: f64,
    /// 高さ
    pub height: f64,
}

/// テクスチャ
#[derive(Debug, Clone)]
pub struct Texture {
    key: String,
    width: f64,
    height: f64,
    frames: HashMap<String, Frame>,
    /// 追加順のフレーム名
    frame_names: Vec<String>,
}

impl Texture {
    /// 全体を表すベースフレームだけを持つテクスチャを作成
    pub fn new(key: &str, width: f64, height: f64) -> Self {
        let mut texture = Self {
            key: key.to_string(),
            width,
            height,
            frames: HashMap::new(),
            frame_names: Vec::new(),
        };
        texture.add_frame(BASE_FRAME, 0.0, 0.0, width, height);
        texture
    }

    /// フレームを追加（同名のフレームは置き換え）
    pub fn add_frame(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        let frame = Frame {
            texture: self.key.clone(),
            name: name.to_string(),
            x,
            y,
            width,
            height,
        };
        if self.frames.insert(name.to_string(), frame).is_none() {
            self.frame_names.push(name.to_string());
        }
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// フレームを取得
    pub fn frame(&self, key: &FrameKey) -> Option<&Frame> {
        self.frames.get(&key.name())
    }

    /// ベースフレーム
    pub fn base_frame(&self) -> Option<&Frame> {
        self.frames.get(BASE_FRAME)
    }

    /// ベースフレームを除くフレーム名（追加順）
    pub fn frame_names(&self) -> Vec<&str> {
        self.frame_names
            .iter()
            .filter(|name| name.as_str() != BASE_FRAME)
            .map(|name| name.as_str())
            .collect()
    }
}

/// テクスチャマネージャー
///
/// テクスチャキーとフレームからフレーム情報を解決します。
#[derive(Debug, Default)]
pub struct TextureManager {
    textures: HashMap<String, Texture>,
}

impl TextureManager {
    /// 新しいテクスチャマネージャーを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// テクスチャを追加
    pub fn add(&mut self, texture: Texture) -> &mut Texture {
        match self.textures.entry(texture.key.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(texture);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(texture),
        }
    }

    /// 1枚画像のテクスチャを追加
    pub fn add_image(&mut self, key: &str, width: f64, height: f64) -> &mut Texture {
        self.add(Texture::new(key, width, height))
    }

    /// 等間隔のスプライトシートを追加（フレーム名は `"0"` から）
    pub fn add_spritesheet(
        &mut self,
        key: &str,
        width: f64,
        height: f64,
        frame_width: f64,
        frame_height: f64,
    ) -> &mut Texture {
        let mut texture = Texture::new(key, width, height);

        if frame_width > 0.0 && frame_height > 0.0 {
            let columns = (width / frame_width).floor() as usize;
            let rows = (height / frame_height).floor() as usize;
            for row in 0..rows {
                for column in 0..columns {
                    let index = row * columns + column;
                    texture.add_frame(
                        &index.to_string(),
                        column as f64 * frame_width,
                        row as f64 * frame_height,
                        frame_width,
                        frame_height,
                    );
                }
            }
        }

        self.add(texture)
    }

    /// テクスチャが存在するか
    pub fn exists(&self, key: &str) -> bool {
        self.textures.contains_key(key)
    }

    /// テクスチャを取得
    pub fn get(&self, key: &str) -> Option<&Texture> {
        self.textures.get(key)
    }

    /// テクスチャを削除
    pub fn remove(&mut self, key: &str) -> bool {
        self.textures.remove(key).is_some()
    }

    /// テクスチャキーとフレームからフレームを解決
    ///
    /// フレームを省略した場合はベースフレームを返します。
    pub fn resolve_frame(&self, key: &str, frame: Option<&FrameKey>) -> Result<Frame> {
        let frame_name = frame
            .map(FrameKey::name)
            .unwrap_or_else(|| BASE_FRAME.to_string());

        self.textures
            .get(key)
            .and_then(|texture| texture.frames.get(&frame_name))
            .cloned()
            .ok_or_else(|| MatterError::ResourceNotFound {
                texture: key.to_string(),
                frame: frame_name,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_frame() {
        let mut manager = TextureManager::new();
        manager.add_image("crate", 32.0, 48.0);

        let frame = manager.resolve_frame("crate", None).unwrap();
        assert_eq!(frame.name, BASE_FRAME);
        assert_eq!((frame.width, frame.height), (32.0, 48.0));
    }

    #[test]
    fn test_named_and_indexed_frames() {
        let mut manager = TextureManager::new();
        manager
            .add_image("atlas", 128.0, 128.0)
            .add_frame("hero_idle", 0.0, 0.0, 24.0, 40.0);
        manager.add_spritesheet("walk", 64.0, 32.0, 16.0, 16.0);

        let idle = manager.resolve_frame("atlas", Some(&"hero_idle".into())).unwrap();
        assert_eq!((idle.width, idle.height), (24.0, 40.0));

        let fifth = manager.resolve_frame("walk", Some(&FrameKey::from(5))).unwrap();
        assert_eq!((fifth.x, fifth.y), (16.0, 16.0));
        assert_eq!(manager.get("walk").unwrap().frame_names().len(), 8);
    }

    #[test]
    fn test_missing_resources() {
        let mut manager = TextureManager::new();
        manager.add_image("crate", 32.0, 48.0);

        assert_eq!(
            manager.resolve_frame("crate", Some(&"lid".into())),
            Err(MatterError::ResourceNotFound {
                texture: "crate".to_string(),
                frame: "lid".to_string(),
            })
        );
        assert_eq!(
            manager.resolve_frame("barrel", None),
            Err(MatterError::ResourceNotFound {
                texture: "barrel".to_string(),
                frame: BASE_FRAME.to_string(),
            })
        );
    }

    #[test]
    fn test_frame_key_from_json() {
        let key: FrameKey = serde_json::from_str("3").unwrap();
        assert_eq!(key, FrameKey::Index(3));
        let key: FrameKey = serde_json::from_str(r#""idle""#).unwrap();
        assert_eq!(key.to_string(), "idle");
    }
}
