//! 数学ユーティリティモジュール
//!
//! 2次元ベクトルは `(f64, f64)` のタプルで表します。

use std::f64::consts::PI;

/// 2次元ベクトル
pub type Vec2 = (f64, f64);

/// 度数法からラジアンに変換
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// ラジアンから度数法に変換
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// ベクトルの和
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    (a.0 + b.0, a.1 + b.1)
}

/// ベクトルの差
pub fn sub(a: Vec2, b: Vec2) -> Vec2 {
    (a.0 - b.0, a.1 - b.1)
}

/// ベクトルのスカラー倍
pub fn scale(v: Vec2, s: f64) -> Vec2 {
    (v.0 * s, v.1 * s)
}

/// ベクトルの長さの二乗
pub fn length_squared(v: Vec2) -> f64 {
    v.0 * v.0 + v.1 * v.1
}

/// ベクトルの長さ
pub fn length(v: Vec2) -> f64 {
    length_squared(v).sqrt()
}

/// ベクトルの外積
///
/// # 引数
///
/// * `v1` - 1つ目のベクトル (x, y)
/// * `v2` - 2つ目のベクトル (x, y)
///
/// # 戻り値
///
/// * 外積の値（z成分）
pub fn cross(v1: Vec2, v2: Vec2) -> f64 {
    v1.0 * v2.1 - v1.1 * v2.0
}

/// 原点を中心にベクトルを回転
pub fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    (v.0 * cos - v.1 * sin, v.0 * sin + v.1 * cos)
}

/// 角度方向の長さ `length` のベクトル
pub fn from_angle(angle: f64, length: f64) -> Vec2 {
    (angle.cos() * length, angle.sin() * length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_conversion() {
        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-12);
        assert!((radians_to_degrees(PI / 2.0) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate() {
        let v = rotate((1.0, 0.0), PI / 2.0);
        assert!(v.0.abs() < 1e-12);
        assert!((v.1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cross() {
        assert_eq!(cross((1.0, 0.0), (0.0, 1.0)), 1.0);
        assert_eq!(length((3.0, 4.0)), 5.0);
    }
}
