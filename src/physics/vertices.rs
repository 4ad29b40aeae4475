//! 頂点ユーティリティ
//!
//! 剛体のローカル頂点（重心を原点とする）に対する幾何計算です。

use crate::utils::math::{self, Vec2};

/// 多角形の面積（頂点順序によらず正の値）
pub fn area(vertices: &[Vec2]) -> f64 {
    signed_area(vertices).abs()
}

/// 符号付き面積
fn signed_area(vertices: &[Vec2]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let j = (i + 1) % vertices.len();
        sum += math::cross(vertices[i], vertices[j]);
    }
    sum / 2.0
}

/// 多角形の重心
pub fn centre(vertices: &[Vec2]) -> Vec2 {
    let area = signed_area(vertices);
    if area.abs() < f64::EPSILON {
        // 面積がない場合は頂点の平均
        let n = vertices.len().max(1) as f64;
        let sum = vertices.iter().fold((0.0, 0.0), |acc, v| math::add(acc, *v));
        return math::scale(sum, 1.0 / n);
    }

    let mut centre = (0.0, 0.0);
    for i in 0..vertices.len() {
        let j = (i + 1) % vertices.len();
        let cross = math::cross(vertices[i], vertices[j]);
        let temp = math::scale(math::add(vertices[i], vertices[j]), cross);
        centre = math::add(centre, temp);
    }
    math::scale(centre, 1.0 / (6.0 * area))
}

/// 重心まわりの慣性モーメント
pub fn inertia(vertices: &[Vec2], mass: f64) -> f64 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for n in 0..vertices.len() {
        let j = (n + 1) % vertices.len();
        let (a, b) = (vertices[j], vertices[n]);
        let cross = math::cross(a, b).abs();
        numerator += cross * (dot(a, a) + dot(a, b) + dot(b, b));
        denominator += cross;
    }

    if denominator == 0.0 {
        return 0.0;
    }
    (mass / 6.0) * (numerator / denominator)
}

fn dot(a: Vec2, b: Vec2) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

/// 頂点を重心が原点になるよう移動
pub fn recentre(vertices: &[Vec2]) -> Vec<Vec2> {
    let c = centre(vertices);
    vertices.iter().map(|v| math::sub(*v, c)).collect()
}

/// 軸並行境界ボックス (min_x, min_y, max_x, max_y)
pub fn bounds(vertices: &[Vec2]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for &(x, y) in vertices {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    (min_x, min_y, max_x, max_y)
}

/// 幅×高さの長方形
pub fn rectangle(width: f64, height: f64) -> Vec<Vec2> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    vec![(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
}

/// 正多角形
pub fn regular_polygon(sides: u32, radius: f64) -> Vec<Vec2> {
    let theta = 2.0 * std::f64::consts::PI / sides as f64;
    let offset = theta * 0.5;

    (0..sides)
        .map(|i| math::from_angle(offset + i as f64 * theta, radius))
        .collect()
}

/// 上辺が `slope` で狭まる台形
pub fn trapezoid(width: f64, height: f64, slope: f64) -> Vec<Vec2> {
    let slope = slope * 0.5;
    let roof = (1.0 - slope * 2.0) * width;
    let x1 = width * slope;
    let x2 = x1 + roof;
    let x3 = x2 + x1;

    let raw = if slope < 0.5 {
        vec![(0.0, 0.0), (x1, -height), (x2, -height), (x3, 0.0)]
    } else {
        vec![(0.0, 0.0), (x2, -height), (x3, 0.0)]
    };
    recentre(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_area_and_bounds() {
        let rect = rectangle(32.0, 48.0);
        assert_eq!(area(&rect), 32.0 * 48.0);
        assert_eq!(bounds(&rect), (-16.0, -24.0, 16.0, 24.0));

        let c = centre(&rect);
        assert!(c.0.abs() < 1e-12 && c.1.abs() < 1e-12);
    }

    #[test]
    fn test_regular_polygon() {
        let hexagon = regular_polygon(6, 10.0);
        assert_eq!(hexagon.len(), 6);
        for v in &hexagon {
            assert!((math::length(*v) - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_trapezoid_is_centred() {
        let trap = trapezoid(40.0, 20.0, 0.5);
        assert_eq!(trap.len(), 4);
        let c = centre(&trap);
        assert!(c.0.abs() < 1e-9 && c.1.abs() < 1e-9);
    }

    #[test]
    fn test_inertia_scales_with_mass() {
        let rect = rectangle(10.0, 10.0);
        let i1 = inertia(&rect, 1.0);
        let i2 = inertia(&rect, 2.0);
        assert!(i1 > 0.0);
        assert!((i2 - 2.0 * i1).abs() < 1e-9);
    }
}
