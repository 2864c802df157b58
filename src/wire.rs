//! JSON shapes for glam vectors
//!
//! glam serializes vectors as arrays; the web client reads points as
//! `{x, y}` / `{x, y, z}` objects like every other record it receives. Use on
//! fields with `#[serde(with = "crate::wire::vec2")]`.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct Xy {
    x: f32,
    y: f32,
}

#[derive(Serialize, Deserialize)]
struct Xyz {
    x: f32,
    y: f32,
    z: f32,
}

pub mod vec2 {
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Xy;

    pub fn serialize<S: Serializer>(v: &Vec2, serializer: S) -> Result<S::Ok, S::Error> {
        Xy { x: v.x, y: v.y }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec2, D::Error> {
        let Xy { x, y } = Xy::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}

pub mod vec3 {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Xyz;

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz { x: v.x, y: v.y, z: v.z }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let Xyz { x, y, z } = Xyz::deserialize(deserializer)?;
        Ok(Vec3::new(x, y, z))
    }
}
