/*
    volume_raycaster
    Author: Michal Majer
    Date: 2022-05-05
*/

use nalgebra::{vector, Vector4};

/// Color with alpha, all channels in range <0;1>
pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

/// Convert channel from <0;1> to byte.
/// Values over 1 saturate, negative values map to 0.
pub fn channel_to_byte(v: f32) -> u8 {
    if v >= 1.0 {
        255
    } else if v > 0.0 {
        f32::floor(v * 255.0) as u8
    } else {
        0
    }
}

/// Color as 4 bytes, order R G B A
pub fn to_bytes(color: &RGBA) -> [u8; 4] {
    [
        channel_to_byte(color.x),
        channel_to_byte(color.y),
        channel_to_byte(color.z),
        channel_to_byte(color.w),
    ]
}

/// Pack color into `0xAARRGGBB`
pub fn pack_argb(color: &RGBA) -> u32 {
    let [r, g, b, a] = to_bytes(color);
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}
