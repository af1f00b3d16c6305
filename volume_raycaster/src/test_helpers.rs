//! Module with helper functions
//! Saves repetition in unit tests

use nalgebra::{vector, Vector3};

use crate::{
    volumetric::{BuildVolume, Volume, VolumeMetadata},
    Intensity,
};

/// Fill volume using function of coordinates
pub fn volume_from_fn<V, F>(size: Vector3<usize>, f: F) -> V
where
    V: Volume + BuildVolume<Intensity>,
    F: Fn(usize, usize, usize) -> Intensity,
{
    let mut data = Vec::with_capacity(size.x * size.y * size.z);
    for x in 0..size.x {
        for y in 0..size.y {
            for z in 0..size.z {
                data.push(f(x, y, z));
            }
        }
    }
    let meta = VolumeMetadata::from_data(size, data);
    BuildVolume::build(meta).unwrap()
}

pub fn white_vol_meta() -> VolumeMetadata<u8> {
    let data = vec![0, 32, 64, 64 + 32, 128, 128 + 32, 128 + 64, 255];
    VolumeMetadata::from_data(vector![2, 2, 2], data)
}

/// 2x2x2 volume, samples 0 to 255
pub fn white_volume<V>() -> V
where
    V: Volume + BuildVolume<u8>,
{
    let meta = white_vol_meta();
    BuildVolume::build(meta).unwrap()
}

/// Volume filled with `value`
pub fn solid_volume<V>(size: Vector3<usize>, value: Intensity) -> V
where
    V: Volume + BuildVolume<Intensity>,
{
    volume_from_fn(size, |_, _, _| value)
}

pub fn empty_volume<V>(size: Vector3<usize>) -> V
where
    V: Volume + BuildVolume<Intensity>,
{
    solid_volume(size, 0)
}

/// Sample value is `x + y + z`
pub fn ramp_volume<V>(size: Vector3<usize>) -> V
where
    V: Volume + BuildVolume<Intensity>,
{
    volume_from_fn(size, |x, y, z| (x + y + z) as Intensity)
}

/// Samples are `low` for `z < z_step`, `high` otherwise
pub fn step_volume<V>(size: Vector3<usize>, z_step: usize, low: Intensity, high: Intensity) -> V
where
    V: Volume + BuildVolume<Intensity>,
{
    volume_from_fn(size, |_, _, z| if z < z_step { low } else { high })
}

/// Ball of `value` in the middle of the volume, zero around
pub fn sphere_volume<V>(side: usize, radius: f32, value: Intensity) -> V
where
    V: Volume + BuildVolume<Intensity>,
{
    let center = (side as f32 - 1.0) / 2.0;
    volume_from_fn(vector![side, side, side], |x, y, z| {
        let offset = vector![x as f32, y as f32, z as f32].add_scalar(-center);
        if offset.magnitude() <= radius {
            value
        } else {
            0
        }
    })
}
