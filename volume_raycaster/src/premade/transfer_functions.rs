use std::str::FromStr;

use crate::{
    color::{self, RGBA},
    common::ValueRange,
    error::RenderError,
    transfer_functions::TransferFunction,
    Intensity,
};

/// Step from transparent to `color` at `threshold`
fn step_tf(range: ValueRange, threshold: Intensity, color: RGBA) -> TransferFunction {
    let mut tf = TransferFunction::from_range(range);
    let high = range.high.max(threshold + 1);
    tf.add_control_point(threshold, color::zero());
    tf.add_control_point(threshold + 1, color);
    tf.add_control_point(high, color);
    tf
}

// R G B A -- A <0;1>
// Skull has u8 samples (0;255)
pub fn skull_tf(range: ValueRange) -> TransferFunction {
    step_tf(range, 60, color::new(227.0 / 255.0, 218.0 / 255.0, 201.0 / 255.0, 1.0))
}

pub fn white_tf(range: ValueRange) -> TransferFunction {
    step_tf(range, 10, color::mono(1.0, 0.3))
}

/// Anything above zero is opaque white
pub fn anything_tf(range: ValueRange) -> TransferFunction {
    step_tf(range, 0, color::mono(1.0, 1.0))
}

/// Linear ramp from transparent black at minimum to opaque white at maximum
pub fn gray_ramp_tf(range: ValueRange) -> TransferFunction {
    let mut tf = TransferFunction::from_range(range);
    let last = tf.control_points().len() - 1;
    tf.update_control_point(last, color::mono(1.0, 1.0));
    tf
}

/// Named transfer functions, selectable from command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrewrittenTF {
    Skull,
    White,
    Gray,
    Ramp,
}

impl PrewrittenTF {
    /// Build the transfer function for volume with sample range `range`
    pub fn get_tf(&self, range: ValueRange) -> TransferFunction {
        match self {
            PrewrittenTF::Skull => skull_tf(range),
            PrewrittenTF::White => white_tf(range),
            PrewrittenTF::Gray => anything_tf(range),
            PrewrittenTF::Ramp => gray_ramp_tf(range),
        }
    }
}

impl FromStr for PrewrittenTF {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skull" => Ok(PrewrittenTF::Skull),
            "white" => Ok(PrewrittenTF::White),
            "gray" => Ok(PrewrittenTF::Gray),
            "ramp" => Ok(PrewrittenTF::Ramp),
            _ => Err(RenderError::UnknownName(s.into())),
        }
    }
}
