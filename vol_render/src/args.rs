//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

// u32 range
pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u32>() {
        Ok(0) => Err("Value must be at least 1".into()),
        Ok(_) => Ok(()),
        Err(_) => Err("Whole number expected".into()),
    }
}

pub fn can_fit_intensity(num: &str) -> Result<(), String> {
    num.parse::<i16>()
        .map(|_| ())
        .map_err(|_| "Sample must fit in range <-32768;32767>".into())
}

pub fn is_float_number(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(()),
        _ => Err("Finite number expected".into()),
    }
}

const GENERATOR_NAMES: &[&str] = &["shapes", "noise", "solid", "sphere"];
const MODE_NAMES: &[&str] = &["slice", "mip", "composite", "transfer2d", "iso"];
const TF_NAMES: &[&str] = &["skull", "white", "gray", "ramp"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-render")
        .author("Michal Majer")
        .version("0.1.0")
        .about("Renders generated volume into PNG images")
        .arg(
            Arg::new("dims")
                .help("Volume size in samples")
                .long("dims")
                .short('d')
                .required(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("generator")
                .help("Volume generator")
                .long("generator")
                .short('g')
                .takes_value(true)
                .value_name("NAME")
                .default_value("sphere")
                .possible_values(GENERATOR_NAMES),
        )
        .arg(
            Arg::new("seed")
                .help("RNG seed, random if omitted")
                .long("seed")
                .value_name("SEED")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("sample")
                .help("Sample value of generated objects")
                .long("sample")
                .value_name("VALUE")
                .default_value("200")
                .validator(|s| is_positive_number(s).and(can_fit_intensity(s))),
        )
        .arg(
            Arg::new("object-size")
                .help("Side of generated objects")
                .long("object-size")
                .value_name("SIDE")
                .default_value("20")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("n-of-shapes")
                .help("Number of shapes, used by shapes generator")
                .long("n-of-shapes")
                .value_name("N")
                .default_value("5")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("mode")
                .help("Render mode in front of cutting plane")
                .long("mode")
                .short('m')
                .value_name("MODE")
                .default_value("composite")
                .possible_values(MODE_NAMES),
        )
        .arg(
            Arg::new("back-mode")
                .help("Render mode behind cutting plane, enables the plane")
                .long("back-mode")
                .value_name("MODE")
                .possible_values(MODE_NAMES),
        )
        .arg(
            Arg::new("plane-normal")
                .help("Normal of cutting plane, plane goes through volume centre")
                .long("plane-normal")
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .requires("back-mode")
                .allow_hyphen_values(true)
                .validator(is_float_number),
        )
        .arg(
            Arg::new("plane-from-view")
                .help("Cutting plane faces right of the first frame's view")
                .long("plane-from-view")
                .requires("back-mode")
                .conflicts_with("plane-normal"),
        )
        .arg(
            Arg::new("tf")
                .help("Transfer function used in compositing")
                .long("tf")
                .value_name("NAME")
                .default_value("ramp")
                .possible_values(TF_NAMES),
        )
        .arg(
            Arg::new("iso-value")
                .help("Iso value for isosurface mode")
                .long("iso-value")
                .value_name("VALUE")
                .default_value("95")
                .validator(is_float_number),
        )
        .arg(Arg::new("shading").help("Use Phong shading").long("shading"))
        .arg(
            Arg::new("fast")
                .help("Render with the coarse sample step")
                .long("fast"),
        )
        .arg(
            Arg::new("single-thread")
                .help("Render rows in the calling thread only")
                .long("single-thread"),
        )
        .arg(
            Arg::new("frames")
                .help("Number of frames, camera turns around the volume")
                .long("frames")
                .short('n')
                .value_name("N")
                .default_value("1")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("output-file")
                .help("Output image, frame number is appended for more frames")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("frame.png")),
        )
}
