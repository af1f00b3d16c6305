use std::{ffi::OsString, str::FromStr};

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use nalgebra::{vector, Vector3};
use volume_raycaster::{
    premade::PrewrittenTF,
    render::{CuttingPlane, RenderConfig, RenderMode, RenderQuality},
    volumetric::Volume,
    Intensity, ViewBasis,
};

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>>
where
    T: FromStr + Copy,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let vals = args
        .values_of(key)
        .ok_or_else(|| anyhow!("missing argument {key}"))?
        .map(|v| v.parse::<T>())
        .collect::<Result<Vec<T>, _>>()
        .with_context(|| format!("parsing {key}"))?;

    match vals[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(anyhow!("{key} needs 3 values")),
    }
}

/// Parse value of argument `key`, `None` if not present
fn parse_value<T>(args: &ArgMatches, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    args.value_of(key)
        .map(|s| s.parse::<T>().with_context(|| format!("parsing {key}")))
        .transpose()
}

/// Parse value of argument with default value
fn parse_required<T>(args: &ArgMatches, key: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(args, key)?.ok_or_else(|| anyhow!("missing argument {key}"))
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<usize>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
    /// Mode in front of the cutting plane
    pub mode: RenderMode,
    /// Mode behind the cutting plane, `None` means no plane
    pub back_mode: Option<RenderMode>,
    pub plane_normal: Vector3<f32>,
    /// Normal taken from the first view instead of `plane_normal`
    pub plane_from_view: bool,
    pub tf: PrewrittenTF,
    pub iso_value: f32,
    pub shading: bool,
    pub quality: RenderQuality,
    pub multi_thread: bool,
    pub frames: usize,
    // Output file name
    pub file_name: OsString,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config> {
        let dims = values_to_vector3(args, "dims")?;
        let generator = GeneratorConfig::from_args(args)?;
        let seed = parse_value(args, "seed")?;

        let mode = parse_required(args, "mode")?;
        let back_mode = parse_value(args, "back-mode")?;
        let plane_normal = if args.is_present("plane-normal") {
            values_to_vector3(args, "plane-normal")?
        } else {
            vector![0.0, 0.0, 1.0]
        };
        if plane_normal.norm() == 0.0 {
            return Err(anyhow!("plane normal cannot be zero"));
        }

        let plane_from_view = args.is_present("plane-from-view");

        let tf = parse_required(args, "tf")?;
        let iso_value = parse_required(args, "iso-value")?;

        let shading = args.is_present("shading");
        let quality = if args.is_present("fast") {
            RenderQuality::Fast
        } else {
            RenderQuality::Quality
        };
        let multi_thread = !args.is_present("single-thread");
        let frames = parse_required(args, "frames")?;

        // has default value
        let file_name = args
            .value_of_os("output-file")
            .ok_or_else(|| anyhow!("missing output file"))?
            .into();

        Ok(Config {
            dims,
            generator,
            seed,
            mode,
            back_mode,
            plane_normal,
            plane_from_view,
            tf,
            iso_value,
            shading,
            quality,
            multi_thread,
            frames,
            file_name,
        })
    }

    /// Render configuration for `volume`, first frame seen from `basis`
    ///
    /// Back side gets the front mode unless a back mode was requested,
    /// which also enables the cutting plane.
    pub fn render_config<V: Volume>(&self, volume: &V, basis: &ViewBasis) -> RenderConfig {
        let mut render_config = RenderConfig::for_volume(volume);
        let range = volume.get_range();

        for side in [&mut render_config.front, &mut render_config.back] {
            side.mode = self.mode;
            side.iso_value = self.iso_value;
            side.shading = self.shading;
            side.tf = self.tf.get_tf(range);
        }

        if let Some(back_mode) = self.back_mode {
            let point = render_config.cutting_plane.point;
            render_config.back.mode = back_mode;
            render_config.cutting_plane = if self.plane_from_view {
                CuttingPlane::from_view_basis(point, basis)
            } else {
                CuttingPlane::new(point, self.plane_normal.normalize())
            };
        }
        render_config
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorConfig {
    /// Randomly placed cuboids and spheres
    Shapes {
        n_of_shapes: usize,
        sample: Intensity,
        obj_size: usize,
    },
    /// Smooth random field
    Noise { sample: Intensity },
    /// Solid block with empty border
    Solid { sample: Intensity },
    /// Ball in the centre, dense core fading to the surface
    Sphere { sample: Intensity, obj_size: usize },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig> {
        let name: &str = args
            .value_of("generator")
            .ok_or_else(|| anyhow!("missing generator"))?;
        let sample = parse_required(args, "sample")?;

        let cfg = match name {
            "shapes" => GeneratorConfig::Shapes {
                n_of_shapes: parse_required(args, "n-of-shapes")?,
                sample,
                obj_size: parse_required(args, "object-size")?,
            },
            "noise" => GeneratorConfig::Noise { sample },
            "solid" => GeneratorConfig::Solid { sample },
            "sphere" => GeneratorConfig::Sphere {
                sample,
                obj_size: parse_required(args, "object-size")?,
            },
            _ => return Err(anyhow!("unknown generator {name}")),
        };
        Ok(cfg)
    }
}

#[cfg(test)]
mod test {

    use nalgebra::point;
    use volume_raycaster::{test_helpers::solid_volume, volumetric::LinearVolume};

    use super::*;
    use crate::args::get_command;

    fn config_from(args: &[&str]) -> Result<Config> {
        let mut argv = vec!["vol_render"];
        argv.extend_from_slice(args);
        let matches = get_command().try_get_matches_from(argv)?;
        Config::from_args(&matches)
    }

    #[test]
    fn defaults() {
        let cfg = config_from(&["--dims=10,20,30"]).unwrap();

        assert_eq!(cfg.dims, vector![10, 20, 30]);
        assert_eq!(
            cfg.generator,
            GeneratorConfig::Sphere {
                sample: 200,
                obj_size: 20
            }
        );
        assert_eq!(cfg.mode, RenderMode::Compositing);
        assert_eq!(cfg.back_mode, None);
        assert_eq!(cfg.tf, PrewrittenTF::Ramp);
        assert_eq!(cfg.quality, RenderQuality::Quality);
        assert!(cfg.multi_thread);
        assert!(!cfg.shading);
        assert_eq!(cfg.frames, 1);
        assert_eq!(cfg.seed, None);
        assert!(!cfg.plane_from_view);
        assert_eq!(cfg.file_name, OsString::from("frame.png"));
    }

    #[test]
    fn render_options() {
        let cfg = config_from(&[
            "--dims=8,8,8",
            "--mode",
            "iso",
            "--back-mode",
            "mip",
            "--plane-normal=-1,0,0",
            "--iso-value",
            "120.5",
            "--shading",
            "--fast",
            "--single-thread",
            "-n",
            "4",
        ])
        .unwrap();

        assert_eq!(cfg.mode, RenderMode::Isosurface);
        assert_eq!(cfg.back_mode, Some(RenderMode::MaximumIntensityProjection));
        assert_eq!(cfg.plane_normal, vector![-1.0, 0.0, 0.0]);
        assert_eq!(cfg.iso_value, 120.5);
        assert!(cfg.shading);
        assert_eq!(cfg.quality, RenderQuality::Fast);
        assert!(!cfg.multi_thread);
        assert_eq!(cfg.frames, 4);
    }

    #[test]
    fn shapes_generator() {
        let cfg = config_from(&[
            "--dims=8,8,8",
            "-g",
            "shapes",
            "--n-of-shapes",
            "3",
            "--sample",
            "1000",
            "--seed",
            "7",
        ])
        .unwrap();

        assert_eq!(
            cfg.generator,
            GeneratorConfig::Shapes {
                n_of_shapes: 3,
                sample: 1000,
                obj_size: 20
            }
        );
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn cutting_plane_from_back_mode() {
        let volume: LinearVolume = solid_volume(vector![4, 4, 4], 10);
        let basis = ViewBasis::default();

        let cfg = config_from(&["--dims=4,4,4", "--mode", "mip", "--shading"]).unwrap();
        let render_config = cfg.render_config(&volume, &basis);
        assert_eq!(render_config.front.mode, RenderMode::MaximumIntensityProjection);
        assert_eq!(render_config.back.mode, RenderMode::MaximumIntensityProjection);
        assert!(render_config.back.shading);
        assert!(!render_config.cutting_plane.enabled);

        let cfg = config_from(&["--dims=4,4,4", "--back-mode", "iso", "--plane-normal=0,2,0"])
            .unwrap();
        let render_config = cfg.render_config(&volume, &basis);
        assert_eq!(render_config.back.mode, RenderMode::Isosurface);
        assert!(render_config.cutting_plane.enabled);
        assert_eq!(render_config.cutting_plane.normal, vector![0.0, 1.0, 0.0]);
        assert_eq!(render_config.cutting_plane.point, point![2.0, 2.0, 2.0]);
    }

    #[test]
    fn cutting_plane_from_view() {
        let volume: LinearVolume = solid_volume(vector![4, 4, 4], 10);
        let basis = ViewBasis::new(
            vector![1.0, 0.0, 0.0],
            vector![0.0, 0.0, 1.0],
            vector![0.0, 1.0, 0.0],
        );

        let cfg = config_from(&["--dims=4,4,4", "--back-mode", "mip", "--plane-from-view"])
            .unwrap();
        assert!(cfg.plane_from_view);

        let render_config = cfg.render_config(&volume, &basis);
        assert!(render_config.cutting_plane.enabled);
        assert_eq!(render_config.cutting_plane.normal, basis.right);
    }

    #[test]
    fn zero_normal_rejected() {
        let res = config_from(&["--dims=8,8,8", "--back-mode", "iso", "--plane-normal=0,0,0"]);
        assert!(res.is_err());
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(config_from(&["--dims=0,8,8"]).is_err());
    }
}
