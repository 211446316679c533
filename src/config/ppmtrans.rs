use super::{load_json, LayoutConfig};
use crate::error::GridError;
use crate::methods::{LayoutKind, MapFn, MethodSuite, Traversal};
use crate::transform::{FlipAxis, Rotation, Transform};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Image to read; stdin when absent.
    pub input: Option<PathBuf>,
    pub layout: LayoutConfig,
    /// Traversal used to fill the destination; the layout's default when
    /// absent.
    pub traversal: Option<Traversal>,
    pub transform: Transform,
    /// File the timing lines are appended to.
    pub time_file: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Resolve the configured traversal against `suite`. Run this once,
    /// before any image work, so a mismatch aborts early.
    pub fn resolve_map<T>(&self, suite: &MethodSuite<T>) -> Result<MapFn<T>, GridError> {
        match self.traversal {
            Some(traversal) => suite.traversal(traversal),
            None => Ok(suite.map_default()),
        }
    }
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    load_json(path)
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [-rotate <0|90|180|270>] [-flip <horizontal|vertical>] [-transpose] \
         [-{{row,col,block}}-major] [-map <row|col|block>] [-blocksize <n>] \
         [-time time_file] [-config config.json] [filename]\n\
         The last -rotate wins; -transpose after -flip keeps the flip."
    )
}

/// Parse `ppmtrans` arguments (without the program name).
///
/// Flags apply left to right; `-config` replaces everything set before it.
/// `-transpose` only switches off rotation: after a `-flip` the image is still
/// flipped in that direction.
pub fn parse_cli<I>(program: &str, args: I) -> Result<RuntimeConfig, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let fail = |msg: String| format!("{msg}\n{}", usage(program));
    let mut config = RuntimeConfig::default();
    let mut flip = None;
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        let mut value = |name: &str| -> Result<String, String> {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| fail(format!("{name} requires a value")))
        };
        match arg {
            "-row-major" => select(&mut config, LayoutKind::RowMajor, Traversal::RowMajor),
            "-col-major" => select(&mut config, LayoutKind::ColumnMajor, Traversal::ColMajor),
            "-block-major" => select(&mut config, LayoutKind::BlockMajor, Traversal::BlockMajor),
            "-map" => {
                let v = value("-map")?;
                config.traversal = Some(parse_traversal(&v).ok_or_else(|| {
                    fail(format!("Map must be 'row', 'col' or 'block', got '{v}'"))
                })?);
            }
            "-blocksize" => {
                let v = value("-blocksize")?;
                let b = v
                    .parse::<usize>()
                    .map_err(|_| fail(format!("Blocksize must be a positive integer, got '{v}'")))?;
                config.layout.blocksize = Some(b);
            }
            "-rotate" => {
                let v = value("-rotate")?;
                let degrees = v
                    .parse::<u32>()
                    .map_err(|_| fail(format!("Rotation must be 0, 90, 180 or 270, got '{v}'")))?;
                let rotation = Rotation::from_degrees(degrees)
                    .map_err(|_| fail("Rotation must be 0, 90, 180 or 270".to_string()))?;
                config.transform = Transform::Rotate(rotation);
            }
            "-flip" => {
                let v = value("-flip")?;
                let axis = match v.as_str() {
                    "horizontal" => FlipAxis::Horizontal,
                    "vertical" => FlipAxis::Vertical,
                    _ => return Err(fail("Flip must be 'horizontal' or 'vertical'".to_string())),
                };
                flip = Some(axis);
                config.transform = Transform::Flip(axis);
            }
            "-transpose" => {
                config.transform = flip.map_or(Transform::Transpose, Transform::Flip);
            }
            "-time" => config.time_file = Some(PathBuf::from(value("-time")?)),
            "-config" => {
                let path = value("-config")?;
                config = load_config(Path::new(&path))?;
                flip = match config.transform {
                    Transform::Flip(axis) => Some(axis),
                    _ => None,
                };
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(fail(format!("{program}: unknown option '{other}'")));
            }
            other => {
                if i + 1 < args.len() {
                    return Err(fail("Too many arguments".to_string()));
                }
                config.input = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    log::debug!("ppmtrans config: {config:?}");
    Ok(config)
}

fn select(config: &mut RuntimeConfig, kind: LayoutKind, traversal: Traversal) {
    config.layout.kind = kind;
    config.traversal = Some(traversal);
}

fn parse_traversal(name: &str) -> Option<Traversal> {
    match name {
        "row" | "row-major" => Some(Traversal::RowMajor),
        "col" | "col-major" | "column-major" => Some(Traversal::ColMajor),
        "block" | "block-major" => Some(Traversal::BlockMajor),
        _ => None,
    }
}
