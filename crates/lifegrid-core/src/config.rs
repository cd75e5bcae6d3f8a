use std::collections::BTreeMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};
use std::str::FromStr;

use anyhow::{
  Context,
  anyhow,
  bail
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

const DEFAULT_MAX_TITLE_WIDTH: usize =
  24;

const RC_ENV_VAR: &str = "LIFEGRIDRC";
const RC_FILE_NAME: &str = ".lifegridrc";
const MAX_INCLUDE_DEPTH: usize = 8;

const KEY_DATA_LOCATION: &str =
  "data.location";
const KEY_DEFAULT_COMMAND: &str =
  "default.command";
const KEY_COLOR: &str = "color";
const KEY_MAX_TITLE_WIDTH: &str =
  "grid.max_title_width";

const DEFAULTS: &[(&str, &str)] = &[
  (KEY_DATA_LOCATION, "~/.lifegrid"),
  (KEY_DEFAULT_COMMAND, "grid"),
  (KEY_COLOR, "on"),
  (KEY_MAX_TITLE_WIDTH, "24")
];

/// Settings from the lifegridrc chain
/// plus command-line overrides.
#[derive(Debug, Clone)]
pub struct Config {
  values:           BTreeMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    Self {
      values:       DEFAULTS
        .iter()
        .map(|(key, value)| {
          (key.to_string(), value.to_string())
        })
        .collect(),
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    match locate_rc(rc_override)? {
      | Some(path) => {
        info!(lifegridrc = %path.display(), "loading lifegridrc");
        cfg.load_file(&path, 0)?;
      }
      | None => {
        warn!(
          "no lifegridrc found; using \
           defaults"
        );
      }
    }

    Ok(cfg)
  }

  /// Applies `--rc key=value` pairs. An
  /// `rc.` prefix on the key is optional.
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      let key = key
        .strip_prefix("rc.")
        .map(str::to_string)
        .unwrap_or(key);
      debug!(key = %key, value = %value, "applying override");
      self.values.insert(key, value);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<&str> {
    self.values.get(key).map(String::as_str)
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = (&String, &String)>
  {
    self.values.iter()
  }

  pub fn data_location(
    &self
  ) -> Option<PathBuf> {
    self
      .get(KEY_DATA_LOCATION)
      .map(|raw| expand_tilde(Path::new(raw)))
  }

  pub fn default_command(&self) -> &str {
    self
      .get(KEY_DEFAULT_COMMAND)
      .map(str::trim)
      .unwrap_or("grid")
  }

  pub fn color(
    &self
  ) -> anyhow::Result<bool> {
    match self.get(KEY_COLOR) {
      | Some(raw) => parse_switch(raw)
        .ok_or_else(|| {
          anyhow!(
            "invalid value for {KEY_COLOR}: \
             {raw} (expected on or off)"
          )
        }),
      | None => Ok(true)
    }
  }

  pub fn max_title_width(
    &self
  ) -> anyhow::Result<usize> {
    Ok(
      self
        .parse_setting(KEY_MAX_TITLE_WIDTH)?
        .unwrap_or(DEFAULT_MAX_TITLE_WIDTH)
    )
  }

  fn parse_setting<T>(
    &self,
    key: &str
  ) -> anyhow::Result<Option<T>>
  where
    T: FromStr,
    T::Err: std::fmt::Display
  {
    self
      .get(key)
      .map(|raw| {
        raw.trim().parse::<T>().map_err(
          |err| {
            anyhow!(
              "invalid value for {key}: \
               {raw} ({err})"
            )
          }
        )
      })
      .transpose()
  }

  fn load_file(
    &mut self,
    path: &Path,
    depth: usize
  ) -> anyhow::Result<()> {
    if depth > MAX_INCLUDE_DEPTH {
      bail!(
        "includes nested deeper than \
         {MAX_INCLUDE_DEPTH} at {}",
        path.display()
      );
    }

    let path = expand_tilde(path);
    let text = fs::read_to_string(&path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    self.loaded_files.push(path.clone());

    let base_dir = path
      .parent()
      .unwrap_or_else(|| Path::new("."))
      .to_path_buf();

    for (idx, raw_line) in
      text.lines().enumerate()
    {
      let line_no = idx + 1;
      let parsed = parse_rc_line(raw_line)
        .map_err(|reason| {
          anyhow!(
            "invalid config line {}:{}: \
             {reason}",
            path.display(),
            line_no
          )
        })?;

      match parsed {
        | RcLine::Blank => {}
        | RcLine::Include(target) => {
          let target = include_target(
            &base_dir, target
          );
          if target.exists() {
            debug!(
              file = %path.display(),
              include = %target.display(),
              line = line_no,
              "following include"
            );
            self
              .load_file(&target, depth + 1)?;
          } else {
            warn!(include = %target.display(), "include file does not exist; skipping");
          }
        }
        | RcLine::Setting { key, value } => {
          trace!(key, value, "loaded config key");
          self.values.insert(
            key.to_string(),
            value.to_string()
          );
        }
      }
    }

    Ok(())
  }
}

#[derive(Debug, PartialEq, Eq)]
enum RcLine<'a> {
  Blank,
  Include(&'a str),
  Setting { key: &'a str, value: &'a str }
}

fn parse_rc_line(
  raw: &str
) -> Result<RcLine<'_>, String> {
  let line = strip_comment(raw).trim();
  if line.is_empty() {
    return Ok(RcLine::Blank);
  }

  if let Some(target) =
    line.strip_prefix("include ")
  {
    let target = target.trim();
    if target.is_empty() {
      return Err(
        "include needs a path".to_string()
      );
    }
    return Ok(RcLine::Include(target));
  }

  let (key, value) = line
    .split_once('=')
    .ok_or_else(|| {
      format!("expected key = value: {raw}")
    })?;
  let key = key.trim();
  if key.is_empty() {
    return Err(format!("missing key: {raw}"));
  }

  Ok(RcLine::Setting {
    key,
    value: value.trim()
  })
}

/// Cuts a `#` comment that starts the line
/// or follows whitespace. A `#` inside a
/// value such as `~/a#b` is kept.
fn strip_comment(line: &str) -> &str {
  let mut prev_is_space = true;
  for (idx, ch) in line.char_indices() {
    if ch == '#' && prev_is_space {
      return &line[..idx];
    }
    prev_is_space = ch.is_whitespace();
  }
  line
}

fn locate_rc(
  rc_override: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = rc_override {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(from_env) =
    std::env::var(RC_ENV_VAR)
  {
    return Ok(
      (from_env != "/dev/null")
        .then(|| PathBuf::from(from_env))
    );
  }

  let candidate =
    home_dir()?.join(RC_FILE_NAME);
  Ok(candidate.exists().then_some(candidate))
}

/// Picks the data directory and makes sure
/// it exists.
#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = match override_dir {
    | Some(path) => path.to_path_buf(),
    | None => match cfg.data_location() {
      | Some(dir) => dir,
      | None => home_dir()?.join(".lifegrid")
    }
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

fn home_dir() -> anyhow::Result<PathBuf> {
  dirs::home_dir().ok_or_else(|| {
    anyhow!("cannot determine home directory")
  })
}

fn include_target(
  base_dir: &Path,
  target: &str
) -> PathBuf {
  let expanded = expand_tilde(Path::new(target));
  if expanded.is_absolute() {
    expanded
  } else {
    base_dir.join(expanded)
  }
}

fn expand_tilde(path: &Path) -> PathBuf {
  if let Ok(rest) = path.strip_prefix("~")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_switch(raw: &str) -> Option<bool> {
  match raw.trim().to_ascii_lowercase().as_str()
  {
    | "on" | "yes" | "y" | "true" | "1" => {
      Some(true)
    }
    | "off" | "no" | "n" | "false" | "0" => {
      Some(false)
    }
    | _ => None
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn loads_keys_comments_and_includes() {
    let temp = tempdir().expect("tempdir");
    let extra = temp.path().join("extra.rc");
    fs::write(
      &extra,
      "grid.max_title_width = 12\n"
    )
    .expect("write include");

    let rc = temp.path().join("lifegridrc");
    fs::write(
      &rc,
      "# personal settings\n\
       color = off # no ansi\n\
       \n\
       include extra.rc\n\
       include missing.rc\n"
    )
    .expect("write rc");

    let cfg = Config::load(Some(rc.as_path()))
      .expect("load config");

    assert!(!cfg.color().expect("color"));
    assert_eq!(
      cfg.max_title_width().expect("width"),
      12
    );
    assert_eq!(cfg.default_command(), "grid");
    assert_eq!(cfg.loaded_files.len(), 2);
  }

  #[test]
  fn hash_inside_a_value_is_kept() {
    assert_eq!(
      parse_rc_line("data.location = ~/a#b"),
      Ok(RcLine::Setting {
        key:   "data.location",
        value: "~/a#b"
      })
    );
    assert_eq!(
      parse_rc_line("color = on #trailing"),
      Ok(RcLine::Setting {
        key:   "color",
        value: "on"
      })
    );
    assert_eq!(
      parse_rc_line("   # whole line"),
      Ok(RcLine::Blank)
    );
  }

  #[test]
  fn rejects_lines_without_equals() {
    let temp = tempdir().expect("tempdir");
    let rc = temp.path().join("lifegridrc");
    fs::write(&rc, "color off\n")
      .expect("write rc");

    let err = Config::load(Some(rc.as_path()))
      .expect_err("invalid line");
    assert!(
      err.to_string().contains("invalid config line")
    );
  }

  #[test]
  fn self_include_stops_at_depth_limit() {
    let temp = tempdir().expect("tempdir");
    let rc = temp.path().join("lifegridrc");
    fs::write(&rc, "include lifegridrc\n")
      .expect("write rc");

    let err = Config::load(Some(rc.as_path()))
      .expect_err("include loop");
    assert!(
      err.to_string().contains("nested deeper")
    );
  }

  #[test]
  fn overrides_strip_rc_prefix() {
    let mut cfg = Config::default();
    cfg.apply_overrides(vec![
      ("rc.color".to_string(), "n".to_string()),
      ("default.command".to_string(), "domains".to_string()),
    ]);

    assert!(!cfg.color().expect("color"));
    assert_eq!(cfg.default_command(), "domains");
  }

  #[test]
  fn invalid_settings_are_errors() {
    let mut cfg = Config::default();
    cfg.apply_overrides(vec![
      ("color".to_string(), "sometimes".to_string()),
      ("grid.max_title_width".to_string(), "wide".to_string()),
    ]);

    assert!(cfg.color().is_err());
    assert!(cfg.max_title_width().is_err());
  }

  #[test]
  fn data_dir_override_is_created() {
    let temp = tempdir().expect("tempdir");
    let target = temp.path().join("nested").join("data");

    let dir = resolve_data_dir(
      &Config::default(),
      Some(target.as_path())
    )
    .expect("resolve data dir");

    assert_eq!(dir, target);
    assert!(dir.is_dir());
  }
}
