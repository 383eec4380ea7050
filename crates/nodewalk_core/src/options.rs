//! Traversal options.
//!
//! Options can be loaded from a JSON(C) file and then adjusted from command
//! line style arguments:
//!
//! ```text
//! --default-stop            set a flag
//! --no-verbose              clear a flag
//! --max-depth=3             assign a value
//! --skip-types=Glyph,Kern   replace a list
//! --skip-types+=Anchor      extend a list
//! --skip-types-=Kern        remove from a list
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::OptionsError;

const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/options.json");
static OPTIONS_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// File names searched by [`WalkOptions::discover`], in order.
pub const OPTIONS_FILE_NAMES: &[&str] = &[".nodewalk.jsonc", ".nodewalk.json"];

/// Options shared by passes built on the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Enable debug logging.
    pub verbose: bool,

    /// Report traversal timings.
    pub timing: bool,

    /// Treat an unspecified handler signal as stop.
    pub default_stop: bool,

    /// Maximum reported depth for path-tracking passes. `0` is unlimited.
    pub max_depth: usize,

    /// Record types whose contents are not descended into.
    pub skip_types: Vec<String>,
}

/// Which unknown options [`WalkOptions::parse_opts`] passes through instead
/// of rejecting.
#[derive(Debug, Clone, Copy, Default)]
pub enum IgnoreUnknown<'a> {
    /// Reject every unknown option.
    #[default]
    None,
    /// Pass every unknown option through.
    All,
    /// Pass through only these option names (as spelled on the command
    /// line, without the leading `--`).
    Only(&'a [&'a str]),
}

impl IgnoreUnknown<'_> {
    fn allows(&self, name: &str) -> bool {
        match self {
            IgnoreUnknown::None => false,
            IgnoreUnknown::All => true,
            IgnoreUnknown::Only(names) => names.contains(&name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Assign,
    Extend,
    Remove,
}

impl Op {
    fn as_str(self) -> &'static str {
        match self {
            Op::Assign => "=",
            Op::Extend => "+=",
            Op::Remove => "-=",
        }
    }
}

/// A value as it appeared on the command line.
#[derive(Debug, Clone, Copy)]
enum RawValue<'a> {
    /// `--key` or `--no-key`.
    Flag(bool),
    /// `--key=text`.
    Text(&'a str),
}

enum Slot<'a> {
    Flag(&'a mut bool),
    Count(&'a mut usize),
    List(&'a mut Vec<String>),
}

impl WalkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from a JSON or JSONC file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parses options from a JSON or JSONC string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| OptionsError::Parse(e.to_string()))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        let schema = OPTIONS_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded options schema");
            Validator::new(&schema_json).expect("Invalid options schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(OptionsError::Validation(format!(
                "{} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value).map_err(|e| OptionsError::Parse(e.to_string()))
    }

    /// Looks for an options file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        OPTIONS_FILE_NAMES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Assigns one option by name. Dashes in `key` are read as underscores.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), OptionsError> {
        let key = key.replace('-', "_");
        let Some(slot) = self.slot(&key) else {
            return Err(OptionsError::Unknown(key));
        };
        apply(slot, &key, Op::Assign, RawValue::Text(value))
    }

    /// Applies `--option` arguments and returns every other argument in
    /// order.
    ///
    /// Unknown options fail unless `ignore_unknown` allows them, in which
    /// case they are returned with the positional arguments. Nothing is
    /// applied unless every option parses.
    pub fn parse_opts<S: AsRef<str>>(
        &mut self,
        argv: &[S],
        ignore_unknown: IgnoreUnknown<'_>,
    ) -> Result<Vec<String>, OptionsError> {
        let mut staged = self.clone();
        let mut rest = Vec::new();

        for arg in argv {
            let arg = arg.as_ref();
            let Some(body) = arg.strip_prefix("--") else {
                rest.push(arg.to_string());
                continue;
            };

            let (name, op, value) = split_option(body);
            let key = name.replace('-', "_");
            let Some(slot) = staged.slot(&key) else {
                if ignore_unknown.allows(name) {
                    rest.push(arg.to_string());
                    continue;
                }
                return Err(OptionsError::Unknown(body.to_string()));
            };
            apply(slot, &key, op, value)?;
        }

        *self = staged;
        Ok(rest)
    }

    fn slot(&mut self, key: &str) -> Option<Slot<'_>> {
        match key {
            "verbose" => Some(Slot::Flag(&mut self.verbose)),
            "timing" => Some(Slot::Flag(&mut self.timing)),
            "default_stop" => Some(Slot::Flag(&mut self.default_stop)),
            "max_depth" => Some(Slot::Count(&mut self.max_depth)),
            "skip_types" => Some(Slot::List(&mut self.skip_types)),
            _ => None,
        }
    }
}

/// Splits `key`, `no-key`, `key=v`, `key+=v` and `key-=v`.
fn split_option(body: &str) -> (&str, Op, RawValue<'_>) {
    match body.split_once('=') {
        None => match body.strip_prefix("no-") {
            Some(name) => (name, Op::Assign, RawValue::Flag(false)),
            None => (body, Op::Assign, RawValue::Flag(true)),
        },
        Some((name, value)) => {
            if let Some(name) = name.strip_suffix('+') {
                (name, Op::Extend, RawValue::Text(value))
            } else if let Some(name) = name.strip_suffix('-') {
                (name, Op::Remove, RawValue::Text(value))
            } else {
                (name, Op::Assign, RawValue::Text(value))
            }
        }
    }
}

fn apply(slot: Slot<'_>, key: &str, op: Op, value: RawValue<'_>) -> Result<(), OptionsError> {
    let invalid = |value: &str, expected| OptionsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    };

    match slot {
        Slot::List(list) => {
            let RawValue::Text(text) = value else {
                return Err(invalid("", "a comma-separated list"));
            };
            let items = split_list(text);
            match op {
                Op::Assign => *list = items,
                Op::Extend => list.extend(items),
                Op::Remove => {
                    for item in items {
                        if let Some(pos) = list.iter().position(|x| *x == item) {
                            list.remove(pos);
                        }
                    }
                }
            }
            Ok(())
        }
        _ if op != Op::Assign => Err(OptionsError::UnsupportedOperator {
            key: key.to_string(),
            op: op.as_str(),
        }),
        Slot::Flag(flag) => {
            *flag = match value {
                RawValue::Flag(b) => b,
                RawValue::Text(text) => parse_bool(text).ok_or_else(|| invalid(text, "a boolean"))?,
            };
            Ok(())
        }
        Slot::Count(count) => {
            let RawValue::Text(text) = value else {
                return Err(invalid("", "a non-negative integer"));
            };
            *count = text
                .parse()
                .map_err(|_| invalid(text, "a non-negative integer"))?;
            Ok(())
        }
    }
}

fn split_list(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',').map(str::to_string).collect()
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
