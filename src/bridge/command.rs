//! Typed backend commands and their replies.
//!
//! Every backend reply carries a nullable `message`; the other fields depend
//! on the command. Each command names its own reply type, so callers get a
//! typed result while the wire stays plain JSON.

use super::invoker::Args;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A backend reply.
pub trait Reply: DeserializeOwned + Send {
    /// Human-readable message, if the backend sent one
    fn message(&self) -> Option<&str>;
}

/// A named backend command with its argument shape and reply type.
///
/// Arguments are the command's own fields, serialized in camelCase.
pub trait Command: Serialize + Sync {
    const NAME: &'static str;

    type Output: Reply;

    fn args(&self) -> Result<Args, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(args) => Ok(args),
            Value::Null => Ok(Args::new()),
            other => Err(serde::ser::Error::custom(format!(
                "command arguments must be an object, got {other}"
            ))),
        }
    }
}

/// Untyped reply: the message plus whatever else the backend sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reply for CommandResult {
    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

macro_rules! impl_reply {
    ($($reply:ty),* $(,)?) => {
        $(
            impl Reply for $reply {
                fn message(&self) -> Option<&str> {
                    self.message.as_deref()
                }
            }
        )*
    };
}

// Shared enums

/// How chapters are grouped into volumes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BundleFlag {
    Name,
    Image,
    #[default]
    Manual,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileFormat {
    Pdf,
    Epub,
    #[default]
    Cbz,
}

/// Reading direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "Left to Right")]
    Ltr,
    #[serde(rename = "Right to Left")]
    Rtl,
}

// Replies

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandDefault {
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandGetData {
    pub message: Option<String>,
    pub data: Vec<Vec<PathBuf>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandAnalyze {
    pub message: Option<String>,
    pub negative: Vec<String>,
    pub positive: Vec<String>,
    pub suggest: Vec<String>,
    pub flag: BundleFlag,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandBundle {
    pub message: Option<String>,
    pub total_chapters: usize,
    pub total_volumes: Option<usize>,
    pub chapter_sizes: Option<Vec<usize>>,
}

impl_reply!(CommandDefault, CommandGetData, CommandAnalyze, CommandBundle);

// Commands

/// Clear all backend session state.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Reset;

impl Command for Reset {
    const NAME: &'static str = "reset";
    type Output = CommandDefault;
}

/// Select the source directory.
#[derive(Clone, Debug, Serialize)]
pub struct SetSource {
    pub source: String,
}

impl Command for SetSource {
    const NAME: &'static str = "set_source";
    type Output = CommandDefault;
}

#[derive(Clone, Debug, Serialize)]
pub struct SetVolumeSizes {
    pub sizes: Vec<usize>,
}

impl Command for SetVolumeSizes {
    const NAME: &'static str = "set_volume_sizes";
    type Output = CommandDefault;
}

#[derive(Clone, Debug, Serialize)]
pub struct SetBundleFlag {
    pub flag: BundleFlag,
}

impl Command for SetBundleFlag {
    const NAME: &'static str = "set_bundle_flag";
    type Output = CommandDefault;
}

/// Replace the chapter/page listing.
#[derive(Clone, Debug, Serialize)]
pub struct SetData {
    pub data: Vec<Vec<PathBuf>>,
}

impl Command for SetData {
    const NAME: &'static str = "set_data";
    type Output = CommandDefault;
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct GetData;

impl Command for GetData {
    const NAME: &'static str = "get_data";
    type Output = CommandGetData;
}

/// Inspect the source directory and recommend a bundle method.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Analyze;

impl Command for Analyze {
    const NAME: &'static str = "analyze";
    type Output = CommandAnalyze;
}

/// Group chapters into volumes.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Bundle {
    pub sensibility: Option<usize>,
}

impl Command for Bundle {
    const NAME: &'static str = "bundle";
    type Output = CommandBundle;
}

/// Write the converted volumes to `target`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Convert {
    pub create_directory: bool,
    pub target: String,
    pub file_format: FileFormat,
    pub direction: Direction,
}

impl Command for Convert {
    const NAME: &'static str = "convert";
    type Output = CommandDefault;
}
