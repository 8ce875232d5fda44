//! Functions available inside course templates.
//!
//! Registered as globals on every render environment:
//!
//! | name            | purpose                                              |
//! |-----------------|------------------------------------------------------|
//! | `suffix`        | `" (x)"` for a non-empty run suffix, else `""`       |
//! | `date`          | OLX timestamp (`%Y-%m-%dT%H:%M:%SZ`)                 |
//! | `markdown`      | Markdown to HTML                                     |
//! | `markdown_file` | Markdown file (course-root relative) to HTML         |
//! | `swift_tempurl` | signed, expiring Swift object-store URL              |

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use hmac::{Hmac, Mac};
use minijinja::value::{Object, ObjectRepr, from_args};
use minijinja::{Environment, Error, ErrorKind, State, Value};
use pulldown_cmark::{Options, Parser, html};
use sha2::Sha256;

use crate::domain::{AppError, Timestamp, parse_date};

const SWIFT_ENDPOINT_VAR: &str = "SWIFT_ENDPOINT";
const SWIFT_PATH_VAR: &str = "SWIFT_PATH";
const SWIFT_TEMPURL_KEY_VAR: &str = "SWIFT_TEMPURL_KEY";

type HmacSha256 = Hmac<Sha256>;

/// `" (value)"` when `value` is truthy, otherwise the empty string.
pub fn suffix(value: &Value) -> String {
    if value.is_true() { format!(" ({})", value) } else { String::new() }
}

/// Convert Markdown to HTML.
///
/// Leading newlines and trailing whitespace are dropped before conversion.
/// Leading indentation is kept.
pub fn markdown(text: &str) -> String {
    let text = text.trim_start_matches(['\r', '\n']).trim_end();
    let options =
        Options::ENABLE_FOOTNOTES | Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Convert a Markdown file to HTML.
pub fn markdown_file(path: &Path) -> Result<String, AppError> {
    let text = std::fs::read_to_string(path)?;
    Ok(markdown(&text))
}

/// Object-store settings for signed temporary URLs.
#[derive(Clone, PartialEq, Eq)]
pub struct SwiftSettings {
    /// Scheme and host, e.g. `https://swift.example.com`.
    pub endpoint: String,
    /// Account path prefix, e.g. `/v1/AUTH_...`.
    pub swift_path: String,
    /// Temp-URL signing key.
    pub key: String,
}

impl fmt::Debug for SwiftSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwiftSettings")
            .field("endpoint", &self.endpoint)
            .field("swift_path", &self.swift_path)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl SwiftSettings {
    /// Read `SWIFT_ENDPOINT`, `SWIFT_PATH` and `SWIFT_TEMPURL_KEY`.
    pub fn from_env() -> Result<Self, AppError> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| {
                AppError::config_error(format!("{} environment variable not set", name))
            })
        };
        Ok(Self {
            endpoint: var(SWIFT_ENDPOINT_VAR)?,
            swift_path: var(SWIFT_PATH_VAR)?,
            key: var(SWIFT_TEMPURL_KEY_VAR)?,
        })
    }
}

/// Absolute temp URL allowing `GET` on `path` until `expiry`.
pub fn swift_tempurl(
    settings: &SwiftSettings,
    path: &str,
    expiry: Timestamp,
) -> Result<String, AppError> {
    let full_path = format!("{}{}", settings.swift_path, path);
    let expires = expiry.unix_seconds();

    let mut mac = HmacSha256::new_from_slice(settings.key.as_bytes())
        .map_err(|e| AppError::config_error(format!("Invalid temp URL key: {}", e)))?;
    mac.update(format!("GET\n{}\n{}", expires, full_path).as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    Ok(format!(
        "{}{}?temp_url_sig={}&temp_url_expires={}",
        settings.endpoint, full_path, signature, expires
    ))
}

impl Object for Timestamp {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "strftime" => {
                let (pattern,): (&str,) = from_args(args)?;
                self.strftime(pattern).map(Value::from).map_err(|_| {
                    Error::new(
                        ErrorKind::InvalidOperation,
                        format!("invalid strftime pattern '{}'", pattern),
                    )
                })
            }
            "isoformat" => {
                if !args.is_empty() {
                    return Err(Error::from(ErrorKind::TooManyArguments));
                }
                Ok(Value::from(self.as_naive().format("%Y-%m-%dT%H:%M:%S").to_string()))
            }
            _ => Err(Error::from(ErrorKind::UnknownMethod)),
        }
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

/// Accept a timestamp object or an ISO date (time) string.
fn timestamp_arg(value: &Value, helper: &str) -> Result<Timestamp, Error> {
    if let Some(ts) = value.downcast_object_ref::<Timestamp>() {
        return Ok(*ts);
    }
    if let Some(text) = value.as_str() {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Timestamp::new(parsed));
        }
        if let Ok(parsed) = parse_date(text) {
            return Ok(Timestamp::new(parsed));
        }
    }
    Err(Error::new(
        ErrorKind::InvalidOperation,
        format!("{}() expects a timestamp, got {} '{}'", helper, value.kind(), value),
    ))
}

fn helper_error(helper: &str, err: AppError) -> Error {
    Error::new(ErrorKind::InvalidOperation, format!("{}() failed: {}", helper, err))
}

/// Register the helper functions on a render environment.
///
/// `root` anchors relative paths passed to `markdown_file`.
pub fn register_helpers(env: &mut Environment<'_>, root: &Path) {
    env.add_function("suffix", |value: Value| -> String { suffix(&value) });

    env.add_function("date", |value: Value| -> Result<String, Error> {
        Ok(timestamp_arg(&value, "date")?.to_olx())
    });

    env.add_function("markdown", |text: &str| -> String { markdown(text) });

    let root: PathBuf = root.to_path_buf();
    env.add_function("markdown_file", move |path: &str| -> Result<String, Error> {
        markdown_file(&root.join(path)).map_err(|e| helper_error("markdown_file", e))
    });

    env.add_function("swift_tempurl", |path: &str, expiry: Value| -> Result<String, Error> {
        let expiry = timestamp_arg(&expiry, "swift_tempurl")?;
        let settings =
            SwiftSettings::from_env().map_err(|e| helper_error("swift_tempurl", e))?;
        swift_tempurl(&settings, path, expiry).map_err(|e| helper_error("swift_tempurl", e))
    });
}
