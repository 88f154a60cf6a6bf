//! Host services used by copy and download.
//!
//! The core only needs two things from its environment: a clipboard with a
//! permission query and a way to save a file. Both are traits so terminal,
//! desktop and test hosts can plug in.

use crate::model::error::{ClipboardError, SaveError};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Clipboard-write permission as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Writes are allowed.
    Granted,
    /// The host asks the user first.
    Prompt,
    /// Writes are refused.
    Denied,
}

impl PermissionState {
    /// Whether a write may be attempted.
    pub fn allows_write(self) -> bool {
        matches!(self, PermissionState::Granted | PermissionState::Prompt)
    }

    /// Lower-case name as the host reports it.
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionState::Granted => "granted",
            PermissionState::Prompt => "prompt",
            PermissionState::Denied => "denied",
        }
    }
}

/// Host clipboard.
pub trait Clipboard {
    /// Query the clipboard-write permission.
    fn permission(&mut self) -> Result<PermissionState, ClipboardError>;

    /// Write `text` as text/plain.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Query permission, then write if allowed.
///
/// # Errors
///
/// `ClipboardError::PermissionDenied` when the permission is neither granted nor
/// prompt; otherwise whatever the host reports.
pub fn write_clipboard(clipboard: &mut dyn Clipboard, text: &str) -> Result<(), ClipboardError> {
    let permission = clipboard.permission()?;
    if !permission.allows_write() {
        return Err(ClipboardError::PermissionDenied(permission.as_str().to_owned()));
    }
    clipboard.write_text(text)
}

/// Host file download.
pub trait FileSaver {
    /// Save `contents` under `file_name` with the given MIME type.
    fn save(&mut self, file_name: &str, mime: &str, contents: &str) -> Result<(), SaveError>;
}

/// Saves downloads into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    /// Save into `dir`, which is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The user's download directory, if the platform has one.
    pub fn downloads() -> Option<Self> {
        dirs::download_dir().map(Self::new)
    }
}

impl FileSaver for DirectorySaver {
    fn save(&mut self, file_name: &str, mime: &str, contents: &str) -> Result<(), SaveError> {
        let io_err = |source| SaveError::Io {
            file_name: file_name.to_owned(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let path = self.dir.join(file_name);
        fs::write(&path, contents).map_err(io_err)?;
        debug!(path = %path.display(), mime, "file saved");
        Ok(())
    }
}

/// Terminal clipboard via the OSC 52 escape sequence.
///
/// The terminal never answers, so the permission is always `Prompt`: writing is
/// allowed but the host may still ignore it.
#[derive(Debug)]
pub struct Osc52Clipboard<W> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    /// Clipboard writing OSC 52 sequences to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    /// Clipboard on the controlling terminal.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn permission(&mut self) -> Result<PermissionState, ClipboardError> {
        Ok(PermissionState::Prompt)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let encoded = base64_encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{encoded}\x07")
            .and_then(|()| self.out.flush())
            .map_err(|err| ClipboardError::Write(err.to_string()))
    }
}

/// Minimal base64 encoder for OSC 52.
fn base64_encode(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut result = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let b0 = u32::from(chunk[0]);
        let b1 = chunk.get(1).copied().map_or(0, u32::from);
        let b2 = chunk.get(2).copied().map_or(0, u32::from);
        let n = (b0 << 16) | (b1 << 8) | b2;
        result.push(ALPHABET[(n >> 18 & 0x3F) as usize] as char);
        result.push(ALPHABET[(n >> 12 & 0x3F) as usize] as char);
        result.push(if chunk.len() > 1 { ALPHABET[(n >> 6 & 0x3F) as usize] as char } else { '=' });
        result.push(if chunk.len() > 2 { ALPHABET[(n & 0x3F) as usize] as char } else { '=' });
    }
    result
}

/// Clipboard kept in memory. Stands in for hosts without a system clipboard.
#[derive(Debug, Clone)]
pub struct MemoryClipboard {
    permission: PermissionState,
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Clipboard reporting `permission`.
    pub fn new(permission: PermissionState) -> Self {
        Self {
            permission,
            contents: None,
        }
    }

    /// Last text written, if any.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new(PermissionState::Granted)
    }
}

impl Clipboard for MemoryClipboard {
    fn permission(&mut self) -> Result<PermissionState, ClipboardError> {
        Ok(self.permission)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// File saver that keeps saved files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySaver {
    saved: Vec<(String, String, String)>,
}

impl MemorySaver {
    /// Saved `(file_name, mime, contents)` triples in save order.
    pub fn saved(&self) -> &[(String, String, String)] {
        &self.saved
    }
}

impl FileSaver for MemorySaver {
    fn save(&mut self, file_name: &str, mime: &str, contents: &str) -> Result<(), SaveError> {
        self.saved
            .push((file_name.to_owned(), mime.to_owned(), contents.to_owned()));
        Ok(())
    }
}
