//! System clipboard access by shelling out, OS by OS:
//! - macOS: `pbcopy` / `pbpaste`
//! - Linux: `xclip`, falling back to `xsel`
//! - Windows: `clip` / PowerShell `Get-Clipboard`

use std::process::Command;

use crate::error::{BurrowError, Result};

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_in(&mut Command::new("pbcopy"), text)
    }

    #[cfg(target_os = "linux")]
    {
        let mut xclip = Command::new("xclip");
        xclip.args(["-selection", "clipboard"]);
        match pipe_in(&mut xclip, text) {
            Ok(()) => Ok(()),
            Err(_) => {
                let mut xsel = Command::new("xsel");
                xsel.args(["--clipboard", "--input"]);
                pipe_in(&mut xsel, text).map_err(|_| {
                    BurrowError::External(
                        "no clipboard tool found (install xclip or xsel)".to_string(),
                    )
                })
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        pipe_in(&mut Command::new("clip"), text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(BurrowError::External(
            "clipboard not supported on this platform".to_string(),
        ))
    }
}

pub fn paste_from_clipboard() -> Result<String> {
    #[cfg(target_os = "macos")]
    {
        read_out(&mut Command::new("pbpaste"))
    }

    #[cfg(target_os = "linux")]
    {
        let mut xclip = Command::new("xclip");
        xclip.args(["-selection", "clipboard", "-o"]);
        match read_out(&mut xclip) {
            Ok(text) => Ok(text),
            Err(_) => {
                let mut xsel = Command::new("xsel");
                xsel.args(["--clipboard", "--output"]);
                read_out(&mut xsel).map_err(|_| {
                    BurrowError::External(
                        "no clipboard tool found (install xclip or xsel)".to_string(),
                    )
                })
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        let mut ps = Command::new("powershell");
        ps.args(["-NoProfile", "-Command", "Get-Clipboard"]);
        read_out(&mut ps)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        Err(BurrowError::External(
            "clipboard not supported on this platform".to_string(),
        ))
    }
}

/// What `yank` puts on the clipboard: the body, or the title when the body
/// is empty.
pub fn yank_payload(title: &str, body: &str) -> String {
    if body.is_empty() {
        title.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn pipe_in(cmd: &mut Command, text: &str) -> Result<()> {
    use std::io::Write;
    use std::process::Stdio;

    let name = cmd.get_program().to_string_lossy().to_string();
    let mut child = cmd
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| BurrowError::External(format!("failed to spawn {}: {}", name, e)))?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| BurrowError::External(format!("failed to write to {}: {}", name, e)))?;
    }
    let status = child
        .wait()
        .map_err(|e| BurrowError::External(format!("failed to wait for {}: {}", name, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(BurrowError::External(format!("{} exited with error", name)))
    }
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn read_out(cmd: &mut Command) -> Result<String> {
    let name = cmd.get_program().to_string_lossy().to_string();
    let output = cmd
        .output()
        .map_err(|e| BurrowError::External(format!("failed to spawn {}: {}", name, e)))?;
    if !output.status.success() {
        return Err(BurrowError::External(format!("{} exited with error", name)));
    }
    String::from_utf8(output.stdout)
        .map_err(|e| BurrowError::External(format!("{} produced invalid UTF-8: {}", name, e)))
}
