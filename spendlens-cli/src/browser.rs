use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::{Command, Stdio};

/// Platform command that hands a file to the default browser
fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

pub fn open_in_browser(path: &Path) -> Result<()> {
    let (bin, args) = opener();
    let bin = which::which(bin).with_context(|| format!("{} not found on PATH", bin))?;

    let status = Command::new(&bin)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("running {}", bin.display()))?;

    if !status.success() {
        bail!("{} exited with status: {}", bin.display(), status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_for_platform() {
        let (bin, _) = opener();
        assert!(["open", "cmd", "xdg-open"].contains(&bin));
    }
}
