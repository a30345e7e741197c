use std::process::{Command, Stdio};

use tracing::debug;

/// Best-effort check of the desktop's dark preference, used as the initial
/// value of the dark variant when the reader does not pick one.
pub fn detect_system_dark_mode() -> bool {
    // Windows: AppsUseLightTheme 0 = dark
    #[cfg(target_os = "windows")]
    {
        use winreg::RegKey;
        use winreg::enums::HKEY_CURRENT_USER;

        if let Ok(hkcu) = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        {
            if let Ok(value) = hkcu.get_value::<u32, _>("AppsUseLightTheme") {
                return value == 0;
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(scheme) = command_stdout("gsettings", &["get", "org.gnome.desktop.interface", "color-scheme"]) {
            if scheme.contains("prefer-dark") {
                return true;
            }
        }
        if let Some(theme) = command_stdout("gsettings", &["get", "org.gnome.desktop.interface", "gtk-theme"]) {
            if theme.to_lowercase().contains("dark") {
                return true;
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(style) = command_stdout("defaults", &["read", "-g", "AppleInterfaceStyle"]) {
            if style.to_lowercase().contains("dark") {
                return true;
            }
        }
    }

    false
}

/// Whether an external helper program (OCR, speech) can be launched at all.
pub fn command_available(program: &str) -> bool {
    let available = Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok();
    debug!("External program {:?} available: {}", program, available);
    available
}

#[allow(dead_code)]
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}
