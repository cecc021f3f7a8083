use crate::domain::ports::SessionLauncher;
use crate::utils::error::{ConsultError, Result};
use std::process::Command;

/// Replaces the running process with `ssh <address> [-l <user>]`.
#[derive(Debug, Clone)]
pub struct SshLauncher {
    binary: String,
}

impl SshLauncher {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for SshLauncher {
    fn default() -> Self {
        Self::new("ssh")
    }
}

pub fn session_args(address: &str, user: Option<&str>) -> Vec<String> {
    let mut args = vec![address.to_string()];
    if let Some(user) = user.filter(|u| !u.is_empty()) {
        args.push("-l".to_string());
        args.push(user.to_string());
    }
    args
}

impl SessionLauncher for SshLauncher {
    fn launch(&self, address: &str, user: Option<&str>) -> Result<()> {
        let path = which::which(&self.binary).map_err(|source| ConsultError::LauncherNotFound {
            binary: self.binary.clone(),
            source,
        })?;

        let args = session_args(address, user);
        tracing::info!("Starting {} {}", path.display(), args.join(" "));

        let mut command = Command::new(&path);
        command.args(&args);
        exec(command, &self.binary)
    }
}

#[cfg(unix)]
fn exec(mut command: Command, binary: &str) -> Result<()> {
    use std::os::unix::process::CommandExt;

    // Only returns if the exec itself failed.
    let source = command.arg0(binary).exec();
    Err(ConsultError::Launch {
        binary: binary.to_string(),
        source,
    })
}

#[cfg(not(unix))]
fn exec(mut command: Command, binary: &str) -> Result<()> {
    let status = command.status().map_err(|source| ConsultError::Launch {
        binary: binary.to_string(),
        source,
    })?;
    std::process::exit(status.code().unwrap_or(1));
}
