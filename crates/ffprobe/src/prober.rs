//! Running ffprobe.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Output, Stdio};

use tokio::io::AsyncRead;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::model::ProbeResults;

/// Arguments requesting the JSON report with format and stream sections.
const REPORT_ARGS: &[&str] = &[
    "-v",
    "quiet",
    "-print_format",
    "json",
    "-show_format",
    "-show_streams",
];

/// Decode a raw ffprobe JSON report.
pub fn parse_output(stdout: &[u8]) -> Result<ProbeResults> {
    Ok(serde_json::from_slice(stdout)?)
}

/// Runs ffprobe and decodes its report.
#[derive(Debug, Clone, Default)]
pub struct Prober {
    config: ProbeConfig,
}

impl Prober {
    /// Create a prober with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probe a file on disk.
    pub async fn probe(&self, path: impl AsRef<Path>) -> Result<ProbeResults> {
        let path = path.as_ref();
        debug!("Probing {}", path.display());

        let mut cmd = self.command(path.as_os_str());
        let child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
        let output = child.wait_with_output().await?;
        self.finish(output)
    }

    /// Probe media read from `reader`, piped to ffprobe's stdin.
    pub async fn probe_reader<R>(&self, mut reader: R) -> Result<ProbeResults>
    where
        R: AsyncRead + Unpin,
    {
        debug!("Probing stream from reader");

        let mut cmd = self.command(OsStr::new("-"));
        cmd.stdin(Stdio::piped());
        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ProbeError::Stdin(std::io::Error::other("stdin was not captured")))?;

        let feed = async move {
            let copied = tokio::io::copy(&mut reader, &mut stdin).await;
            // Closing stdin signals end of input.
            drop(stdin);
            copied
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        match fed {
            Ok(bytes) => debug!("Fed {} bytes to ffprobe", bytes),
            // ffprobe stops reading once it has seen enough.
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("ffprobe closed its input early")
            }
            Err(e) => return Err(ProbeError::Stdin(e)),
        }

        self.finish(output)
    }

    fn build_args<'a>(&'a self, target: &'a OsStr) -> Vec<&'a OsStr> {
        let mut args: Vec<&OsStr> = REPORT_ARGS.iter().map(OsStr::new).collect();
        args.extend(self.config.extra_args.iter().map(OsStr::new));
        args.push(target);
        args
    }

    fn command(&self, target: &OsStr) -> Command {
        let mut cmd = Command::new(&self.config.binary_path);
        cmd.args(self.build_args(target))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        no_window(&mut cmd);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> ProbeError {
        warn!("Failed to start {}: {}", self.config.binary_path, source);
        ProbeError::Spawn {
            program: self.config.binary_path.clone(),
            source,
        }
    }

    fn finish(&self, output: Output) -> Result<ProbeResults> {
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("ffprobe exited with {}: {}", output.status, stderr);
            return Err(ProbeError::Exit {
                status: output.status,
                stderr,
            });
        }

        let results = parse_output(&output.stdout)?;
        debug!(
            "Probed {} streams, format {:?}",
            results.streams.len(),
            results.format.format_name
        );
        Ok(results)
    }
}

#[cfg(windows)]
fn no_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.as_std_mut().creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn no_window(_cmd: &mut Command) {}
