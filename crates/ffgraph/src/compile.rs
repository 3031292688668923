//! Rendering a resolved [`FilterGraph`] into ffmpeg arguments.

use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FfmpegConfig;
use crate::graph::FilterGraph;

/// Flat ffmpeg arguments for one graph, split into its three sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledCommand {
    /// `<options...> -i <name>` per input, in declaration order.
    pub inputs: Vec<String>,
    /// The `-filter_complex` chain, absent when the graph has no filters.
    pub filter_complex: Option<String>,
    /// `-map <ref>...`, options and destination per output.
    pub outputs: Vec<String>,
}

impl CompiledCommand {
    /// All arguments in invocation order.
    pub fn args(&self) -> Vec<String> {
        let mut args = self.inputs.clone();
        if let Some(ref chain) = self.filter_complex {
            args.extend(["-filter_complex".to_string(), chain.clone()]);
        }
        args.extend(self.outputs.iter().cloned());
        args
    }

    /// Build (but do not spawn) the ffmpeg process for these arguments.
    ///
    /// File handles registered in the graph are not attached; the caller
    /// must expose them at their `/dev/fd/N` paths before spawning.
    pub fn to_command(&self, config: &FfmpegConfig) -> Command {
        let mut cmd = Command::new(&config.binary_path);
        no_window(&mut cmd);
        cmd.args(&config.global_args).args(self.args());
        cmd
    }
}

#[cfg(windows)]
fn no_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn no_window(_cmd: &mut Command) {}

impl FilterGraph {
    /// Render the graph. Pure: compiling twice yields identical output.
    pub fn compile(&self) -> CompiledCommand {
        let mut inputs = Vec::new();
        for input in self.inputs() {
            inputs.extend(input.options.iter().cloned());
            inputs.extend(["-i".to_string(), input.name.clone()]);
        }

        let filter_complex = if self.filters().is_empty() {
            None
        } else {
            Some(
                self.filters()
                    .iter()
                    .map(|f| f.to_string())
                    .collect::<Vec<_>>()
                    .join(";"),
            )
        };

        let mut outputs = Vec::new();
        for output in self.outputs() {
            for stream in &output.streams {
                outputs.extend(["-map".to_string(), stream.to_string()]);
            }
            outputs.extend(output.options.iter().cloned());
            outputs.push(output.name.clone());
        }

        debug!(
            "Compiled graph: {} inputs, {} filters, {} outputs",
            self.inputs().len(),
            self.filters().len(),
            self.outputs().len()
        );

        CompiledCommand {
            inputs,
            filter_complex,
            outputs,
        }
    }
}
