//! Container execution substrates
//!
//! A substrate runs one container task invocation: it materializes the
//! declared inputs as files, executes the entrypoint, and collects the
//! declared outputs. [`ProcessSubstrate`] runs the entrypoint as a local
//! process, which is enough for local workflows and tests; a cluster-backed
//! substrate implements the same trait.

use std::collections::HashMap;
use std::process::Stdio;

use async_trait::async_trait;
use sprocket_codec::ScalarValue;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::container::{read_outputs, write_inputs, ContainerTaskSpec};
use crate::error::{ExecutionError, ExecutionResult};

/// Runs one container task invocation against mounted input/output
/// directories
#[async_trait]
pub trait ContainerSubstrate: Send + Sync {
    /// Execute the task with the given input values, returning its declared
    /// outputs
    async fn run(
        &self,
        spec: &ContainerTaskSpec,
        inputs: &HashMap<String, ScalarValue>,
    ) -> ExecutionResult<HashMap<String, ScalarValue>>;
}

/// Substrate that executes the entrypoint as a local process
///
/// The spec's declared `input_data_dir`/`output_data_dir` strings are
/// rewritten in the command to point at per-invocation temporary
/// directories, so entrypoints written against container mount paths run
/// unmodified.
#[derive(Debug, Default)]
pub struct ProcessSubstrate;

impl ProcessSubstrate {
    /// Create a process substrate
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContainerSubstrate for ProcessSubstrate {
    async fn run(
        &self,
        spec: &ContainerTaskSpec,
        inputs: &HashMap<String, ScalarValue>,
    ) -> ExecutionResult<HashMap<String, ScalarValue>> {
        let workdir = tempfile::tempdir()?;
        let input_dir = workdir.path().join("inputs");
        let output_dir = workdir.path().join("outputs");

        write_inputs(&input_dir, spec, inputs).await?;
        tokio::fs::create_dir_all(&output_dir).await?;

        let declared_input = spec.input_data_dir.to_string_lossy();
        let declared_output = spec.output_data_dir.to_string_lossy();
        let command: Vec<String> = spec
            .command
            .iter()
            .map(|arg| {
                arg.replace(declared_input.as_ref(), &input_dir.to_string_lossy())
                    .replace(declared_output.as_ref(), &output_dir.to_string_lossy())
            })
            .collect();

        let (program, args) = command.split_first().ok_or_else(|| ExecutionError::Container {
            task: spec.name.clone(),
            message: "empty command".to_string(),
        })?;

        debug!(task = %spec.name, program = %program, "running container entrypoint");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| ExecutionError::Container {
                task: spec.name.clone(),
                message: format!("failed to spawn '{}': {}", program, err),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(task = %spec.name, status = %output.status, "container entrypoint failed");
            return Err(ExecutionError::Container {
                task: spec.name.clone(),
                message: format!("exit status {}: {}", output.status, stderr.trim()),
            });
        }

        read_outputs(&output_dir, spec).await
    }
}
