//! Raw container task declarations and the variable file protocol
//!
//! A raw container task declares an interface of typed scalar variables.
//! The substrate mounts an input directory holding one file per declared
//! input (content is the serialized scalar), runs the container's
//! entrypoint, and reads one file per declared output from the output
//! directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sprocket_codec::{ScalarKind, ScalarValue};
use tokio::fs;

use crate::error::{ExecutionError, ExecutionResult};

/// A declared input or output variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    pub kind: ScalarKind,
}

impl VariableSpec {
    /// Declare a variable
    pub fn new(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Declaration of an arbitrary container task
///
/// `input_data_dir` and `output_data_dir` are the paths the entrypoint
/// expects inside the container; the substrate maps them onto real
/// directories at run time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerTaskSpec {
    /// Unique task name within a project
    pub name: String,

    /// Container image reference
    pub image: String,

    /// Entrypoint command and arguments
    pub command: Vec<String>,

    /// Directory the entrypoint reads inputs from
    pub input_data_dir: PathBuf,

    /// Directory the entrypoint writes outputs to
    pub output_data_dir: PathBuf,

    /// Declared input variables, in interface order
    pub inputs: Vec<VariableSpec>,

    /// Declared output variables, in interface order
    pub outputs: Vec<VariableSpec>,
}

impl ContainerTaskSpec {
    /// Check that every declared input has a supplied value of the declared
    /// kind
    pub fn check_inputs(&self, values: &HashMap<String, ScalarValue>) -> ExecutionResult<()> {
        for spec in &self.inputs {
            let value = values
                .get(&spec.name)
                .ok_or_else(|| ExecutionError::MissingInput {
                    task: self.name.clone(),
                    variable: spec.name.clone(),
                })?;
            if value.kind() != spec.kind {
                return Err(ExecutionError::Container {
                    task: self.name.clone(),
                    message: format!(
                        "input '{}' declared as {} but supplied as {}",
                        spec.name,
                        spec.kind,
                        value.kind()
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Write one file per input variable into the mounted input directory
pub async fn write_inputs(
    dir: &Path,
    spec: &ContainerTaskSpec,
    values: &HashMap<String, ScalarValue>,
) -> ExecutionResult<()> {
    spec.check_inputs(values)?;

    fs::create_dir_all(dir).await?;
    for variable in &spec.inputs {
        let value = &values[&variable.name];
        fs::write(dir.join(&variable.name), value.to_wire_string()).await?;
    }
    Ok(())
}

/// Read one file per declared output variable from the output directory
pub async fn read_outputs(
    dir: &Path,
    spec: &ContainerTaskSpec,
) -> ExecutionResult<HashMap<String, ScalarValue>> {
    let mut outputs = HashMap::with_capacity(spec.outputs.len());

    for variable in &spec.outputs {
        let path = dir.join(&variable.name);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExecutionError::MissingOutput {
                    task: spec.name.clone(),
                    variable: variable.name.clone(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let value = ScalarValue::parse(variable.kind, &raw).map_err(|source| {
            ExecutionError::Scalar {
                variable: variable.name.clone(),
                source,
            }
        })?;
        outputs.insert(variable.name.clone(), value);
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ellipse_spec() -> ContainerTaskSpec {
        ContainerTaskSpec {
            name: "ellipse-area-metadata-shell".to_string(),
            image: "rawcontainers-shell:v1".to_string(),
            command: vec![
                "./calculate-ellipse-area.sh".to_string(),
                "/var/inputs".to_string(),
                "/var/outputs".to_string(),
            ],
            input_data_dir: PathBuf::from("/var/inputs"),
            output_data_dir: PathBuf::from("/var/outputs"),
            inputs: vec![
                VariableSpec::new("a", ScalarKind::Float),
                VariableSpec::new("b", ScalarKind::Float),
            ],
            outputs: vec![
                VariableSpec::new("area", ScalarKind::Float),
                VariableSpec::new("metadata", ScalarKind::String),
            ],
        }
    }

    fn ellipse_inputs() -> HashMap<String, ScalarValue> {
        HashMap::from([
            ("a".to_string(), ScalarValue::Float(3.0)),
            ("b".to_string(), ScalarValue::Float(4.0)),
        ])
    }

    #[tokio::test]
    async fn test_write_inputs_one_file_per_variable() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path(), &ellipse_spec(), &ellipse_inputs())
            .await
            .unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("a")).await.unwrap(), "3");
        assert_eq!(fs::read_to_string(dir.path().join("b")).await.unwrap(), "4");
    }

    #[tokio::test]
    async fn test_missing_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut values = ellipse_inputs();
        values.remove("b");

        let err = write_inputs(dir.path(), &ellipse_spec(), &values)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::MissingInput { ref variable, .. } if variable == "b"));
    }

    #[tokio::test]
    async fn test_kind_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut values = ellipse_inputs();
        values.insert("b".to_string(), ScalarValue::String("four".to_string()));

        let err = write_inputs(dir.path(), &ellipse_spec(), &values)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::Container { .. }));
    }

    #[tokio::test]
    async fn test_read_outputs_parses_declared_kinds() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("area"), "37.69911\n").await.unwrap();
        fs::write(dir.path().join("metadata"), "[from shell rawcontainer]\n")
            .await
            .unwrap();

        let outputs = read_outputs(dir.path(), &ellipse_spec()).await.unwrap();
        assert_eq!(outputs["area"], ScalarValue::Float(37.69911));
        assert_eq!(
            outputs["metadata"],
            ScalarValue::String("[from shell rawcontainer]".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_output_names_the_variable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("area"), "1.0").await.unwrap();

        let err = read_outputs(dir.path(), &ellipse_spec()).await.unwrap_err();
        assert!(
            matches!(err, ExecutionError::MissingOutput { ref variable, .. } if variable == "metadata")
        );
    }
}
