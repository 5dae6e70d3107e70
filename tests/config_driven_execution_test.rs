//! Executor and policy construction from the loaded configuration

use std::convert::Infallible;
use std::io::Write;
use std::time::Duration;

use sprocket_config::ConfigLoader;
use sprocket_execution::{ExecutionPolicy, MapExecutor, WorkItem};

#[tokio::test]
async fn test_loaded_config_drives_executor_and_policy() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "execution:\n  max_parallelism: 2\n  default_retries: 1\n  invocation_timeout: 30s\n"
    )
    .unwrap();

    let config = ConfigLoader::new().from_file(file.path()).unwrap();
    let executor = MapExecutor::from_config(&config.execution);
    let policy = ExecutionPolicy::from_config(&config.execution);

    assert_eq!(executor.max_parallelism(), 2);
    assert_eq!(policy.retries, 1);
    assert_eq!(policy.max_attempts(), 2);
    assert_eq!(policy.timeout, Some(Duration::from_secs(30)));

    let outputs = executor
        .execute(vec![1i64, 2, 3], policy, |item: WorkItem<i64>, _ctx| async move {
            Ok::<_, Infallible>(item.value * 2)
        })
        .await
        .unwrap();
    assert_eq!(outputs, vec![2, 4, 6]);
}

#[test]
fn test_invalid_config_never_reaches_the_executor() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "execution:\n  max_parallelism: 0\n").unwrap();

    assert!(ConfigLoader::new().from_file(file.path()).is_err());
}
