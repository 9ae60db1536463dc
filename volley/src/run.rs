use crate::cli::RunArgs;
use crate::exit_codes::ExitCode;
use crate::output;
use crate::run_error::RunError;

pub async fn run(args: RunArgs) -> Result<ExitCode, RunError> {
    let out = output::formatter(args.output);

    let config = run_config(&args);
    config
        .validate()
        .map_err(|err| RunError::InvalidInput(err.into()))?;

    out.print_header(&config);
    let progress = out.progress();

    let report = volley_core::run(config, progress)
        .await
        .map_err(map_core_error)?;

    out.print_summary(&report)
        .map_err(RunError::RuntimeError)?;

    Ok(ExitCode::Success)
}

fn run_config(args: &RunArgs) -> volley_core::RunConfig {
    let mut config = volley_core::RunConfig::new(args.url.clone());
    config.duration = args.duration;
    config.rate = f64::from(args.rps);
    config.request_timeout = args.timeout;
    if !args.endpoints.is_empty() {
        config.endpoints = args.endpoints.clone();
    }
    config
}

fn map_core_error(err: volley_core::Error) -> RunError {
    match err {
        volley_core::Error::Join(_) => RunError::RuntimeError(err.into()),
        _ => RunError::InvalidInput(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::time::Duration;

    fn args(url: &str) -> RunArgs {
        RunArgs {
            url: url.to_string(),
            duration: Duration::from_secs(30),
            rps: 100,
            timeout: Duration::from_secs(5),
            endpoints: Vec::new(),
            output: OutputFormat::HumanReadable,
        }
    }

    #[test]
    fn empty_endpoint_flags_keep_the_default_set() {
        let config = run_config(&args("http://localhost:8080"));
        assert_eq!(config.endpoints.len(), 4);
        assert_eq!(config.endpoints[0], "/health");
    }

    #[test]
    fn endpoint_flags_replace_the_default_set() {
        let mut a = args("http://localhost:8080");
        a.endpoints = vec!["/only".to_string()];
        let config = run_config(&a);
        assert_eq!(config.endpoints, vec!["/only".to_string()]);
    }

    #[tokio::test]
    async fn join_failures_map_to_runtime_errors() {
        let handle = tokio::task::spawn(std::future::pending::<()>());
        handle.abort();
        let join_err = match handle.await {
            Err(err) => err,
            Ok(()) => panic!("aborted task cannot complete"),
        };

        let err = map_core_error(volley_core::Error::Join(join_err));
        assert_eq!(err.exit_code(), ExitCode::RuntimeError);
    }

    #[tokio::test]
    async fn zero_rps_is_invalid_input() {
        let mut a = args("http://localhost:8080");
        a.rps = 0;
        let err = match run(a).await {
            Err(err) => err,
            Ok(_) => panic!("expected configuration error"),
        };
        assert_eq!(err.exit_code(), ExitCode::InvalidInput);
    }
}
