//! Validation command handler

use super::utils::{load_document, read_body};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{current_request_id, timing::Timer};
use crate::output::{Outcome, OutputWriter, ValidationReport};
use shapeguard_schemas::{PayloadValidator, RequestContext, SkipReason, Verdict};
use tracing::{info, instrument};

/// Handle the validate command
///
/// A rejected body is reported, then returned as [`Error::Rejected`] so the
/// process exits non-zero.
#[instrument(skip_all, fields(method = %args.method, path = %args.path))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("validate_command");

    let (schema_path, document) = load_document(&args.schema, config)?;
    output.info(&format!("Using schema document {}", schema_path.display()))?;

    let body = read_body(&args.body)?;
    output.trace_body(&body);

    let validator = PayloadValidator::new(document).with_policy(config.policy.clone());
    let request = RequestContext::new(args.method, &args.path);

    let (outcome, rejection) = match validator.validate(&request, &body) {
        Ok(Verdict::Accepted) => (Outcome::Accepted, None),
        Ok(Verdict::Skipped(reason)) => (
            Outcome::Skipped {
                reason: skip_reason(reason).to_string(),
            },
            None,
        ),
        Err(error) if error.is_configuration() => return Err(error.into()),
        Err(error) => (
            Outcome::Rejected {
                status_code: error.status_code(),
                error: error.clone(),
            },
            Some(error),
        ),
    };
    info!(outcome = ?outcome, "validation finished");

    output.validation_report(&ValidationReport {
        request_id: config
            .output
            .request_id
            .then(|| current_request_id().map(str::to_string))
            .flatten(),
        method: request.method,
        path: request.path(),
        outcome,
    })?;

    match rejection {
        Some(error) => Err(Error::Rejected(error)),
        None => Ok(()),
    }
}

fn skip_reason(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::ReadOnlyMethod => "read_only_method",
        SkipReason::NoSchemaConfigured => "no_schema_configured",
    }
}

#[cfg(test)]
mod tests {
    use super::super::utils::fixtures::{write, USERS_SCHEMA};
    use super::*;
    use crate::cli::{OutputFormat, SchemaArgs};
    use shapeguard_schemas::Method;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn args(dir: &TempDir, body: &str, method: Method, path: &str) -> ValidateArgs {
        ValidateArgs {
            schema: SchemaArgs {
                schema: Some(write(dir.path(), "schema.yaml", USERS_SCHEMA)),
                schema_key: None,
            },
            body: write(dir.path(), "body.json", body),
            path: path.to_string(),
            method,
        }
    }

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()))
    }

    #[test]
    fn test_accepted_body() {
        let dir = tempdir().unwrap();
        let args = args(&dir, r#"{"name": "Ada", "address": {"city": "London"}}"#, Method::Post, "/users");
        assert!(handle_validate(args, &Config::default(), &mut quiet_output()).is_ok());
    }

    #[test]
    fn test_rejected_body_exits_with_rejection() {
        let dir = tempdir().unwrap();
        let args = args(&dir, r#"{"name": "A", "address": {"city": "London"}}"#, Method::Post, "/users");
        let err = handle_validate(args, &Config::default(), &mut quiet_output()).unwrap_err();
        assert!(matches!(err, Error::Rejected(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_partial_update_and_skip() {
        let dir = tempdir().unwrap();
        let args_patch = args(&dir, r#"{"name": "Grace"}"#, Method::Patch, "/users/1");
        assert!(handle_validate(args_patch, &Config::default(), &mut quiet_output()).is_ok());

        let args_get = args(&dir, r#"[1, 2]"#, Method::Get, "/users");
        assert!(handle_validate(args_get, &Config::default(), &mut quiet_output()).is_ok());
    }

    #[test]
    fn test_policy_from_config() {
        let dir = tempdir().unwrap();
        let config = Config {
            policy: shapeguard_schemas::RequestPolicy::strict(),
            ..Config::default()
        };
        let args = args(&dir, r#"{"name": "Grace"}"#, Method::Patch, "/users/1");
        assert!(handle_validate(args, &config, &mut quiet_output()).is_err());
    }

    #[test]
    fn test_missing_body_file() {
        let dir = tempdir().unwrap();
        let mut args = args(&dir, "{}", Method::Post, "/users");
        args.body = PathBuf::from("/no/such/body.json");
        let err = handle_validate(args, &Config::default(), &mut quiet_output()).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
