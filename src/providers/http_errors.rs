use anyhow::anyhow;
use reqwest::StatusCode;
use std::error::Error as StdError;
use std::io::ErrorKind;

fn error_chain_has(
    err: &(dyn StdError + 'static),
    kind: ErrorKind,
    needle: &str,
) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == kind
        {
            return true;
        }

        if source.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }

        current = source.source();
    }

    false
}

fn error_chain_has_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    error_chain_has(err, ErrorKind::ConnectionRefused, "connection refused")
}

fn error_chain_has_timeout(err: &(dyn StdError + 'static)) -> bool {
    error_chain_has(err, ErrorKind::TimedOut, "timed out")
}

pub(crate) fn model_api_request_error(
    err: reqwest::Error,
    api_url: &str,
    timeout_secs: Option<u64>,
) -> anyhow::Error {
    if err.is_timeout() || error_chain_has_timeout(&err) {
        let after = timeout_secs
            .map(|secs| format!(" after {secs}s"))
            .unwrap_or_default();
        return anyhow!(
            "Model request timed out{} while calling '{}'. \
             Increase MODEL_TIMEOUT_SECS or check model responsiveness.",
            after,
            api_url
        );
    }

    if err.is_connect() {
        if error_chain_has_connection_refused(&err) {
            return anyhow!(
                "Connection refused by model API at '{}'. \
                 Ensure the completion service is reachable and MODEL_BASE_URL is correct.",
                api_url
            );
        }

        return anyhow!(
            "Failed to connect to model API at '{}'. \
             Check MODEL_BASE_URL and network connectivity.",
            api_url
        );
    }

    anyhow!("Failed to call model API at '{}': {}", api_url, err)
}

pub(crate) fn model_api_status_error(status: StatusCode, body: &str) -> anyhow::Error {
    let body = body.trim();
    if body.is_empty() {
        anyhow!("Model request failed with status {}", status)
    } else {
        anyhow!("Model request failed with status {}: {}", status, body)
    }
}
