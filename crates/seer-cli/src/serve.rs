// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use anyhow::Context;
use seer_service::{Request, Response, SeerService, Status};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Counters reported when the request stream ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub requests: usize,
    pub errors: usize,
}

/// Answers one JSON request per input line with one JSON response line.
///
/// Blank lines are skipped. Lines that do not parse get an `invalid_argument`
/// error response; the loop only stops on EOF or an I/O failure.
pub fn serve_lines<R: BufRead, W: Write>(
    service: &SeerService,
    reader: R,
    mut writer: W,
) -> anyhow::Result<ServeStats> {
    let mut stats = ServeStats::default();
    for line in reader.lines() {
        let line = line.context("failed to read request line")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => service.handle(request),
            Err(err) => {
                warn!(error = %err, "unparseable request line");
                Response::Error {
                    status: Status::InvalidArgument,
                    message: format!("invalid request JSON: {err}"),
                }
            }
        };

        stats.requests += 1;
        if matches!(response, Response::Error { .. }) {
            stats.errors += 1;
        }
        serde_json::to_writer(&mut writer, &response).context("failed to encode response")?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .context("failed to write response")?;
    }

    info!(
        requests = stats.requests,
        errors = stats.errors,
        "request stream closed"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::serve_lines;
    use seer_service::{ForecastConfig, Response, SeerService, Status};
    use seer_store::MemoryStore;
    use std::sync::Arc;

    fn service() -> SeerService {
        SeerService::new(Arc::new(MemoryStore::new()), ForecastConfig::default())
            .expect("service should build")
    }

    fn responses(output: &[u8]) -> Vec<Response> {
        std::str::from_utf8(output)
            .expect("output should be utf-8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("response should parse"))
            .collect()
    }

    #[test]
    fn each_line_gets_one_response() {
        let input = concat!(
            r#"{"op":"create_stream","name":"sales","period":3600}"#,
            "\n\n",
            r#"{"op":"update_stream","name":"sales","values":[3.14,4.43],"times_ns":[0,3600000000000]}"#,
            "\n",
            r#"{"op":"get_forecast","name":"sales","n":3}"#,
            "\n",
            "not json\n",
        );
        let mut output = Vec::new();
        let stats = serve_lines(&service(), input.as_bytes(), &mut output)
            .expect("serve loop should finish");
        assert_eq!(stats.requests, 4);
        assert_eq!(stats.errors, 1);

        let responses = responses(&output);
        assert_eq!(responses.len(), 4);
        assert!(matches!(responses[0], Response::Stream { .. }));
        let Response::Stream { stream } = &responses[1] else {
            panic!("update should answer with the stream");
        };
        assert_eq!(stream.last_event_ns, Some(3_600_000_000_000));
        let Response::Forecast { forecast } = &responses[2] else {
            panic!("forecast request should answer with a forecast");
        };
        assert_eq!(forecast.times_ns.len(), 3);
        let Response::Error { status, message } = &responses[3] else {
            panic!("garbage should be rejected");
        };
        assert_eq!(*status, Status::InvalidArgument);
        assert!(message.starts_with("invalid request JSON"));
    }

    #[test]
    fn service_errors_do_not_stop_the_loop() {
        let input = concat!(
            r#"{"op":"get_stream","name":"missing"}"#,
            "\n",
            r#"{"op":"list_streams","page_number":1,"page_size":10}"#,
            "\n",
            r#"{"op":"create_stream","name":"visits","period":86400,"domain":"DiscreteRight"}"#,
            "\n",
        );
        let mut output = Vec::new();
        let stats = serve_lines(&service(), input.as_bytes(), &mut output)
            .expect("serve loop should finish");
        assert_eq!(stats.errors, 2);

        let responses = responses(&output);
        assert!(matches!(
            responses[0],
            Response::Error {
                status: Status::NotFound,
                ..
            }
        ));
        assert!(matches!(
            responses[1],
            Response::Error {
                status: Status::NotFound,
                ..
            }
        ));
        assert!(matches!(responses[2], Response::Stream { .. }));
    }
}
