//! Long-lived session over stdin/stdout
//!
//! Reads one JSON request per line and answers with one JSON line, sharing
//! a single server so the cache and change log live as long as the process.
//!
//! ```text
//! {"id": 1, "read": "timecamp://projects"}
//! {"id": 2, "call": "start_timer", "args": {"task_id": 42}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};

use timecamp_mcp::TimeCampServer;
use timecamp_mcp::client::TimeCampApi;
use timecamp_mcp::error::{Result, ToolFailure, ValidationError};

use crate::cli::{CommandContext, OutputFormat};

/// One line of input
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    read: Option<String>,
    #[serde(default)]
    call: Option<String>,
    #[serde(default)]
    args: Option<Value>,
}

/// One line of output; exactly one of `result` and `error` is set
#[derive(Debug, Serialize)]
struct Reply {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ToolFailure>,
}

/// Serve requests from stdin until it closes
pub async fn run(config_path: Option<&str>, no_cache: bool) -> Result<()> {
    let ctx = CommandContext::new(OutputFormat::Json, config_path, no_cache)?;
    log::info!("Serving requests on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = handle_line(&ctx.server, &line).await;
        println!("{}", serde_json::to_string(&reply)?);
    }

    log::info!("stdin closed, {} changes recorded", ctx.server.change_log().len());
    Ok(())
}

async fn handle_line<C: TimeCampApi + 'static>(server: &TimeCampServer<C>, line: &str) -> Reply {
    let request = match serde_json::from_str::<Request>(line) {
        Ok(request) => request,
        Err(e) => {
            let err: timecamp_mcp::Error =
                ValidationError::new("request", format!("not a valid request: {}", e)).into();
            return Reply::failure(None, &err);
        }
    };

    let id = request.id.clone();
    match dispatch(server, request).await {
        Ok(result) => Reply {
            id,
            result: Some(result),
            error: None,
        },
        Err(err) => {
            log::debug!("Request failed: {:?}", err);
            Reply::failure(id, &err)
        }
    }
}

async fn dispatch<C: TimeCampApi + 'static>(server: &TimeCampServer<C>, request: Request) -> Result<Value> {
    match (request.read, request.call) {
        (Some(uri), None) => {
            if request.args.is_some() {
                return Err(ValidationError::new("args", "only allowed with \"call\"").into());
            }
            Ok(serde_json::to_value(server.read_resource(&uri).await?)?)
        }
        (None, Some(tool)) => {
            let args = request.args.unwrap_or(Value::Null);
            Ok(serde_json::to_value(server.call_tool(&tool, args).await?)?)
        }
        _ => Err(ValidationError::new("request", "expected exactly one of \"read\" or \"call\"").into()),
    }
}

impl Reply {
    fn failure(id: Option<Value>, err: &timecamp_mcp::Error) -> Self {
        Self {
            id,
            result: None,
            error: Some(ToolFailure::from(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shapes() {
        let read: Request = serde_json::from_str(r#"{"read": "timecamp://timer"}"#).unwrap();
        assert_eq!(read.read.as_deref(), Some("timecamp://timer"));
        assert!(read.call.is_none());

        let call: Request =
            serde_json::from_str(r#"{"id": 3, "call": "start_timer", "args": {"task_id": 1}}"#)
                .unwrap();
        assert_eq!(call.id, Some(json!(3)));
        assert_eq!(call.args, Some(json!({"task_id": 1})));

        assert!(serde_json::from_str::<Request>(r#"{"uri": "timecamp://timer"}"#).is_err());
    }

    #[test]
    fn test_failure_reply_shape() {
        let err: timecamp_mcp::Error = ValidationError::new("request", "bad").into();
        let reply = Reply::failure(Some(json!("a")), &err);
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["id"], "a");
        assert_eq!(json["error"]["kind"], "validation_error");
        assert!(json.get("result").is_none());
    }
}
