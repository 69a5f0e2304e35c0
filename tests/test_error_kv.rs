
use log::*;
use prettylog::{LogFormat, Severity};

#[derive(Debug)]
struct ConfigError(std::io::Error);
impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("loading the configuration failed")
    }
}
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[test]
fn test_error_kv() {
    // no backtraces in the stack traces, whatever the environment says
    std::env::set_var("RUST_LIB_BACKTRACE", "0");

    let (handle, sink) = test_utils::start_in_memory(Severity::DEBUG, LogFormat::Stream);
    let e = ConfigError(std::io::Error::other("file is empty"));
    error!(user = "alice", error:err = e; "giving up");
    debug!(attempt = 3; "retrying");
    handle.flush();

    assert_eq!(
        sink.lines(),
        vec![
            "ERROR:test_error_kv:giving up",
            "loading the configuration failed",
            "Caused by: file is empty",
            "DEBUG:test_error_kv:retrying",
        ]
    );

    // the same with json
    let (handle, sink) = test_utils::start_in_memory(Severity::DEBUG, LogFormat::Json);
    error!(user = "alice", error:err = e; "giving up");
    handle.flush();

    let documents = test_utils::json_documents(&sink);
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["@fields"]["user"], "alice");
    assert_eq!(documents[0]["@fields"]["errno"], 255);
    assert!(documents[0]["@fields"].get("error").is_none());
    assert_eq!(
        documents[0]["stackTrace"],
        "loading the configuration failed\nCaused by: file is empty"
    );
}
