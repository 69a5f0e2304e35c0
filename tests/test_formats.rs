
use log::*;
use prettylog::{basic_config, DateFormat, LogConfig, LogFormat};

// Every format is configured in its own process, with the real destinations.
#[test]
fn test_formats() {
    if let Some(value) = test_utils::dispatch(4) {
        let format = LogFormat::try_from(value).unwrap();
        for date_format in [
            DateFormat::Unset,
            DateFormat::Disabled,
            DateFormat::FormatDefault,
            DateFormat::Pattern("%H:%M:%S%.3f".to_string()),
        ] {
            let handle = basic_config(&LogConfig {
                format,
                date_format,
                ..LogConfig::default()
            })
            .unwrap_or_else(|e| panic!("{format} could not be configured: {e}"));
            assert!(handle.is_installed());

            info!("This is an info message in format {format}");
            warn!(answer = 42; "This is a warning message");
            error!(error:err = std::io::Error::other("broken"); "This is an error message");
            debug!("This is a debug message - you must not see it!");
            handle.flush();
        }
    }
}
