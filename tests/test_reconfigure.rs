
use log::*;
use prettylog::{DateFormat, LogFormat, Logger, PrettyLogError, Severity};

#[test]
fn test_reconfigure() {
    // configuring twice does not duplicate the output
    let (_first, first_sink) = test_utils::start_in_memory(Severity::INFO, LogFormat::Stream);
    let (handle, second_sink) = test_utils::start_in_memory(Severity::INFO, LogFormat::Stream);
    info!("exactly once");
    assert!(first_sink.contents().is_empty());
    assert_eq!(second_sink.lines(), vec!["INFO:test_reconfigure:exactly once"]);
    assert_eq!(handle.min_severity(), Some(Severity::INFO));
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    // a failing configuration leaves the previous one in place
    assert!(matches!(
        Logger::with_severity(Severity::DEBUG).try_format("xml"),
        Err(PrettyLogError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        Logger::with_severity(Severity::DEBUG)
            .date_format(DateFormat::Pattern("%!".to_string()))
            .start(),
        Err(PrettyLogError::InvalidDateFormat(_))
    ));
    assert!(matches!(
        Logger::with_severity(Severity::DEBUG)
            .buffered(true)
            .buffer_size(0)
            .start(),
        Err(PrettyLogError::InvalidBufferSize)
    ));
    second_sink.clear();
    debug!("still filtered");
    info!("still here");
    assert_eq!(second_sink.lines(), vec!["INFO:test_reconfigure:still here"]);

    // the level can be changed by reconfiguring
    let (_third, third_sink) = test_utils::start_in_memory(Severity::TRACE, LogFormat::Stream);
    trace!("now visible");
    assert_eq!(third_sink.lines(), vec!["TRACE:test_reconfigure:now visible"]);
    assert_eq!(log::max_level(), log::LevelFilter::Trace);

    // after shutdown, nothing is written anymore
    handle.shutdown();
    assert!(!handle.is_installed());
    error!("lost");
    assert_eq!(third_sink.lines(), vec!["TRACE:test_reconfigure:now visible"]);
}
