
use log::*;
use prettylog::{LogFormat, Severity};

const NO_OF_THREADS: usize = 5;
const NO_OF_LOGLINES_PER_THREAD: usize = 1_000;

#[test]
fn multi_threaded() {
    let (handle, sink) = test_utils::start_in_memory(Severity::INFO, LogFormat::Json);

    let worker_handles: Vec<_> = (0..NO_OF_THREADS)
        .map(|thread_number| {
            std::thread::Builder::new()
                .name(format!("worker-{thread_number}"))
                .spawn(move || {
                    for idx in 0..NO_OF_LOGLINES_PER_THREAD {
                        info!(idx = idx; "line {idx} of {thread_number}");
                    }
                })
                .unwrap()
        })
        .collect();
    for worker in worker_handles {
        worker.join().unwrap();
    }
    handle.flush();

    // every line is a complete document, and each thread's lines are in order
    let documents = test_utils::json_documents(&sink);
    assert_eq!(documents.len(), NO_OF_THREADS * NO_OF_LOGLINES_PER_THREAD);
    let mut next_idx = vec![0_u64; NO_OF_THREADS];
    for document in &documents {
        let thread_name = document["@fields"]["thread_name"].as_str().unwrap();
        let thread_number: usize = thread_name["worker-".len()..].parse().unwrap();
        let idx = document["@fields"]["idx"].as_u64().unwrap();
        assert_eq!(idx, next_idx[thread_number]);
        next_idx[thread_number] += 1;
    }
}
