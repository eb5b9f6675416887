//! End-to-end benchmark runs against in-process mock servers.

use pathbench::{
    execute, BenchConfig, BenchError, DriverError, LatencyStats, PathRequest, Selection,
};
use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Accepts one connection and answers each request line with whatever
/// `respond` returns. `None` closes the connection.
async fn spawn_server<F>(respond: F) -> SocketAddr
where
    F: Fn(usize, PathRequest) -> Option<String> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();
        let mut seq = 0;

        while let Ok(Some(line)) = lines.next_line().await {
            let request: PathRequest = serde_json::from_str(&line).unwrap();
            match respond(seq, request) {
                Some(reply) => {
                    if write.write_all(reply.as_bytes()).await.is_err() {
                        break;
                    }
                }
                None => break,
            }
            seq += 1;
        }
    });

    addr
}

fn echo_reply(req: &PathRequest) -> String {
    serde_json::json!({
        "path": [req.origin, req.destination],
        "calc-duration": 0
    })
    .to_string()
        + "\n"
}

fn nodes_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn config_for(addr: SocketAddr, nodes: &NamedTempFile, samples: usize) -> BenchConfig {
    let mut config = BenchConfig::new(addr.to_string());
    config.nodes_file = nodes.path().to_path_buf();
    config.samples = samples;
    config.seed = Some(42);
    config
}

#[tokio::test]
async fn test_echo_server_transit_equals_round_trip() {
    let addr = spawn_server(|_, req| Some(echo_reply(&req))).await;
    let nodes = nodes_file("A B C D E");
    let config = config_for(addr, &nodes, 200);

    let report = execute(&config).await.unwrap();

    assert_eq!(report.queries(), 200);
    for sample in &report.samples {
        assert_eq!(sample.calc, std::time::Duration::ZERO);
        assert_eq!(sample.transit, sample.round_trip);
    }

    let expected = LatencyStats::from_samples(&report.samples).unwrap();
    assert_eq!(report.stats, expected);
    assert!(report.stats.min <= report.stats.mean);
    assert!(report.stats.mean <= report.stats.max);
    assert!(report.summary_line().starts_with("average RTT is "));
}

#[tokio::test]
async fn test_server_compute_time_is_subtracted() {
    let addr = spawn_server(|_, req| {
        Some(format!(
            "{{\"path\":[\"{}\"],\"calc-duration\":1000}}\n",
            req.origin
        ))
    })
    .await;
    let nodes = nodes_file("x y");
    let config = config_for(addr, &nodes, 20);

    let report = execute(&config).await.unwrap();
    for sample in &report.samples {
        assert_eq!(sample.calc, std::time::Duration::from_nanos(1000));
        assert_eq!(sample.transit + sample.calc, sample.round_trip);
    }
}

#[tokio::test]
async fn test_single_node_set_queries_same_pair() {
    let seen: Arc<Mutex<Vec<PathRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let addr = spawn_server(move |_, req| {
        let reply = echo_reply(&req);
        recorder.lock().unwrap().push(req);
        Some(reply)
    })
    .await;
    let nodes = nodes_file("only\n");
    let config = config_for(addr, &nodes, 25);

    execute(&config).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 25);
    assert!(seen.iter().all(|r| r.origin == "only" && r.destination == "only"));
}

#[tokio::test]
async fn test_fixed_pair_selection() {
    let seen: Arc<Mutex<Vec<PathRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let addr = spawn_server(move |_, req| {
        let reply = echo_reply(&req);
        recorder.lock().unwrap().push(req);
        Some(reply)
    })
    .await;
    let nodes = nodes_file("a b c");
    let mut config = config_for(addr, &nodes, 10);
    config.selection = Selection::Fixed {
        origin: "from".to_string(),
        destination: "to".to_string(),
    };

    execute(&config).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 10);
    assert!(seen.iter().all(|r| *r == PathRequest::new("from", "to")));
}

#[tokio::test]
async fn test_malformed_json_mid_stream_aborts() {
    let addr = spawn_server(|seq, req| {
        if seq < 3 {
            Some(echo_reply(&req))
        } else {
            Some("{\"path\": [\"A\", }\n".to_string())
        }
    })
    .await;
    let nodes = nodes_file("A B");
    let config = config_for(addr, &nodes, 10);

    let err = execute(&config).await.unwrap_err();
    assert!(matches!(
        err,
        BenchError::Driver(DriverError::ProtocolError(_))
    ));
}

#[tokio::test]
async fn test_error_payload_aborts() {
    let addr = spawn_server(|_, _| Some("{\"message\":\"graph not loaded\"}\n".to_string())).await;
    let nodes = nodes_file("A B");
    let config = config_for(addr, &nodes, 3);

    match execute(&config).await {
        Err(BenchError::Driver(DriverError::ServerError(msg))) => {
            assert_eq!(msg, "graph not loaded")
        }
        other => panic!("expected server error, got {:?}", other.map(|r| r.queries())),
    }
}

#[tokio::test]
async fn test_server_hangup_aborts() {
    let addr = spawn_server(|seq, req| if seq == 0 { Some(echo_reply(&req)) } else { None }).await;
    let nodes = nodes_file("A B");
    let config = config_for(addr, &nodes, 5);

    let err = execute(&config).await.unwrap_err();
    assert!(matches!(
        err,
        BenchError::Driver(DriverError::ProtocolError(_))
    ));
}

#[tokio::test]
async fn test_inflated_compute_time_is_flagged() {
    let addr = spawn_server(|_, _| {
        Some("{\"path\":[],\"calc-duration\":60000000000}\n".to_string())
    })
    .await;
    let nodes = nodes_file("A B");
    let config = config_for(addr, &nodes, 1);

    let err = execute(&config).await.unwrap_err();
    assert!(matches!(err, BenchError::NegativeTransit { .. }));
}

#[tokio::test]
async fn test_missing_node_file_fails_before_network() {
    // resolving this host would fail, so reaching the network shows up as a
    // resolve error instead of a node file error
    let mut config = BenchConfig::new("pathbench.invalid:1".to_string());
    let dir = tempfile::tempdir().unwrap();
    config.nodes_file = dir.path().join("nodes.txt");

    let err = execute(&config).await.unwrap_err();
    assert!(matches!(err, BenchError::NodeFile { .. }));
    assert!(err.is_config());
}

#[tokio::test]
async fn test_empty_node_file_completes_run() {
    let seen: Arc<Mutex<Vec<PathRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let addr = spawn_server(move |_, req| {
        let reply = echo_reply(&req);
        recorder.lock().unwrap().push(req);
        Some(reply)
    })
    .await;
    let nodes = nodes_file("");
    let config = config_for(addr, &nodes, 5);

    let report = execute(&config).await.unwrap();
    assert_eq!(report.queries(), 5);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 5);
    assert!(seen.iter().all(|r| *r == PathRequest::new("", "")));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let nodes = nodes_file("A B");
    let config = config_for(addr, &nodes, 1);

    let err = execute(&config).await.unwrap_err();
    assert!(matches!(
        err,
        BenchError::Driver(DriverError::ConnectionError(_))
    ));
}
