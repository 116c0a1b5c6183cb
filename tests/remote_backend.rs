// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! RemoteBackend against a scripted loopback solver. Each case stands up a
//! one-shot TCP server, scripts a single reply line, and asserts how the
//! client surfaces it.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use hermod::client::protocol::{Envelope, Request};
use hermod::client::{Backend, PathQuery, RemoteBackend};
use hermod::model::{
    AdjacencyRow, GraphSnapshot, Neighbor, NodeId, PathQueryResult, RouteResult, Strategy,
    TopoCheck,
};

fn n(value: i64) -> NodeId {
    NodeId::new(value)
}

/// Binds a loopback listener and answers exactly one request with the line
/// `script` produces for it. Returns the address to dial and the server
/// task handle carrying the request the server saw.
async fn one_shot_server(
    script: impl FnOnce(Request) -> String + Send + 'static,
) -> (String, tokio::task::JoinHandle<Request>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();
    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).await.expect("read request");
        let request: Request = serde_json::from_str(line.trim_end()).expect("parse request");
        let mut reply = script(request.clone());
        reply.push('\n');
        let mut stream = reader.into_inner();
        stream.write_all(reply.as_bytes()).await.expect("write reply");
        request
    });
    (addr, handle)
}

fn success_line<T: serde::Serialize>(data: T) -> String {
    serde_json::to_string(&Envelope::success(data)).expect("encode envelope")
}

#[tokio::test]
async fn graph_fetch_round_trips() {
    let snapshot = GraphSnapshot {
        nodes: vec![n(1), n(2)],
        adjacency: vec![AdjacencyRow {
            node: n(1),
            neighbors: vec![Neighbor {
                to: n(2),
                weight: 5.0,
            }],
        }],
    };
    let payload = snapshot.clone();
    let (addr, server) = one_shot_server(move |_| success_line(payload)).await;

    let backend = RemoteBackend::new(addr);
    let fetched = backend.graph().await.expect("graph");
    assert_eq!(fetched, snapshot);
    assert_eq!(server.await.expect("server"), Request::Graph);
}

#[tokio::test]
async fn path_query_carries_its_endpoints() {
    let (addr, server) = one_shot_server(|request| {
        let Request::Path { from, to } = request else {
            panic!("expected path request");
        };
        success_line(PathQueryResult::found(vec![from, to]))
    })
    .await;

    let backend = RemoteBackend::new(addr);
    let result = backend.shortest_path(n(2), n(9)).await.expect("path");
    assert!(result.reachable);
    assert_eq!(result.path, Some(vec![n(2), n(9)]));
    assert_eq!(server.await.expect("server"), Request::Path { from: n(2), to: n(9) });
}

#[tokio::test]
async fn strategy_requests_name_their_start_node() {
    let (addr, server) = one_shot_server(|request| {
        let Request::Optimal { start_node } = request else {
            panic!("expected optimal request");
        };
        success_line(RouteResult {
            strategy: Strategy::Optimal,
            start_node,
            job_order: Vec::new(),
            total_cost: 0.0,
        })
    })
    .await;

    let backend = RemoteBackend::new(addr);
    let result = backend.optimal(n(4)).await.expect("optimal");
    assert_eq!(result.start_node, n(4));
    assert_eq!(server.await.expect("server"), Request::Optimal { start_node: n(4) });
}

#[tokio::test]
async fn rejection_becomes_unavailable_with_the_reason() {
    let (addr, _server) =
        one_shot_server(|_| serde_json::to_string(&Envelope::<TopoCheck>::rejection("no dataset loaded")).expect("encode"))
            .await;

    let backend = RemoteBackend::new(addr);
    let sentinel = backend.topology().await.unwrap_err();
    assert_eq!(
        sentinel.reason(),
        "solver rejected the request: no dataset loaded"
    );
}

#[tokio::test]
async fn garbage_reply_becomes_unavailable() {
    let (addr, _server) = one_shot_server(|_| "certainly not json".to_owned()).await;

    let backend = RemoteBackend::new(addr);
    let sentinel = backend.jobs().await.unwrap_err();
    assert!(sentinel.reason().starts_with("malformed solver reply"));
}

#[tokio::test]
async fn ok_reply_without_data_becomes_unavailable() {
    let (addr, _server) = one_shot_server(|_| r#"{"ok": true}"#.to_owned()).await;

    let backend = RemoteBackend::new(addr);
    let sentinel = backend.topology().await.unwrap_err();
    assert_eq!(sentinel.reason(), "solver reply was ok but carried no data");
}

#[tokio::test]
async fn closed_connection_becomes_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).await.expect("read request");
        // Drop the stream without replying.
    });

    let backend = RemoteBackend::new(addr);
    let sentinel = backend.jobs().await.unwrap_err();
    assert_eq!(
        sentinel.reason(),
        "solver closed the connection without replying"
    );
}

#[tokio::test]
async fn refused_connection_becomes_unavailable() {
    // Bind then drop to find a port with nothing listening on it.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();
    drop(listener);

    let backend = RemoteBackend::new(addr);
    let sentinel = backend.graph().await.unwrap_err();
    assert!(sentinel.reason().starts_with("connect failed"));
}

#[tokio::test]
async fn silent_solver_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        // Hold the connection open without ever replying.
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(stream);
    });

    let backend = RemoteBackend::with_timeout(addr, Duration::from_millis(100));
    let sentinel = backend.greedy(n(1)).await.unwrap_err();
    assert!(sentinel.reason().starts_with("no reply within"));
    server.abort();
}
