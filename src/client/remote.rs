// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::protocol::{Envelope, Request};
use super::{Backend, Fetched, PathQuery, Unavailable};
use crate::model::{GraphSnapshot, Job, NodeId, PathQueryResult, RouteResult, TopoCheck};

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a remote solver speaking line-delimited JSON over TCP.
///
/// Each call opens a fresh connection, writes one request line, and reads
/// one envelope line, all under a single deadline. Every failure mode maps
/// to [`Unavailable`] at the capability boundary.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    addr: String,
    call_timeout: Duration,
}

impl RemoteBackend {
    pub fn new(addr: impl Into<String>) -> Self {
        Self::with_timeout(addr, DEFAULT_CALL_TIMEOUT)
    }

    pub fn with_timeout(addr: impl Into<String>, call_timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            call_timeout,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn call<T: DeserializeOwned>(&self, request: &Request) -> Result<T, RemoteError> {
        let round_trip = async {
            let mut stream = TcpStream::connect(&self.addr)
                .await
                .map_err(RemoteError::Connect)?;

            let mut line = serde_json::to_string(request).map_err(RemoteError::Encode)?;
            line.push('\n');
            stream
                .write_all(line.as_bytes())
                .await
                .map_err(RemoteError::Io)?;

            let mut reader = BufReader::new(stream);
            let mut reply = String::new();
            let read = reader.read_line(&mut reply).await.map_err(RemoteError::Io)?;
            if read == 0 {
                return Err(RemoteError::ConnectionClosed);
            }

            let envelope: Envelope<T> =
                serde_json::from_str(reply.trim_end()).map_err(RemoteError::Decode)?;
            if !envelope.ok {
                return Err(RemoteError::Rejected(
                    envelope
                        .error
                        .unwrap_or_else(|| "unspecified solver error".to_owned()),
                ));
            }
            envelope.data.ok_or(RemoteError::MissingData)
        };

        timeout(self.call_timeout, round_trip)
            .await
            .map_err(|_| RemoteError::TimedOut(self.call_timeout))?
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Fetched<T> {
        self.call(&request).await.map_err(Unavailable::from)
    }
}

impl PathQuery for RemoteBackend {
    fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
    ) -> impl Future<Output = Fetched<PathQueryResult>> + Send {
        self.fetch(Request::Path { from, to })
    }
}

impl Backend for RemoteBackend {
    fn graph(&self) -> impl Future<Output = Fetched<GraphSnapshot>> + Send {
        self.fetch(Request::Graph)
    }

    fn jobs(&self) -> impl Future<Output = Fetched<Vec<Job>>> + Send {
        self.fetch(Request::Jobs)
    }

    fn topology(&self) -> impl Future<Output = Fetched<TopoCheck>> + Send {
        self.fetch(Request::Topo)
    }

    fn greedy(&self, start: NodeId) -> impl Future<Output = Fetched<RouteResult>> + Send {
        self.fetch(Request::Greedy { start_node: start })
    }

    fn optimal(&self, start: NodeId) -> impl Future<Output = Fetched<RouteResult>> + Send {
        self.fetch(Request::Optimal { start_node: start })
    }
}

#[derive(Debug)]
pub enum RemoteError {
    Connect(std::io::Error),
    Io(std::io::Error),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    Rejected(String),
    ConnectionClosed,
    MissingData,
    TimedOut(Duration),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect(err) => write!(f, "connect failed: {err}"),
            Self::Io(err) => write!(f, "transport failed: {err}"),
            Self::Encode(err) => write!(f, "request encode failed: {err}"),
            Self::Decode(err) => write!(f, "malformed solver reply: {err}"),
            Self::Rejected(reason) => write!(f, "solver rejected the request: {reason}"),
            Self::ConnectionClosed => f.write_str("solver closed the connection without replying"),
            Self::MissingData => f.write_str("solver reply was ok but carried no data"),
            Self::TimedOut(limit) => write!(f, "no reply within {limit:?}"),
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<RemoteError> for Unavailable {
    fn from(err: RemoteError) -> Self {
        Unavailable::new(err.to_string())
    }
}
