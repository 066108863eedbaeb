//! Engine subprocess management and JSON IPC.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use cellwire_core::CellAddress;
use cellwire_protocol::{
    CellValue, Command as EngineCommand, Request, Response, ResponseData, ResponseResult,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;

use crate::error::{BridgeError, Result};

/// Name searched on PATH when no explicit engine path is configured.
const DEFAULT_ENGINE: &str = "cellwire-engine";

/// Configuration for the engine bridge.
pub struct EngineConfig {
    /// Path to the engine executable. If None, searches PATH for
    /// `cellwire-engine`.
    pub engine_path: Option<PathBuf>,
    /// Extra arguments to pass to the engine.
    pub extra_args: Vec<String>,
    /// How long to wait for the engine to answer a single request.
    pub request_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_path: None,
            extra_args: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The main handle for communicating with the engine process.
///
/// The bridge owns the subprocess: it is spawned by [`EngineBridge::spawn`]
/// and stopped by [`EngineBridge::shutdown`]. One request is in flight at a
/// time; the caller suspends until the single response or failure arrives.
pub struct EngineBridge {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    request_timeout: Duration,
    next_id: u64,
}

impl EngineBridge {
    /// Start the engine process and take ownership of its stdio.
    pub fn spawn(config: EngineConfig) -> Result<Self> {
        let engine = config
            .engine_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENGINE));

        let mut cmd = Command::new(&engine);
        cmd.args(&config.extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            // Engine diagnostics go to our stderr; stdout stays protocol-only
            .stderr(Stdio::inherit());

        tracing::info!("starting engine: {:?}", cmd);
        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BridgeError::EngineNotFound(engine.display().to_string())
            } else {
                BridgeError::SpawnFailed(e)
            }
        })?;

        let stdin = child.stdin.take().ok_or(BridgeError::NotRunning)?;
        let stdout = child.stdout.take().ok_or(BridgeError::NotRunning)?;

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            request_timeout: config.request_timeout,
            next_id: 1,
        })
    }

    /// Send a command to the engine and wait for its response.
    ///
    /// Engine-reported failures come back as [`BridgeError::Engine`],
    /// unchanged and uninterpreted.
    pub async fn call(&mut self, command: EngineCommand) -> Result<Option<ResponseData>> {
        let id = self.next_id;
        self.next_id += 1;

        let request = Request { id, command };
        let json = serde_json::to_string(&request)?;
        tracing::debug!("request {id}: {json}");

        self.stdin
            .write_all(json.as_bytes())
            .await
            .map_err(|e| BridgeError::SendFailed(e.to_string()))?;
        self.stdin
            .write_all(b"\n")
            .await
            .map_err(|e| BridgeError::SendFailed(e.to_string()))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| BridgeError::SendFailed(e.to_string()))?;

        let line = timeout(self.request_timeout, self.stdout.next_line())
            .await
            .map_err(|_| BridgeError::Timeout(self.request_timeout))?
            .map_err(|e| BridgeError::ReadFailed(e.to_string()))?
            .ok_or(BridgeError::NotRunning)?;

        tracing::debug!("response {id}: {line}");
        let response: Response = serde_json::from_str(&line)?;
        if response.id != id {
            return Err(BridgeError::UnexpectedResponse(format!(
                "response id {} does not match request id {id}",
                response.id
            )));
        }

        match response.result {
            ResponseResult::Ok { data } => Ok(data),
            ResponseResult::Error { message } => Err(BridgeError::Engine(message)),
        }
    }

    /// Get the formula text stored at a cell (empty string if none).
    pub async fn get_formula(&mut self, address: &CellAddress) -> Result<String> {
        let data = self
            .call(EngineCommand::GetFormula {
                address: address.to_string(),
            })
            .await?;
        match data {
            Some(ResponseData::Formula { formula }) => Ok(formula),
            other => Err(BridgeError::UnexpectedResponse(format!("{other:?}"))),
        }
    }

    /// Replace the formula at a cell.
    ///
    /// Returns the value of every cell the engine recomputed as a result of
    /// the edit, keyed by typed address.
    pub async fn set_formula(
        &mut self,
        address: &CellAddress,
        formula: &str,
    ) -> Result<BTreeMap<CellAddress, CellValue>> {
        let data = self
            .call(EngineCommand::SetFormula {
                address: address.to_string(),
                formula: formula.to_string(),
            })
            .await?;
        match data {
            Some(ResponseData::Updates { updates }) => parse_updates(updates),
            other => Err(BridgeError::UnexpectedResponse(format!("{other:?}"))),
        }
    }

    /// Shut down the bridge: ask the engine to exit, then reap the process.
    pub async fn shutdown(mut self) -> Result<()> {
        // Best effort; the engine may already be gone.
        let _ = self.call(EngineCommand::Shutdown).await;

        let _ = self.child.kill().await;
        let _ = self.child.wait().await;
        tracing::info!("engine stopped");
        Ok(())
    }
}

/// Re-key a wire updates map into typed addresses.
///
/// A key the client cannot parse is an error, not a dropped entry.
fn parse_updates(updates: BTreeMap<String, CellValue>) -> Result<BTreeMap<CellAddress, CellValue>> {
    updates
        .into_iter()
        .map(|(address, value)| Ok((address.parse::<CellAddress>()?, value)))
        .collect()
}
