use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::Result;
use log::{debug, error, info, warn};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{MediaError, MediaHandle};

const CONNECT_ATTEMPTS: usize = 40;
const CONNECT_INTERVAL: Duration = Duration::from_millis(50);

/// An external `mpv` window driven over its JSON IPC socket.
///
/// The player is started paused; commands are queued to a background task
/// that owns the socket, so calls never block the UI loop.
pub struct MpvPlayer {
    commands: mpsc::UnboundedSender<Value>,
    io_task: Option<JoinHandle<()>>,
    _child: Option<Child>,
    socket_path: PathBuf,
}

impl MpvPlayer {
    pub async fn launch(program: &str, url: &str) -> Result<Self, MediaError> {
        let socket_path =
            std::env::temp_dir().join(format!("reelview-mpv-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&socket_path);

        let mut child = Command::new(program)
            .arg("--pause")
            .arg("--loop-file=inf")
            .arg("--really-quiet")
            .arg("--force-window=immediate")
            .arg(format!("--input-ipc-server={}", socket_path.display()))
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MediaError::Unavailable(format!("cannot start {program}: {e}")))?;

        let stream = Self::connect(&socket_path, &mut child).await?;
        info!("Attached to {} for {}", program, url);
        Ok(Self::attach(stream, Some(child), socket_path))
    }

    /// Starts the IPC task over an already-connected socket.
    fn attach(stream: UnixStream, child: Option<Child>, socket_path: PathBuf) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let io_task = tokio::spawn(async move {
            if let Err(e) = Self::run_ipc(stream, receiver).await {
                error!("mpv IPC error: {:?}", e);
            }
        });

        Self {
            commands: sender,
            io_task: Some(io_task),
            _child: child,
            socket_path,
        }
    }

    async fn connect(path: &Path, child: &mut Child) -> Result<UnixStream, MediaError> {
        for _ in 0..CONNECT_ATTEMPTS {
            match UnixStream::connect(path).await {
                Ok(stream) => return Ok(stream),
                Err(_) => {
                    if let Ok(Some(status)) = child.try_wait() {
                        return Err(MediaError::Unavailable(format!(
                            "player exited early ({status})"
                        )));
                    }
                    tokio::time::sleep(CONNECT_INTERVAL).await;
                }
            }
        }
        Err(MediaError::Unavailable(
            "player IPC socket never appeared".to_string(),
        ))
    }

    async fn run_ipc(
        stream: UnixStream,
        mut commands: mpsc::UnboundedReceiver<Value>,
    ) -> Result<()> {
        let (read, mut write) = stream.into_split();
        let mut replies = BufReader::new(read).lines();

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    let mut line = serde_json::to_vec(&command)?;
                    line.push(b'\n');
                    write.write_all(&line).await?;
                }
                reply = replies.next_line() => {
                    match reply? {
                        Some(reply) => Self::log_reply(&reply),
                        None => {
                            info!("mpv closed the IPC connection");
                            break;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn log_reply(reply: &str) {
        match serde_json::from_str::<Value>(reply) {
            Ok(value) => match value.get("error").and_then(Value::as_str) {
                Some("success") | None => debug!("mpv: {}", reply),
                Some(err) => warn!("mpv rejected a command: {}", err),
            },
            Err(_) => debug!("mpv sent non-JSON line: {}", reply),
        }
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), MediaError> {
        self.commands
            .send(json!({ "command": ["set_property", name, value] }))
            .map_err(|_| MediaError::Disconnected)
    }
}

impl MediaHandle for MpvPlayer {
    fn play(&mut self) -> Result<(), MediaError> {
        self.set_property("pause", json!(false))
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.set_property("pause", json!(true))
    }

    fn set_muted(&mut self, muted: bool) -> Result<(), MediaError> {
        self.set_property("mute", json!(muted))
    }

    fn set_looping(&mut self, looping: bool) -> Result<(), MediaError> {
        self.set_property("loop-file", json!(if looping { "inf" } else { "no" }))
    }
}

impl Drop for MpvPlayer {
    fn drop(&mut self) {
        if let Some(task) = self.io_task.take() {
            task.abort();
        }
        let _ = std::fs::remove_file(&self.socket_path);
    }
}
