//! Dialog process management

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::{oneshot, Notify};
use tokio::task::JoinHandle;

use zenity_core::prelude::*;
use zenity_core::ProcessOutput;

/// How long `terminate()` waits after closing stdin before force-killing.
pub const TERMINATE_GRACE_PERIOD: Duration = Duration::from_millis(500);

/// A running dialog binary.
///
/// The `Child` handle is moved into a dedicated `wait_for_exit` task, so the
/// real exit code is captured even while the caller is still writing to
/// stdin. stdout and stderr are drained by their own tasks and handed back
/// by [`read_all`](Self::read_all).
///
/// `ZenityProcess` keeps the stdin pipe, a kill channel ([`kill_tx`]) to
/// request a force-kill, an atomic flag ([`exited`]) for synchronous
/// `has_exited()` checks, and a [`Notify`] so callers can await exit without
/// consuming the handle.
pub struct ZenityProcess {
    /// Dropped (closing the pipe) by `close_stdin`, `read_all` or `terminate`
    stdin: Option<ChildStdin>,
    /// Process ID for logging
    pid: Option<u32>,
    /// Consumed on first use (or on drop)
    kill_tx: Option<oneshot::Sender<()>>,
    /// Set to `true` by the wait task once the child has exited
    exited: Arc<AtomicBool>,
    /// Notified by the wait task immediately after the child exits
    exit_notify: Arc<Notify>,
    stdout_task: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    stderr_task: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    wait_task: Option<JoinHandle<Option<i32>>>,
}

impl ZenityProcess {
    /// Spawn `binary` with `args`, with all three standard streams piped.
    ///
    /// Fails with [`Error::Launch`] when the binary cannot be started.
    pub fn spawn(binary: &Path, args: &[String], env: &HashMap<String, String>) -> Result<Self> {
        info!("Spawning dialog: {} {}", binary.display(), args.join(" "));

        let mut child = Command::new(binary)
            .args(args)
            .envs(env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::launch(binary, e.to_string()))?;

        let pid = child.id();
        debug!("Dialog process started with PID: {:?}", pid);

        let stdin = child.stdin.take();
        let stdout_task = child
            .stdout
            .take()
            .map(|stdout| tokio::spawn(Self::collect_lines(stdout, "stdout")));
        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| tokio::spawn(Self::collect_lines(stderr, "stderr")));

        let exited = Arc::new(AtomicBool::new(false));
        let exit_notify = Arc::new(Notify::new());
        let (kill_tx, kill_rx) = oneshot::channel::<()>();

        let wait_task = tokio::spawn(Self::wait_for_exit(
            child,
            kill_rx,
            Arc::clone(&exited),
            Arc::clone(&exit_notify),
        ));

        Ok(Self {
            stdin,
            pid,
            kill_tx: Some(kill_tx),
            exited,
            exit_notify,
            stdout_task,
            stderr_task,
            wait_task: Some(wait_task),
        })
    }

    /// Background task: owns `child`, waits for it to exit, returns its code.
    ///
    /// Ends either when the dialog closes on its own or when `kill_rx` fires,
    /// in which case the child is killed first and then reaped.
    async fn wait_for_exit(
        mut child: Child,
        kill_rx: oneshot::Receiver<()>,
        exited: Arc<AtomicBool>,
        exit_notify: Arc<Notify>,
    ) -> Option<i32> {
        let code: Option<i32> = tokio::select! {
            result = child.wait() => {
                match result {
                    Ok(status) => {
                        debug!("Dialog process exited with status: {:?}", status);
                        status.code()
                    }
                    Err(e) => {
                        error!("Error waiting for dialog process: {}", e);
                        None
                    }
                }
            }
            Ok(()) = kill_rx => {
                info!("Kill signal received, force-killing dialog process");
                if let Err(e) = child.kill().await {
                    error!("Failed to kill dialog process: {}", e);
                }
                match child.wait().await {
                    Ok(status) => status.code(),
                    Err(e) => {
                        error!("Error waiting after kill: {}", e);
                        None
                    }
                }
            }
        };

        // `has_exited()` must be true before anyone woken by the notify looks
        exited.store(true, Ordering::Release);
        exit_notify.notify_waiters();

        code
    }

    /// Drain a pipe line by line until EOF, keeping the raw bytes
    async fn collect_lines<R>(pipe: R, name: &'static str) -> std::io::Result<Vec<u8>>
    where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(pipe);
        let mut collected = Vec::new();

        loop {
            let start = collected.len();
            match reader.read_until(b'\n', &mut collected).await {
                Ok(0) => break,
                Ok(_) => trace!(
                    "{}: {}",
                    name,
                    String::from_utf8_lossy(&collected[start..]).trim_end()
                ),
                Err(e) => {
                    error!(
                        "Reading dialog {} failed after {} bytes: {}",
                        name,
                        collected.len(),
                        e
                    );
                    return Err(e);
                }
            }
        }

        debug!("{} reader finished", name);
        Ok(collected)
    }

    async fn join_reader(
        task: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
        name: &'static str,
    ) -> std::io::Result<Vec<u8>> {
        match task {
            Some(task) => task.await.unwrap_or_else(|e| {
                error!("{} reader failed: {}", name, e);
                Err(std::io::Error::other(e))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Append one newline-terminated record to the process input.
    ///
    /// Fails with [`Error::BrokenPipe`] if the process already exited or its
    /// input was closed, and with [`Error::Protocol`] if `line` itself
    /// contains a line break (it would be read as several records).
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        if line.contains(['\n', '\r']) {
            return Err(Error::protocol(format!(
                "record contains a line break: {:?}",
                line
            )));
        }
        if self.has_exited() {
            return Err(Error::BrokenPipe);
        }
        let stdin = self.stdin.as_mut().ok_or(Error::BrokenPipe)?;

        debug!("Sending to dialog: {}", line);
        match Self::write_record(stdin, line).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                warn!("Dialog input closed while writing: {}", e);
                self.stdin = None;
                Err(Error::BrokenPipe)
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn write_record(stdin: &mut ChildStdin, line: &str) -> std::io::Result<()> {
        stdin.write_all(line.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await
    }

    /// Close stdin, signalling end of input. Later writes fail.
    pub fn close_stdin(&mut self) {
        if self.stdin.take().is_some() {
            debug!("Closed dialog input");
        }
    }

    /// Close stdin, wait for the process to exit and collect its output.
    ///
    /// Fails with [`Error::Io`] if stdout could not be read to the end; a
    /// truncated value is never handed out as if it were complete.
    pub async fn read_all(mut self) -> Result<ProcessOutput> {
        self.close_stdin();

        let stdout = Self::join_reader(self.stdout_task.take(), "stdout").await;
        let stderr = Self::join_reader(self.stderr_task.take(), "stderr").await;
        let code = self.join_wait_task().await;

        Ok(ProcessOutput {
            stdout: stdout?,
            // Already logged by the reader; keep whatever arrived
            stderr: String::from_utf8_lossy(&stderr.unwrap_or_default()).into_owned(),
            code,
        })
    }

    /// Stop the process: close stdin, give it a short grace period to exit on
    /// its own, then kill it. A process that already exited is left alone.
    pub async fn terminate(mut self) -> Result<()> {
        if self.has_exited() {
            debug!("Dialog process already exited, nothing to terminate");
            self.join_wait_task().await;
            return Ok(());
        }

        info!("Terminating dialog process {:?}", self.pid);
        self.close_stdin();

        // Create the `notified()` future before re-checking the flag so a
        // notification between the check and the await cannot be missed.
        let exit_notify = Arc::clone(&self.exit_notify);
        let notified = exit_notify.notified();
        let exited_in_time = self.has_exited()
            || tokio::time::timeout(TERMINATE_GRACE_PERIOD, notified)
                .await
                .is_ok();
        if !exited_in_time {
            warn!("Dialog did not exit after closing input, force killing");
            self.force_kill();
        }

        self.join_wait_task().await;
        Ok(())
    }

    /// Signal the wait task to kill the child
    fn force_kill(&mut self) {
        if let Some(tx) = self.kill_tx.take() {
            // The wait task may have finished naturally in the meantime
            let _ = tx.send(());
        }
    }

    async fn join_wait_task(&mut self) -> Option<i32> {
        match self.wait_task.take() {
            Some(task) => task.await.unwrap_or_else(|e| {
                error!("wait task failed: {}", e);
                None
            }),
            None => None,
        }
    }

    /// Wait until the process exits without consuming the handle
    pub async fn wait_exited(&self) {
        let notified = self.exit_notify.notified();
        if self.has_exited() {
            return;
        }
        notified.await;
    }

    /// Non-blocking check backed by the flag the wait task sets
    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        !self.has_exited()
    }

    /// Get the process ID
    pub fn id(&self) -> Option<u32> {
        self.pid
    }
}

impl std::fmt::Debug for ZenityProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZenityProcess")
            .field("pid", &self.pid)
            .field("exited", &self.has_exited())
            .field("stdin_open", &self.stdin.is_some())
            .finish()
    }
}

impl Drop for ZenityProcess {
    fn drop(&mut self) {
        if !self.has_exited() && self.wait_task.is_some() {
            warn!("ZenityProcess dropped while dialog may still be open");
            self.force_kill();
        }
        // kill_on_drop(true) on the Child is the final safety net
    }
}
