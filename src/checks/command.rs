use std::ffi::OsStr;
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use crate::check::{Check, CheckContext, CheckError, CheckFailure, CheckResult};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Run `program` with `args` in the repository root.
///
/// stdout and stderr share one pipe, so the logged output keeps the order
/// in which the child wrote it. The command line, exit status and output go
/// to the step log: at debug level when the command succeeds, at warning
/// level when it fails. The child is killed if the run is cancelled while it
/// is running, and a child that dies from an interrupt counts as cancelled.
///
/// # Errors
/// Returns a silent [`CheckFailure`] on a non-zero exit (the output is
/// already in the log), [`CheckError::Cancelled`] on cancellation, and an
/// I/O error if the program cannot be started.
pub fn call<I, S>(ctx: &CheckContext, program: &str, args: I) -> CheckResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let (reader, writer) = io::pipe()?;
    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(&ctx.repository_root)
        .stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);

    let rendered = format!("{command:?}");
    ctx.log.debug(format!("[RUN] cwd={}\n{rendered}", ctx.repository_root.display()));

    let spawned = command.spawn();
    // The command holds our copies of the write end; the reader only sees EOF
    // once they are gone.
    drop(command);
    let mut child = spawned?;
    let output = drain(reader);

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if ctx.is_cancelled() {
            kill(&mut child);
            ctx.log.warn(format!("[CANCELLED]\n{rendered}"));
            return Err(CheckError::Cancelled);
        }
        thread::sleep(POLL_INTERVAL);
    };

    let output = collect(output);

    if interrupted(status) {
        ctx.log.warn(format!("[INTERRUPTED]\n{rendered}"));
        if !output.is_empty() {
            ctx.log.warn(format!("[OUTPUT]\n{output}"));
        }
        return Err(CheckError::Cancelled);
    }

    let code = status
        .code()
        .map_or_else(|| status.to_string(), |c| c.to_string());
    if status.success() {
        ctx.log.debug(format!("[FINISHED]\n{rendered}"));
        ctx.log.debug(format!("[RESULT] Passed with return code {code}"));
        if !output.is_empty() {
            ctx.log.debug(format!("[OUTPUT]\n{output}"));
        }
        return Ok(());
    }

    ctx.log.warn(format!("[FINISHED]\n{rendered}"));
    ctx.log.warn(format!("[RESULT] Failed with return code {code}"));
    if !output.is_empty() {
        ctx.log.warn(format!("[OUTPUT]\n{output}"));
    }
    Err(CheckFailure::silent().into())
}

/// A terminal Ctrl-C reaches the child's process group too, often before the
/// run's own token is set.
#[cfg(unix)]
fn interrupted(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;

    const SIGINT: i32 = 2;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
const fn interrupted(_status: ExitStatus) -> bool {
    false
}

type Reader = thread::JoinHandle<Vec<u8>>;

/// Read the child's pipe to the end on a separate thread so the child never
/// blocks on a full pipe while we poll it.
fn drain<R: Read + Send + 'static>(mut pipe: R) -> Reader {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let _ = pipe.read_to_end(&mut buffer);
        buffer
    })
}

fn collect(reader: Reader) -> String {
    reader
        .join()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn kill(child: &mut Child) {
    if let Err(err) = child.kill()
        && err.kind() != io::ErrorKind::InvalidInput
    {
        tracing::warn!("Failed to kill child process: {err}");
    }
    let _ = child.wait();
}

/// A configured external command.
///
/// With `pass_paths` the matched paths are appended to the arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCheck {
    name: String,
    program: String,
    args: Vec<String>,
    pass_paths: bool,
}

impl CommandCheck {
    #[must_use]
    pub fn new(name: impl Into<String>, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
            pass_paths: true,
        }
    }

    #[must_use]
    pub const fn with_pass_paths(mut self, pass_paths: bool) -> Self {
        self.pass_paths = pass_paths;
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub const fn pass_paths(&self) -> bool {
        self.pass_paths
    }
}

impl Check for CommandCheck {
    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let mut args: Vec<&OsStr> = self.args.iter().map(OsStr::new).collect();
        if self.pass_paths {
            args.extend(ctx.paths.iter().map(|p| p.as_os_str()));
        }
        call(ctx, &self.program, args)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
