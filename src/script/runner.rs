//! Child process execution with live output.
//!
//! The child's stdout is drained on the calling thread while one scoped
//! worker drains stderr; both copy into the same sink as bytes arrive.
//! Draining both pipes at once keeps a chatty child from blocking on a
//! full stderr pipe while we wait on stdout.

use std::io::{self, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Mutex;
use std::thread;

use crate::errors::{PassportError, Result};

/// Size of the copy buffer for each pipe.
const CHUNK_LEN: usize = 4096;

/// Run `argv` and stream its output to this process's stdout.
pub fn run(argv: &[String]) -> Result<i32> {
    run_with_output(argv, io::stdout())
}

/// Run `argv`, copying the child's stdout and stderr into `sink`.
///
/// Returns the child's exit code.  The working directory and
/// environment are inherited.  There is no timeout.
pub fn run_with_output<W: Write + Send>(argv: &[String], sink: W) -> Result<i32> {
    let (program, args) = argv.split_first().ok_or(PassportError::EmptyCommand)?;

    tracing::debug!(%program, args = args.len(), "spawning script");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| PassportError::SpawnFailed {
            program: program.clone(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let sink = Mutex::new(sink);

    let forwarded = thread::scope(|scope| {
        let worker = scope.spawn(|| match stderr {
            Some(pipe) => forward(pipe, &sink),
            None => Ok(()),
        });

        let main = match stdout {
            Some(pipe) => forward(pipe, &sink),
            None => Ok(()),
        };

        let background = worker.join().unwrap_or_else(|_| {
            Err(io::Error::new(io::ErrorKind::Other, "output worker panicked"))
        });

        main.and(background)
    });

    // Reap the child before reporting a forwarding error.
    let status = child.wait()?;
    forwarded.map_err(|e| PassportError::ProcessFailed(format!("forwarding output: {e}")))?;

    exit_code(status)
}

/// Copy `reader` into the shared sink until end of input.
fn forward<R: Read, W: Write>(mut reader: R, sink: &Mutex<W>) -> io::Result<()> {
    let mut buf = [0u8; CHUNK_LEN];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        let mut out = sink
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output sink poisoned"))?;
        out.write_all(&buf[..n])?;
        out.flush()?;
    }
}

fn exit_code(status: ExitStatus) -> Result<i32> {
    if let Some(code) = status.code() {
        return Ok(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Err(PassportError::ProcessFailed(format!(
                "terminated by signal {signal}"
            )));
        }
    }

    Err(PassportError::ProcessFailed("terminated without an exit code".into()))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn returns_child_exit_code() {
        let code = run_with_output(&argv(&["sh", "-c", "exit 7"]), Vec::new()).unwrap();
        assert_eq!(code, 7);
    }

    #[test]
    fn captures_stdout() {
        let mut out = Vec::new();
        let code = run_with_output(&argv(&["echo", "hello world"]), &mut out).unwrap();
        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "hello world\n");
    }

    #[test]
    fn merges_stderr_into_sink() {
        let mut out = Vec::new();
        run_with_output(&argv(&["sh", "-c", "echo out; echo err 1>&2"]), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("out\n"));
        assert!(text.contains("err\n"));
    }

    #[test]
    fn large_stderr_does_not_deadlock() {
        let mut out = Vec::new();
        let script = "i=0; while [ $i -lt 2000 ]; do echo line-$i 1>&2; i=$((i+1)); done; echo done";
        let code = run_with_output(&argv(&["sh", "-c", script]), &mut out).unwrap();

        assert_eq!(code, 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("line-1999"));
        assert!(text.contains("done"));
    }

    #[test]
    fn missing_program_is_spawn_failure() {
        let result = run_with_output(&argv(&["passport-no-such-binary-xyz"]), Vec::new());
        assert!(matches!(result, Err(PassportError::SpawnFailed { .. })));
    }

    #[test]
    fn signal_termination_is_process_failure() {
        let result = run_with_output(&argv(&["sh", "-c", "kill -9 $$"]), Vec::new());
        assert!(matches!(result, Err(PassportError::ProcessFailed(_))));
    }

    #[test]
    fn empty_argv_is_rejected() {
        assert!(matches!(
            run_with_output(&[], Vec::new()),
            Err(PassportError::EmptyCommand)
        ));
    }
}
