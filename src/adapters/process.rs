use crate::domain::model::Invocation;
use crate::utils::error::ProcessError;
use std::ffi::OsStr;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs `invocation` followed by `extra_args` to completion and returns its
/// stdout. Child stderr is inherited. When `stdin` is given it is written to
/// the child and the pipe closed; otherwise the child gets no stdin. A child
/// that exits 0 without reading its stdin is not an error.
pub async fn run_captured<A>(
    invocation: &Invocation,
    extra_args: &[A],
    stdin: Option<&[u8]>,
) -> Result<Vec<u8>, ProcessError>
where
    A: AsRef<OsStr>,
{
    let program = invocation.display_name();
    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .args(extra_args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());

    tracing::debug!(
        "Launching {} with {} leading and {} run arguments",
        program,
        invocation.args.len(),
        extra_args.len()
    );

    let mut child = command.spawn().map_err(|source| ProcessError::Launch {
        program: program.clone(),
        source,
    })?;

    let pipe = child.stdin.take();
    let feed = async {
        match (pipe, stdin) {
            (Some(mut pipe), Some(payload)) => {
                pipe.write_all(payload).await?;
                pipe.shutdown().await
            }
            _ => Ok::<(), std::io::Error>(()),
        }
    };

    let (fed, output) = tokio::join!(feed, child.wait_with_output());
    let output = output.map_err(|source| ProcessError::Launch {
        program: program.clone(),
        source,
    })?;

    if !output.status.success() {
        return Err(ProcessError::Exited {
            program,
            status: output.status,
        });
    }

    match fed {
        Ok(()) => {}
        // the child succeeded without draining its input
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            tracing::debug!("{} exited before reading all of stdin", program);
        }
        Err(source) => return Err(ProcessError::Stdin { program, source }),
    }

    tracing::debug!("Captured {} bytes of stdout", output.stdout.len());
    Ok(output.stdout)
}
