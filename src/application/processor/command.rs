//! External program processor
//!
//! The template data is written to the program's stdin and its stdout becomes
//! the output. `{name}` placeholders in arguments are filled from the render
//! variables first, then from the template options.

use std::io::Write;
use std::process::{Command, Stdio};

use super::{Template, Variables};
use crate::error::{ConduitError, ConduitResult};

pub(super) fn run(
    program: &str,
    args: &[String],
    template: &Template,
    vars: &Variables,
) -> ConduitResult<String> {
    let args: Vec<String> = args
        .iter()
        .map(|arg| expand_placeholders(arg, template, vars))
        .collect();
    tracing::debug!(program, ?args, path = %template.path().display(), "running processor command");

    let failed = |message: String| ConduitError::ProcessorFailed {
        processor: program.to_string(),
        file: template.path().to_path_buf(),
        message,
    };

    let mut child = Command::new(program)
        .args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| failed(format!("could not start: {}", e)))?;

    // stdin is fed from its own thread while stdout is drained here
    let input = template.data().as_bytes().to_vec();
    let writer = child.stdin.take().map(|mut stdin| {
        std::thread::spawn(move || stdin.write_all(&input))
    });

    let output = child
        .wait_with_output()
        .map_err(|e| failed(e.to_string()))?;

    if let Some(writer) = writer {
        match writer.join() {
            Ok(Ok(())) => {}
            // exited before reading everything
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(failed(e.to_string())),
            Err(_) => return Err(failed("stdin writer panicked".to_string())),
        }
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(failed(format!("exited with {}: {}", output.status, stderr)));
    }

    String::from_utf8(output.stdout).map_err(|_| failed("output is not valid UTF-8".to_string()))
}

fn expand_placeholders(arg: &str, template: &Template, vars: &Variables) -> String {
    let mut out = String::with_capacity(arg.len());
    let mut rest = arg;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let key = &rest[open + 1..open + close];
        let value = vars
            .get(key)
            .map(String::as_str)
            .or_else(|| template.option(key));

        out.push_str(&rest[..open]);
        match value {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..=open + close]),
        }
        rest = &rest[open + close + 1..];
    }

    out.push_str(rest);
    out
}
