use std::io::{self, Write};

/// Writes help text exactly as given.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_stdout(&[text.as_bytes()])
}

/// Writes a rendered body followed by a newline.
pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_stdout(&[text.as_bytes(), b"\n"])
}

// A reader that closes the pipe early (`foodtrack history | head`) is not an error.
fn write_stdout(chunks: &[&[u8]]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for chunk in chunks {
        tolerate_broken_pipe(stdout.write_all(chunk))?;
    }
    tolerate_broken_pipe(stdout.flush())
}

fn tolerate_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
