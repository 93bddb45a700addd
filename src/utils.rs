use std::io::Write;
use crate::sync_error::SyncResult;
use crossterm::{QueueableCommand, cursor};

/// Writes `msg` over whatever the previous call printed on the same line.
pub(crate) fn rewrite_message<W: Write>(out: &mut W, msg: String) -> SyncResult<()> {
    out.queue(cursor::SavePosition)?;
    out.write_all(msg.as_bytes())?;
    out.queue(cursor::RestorePosition)?;
    out.flush()?;
    Ok(())
}

pub(crate) fn progress_message(label: &str, done: usize, total: usize) -> String {
    format!("{} {} / {} files", label, done, total)
}
