use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

fn confirm_overwrite(path: &Path) -> AppResult<bool> {
    warning(format!("'{}' already exists.", path.display()));
    print!("Overwrite it? [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// A new file is always writable; an existing one needs `force` or a yes
/// from the user.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    if confirm_overwrite(path)? {
        info("Existing file will be overwritten.");
        return Ok(());
    }

    Err(AppError::Export(format!(
        "export cancelled, existing file not overwritten: {}",
        path.display()
    )))
}
