use std::fs;

use crate::check::{CheckContext, CheckError, CheckFailure, CheckResult};

const PRAGMA: &[u8] = b"#pragma once";

/// Every header must contain a line starting with `#pragma once`.
///
/// Stops at the first header without one.
///
/// # Errors
/// Returns a [`CheckFailure`] naming the offending header, or an I/O error if
/// a header cannot be read.
pub fn pragma_once(ctx: &CheckContext) -> CheckResult {
    for path in &ctx.paths {
        if ctx.is_cancelled() {
            return Err(CheckError::Cancelled);
        }

        let contents = fs::read(ctx.absolute(path))?;
        let found = contents
            .split(|&b| b == b'\n')
            .any(|line| line.starts_with(PRAGMA));
        if !found {
            return Err(CheckFailure::new("#pragma once is missing!").at(path).into());
        }
        ctx.log.debug(format!("{}: ok", path.display()));
    }
    Ok(())
}
