//! Query script splitting

/// Splits a script into statements on `;`, dropping empty pieces.
///
/// Semicolons inside string literals or comments are not special-cased; query
/// files fed to the analyzer are expected to be plain statement lists.
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests;
