//! `laxml explain`: look up an error code in the catalog.

use anyhow::Result;
use laxml_error_reporting::{ErrorCodeInfo, catalog::all_codes, get_error_info};

pub fn execute(code: &str) -> Result<()> {
    let code = code.trim().to_ascii_uppercase();
    let Some(info) = get_error_info(&code) else {
        anyhow::bail!(
            "Unknown error code `{code}` (known codes: {})",
            all_codes().join(", ")
        );
    };
    print!("{}", describe(&code, info));
    Ok(())
}

fn describe(code: &str, info: &ErrorCodeInfo) -> String {
    format!(
        "{code}: {}\nsubsystem: {} (since {})\n\n{}\n",
        info.title, info.subsystem, info.since_version, info.message_template
    )
}
