use super::{CmdMessage, CmdResult};
use crate::error::{PlatedexError, Result};
use crate::interchange;
use std::fs::File;
use std::path::Path;

/// A blank import template: the header row only.
pub fn run(output: Option<&Path>) -> Result<CmdResult> {
    match output {
        Some(path) => {
            interchange::write_template(File::create(path)?)?;
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!(
                "Wrote import template to {}",
                path.display()
            )));
            Ok(result)
        }
        None => {
            let mut buf = Vec::new();
            interchange::write_template(&mut buf)?;
            let text = String::from_utf8(buf)
                .map_err(|e| PlatedexError::Api(format!("Template is not UTF-8: {}", e)))?;
            Ok(CmdResult::default().with_output(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_matches_export_header() {
        let text = run(None).unwrap().output.unwrap();
        assert_eq!(text.trim_end(), interchange::COLUMNS.join(","));
    }
}
