// src/tools/align.rs

use clap::Args;

use crate::config::Settings;
use crate::errors::Result;

use super::{Flag, ToolAction, is_blank, push_flags, require, sibling_apk};

/// `zipalign [-f] -v 4 <input> <output>`.
#[derive(Debug, Clone, Default, Args)]
pub struct AlignConfig {
    #[arg(value_name = "APK")]
    pub input_apk: String,

    /// Aligned output; defaults to `<input>_aligned.apk`.
    #[arg(value_name = "OUTPUT", default_value = "")]
    pub output_apk: String,

    /// Overwrite an existing output file.
    #[arg(short = 'f', long)]
    pub force: bool,
}

impl AlignConfig {
    pub fn effective_output(&self) -> String {
        if is_blank(&self.output_apk) {
            sibling_apk(&self.input_apk, "_aligned")
        } else {
            self.output_apk.clone()
        }
    }
}

impl ToolAction for AlignConfig {
    fn label(&self) -> &'static str {
        "Aligning APK..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let input = require(&self.input_apk, "Please select an APK file to align.")?;

        let mut argv = vec![settings.tools().zipalign.clone()];
        push_flags(&mut argv, &[Flag::Switch("-f", self.force)]);
        argv.extend(["-v".to_string(), "4".to_string()]);
        argv.push(input.to_string());
        argv.push(self.effective_output());
        Ok(argv)
    }
}
