use crate::cli::OutputFormat;

mod human;
mod json;

pub(crate) trait OutputFormatter {
    fn print_header(&self, target: &str, method: &str, cfg: &grpzip_core::RunConfig);
    fn print_summary(&self, summary: &grpzip_core::RunSummary) -> anyhow::Result<()>;
}

pub(crate) fn formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::HumanReadable => Box::new(human::HumanReadableOutput),
        OutputFormat::Json => Box::new(json::JsonOutput),
    }
}
