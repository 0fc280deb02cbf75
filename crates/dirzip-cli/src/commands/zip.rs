//! Zip command implementation.

use crate::cli::ZipArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use dirzip_core::Archiver;
use dirzip_core::TracingSink;

pub fn execute(args: &ZipArgs, verbose: bool, formatter: &dyn OutputFormatter) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "Output file '{}' already exists\n\
             HINT: Use --force to overwrite it.",
            args.output.display()
        );
    }

    let mut builder = Archiver::builder();
    if verbose {
        builder = builder.logger(TracingSink);
    }
    if let Some(log_file) = &args.log_file {
        builder = builder.log_file(log_file);
    }
    let archiver = add_archive_context(builder.build(), &args.output)?;

    tracing::debug!(
        source = %args.source.display(),
        output = %args.output.display(),
        "starting archive creation"
    );
    let report = add_archive_context(archiver.zip(&args.source, &args.output), &args.output)?;

    formatter.format_zip_result(&args.source, &args.output, &report)
}
