//! Rebuild and sources commands

use tracing::info;

use crate::cli::TreeArgs;
use crate::core::error::Result;
use crate::output;

/// Run the rebuild command
pub fn run(args: TreeArgs) -> Result<()> {
    let service = args.open_service()?;
    info!(tree = %args.tree.display(), "Rebuilding point index");

    let report = service.rebuild_now()?;
    print!("{}", output::format_report(&report, args.format()));
    if args.json {
        println!();
    }
    Ok(())
}

/// Run the sources command
pub fn run_sources(args: TreeArgs) -> Result<()> {
    let service = args.open_service()?;
    service.rebuild_now()?;

    let snapshot = service.snapshot();
    let mut sources: Vec<_> = snapshot.sources().collect();
    sources.sort_by(|a, b| a.path.cmp(&b.path));

    print!("{}", output::format_sources(&sources, args.format()));
    if args.json {
        println!();
    }
    Ok(())
}
