//! Point and resolve commands

use crate::cli::{PointArgs, ResolveArgs};
use crate::core::error::Result;
use crate::output;
use crate::point::ids;

/// Run the point command
pub fn run(args: PointArgs) -> Result<()> {
    let service = args.tree.open_service()?;
    service.rebuild_now()?;

    let snapshot = service.snapshot();
    let found = snapshot
        .source(&args.source)
        .and_then(|source| Some((source, source.point(&args.addr)?)));

    match found {
        Some((source, point)) => {
            print!(
                "{}",
                output::format_point(source, point, args.tree.format())
            );
            if args.tree.json {
                println!();
            } else if let Some(value) = service.read_value(point) {
                println!("  value:  {}", output::human::format_value(&value));
            }
        }
        None => println!("No point '{}' in source '{}'", args.addr, args.source),
    }
    Ok(())
}

/// Run the resolve command
pub fn run_resolve(args: ResolveArgs) -> Result<()> {
    let handle = ids::handle_for_point_id(&args.id)?;
    println!("{}", handle);
    Ok(())
}
