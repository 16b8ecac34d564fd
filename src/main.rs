//! Date picker grid CLI.
//!
//! # Usage
//! ```ignore
//! datepick              // Current month, today selected
//! datepick 2 2024       // February 2024
//! datepick 29 2 2024    // February 2024, 29th selected
//! datepick -y           // Selectable years
//! ```

use datepick::args::{Args, get_display_date};
use datepick::formatter::{print_month, print_years};
use datepick::picker::Calendar;
use datepick::types::CalContext;

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("datepick: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let ctx = CalContext::new(args)?;
    log::debug!("context: {:?}", ctx);

    if args.years {
        print_years(&ctx);
        return Ok(());
    }

    let requested = get_display_date(args, ctx.today)?;

    let mut calendar = Calendar::new(&ctx, ctx.today, |_| {});
    if !calendar.activate(requested) {
        let years = calendar.years();
        return Err(format!(
            "Year {} is outside the selectable range {}-{}",
            requested.format("%Y"),
            years.min(),
            years.max()
        ));
    }

    let selected = calendar.date();
    print_month(&ctx, selected, selected);

    Ok(())
}
