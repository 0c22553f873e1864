use colored::Colorize;
use profilarr_lib::{
    Backend,
    page::{Gate, Page, sequence},
};
use sysexits::ExitCode;

pub async fn handle(page: &mut Page, backend: &dyn Backend) -> ExitCode {
    sequence::activate(page, backend).await;
    report(page)
}

/// Print the gate state. Returns success only when profiles are available.
pub fn report(page: &Page) -> ExitCode {
    match page.gate() {
        Gate::Unlocked => {
            println!("{}", "Repository clean, profiles available".green());
            ExitCode::Ok
        }
        Gate::Locked(conflicts) => {
            println!("{}", "Merge Conflicts Detected".red().bold());
            for conflict in conflicts {
                println!("  * {}", conflict.label());
            }
            println!(
                "{}",
                "Profiles are locked until these conflicts are resolved in settings.".dimmed()
            );
            ExitCode::TempFail
        }
        Gate::LockedUnknown | Gate::Pending => {
            eprintln!(
                "{} could not determine repository status, see logs (RUST_LOG=debug)",
                "error:".red().bold()
            );
            ExitCode::Unavailable
        }
    }
}
