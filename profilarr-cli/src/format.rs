use clap::Subcommand;
use profilarr_lib::{
    Backend,
    page::{Page, sequence},
};
use sysexits::ExitCode;

use crate::status;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List custom formats
    List,
}

pub async fn handle(page: &mut Page, backend: &dyn Backend, cmd: &Command) -> ExitCode {
    sequence::activate(page, backend).await;
    if !page.gate().is_unlocked() {
        return status::report(page);
    }

    match cmd {
        Command::List => {
            for format in page.formats() {
                println!("{:>5}  {}", format.id, format.name);
            }
            ExitCode::Ok
        }
    }
}
