use clap::{Args, Subcommand};
use colored::Colorize;
use profilarr_lib::{
    Backend, Profile,
    page::{FilterKind, ModalState, Page, SortKey, format_timestamp, sequence},
};
use sysexits::ExitCode;
use tracing::error;

use crate::status;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List profiles
    List {
        /// title, name, dateCreated or dateModified
        #[arg(short, long, default_value = "title", value_parser = parse_sort)]
        sort: SortKey,
        /// Only show profiles carrying this tag
        #[arg(long, conflicts_with = "date")]
        tag: Option<String>,
        /// Only show profiles last modified on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// List every tag in use
    Tags,
    /// Add a new profile
    Add {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Edit an existing profile
    Edit(EditArgs),
    /// Save a copy of an existing profile
    Clone { id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    id: i64,
    #[arg(short, long)]
    name: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    /// Replace the profile's tags
    #[arg(short, long = "tag")]
    tags: Vec<String>,
    /// Remove every tag from the profile
    #[arg(long, conflicts_with = "tags")]
    clear_tags: bool,
}

impl EditArgs {
    /// Apply the requested changes, leaving everything not mentioned as it was.
    fn apply(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(description) = &self.description {
            profile.description = description.clone();
        }
        if self.clear_tags {
            profile.tags.clear();
        } else if !self.tags.is_empty() {
            profile.tags = self.tags.clone();
        }
    }
}

fn parse_sort(raw: &str) -> Result<SortKey, String> {
    raw.parse().map_err(|_| {
        format!("unknown sort key '{raw}', expected title, name, dateCreated or dateModified")
    })
}

pub async fn handle(page: &mut Page, backend: &dyn Backend, cmd: &Command) -> ExitCode {
    sequence::activate(page, backend).await;
    if !page.gate().is_unlocked() {
        return status::report(page);
    }

    match cmd {
        Command::List { sort, tag, date } => {
            page.set_sort(*sort);
            if let Some(tag) = tag {
                page.set_filter(FilterKind::Tag);
                page.set_filter_value(tag.as_str());
            } else if let Some(date) = date {
                page.set_filter(FilterKind::Date);
                page.set_filter_value(date.as_str());
            }

            let show_date = page.selection().show_date();
            for profile in page.visible_profiles() {
                print_profile(profile, show_date);
            }
            ExitCode::Ok
        }
        Command::Tags => {
            for tag in page.tags() {
                println!("{tag}");
            }
            ExitCode::Ok
        }
        Command::Add {
            name,
            description,
            tags,
        } => {
            if !page.open_create() {
                return ExitCode::Software;
            }
            let mut profile = Profile::new(name.as_str());
            profile.description = description.clone().unwrap_or_default();
            profile.tags = tags.clone();

            save(page, backend, profile).await
        }
        Command::Edit(args) => {
            let Some(existing) = find(page, args.id) else {
                return ExitCode::DataErr;
            };
            page.open_edit(existing);

            let Some(mut profile) = page.modal().profile().cloned() else {
                return ExitCode::Software;
            };
            args.apply(&mut profile);

            save(page, backend, profile).await
        }
        Command::Clone { id } => {
            let Some(existing) = find(page, *id) else {
                return ExitCode::DataErr;
            };
            page.open_clone(&existing);

            let ModalState::Clone(copy) = page.modal().clone() else {
                return ExitCode::Software;
            };
            save(page, backend, copy).await
        }
    }
}

fn find(page: &Page, id: i64) -> Option<Profile> {
    let found = page.profiles().iter().find(|p| p.id == id).cloned();
    if found.is_none() {
        eprintln!("{} no profile with id {id}", "error:".red().bold());
    }
    found
}

/// Save the dialog's payload, then reload like the page does after a save.
async fn save(page: &mut Page, backend: &dyn Backend, profile: Profile) -> ExitCode {
    if let Err(err) = backend.save_profile(&profile).await {
        error!("Error saving profile: {err}");
        eprintln!("{} {err}", "error:".red().bold());
        page.close_modal();
        return ExitCode::Unavailable;
    }

    let effects = page.save_complete();
    sequence::run(page, backend, effects).await;

    println!("{} {}", "Saved".green(), profile.name.bold());
    ExitCode::Ok
}

fn print_profile(profile: &Profile, show_date: bool) {
    let tags = if profile.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", profile.tags.join(", "))
    };

    let date = match (&profile.date_modified, show_date) {
        (Some(modified), true) => format!("  {}", format_timestamp(modified).dimmed()),
        _ => String::new(),
    };

    println!(
        "{:>5}  {}{}{}",
        profile.id,
        profile.name.bold(),
        tags.cyan(),
        date
    );
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    fn edit(args: &[&str]) -> EditArgs {
        let argv = ["profilarr", "edit"].iter().chain(args);
        match Cli::try_parse_from(argv).map(|cli| cli.command) {
            Ok(Command::Edit(args)) => args,
            other => panic!("expected an edit command, got {other:?}"),
        }
    }

    fn tagged() -> Profile {
        let mut profile = Profile::new("Remux");
        profile.id = 3;
        profile.tags = vec!["4k".into(), "hdr".into()];
        profile
    }

    #[test]
    fn test_edit_without_tags_keeps_them() {
        let mut profile = tagged();

        edit(&["3", "--name", "Remux 2160p"]).apply(&mut profile);

        assert_eq!(profile.name, "Remux 2160p");
        assert_eq!(profile.tags, vec!["4k", "hdr"]);
    }

    #[test]
    fn test_edit_replaces_tags() {
        let mut profile = tagged();

        edit(&["3", "-t", "1080p"]).apply(&mut profile);

        assert_eq!(profile.tags, vec!["1080p"]);
    }

    #[test]
    fn test_edit_clears_tags() {
        let mut profile = tagged();

        edit(&["3", "--clear-tags"]).apply(&mut profile);

        assert!(profile.tags.is_empty());
        assert_eq!(profile.name, "Remux");
    }

    #[test]
    fn test_clear_tags_conflicts_with_tag() {
        let parsed = Cli::try_parse_from(["profilarr", "edit", "3", "--clear-tags", "-t", "4k"]);

        assert!(parsed.is_err());
    }
}
