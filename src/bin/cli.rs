//! Library Timesheet Scheduler CLI
//!
//! Interactive front end for the staff scheduling service. It drives the
//! form controller: add staff entries, manage reusable profiles, edit the
//! working schedule document, and generate the timesheet spreadsheet.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin lts-cli
//! ```
//!
//! # Environment Variables
//!
//! - `LTS_ORIGIN`: server origin (default: http://localhost:8888)
//! - `LTS_API_BASE`: full API base override
//! - `LTS_OUTPUT_DIR`: directory for generated spreadsheets (default: .)
//! - `RUST_LOG`: log level (default: warn)
//!
//! An optional `lts.toml` in the working directory provides the same
//! settings under `[api]` and `[output]`.

use std::env;
use std::fmt;
use std::io::{self, BufRead, Write};

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lts_rust::api::{Role, StaffEntry, StaffStatus};
use lts_rust::controller::FormController;
use lts_rust::http::{ApiClient, ClientConfig};
use lts_rust::services::timegrid::{
    format_time, TEA_HELP, TEA_MINUTE_OPTIONS, TIME_HELP, TIME_OPTIONS,
};
use lts_rust::services::validation::FormFields;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::WARN),
        )
        .with_target(false)
        .init();

    let config = ClientConfig::load();
    info!(primary = %config.primary_base, "starting lts-cli");

    let client = ApiClient::new(&config)?;
    let mut controller = FormController::new(client, config.output_dir.clone());
    controller.load().await;
    report(&controller);

    println!("Library timesheet scheduler. Type 'help' for commands.");
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        prompt("lts> ")?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        let (command, argument) = match input.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (input, ""),
        };

        match command {
            "" => continue,
            "help" => print_help(),
            "quit" | "exit" => break,
            "staff" => {
                controller.refresh_staff().await;
                print_staff(&controller.staff);
                report(&controller);
            }
            "profiles" => {
                controller.refresh_profiles().await;
                print_profiles(&controller);
                report(&controller);
            }
            "add" => {
                prompt_fields(&mut controller.fields)?;
                if controller.add_staff().await {
                    println!("Added.");
                }
                report(&controller);
            }
            "save-profile" => {
                prompt_fields(&mut controller.fields)?;
                if controller.save_profile().await {
                    println!("Profile saved.");
                }
                report(&controller);
            }
            "use" => {
                let found = controller.profiles.iter().find(|p| p.name == argument).cloned();
                match found {
                    Some(profile) => {
                        controller.apply_profile(&profile);
                        println!("Fields loaded from profile '{argument}'.");
                        print_fields(&controller.fields);
                    }
                    None => println!("No profile named '{argument}'."),
                }
            }
            "rm" => {
                if controller.delete_staff(argument).await {
                    println!("Removed.");
                }
                report(&controller);
            }
            "rm-profile" => {
                if controller.delete_profile(argument).await {
                    println!("Removed.");
                }
                report(&controller);
            }
            "fields" => print_fields(&controller.fields),
            "doc" => println!("{}", controller.schedule_json),
            "doc-set" => {
                println!("Enter the document JSON; finish with a single '.' line:");
                controller.set_schedule_text(read_block(&stdin)?);
            }
            "doc-reset" => {
                controller.reset_document();
                println!("Document reset.");
            }
            "date" => match argument.parse::<chrono::NaiveDate>() {
                Ok(date) => {
                    controller.set_date(date);
                    println!("Sheet date set to {date}.");
                }
                Err(_) => println!("Expected a date as YYYY-MM-DD."),
            },
            "gen" => {
                if let Some(path) = controller.generate().await {
                    println!("Timesheet written to {}.", path.display());
                }
                report(&controller);
            }
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\
Commands:
  staff              list current staff entries
  add                add a staff entry (prompts per field)
  rm <name>          remove a staff entry
  profiles           list stored profiles
  save-profile       save the prompted fields as a profile
  use <name>         copy a profile into the form fields
  rm-profile <name>  remove a stored profile
  fields             show the current form fields
  doc                show the working schedule document
  doc-set            replace the document (terminate with '.')
  doc-reset          reset the document to an empty schedule
  date <YYYY-MM-DD>  set the sheet date on the document
  gen                generate the timesheet and save it
  quit               exit"
    );
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

fn read_line(stdin: &io::Stdin) -> io::Result<String> {
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn read_block(stdin: &io::Stdin) -> io::Result<String> {
    let mut block = String::new();
    loop {
        let line = read_line(stdin)?;
        if line == "." {
            break;
        }
        block.push_str(&line);
        block.push('\n');
    }
    Ok(block)
}

/// Walk the operator through every form field.
fn prompt_fields(fields: &mut FormFields) -> io::Result<()> {
    let stdin = io::stdin();

    prompt("Name: ")?;
    fields.name = read_line(&stdin)?;

    fields.role = pick(&stdin, "Role", &Role::ALL)?;
    fields.status = pick(&stdin, "Status", &StaffStatus::ALL)?;
    fields.status_detail = if fields.status == StaffStatus::OtherLibrary {
        prompt("Which library? ")?;
        read_line(&stdin)?
    } else {
        String::new()
    };

    println!("{TIME_HELP}");
    println!("  {}", TIME_OPTIONS.join(" "));
    prompt("Start time (blank to skip): ")?;
    fields.start_hour = read_line(&stdin)?;
    prompt("End time (blank to skip): ")?;
    fields.end_hour = read_line(&stdin)?;

    println!("{TEA_HELP}");
    prompt(&format!(
        "Tea slot minutes ({}; blank to skip): ",
        TEA_MINUTE_OPTIONS.join("/")
    ))?;
    fields.tea_slot = read_line(&stdin)?;

    Ok(())
}

/// Numbered pick list; a blank answer selects the first option.
fn pick<T: Copy + fmt::Display>(stdin: &io::Stdin, label: &str, options: &[T]) -> io::Result<T> {
    loop {
        for (index, option) in options.iter().enumerate() {
            println!("  {}. {option}", index + 1);
        }
        prompt(&format!("{label} [1]: "))?;
        let answer = read_line(stdin)?;
        if answer.is_empty() {
            return Ok(options[0]);
        }
        match answer.parse::<usize>() {
            Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(options[choice - 1]),
            _ => println!("Enter a number between 1 and {}.", options.len()),
        }
    }
}

fn print_staff(staff: &[StaffEntry]) {
    if staff.is_empty() {
        println!("No staff entries.");
        return;
    }
    for entry in staff {
        let mut parts = vec![entry.name.clone(), entry.role.to_string()];
        if let Some(status) = entry.status {
            parts.push(format!("Status: {status}"));
        }
        if let (Some(start), Some(end)) = (entry.start_hour, entry.end_hour) {
            parts.push(format!("Shift: {}-{}", format_time(start), format_time(end)));
        }
        if let Some(tea) = entry.tea_slot {
            parts.push(format!("Tea: {tea}"));
        }
        println!("  {}", parts.join("  "));
    }
}

fn print_profiles(controller: &FormController) {
    if controller.profiles.is_empty() {
        println!("No stored profiles.");
        return;
    }
    print_staff(&controller.profiles);
}

fn print_fields(fields: &FormFields) {
    println!("  Name: {}", fields.name);
    println!("  Role: {}", fields.role);
    println!("  Status: {}", fields.status);
    if !fields.status_detail.is_empty() {
        println!("  Detail: {}", fields.status_detail);
    }
    println!("  Start: {}", fields.start_hour);
    println!("  End: {}", fields.end_hour);
    println!("  Tea: {}", fields.tea_slot);
}

fn report(controller: &FormController) {
    if let Some(error) = &controller.error {
        println!("error: {error}");
    } else if let Some(notice) = &controller.notice {
        println!("{notice}");
    }
}
