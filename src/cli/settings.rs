//! Settings commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::open_library;
use crate::cli::{OutputFormat, SettingsCommands};
use crate::error::Result;
use crate::models::SettingDisplay;
use crate::output::{Formattable, json};
use crate::store::Settings;

fn print_settings(settings: &Settings, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", json::format_json(settings)?);
        return Ok(());
    }
    let display: Vec<SettingDisplay> = settings
        .entries()
        .into_iter()
        .map(|(name, value)| SettingDisplay {
            name: name.to_string(),
            value,
        })
        .collect();
    display.print(format)
}

pub fn run(opts: &GlobalOptions, cmd: SettingsCommands) -> Result<()> {
    let library = open_library(opts)?;
    match cmd {
        SettingsCommands::Show => print_settings(&library.settings.load(), opts.format),
        SettingsCommands::Set { name, value } => {
            let settings = library.settings.update(&name, &value)?;
            if opts.format != OutputFormat::Json {
                println!("{} {} updated", "✓".green(), name.bold());
            }
            print_settings(&settings, opts.format)
        }
        SettingsCommands::Reset => {
            library.settings.reset()?;
            if opts.format != OutputFormat::Json {
                println!("{} Settings restored to defaults", "✓".green());
            }
            print_settings(&Settings::default(), opts.format)
        }
    }
}
